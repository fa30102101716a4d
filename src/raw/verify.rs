use super::handle::Handle;
use super::raw_rbtree_map::RawRBTreeMap;
use super::walk::Walk;
use crate::comparator::Comparator;
use crate::error::Violation;

impl<K, V> RawRBTreeMap<K, V> {
    /// Checks every structural invariant, returning the first one found broken.
    ///
    /// O(n). Recursion depth is the tree height, which is only unbounded on a
    /// tree that is already corrupt.
    pub(crate) fn validate<C: Comparator<K>>(&self, cmp: &C) -> Result<(), Violation> {
        self.check_order(cmp)?;
        self.check_sizes(self.root())?;

        let live = self.live_nodes();
        if self.len() != live {
            return Err(Violation::SizeMismatch {
                stored: self.len(),
                actual: live,
            });
        }

        self.check_links(self.root())?;
        if self.black_height(self.root()).is_none() {
            return Err(Violation::BlackHeightMismatch);
        }
        if self.is_red(self.root()) {
            return Err(Violation::RedRoot);
        }

        Ok(())
    }

    // In-order keys must be strictly ascending.
    fn check_order<C: Comparator<K>>(&self, cmp: &C) -> Result<(), Violation> {
        let mut walk = Walk::in_order(self);
        let mut previous: Option<&K> = None;
        let mut position = 0;

        while let Some(handle) = walk.next(self) {
            let key = &self.node(handle).key;
            if let Some(previous) = previous
                && !cmp.less(previous, key)
            {
                return Err(Violation::UnorderedKeys { position });
            }
            previous = Some(key);
            position += 1;
        }

        Ok(())
    }

    // Returns the actual size of the subtree.
    fn check_sizes(&self, link: Option<Handle>) -> Result<usize, Violation> {
        let Some(handle) = link else {
            return Ok(0);
        };

        let node = self.node(handle);
        let actual = 1 + self.check_sizes(node.left)? + self.check_sizes(node.right)?;
        if node.size() == actual {
            Ok(actual)
        } else {
            Err(Violation::SizeMismatch {
                stored: node.size(),
                actual,
            })
        }
    }

    // No red right links, no red node with a red left child.
    fn check_links(&self, link: Option<Handle>) -> Result<(), Violation> {
        let Some(handle) = link else {
            return Ok(());
        };

        let node = self.node(handle);
        if self.is_red(node.right) {
            return Err(Violation::RightLeaningRed);
        }
        if node.is_red() && self.is_red(node.left) {
            return Err(Violation::ConsecutiveReds);
        }

        self.check_links(node.left)?;
        self.check_links(node.right)
    }

    /// Number of black links from `link` down to any null link, or `None` if
    /// two paths disagree.
    pub(crate) fn black_height(&self, link: Option<Handle>) -> Option<usize> {
        let Some(handle) = link else {
            return Some(0);
        };

        let node = self.node(handle);
        let left = self.black_height(node.left)?;
        let right = self.black_height(node.right)?;
        (left == right).then(|| left + usize::from(!node.is_red()))
    }
}
