use alloc::collections::VecDeque;

use smallvec::SmallVec;

use super::handle::Handle;
use super::raw_rbtree_map::RawRBTreeMap;

// A red-black tree over the whole handle space is at most 2 * 32 levels deep,
// so the stacks never spill for `u32` handles.
const INLINE_DEPTH: usize = 64;

type Stack = SmallVec<[Handle; INLINE_DEPTH]>;
// Post-order keeps each node twice: once to expand, once to emit.
type FlaggedStack = SmallVec<[(Handle, bool); INLINE_DEPTH]>;

#[derive(Clone, Debug)]
enum Frontier {
    InOrder(Stack),
    PreOrder(Stack),
    PostOrder(FlaggedStack),
    LevelOrder(VecDeque<Handle>),
}

/// A lazy walk over the nodes of a tree, holding handles only.
///
/// A walk does not borrow the tree; every step is handed the tree again.
/// Stepping with a tree that has been mutated since the walk started may
/// follow dead handles, so callers either hold a shared borrow for the whole
/// walk or check the tree's version before each step.
#[derive(Clone, Debug)]
pub(crate) struct Walk {
    frontier: Frontier,
    remaining: usize,
}

impl Walk {
    /// Ascending key order over the whole tree.
    pub(crate) fn in_order<K, V>(tree: &RawRBTreeMap<K, V>) -> Self {
        Self::in_order_from(tree, 0, tree.len())
    }

    /// Ascending key order, starting at position `start` and yielding at most
    /// `count` nodes.
    pub(crate) fn in_order_from<K, V>(tree: &RawRBTreeMap<K, V>, start: usize, count: usize) -> Self {
        let mut stack = Stack::new();
        let mut current = tree.root();
        let mut rank = start;

        // Leave the node at `start` on top, with every ancestor still to be
        // visited (those we went left from) below it.
        while let Some(handle) = current {
            let node = tree.node(handle);
            let left_size = tree.size_of(node.left);
            if rank < left_size {
                stack.push(handle);
                current = node.left;
            } else if rank == left_size {
                stack.push(handle);
                break;
            } else {
                rank -= left_size + 1;
                current = node.right;
            }
        }

        let available = tree.len().saturating_sub(start);
        Self {
            frontier: Frontier::InOrder(stack),
            remaining: count.min(available),
        }
    }

    /// Node, then left subtree, then right subtree.
    pub(crate) fn pre_order<K, V>(tree: &RawRBTreeMap<K, V>) -> Self {
        Self {
            frontier: Frontier::PreOrder(tree.root().into_iter().collect()),
            remaining: tree.len(),
        }
    }

    /// Left subtree, then right subtree, then node.
    pub(crate) fn post_order<K, V>(tree: &RawRBTreeMap<K, V>) -> Self {
        Self {
            frontier: Frontier::PostOrder(tree.root().map(|root| (root, false)).into_iter().collect()),
            remaining: tree.len(),
        }
    }

    /// Breadth first, left to right within a level.
    pub(crate) fn level_order<K, V>(tree: &RawRBTreeMap<K, V>) -> Self {
        Self {
            frontier: Frontier::LevelOrder(tree.root().into_iter().collect()),
            remaining: tree.len(),
        }
    }

    pub(crate) const fn remaining(&self) -> usize {
        self.remaining
    }

    pub(crate) fn next<K, V>(&mut self, tree: &RawRBTreeMap<K, V>) -> Option<Handle> {
        if self.remaining == 0 {
            return None;
        }

        let handle = match &mut self.frontier {
            Frontier::InOrder(stack) => {
                let handle = stack.pop()?;
                let mut current = tree.node(handle).right;
                while let Some(child) = current {
                    stack.push(child);
                    current = tree.node(child).left;
                }
                handle
            }
            Frontier::PreOrder(stack) => {
                let handle = stack.pop()?;
                let node = tree.node(handle);
                stack.extend(node.right);
                stack.extend(node.left);
                handle
            }
            Frontier::PostOrder(stack) => loop {
                let (handle, expanded) = stack.pop()?;
                if expanded {
                    break handle;
                }
                let node = tree.node(handle);
                stack.push((handle, true));
                stack.extend(node.right.map(|right| (right, false)));
                stack.extend(node.left.map(|left| (left, false)));
            },
            Frontier::LevelOrder(queue) => {
                let handle = queue.pop_front()?;
                let node = tree.node(handle);
                queue.extend(node.left);
                queue.extend(node.right);
                handle
            }
        };

        self.remaining -= 1;
        Some(handle)
    }
}
