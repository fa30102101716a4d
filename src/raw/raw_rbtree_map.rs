use core::cmp::Ordering;

use super::arena::Arena;
use super::handle::Handle;
use super::node::{Color, Node};
use super::size::Size;
use crate::comparator::Comparator;

/// The left-leaning red-black tree backing `RBTreeMap`.
///
/// Nodes live in an arena and link to their children by handle. The map's
/// length is the size of the root, so there is no separate counter to keep in
/// sync.
#[derive(Clone)]
pub(crate) struct RawRBTreeMap<K, V> {
    /// Arena storing all tree nodes.
    nodes: Arena<Node<K, V>>,
    /// Handle to the root node, if the tree is non-empty.
    root: Option<Handle>,
    /// Bumped by every mutation; detached traversals compare against it.
    version: u64,
}

impl<K, V> RawRBTreeMap<K, V> {
    /// Creates a new, empty tree.
    pub(crate) const fn new() -> Self {
        Self {
            nodes: Arena::new(),
            root: None,
            version: 0,
        }
    }

    /// Creates a new tree with room for `capacity` nodes.
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Arena::with_capacity(capacity),
            root: None,
            version: 0,
        }
    }

    /// Returns the number of key-value pairs in the tree.
    pub(crate) fn len(&self) -> usize {
        self.size_of(self.root)
    }

    /// Returns true if the tree contains no elements.
    pub(crate) const fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    pub(crate) fn capacity(&self) -> usize {
        self.nodes.capacity()
    }

    pub(crate) const fn version(&self) -> u64 {
        self.version
    }

    pub(crate) const fn root(&self) -> Option<Handle> {
        self.root
    }

    /// Number of live nodes in the arena; equals `len` on a healthy tree.
    pub(crate) fn live_nodes(&self) -> usize {
        self.nodes.live()
    }

    #[inline]
    pub(crate) fn node(&self, handle: Handle) -> &Node<K, V> {
        self.nodes.get(handle)
    }

    #[inline]
    fn node_mut(&mut self, handle: Handle) -> &mut Node<K, V> {
        self.nodes.get_mut(handle)
    }

    /// Returns the key and value stored at `handle`.
    #[inline]
    pub(crate) fn entry(&self, handle: Handle) -> (&K, &V) {
        let node = self.node(handle);
        (&node.key, &node.value)
    }

    pub(crate) fn value_mut(&mut self, handle: Handle) -> &mut V {
        &mut self.node_mut(handle).value
    }

    /// Removes every node.
    pub(crate) fn clear(&mut self) {
        self.nodes.clear();
        self.root = None;
        self.bump_version();
    }

    fn bump_version(&mut self) {
        self.version = self.version.wrapping_add(1);
    }

    // ─── Link helpers ───────────────────────────────────────────────────────

    /// A missing link is black.
    #[inline]
    pub(crate) fn is_red(&self, link: Option<Handle>) -> bool {
        link.is_some_and(|handle| self.node(handle).is_red())
    }

    #[inline]
    pub(crate) fn size_of(&self, link: Option<Handle>) -> usize {
        link.map_or(0, |handle| self.node(handle).size())
    }

    #[inline]
    fn left_of(&self, link: Option<Handle>) -> Option<Handle> {
        link.and_then(|handle| self.node(handle).left)
    }

    #[inline]
    fn left(&self, handle: Handle) -> Option<Handle> {
        self.node(handle).left
    }

    #[inline]
    fn right(&self, handle: Handle) -> Option<Handle> {
        self.node(handle).right
    }

    fn update_size(&mut self, handle: Handle) {
        let node = self.node(handle);
        let size = Size::of_parent(self.size_of(node.left), self.size_of(node.right));
        self.node_mut(handle).size = size;
    }

    // ─── Rotations and color flips ──────────────────────────────────────────

    /// Turns the red right link of `h` into a left link. Returns the new
    /// subtree root.
    fn rotate_left(&mut self, h: Handle) -> Handle {
        let x = self.right(h).expect("`rotate_left()` - node has no right child!");
        let x_left = self.left(x);
        let (color, size) = {
            let node = self.node(h);
            (node.color, node.size)
        };

        let node = self.node_mut(h);
        node.right = x_left;
        node.color = Color::Red;

        let top = self.node_mut(x);
        top.left = Some(h);
        top.color = color;
        top.size = size;

        self.update_size(h);
        x
    }

    /// Turns the red left link of `h` into a right link. Returns the new
    /// subtree root.
    fn rotate_right(&mut self, h: Handle) -> Handle {
        let x = self.left(h).expect("`rotate_right()` - node has no left child!");
        let x_right = self.right(x);
        let (color, size) = {
            let node = self.node(h);
            (node.color, node.size)
        };

        let node = self.node_mut(h);
        node.left = x_right;
        node.color = Color::Red;

        let top = self.node_mut(x);
        top.right = Some(h);
        top.color = color;
        top.size = size;

        self.update_size(h);
        x
    }

    /// Flips the colors of `h` and both of its children.
    fn flip_colors(&mut self, h: Handle) {
        let (left, right) = (self.left(h), self.right(h));
        for handle in [Some(h), left, right].into_iter().flatten() {
            let node = self.node_mut(handle);
            node.color = node.color.flipped();
        }
    }

    /// Restores the left-leaning invariants at `h` after one of its subtrees
    /// changed, and recomputes its size.
    fn balance(&mut self, mut h: Handle) -> Handle {
        if self.is_red(self.right(h)) && !self.is_red(self.left(h)) {
            h = self.rotate_left(h);
        }
        if self.is_red(self.left(h)) && self.is_red(self.left_of(self.left(h))) {
            h = self.rotate_right(h);
        }
        if self.is_red(self.left(h)) && self.is_red(self.right(h)) {
            self.flip_colors(h);
        }
        self.update_size(h);
        h
    }

    /// Assuming `h` is red and both `h.left` and `h.left.left` are black,
    /// makes `h.left` or one of its children red.
    fn move_red_left(&mut self, mut h: Handle) -> Handle {
        self.flip_colors(h);
        let right = self.right(h);
        if self.is_red(self.left_of(right)) {
            let right = right.expect("`move_red_left()` - node has no right child!");
            let right = self.rotate_right(right);
            self.node_mut(h).right = Some(right);
            h = self.rotate_left(h);
            self.flip_colors(h);
        }
        h
    }

    /// Assuming `h` is red and both `h.right` and `h.right.left` are black,
    /// makes `h.right` or one of its children red.
    fn move_red_right(&mut self, mut h: Handle) -> Handle {
        self.flip_colors(h);
        if self.is_red(self.left_of(self.left(h))) {
            h = self.rotate_right(h);
            self.flip_colors(h);
        }
        h
    }

    // ─── Deletion plumbing ──────────────────────────────────────────────────

    /// Before a deletion descends, a root with two black children is made
    /// red so the first move-red step has a red link to push down.
    fn prepare_root_for_delete(&mut self, root: Handle) {
        if !self.is_red(self.left(root)) && !self.is_red(self.right(root)) {
            tracing::trace!("reddening root before delete");
            self.node_mut(root).color = Color::Red;
        }
    }

    fn finish_delete(&mut self, root: Option<Handle>) {
        self.root = root;
        if let Some(root) = root {
            self.node_mut(root).color = Color::Black;
        }
        self.bump_version();
    }

    /// Deletes the minimum of the subtree at `h`. Returns the new subtree root
    /// and the detached node.
    fn delete_min(&mut self, mut h: Handle) -> (Option<Handle>, Node<K, V>) {
        let Some(left) = self.left(h) else {
            let node = self.nodes.take(h);
            return (node.right, node);
        };

        if !self.is_red(Some(left)) && !self.is_red(self.left(left)) {
            h = self.move_red_left(h);
        }

        let left = self.left(h).expect("`delete_min()` - left child vanished!");
        let (left, removed) = self.delete_min(left);
        self.node_mut(h).left = left;
        (Some(self.balance(h)), removed)
    }

    /// Deletes the maximum of the subtree at `h`. Returns the new subtree root
    /// and the detached node.
    fn delete_max(&mut self, mut h: Handle) -> (Option<Handle>, Node<K, V>) {
        if self.is_red(self.left(h)) {
            h = self.rotate_right(h);
        }

        let Some(right) = self.right(h) else {
            let node = self.nodes.take(h);
            return (node.left, node);
        };

        if !self.is_red(Some(right)) && !self.is_red(self.left(right)) {
            h = self.move_red_right(h);
        }

        let right = self.right(h).expect("`delete_max()` - right child vanished!");
        let (right, removed) = self.delete_max(right);
        self.node_mut(h).right = right;
        (Some(self.balance(h)), removed)
    }

    /// Removes and returns the smallest entry.
    pub(crate) fn remove_min(&mut self) -> Option<(K, V)> {
        let root = self.root?;
        self.prepare_root_for_delete(root);
        let (root, removed) = self.delete_min(root);
        self.finish_delete(root);
        Some(removed.into_entry())
    }

    /// Removes and returns the largest entry.
    pub(crate) fn remove_max(&mut self) -> Option<(K, V)> {
        let root = self.root?;
        self.prepare_root_for_delete(root);
        let (root, removed) = self.delete_max(root);
        self.finish_delete(root);
        Some(removed.into_entry())
    }

    // ─── Positional queries ─────────────────────────────────────────────────

    /// Returns the leftmost node.
    pub(crate) fn first(&self) -> Option<Handle> {
        let mut current = self.root?;
        while let Some(left) = self.left(current) {
            current = left;
        }
        Some(current)
    }

    /// Returns the rightmost node.
    pub(crate) fn last(&self) -> Option<Handle> {
        let mut current = self.root?;
        while let Some(right) = self.right(current) {
            current = right;
        }
        Some(current)
    }

    /// Returns the node at zero-based position `rank` in key order.
    pub(crate) fn select(&self, rank: usize) -> Option<Handle> {
        let mut current = self.root;
        let mut remaining = rank;

        while let Some(handle) = current {
            let node = self.node(handle);
            let left_size = self.size_of(node.left);
            match remaining.cmp(&left_size) {
                Ordering::Less => current = node.left,
                Ordering::Equal => return Some(handle),
                Ordering::Greater => {
                    remaining -= left_size + 1;
                    current = node.right;
                }
            }
        }

        None
    }

    /// Number of nodes on the longest root-to-leaf path.
    pub(crate) fn height(&self) -> usize {
        self.height_of(self.root)
    }

    fn height_of(&self, link: Option<Handle>) -> usize {
        link.map_or(0, |handle| {
            let node = self.node(handle);
            1 + self.height_of(node.left).max(self.height_of(node.right))
        })
    }
}

impl<K, V> RawRBTreeMap<K, V> {
    /// Finds the node whose key compares equal to `key`.
    pub(crate) fn search<C: Comparator<K>>(&self, cmp: &C, key: &K) -> Option<Handle> {
        let mut current = self.root;
        while let Some(handle) = current {
            let node = self.node(handle);
            match cmp.compare(key, &node.key) {
                Ordering::Less => current = node.left,
                Ordering::Greater => current = node.right,
                Ordering::Equal => return Some(handle),
            }
        }
        None
    }

    /// Inserts `key`/`value`. An equal key has its item replaced; the previous
    /// value is returned.
    pub(crate) fn insert<C: Comparator<K>>(&mut self, cmp: &C, key: K, value: V) -> Option<V> {
        let mut replaced = None;
        let root = self.put(cmp, self.root, key, value, &mut replaced);
        self.node_mut(root).color = Color::Black;
        self.root = Some(root);
        self.bump_version();
        replaced
    }

    fn put<C: Comparator<K>>(
        &mut self,
        cmp: &C,
        link: Option<Handle>,
        key: K,
        value: V,
        replaced: &mut Option<V>,
    ) -> Handle {
        let Some(h) = link else {
            return self.nodes.alloc(Node::new(key, value));
        };

        match cmp.compare(&key, &self.node(h).key) {
            Ordering::Less => {
                let left = self.put(cmp, self.left(h), key, value, replaced);
                self.node_mut(h).left = Some(left);
            }
            Ordering::Greater => {
                let right = self.put(cmp, self.right(h), key, value, replaced);
                self.node_mut(h).right = Some(right);
            }
            Ordering::Equal => {
                tracing::trace!("replacing item of equal key");
                let (_, previous) = self.node_mut(h).replace(key, value);
                *replaced = Some(previous);
            }
        }

        self.balance(h)
    }

    /// Removes the entry whose key compares equal to `key`, or returns `None`
    /// if there is none.
    pub(crate) fn remove<C: Comparator<K>>(&mut self, cmp: &C, key: &K) -> Option<(K, V)> {
        let root = self.root?;
        self.search(cmp, key)?;

        self.prepare_root_for_delete(root);
        let (root, removed) = self.delete(cmp, root, key);
        self.finish_delete(root);
        Some(removed)
    }

    /// Deletes `key` from the subtree at `h`. The key must be present there.
    fn delete<C: Comparator<K>>(&mut self, cmp: &C, mut h: Handle, key: &K) -> (Option<Handle>, (K, V)) {
        if cmp.less(key, &self.node(h).key) {
            let left = self.left(h).expect("`delete()` - key is not in the subtree!");
            if !self.is_red(Some(left)) && !self.is_red(self.left(left)) {
                h = self.move_red_left(h);
            }

            let left = self.left(h).expect("`delete()` - left child vanished!");
            let (left, removed) = self.delete(cmp, left, key);
            self.node_mut(h).left = left;
            return (Some(self.balance(h)), removed);
        }

        if self.is_red(self.left(h)) {
            h = self.rotate_right(h);
        }

        if cmp.equal(key, &self.node(h).key) && self.right(h).is_none() {
            // A node without a right child is a leaf here: a lone black left
            // child would break black balance.
            let node = self.nodes.take(h);
            return (node.left, node.into_entry());
        }

        let right = self.right(h).expect("`delete()` - key is not in the subtree!");
        if !self.is_red(Some(right)) && !self.is_red(self.left(right)) {
            h = self.move_red_right(h);
        }

        let right = self.right(h).expect("`delete()` - right child vanished!");
        let removed = if cmp.equal(key, &self.node(h).key) {
            // Two children: take over the successor's item, then delete the
            // successor from the right subtree.
            let (right, successor) = self.delete_min(right);
            let (key, value) = successor.into_entry();
            let node = self.node_mut(h);
            node.right = right;
            node.replace(key, value)
        } else {
            let (right, removed) = self.delete(cmp, right, key);
            self.node_mut(h).right = right;
            removed
        };

        (Some(self.balance(h)), removed)
    }

    /// Counts the keys strictly less than `key`.
    pub(crate) fn rank_of<C: Comparator<K>>(&self, cmp: &C, key: &K) -> usize {
        let mut current = self.root;
        let mut rank = 0;

        while let Some(handle) = current {
            let node = self.node(handle);
            match cmp.compare(key, &node.key) {
                Ordering::Less => current = node.left,
                Ordering::Greater => {
                    rank += 1 + self.size_of(node.left);
                    current = node.right;
                }
                Ordering::Equal => return rank + self.size_of(node.left),
            }
        }

        rank
    }

    /// Finds the node with the largest key `<= key`.
    pub(crate) fn floor<C: Comparator<K>>(&self, cmp: &C, key: &K) -> Option<Handle> {
        let mut current = self.root;
        let mut best = None;

        while let Some(handle) = current {
            let node = self.node(handle);
            match cmp.compare(key, &node.key) {
                Ordering::Less => current = node.left,
                Ordering::Equal => return Some(handle),
                Ordering::Greater => {
                    best = Some(handle);
                    current = node.right;
                }
            }
        }

        best
    }

    /// Finds the node with the smallest key `>= key`.
    pub(crate) fn ceiling<C: Comparator<K>>(&self, cmp: &C, key: &K) -> Option<Handle> {
        let mut current = self.root;
        let mut best = None;

        while let Some(handle) = current {
            let node = self.node(handle);
            match cmp.compare(key, &node.key) {
                Ordering::Greater => current = node.right,
                Ordering::Equal => return Some(handle),
                Ordering::Less => {
                    best = Some(handle);
                    current = node.left;
                }
            }
        }

        best
    }
}
