use super::handle::Handle;
use super::size::Size;

/// Color of the link from a node's parent to the node.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Color {
    Red,
    Black,
}

impl Color {
    #[inline]
    pub(crate) const fn flipped(self) -> Self {
        match self {
            Color::Red => Color::Black,
            Color::Black => Color::Red,
        }
    }
}

// One entry of the tree. Children are handles into the owning arena; a node is
// reachable from exactly one parent link (or the root).
#[derive(Clone)]
pub(crate) struct Node<K, V> {
    pub(crate) key: K,
    pub(crate) value: V,
    pub(crate) left: Option<Handle>,
    pub(crate) right: Option<Handle>,
    // Number of nodes in the subtree rooted here, including this one.
    pub(crate) size: Size,
    pub(crate) color: Color,
}

impl<K, V> Node<K, V> {
    /// Creates a detached red node of size one.
    pub(crate) const fn new(key: K, value: V) -> Self {
        Self {
            key,
            value,
            left: None,
            right: None,
            size: Size::ONE,
            color: Color::Red,
        }
    }

    #[inline]
    pub(crate) fn is_red(&self) -> bool {
        self.color == Color::Red
    }

    #[inline]
    pub(crate) const fn size(&self) -> usize {
        self.size.to_usize()
    }

    /// Replaces the stored item, returning the previous one.
    pub(crate) fn replace(&mut self, key: K, value: V) -> (K, V) {
        (core::mem::replace(&mut self.key, key), core::mem::replace(&mut self.value, value))
    }

    pub(crate) fn into_entry(self) -> (K, V) {
        (self.key, self.value)
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn new_node_is_red_leaf() {
        let node = Node::new(1, "one");
        assert!(node.is_red());
        assert_eq!(node.size(), 1);
        assert!(node.left.is_none() && node.right.is_none());
    }

    #[test]
    fn flipping_twice_is_identity() {
        assert_eq!(Color::Red.flipped(), Color::Black);
        assert_eq!(Color::Black.flipped().flipped(), Color::Black);
    }

    #[test]
    fn replace_returns_previous_item() {
        let mut node = Node::new(1, "one");
        assert_eq!(node.replace(1, "uno"), (1, "one"));
        assert_eq!(node.into_entry(), (1, "uno"));
    }
}
