use core::fmt;
use core::marker::PhantomData;

use super::{Iter, RBTreeMap};
use crate::error::{Error, Result};
use crate::raw::{RawRBTreeMap, Walk};

/// The order in which a traversal visits the nodes of the tree.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub enum Order {
    /// Left subtree, node, right subtree: ascending key order.
    #[default]
    InOrder,
    /// Node, left subtree, right subtree.
    PreOrder,
    /// Left subtree, right subtree, node.
    PostOrder,
    /// Breadth first, top to bottom and left to right within a level.
    LevelOrder,
}

impl Order {
    fn walk<K, V>(self, tree: &RawRBTreeMap<K, V>) -> Walk {
        match self {
            Order::InOrder => Walk::in_order(tree),
            Order::PreOrder => Walk::pre_order(tree),
            Order::PostOrder => Walk::post_order(tree),
            Order::LevelOrder => Walk::level_order(tree),
        }
    }
}

impl<K, V, C> RBTreeMap<K, V, C> {
    /// Gets an iterator over the entries in ascending key order.
    ///
    /// Same as [`iter`](RBTreeMap::iter).
    pub fn in_order(&self) -> Iter<'_, K, V> {
        self.traverse(Order::InOrder)
    }

    /// Gets an iterator that visits each node before its subtrees.
    ///
    /// Inserting the keys of a pre-order walk into an empty map rebuilds a map
    /// with the same entries.
    ///
    /// # Examples
    ///
    /// ```
    /// use beni_tree::RBTreeMap;
    ///
    /// let map: RBTreeMap<_, _> = [4, 2, 1, 3, 6, 5, 7].into_iter().map(|k| (k, ())).collect();
    /// let keys: Vec<_> = map.pre_order().map(|(k, _)| *k).collect();
    /// assert_eq!(keys, [4, 2, 1, 3, 6, 5, 7]);
    /// ```
    pub fn pre_order(&self) -> Iter<'_, K, V> {
        self.traverse(Order::PreOrder)
    }

    /// Gets an iterator that visits each node after both of its subtrees.
    ///
    /// ```
    /// use beni_tree::RBTreeMap;
    ///
    /// let map: RBTreeMap<_, _> = [4, 2, 1, 3, 6, 5, 7].into_iter().map(|k| (k, ())).collect();
    /// let keys: Vec<_> = map.post_order().map(|(k, _)| *k).collect();
    /// assert_eq!(keys, [1, 3, 2, 5, 7, 6, 4]);
    /// ```
    pub fn post_order(&self) -> Iter<'_, K, V> {
        self.traverse(Order::PostOrder)
    }

    /// Gets an iterator that visits the tree level by level from the root.
    ///
    /// ```
    /// use beni_tree::RBTreeMap;
    ///
    /// let map: RBTreeMap<_, _> = [4, 2, 1, 3, 6, 5, 7].into_iter().map(|k| (k, ())).collect();
    /// let keys: Vec<_> = map.level_order().map(|(k, _)| *k).collect();
    /// assert_eq!(keys, [4, 2, 6, 1, 3, 5, 7]);
    /// ```
    pub fn level_order(&self) -> Iter<'_, K, V> {
        self.traverse(Order::LevelOrder)
    }

    /// Gets an iterator over the entries in the given `order`.
    pub fn traverse(&self, order: Order) -> Iter<'_, K, V> {
        Iter::new(&self.raw, order.walk(&self.raw))
    }

    /// Starts a traversal that does not borrow the map.
    ///
    /// The returned cursor is handed the map on every step, so the map may be
    /// mutated while the cursor is alive. Any insertion or removal made after
    /// the cursor was started makes its next step fail with
    /// [`Error::ConcurrentModification`].
    ///
    /// # Examples
    ///
    /// ```
    /// use beni_tree::{Error, Order, RBTreeMap};
    ///
    /// let mut map = RBTreeMap::from([(1, 'a'), (2, 'b'), (3, 'c')]);
    /// let mut cursor = map.traversal(Order::InOrder);
    /// assert_eq!(cursor.next(&map), Ok(Some((&1, &'a'))));
    ///
    /// map.insert(4, 'd');
    /// assert!(matches!(cursor.next(&map), Err(Error::ConcurrentModification { .. })));
    /// ```
    pub fn traversal(&self, order: Order) -> Traversal<K, V> {
        Traversal {
            walk: order.walk(&self.raw),
            version: self.raw.version(),
            order,
            _marker: PhantomData,
        }
    }
}

/// A detached, version-checked traversal over an [`RBTreeMap`].
///
/// Created by [`RBTreeMap::traversal`]. Unlike [`Iter`] it holds no borrow,
/// only the positions still to visit and the map version it was started at.
/// Each call to [`next`](Traversal::next) compares that version with the
/// map's current one before touching any node.
///
/// Advancing a traversal with a map other than the one it was started on is
/// a logic error; it may yield wrong entries or panic.
pub struct Traversal<K, V> {
    walk: Walk,
    version: u64,
    order: Order,
    _marker: PhantomData<fn() -> (K, V)>,
}

impl<K, V> Traversal<K, V> {
    /// Yields the next entry, or `Ok(None)` once every entry has been visited.
    ///
    /// # Errors
    ///
    /// [`Error::ConcurrentModification`] if `map` was inserted into, removed
    /// from, or cleared since the traversal started. The traversal stays
    /// stale; call [`restart`](Traversal::restart) to begin again.
    pub fn next<'a, C>(&mut self, map: &'a RBTreeMap<K, V, C>) -> Result<Option<(&'a K, &'a V)>> {
        let found = map.raw.version();
        if found != self.version {
            return Err(Error::modified(self.version, found));
        }
        Ok(self.walk.next(&map.raw).map(|handle| map.raw.entry(handle)))
    }

    /// Starts over from the beginning of `map` in the same order, adopting its
    /// current version.
    pub fn restart<C>(&mut self, map: &RBTreeMap<K, V, C>) {
        tracing::trace!(order = ?self.order, "restarting traversal");
        self.walk = self.order.walk(&map.raw);
        self.version = map.raw.version();
    }

    /// The order this traversal visits nodes in.
    #[must_use]
    pub const fn order(&self) -> Order {
        self.order
    }

    /// Number of entries not yet yielded.
    #[must_use]
    pub const fn remaining(&self) -> usize {
        self.walk.remaining()
    }
}

impl<K, V> Clone for Traversal<K, V> {
    fn clone(&self) -> Self {
        Traversal {
            walk: self.walk.clone(),
            version: self.version,
            order: self.order,
            _marker: PhantomData,
        }
    }
}

impl<K, V> fmt::Debug for Traversal<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Traversal")
            .field("order", &self.order)
            .field("version", &self.version)
            .field("remaining", &self.remaining())
            .finish()
    }
}
