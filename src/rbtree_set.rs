use core::fmt;
use core::hash::{Hash, Hasher};
use core::iter::FusedIterator;

use crate::comparator::{Comparator, NaturalOrder};
use crate::error::Result;
use crate::rbtree_map::{self, Order, RBTreeMap};

mod order_statistic;

pub use crate::Rank;

/// An ordered set based on a left-leaning red-black tree.
///
/// A thin wrapper over [`RBTreeMap<T, ()>`](RBTreeMap); see its documentation
/// for the ordering rules and complexity of each operation.
///
/// # Examples
///
/// ```
/// use beni_tree::RBTreeSet;
///
/// let mut books = RBTreeSet::new();
///
/// books.insert("A Dance With Dragons");
/// books.insert("To Kill a Mockingbird");
/// books.insert("The Odyssey");
/// books.insert("The Great Gatsby");
///
/// if !books.contains(&"The Winds of Winter") {
///     println!("We have {} books, but The Winds of Winter ain't one.", books.len());
/// }
///
/// books.remove(&"The Odyssey").unwrap();
///
/// for book in &books {
///     println!("{book}");
/// }
///
/// assert_eq!(books.get_by_rank(0), Ok(&"A Dance With Dragons"));
/// ```
pub struct RBTreeSet<T, C = NaturalOrder> {
    map: RBTreeMap<T, (), C>,
}

/// An iterator over the items of an `RBTreeSet` in one of the traversal
/// [`Order`]s.
///
/// This `struct` is created by [`RBTreeSet::iter`] and the traversal methods.
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Iter<'a, T> {
    inner: rbtree_map::Iter<'a, T, ()>,
}

/// An iterator over a sub-range of the items of an `RBTreeSet`.
///
/// This `struct` is created by [`RBTreeSet::range`].
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Range<'a, T> {
    inner: rbtree_map::Range<'a, T, ()>,
}

/// A detached, version-checked traversal over an [`RBTreeSet`].
///
/// Created by [`RBTreeSet::traversal`]; see [`rbtree_map::Traversal`].
pub struct Traversal<T> {
    inner: rbtree_map::Traversal<T, ()>,
}

impl<T> RBTreeSet<T> {
    /// Makes a new, empty `RBTreeSet` ordered by `T`'s [`Ord`] implementation.
    #[must_use]
    pub const fn new() -> Self {
        Self::with_comparator(NaturalOrder)
    }

    /// Creates an empty set with room for at least `capacity` items.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        RBTreeSet {
            map: RBTreeMap::with_capacity(capacity),
        }
    }
}

impl<T, C> RBTreeSet<T, C> {
    /// Makes a new, empty `RBTreeSet` ordered by `comparator`.
    ///
    /// ```
    /// use beni_tree::{NaturalOrder, RBTreeSet, Reversed};
    ///
    /// let mut set = RBTreeSet::with_comparator(Reversed(NaturalOrder));
    /// set.extend([1, 3, 2]);
    /// assert_eq!(set.iter().copied().collect::<Vec<_>>(), [3, 2, 1]);
    /// ```
    #[must_use]
    pub const fn with_comparator(comparator: C) -> Self {
        RBTreeSet {
            map: RBTreeMap::with_comparator(comparator),
        }
    }

    /// Returns the comparator ordering this set.
    pub const fn comparator(&self) -> &C {
        self.map.comparator()
    }

    /// Returns the number of items in the set.
    #[must_use]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Returns `true` if the set contains no items.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Number of nodes on the longest root-to-leaf path.
    #[must_use]
    pub fn height(&self) -> usize {
        self.map.height()
    }

    /// Returns the number of items the set can hold without reallocating.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.map.capacity()
    }

    /// Clears the set, removing all items.
    pub fn clear(&mut self) {
        self.map.clear();
    }

    /// Gets an iterator that visits the items in ascending order.
    pub fn iter(&self) -> Iter<'_, T> {
        self.traverse(Order::InOrder)
    }

    /// Same as [`iter`](RBTreeSet::iter).
    pub fn in_order(&self) -> Iter<'_, T> {
        self.traverse(Order::InOrder)
    }

    /// Gets an iterator that visits each node before its subtrees.
    pub fn pre_order(&self) -> Iter<'_, T> {
        self.traverse(Order::PreOrder)
    }

    /// Gets an iterator that visits each node after its subtrees.
    pub fn post_order(&self) -> Iter<'_, T> {
        self.traverse(Order::PostOrder)
    }

    /// Gets an iterator that visits the tree level by level.
    pub fn level_order(&self) -> Iter<'_, T> {
        self.traverse(Order::LevelOrder)
    }

    /// Gets an iterator over the items in the given `order`.
    pub fn traverse(&self, order: Order) -> Iter<'_, T> {
        Iter {
            inner: self.map.traverse(order),
        }
    }

    /// Starts a traversal that does not borrow the set.
    ///
    /// ```
    /// use beni_tree::{Order, RBTreeSet};
    ///
    /// let mut set = RBTreeSet::from([2, 1, 3]);
    /// let mut cursor = set.traversal(Order::PreOrder);
    /// assert_eq!(cursor.next(&set), Ok(Some(&2)));
    ///
    /// set.remove(&3).unwrap();
    /// assert!(cursor.next(&set).is_err());
    /// ```
    pub fn traversal(&self, order: Order) -> Traversal<T> {
        Traversal {
            inner: self.map.traversal(order),
        }
    }
}

impl<T, C: Comparator<T>> RBTreeSet<T, C> {
    /// Builds a set from `iter` ordered by `comparator`.
    pub fn from_iter_with<I: IntoIterator<Item = T>>(iter: I, comparator: C) -> Self {
        let mut set = Self::with_comparator(comparator);
        set.extend(iter);
        set
    }

    /// Adds an item to the set.
    ///
    /// Returns whether the item was newly inserted. If an equal item was
    /// already present it is replaced by `value` and `false` is returned.
    ///
    /// ```
    /// use beni_tree::RBTreeSet;
    ///
    /// let mut set = RBTreeSet::new();
    /// assert!(set.insert(2));
    /// assert!(!set.insert(2));
    /// assert_eq!(set.len(), 1);
    /// ```
    pub fn insert(&mut self, value: T) -> bool {
        self.map.insert(value, ()).is_none()
    }

    /// Removes an item from the set and returns the stored item.
    ///
    /// # Errors
    ///
    /// [`Error::EmptyContainer`](crate::Error::EmptyContainer) if the set is
    /// empty, [`Error::AbsentKey`](crate::Error::AbsentKey) if no stored item
    /// compares equal to `value`.
    pub fn remove(&mut self, value: &T) -> Result<T> {
        self.map.remove_entry(value).map(|(item, ())| item)
    }

    /// Removes and returns the smallest item.
    ///
    /// # Errors
    ///
    /// [`Error::EmptyContainer`](crate::Error::EmptyContainer) if the set is empty.
    pub fn remove_min(&mut self) -> Result<T> {
        self.map.remove_min().map(|(item, ())| item)
    }

    /// Removes and returns the largest item.
    ///
    /// # Errors
    ///
    /// [`Error::EmptyContainer`](crate::Error::EmptyContainer) if the set is empty.
    pub fn remove_max(&mut self) -> Result<T> {
        self.map.remove_max().map(|(item, ())| item)
    }

    /// Returns `true` if the set contains an item equal to `value`.
    pub fn contains(&self, value: &T) -> bool {
        self.map.contains_key(value)
    }

    /// Returns the stored item equal to `value`, if any.
    pub fn get(&self, value: &T) -> Option<&T> {
        self.map.get_key_value(value).map(|(item, ())| item)
    }

    /// Checks the red-black invariants of the underlying tree.
    ///
    /// # Errors
    ///
    /// [`Error::InvariantViolation`](crate::Error::InvariantViolation) naming
    /// the first broken invariant.
    pub fn validate(&self) -> Result<()> {
        self.map.validate()
    }
}

impl<T> Traversal<T> {
    /// Yields the next item, or `Ok(None)` when done.
    ///
    /// # Errors
    ///
    /// [`Error::ConcurrentModification`](crate::Error::ConcurrentModification)
    /// if `set` was mutated since the traversal started.
    pub fn next<'a, C>(&mut self, set: &'a RBTreeSet<T, C>) -> Result<Option<&'a T>> {
        Ok(self.inner.next(&set.map)?.map(|(item, ())| item))
    }

    /// Starts over from the beginning of `set`.
    pub fn restart<C>(&mut self, set: &RBTreeSet<T, C>) {
        self.inner.restart(&set.map);
    }

    /// The order this traversal visits nodes in.
    #[must_use]
    pub const fn order(&self) -> Order {
        self.inner.order()
    }

    /// Number of items not yet yielded.
    #[must_use]
    pub const fn remaining(&self) -> usize {
        self.inner.remaining()
    }
}

impl<T> Clone for Traversal<T> {
    fn clone(&self) -> Self {
        Traversal {
            inner: self.inner.clone(),
        }
    }
}

impl<T> fmt::Debug for Traversal<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.inner, f)
    }
}

impl<T: Clone, C: Clone> Clone for RBTreeSet<T, C> {
    fn clone(&self) -> Self {
        RBTreeSet { map: self.map.clone() }
    }
}

impl<T: Hash, C> Hash for RBTreeSet<T, C> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.len().hash(state);
        for item in self {
            item.hash(state);
        }
    }
}

impl<T: PartialEq, C> PartialEq for RBTreeSet<T, C> {
    fn eq(&self, other: &Self) -> bool {
        self.map == other.map
    }
}

impl<T: Eq, C> Eq for RBTreeSet<T, C> {}

impl<T: fmt::Debug, C> fmt::Debug for RBTreeSet<T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<T, C: Default> Default for RBTreeSet<T, C> {
    fn default() -> Self {
        RBTreeSet::with_comparator(C::default())
    }
}

impl<T, C: Comparator<T> + Default> FromIterator<T> for RBTreeSet<T, C> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        RBTreeSet::from_iter_with(iter, C::default())
    }
}

impl<T, C: Comparator<T>> Extend<T> for RBTreeSet<T, C> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.insert(item);
        }
    }
}

impl<'a, T: 'a + Copy, C: Comparator<T>> Extend<&'a T> for RBTreeSet<T, C> {
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        self.extend(iter.into_iter().copied());
    }
}

impl<T: Ord, const N: usize> From<[T; N]> for RBTreeSet<T> {
    fn from(arr: [T; N]) -> Self {
        arr.into_iter().collect()
    }
}

impl<'a, T, C> IntoIterator for &'a RBTreeSet<T, C> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        self.inner.next().map(|(item, ())| item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> FusedIterator for Iter<'_, T> {}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Iter {
            inner: self.inner.clone(),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Iter<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

impl<'a, T> Iterator for Range<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        self.inner.next().map(|(item, ())| item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<T> ExactSizeIterator for Range<'_, T> {}

impl<T> FusedIterator for Range<'_, T> {}

impl<T> Clone for Range<'_, T> {
    fn clone(&self) -> Self {
        Range {
            inner: self.inner.clone(),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Range<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}
