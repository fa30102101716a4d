use core::fmt;
use core::hash::{Hash, Hasher};
use core::iter::FusedIterator;
use core::ops::Index;

use crate::comparator::{Comparator, NaturalOrder};
use crate::error::{Error, Result};
use crate::raw::{RawRBTreeMap, Walk};

mod capacity;
mod order_statistic;
mod traverse;

pub use crate::Rank;
pub use traverse::{Order, Traversal};

/// An ordered map based on a left-leaning red-black tree.
///
/// Keys are ordered by a [`Comparator`] chosen at construction; [`RBTreeMap::new`]
/// uses the key's [`Ord`] implementation. Keys are unique under that order:
/// inserting a key that compares equal to a stored one replaces the stored
/// key and value.
///
/// Every node records the size of its subtree, so besides the usual map
/// operations the tree answers order-statistic queries ([`rank_of`],
/// [`get_by_rank`], [`range`]) in O(log n).
///
/// It is a logic error for a key to be modified in such a way that its
/// ordering relative to any other key changes while it is in the map, or for
/// the comparator to be inconsistent. The resulting behavior is unspecified
/// (wrong answers, panics) but never undefined behavior.
///
/// [`rank_of`]: RBTreeMap::rank_of
/// [`get_by_rank`]: RBTreeMap::get_by_rank
/// [`range`]: RBTreeMap::range
///
/// # Examples
///
/// ```
/// use beni_tree::RBTreeMap;
///
/// let mut movie_reviews = RBTreeMap::new();
///
/// movie_reviews.insert("Office Space", "Deals with real issues in the workplace.");
/// movie_reviews.insert("Pulp Fiction", "Masterpiece.");
/// movie_reviews.insert("The Godfather", "Very enjoyable.");
/// movie_reviews.insert("The Blues Brothers", "Eye lyked it a lot.");
///
/// if !movie_reviews.contains_key(&"Les Miserables") {
///     println!("We've got {} reviews, but Les Miserables ain't one.", movie_reviews.len());
/// }
///
/// // Removing a key that is not there is an error, not a silent no-op.
/// assert!(movie_reviews.remove(&"Les Miserables").is_err());
/// movie_reviews.remove(&"The Blues Brothers").unwrap();
///
/// for (movie, review) in &movie_reviews {
///     println!("{movie}: \"{review}\"");
/// }
///
/// assert_eq!(movie_reviews.rank_of(&"Pulp Fiction"), 1);
/// ```
///
/// # Background
///
/// A left-leaning red-black tree is a binary encoding of a 2-3 tree: a red
/// link glues a node to its parent to form a 3-node, and red links may only
/// lean left. Every root-to-null path crosses the same number of black links,
/// which bounds the height by `2 log2(n + 1)`. Insertion repairs the shape on
/// the way back up with at most two rotations and a color flip per level;
/// deletion pushes a red link down ahead of the search so that the node
/// finally removed is never a lone 2-node.
pub struct RBTreeMap<K, V, C = NaturalOrder> {
    raw: RawRBTreeMap<K, V>,
    comparator: C,
}

/// An iterator over the entries of an `RBTreeMap` in one of the traversal
/// [`Order`]s.
///
/// This `struct` is created by [`RBTreeMap::iter`] and the traversal methods
/// such as [`RBTreeMap::pre_order`]. Holding it borrows the map, so the map
/// cannot change underneath it.
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Iter<'a, K, V> {
    tree: &'a RawRBTreeMap<K, V>,
    walk: Walk,
}

/// An iterator over the keys of an `RBTreeMap`, in ascending order.
///
/// ```
/// use beni_tree::RBTreeMap;
///
/// let map = RBTreeMap::from([(2, "b"), (1, "a")]);
/// let keys: Vec<_> = map.keys().copied().collect();
/// assert_eq!(keys, [1, 2]);
/// ```
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Keys<'a, K, V> {
    inner: Iter<'a, K, V>,
}

/// An iterator over the values of an `RBTreeMap`, in ascending key order.
///
/// ```
/// use beni_tree::RBTreeMap;
///
/// let map = RBTreeMap::from([(1, "a"), (2, "b")]);
/// let values: Vec<_> = map.values().copied().collect();
/// assert_eq!(values, ["a", "b"]);
/// ```
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Values<'a, K, V> {
    inner: Iter<'a, K, V>,
}

/// An iterator over a sub-range of the entries of an `RBTreeMap`.
///
/// This `struct` is created by [`RBTreeMap::range`].
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Range<'a, K, V> {
    inner: Iter<'a, K, V>,
}

impl<K, V> RBTreeMap<K, V> {
    /// Makes a new, empty `RBTreeMap` ordered by `K`'s [`Ord`] implementation.
    ///
    /// Does not allocate anything on its own.
    ///
    /// # Examples
    ///
    /// ```
    /// use beni_tree::RBTreeMap;
    ///
    /// let mut map = RBTreeMap::new();
    /// map.insert(1, "a");
    /// ```
    #[must_use]
    pub const fn new() -> Self {
        Self::with_comparator(NaturalOrder)
    }
}

impl<K, V, C> RBTreeMap<K, V, C> {
    /// Makes a new, empty `RBTreeMap` ordered by `comparator`.
    ///
    /// # Examples
    ///
    /// ```
    /// use beni_tree::RBTreeMap;
    ///
    /// let mut map = RBTreeMap::with_comparator(|a: &i32, b: &i32| b.cmp(a));
    /// map.insert(1, "a");
    /// map.insert(2, "b");
    /// assert_eq!(map.min().unwrap(), (&2, &"b"));
    /// ```
    #[must_use]
    pub const fn with_comparator(comparator: C) -> Self {
        RBTreeMap {
            raw: RawRBTreeMap::new(),
            comparator,
        }
    }

    /// Returns the comparator ordering this map.
    pub const fn comparator(&self) -> &C {
        &self.comparator
    }

    /// Returns the number of elements in the map.
    ///
    /// # Complexity
    ///
    /// O(1)
    ///
    /// # Examples
    ///
    /// ```
    /// use beni_tree::RBTreeMap;
    ///
    /// let mut a = RBTreeMap::new();
    /// assert_eq!(a.len(), 0);
    /// a.insert(1, "a");
    /// assert_eq!(a.len(), 1);
    /// ```
    #[must_use]
    pub fn len(&self) -> usize {
        self.raw.len()
    }

    /// Returns `true` if the map contains no elements.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// Number of nodes on the longest root-to-leaf path; zero when empty.
    ///
    /// Never more than `2 * log2(len + 1)`.
    ///
    /// ```
    /// use beni_tree::RBTreeMap;
    ///
    /// let map: RBTreeMap<_, _> = (0..1000).map(|k| (k, ())).collect();
    /// assert!(map.height() <= 20);
    /// ```
    #[must_use]
    pub fn height(&self) -> usize {
        self.raw.height()
    }

    /// Clears the map, removing all elements.
    ///
    /// Counts as a mutation: detached [`Traversal`]s started before the call
    /// fail on their next pull.
    pub fn clear(&mut self) {
        self.raw.clear();
    }

    /// Gets an iterator over the entries of the map, sorted by key.
    ///
    /// # Examples
    ///
    /// ```
    /// use beni_tree::RBTreeMap;
    ///
    /// let map = RBTreeMap::from([(3, "c"), (2, "b"), (1, "a")]);
    /// let (first_key, first_value) = map.iter().next().unwrap();
    /// assert_eq!((*first_key, *first_value), (1, "a"));
    /// ```
    pub fn iter(&self) -> Iter<'_, K, V> {
        self.in_order()
    }

    /// Gets an iterator over the keys of the map, in sorted order.
    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys { inner: self.iter() }
    }

    /// Gets an iterator over the values of the map, in order by key.
    pub fn values(&self) -> Values<'_, K, V> {
        Values { inner: self.iter() }
    }
}

impl<K, V, C: Comparator<K>> RBTreeMap<K, V, C> {
    /// Builds a map from `iter` ordered by `comparator`. Later duplicates
    /// replace earlier ones.
    pub fn from_iter_with<I: IntoIterator<Item = (K, V)>>(iter: I, comparator: C) -> Self {
        let mut map = Self::with_comparator(comparator);
        map.extend(iter);
        map
    }

    /// Inserts a key-value pair into the map.
    ///
    /// If the map did not have an equal key, `None` is returned. Otherwise the
    /// stored key and value are both replaced and the old value is returned.
    ///
    /// # Complexity
    ///
    /// O(log n)
    ///
    /// # Examples
    ///
    /// ```
    /// use beni_tree::RBTreeMap;
    ///
    /// let mut map = RBTreeMap::new();
    /// assert_eq!(map.insert(37, "a"), None);
    /// assert_eq!(map.is_empty(), false);
    ///
    /// map.insert(37, "b");
    /// assert_eq!(map.insert(37, "c"), Some("b"));
    /// assert_eq!(map[&37], "c");
    /// ```
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        let replaced = self.raw.insert(&self.comparator, key, value);
        self.after_mutation();
        replaced
    }

    /// Removes a key from the map, returning its value.
    ///
    /// # Errors
    ///
    /// [`Error::EmptyContainer`] if the map is empty, [`Error::AbsentKey`] if
    /// no stored key compares equal to `key`.
    ///
    /// # Examples
    ///
    /// ```
    /// use beni_tree::{Error, RBTreeMap};
    ///
    /// let mut map = RBTreeMap::new();
    /// map.insert(1, "a");
    /// assert_eq!(map.remove(&1), Ok("a"));
    /// assert_eq!(map.remove(&1), Err(Error::EmptyContainer { operation: "remove" }));
    /// ```
    pub fn remove(&mut self, key: &K) -> Result<V> {
        self.remove_entry(key).map(|(_, value)| value)
    }

    /// Removes a key from the map, returning the stored key and value.
    ///
    /// # Errors
    ///
    /// As for [`remove`](RBTreeMap::remove).
    pub fn remove_entry(&mut self, key: &K) -> Result<(K, V)> {
        if self.is_empty() {
            return Err(Error::empty("remove"));
        }

        let removed = self.raw.remove(&self.comparator, key).ok_or_else(|| Error::absent("remove"))?;
        self.after_mutation();
        Ok(removed)
    }

    /// Removes and returns the entry with the smallest key.
    ///
    /// # Errors
    ///
    /// [`Error::EmptyContainer`] if the map is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use beni_tree::RBTreeMap;
    ///
    /// let mut map = RBTreeMap::from([(2, "b"), (1, "a")]);
    /// assert_eq!(map.remove_min(), Ok((1, "a")));
    /// assert_eq!(map.remove_min(), Ok((2, "b")));
    /// assert!(map.remove_min().is_err());
    /// ```
    pub fn remove_min(&mut self) -> Result<(K, V)> {
        let removed = self.raw.remove_min().ok_or_else(|| Error::empty("remove_min"))?;
        self.after_mutation();
        Ok(removed)
    }

    /// Removes and returns the entry with the largest key.
    ///
    /// # Errors
    ///
    /// [`Error::EmptyContainer`] if the map is empty.
    pub fn remove_max(&mut self) -> Result<(K, V)> {
        let removed = self.raw.remove_max().ok_or_else(|| Error::empty("remove_max"))?;
        self.after_mutation();
        Ok(removed)
    }

    /// Returns a reference to the value corresponding to the key.
    ///
    /// # Examples
    ///
    /// ```
    /// use beni_tree::RBTreeMap;
    ///
    /// let mut map = RBTreeMap::new();
    /// map.insert(1, "a");
    /// assert_eq!(map.get(&1), Some(&"a"));
    /// assert_eq!(map.get(&2), None);
    /// ```
    pub fn get(&self, key: &K) -> Option<&V> {
        self.get_key_value(key).map(|(_, value)| value)
    }

    /// Returns the stored key and value for a key that compares equal to `key`.
    pub fn get_key_value(&self, key: &K) -> Option<(&K, &V)> {
        let handle = self.raw.search(&self.comparator, key)?;
        Some(self.raw.entry(handle))
    }

    /// Returns a mutable reference to the value corresponding to the key.
    ///
    /// Changing a value is not a structural mutation and does not invalidate
    /// detached traversals.
    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        let handle = self.raw.search(&self.comparator, key)?;
        Some(self.raw.value_mut(handle))
    }

    /// Returns the value for `key`, reporting a missing key as an error.
    ///
    /// # Errors
    ///
    /// [`Error::KeyNotFound`] if no stored key compares equal to `key`.
    pub fn find(&self, key: &K) -> Result<&V> {
        self.get(key).ok_or_else(|| Error::not_found("find"))
    }

    /// Returns `true` if the map contains a value for the specified key.
    pub fn contains_key(&self, key: &K) -> bool {
        self.raw.search(&self.comparator, key).is_some()
    }

    /// Checks the red-black invariants: ascending keys, exact subtree sizes,
    /// no right-leaning or consecutive red links, equal black height on every
    /// path, and a black root.
    ///
    /// A correct map always passes; this exists for tests and for the
    /// `verify` feature, which calls it after every mutation.
    ///
    /// # Complexity
    ///
    /// O(n)
    ///
    /// # Errors
    ///
    /// [`Error::InvariantViolation`] naming the first broken invariant.
    pub fn validate(&self) -> Result<()> {
        self.raw.validate(&self.comparator).map_err(|violation| {
            tracing::debug!(%violation, "tree failed validation");
            Error::from(violation)
        })
    }

    #[inline]
    #[cfg_attr(not(feature = "verify"), allow(clippy::unused_self))]
    fn after_mutation(&self) {
        #[cfg(feature = "verify")]
        if let Err(error) = self.validate() {
            panic!("{error}");
        }
    }
}

impl<K: Clone, V: Clone, C: Clone> Clone for RBTreeMap<K, V, C> {
    fn clone(&self) -> Self {
        RBTreeMap {
            raw: self.raw.clone(),
            comparator: self.comparator.clone(),
        }
    }
}

impl<K: Hash, V: Hash, C> Hash for RBTreeMap<K, V, C> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.len().hash(state);
        for (k, v) in self {
            k.hash(state);
            v.hash(state);
        }
    }
}

impl<K: PartialEq, V: PartialEq, C> PartialEq for RBTreeMap<K, V, C> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().zip(other.iter()).all(|(a, b)| a == b)
    }
}

impl<K: Eq, V: Eq, C> Eq for RBTreeMap<K, V, C> {}

impl<K: fmt::Debug, V: fmt::Debug, C> fmt::Debug for RBTreeMap<K, V, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K, V, C: Default> Default for RBTreeMap<K, V, C> {
    fn default() -> Self {
        RBTreeMap::with_comparator(C::default())
    }
}

impl<K, V, C: Comparator<K> + Default> FromIterator<(K, V)> for RBTreeMap<K, V, C> {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        RBTreeMap::from_iter_with(iter, C::default())
    }
}

impl<K, V, C: Comparator<K>> Extend<(K, V)> for RBTreeMap<K, V, C> {
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (k, v) in iter {
            self.insert(k, v);
        }
    }
}

impl<'a, K: Copy, V: Copy, C: Comparator<K>> Extend<(&'a K, &'a V)> for RBTreeMap<K, V, C> {
    fn extend<T: IntoIterator<Item = (&'a K, &'a V)>>(&mut self, iter: T) {
        for (&k, &v) in iter {
            self.insert(k, v);
        }
    }
}

impl<'a, K, V, C> IntoIterator for &'a RBTreeMap<K, V, C> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Iter<'a, K, V> {
        self.iter()
    }
}

impl<K, V, C: Comparator<K>> Index<&K> for RBTreeMap<K, V, C> {
    type Output = V;

    /// Returns a reference to the value corresponding to the supplied key.
    ///
    /// # Panics
    ///
    /// Panics if the key is not present in the map.
    fn index(&self, key: &K) -> &V {
        self.get(key).expect("no entry found for key")
    }
}

impl<K: Ord, V, const N: usize> From<[(K, V); N]> for RBTreeMap<K, V> {
    fn from(arr: [(K, V); N]) -> Self {
        arr.into_iter().collect()
    }
}

// ─── Iterators ──────────────────────────────────────────────────────────────

impl<'a, K, V> Iter<'a, K, V> {
    fn new(tree: &'a RawRBTreeMap<K, V>, walk: Walk) -> Self {
        Iter { tree, walk }
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let tree = self.tree;
        let handle = self.walk.next(tree)?;
        Some(tree.entry(handle))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.walk.remaining();
        (remaining, Some(remaining))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

impl<K, V> FusedIterator for Iter<'_, K, V> {}

impl<K, V> Clone for Iter<'_, K, V> {
    fn clone(&self) -> Self {
        Iter {
            tree: self.tree,
            walk: self.walk.clone(),
        }
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for Iter<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

impl<'a, K, V> Iterator for Keys<'a, K, V> {
    type Item = &'a K;

    fn next(&mut self) -> Option<&'a K> {
        self.inner.next().map(|(k, _)| k)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Keys<'_, K, V> {}

impl<K, V> FusedIterator for Keys<'_, K, V> {}

impl<K, V> Clone for Keys<'_, K, V> {
    fn clone(&self) -> Self {
        Keys {
            inner: self.inner.clone(),
        }
    }
}

impl<K: fmt::Debug, V> fmt::Debug for Keys<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

impl<'a, K, V> Iterator for Values<'a, K, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<&'a V> {
        self.inner.next().map(|(_, v)| v)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Values<'_, K, V> {}

impl<K, V> FusedIterator for Values<'_, K, V> {}

impl<K, V> Clone for Values<'_, K, V> {
    fn clone(&self) -> Self {
        Values {
            inner: self.inner.clone(),
        }
    }
}

impl<K, V: fmt::Debug> fmt::Debug for Values<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

impl<'a, K, V> Iterator for Range<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Range<'_, K, V> {}

impl<K, V> FusedIterator for Range<'_, K, V> {}

impl<K, V> Clone for Range<'_, K, V> {
    fn clone(&self) -> Self {
        Range {
            inner: self.inner.clone(),
        }
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for Range<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.inner, f)
    }
}
