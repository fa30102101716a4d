use core::ops::{Bound, Index, RangeBounds};

use super::{Iter, RBTreeMap, Range};
use crate::Rank;
use crate::comparator::Comparator;
use crate::error::{Error, Result};
use crate::raw::Walk;

impl<K, V, C> RBTreeMap<K, V, C> {
    /// Returns the entry with the smallest key.
    ///
    /// # Errors
    ///
    /// [`Error::EmptyContainer`] if the map is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use beni_tree::{Error, RBTreeMap};
    ///
    /// let mut map = RBTreeMap::new();
    /// assert_eq!(map.min(), Err(Error::EmptyContainer { operation: "min" }));
    /// map.insert(2, "b");
    /// map.insert(1, "a");
    /// assert_eq!(map.min(), Ok((&1, &"a")));
    /// ```
    pub fn min(&self) -> Result<(&K, &V)> {
        let handle = self.raw.first().ok_or_else(|| Error::empty("min"))?;
        Ok(self.raw.entry(handle))
    }

    /// Returns the entry with the largest key.
    ///
    /// # Errors
    ///
    /// [`Error::EmptyContainer`] if the map is empty.
    pub fn max(&self) -> Result<(&K, &V)> {
        let handle = self.raw.last().ok_or_else(|| Error::empty("max"))?;
        Ok(self.raw.entry(handle))
    }

    /// Returns the key-value pair at position `rank` in sorted order.
    ///
    /// The rank is zero-based, so `get_by_rank(0)` is the minimum and
    /// `get_by_rank(len - 1)` the maximum.
    ///
    /// # Complexity
    ///
    /// O(log n)
    ///
    /// # Errors
    ///
    /// [`Error::RankOutOfBounds`] if `rank >= len`.
    ///
    /// # Examples
    ///
    /// ```
    /// use beni_tree::RBTreeMap;
    ///
    /// let mut map = RBTreeMap::new();
    /// map.insert("a", 10);
    /// map.insert("c", 30);
    /// map.insert("b", 20);
    ///
    /// assert_eq!(map.get_by_rank(1), Ok((&"b", &20)));
    /// assert!(map.get_by_rank(3).is_err());
    /// ```
    pub fn get_by_rank(&self, rank: usize) -> Result<(&K, &V)> {
        let handle = self.raw.select(rank).ok_or_else(|| Error::rank_out_of_bounds(rank, self.len()))?;
        Ok(self.raw.entry(handle))
    }
}

impl<K, V, C: Comparator<K>> RBTreeMap<K, V, C> {
    /// Returns the number of keys strictly less than `key`.
    ///
    /// `key` need not be in the map. For a stored key this is its zero-based
    /// position in sorted order.
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
    /// let map = RBTreeMap::from([(10, "a"), (20, "b"), (30, "c")]);
    /// assert_eq!(map.rank_of(&20), 1);
    /// assert_eq!(map.rank_of(&25), 2);
    /// assert_eq!(map.rank_of(&5), 0);
    /// ```
    pub fn rank_of(&self, key: &K) -> usize {
        self.raw.rank_of(&self.comparator, key)
    }

    /// Returns the entry with the largest key less than or equal to `key`.
    ///
    /// # Errors
    ///
    /// [`Error::EmptyContainer`] if the map is empty, [`Error::KeyNotFound`]
    /// if every key is greater than `key`.
    ///
    /// # Examples
    ///
    /// ```
    /// use beni_tree::{Error, RBTreeMap};
    ///
    /// let map = RBTreeMap::from([(10, "a"), (20, "b")]);
    /// assert_eq!(map.floor(&15), Ok((&10, &"a")));
    /// assert_eq!(map.floor(&20), Ok((&20, &"b")));
    /// assert_eq!(map.floor(&5), Err(Error::KeyNotFound { operation: "floor" }));
    /// ```
    pub fn floor(&self, key: &K) -> Result<(&K, &V)> {
        if self.is_empty() {
            return Err(Error::empty("floor"));
        }
        let handle = self.raw.floor(&self.comparator, key).ok_or_else(|| Error::not_found("floor"))?;
        Ok(self.raw.entry(handle))
    }

    /// Returns the entry with the smallest key greater than or equal to `key`.
    ///
    /// # Errors
    ///
    /// [`Error::EmptyContainer`] if the map is empty, [`Error::KeyNotFound`]
    /// if every key is less than `key`.
    pub fn ceiling(&self, key: &K) -> Result<(&K, &V)> {
        if self.is_empty() {
            return Err(Error::empty("ceiling"));
        }
        let handle = self.raw.ceiling(&self.comparator, key).ok_or_else(|| Error::not_found("ceiling"))?;
        Ok(self.raw.entry(handle))
    }

    /// Constructs an ascending iterator over a sub-range of the map.
    ///
    /// `map.range(lo..hi)` yields the keys in `[lo, hi)`. Bounds are compared
    /// with the map's comparator; a range whose start is past its end is
    /// empty. Pass `(Bound<&K>, Bound<&K>)` to avoid cloning keys.
    ///
    /// The iterator knows its length up front, so `range(..).len()` counts the
    /// keys in a range in O(log n).
    ///
    /// # Examples
    ///
    /// ```
    /// use std::ops::Bound::{Excluded, Included};
    /// use beni_tree::RBTreeMap;
    ///
    /// let map: RBTreeMap<i32, char> = (0..10).zip('a'..).collect();
    ///
    /// let keys: Vec<_> = map.range(3..6).map(|(k, _)| *k).collect();
    /// assert_eq!(keys, [3, 4, 5]);
    /// assert_eq!(map.range(4..).len(), 6);
    /// assert_eq!(map.range((Excluded(&2), Included(&4))).len(), 2);
    /// assert_eq!(map.range(7..3).count(), 0);
    /// ```
    pub fn range<R: RangeBounds<K>>(&self, range: R) -> Range<'_, K, V> {
        let start = match range.start_bound() {
            Bound::Included(key) => self.rank_of(key),
            Bound::Excluded(key) => self.rank_of(key) + usize::from(self.contains_key(key)),
            Bound::Unbounded => 0,
        };
        let end = match range.end_bound() {
            Bound::Included(key) => self.rank_of(key) + usize::from(self.contains_key(key)),
            Bound::Excluded(key) => self.rank_of(key),
            Bound::Unbounded => self.len(),
        };

        let walk = Walk::in_order_from(&self.raw, start, end.saturating_sub(start));
        Range {
            inner: Iter::new(&self.raw, walk),
        }
    }
}

/// Indexes into the map by rank.
///
/// # Panics
///
/// Panics if `rank` is out of bounds.
///
/// # Examples
///
/// ```
/// use beni_tree::{RBTreeMap, Rank};
///
/// let mut map = RBTreeMap::new();
/// map.insert("a", 1);
/// map.insert("b", 2);
///
/// assert_eq!(map[Rank(0)], 1);
/// ```
impl<K, V, C> Index<Rank> for RBTreeMap<K, V, C> {
    type Output = V;

    fn index(&self, rank: Rank) -> &Self::Output {
        self.get_by_rank(rank.0).map(|(_, v)| v).expect("index out of bounds")
    }
}
