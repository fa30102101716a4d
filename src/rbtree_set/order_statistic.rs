use core::ops::{Index, RangeBounds};

use super::{RBTreeSet, Range};
use crate::Rank;
use crate::comparator::Comparator;
use crate::error::Result;

impl<T, C> RBTreeSet<T, C> {
    /// Returns the smallest item.
    ///
    /// # Errors
    ///
    /// [`Error::EmptyContainer`](crate::Error::EmptyContainer) if the set is empty.
    pub fn min(&self) -> Result<&T> {
        self.map.min().map(|(item, ())| item)
    }

    /// Returns the largest item.
    ///
    /// # Errors
    ///
    /// [`Error::EmptyContainer`](crate::Error::EmptyContainer) if the set is empty.
    pub fn max(&self) -> Result<&T> {
        self.map.max().map(|(item, ())| item)
    }

    /// Returns the item at position `rank` in sorted order.
    ///
    /// # Complexity
    ///
    /// O(log n)
    ///
    /// # Errors
    ///
    /// [`Error::RankOutOfBounds`](crate::Error::RankOutOfBounds) if
    /// `rank >= len`.
    ///
    /// # Examples
    ///
    /// ```
    /// use beni_tree::RBTreeSet;
    ///
    /// let set = RBTreeSet::from([10, 20, 30]);
    /// assert_eq!(set.get_by_rank(1), Ok(&20));
    /// assert!(set.get_by_rank(3).is_err());
    /// ```
    pub fn get_by_rank(&self, rank: usize) -> Result<&T> {
        self.map.get_by_rank(rank).map(|(item, ())| item)
    }
}

impl<T, C: Comparator<T>> RBTreeSet<T, C> {
    /// Returns the number of items strictly less than `value`.
    ///
    /// # Complexity
    ///
    /// O(log n)
    ///
    /// # Examples
    ///
    /// ```
    /// use beni_tree::RBTreeSet;
    ///
    /// let set = RBTreeSet::from([10, 20]);
    /// assert_eq!(set.rank_of(&20), 1);
    /// assert_eq!(set.rank_of(&15), 1);
    /// ```
    pub fn rank_of(&self, value: &T) -> usize {
        self.map.rank_of(value)
    }

    /// Returns the largest item less than or equal to `value`.
    ///
    /// # Errors
    ///
    /// As for [`RBTreeMap::floor`](crate::RBTreeMap::floor).
    pub fn floor(&self, value: &T) -> Result<&T> {
        self.map.floor(value).map(|(item, ())| item)
    }

    /// Returns the smallest item greater than or equal to `value`.
    ///
    /// # Errors
    ///
    /// As for [`RBTreeMap::ceiling`](crate::RBTreeMap::ceiling).
    pub fn ceiling(&self, value: &T) -> Result<&T> {
        self.map.ceiling(value).map(|(item, ())| item)
    }

    /// Constructs an ascending iterator over a sub-range of the set.
    ///
    /// ```
    /// use beni_tree::RBTreeSet;
    ///
    /// let set: RBTreeSet<i32> = (0..10).collect();
    /// assert_eq!(set.range(2..=4).copied().collect::<Vec<_>>(), [2, 3, 4]);
    /// assert_eq!(set.range(..3).len(), 3);
    /// ```
    pub fn range<R: RangeBounds<T>>(&self, range: R) -> Range<'_, T> {
        Range {
            inner: self.map.range(range),
        }
    }
}

impl<T, C> Index<Rank> for RBTreeSet<T, C> {
    type Output = T;

    /// Returns the item at `rank`.
    ///
    /// # Panics
    ///
    /// Panics if `rank` is out of bounds.
    fn index(&self, rank: Rank) -> &T {
        self.get_by_rank(rank.0).expect("index out of bounds")
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use crate::{Error, RBTreeSet, Rank};

    #[test]
    fn set_order_statistics() {
        let set = RBTreeSet::from([50, 10, 40, 20, 30]);
        assert_eq!(set.min(), Ok(&10));
        assert_eq!(set.max(), Ok(&50));
        assert_eq!(set.floor(&35), Ok(&30));
        assert_eq!(set.ceiling(&35), Ok(&40));
        assert_eq!(set.floor(&5), Err(Error::KeyNotFound { operation: "floor" }));
        assert_eq!(set[Rank(2)], 30);
        for (rank, item) in set.iter().enumerate() {
            assert_eq!(set.rank_of(item), rank);
        }
    }
}
