//! Total orders over keys.
//!
//! Every tree is parameterised by a [`Comparator`], supplied at construction
//! and used for every descent. The comparator must be a total order and must
//! not change its answers while keys are in the tree; breaking that is a logic
//! error that can produce wrong results or panics, but never undefined
//! behavior.

use core::cmp::Ordering;

/// A total order over `K`.
///
/// Only [`compare`](Comparator::compare) is required. Closures of type
/// `Fn(&K, &K) -> Ordering` implement this trait directly.
///
/// # Examples
///
/// ```
/// use core::cmp::Ordering;
/// use beni_tree::{Comparator, RBTreeMap};
///
/// // Case-insensitive keys.
/// let by_lowercase = |a: &&str, b: &&str| a.to_lowercase().cmp(&b.to_lowercase());
/// assert!(by_lowercase.less(&"apple", &"Banana"));
///
/// let mut map = RBTreeMap::with_comparator(by_lowercase);
/// map.insert("Apple", 1);
/// map.insert("apple", 2);
/// assert_eq!(map.len(), 1);
/// ```
pub trait Comparator<K: ?Sized> {
    /// Returns the ordering of `a` relative to `b`.
    fn compare(&self, a: &K, b: &K) -> Ordering;

    #[inline]
    fn less(&self, a: &K, b: &K) -> bool {
        self.compare(a, b) == Ordering::Less
    }

    #[inline]
    fn less_or_equal(&self, a: &K, b: &K) -> bool {
        self.compare(a, b) != Ordering::Greater
    }

    #[inline]
    fn equal(&self, a: &K, b: &K) -> bool {
        self.compare(a, b) == Ordering::Equal
    }
}

/// The order given by the key's [`Ord`] implementation.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub struct NaturalOrder;

impl<K: Ord + ?Sized> Comparator<K> for NaturalOrder {
    #[inline]
    fn compare(&self, a: &K, b: &K) -> Ordering {
        a.cmp(b)
    }
}

/// Reverses another comparator.
///
/// ```
/// use beni_tree::{NaturalOrder, RBTreeMap, Reversed};
///
/// let map = RBTreeMap::from_iter_with([(1, 'a'), (3, 'c'), (2, 'b')], Reversed(NaturalOrder));
/// let keys: Vec<_> = map.keys().copied().collect();
/// assert_eq!(keys, [3, 2, 1]);
/// ```
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub struct Reversed<C>(pub C);

impl<K: ?Sized, C: Comparator<K>> Comparator<K> for Reversed<C> {
    #[inline]
    fn compare(&self, a: &K, b: &K) -> Ordering {
        self.0.compare(b, a)
    }
}

impl<K: ?Sized, F> Comparator<K> for F
where
    F: Fn(&K, &K) -> Ordering,
{
    #[inline]
    fn compare(&self, a: &K, b: &K) -> Ordering {
        self(a, b)
    }
}
