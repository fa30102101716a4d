/// A zero-based position in the sorted order of a map or set.
///
/// Indexing with a `Rank` reads the entry at that position; it is the
/// panicking form of `get_by_rank`.
///
/// # Examples
///
/// ```
/// use beni_tree::{RBTreeMap, Rank};
///
/// let mut map = RBTreeMap::new();
/// map.insert("b", 20);
/// map.insert("a", 10);
///
/// assert_eq!(map[Rank(0)], 10);
/// assert_eq!(map[Rank(1)], 20);
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Rank(pub usize);
