use std::collections::BTreeMap;
use std::ops::Bound;

use beni_tree::{Error, Order, RBTreeMap, Rank};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

/// The number of operations to perform in each proptest case.
const TEST_SIZE: usize = 2_000;

/// Keys drawn from a range small enough to collide often.
fn key_strategy() -> impl Strategy<Value = i64> {
    -1_000i64..1_000i64
}

fn value_strategy() -> impl Strategy<Value = i64> {
    any::<i64>()
}

// ─── Operations enum for driving randomized tests ────────────────────────────

#[derive(Debug, Clone)]
enum MapOp {
    Insert(i64, i64),
    Remove(i64),
    Get(i64),
    ContainsKey(i64),
    Min,
    Max,
    RemoveMin,
    RemoveMax,
    Floor(i64),
    Ceiling(i64),
    RankOf(i64),
    GetByRank(usize),
}

fn map_op_strategy() -> impl Strategy<Value = MapOp> {
    prop_oneof![
        6 => (key_strategy(), value_strategy()).prop_map(|(k, v)| MapOp::Insert(k, v)),
        3 => key_strategy().prop_map(MapOp::Remove),
        2 => key_strategy().prop_map(MapOp::Get),
        1 => key_strategy().prop_map(MapOp::ContainsKey),
        1 => Just(MapOp::Min),
        1 => Just(MapOp::Max),
        1 => Just(MapOp::RemoveMin),
        1 => Just(MapOp::RemoveMax),
        1 => key_strategy().prop_map(MapOp::Floor),
        1 => key_strategy().prop_map(MapOp::Ceiling),
        1 => key_strategy().prop_map(MapOp::RankOf),
        1 => (0usize..2_000).prop_map(MapOp::GetByRank),
    ]
}

fn empty_or(bt_map: &BTreeMap<i64, i64>, operation: &'static str, otherwise: Error) -> Error {
    if bt_map.is_empty() {
        Error::EmptyContainer { operation }
    } else {
        otherwise
    }
}

// ─── Core operations against BTreeMap ────────────────────────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(20))]

    /// Replays a random sequence of operations on both RBTreeMap and BTreeMap
    /// and asserts identical results at every step.
    #[test]
    fn map_ops_match_btreemap(ops in proptest::collection::vec(map_op_strategy(), TEST_SIZE)) {
        let mut rb_map: RBTreeMap<i64, i64> = RBTreeMap::new();
        let mut bt_map: BTreeMap<i64, i64> = BTreeMap::new();

        for (step, op) in ops.iter().enumerate() {
            match op {
                MapOp::Insert(k, v) => {
                    prop_assert_eq!(rb_map.insert(*k, *v), bt_map.insert(*k, *v), "insert({}, {})", k, v);
                }
                MapOp::Remove(k) => {
                    let expected = bt_map
                        .remove(k)
                        .ok_or_else(|| empty_or(&bt_map, "remove", Error::AbsentKey { operation: "remove" }));
                    prop_assert_eq!(rb_map.remove(k), expected, "remove({})", k);
                }
                MapOp::Get(k) => {
                    prop_assert_eq!(rb_map.get(k), bt_map.get(k), "get({})", k);
                }
                MapOp::ContainsKey(k) => {
                    prop_assert_eq!(rb_map.contains_key(k), bt_map.contains_key(k), "contains_key({})", k);
                }
                MapOp::Min => {
                    prop_assert_eq!(rb_map.min().ok(), bt_map.first_key_value());
                }
                MapOp::Max => {
                    prop_assert_eq!(rb_map.max().ok(), bt_map.last_key_value());
                }
                MapOp::RemoveMin => {
                    prop_assert_eq!(rb_map.remove_min().ok(), bt_map.pop_first());
                }
                MapOp::RemoveMax => {
                    prop_assert_eq!(rb_map.remove_max().ok(), bt_map.pop_last());
                }
                MapOp::Floor(k) => {
                    let expected = bt_map
                        .range(..=*k)
                        .next_back()
                        .ok_or_else(|| empty_or(&bt_map, "floor", Error::KeyNotFound { operation: "floor" }));
                    prop_assert_eq!(rb_map.floor(k), expected, "floor({})", k);
                }
                MapOp::Ceiling(k) => {
                    let expected = bt_map
                        .range(*k..)
                        .next()
                        .ok_or_else(|| empty_or(&bt_map, "ceiling", Error::KeyNotFound { operation: "ceiling" }));
                    prop_assert_eq!(rb_map.ceiling(k), expected, "ceiling({})", k);
                }
                MapOp::RankOf(k) => {
                    prop_assert_eq!(rb_map.rank_of(k), bt_map.range(..*k).count(), "rank_of({})", k);
                }
                MapOp::GetByRank(r) => {
                    prop_assert_eq!(rb_map.get_by_rank(*r).ok(), bt_map.iter().nth(*r), "get_by_rank({})", r);
                }
            }
            prop_assert_eq!(rb_map.len(), bt_map.len());
            if step % 100 == 0 {
                prop_assert_eq!(rb_map.validate(), Ok(()));
            }
        }

        prop_assert_eq!(rb_map.validate(), Ok(()));
        prop_assert!(rb_map.iter().eq(bt_map.iter()));
    }

    /// Rank and select are inverse: `rank_of(get_by_rank(r)) == r`.
    #[test]
    fn rank_select_inverse(entries in proptest::collection::vec((key_strategy(), value_strategy()), 1..TEST_SIZE)) {
        let rb_map: RBTreeMap<i64, i64> = entries.into_iter().collect();
        for r in 0..rb_map.len() {
            let (key, _) = rb_map.get_by_rank(r).unwrap();
            prop_assert_eq!(rb_map.rank_of(key), r);
        }
        prop_assert_eq!(
            rb_map.get_by_rank(rb_map.len()),
            Err(Error::RankOutOfBounds { rank: rb_map.len(), len: rb_map.len() })
        );
    }

    /// The height bound `2 * log2(n + 1)` holds for any insertion order.
    #[test]
    fn height_is_logarithmic(keys in proptest::collection::vec(any::<i64>(), 0..TEST_SIZE)) {
        let rb_map: RBTreeMap<i64, ()> = keys.into_iter().map(|k| (k, ())).collect();
        let bound = 2.0 * ((rb_map.len() + 1) as f64).log2();
        prop_assert!(rb_map.height() as f64 <= bound);
    }

    #[test]
    fn range_matches_btreemap(
        entries in proptest::collection::vec((key_strategy(), value_strategy()), 0..TEST_SIZE),
        lo in key_strategy(),
        hi in key_strategy(),
    ) {
        let rb_map: RBTreeMap<i64, i64> = entries.iter().copied().collect();
        let bt_map: BTreeMap<i64, i64> = entries.into_iter().collect();
        let (lo, hi) = (lo.min(hi), lo.max(hi));

        prop_assert!(rb_map.range(lo..hi).eq(bt_map.range(lo..hi)));
        prop_assert!(rb_map.range(lo..=hi).eq(bt_map.range(lo..=hi)));
        prop_assert!(rb_map.range(..hi).eq(bt_map.range(..hi)));
        prop_assert!(rb_map.range(lo..).eq(bt_map.range(lo..)));
        let bounds = (Bound::Excluded(lo), Bound::Excluded(hi));
        if lo != hi {
            prop_assert!(rb_map.range(bounds).eq(bt_map.range(bounds)));
        }
        prop_assert_eq!(rb_map.range(lo..hi).len(), bt_map.range(lo..hi).count());
    }

    /// Every traversal order visits each entry exactly once.
    #[test]
    fn traversals_are_permutations(keys in proptest::collection::vec(key_strategy(), 0..TEST_SIZE)) {
        let rb_map: RBTreeMap<i64, ()> = keys.into_iter().map(|k| (k, ())).collect();
        let sorted: Vec<i64> = rb_map.keys().copied().collect();
        for order in [Order::PreOrder, Order::PostOrder, Order::LevelOrder] {
            let mut visited: Vec<i64> = rb_map.traverse(order).map(|(k, ())| *k).collect();
            visited.sort_unstable();
            prop_assert_eq!(&visited, &sorted);
        }
    }

    /// Rebuilding from a pre-order walk reproduces the same entries.
    #[test]
    fn pre_order_round_trip(entries in proptest::collection::vec((key_strategy(), value_strategy()), 0..TEST_SIZE)) {
        let rb_map: RBTreeMap<i64, i64> = entries.into_iter().collect();
        let rebuilt: RBTreeMap<i64, i64> = rb_map.pre_order().map(|(k, v)| (*k, *v)).collect();
        prop_assert_eq!(rebuilt, rb_map);
    }
}

// ─── Scenarios ───────────────────────────────────────────────────────────────

#[test]
fn reference_insertion_shape() {
    let mut map = RBTreeMap::new();
    for key in [4, 2, 1, 3, 6, 5, 7] {
        map.insert(key, key * 10);
    }

    assert_eq!(map.keys().copied().collect::<Vec<_>>(), [1, 2, 3, 4, 5, 6, 7]);
    // A plain BST would give the same here; the post-order and heights pin the
    // red-black shape.
    assert_eq!(map.pre_order().map(|(k, _)| *k).collect::<Vec<_>>(), [4, 2, 1, 3, 6, 5, 7]);
    assert_eq!(map.post_order().map(|(k, _)| *k).collect::<Vec<_>>(), [1, 3, 2, 5, 7, 6, 4]);
    assert_eq!(map.level_order().map(|(k, _)| *k).collect::<Vec<_>>(), [4, 2, 6, 1, 3, 5, 7]);
    assert_eq!(map.height(), 3);
    map.validate().unwrap();
}

#[test]
fn ascending_insertion_is_not_a_plain_bst() {
    let map: RBTreeMap<i32, ()> = (1..=7).map(|k| (k, ())).collect();
    // A plain BST built from ascending keys would pre-order as 1, 2, ..., 7.
    assert_eq!(map.pre_order().map(|(k, _)| *k).collect::<Vec<_>>(), [4, 2, 1, 3, 6, 5, 7]);
}

#[test]
fn empty_map_reports_empty_container() {
    let mut map: RBTreeMap<i32, i32> = RBTreeMap::new();
    assert_eq!(map.len(), 0);
    assert!(map.is_empty());
    assert_eq!(map.height(), 0);
    assert_eq!(map.min(), Err(Error::EmptyContainer { operation: "min" }));
    assert_eq!(map.remove_min(), Err(Error::EmptyContainer { operation: "remove_min" }));
    assert_eq!(map.remove_max(), Err(Error::EmptyContainer { operation: "remove_max" }));
    assert_eq!(map.remove(&1), Err(Error::EmptyContainer { operation: "remove" }));
    assert!(map.iter().next().is_none());
    assert!(map.validate().is_ok());
}

#[test]
fn ascending_thousand_stays_shallow() {
    let map: RBTreeMap<i32, ()> = (1..=1000).map(|k| (k, ())).collect();
    assert_eq!(map.len(), 1000);
    assert!(map.height() <= 20, "height {}", map.height());
    map.validate().unwrap();
}

#[test]
fn removing_only_entry_empties_map() {
    let mut map = RBTreeMap::new();
    map.insert("only", 1);
    assert_eq!(map.remove(&"only"), Ok(1));
    assert!(map.is_empty());
    assert_eq!(map.min(), Err(Error::EmptyContainer { operation: "min" }));
}

#[test]
fn rank_of_present_and_absent_keys() {
    let keys = [10, 20, 30, 40, 50, 60, 70, 80, 90, 100];
    let map: RBTreeMap<i32, ()> = keys.iter().rev().map(|&k| (k, ())).collect();
    for (position, key) in keys.iter().enumerate() {
        assert_eq!(map.rank_of(key), position);
    }
    assert_eq!(map.rank_of(&45), 4);
    assert_eq!(map.rank_of(&5), 0);
    assert_eq!(map.rank_of(&500), 10);
    assert_eq!(map[Rank(4)], ());
}

#[test]
fn insert_during_traversal_fails_next_pull() {
    let mut map: RBTreeMap<i32, &str> = RBTreeMap::from([(1, "a"), (2, "b"), (3, "c")]);
    let mut cursor = map.traversal(Order::InOrder);
    assert_eq!(cursor.next(&map), Ok(Some((&1, &"a"))));

    map.insert(10, "j");
    let error = cursor.next(&map).unwrap_err();
    assert!(matches!(error, Error::ConcurrentModification { .. }));
    assert!(!error.is_precondition_violation());
}

#[test]
fn remove_absent_key_is_distinct_from_empty() {
    let mut map = RBTreeMap::from([(1, 'a')]);
    let error = map.remove(&2).unwrap_err();
    assert_eq!(error, Error::AbsentKey { operation: "remove" });
    assert!(error.is_precondition_violation());
    assert_eq!(map.len(), 1);
}

#[test]
fn duplicate_insert_keeps_cardinality() {
    let mut map = RBTreeMap::new();
    for k in 0..50 {
        assert_eq!(map.insert(k, 'x'), None);
    }
    assert_eq!(map.insert(25, 'y'), Some('x'));
    assert_eq!(map.len(), 50);
    assert_eq!(map.find(&25), Ok(&'y'));
    assert_eq!(map.find(&99), Err(Error::KeyNotFound { operation: "find" }));
}

#[test]
fn custom_comparator_orders_by_field() {
    #[derive(Clone, Debug, PartialEq)]
    struct Entry {
        id: u32,
        label: &'static str,
    }

    let by_id = |a: &Entry, b: &Entry| a.id.cmp(&b.id);
    let mut map = RBTreeMap::with_comparator(by_id);
    map.insert(Entry { id: 2, label: "two" }, ());
    map.insert(Entry { id: 1, label: "one" }, ());
    map.insert(Entry { id: 2, label: "deux" }, ());

    let labels: Vec<&str> = map.keys().map(|e| e.label).collect();
    assert_eq!(labels, ["one", "deux"]);
    map.validate().unwrap();
}

#[test]
fn debug_and_equality() {
    let a = RBTreeMap::from([(2, 'b'), (1, 'a')]);
    let b: RBTreeMap<i32, char> = [(1, 'a'), (2, 'b')].into_iter().collect();
    assert_eq!(a, b);
    assert_eq!(format!("{a:?}"), "{1: 'a', 2: 'b'}");
    assert_eq!(format!("{:?}", a.range(2..)), "[(2, 'b')]");
}
