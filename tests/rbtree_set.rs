use std::collections::BTreeSet;

use beni_tree::{Error, NaturalOrder, Order, RBTreeSet, Reversed};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

/// The number of operations to perform in each proptest case.
const TEST_SIZE: usize = 2_000;

fn value_strategy() -> impl Strategy<Value = i32> {
    -1_000i32..1_000i32
}

#[derive(Debug, Clone)]
enum SetOp {
    Insert(i32),
    Remove(i32),
    Contains(i32),
    RemoveMin,
    RemoveMax,
    Floor(i32),
    Ceiling(i32),
}

fn set_op_strategy() -> impl Strategy<Value = SetOp> {
    prop_oneof![
        5 => value_strategy().prop_map(SetOp::Insert),
        3 => value_strategy().prop_map(SetOp::Remove),
        2 => value_strategy().prop_map(SetOp::Contains),
        1 => Just(SetOp::RemoveMin),
        1 => Just(SetOp::RemoveMax),
        1 => value_strategy().prop_map(SetOp::Floor),
        1 => value_strategy().prop_map(SetOp::Ceiling),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(20))]

    #[test]
    fn set_ops_match_btreeset(ops in proptest::collection::vec(set_op_strategy(), TEST_SIZE)) {
        let mut rb_set: RBTreeSet<i32> = RBTreeSet::new();
        let mut bt_set: BTreeSet<i32> = BTreeSet::new();

        for op in &ops {
            match op {
                SetOp::Insert(v) => {
                    prop_assert_eq!(rb_set.insert(*v), bt_set.insert(*v), "insert({})", v);
                }
                SetOp::Remove(v) => {
                    prop_assert_eq!(rb_set.remove(v).is_ok(), bt_set.remove(v), "remove({})", v);
                }
                SetOp::Contains(v) => {
                    prop_assert_eq!(rb_set.contains(v), bt_set.contains(v), "contains({})", v);
                }
                SetOp::RemoveMin => {
                    prop_assert_eq!(rb_set.remove_min().ok(), bt_set.pop_first());
                }
                SetOp::RemoveMax => {
                    prop_assert_eq!(rb_set.remove_max().ok(), bt_set.pop_last());
                }
                SetOp::Floor(v) => {
                    prop_assert_eq!(rb_set.floor(v).ok(), bt_set.range(..=*v).next_back(), "floor({})", v);
                }
                SetOp::Ceiling(v) => {
                    prop_assert_eq!(rb_set.ceiling(v).ok(), bt_set.range(*v..).next(), "ceiling({})", v);
                }
            }
            prop_assert_eq!(rb_set.len(), bt_set.len());
        }

        prop_assert_eq!(rb_set.validate(), Ok(()));
        prop_assert!(rb_set.iter().eq(bt_set.iter()));
    }

    /// Insert then look up, remove then miss.
    #[test]
    fn round_trip(values in proptest::collection::btree_set(value_strategy(), 0..500)) {
        let mut rb_set: RBTreeSet<i32> = values.iter().copied().collect();
        prop_assert_eq!(rb_set.len(), values.len());
        for v in &values {
            prop_assert_eq!(rb_set.get(v), Some(v));
        }
        for v in &values {
            prop_assert_eq!(rb_set.remove(v), Ok(*v));
            prop_assert!(!rb_set.contains(v));
        }
        prop_assert!(rb_set.is_empty());
        prop_assert_eq!(rb_set.validate(), Ok(()));
    }

    #[test]
    fn range_len_matches_btreeset(
        values in proptest::collection::vec(value_strategy(), 0..TEST_SIZE),
        lo in value_strategy(),
        hi in value_strategy(),
    ) {
        let rb_set: RBTreeSet<i32> = values.iter().copied().collect();
        let bt_set: BTreeSet<i32> = values.into_iter().collect();
        let (lo, hi) = (lo.min(hi), lo.max(hi));
        prop_assert_eq!(rb_set.range(lo..=hi).len(), bt_set.range(lo..=hi).count());
        prop_assert!(rb_set.range(lo..=hi).eq(bt_set.range(lo..=hi)));
    }
}

#[test]
fn reversed_set_orders_descending() {
    let set = RBTreeSet::from_iter_with([3, 1, 4, 1, 5, 9, 2, 6], Reversed(NaturalOrder));
    assert_eq!(set.iter().copied().collect::<Vec<_>>(), [9, 6, 5, 4, 3, 2, 1]);
    assert_eq!(set.min(), Ok(&9));
    assert_eq!(set.rank_of(&4), 3);
    set.validate().unwrap();
}

#[test]
fn set_traversal_invalidated_by_remove() {
    let mut set: RBTreeSet<u8> = (0..8).collect();
    let mut cursor = set.traversal(Order::LevelOrder);
    assert!(cursor.next(&set).unwrap().is_some());
    set.remove_max().unwrap();
    assert!(matches!(cursor.next(&set), Err(Error::ConcurrentModification { .. })));
}

#[test]
fn empty_set_errors() {
    let mut set: RBTreeSet<i32> = RBTreeSet::default();
    assert_eq!(set.min(), Err(Error::EmptyContainer { operation: "min" }));
    assert_eq!(set.remove(&1), Err(Error::EmptyContainer { operation: "remove" }));
    set.insert(1);
    assert_eq!(set.remove(&2), Err(Error::AbsentKey { operation: "remove" }));
    assert_eq!(format!("{set:?}"), "{1}");
}
