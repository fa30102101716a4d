//! Left-leaning red-black order-statistic trees for Rust.
//!
//! This crate provides [`RBTreeMap`] and [`RBTreeSet`], ordered collections
//! backed by a left-leaning red-black tree whose nodes carry subtree sizes.
//! Besides lookup, insertion and removal in O(log n) they answer:
//!
//! - [`get_by_rank`](RBTreeMap::get_by_rank) - the entry at a sorted position
//! - [`rank_of`](RBTreeMap::rank_of) - how many keys are smaller than a key
//! - [`floor`](RBTreeMap::floor) and [`ceiling`](RBTreeMap::ceiling) - nearest keys
//! - [`range`](RBTreeMap::range) - a sub-range whose length is known up front
//!
//! # Example
//!
//! ```
//! use beni_tree::{Order, RBTreeMap, Rank};
//!
//! let mut scores = RBTreeMap::new();
//! scores.insert("Alice", 100);
//! scores.insert("Bob", 85);
//! scores.insert("Carol", 92);
//!
//! assert_eq!(scores.get(&"Bob"), Some(&85));
//! assert_eq!(scores.get_by_rank(1), Ok((&"Bob", &85)));
//! assert_eq!(scores.rank_of(&"Carol"), 2);
//! assert_eq!(scores[Rank(0)], 100);
//!
//! // The shape of the tree is observable through the four traversal orders.
//! let level: Vec<_> = scores.traverse(Order::LevelOrder).map(|(name, _)| *name).collect();
//! assert_eq!(level, ["Bob", "Alice", "Carol"]);
//! ```
//!
//! # Ordering
//!
//! Keys are compared by a [`Comparator`] fixed at construction. The default,
//! [`NaturalOrder`], uses [`Ord`]; closures `Fn(&K, &K) -> Ordering` and
//! [`Reversed`] work as well.
//!
//! # Errors
//!
//! Queries that can find nothing on a non-empty tree return `Option`.
//! Operations with a precondition (a non-empty tree, a present key, a rank in
//! bounds) return [`Result`] with an [`Error`] naming what went wrong.
//!
//! # Traversals
//!
//! Borrowing iterators ([`RBTreeMap::iter`], [`RBTreeMap::pre_order`], ...)
//! hold a shared borrow, so the map cannot change while they are alive.
//! [`Traversal`] is a cursor that holds no borrow and instead checks the map's
//! version on every step, failing with [`Error::ConcurrentModification`] after
//! an insertion or removal.
//!
//! # Features
//!
//! - **`no_std` compatible** - only requires `alloc`
//! - **`verify`** - checks every red-black invariant after each mutation and
//!   panics on the first violation; meant for tests and debugging

#![no_std]
#![forbid(unsafe_code)]
#![forbid(keyword_idents)]
#![forbid(non_ascii_idents)]
#![forbid(unreachable_pub)]
#![warn(clippy::all)]
#![warn(clippy::cargo)]
#![warn(clippy::pedantic)]
// Enable coverage attributes for nightly builds.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

extern crate alloc;

mod comparator;
mod error;
mod order_statistic;
mod raw;

pub mod rbtree_map;
pub mod rbtree_set;

pub use comparator::{Comparator, NaturalOrder, Reversed};
pub use error::{Error, Result, Violation};
pub use order_statistic::Rank;
pub use rbtree_map::{Order, RBTreeMap, Traversal};
pub use rbtree_set::RBTreeSet;
