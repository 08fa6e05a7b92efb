//! Self-balancing ordered tree engines.
//!
//! This crate provides the binary search tree cores that back sorted
//! associative containers: a red-black tree with deterministic worst-case
//! balance and a splay tree with self-adjusting amortized balance. Both
//! implement the shared [`OrderedContainer`] contract and are parameterized
//! over the ordering function used for all comparisons.
//!
//! [`OrderedContainer`]: container::OrderedContainer

pub mod compare;
pub mod container;
pub mod red_black_tree;
pub mod splay_tree;
mod traverse;

pub use self::compare::{Comparator, FnComparator, NaturalOrder};
pub use self::container::OrderedContainer;
pub use self::traverse::TraversalOrder;
