//! Ordered containers layered over the red-black substrate.
//!
//! [`SortedSet`] and [`SortedMap`] wrap [`RedBlackTree`] behind
//! set-of-values and key-to-value surfaces. Both keep their elements in
//! comparator order at all times, reject duplicate keys structurally, and
//! participate in the query engine as [`Sequence`] sources that enumerate
//! in ascending order.
//!
//! [`RedBlackTree`]: crate::tree::RedBlackTree
//! [`Sequence`]: crate::sequence::Sequence

pub mod sorted_map;
pub mod sorted_set;

pub use sorted_map::SortedMap;
pub use sorted_set::SortedSet;
