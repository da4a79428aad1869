//! # riffle
//!
//! In-memory collections with a lazy, composable query engine.
//!
//! ## Overview
//!
//! This library pairs self-balancing ordered containers with a deferred,
//! pull-based query layer over any enumerable source. It includes:
//!
//! - **Sequences**: the [`Sequence`](sequence::Sequence) trait, a replayable
//!   recipe with `filter`, `select`, ordering, grouping, joins, and set
//!   algebra, evaluated only on enumeration
//! - **Ordered Trees**: arena-backed red-black and splay trees behind the
//!   common [`OrderedTree`](tree::OrderedTree) surface
//! - **Containers**: [`SortedSet`](containers::SortedSet) and
//!   [`SortedMap`](containers::SortedMap) layered over the red-black tree
//! - **Comparators**: pluggable ordering and equality strategies through
//!   [`Comparator`](compare::Comparator) and
//!   [`EqualityComparator`](compare::EqualityComparator)
//!
//! Failures surface as [`QueryError`](error::QueryError) values from the
//! terminal operations; building a pipeline never fails, with the single
//! documented exception of `chunk(0)`.
//!
//! ## Example
//!
//! ```rust
//! use riffle::prelude::*;
//!
//! let numbers = vec![6, 1, 5, 2, 4, 3];
//! let pipeline = (&numbers).filter(|n| *n % 2 == 0).order_by(|n| *n);
//!
//! // Nothing runs until enumeration, and every enumeration replays.
//! assert_eq!(pipeline.to_vec(), vec![2, 4, 6]);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]

pub mod compare;
pub mod containers;
pub mod error;
pub mod sequence;
pub mod tree;

/// Prelude module for convenient imports.
///
/// Re-exports commonly used types and traits.
///
/// # Usage
///
/// ```rust
/// use riffle::prelude::*;
/// ```
pub mod prelude {
    pub use crate::compare::{Comparator, EqualityComparator, Natural, compare_fn, equality_fn};
    pub use crate::containers::{SortedMap, SortedSet};
    pub use crate::error::QueryError;
    pub use crate::sequence::{Grouping, Lookup, Ordered, Sequence, generate};
    pub use crate::tree::{OrderedTree, RedBlackTree, SplayTree};
}
