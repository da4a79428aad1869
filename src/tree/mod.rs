//! Self-balancing ordered trees: the sole ordering substrate for every
//! sorted container in the crate.
//!
//! Two interchangeable variants implement the same [`OrderedTree`] contract:
//!
//! - [`RedBlackTree`]: worst-case O(log n) insert/remove/lookup through
//!   rotation and recoloring invariants;
//! - [`SplayTree`]: amortized O(log n) with recency locality; every
//!   successful access moves the touched node to the root.
//!
//! Both store their nodes in an index-addressed arena: the tree exclusively
//! owns every node through the arena, child and parent links are plain
//! indices, and a `NIL` sentinel stands in for absent children. Parent links
//! are structural aids for upward walks during rotation and fix-up only;
//! they carry no ownership.
//!
//! Elements are unique under the tree's order comparator: inserting a value
//! that compares [`Equal`](std::cmp::Ordering::Equal) to an existing element
//! is a no-op, and in-order traversal of `n` insertions yields exactly the
//! distinct values in ascending comparator order.
//!
//! # Examples
//!
//! ```rust
//! use riffle::tree::{OrderedTree, RedBlackTree};
//!
//! let mut tree = RedBlackTree::new();
//! for value in [4, 1, 3, 5, 2] {
//!     tree.insert(value);
//! }
//!
//! let sorted: Vec<&i32> = tree.in_order().collect();
//! assert_eq!(sorted, vec![&1, &2, &3, &4, &5]);
//! ```

pub mod red_black;
pub mod splay;

pub use red_black::RedBlackTree;
pub use splay::SplayTree;

/// The contract shared by both ordered-tree variants.
///
/// `contains` takes `&mut self` because the splay variant restructures on
/// every successful access; the red-black tree additionally exposes an
/// inherent `&self` lookup used by the sorted containers.
///
/// Removing or searching for an absent value is a silent no-op reported
/// through the boolean result, never an error; [`root_value`] on an empty
/// tree returns `None`, never panics.
///
/// [`root_value`]: OrderedTree::root_value
pub trait OrderedTree<T> {
    /// Lazy in-order (ascending) traversal.
    type InOrder<'a>: Iterator<Item = &'a T>
    where
        Self: 'a,
        T: 'a;
    /// Lazy pre-order (root, left, right) traversal.
    type PreOrder<'a>: Iterator<Item = &'a T>
    where
        Self: 'a,
        T: 'a;
    /// Lazy post-order (left, right, root) traversal.
    type PostOrder<'a>: Iterator<Item = &'a T>
    where
        Self: 'a,
        T: 'a;

    /// Inserts `value`, returning whether it was newly added. A value that
    /// compares equal to an existing element leaves the tree unchanged.
    fn insert(&mut self, value: T) -> bool;

    /// Removes the element comparing equal to `value`, returning whether a
    /// removal occurred.
    fn remove(&mut self, value: &T) -> bool;

    /// Returns whether an element comparing equal to `value` is present.
    fn contains(&mut self, value: &T) -> bool;

    /// Unordered root/left/right scan; returns the first element satisfying
    /// `predicate`, if any.
    fn find(&self, predicate: impl Fn(&T) -> bool) -> Option<&T>;

    /// The number of elements in the tree.
    fn len(&self) -> usize;

    /// Returns whether the tree is empty.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Removes every element.
    fn clear(&mut self);

    /// The value at the root, or `None` for an empty tree.
    fn root_value(&self) -> Option<&T>;

    /// In-order (sorted ascending) traversal.
    fn in_order(&self) -> Self::InOrder<'_>;

    /// Pre-order traversal.
    fn pre_order(&self) -> Self::PreOrder<'_>;

    /// Post-order traversal.
    fn post_order(&self) -> Self::PostOrder<'_>;
}
