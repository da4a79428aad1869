//! Comparator contracts shared by every container and query operator.
//!
//! Two caller-supplied contracts drive ordering and membership everywhere in
//! the crate:
//!
//! - an **order comparator**: `(&T, &T) -> Ordering`, consumed by the ordered
//!   trees, the `order_by` family, and the merge-based set algebra;
//! - an **equality comparator**: `(&T, &T) -> bool`, consumed by
//!   `distinct`, `union`, `intersect`, `except`, grouping, and joins.
//!
//! Both default to a single, type-level structural implementation,
//! [`Natural`], which compares through [`Ord`] and [`PartialEq`]. Defaults
//! are never inferred at runtime from value shape. Comparators are owned by
//! their callers and never mutated by the crate.
//!
//! Closures are adapted through [`compare_fn`] and [`equality_fn`] rather
//! than blanket impls, so that `Natural` can stay a default type parameter
//! without coherence conflicts.

use std::cmp::Ordering;

// =============================================================================
// Order comparator
// =============================================================================

/// An order predicate over `T`: returns the relative rank of two values.
///
/// An order comparator also induces an equality: two values are considered
/// the same element exactly when `compare` returns [`Ordering::Equal`]. The
/// ordered trees use that induced equality for uniqueness.
pub trait Comparator<T> {
    /// Compares two values, returning their relative rank.
    fn compare(&self, left: &T, right: &T) -> Ordering;

    /// Wraps this comparator so it ranks in the opposite direction.
    fn descending(self) -> Descending<Self>
    where
        Self: Sized,
    {
        Descending(self)
    }
}

/// An equality predicate over `T`: returns whether two values are considered
/// the same element for membership and distinctness purposes.
pub trait EqualityComparator<T> {
    /// Returns whether the two values are considered equal.
    fn equals(&self, left: &T, right: &T) -> bool;
}

// =============================================================================
// Structural default
// =============================================================================

/// The structural default comparator, chosen at the type level.
///
/// Orders through [`Ord`] and tests equality through [`PartialEq`]. This is
/// the default type parameter of every comparator-generic container and
/// operator in the crate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Natural;

impl<T: Ord> Comparator<T> for Natural {
    fn compare(&self, left: &T, right: &T) -> Ordering {
        left.cmp(right)
    }
}

impl<T: PartialEq> EqualityComparator<T> for Natural {
    fn equals(&self, left: &T, right: &T) -> bool {
        left == right
    }
}

// =============================================================================
// Closure adapters
// =============================================================================

/// An order comparator backed by a closure. Built by [`compare_fn`].
#[derive(Debug, Clone, Copy)]
pub struct CompareFn<F>(F);

/// Adapts a `(&T, &T) -> Ordering` closure into a [`Comparator`].
///
/// # Examples
///
/// ```rust
/// use riffle::compare::{compare_fn, Comparator};
///
/// let by_length = compare_fn(|left: &String, right: &String| {
///     left.len().cmp(&right.len())
/// });
/// let a = "hi".to_string();
/// let b = "hello".to_string();
/// assert!(by_length.compare(&a, &b).is_lt());
/// ```
pub fn compare_fn<T, F>(compare: F) -> CompareFn<F>
where
    F: Fn(&T, &T) -> Ordering,
{
    CompareFn(compare)
}

impl<T, F> Comparator<T> for CompareFn<F>
where
    F: Fn(&T, &T) -> Ordering,
{
    fn compare(&self, left: &T, right: &T) -> Ordering {
        (self.0)(left, right)
    }
}

/// An equality comparator backed by a closure. Built by [`equality_fn`].
#[derive(Debug, Clone, Copy)]
pub struct EqualityFn<F>(F);

/// Adapts a `(&T, &T) -> bool` closure into an [`EqualityComparator`].
pub fn equality_fn<T, F>(equals: F) -> EqualityFn<F>
where
    F: Fn(&T, &T) -> bool,
{
    EqualityFn(equals)
}

impl<T, F> EqualityComparator<T> for EqualityFn<F>
where
    F: Fn(&T, &T) -> bool,
{
    fn equals(&self, left: &T, right: &T) -> bool {
        (self.0)(left, right)
    }
}

// =============================================================================
// Combinators
// =============================================================================

/// A comparator that reverses the rank of its inner comparator.
#[derive(Debug, Clone, Copy, Default)]
pub struct Descending<C>(C);

impl<T, C: Comparator<T>> Comparator<T> for Descending<C> {
    fn compare(&self, left: &T, right: &T) -> Ordering {
        self.0.compare(left, right).reverse()
    }
}
