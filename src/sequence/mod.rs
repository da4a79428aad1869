//! The deferred query engine: a lazy, composable, pull-based sequence
//! abstraction shared by every container in the crate.
//!
//! # Overview
//!
//! A [`Sequence`] is a *recipe*, not a container: a source plus zero or more
//! transformation steps, replayed in full on every enumeration. Calling
//! [`iterate`](Sequence::iterate) produces a fresh pull cursor; nothing
//! caches previous output, so a pipeline built over a container reflects the
//! container's state at each enumeration.
//!
//! Operators are provided methods that wrap the receiver in a new adapter;
//! construction never pulls an element and never validates beyond the
//! documented call-time check on [`chunk`](Sequence::chunk). Failures
//! surface at terminal calls as [`QueryError`] values.
//!
//! Evaluation is single-threaded and cooperative: the consumer controls
//! pacing entirely, and operators never drain upstream beyond what was
//! requested. That keeps `first`, `any`, and `take_while` short-circuiting
//! and makes conceptually unbounded sources (see [`generate`]) usable under
//! truncating operators. Operators that cannot stream (`reverse`,
//! `take_last`, ordering, grouping, joins, and the second operand of the
//! set algebra) buffer lazily on the first pull of an enumeration.
//!
//! # Examples
//!
//! ```rust
//! use riffle::sequence::Sequence;
//!
//! let numbers = vec![5, 1, 4, 2, 3];
//! let pipeline = (&numbers).filter(|n| *n > 1).select(|n| n * 10);
//!
//! // Nothing has run yet; enumeration replays the pipeline each time.
//! assert_eq!(pipeline.to_vec(), vec![50, 40, 20, 30]);
//! assert_eq!(pipeline.count(), 4);
//! ```

pub mod grouping;
pub mod join;
pub mod ops;
pub mod ordering;
pub mod set_ops;

use std::cmp::Ordering as CmpOrdering;

use crate::compare::{Comparator, EqualityFn, Natural, equality_fn};
use crate::containers::{SortedMap, SortedSet};
use crate::error::QueryError;

pub use grouping::{GroupBy, Grouping, Lookup};
pub use join::{GroupJoin, Join, LeftJoin};
pub use ops::{
    Append, Chunk, Concat, Filter, Prepend, Reverse, Select, SelectMany, Skip, SkipLast,
    SkipWhile, Take, TakeLast, TakeWhile, Zip, ZipWith,
};
pub use ordering::Ordered;
pub use set_ops::{Distinct, DistinctBy, Except, ExceptOrdered, Intersect, IntersectOrdered, Union};

/// A lazy, replayable view over a finite or conceptually unbounded source.
///
/// Every operator returns a new `Sequence` that pulls one element at a time
/// from its upstream only when the result is enumerated.
pub trait Sequence {
    /// The element type produced by enumeration.
    type Item;

    /// The pull cursor produced by one enumeration.
    type Iter<'a>: Iterator<Item = Self::Item>
    where
        Self: 'a;

    /// Starts a fresh enumeration of this sequence.
    fn iterate(&self) -> Self::Iter<'_>;

    // =========================================================================
    // Restriction and projection
    // =========================================================================

    /// Keeps the elements satisfying `predicate`.
    fn filter<P>(self, predicate: P) -> Filter<Self, P>
    where
        Self: Sized,
        P: Fn(&Self::Item) -> bool,
    {
        Filter::new(self, predicate)
    }

    /// Transforms every element through `selector`.
    fn select<F, R>(self, selector: F) -> Select<Self, F>
    where
        Self: Sized,
        F: Fn(Self::Item) -> R,
    {
        Select::new(self, selector)
    }

    /// Transforms every element into an iterable and flattens the results.
    fn select_many<F, I>(self, selector: F) -> SelectMany<Self, F>
    where
        Self: Sized,
        F: Fn(Self::Item) -> I,
        I: IntoIterator,
    {
        SelectMany::new(self, selector)
    }

    // =========================================================================
    // Partitioning
    // =========================================================================

    /// Skips the first `count` elements.
    fn skip(self, count: usize) -> Skip<Self>
    where
        Self: Sized,
    {
        Skip::new(self, count)
    }

    /// Skips the last `count` elements, streaming through a lag buffer.
    fn skip_last(self, count: usize) -> SkipLast<Self>
    where
        Self: Sized,
    {
        SkipLast::new(self, count)
    }

    /// Skips elements while `predicate(element, index)` holds, then yields
    /// everything from the first failing element onward.
    fn skip_while<P>(self, predicate: P) -> SkipWhile<Self, P>
    where
        Self: Sized,
        P: Fn(&Self::Item, usize) -> bool,
    {
        SkipWhile::new(self, predicate)
    }

    /// Takes the first `count` elements.
    fn take(self, count: usize) -> Take<Self>
    where
        Self: Sized,
    {
        Take::new(self, count)
    }

    /// Takes the last `count` elements.
    fn take_last(self, count: usize) -> TakeLast<Self>
    where
        Self: Sized,
    {
        TakeLast::new(self, count)
    }

    /// Yields elements while `predicate(element, index)` holds, stopping at
    /// the first failure without over-consuming upstream.
    fn take_while<P>(self, predicate: P) -> TakeWhile<Self, P>
    where
        Self: Sized,
        P: Fn(&Self::Item, usize) -> bool,
    {
        TakeWhile::new(self, predicate)
    }

    /// Batches elements into `Vec`s of at most `size` elements.
    ///
    /// # Errors
    ///
    /// `InvalidArgument`, at call time, when `size` is zero.
    fn chunk(self, size: usize) -> Result<Chunk<Self>, QueryError>
    where
        Self: Sized,
    {
        if size == 0 {
            return Err(QueryError::InvalidArgument("chunk size must be non-zero"));
        }
        Ok(Chunk::new(self, size))
    }

    // =========================================================================
    // Combination
    // =========================================================================

    /// Yields this sequence followed by `value`.
    fn append(self, value: Self::Item) -> Append<Self>
    where
        Self: Sized,
    {
        Append::new(self, value)
    }

    /// Yields `value` followed by this sequence.
    fn prepend(self, value: Self::Item) -> Prepend<Self>
    where
        Self: Sized,
    {
        Prepend::new(self, value)
    }

    /// Yields the elements in reverse order. Buffers on first pull.
    fn reverse(self) -> Reverse<Self>
    where
        Self: Sized,
    {
        Reverse::new(self)
    }

    /// Yields this sequence followed by `other`.
    fn concat<S2>(self, other: S2) -> Concat<Self, S2>
    where
        Self: Sized,
        S2: Sequence<Item = Self::Item>,
    {
        Concat::new(self, other)
    }

    /// Pairs elements from both sides in lock-step; the result length is the
    /// shorter of the two.
    fn zip<S2>(self, other: S2) -> Zip<Self, S2>
    where
        Self: Sized,
        S2: Sequence,
    {
        Zip::new(self, other)
    }

    /// Combines elements from both sides in lock-step through `combiner`.
    fn zip_with<S2, F, R>(self, other: S2, combiner: F) -> ZipWith<Self, S2, F>
    where
        Self: Sized,
        S2: Sequence,
        F: Fn(Self::Item, S2::Item) -> R,
    {
        ZipWith::new(self, other, combiner)
    }

    // =========================================================================
    // Set algebra
    // =========================================================================

    /// Keeps the first occurrence of each element, preserving encounter
    /// order.
    fn distinct(self) -> Distinct<Self>
    where
        Self: Sized,
        Self::Item: PartialEq,
    {
        Distinct::new(self, Natural)
    }

    /// [`distinct`](Sequence::distinct) under a caller-supplied equality.
    fn distinct_with<F>(self, equality: F) -> Distinct<Self, EqualityFn<F>>
    where
        Self: Sized,
        F: Fn(&Self::Item, &Self::Item) -> bool,
    {
        Distinct::new(self, equality_fn(equality))
    }

    /// Keeps the first element per `selector`-derived key.
    fn distinct_by<F, K>(self, selector: F) -> DistinctBy<Self, F>
    where
        Self: Sized,
        F: Fn(&Self::Item) -> K,
        K: PartialEq,
    {
        DistinctBy::new(self, selector)
    }

    /// Concatenation followed by [`distinct`](Sequence::distinct).
    fn union<S2>(self, other: S2) -> Union<Self, S2>
    where
        Self: Sized,
        Self::Item: PartialEq,
        S2: Sequence<Item = Self::Item>,
    {
        Union::new(self, other, Natural)
    }

    /// [`union`](Sequence::union) under a caller-supplied equality.
    fn union_with<S2, F>(self, other: S2, equality: F) -> Union<Self, S2, EqualityFn<F>>
    where
        Self: Sized,
        S2: Sequence<Item = Self::Item>,
        F: Fn(&Self::Item, &Self::Item) -> bool,
    {
        Union::new(self, other, equality_fn(equality))
    }

    /// Keeps the elements that are also present in `other`.
    fn intersect<S2>(self, other: S2) -> Intersect<Self, S2>
    where
        Self: Sized,
        Self::Item: PartialEq,
        S2: Sequence<Item = Self::Item>,
    {
        Intersect::new(self, other, Natural)
    }

    /// [`intersect`](Sequence::intersect) under a caller-supplied equality,
    /// testing membership pairwise.
    fn intersect_with<S2, F>(self, other: S2, equality: F) -> Intersect<Self, S2, EqualityFn<F>>
    where
        Self: Sized,
        S2: Sequence<Item = Self::Item>,
        F: Fn(&Self::Item, &Self::Item) -> bool,
    {
        Intersect::new(self, other, equality_fn(equality))
    }

    /// [`intersect`](Sequence::intersect) under an order comparator: the
    /// second operand is sorted once and membership resolves by binary
    /// search. Produces the same elements as the pairwise overloads.
    fn intersect_ordered<S2, C>(self, other: S2, comparator: C) -> IntersectOrdered<Self, S2, C>
    where
        Self: Sized,
        S2: Sequence<Item = Self::Item>,
        C: Comparator<Self::Item>,
    {
        IntersectOrdered::new(self, other, comparator)
    }

    /// Keeps the elements that are absent from `other`.
    fn except<S2>(self, other: S2) -> Except<Self, S2>
    where
        Self: Sized,
        Self::Item: PartialEq,
        S2: Sequence<Item = Self::Item>,
    {
        Except::new(self, other, Natural)
    }

    /// [`except`](Sequence::except) under a caller-supplied equality.
    fn except_with<S2, F>(self, other: S2, equality: F) -> Except<Self, S2, EqualityFn<F>>
    where
        Self: Sized,
        S2: Sequence<Item = Self::Item>,
        F: Fn(&Self::Item, &Self::Item) -> bool,
    {
        Except::new(self, other, equality_fn(equality))
    }

    /// [`except`](Sequence::except) under an order comparator, with
    /// merge-based membership.
    fn except_ordered<S2, C>(self, other: S2, comparator: C) -> ExceptOrdered<Self, S2, C>
    where
        Self: Sized,
        S2: Sequence<Item = Self::Item>,
        C: Comparator<Self::Item>,
    {
        ExceptOrdered::new(self, other, comparator)
    }

    // =========================================================================
    // Ordering
    // =========================================================================

    /// Sorts ascending by `selector`. The sort is stable and materializes
    /// only on enumeration; chain [`then_by`](Ordered::then_by) for
    /// secondary keys.
    fn order_by<F, K>(self, selector: F) -> Ordered<Self>
    where
        Self: Sized,
        Self::Item: 'static,
        F: Fn(&Self::Item) -> K + 'static,
        K: Ord,
    {
        Ordered::primary(self, ordering::SortKey::by_key(selector, false))
    }

    /// Sorts descending by `selector`.
    fn order_by_descending<F, K>(self, selector: F) -> Ordered<Self>
    where
        Self: Sized,
        Self::Item: 'static,
        F: Fn(&Self::Item) -> K + 'static,
        K: Ord,
    {
        Ordered::primary(self, ordering::SortKey::by_key(selector, true))
    }

    /// Sorts ascending by `selector` under a caller-supplied key comparator.
    fn order_by_with<F, K, O>(self, selector: F, comparator: O) -> Ordered<Self>
    where
        Self: Sized,
        Self::Item: 'static,
        F: Fn(&Self::Item) -> K + 'static,
        O: Fn(&K, &K) -> CmpOrdering + 'static,
        K: 'static,
    {
        Ordered::primary(self, ordering::SortKey::with(selector, comparator, false))
    }

    /// Sorts descending by `selector` under a caller-supplied key
    /// comparator.
    fn order_by_with_descending<F, K, O>(self, selector: F, comparator: O) -> Ordered<Self>
    where
        Self: Sized,
        Self::Item: 'static,
        F: Fn(&Self::Item) -> K + 'static,
        O: Fn(&K, &K) -> CmpOrdering + 'static,
        K: 'static,
    {
        Ordered::primary(self, ordering::SortKey::with(selector, comparator, true))
    }

    // =========================================================================
    // Grouping and joins
    // =========================================================================

    /// Partitions elements by `selector`-derived key in a single upstream
    /// pass per enumeration, yielding groups in first-key-encounter order.
    fn group_by<F, K>(self, selector: F) -> GroupBy<Self, F>
    where
        Self: Sized,
        F: Fn(&Self::Item) -> K,
        K: PartialEq,
    {
        GroupBy::new(self, selector, Natural)
    }

    /// [`group_by`](Sequence::group_by) under a caller-supplied key
    /// equality.
    fn group_by_with<F, K, E>(self, selector: F, equality: E) -> GroupBy<Self, F, EqualityFn<E>>
    where
        Self: Sized,
        F: Fn(&Self::Item) -> K,
        E: Fn(&K, &K) -> bool,
    {
        GroupBy::new(self, selector, equality_fn(equality))
    }

    /// Correlates this sequence with `inner`, emitting one result per
    /// matching (outer, inner) pair; matchless outer elements emit nothing.
    fn join<S2, FO, FI, K, R, Out>(
        self,
        inner: S2,
        outer_key: FO,
        inner_key: FI,
        result: R,
    ) -> Join<Self, S2, FO, FI, R>
    where
        Self: Sized,
        Self::Item: Clone,
        S2: Sequence,
        S2::Item: Clone,
        FO: Fn(&Self::Item) -> K,
        FI: Fn(&S2::Item) -> K,
        K: PartialEq,
        R: Fn(Self::Item, S2::Item) -> Out,
    {
        Join::new(self, inner, outer_key, inner_key, result, Natural)
    }

    /// [`join`](Sequence::join) under a caller-supplied key equality.
    fn join_with<S2, FO, FI, K, R, Out, E>(
        self,
        inner: S2,
        outer_key: FO,
        inner_key: FI,
        result: R,
        equality: E,
    ) -> Join<Self, S2, FO, FI, R, EqualityFn<E>>
    where
        Self: Sized,
        Self::Item: Clone,
        S2: Sequence,
        S2::Item: Clone,
        FO: Fn(&Self::Item) -> K,
        FI: Fn(&S2::Item) -> K,
        R: Fn(Self::Item, S2::Item) -> Out,
        E: Fn(&K, &K) -> bool,
    {
        Join::new(self, inner, outer_key, inner_key, result, equality_fn(equality))
    }

    /// Like [`join`](Sequence::join), but a matchless outer element emits
    /// exactly one result with `None` as the inner side.
    fn left_join<S2, FO, FI, K, R, Out>(
        self,
        inner: S2,
        outer_key: FO,
        inner_key: FI,
        result: R,
    ) -> LeftJoin<Self, S2, FO, FI, R>
    where
        Self: Sized,
        Self::Item: Clone,
        S2: Sequence,
        S2::Item: Clone,
        FO: Fn(&Self::Item) -> K,
        FI: Fn(&S2::Item) -> K,
        K: PartialEq,
        R: Fn(Self::Item, Option<S2::Item>) -> Out,
    {
        LeftJoin::new(self, inner, outer_key, inner_key, result, Natural)
    }

    /// [`left_join`](Sequence::left_join) under a caller-supplied key
    /// equality.
    fn left_join_with<S2, FO, FI, K, R, Out, E>(
        self,
        inner: S2,
        outer_key: FO,
        inner_key: FI,
        result: R,
        equality: E,
    ) -> LeftJoin<Self, S2, FO, FI, R, EqualityFn<E>>
    where
        Self: Sized,
        Self::Item: Clone,
        S2: Sequence,
        S2::Item: Clone,
        FO: Fn(&Self::Item) -> K,
        FI: Fn(&S2::Item) -> K,
        R: Fn(Self::Item, Option<S2::Item>) -> Out,
        E: Fn(&K, &K) -> bool,
    {
        LeftJoin::new(self, inner, outer_key, inner_key, result, equality_fn(equality))
    }

    /// Emits exactly one result per outer element, pairing it with the
    /// (possibly empty) collection of matching inner elements.
    fn group_join<S2, FO, FI, K, R, Out>(
        self,
        inner: S2,
        outer_key: FO,
        inner_key: FI,
        result: R,
    ) -> GroupJoin<Self, S2, FO, FI, R>
    where
        Self: Sized,
        S2: Sequence,
        S2::Item: Clone,
        FO: Fn(&Self::Item) -> K,
        FI: Fn(&S2::Item) -> K,
        K: PartialEq,
        R: Fn(Self::Item, Vec<S2::Item>) -> Out,
    {
        GroupJoin::new(self, inner, outer_key, inner_key, result, Natural)
    }

    // =========================================================================
    // Quantifiers
    // =========================================================================

    /// The number of elements one enumeration yields.
    fn count(&self) -> usize {
        self.iterate().count()
    }

    /// Returns whether the sequence yields any element, pulling at most one.
    fn any(&self) -> bool {
        self.iterate().next().is_some()
    }

    /// Returns whether any element satisfies `predicate`, short-circuiting.
    fn any_match<P>(&self, predicate: P) -> bool
    where
        P: Fn(&Self::Item) -> bool,
    {
        self.iterate().any(|item| predicate(&item))
    }

    /// Returns whether every element satisfies `predicate`,
    /// short-circuiting.
    fn all<P>(&self, predicate: P) -> bool
    where
        P: Fn(&Self::Item) -> bool,
    {
        self.iterate().all(|item| predicate(&item))
    }

    /// Returns whether `target` occurs in the sequence.
    fn contains_element(&self, target: &Self::Item) -> bool
    where
        Self::Item: PartialEq,
    {
        self.iterate().any(|item| item == *target)
    }

    /// [`contains_element`](Sequence::contains_element) under a
    /// caller-supplied equality.
    fn contains_element_with<F>(&self, target: &Self::Item, equality: F) -> bool
    where
        F: Fn(&Self::Item, &Self::Item) -> bool,
    {
        self.iterate().any(|item| equality(&item, target))
    }

    /// Returns whether both sequences yield equal elements in the same
    /// order and have the same length.
    fn sequence_equal<S2>(&self, other: &S2) -> bool
    where
        Self::Item: PartialEq,
        S2: Sequence<Item = Self::Item>,
    {
        self.sequence_equal_with(other, |left, right| left == right)
    }

    /// [`sequence_equal`](Sequence::sequence_equal) under a caller-supplied
    /// equality.
    fn sequence_equal_with<S2, F>(&self, other: &S2, equality: F) -> bool
    where
        S2: Sequence<Item = Self::Item>,
        F: Fn(&Self::Item, &Self::Item) -> bool,
    {
        let mut left = self.iterate();
        let mut right = other.iterate();
        loop {
            match (left.next(), right.next()) {
                (None, None) => return true,
                (Some(first), Some(second)) if equality(&first, &second) => {}
                _ => return false,
            }
        }
    }

    // =========================================================================
    // Element terminals
    // =========================================================================

    /// The element at `index`.
    ///
    /// # Errors
    ///
    /// `IndexOutOfBounds`; positional access has no defaulting sibling.
    fn element_at(&self, index: usize) -> Result<Self::Item, QueryError> {
        self.iterate()
            .nth(index)
            .ok_or(QueryError::IndexOutOfBounds { index })
    }

    /// The first element.
    ///
    /// # Errors
    ///
    /// `NoElements` when the sequence is empty.
    fn first(&self) -> Result<Self::Item, QueryError> {
        self.iterate().next().ok_or(QueryError::NoElements)
    }

    /// The first element satisfying `predicate`.
    ///
    /// # Errors
    ///
    /// `NoMatchingElement` when nothing matches.
    fn first_by<P>(&self, predicate: P) -> Result<Self::Item, QueryError>
    where
        P: Fn(&Self::Item) -> bool,
    {
        self.iterate()
            .find(|item| predicate(item))
            .ok_or(QueryError::NoMatchingElement)
    }

    /// The first element, or `default` for an empty sequence.
    fn first_or(&self, default: Self::Item) -> Self::Item {
        self.iterate().next().unwrap_or(default)
    }

    /// The first element satisfying `predicate`, or `default`.
    fn first_by_or<P>(&self, predicate: P, default: Self::Item) -> Self::Item
    where
        P: Fn(&Self::Item) -> bool,
    {
        self.iterate().find(|item| predicate(item)).unwrap_or(default)
    }

    /// The last element.
    ///
    /// # Errors
    ///
    /// `NoElements` when the sequence is empty.
    fn last(&self) -> Result<Self::Item, QueryError> {
        self.iterate().last().ok_or(QueryError::NoElements)
    }

    /// The last element satisfying `predicate`.
    ///
    /// # Errors
    ///
    /// `NoMatchingElement` when nothing matches.
    fn last_by<P>(&self, predicate: P) -> Result<Self::Item, QueryError>
    where
        P: Fn(&Self::Item) -> bool,
    {
        self.iterate()
            .filter(|item| predicate(item))
            .last()
            .ok_or(QueryError::NoMatchingElement)
    }

    /// The last element, or `default` for an empty sequence.
    fn last_or(&self, default: Self::Item) -> Self::Item {
        self.iterate().last().unwrap_or(default)
    }

    /// The last element satisfying `predicate`, or `default`.
    fn last_by_or<P>(&self, predicate: P, default: Self::Item) -> Self::Item
    where
        P: Fn(&Self::Item) -> bool,
    {
        self.iterate()
            .filter(|item| predicate(item))
            .last()
            .unwrap_or(default)
    }

    /// The only element.
    ///
    /// # Errors
    ///
    /// `NoElements` for an empty sequence, `MoreThanOneElement` when a
    /// second element exists.
    fn single(&self) -> Result<Self::Item, QueryError> {
        let mut cursor = self.iterate();
        match (cursor.next(), cursor.next()) {
            (None, _) => Err(QueryError::NoElements),
            (Some(item), None) => Ok(item),
            (Some(_), Some(_)) => Err(QueryError::MoreThanOneElement),
        }
    }

    /// The only element satisfying `predicate`.
    ///
    /// # Errors
    ///
    /// `NoMatchingElement` when nothing matches,
    /// `MoreThanOneMatchingElement` when more than one does.
    fn single_by<P>(&self, predicate: P) -> Result<Self::Item, QueryError>
    where
        P: Fn(&Self::Item) -> bool,
    {
        let mut matches = self.iterate().filter(|item| predicate(item));
        match (matches.next(), matches.next()) {
            (None, _) => Err(QueryError::NoMatchingElement),
            (Some(item), None) => Ok(item),
            (Some(_), Some(_)) => Err(QueryError::MoreThanOneMatchingElement),
        }
    }

    /// The only element, or `default` on any failure condition of
    /// [`single`](Sequence::single).
    fn single_or(&self, default: Self::Item) -> Self::Item {
        self.single().unwrap_or(default)
    }

    /// The only element satisfying `predicate`, or `default` on any failure
    /// condition of [`single_by`](Sequence::single_by).
    fn single_by_or<P>(&self, predicate: P, default: Self::Item) -> Self::Item
    where
        P: Fn(&Self::Item) -> bool,
    {
        self.single_by(predicate).unwrap_or(default)
    }

    // =========================================================================
    // Aggregation
    // =========================================================================

    /// Folds the sequence with its first element as the seed.
    ///
    /// # Errors
    ///
    /// `NoElements` when the sequence is empty.
    fn aggregate<F>(&self, accumulator: F) -> Result<Self::Item, QueryError>
    where
        F: Fn(Self::Item, Self::Item) -> Self::Item,
    {
        let mut cursor = self.iterate();
        let seed = cursor.next().ok_or(QueryError::NoElements)?;
        Ok(cursor.fold(seed, accumulator))
    }

    /// Folds the sequence from `seed`; an empty sequence returns the seed
    /// unchanged.
    fn aggregate_seed<A, F>(&self, seed: A, accumulator: F) -> A
    where
        F: Fn(A, Self::Item) -> A,
    {
        self.iterate().fold(seed, accumulator)
    }

    /// Folds from `seed`, then post-processes the final accumulator through
    /// `selector`.
    fn aggregate_seed_select<A, F, R, G>(&self, seed: A, accumulator: F, selector: G) -> R
    where
        F: Fn(A, Self::Item) -> A,
        G: Fn(A) -> R,
    {
        selector(self.iterate().fold(seed, accumulator))
    }

    /// Sums the elements; an empty sequence yields the additive identity.
    fn sum(&self) -> Self::Item
    where
        Self::Item: std::iter::Sum<Self::Item>,
    {
        self.iterate().sum()
    }

    /// The smallest element.
    ///
    /// # Errors
    ///
    /// `NoElements` when the sequence is empty.
    fn min(&self) -> Result<Self::Item, QueryError>
    where
        Self::Item: Ord,
    {
        self.iterate().min().ok_or(QueryError::NoElements)
    }

    /// The smallest element under `comparator`.
    ///
    /// # Errors
    ///
    /// `NoElements` when the sequence is empty.
    fn min_with<F>(&self, comparator: F) -> Result<Self::Item, QueryError>
    where
        F: Fn(&Self::Item, &Self::Item) -> CmpOrdering,
    {
        self.iterate()
            .min_by(|left, right| comparator(left, right))
            .ok_or(QueryError::NoElements)
    }

    /// The largest element.
    ///
    /// # Errors
    ///
    /// `NoElements` when the sequence is empty.
    fn max(&self) -> Result<Self::Item, QueryError>
    where
        Self::Item: Ord,
    {
        self.iterate().max().ok_or(QueryError::NoElements)
    }

    /// The largest element under `comparator`.
    ///
    /// # Errors
    ///
    /// `NoElements` when the sequence is empty.
    fn max_with<F>(&self, comparator: F) -> Result<Self::Item, QueryError>
    where
        F: Fn(&Self::Item, &Self::Item) -> CmpOrdering,
    {
        self.iterate()
            .max_by(|left, right| comparator(left, right))
            .ok_or(QueryError::NoElements)
    }

    /// The arithmetic mean of the elements.
    ///
    /// # Errors
    ///
    /// `NoElements` when the sequence is empty.
    fn average(&self) -> Result<f64, QueryError>
    where
        Self::Item: Into<f64>,
    {
        let mut count = 0usize;
        let mut total = 0f64;
        for item in self.iterate() {
            total += item.into();
            count += 1;
        }
        if count == 0 {
            Err(QueryError::NoElements)
        } else {
            Ok(total / count as f64)
        }
    }

    // =========================================================================
    // Conversion terminals: consume the lazy contract to completion, in
    // iteration order, exactly once.
    // =========================================================================

    /// Materializes one enumeration into a `Vec`.
    fn to_vec(&self) -> Vec<Self::Item> {
        self.iterate().collect()
    }

    /// Materializes into a [`SortedSet`], dropping duplicates.
    fn to_sorted_set(&self) -> SortedSet<Self::Item>
    where
        Self::Item: Ord,
    {
        let mut set = SortedSet::new();
        for item in self.iterate() {
            set.insert(item);
        }
        set
    }

    /// Materializes into a [`SortedSet`] ordered by `comparator`.
    fn to_sorted_set_with<C>(&self, comparator: C) -> SortedSet<Self::Item, C>
    where
        C: Comparator<Self::Item>,
    {
        let mut set = SortedSet::with_comparator(comparator);
        for item in self.iterate() {
            set.insert(item);
        }
        set
    }

    /// Materializes into a [`SortedMap`] keyed and valued by the selectors.
    ///
    /// # Errors
    ///
    /// `KeyAlreadyAdded` when two elements produce equal keys.
    fn to_sorted_map<K, V, FK, FV>(
        &self,
        key_selector: FK,
        value_selector: FV,
    ) -> Result<SortedMap<K, V>, QueryError>
    where
        K: Ord,
        FK: Fn(&Self::Item) -> K,
        FV: Fn(&Self::Item) -> V,
    {
        let mut map = SortedMap::new();
        for item in self.iterate() {
            map.try_insert(key_selector(&item), value_selector(&item))?;
        }
        Ok(map)
    }

    /// Materializes into a [`Lookup`] keyed by `selector`, in a single
    /// pass, groups in first-key-encounter order.
    fn to_lookup<K, F>(&self, selector: F) -> Lookup<K, Self::Item>
    where
        F: Fn(&Self::Item) -> K,
        K: PartialEq + 'static,
    {
        let groups = grouping::collect_groups(self.iterate(), &selector, &Natural);
        Lookup::from_groups(groups, Box::new(|left: &K, right: &K| left == right))
    }

    /// [`to_lookup`](Sequence::to_lookup) under a caller-supplied key
    /// equality.
    fn to_lookup_with<K, F, E>(&self, selector: F, equality: E) -> Lookup<K, Self::Item>
    where
        F: Fn(&Self::Item) -> K,
        E: Fn(&K, &K) -> bool + 'static,
        K: 'static,
    {
        let groups = {
            let adapter = equality_fn(&equality);
            grouping::collect_groups(self.iterate(), &selector, &adapter)
        };
        Lookup::from_groups(groups, Box::new(equality))
    }
}

// =============================================================================
// Sources
// =============================================================================

impl<S: Sequence + ?Sized> Sequence for &S {
    type Item = S::Item;
    type Iter<'a>
        = S::Iter<'a>
    where
        Self: 'a;

    fn iterate(&self) -> Self::Iter<'_> {
        S::iterate(self)
    }
}

impl<T: Clone> Sequence for [T] {
    type Item = T;
    type Iter<'a>
        = std::iter::Cloned<std::slice::Iter<'a, T>>
    where
        Self: 'a;

    fn iterate(&self) -> Self::Iter<'_> {
        self.iter().cloned()
    }
}

impl<T: Clone, const N: usize> Sequence for [T; N] {
    type Item = T;
    type Iter<'a>
        = std::iter::Cloned<std::slice::Iter<'a, T>>
    where
        Self: 'a;

    fn iterate(&self) -> Self::Iter<'_> {
        self.iter().cloned()
    }
}

impl<T: Clone> Sequence for Vec<T> {
    type Item = T;
    type Iter<'a>
        = std::iter::Cloned<std::slice::Iter<'a, T>>
    where
        Self: 'a;

    fn iterate(&self) -> Self::Iter<'_> {
        self.iter().cloned()
    }
}

/// A conceptually unbounded source: element `i` is `producer(i)`.
///
/// Usable only beneath truncating operators such as
/// [`take`](Sequence::take) or [`take_while`](Sequence::take_while).
///
/// # Examples
///
/// ```rust
/// use riffle::sequence::{generate, Sequence};
///
/// let squares = generate(|index| index * index);
/// assert_eq!(squares.take(4).to_vec(), vec![0, 1, 4, 9]);
/// ```
pub fn generate<T, F>(producer: F) -> Generate<F>
where
    F: Fn(usize) -> T,
{
    Generate { producer }
}

/// The sequence returned by [`generate`].
#[derive(Debug, Clone)]
pub struct Generate<F> {
    producer: F,
}

impl<T, F: Fn(usize) -> T> Sequence for Generate<F> {
    type Item = T;
    type Iter<'a>
        = GenerateIter<'a, F>
    where
        Self: 'a;

    fn iterate(&self) -> Self::Iter<'_> {
        GenerateIter {
            producer: &self.producer,
            index: 0,
        }
    }
}

/// Pull cursor over a [`Generate`] source.
pub struct GenerateIter<'a, F> {
    producer: &'a F,
    index: usize,
}

impl<T, F: Fn(usize) -> T> Iterator for GenerateIter<'_, F> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        let value = (self.producer)(self.index);
        self.index += 1;
        Some(value)
    }
}
