//! Set algebra over sequences: `distinct`, `union`, `intersect`, `except`.
//!
//! Each operator exists in up to three renditions sharing one semantics:
//! the structural default ([`Natural`] equality), a caller-supplied
//! pairwise equality, and, for `intersect`/`except`, an order-comparator
//! overload that sorts the second operand once and resolves membership by
//! binary search. The renditions differ only in complexity, never in the
//! elements produced.
//!
//! Membership filters do not deduplicate their first operand; `distinct`
//! and `union` keep the first occurrence per key and preserve encounter
//! order. The second operand of a membership filter buffers lazily on the
//! first pull of each enumeration.

use crate::compare::{Comparator, EqualityComparator, Natural};
use crate::sequence::Sequence;

// =============================================================================
// Distinct
// =============================================================================

/// Sequence returned by [`distinct`](Sequence::distinct) and
/// [`distinct_with`](Sequence::distinct_with).
#[derive(Debug, Clone)]
pub struct Distinct<S, E = Natural> {
    source: S,
    equality: E,
}

impl<S, E> Distinct<S, E> {
    pub(crate) fn new(source: S, equality: E) -> Self {
        Self { source, equality }
    }
}

impl<S, E> Sequence for Distinct<S, E>
where
    S: Sequence,
    S::Item: Clone,
    E: EqualityComparator<S::Item>,
{
    type Item = S::Item;
    type Iter<'a>
        = DistinctIter<'a, S, E>
    where
        Self: 'a;

    fn iterate(&self) -> Self::Iter<'_> {
        DistinctIter {
            source: self.source.iterate(),
            equality: &self.equality,
            seen: Vec::new(),
        }
    }
}

/// Pull cursor for [`Distinct`].
pub struct DistinctIter<'a, S: Sequence + 'a, E> {
    source: S::Iter<'a>,
    equality: &'a E,
    seen: Vec<S::Item>,
}

impl<'a, S, E> Iterator for DistinctIter<'a, S, E>
where
    S: Sequence,
    S::Item: Clone,
    E: EqualityComparator<S::Item>,
{
    type Item = S::Item;

    fn next(&mut self) -> Option<S::Item> {
        loop {
            let item = self.source.next()?;
            if !self
                .seen
                .iter()
                .any(|seen| self.equality.equals(seen, &item))
            {
                self.seen.push(item.clone());
                return Some(item);
            }
        }
    }
}

// =============================================================================
// DistinctBy
// =============================================================================

/// Sequence returned by [`distinct_by`](Sequence::distinct_by): first
/// element kept per selector-derived key.
#[derive(Debug, Clone)]
pub struct DistinctBy<S, F> {
    source: S,
    selector: F,
}

impl<S, F> DistinctBy<S, F> {
    pub(crate) fn new(source: S, selector: F) -> Self {
        Self { source, selector }
    }
}

impl<S, F, K> Sequence for DistinctBy<S, F>
where
    S: Sequence,
    F: Fn(&S::Item) -> K,
    K: PartialEq,
{
    type Item = S::Item;
    type Iter<'a>
        = DistinctByIter<'a, S, F, K>
    where
        Self: 'a;

    fn iterate(&self) -> Self::Iter<'_> {
        DistinctByIter {
            source: self.source.iterate(),
            selector: &self.selector,
            seen: Vec::new(),
        }
    }
}

/// Pull cursor for [`DistinctBy`].
pub struct DistinctByIter<'a, S: Sequence + 'a, F, K> {
    source: S::Iter<'a>,
    selector: &'a F,
    seen: Vec<K>,
}

impl<'a, S, F, K> Iterator for DistinctByIter<'a, S, F, K>
where
    S: Sequence,
    F: Fn(&S::Item) -> K,
    K: PartialEq,
{
    type Item = S::Item;

    fn next(&mut self) -> Option<S::Item> {
        loop {
            let item = self.source.next()?;
            let key = (self.selector)(&item);
            if !self.seen.contains(&key) {
                self.seen.push(key);
                return Some(item);
            }
        }
    }
}

// =============================================================================
// Union
// =============================================================================

/// Sequence returned by [`union`](Sequence::union): concatenation followed
/// by [`distinct`](Sequence::distinct).
#[derive(Debug, Clone)]
pub struct Union<S, S2, E = Natural> {
    first: S,
    second: S2,
    equality: E,
}

impl<S, S2, E> Union<S, S2, E> {
    pub(crate) fn new(first: S, second: S2, equality: E) -> Self {
        Self {
            first,
            second,
            equality,
        }
    }
}

impl<S, S2, E> Sequence for Union<S, S2, E>
where
    S: Sequence,
    S::Item: Clone,
    S2: Sequence<Item = S::Item>,
    E: EqualityComparator<S::Item>,
{
    type Item = S::Item;
    type Iter<'a>
        = UnionIter<'a, S, S2, E>
    where
        Self: 'a;

    fn iterate(&self) -> Self::Iter<'_> {
        UnionIter {
            source: self.first.iterate().chain(self.second.iterate()),
            equality: &self.equality,
            seen: Vec::new(),
        }
    }
}

/// Pull cursor for [`Union`].
pub struct UnionIter<'a, S: Sequence + 'a, S2: Sequence<Item = S::Item> + 'a, E> {
    source: std::iter::Chain<S::Iter<'a>, S2::Iter<'a>>,
    equality: &'a E,
    seen: Vec<S::Item>,
}

impl<'a, S, S2, E> Iterator for UnionIter<'a, S, S2, E>
where
    S: Sequence,
    S::Item: Clone,
    S2: Sequence<Item = S::Item>,
    E: EqualityComparator<S::Item>,
{
    type Item = S::Item;

    fn next(&mut self) -> Option<S::Item> {
        loop {
            let item = self.source.next()?;
            if !self
                .seen
                .iter()
                .any(|seen| self.equality.equals(seen, &item))
            {
                self.seen.push(item.clone());
                return Some(item);
            }
        }
    }
}

// =============================================================================
// Intersect / Except (pairwise membership)
// =============================================================================

/// Sequence returned by [`intersect`](Sequence::intersect) and
/// [`intersect_with`](Sequence::intersect_with).
#[derive(Debug, Clone)]
pub struct Intersect<S, S2, E = Natural> {
    source: S,
    other: S2,
    equality: E,
}

impl<S, S2, E> Intersect<S, S2, E> {
    pub(crate) fn new(source: S, other: S2, equality: E) -> Self {
        Self {
            source,
            other,
            equality,
        }
    }
}

impl<S, S2, E> Sequence for Intersect<S, S2, E>
where
    S: Sequence,
    S2: Sequence<Item = S::Item>,
    E: EqualityComparator<S::Item>,
{
    type Item = S::Item;
    type Iter<'a>
        = MembershipIter<'a, S, S2, E>
    where
        Self: 'a;

    fn iterate(&self) -> Self::Iter<'_> {
        MembershipIter {
            source: self.source.iterate(),
            other: &self.other,
            buffer: None,
            equality: &self.equality,
            keep_members: true,
        }
    }
}

/// Sequence returned by [`except`](Sequence::except) and
/// [`except_with`](Sequence::except_with).
#[derive(Debug, Clone)]
pub struct Except<S, S2, E = Natural> {
    source: S,
    other: S2,
    equality: E,
}

impl<S, S2, E> Except<S, S2, E> {
    pub(crate) fn new(source: S, other: S2, equality: E) -> Self {
        Self {
            source,
            other,
            equality,
        }
    }
}

impl<S, S2, E> Sequence for Except<S, S2, E>
where
    S: Sequence,
    S2: Sequence<Item = S::Item>,
    E: EqualityComparator<S::Item>,
{
    type Item = S::Item;
    type Iter<'a>
        = MembershipIter<'a, S, S2, E>
    where
        Self: 'a;

    fn iterate(&self) -> Self::Iter<'_> {
        MembershipIter {
            source: self.source.iterate(),
            other: &self.other,
            buffer: None,
            equality: &self.equality,
            keep_members: false,
        }
    }
}

/// Shared pull cursor for pairwise [`Intersect`] and [`Except`]: the second
/// operand buffers on the first pull, then every upstream element is tested
/// against it.
pub struct MembershipIter<'a, S: Sequence + 'a, S2: Sequence<Item = S::Item> + 'a, E> {
    source: S::Iter<'a>,
    other: &'a S2,
    buffer: Option<Vec<S::Item>>,
    equality: &'a E,
    keep_members: bool,
}

impl<'a, S, S2, E> Iterator for MembershipIter<'a, S, S2, E>
where
    S: Sequence,
    S2: Sequence<Item = S::Item>,
    E: EqualityComparator<S::Item>,
{
    type Item = S::Item;

    fn next(&mut self) -> Option<S::Item> {
        let other = self.other;
        let buffer = self
            .buffer
            .get_or_insert_with(|| other.iterate().collect());
        loop {
            let item = self.source.next()?;
            let member = buffer
                .iter()
                .any(|candidate| self.equality.equals(candidate, &item));
            if member == self.keep_members {
                return Some(item);
            }
        }
    }
}

// =============================================================================
// Intersect / Except (merge-based membership)
// =============================================================================

/// Sequence returned by
/// [`intersect_ordered`](Sequence::intersect_ordered).
#[derive(Debug, Clone)]
pub struct IntersectOrdered<S, S2, C = Natural> {
    source: S,
    other: S2,
    comparator: C,
}

impl<S, S2, C> IntersectOrdered<S, S2, C> {
    pub(crate) fn new(source: S, other: S2, comparator: C) -> Self {
        Self {
            source,
            other,
            comparator,
        }
    }
}

impl<S, S2, C> Sequence for IntersectOrdered<S, S2, C>
where
    S: Sequence,
    S2: Sequence<Item = S::Item>,
    C: Comparator<S::Item>,
{
    type Item = S::Item;
    type Iter<'a>
        = SortedMembershipIter<'a, S, S2, C>
    where
        Self: 'a;

    fn iterate(&self) -> Self::Iter<'_> {
        SortedMembershipIter {
            source: self.source.iterate(),
            other: &self.other,
            buffer: None,
            comparator: &self.comparator,
            keep_members: true,
        }
    }
}

/// Sequence returned by [`except_ordered`](Sequence::except_ordered).
#[derive(Debug, Clone)]
pub struct ExceptOrdered<S, S2, C = Natural> {
    source: S,
    other: S2,
    comparator: C,
}

impl<S, S2, C> ExceptOrdered<S, S2, C> {
    pub(crate) fn new(source: S, other: S2, comparator: C) -> Self {
        Self {
            source,
            other,
            comparator,
        }
    }
}

impl<S, S2, C> Sequence for ExceptOrdered<S, S2, C>
where
    S: Sequence,
    S2: Sequence<Item = S::Item>,
    C: Comparator<S::Item>,
{
    type Item = S::Item;
    type Iter<'a>
        = SortedMembershipIter<'a, S, S2, C>
    where
        Self: 'a;

    fn iterate(&self) -> Self::Iter<'_> {
        SortedMembershipIter {
            source: self.source.iterate(),
            other: &self.other,
            buffer: None,
            comparator: &self.comparator,
            keep_members: false,
        }
    }
}

/// Shared pull cursor for the order-comparator renditions: the second
/// operand is collected and sorted once per enumeration, and membership
/// resolves by binary search.
pub struct SortedMembershipIter<'a, S: Sequence + 'a, S2: Sequence<Item = S::Item> + 'a, C> {
    source: S::Iter<'a>,
    other: &'a S2,
    buffer: Option<Vec<S::Item>>,
    comparator: &'a C,
    keep_members: bool,
}

impl<'a, S, S2, C> Iterator for SortedMembershipIter<'a, S, S2, C>
where
    S: Sequence,
    S2: Sequence<Item = S::Item>,
    C: Comparator<S::Item>,
{
    type Item = S::Item;

    fn next(&mut self) -> Option<S::Item> {
        let other = self.other;
        let comparator = self.comparator;
        let buffer = self.buffer.get_or_insert_with(|| {
            let mut items: Vec<S::Item> = other.iterate().collect();
            items.sort_by(|left, right| comparator.compare(left, right));
            items
        });
        loop {
            let item = self.source.next()?;
            let member = buffer
                .binary_search_by(|candidate| comparator.compare(candidate, &item))
                .is_ok();
            if member == self.keep_members {
                return Some(item);
            }
        }
    }
}
