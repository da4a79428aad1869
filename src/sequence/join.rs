//! Key-correlated pairing of two sequences.
//!
//! All three shapes share one evaluation plan: the inner sequence buffers
//! on the first pull of an enumeration, then the outer streams one element
//! at a time against that buffer. They differ only in cardinality:
//! [`Join`] emits one result per matching pair and drops matchless outer
//! elements, [`LeftJoin`] additionally emits a single `None`-paired result
//! for each matchless outer element, and [`GroupJoin`] emits exactly one
//! result per outer element carrying all of its matches at once.

use crate::compare::{EqualityComparator, Natural};
use crate::sequence::Sequence;

// =============================================================================
// Join
// =============================================================================

/// Sequence returned by [`join`](Sequence::join) and
/// [`join_with`](Sequence::join_with).
#[derive(Debug, Clone)]
pub struct Join<S, S2, FO, FI, R, E = Natural> {
    outer: S,
    inner: S2,
    outer_key: FO,
    inner_key: FI,
    result: R,
    equality: E,
}

impl<S, S2, FO, FI, R, E> Join<S, S2, FO, FI, R, E> {
    pub(crate) fn new(
        outer: S,
        inner: S2,
        outer_key: FO,
        inner_key: FI,
        result: R,
        equality: E,
    ) -> Self {
        Self {
            outer,
            inner,
            outer_key,
            inner_key,
            result,
            equality,
        }
    }
}

impl<S, S2, FO, FI, K, R, Out, E> Sequence for Join<S, S2, FO, FI, R, E>
where
    S: Sequence,
    S::Item: Clone,
    S2: Sequence,
    S2::Item: Clone,
    FO: Fn(&S::Item) -> K,
    FI: Fn(&S2::Item) -> K,
    R: Fn(S::Item, S2::Item) -> Out,
    E: EqualityComparator<K>,
{
    type Item = Out;
    type Iter<'a>
        = JoinIter<'a, S, S2, FO, FI, K, R, E>
    where
        Self: 'a;

    fn iterate(&self) -> Self::Iter<'_> {
        JoinIter {
            outer: self.outer.iterate(),
            inner: &self.inner,
            buffer: None,
            outer_key: &self.outer_key,
            inner_key: &self.inner_key,
            result: &self.result,
            equality: &self.equality,
            current: None,
            position: 0,
        }
    }
}

/// Pull cursor for [`Join`]: holds the outer element under scan and the
/// resume position inside the inner buffer.
pub struct JoinIter<'a, S: Sequence + 'a, S2: Sequence + 'a, FO, FI, K, R, E> {
    outer: S::Iter<'a>,
    inner: &'a S2,
    buffer: Option<Vec<S2::Item>>,
    outer_key: &'a FO,
    inner_key: &'a FI,
    result: &'a R,
    equality: &'a E,
    current: Option<(S::Item, K)>,
    position: usize,
}

impl<'a, S, S2, FO, FI, K, R, Out, E> Iterator for JoinIter<'a, S, S2, FO, FI, K, R, E>
where
    S: Sequence,
    S::Item: Clone,
    S2: Sequence,
    S2::Item: Clone,
    FO: Fn(&S::Item) -> K,
    FI: Fn(&S2::Item) -> K,
    R: Fn(S::Item, S2::Item) -> Out,
    E: EqualityComparator<K>,
{
    type Item = Out;

    fn next(&mut self) -> Option<Out> {
        let inner = self.inner;
        let buffer = self.buffer.get_or_insert_with(|| inner.iterate().collect());
        loop {
            if self.current.is_none() {
                let item = self.outer.next()?;
                let key = (self.outer_key)(&item);
                self.current = Some((item, key));
                self.position = 0;
            }
            let (item, key) = self.current.as_ref()?;
            while self.position < buffer.len() {
                let candidate = &buffer[self.position];
                self.position += 1;
                if self.equality.equals(key, &(self.inner_key)(candidate)) {
                    return Some((self.result)(item.clone(), candidate.clone()));
                }
            }
            self.current = None;
        }
    }
}

// =============================================================================
// LeftJoin
// =============================================================================

/// Sequence returned by [`left_join`](Sequence::left_join) and
/// [`left_join_with`](Sequence::left_join_with).
#[derive(Debug, Clone)]
pub struct LeftJoin<S, S2, FO, FI, R, E = Natural> {
    outer: S,
    inner: S2,
    outer_key: FO,
    inner_key: FI,
    result: R,
    equality: E,
}

impl<S, S2, FO, FI, R, E> LeftJoin<S, S2, FO, FI, R, E> {
    pub(crate) fn new(
        outer: S,
        inner: S2,
        outer_key: FO,
        inner_key: FI,
        result: R,
        equality: E,
    ) -> Self {
        Self {
            outer,
            inner,
            outer_key,
            inner_key,
            result,
            equality,
        }
    }
}

impl<S, S2, FO, FI, K, R, Out, E> Sequence for LeftJoin<S, S2, FO, FI, R, E>
where
    S: Sequence,
    S::Item: Clone,
    S2: Sequence,
    S2::Item: Clone,
    FO: Fn(&S::Item) -> K,
    FI: Fn(&S2::Item) -> K,
    R: Fn(S::Item, Option<S2::Item>) -> Out,
    E: EqualityComparator<K>,
{
    type Item = Out;
    type Iter<'a>
        = LeftJoinIter<'a, S, S2, FO, FI, K, R, E>
    where
        Self: 'a;

    fn iterate(&self) -> Self::Iter<'_> {
        LeftJoinIter {
            outer: self.outer.iterate(),
            inner: &self.inner,
            buffer: None,
            outer_key: &self.outer_key,
            inner_key: &self.inner_key,
            result: &self.result,
            equality: &self.equality,
            current: None,
            position: 0,
            matched: false,
        }
    }
}

/// Pull cursor for [`LeftJoin`]: tracks whether the outer element under
/// scan has matched yet, so a matchless one still emits once.
pub struct LeftJoinIter<'a, S: Sequence + 'a, S2: Sequence + 'a, FO, FI, K, R, E> {
    outer: S::Iter<'a>,
    inner: &'a S2,
    buffer: Option<Vec<S2::Item>>,
    outer_key: &'a FO,
    inner_key: &'a FI,
    result: &'a R,
    equality: &'a E,
    current: Option<(S::Item, K)>,
    position: usize,
    matched: bool,
}

impl<'a, S, S2, FO, FI, K, R, Out, E> Iterator for LeftJoinIter<'a, S, S2, FO, FI, K, R, E>
where
    S: Sequence,
    S::Item: Clone,
    S2: Sequence,
    S2::Item: Clone,
    FO: Fn(&S::Item) -> K,
    FI: Fn(&S2::Item) -> K,
    R: Fn(S::Item, Option<S2::Item>) -> Out,
    E: EqualityComparator<K>,
{
    type Item = Out;

    fn next(&mut self) -> Option<Out> {
        let inner = self.inner;
        let buffer = self.buffer.get_or_insert_with(|| inner.iterate().collect());
        loop {
            if self.current.is_none() {
                let item = self.outer.next()?;
                let key = (self.outer_key)(&item);
                self.current = Some((item, key));
                self.position = 0;
                self.matched = false;
            }
            {
                let (item, key) = self.current.as_ref()?;
                while self.position < buffer.len() {
                    let candidate = &buffer[self.position];
                    self.position += 1;
                    if self.equality.equals(key, &(self.inner_key)(candidate)) {
                        self.matched = true;
                        return Some((self.result)(item.clone(), Some(candidate.clone())));
                    }
                }
            }
            if let Some((item, _)) = self.current.take() {
                if !self.matched {
                    return Some((self.result)(item, None));
                }
            }
        }
    }
}

// =============================================================================
// GroupJoin
// =============================================================================

/// Sequence returned by [`group_join`](Sequence::group_join).
#[derive(Debug, Clone)]
pub struct GroupJoin<S, S2, FO, FI, R, E = Natural> {
    outer: S,
    inner: S2,
    outer_key: FO,
    inner_key: FI,
    result: R,
    equality: E,
}

impl<S, S2, FO, FI, R, E> GroupJoin<S, S2, FO, FI, R, E> {
    pub(crate) fn new(
        outer: S,
        inner: S2,
        outer_key: FO,
        inner_key: FI,
        result: R,
        equality: E,
    ) -> Self {
        Self {
            outer,
            inner,
            outer_key,
            inner_key,
            result,
            equality,
        }
    }
}

impl<S, S2, FO, FI, K, R, Out, E> Sequence for GroupJoin<S, S2, FO, FI, R, E>
where
    S: Sequence,
    S2: Sequence,
    S2::Item: Clone,
    FO: Fn(&S::Item) -> K,
    FI: Fn(&S2::Item) -> K,
    R: Fn(S::Item, Vec<S2::Item>) -> Out,
    E: EqualityComparator<K>,
{
    type Item = Out;
    type Iter<'a>
        = GroupJoinIter<'a, S, S2, FO, FI, R, E>
    where
        Self: 'a;

    fn iterate(&self) -> Self::Iter<'_> {
        GroupJoinIter {
            outer: self.outer.iterate(),
            inner: &self.inner,
            buffer: None,
            outer_key: &self.outer_key,
            inner_key: &self.inner_key,
            result: &self.result,
            equality: &self.equality,
        }
    }
}

/// Pull cursor for [`GroupJoin`]: one upstream pull yields one result.
pub struct GroupJoinIter<'a, S: Sequence + 'a, S2: Sequence + 'a, FO, FI, R, E> {
    outer: S::Iter<'a>,
    inner: &'a S2,
    buffer: Option<Vec<S2::Item>>,
    outer_key: &'a FO,
    inner_key: &'a FI,
    result: &'a R,
    equality: &'a E,
}

impl<'a, S, S2, FO, FI, K, R, Out, E> Iterator for GroupJoinIter<'a, S, S2, FO, FI, R, E>
where
    S: Sequence,
    S2: Sequence,
    S2::Item: Clone,
    FO: Fn(&S::Item) -> K,
    FI: Fn(&S2::Item) -> K,
    R: Fn(S::Item, Vec<S2::Item>) -> Out,
    E: EqualityComparator<K>,
{
    type Item = Out;

    fn next(&mut self) -> Option<Out> {
        let inner = self.inner;
        let buffer = self.buffer.get_or_insert_with(|| inner.iterate().collect());
        let item = self.outer.next()?;
        let key = (self.outer_key)(&item);
        let matches: Vec<S2::Item> = buffer
            .iter()
            .filter(|candidate| self.equality.equals(&key, &(self.inner_key)(candidate)))
            .cloned()
            .collect();
        Some((self.result)(item, matches))
    }
}
