//! Streaming operator adapters: restriction, projection, partitioning, and
//! combination.
//!
//! Each adapter owns its upstream sequence plus the caller's closures and
//! implements [`Sequence`] by handing out a pull cursor that borrows both.
//! Construction never pulls an element; cursors advance their upstream one
//! element per request, so short-circuiting consumers stop the whole chain.

use std::collections::VecDeque;

use crate::sequence::Sequence;

// =============================================================================
// Filter
// =============================================================================

/// Sequence returned by [`filter`](Sequence::filter).
#[derive(Debug, Clone)]
pub struct Filter<S, P> {
    source: S,
    predicate: P,
}

impl<S, P> Filter<S, P> {
    pub(crate) fn new(source: S, predicate: P) -> Self {
        Self { source, predicate }
    }
}

impl<S, P> Sequence for Filter<S, P>
where
    S: Sequence,
    P: Fn(&S::Item) -> bool,
{
    type Item = S::Item;
    type Iter<'a>
        = FilterIter<'a, S, P>
    where
        Self: 'a;

    fn iterate(&self) -> Self::Iter<'_> {
        FilterIter {
            source: self.source.iterate(),
            predicate: &self.predicate,
        }
    }
}

/// Pull cursor for [`Filter`].
pub struct FilterIter<'a, S: Sequence + 'a, P> {
    source: S::Iter<'a>,
    predicate: &'a P,
}

impl<'a, S, P> Iterator for FilterIter<'a, S, P>
where
    S: Sequence,
    P: Fn(&S::Item) -> bool,
{
    type Item = S::Item;

    fn next(&mut self) -> Option<S::Item> {
        loop {
            let item = self.source.next()?;
            if (self.predicate)(&item) {
                return Some(item);
            }
        }
    }
}

// =============================================================================
// Select
// =============================================================================

/// Sequence returned by [`select`](Sequence::select).
#[derive(Debug, Clone)]
pub struct Select<S, F> {
    source: S,
    selector: F,
}

impl<S, F> Select<S, F> {
    pub(crate) fn new(source: S, selector: F) -> Self {
        Self { source, selector }
    }
}

impl<S, F, R> Sequence for Select<S, F>
where
    S: Sequence,
    F: Fn(S::Item) -> R,
{
    type Item = R;
    type Iter<'a>
        = SelectIter<'a, S, F>
    where
        Self: 'a;

    fn iterate(&self) -> Self::Iter<'_> {
        SelectIter {
            source: self.source.iterate(),
            selector: &self.selector,
        }
    }
}

/// Pull cursor for [`Select`].
pub struct SelectIter<'a, S: Sequence + 'a, F> {
    source: S::Iter<'a>,
    selector: &'a F,
}

impl<'a, S, F, R> Iterator for SelectIter<'a, S, F>
where
    S: Sequence,
    F: Fn(S::Item) -> R,
{
    type Item = R;

    fn next(&mut self) -> Option<R> {
        self.source.next().map(self.selector)
    }
}

// =============================================================================
// SelectMany
// =============================================================================

/// Sequence returned by [`select_many`](Sequence::select_many).
#[derive(Debug, Clone)]
pub struct SelectMany<S, F> {
    source: S,
    selector: F,
}

impl<S, F> SelectMany<S, F> {
    pub(crate) fn new(source: S, selector: F) -> Self {
        Self { source, selector }
    }
}

impl<S, F, I> Sequence for SelectMany<S, F>
where
    S: Sequence,
    F: Fn(S::Item) -> I,
    I: IntoIterator,
{
    type Item = I::Item;
    type Iter<'a>
        = SelectManyIter<'a, S, F, I>
    where
        Self: 'a;

    fn iterate(&self) -> Self::Iter<'_> {
        SelectManyIter {
            source: self.source.iterate(),
            selector: &self.selector,
            current: None,
        }
    }
}

/// Pull cursor for [`SelectMany`].
pub struct SelectManyIter<'a, S: Sequence + 'a, F, I: IntoIterator> {
    source: S::Iter<'a>,
    selector: &'a F,
    current: Option<I::IntoIter>,
}

impl<'a, S, F, I> Iterator for SelectManyIter<'a, S, F, I>
where
    S: Sequence,
    F: Fn(S::Item) -> I,
    I: IntoIterator,
{
    type Item = I::Item;

    fn next(&mut self) -> Option<I::Item> {
        loop {
            if let Some(inner) = &mut self.current {
                if let Some(item) = inner.next() {
                    return Some(item);
                }
                self.current = None;
            }
            let outer = self.source.next()?;
            self.current = Some((self.selector)(outer).into_iter());
        }
    }
}

// =============================================================================
// Skip / Take
// =============================================================================

/// Sequence returned by [`skip`](Sequence::skip).
#[derive(Debug, Clone)]
pub struct Skip<S> {
    source: S,
    count: usize,
}

impl<S> Skip<S> {
    pub(crate) fn new(source: S, count: usize) -> Self {
        Self { source, count }
    }
}

impl<S: Sequence> Sequence for Skip<S> {
    type Item = S::Item;
    type Iter<'a>
        = SkipIter<'a, S>
    where
        Self: 'a;

    fn iterate(&self) -> Self::Iter<'_> {
        SkipIter {
            source: self.source.iterate(),
            remaining: self.count,
        }
    }
}

/// Pull cursor for [`Skip`].
pub struct SkipIter<'a, S: Sequence + 'a> {
    source: S::Iter<'a>,
    remaining: usize,
}

impl<'a, S: Sequence> Iterator for SkipIter<'a, S> {
    type Item = S::Item;

    fn next(&mut self) -> Option<S::Item> {
        while self.remaining > 0 {
            self.source.next()?;
            self.remaining -= 1;
        }
        self.source.next()
    }
}

/// Sequence returned by [`take`](Sequence::take).
#[derive(Debug, Clone)]
pub struct Take<S> {
    source: S,
    count: usize,
}

impl<S> Take<S> {
    pub(crate) fn new(source: S, count: usize) -> Self {
        Self { source, count }
    }
}

impl<S: Sequence> Sequence for Take<S> {
    type Item = S::Item;
    type Iter<'a>
        = TakeIter<'a, S>
    where
        Self: 'a;

    fn iterate(&self) -> Self::Iter<'_> {
        TakeIter {
            source: self.source.iterate(),
            remaining: self.count,
        }
    }
}

/// Pull cursor for [`Take`].
pub struct TakeIter<'a, S: Sequence + 'a> {
    source: S::Iter<'a>,
    remaining: usize,
}

impl<'a, S: Sequence> Iterator for TakeIter<'a, S> {
    type Item = S::Item;

    fn next(&mut self) -> Option<S::Item> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        self.source.next()
    }
}

// =============================================================================
// SkipLast / TakeLast
// =============================================================================

/// Sequence returned by [`skip_last`](Sequence::skip_last).
#[derive(Debug, Clone)]
pub struct SkipLast<S> {
    source: S,
    count: usize,
}

impl<S> SkipLast<S> {
    pub(crate) fn new(source: S, count: usize) -> Self {
        Self { source, count }
    }
}

impl<S: Sequence> Sequence for SkipLast<S> {
    type Item = S::Item;
    type Iter<'a>
        = SkipLastIter<'a, S>
    where
        Self: 'a;

    fn iterate(&self) -> Self::Iter<'_> {
        SkipLastIter {
            source: self.source.iterate(),
            count: self.count,
            buffer: VecDeque::new(),
        }
    }
}

/// Pull cursor for [`SkipLast`]: yields elements `count` positions behind
/// the upstream cursor, so the trailing `count` never surface.
pub struct SkipLastIter<'a, S: Sequence + 'a> {
    source: S::Iter<'a>,
    count: usize,
    buffer: VecDeque<S::Item>,
}

impl<'a, S: Sequence> Iterator for SkipLastIter<'a, S> {
    type Item = S::Item;

    fn next(&mut self) -> Option<S::Item> {
        loop {
            let item = self.source.next()?;
            self.buffer.push_back(item);
            if self.buffer.len() > self.count {
                return self.buffer.pop_front();
            }
        }
    }
}

/// Sequence returned by [`take_last`](Sequence::take_last).
#[derive(Debug, Clone)]
pub struct TakeLast<S> {
    source: S,
    count: usize,
}

impl<S> TakeLast<S> {
    pub(crate) fn new(source: S, count: usize) -> Self {
        Self { source, count }
    }
}

impl<S: Sequence> Sequence for TakeLast<S> {
    type Item = S::Item;
    type Iter<'a>
        = TakeLastIter<'a, S>
    where
        Self: 'a;

    fn iterate(&self) -> Self::Iter<'_> {
        TakeLastIter {
            source: &self.source,
            count: self.count,
            buffered: None,
        }
    }
}

/// Pull cursor for [`TakeLast`]: drains upstream on the first pull, keeping
/// a ring of the trailing `count` elements.
pub struct TakeLastIter<'a, S: Sequence + 'a> {
    source: &'a S,
    count: usize,
    buffered: Option<VecDeque<S::Item>>,
}

impl<'a, S: Sequence> Iterator for TakeLastIter<'a, S> {
    type Item = S::Item;

    fn next(&mut self) -> Option<S::Item> {
        let source = self.source;
        let count = self.count;
        self.buffered
            .get_or_insert_with(|| {
                let mut ring = VecDeque::new();
                if count == 0 {
                    return ring;
                }
                for item in source.iterate() {
                    ring.push_back(item);
                    if ring.len() > count {
                        ring.pop_front();
                    }
                }
                ring
            })
            .pop_front()
    }
}

// =============================================================================
// SkipWhile / TakeWhile
// =============================================================================

/// Sequence returned by [`skip_while`](Sequence::skip_while).
#[derive(Debug, Clone)]
pub struct SkipWhile<S, P> {
    source: S,
    predicate: P,
}

impl<S, P> SkipWhile<S, P> {
    pub(crate) fn new(source: S, predicate: P) -> Self {
        Self { source, predicate }
    }
}

impl<S, P> Sequence for SkipWhile<S, P>
where
    S: Sequence,
    P: Fn(&S::Item, usize) -> bool,
{
    type Item = S::Item;
    type Iter<'a>
        = SkipWhileIter<'a, S, P>
    where
        Self: 'a;

    fn iterate(&self) -> Self::Iter<'_> {
        SkipWhileIter {
            source: self.source.iterate(),
            predicate: &self.predicate,
            index: 0,
            skipping: true,
        }
    }
}

/// Pull cursor for [`SkipWhile`].
pub struct SkipWhileIter<'a, S: Sequence + 'a, P> {
    source: S::Iter<'a>,
    predicate: &'a P,
    index: usize,
    skipping: bool,
}

impl<'a, S, P> Iterator for SkipWhileIter<'a, S, P>
where
    S: Sequence,
    P: Fn(&S::Item, usize) -> bool,
{
    type Item = S::Item;

    fn next(&mut self) -> Option<S::Item> {
        if !self.skipping {
            return self.source.next();
        }
        loop {
            let item = self.source.next()?;
            let index = self.index;
            self.index += 1;
            if !(self.predicate)(&item, index) {
                self.skipping = false;
                return Some(item);
            }
        }
    }
}

/// Sequence returned by [`take_while`](Sequence::take_while).
#[derive(Debug, Clone)]
pub struct TakeWhile<S, P> {
    source: S,
    predicate: P,
}

impl<S, P> TakeWhile<S, P> {
    pub(crate) fn new(source: S, predicate: P) -> Self {
        Self { source, predicate }
    }
}

impl<S, P> Sequence for TakeWhile<S, P>
where
    S: Sequence,
    P: Fn(&S::Item, usize) -> bool,
{
    type Item = S::Item;
    type Iter<'a>
        = TakeWhileIter<'a, S, P>
    where
        Self: 'a;

    fn iterate(&self) -> Self::Iter<'_> {
        TakeWhileIter {
            source: self.source.iterate(),
            predicate: &self.predicate,
            index: 0,
            done: false,
        }
    }
}

/// Pull cursor for [`TakeWhile`]: stops pulling upstream the moment the
/// predicate fails.
pub struct TakeWhileIter<'a, S: Sequence + 'a, P> {
    source: S::Iter<'a>,
    predicate: &'a P,
    index: usize,
    done: bool,
}

impl<'a, S, P> Iterator for TakeWhileIter<'a, S, P>
where
    S: Sequence,
    P: Fn(&S::Item, usize) -> bool,
{
    type Item = S::Item;

    fn next(&mut self) -> Option<S::Item> {
        if self.done {
            return None;
        }
        let item = self.source.next()?;
        let index = self.index;
        self.index += 1;
        if (self.predicate)(&item, index) {
            Some(item)
        } else {
            self.done = true;
            None
        }
    }
}

// =============================================================================
// Chunk
// =============================================================================

/// Sequence returned by [`chunk`](Sequence::chunk). The size is validated
/// non-zero at construction.
#[derive(Debug, Clone)]
pub struct Chunk<S> {
    source: S,
    size: usize,
}

impl<S> Chunk<S> {
    pub(crate) fn new(source: S, size: usize) -> Self {
        Self { source, size }
    }
}

impl<S: Sequence> Sequence for Chunk<S> {
    type Item = Vec<S::Item>;
    type Iter<'a>
        = ChunkIter<'a, S>
    where
        Self: 'a;

    fn iterate(&self) -> Self::Iter<'_> {
        ChunkIter {
            source: self.source.iterate(),
            size: self.size,
        }
    }
}

/// Pull cursor for [`Chunk`].
pub struct ChunkIter<'a, S: Sequence + 'a> {
    source: S::Iter<'a>,
    size: usize,
}

impl<'a, S: Sequence> Iterator for ChunkIter<'a, S> {
    type Item = Vec<S::Item>;

    fn next(&mut self) -> Option<Vec<S::Item>> {
        let mut batch = Vec::new();
        for _ in 0..self.size {
            match self.source.next() {
                Some(item) => batch.push(item),
                None => break,
            }
        }
        if batch.is_empty() { None } else { Some(batch) }
    }
}

// =============================================================================
// Append / Prepend / Concat
// =============================================================================

/// Sequence returned by [`append`](Sequence::append).
#[derive(Debug, Clone)]
pub struct Append<S: Sequence> {
    source: S,
    value: S::Item,
}

impl<S: Sequence> Append<S> {
    pub(crate) fn new(source: S, value: S::Item) -> Self {
        Self { source, value }
    }
}

impl<S> Sequence for Append<S>
where
    S: Sequence,
    S::Item: Clone,
{
    type Item = S::Item;
    type Iter<'a>
        = std::iter::Chain<S::Iter<'a>, std::iter::Once<S::Item>>
    where
        Self: 'a;

    fn iterate(&self) -> Self::Iter<'_> {
        self.source.iterate().chain(std::iter::once(self.value.clone()))
    }
}

/// Sequence returned by [`prepend`](Sequence::prepend).
#[derive(Debug, Clone)]
pub struct Prepend<S: Sequence> {
    source: S,
    value: S::Item,
}

impl<S: Sequence> Prepend<S> {
    pub(crate) fn new(source: S, value: S::Item) -> Self {
        Self { source, value }
    }
}

impl<S> Sequence for Prepend<S>
where
    S: Sequence,
    S::Item: Clone,
{
    type Item = S::Item;
    type Iter<'a>
        = std::iter::Chain<std::iter::Once<S::Item>, S::Iter<'a>>
    where
        Self: 'a;

    fn iterate(&self) -> Self::Iter<'_> {
        std::iter::once(self.value.clone()).chain(self.source.iterate())
    }
}

/// Sequence returned by [`concat`](Sequence::concat).
#[derive(Debug, Clone)]
pub struct Concat<S, S2> {
    first: S,
    second: S2,
}

impl<S, S2> Concat<S, S2> {
    pub(crate) fn new(first: S, second: S2) -> Self {
        Self { first, second }
    }
}

impl<S, S2> Sequence for Concat<S, S2>
where
    S: Sequence,
    S2: Sequence<Item = S::Item>,
{
    type Item = S::Item;
    type Iter<'a>
        = std::iter::Chain<S::Iter<'a>, S2::Iter<'a>>
    where
        Self: 'a;

    fn iterate(&self) -> Self::Iter<'_> {
        self.first.iterate().chain(self.second.iterate())
    }
}

// =============================================================================
// Reverse
// =============================================================================

/// Sequence returned by [`reverse`](Sequence::reverse).
#[derive(Debug, Clone)]
pub struct Reverse<S> {
    source: S,
}

impl<S> Reverse<S> {
    pub(crate) fn new(source: S) -> Self {
        Self { source }
    }
}

impl<S: Sequence> Sequence for Reverse<S> {
    type Item = S::Item;
    type Iter<'a>
        = ReverseIter<'a, S>
    where
        Self: 'a;

    fn iterate(&self) -> Self::Iter<'_> {
        ReverseIter {
            source: &self.source,
            buffered: None,
        }
    }
}

/// Pull cursor for [`Reverse`]: buffers the upstream on the first pull.
pub struct ReverseIter<'a, S: Sequence + 'a> {
    source: &'a S,
    buffered: Option<std::vec::IntoIter<S::Item>>,
}

impl<'a, S: Sequence> Iterator for ReverseIter<'a, S> {
    type Item = S::Item;

    fn next(&mut self) -> Option<S::Item> {
        let source = self.source;
        self.buffered
            .get_or_insert_with(|| {
                let mut items: Vec<S::Item> = source.iterate().collect();
                items.reverse();
                items.into_iter()
            })
            .next()
    }
}

// =============================================================================
// Zip
// =============================================================================

/// Sequence returned by [`zip`](Sequence::zip): lock-step pairs, truncated
/// at the shorter side.
#[derive(Debug, Clone)]
pub struct Zip<S, S2> {
    left: S,
    right: S2,
}

impl<S, S2> Zip<S, S2> {
    pub(crate) fn new(left: S, right: S2) -> Self {
        Self { left, right }
    }
}

impl<S, S2> Sequence for Zip<S, S2>
where
    S: Sequence,
    S2: Sequence,
{
    type Item = (S::Item, S2::Item);
    type Iter<'a>
        = std::iter::Zip<S::Iter<'a>, S2::Iter<'a>>
    where
        Self: 'a;

    fn iterate(&self) -> Self::Iter<'_> {
        self.left.iterate().zip(self.right.iterate())
    }
}

/// Sequence returned by [`zip_with`](Sequence::zip_with).
#[derive(Debug, Clone)]
pub struct ZipWith<S, S2, F> {
    left: S,
    right: S2,
    combiner: F,
}

impl<S, S2, F> ZipWith<S, S2, F> {
    pub(crate) fn new(left: S, right: S2, combiner: F) -> Self {
        Self {
            left,
            right,
            combiner,
        }
    }
}

impl<S, S2, F, R> Sequence for ZipWith<S, S2, F>
where
    S: Sequence,
    S2: Sequence,
    F: Fn(S::Item, S2::Item) -> R,
{
    type Item = R;
    type Iter<'a>
        = ZipWithIter<'a, S, S2, F>
    where
        Self: 'a;

    fn iterate(&self) -> Self::Iter<'_> {
        ZipWithIter {
            left: self.left.iterate(),
            right: self.right.iterate(),
            combiner: &self.combiner,
        }
    }
}

/// Pull cursor for [`ZipWith`].
pub struct ZipWithIter<'a, S: Sequence + 'a, S2: Sequence + 'a, F> {
    left: S::Iter<'a>,
    right: S2::Iter<'a>,
    combiner: &'a F,
}

impl<'a, S, S2, F, R> Iterator for ZipWithIter<'a, S, S2, F>
where
    S: Sequence,
    S2: Sequence,
    F: Fn(S::Item, S2::Item) -> R,
{
    type Item = R;

    fn next(&mut self) -> Option<R> {
        let left = self.left.next()?;
        let right = self.right.next()?;
        Some((self.combiner)(left, right))
    }
}
