//! Deferred, stable, multi-key sorting.
//!
//! [`Ordered`] is the sequence returned by the `order_by` family. It holds
//! the upstream recipe plus a stack of sort keys and materializes nothing
//! until enumerated; each enumeration collects the upstream once, runs one
//! stable sort under the composed key comparison, and streams the result.
//! `then_by` appends a tiebreaker key, while calling `order_by` again on an
//! [`Ordered`] discards the accumulated keys and starts a fresh primary.

use std::cmp::Ordering as CmpOrdering;
use std::fmt;

use smallvec::SmallVec;

use crate::sequence::Sequence;

// =============================================================================
// Sort keys
// =============================================================================

/// One level of the composed ordering: a type-erased key comparison plus
/// its direction.
pub(crate) struct SortKey<T: 'static> {
    compare: Box<dyn Fn(&T, &T) -> CmpOrdering>,
    descending: bool,
}

impl<T> SortKey<T> {
    /// Key under the key type's natural ordering.
    pub(crate) fn by_key<F, K>(selector: F, descending: bool) -> Self
    where
        F: Fn(&T) -> K + 'static,
        K: Ord,
    {
        Self {
            compare: Box::new(move |left, right| selector(left).cmp(&selector(right))),
            descending,
        }
    }

    /// Key under a caller-supplied comparison.
    pub(crate) fn with<F, K, O>(selector: F, comparator: O, descending: bool) -> Self
    where
        F: Fn(&T) -> K + 'static,
        O: Fn(&K, &K) -> CmpOrdering + 'static,
        K: 'static,
    {
        Self {
            compare: Box::new(move |left, right| comparator(&selector(left), &selector(right))),
            descending,
        }
    }
}

/// Runs the key stack in order, returning the first non-equal verdict.
fn compare_items<T>(keys: &[SortKey<T>], left: &T, right: &T) -> CmpOrdering {
    for key in keys {
        let ordering = (key.compare)(left, right);
        let ordering = if key.descending {
            ordering.reverse()
        } else {
            ordering
        };
        if ordering != CmpOrdering::Equal {
            return ordering;
        }
    }
    CmpOrdering::Equal
}

// =============================================================================
// Ordered
// =============================================================================

/// Sequence returned by the `order_by` family. Most chains carry one or two
/// keys, so the stack lives inline.
pub struct Ordered<S>
where
    S: Sequence,
    S::Item: 'static,
{
    source: S,
    keys: SmallVec<[SortKey<S::Item>; 4]>,
}

impl<S> Ordered<S>
where
    S: Sequence,
    S::Item: 'static,
{
    pub(crate) fn primary(source: S, key: SortKey<S::Item>) -> Self {
        let mut keys = SmallVec::new();
        keys.push(key);
        Self { source, keys }
    }

    fn replace(mut self, key: SortKey<S::Item>) -> Self {
        self.keys.clear();
        self.keys.push(key);
        self
    }

    fn append(mut self, key: SortKey<S::Item>) -> Self {
        self.keys.push(key);
        self
    }

    /// Restarts the ordering ascending by `selector`, discarding every key
    /// accumulated so far.
    pub fn order_by<F, K>(self, selector: F) -> Self
    where
        F: Fn(&S::Item) -> K + 'static,
        K: Ord,
    {
        self.replace(SortKey::by_key(selector, false))
    }

    /// Restarts the ordering descending by `selector`.
    pub fn order_by_descending<F, K>(self, selector: F) -> Self
    where
        F: Fn(&S::Item) -> K + 'static,
        K: Ord,
    {
        self.replace(SortKey::by_key(selector, true))
    }

    /// Restarts the ordering ascending by `selector` under a caller-supplied
    /// key comparator.
    pub fn order_by_with<F, K, O>(self, selector: F, comparator: O) -> Self
    where
        F: Fn(&S::Item) -> K + 'static,
        O: Fn(&K, &K) -> CmpOrdering + 'static,
        K: 'static,
    {
        self.replace(SortKey::with(selector, comparator, false))
    }

    /// Restarts the ordering descending by `selector` under a
    /// caller-supplied key comparator.
    pub fn order_by_with_descending<F, K, O>(self, selector: F, comparator: O) -> Self
    where
        F: Fn(&S::Item) -> K + 'static,
        O: Fn(&K, &K) -> CmpOrdering + 'static,
        K: 'static,
    {
        self.replace(SortKey::with(selector, comparator, true))
    }

    /// Appends an ascending tiebreaker key, consulted only between elements
    /// the preceding keys found equal.
    pub fn then_by<F, K>(self, selector: F) -> Self
    where
        F: Fn(&S::Item) -> K + 'static,
        K: Ord,
    {
        self.append(SortKey::by_key(selector, false))
    }

    /// Appends a descending tiebreaker key.
    pub fn then_by_descending<F, K>(self, selector: F) -> Self
    where
        F: Fn(&S::Item) -> K + 'static,
        K: Ord,
    {
        self.append(SortKey::by_key(selector, true))
    }

    /// Appends an ascending tiebreaker key under a caller-supplied key
    /// comparator.
    pub fn then_by_with<F, K, O>(self, selector: F, comparator: O) -> Self
    where
        F: Fn(&S::Item) -> K + 'static,
        O: Fn(&K, &K) -> CmpOrdering + 'static,
        K: 'static,
    {
        self.append(SortKey::with(selector, comparator, false))
    }

    /// Appends a descending tiebreaker key under a caller-supplied key
    /// comparator.
    pub fn then_by_with_descending<F, K, O>(self, selector: F, comparator: O) -> Self
    where
        F: Fn(&S::Item) -> K + 'static,
        O: Fn(&K, &K) -> CmpOrdering + 'static,
        K: 'static,
    {
        self.append(SortKey::with(selector, comparator, true))
    }
}

impl<S> Sequence for Ordered<S>
where
    S: Sequence,
    S::Item: 'static,
{
    type Item = S::Item;
    type Iter<'a>
        = OrderedIter<'a, S>
    where
        Self: 'a;

    fn iterate(&self) -> Self::Iter<'_> {
        OrderedIter {
            source: &self.source,
            keys: &self.keys,
            buffered: None,
        }
    }
}

impl<S> fmt::Debug for Ordered<S>
where
    S: Sequence + fmt::Debug,
    S::Item: 'static,
{
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Ordered")
            .field("source", &self.source)
            .field("keys", &self.keys.len())
            .finish()
    }
}

/// Pull cursor for [`Ordered`]: the sorted buffer builds on the first pull
/// of each enumeration.
pub struct OrderedIter<'a, S>
where
    S: Sequence + 'a,
    S::Item: 'static,
{
    source: &'a S,
    keys: &'a [SortKey<S::Item>],
    buffered: Option<std::vec::IntoIter<S::Item>>,
}

impl<'a, S> Iterator for OrderedIter<'a, S>
where
    S: Sequence,
    S::Item: 'static,
{
    type Item = S::Item;

    fn next(&mut self) -> Option<S::Item> {
        let source = self.source;
        let keys = self.keys;
        let buffered = self.buffered.get_or_insert_with(|| {
            let mut items: Vec<S::Item> = source.iterate().collect();
            items.sort_by(|left, right| compare_items(keys, left, right));
            items.into_iter()
        });
        buffered.next()
    }
}
