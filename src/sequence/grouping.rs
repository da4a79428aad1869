//! Key-driven partitioning: [`GroupBy`], [`Grouping`], and [`Lookup`].
//!
//! `group_by` stays lazy: the partition builds on the first pull of each
//! enumeration and yields groups in first-key-encounter order, elements
//! inside each group in upstream order. [`Lookup`] is the eager counterpart
//! produced by [`to_lookup`](crate::sequence::Sequence::to_lookup): a
//! materialized snapshot offering total key access.

use std::fmt;
use std::iter;
use std::slice;

use crate::compare::{EqualityComparator, Natural};
use crate::sequence::Sequence;

// =============================================================================
// Grouping
// =============================================================================

/// One partition: a key and the elements that mapped to it, in upstream
/// encounter order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grouping<K, T> {
    key: K,
    elements: Vec<T>,
}

impl<K, T> Grouping<K, T> {
    /// The key shared by every element of the group.
    pub fn key(&self) -> &K {
        &self.key
    }

    /// The number of elements in the group, always at least one for groups
    /// produced by `group_by` or `to_lookup`.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Returns whether the group holds no elements.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Borrows the grouped elements.
    pub fn elements(&self) -> &[T] {
        &self.elements
    }

    /// Iterates the grouped elements by reference.
    pub fn iter(&self) -> slice::Iter<'_, T> {
        self.elements.iter()
    }
}

impl<K, T: Clone> Sequence for Grouping<K, T> {
    type Item = T;
    type Iter<'a>
        = iter::Cloned<slice::Iter<'a, T>>
    where
        Self: 'a;

    fn iterate(&self) -> Self::Iter<'_> {
        self.elements.iter().cloned()
    }
}

/// Single-pass partition shared by `group_by` and `to_lookup`.
pub(crate) fn collect_groups<I, T, F, K, E>(
    items: I,
    selector: &F,
    equality: &E,
) -> Vec<Grouping<K, T>>
where
    I: Iterator<Item = T>,
    F: Fn(&T) -> K,
    E: EqualityComparator<K>,
{
    let mut groups: Vec<Grouping<K, T>> = Vec::new();
    for item in items {
        let key = selector(&item);
        match groups
            .iter_mut()
            .find(|group| equality.equals(&group.key, &key))
        {
            Some(group) => group.elements.push(item),
            None => groups.push(Grouping {
                key,
                elements: vec![item],
            }),
        }
    }
    groups
}

// =============================================================================
// GroupBy
// =============================================================================

/// Sequence returned by [`group_by`](Sequence::group_by) and
/// [`group_by_with`](Sequence::group_by_with).
#[derive(Debug, Clone)]
pub struct GroupBy<S, F, E = Natural> {
    source: S,
    selector: F,
    equality: E,
}

impl<S, F, E> GroupBy<S, F, E> {
    pub(crate) fn new(source: S, selector: F, equality: E) -> Self {
        Self {
            source,
            selector,
            equality,
        }
    }
}

impl<S, F, K, E> Sequence for GroupBy<S, F, E>
where
    S: Sequence,
    F: Fn(&S::Item) -> K,
    E: EqualityComparator<K>,
{
    type Item = Grouping<K, S::Item>;
    type Iter<'a>
        = GroupByIter<'a, S, F, K, E>
    where
        Self: 'a;

    fn iterate(&self) -> Self::Iter<'_> {
        GroupByIter {
            source: &self.source,
            selector: &self.selector,
            equality: &self.equality,
            buffered: None,
        }
    }
}

/// Pull cursor for [`GroupBy`]: the partition builds on the first pull.
pub struct GroupByIter<'a, S: Sequence + 'a, F, K, E> {
    source: &'a S,
    selector: &'a F,
    equality: &'a E,
    buffered: Option<std::vec::IntoIter<Grouping<K, S::Item>>>,
}

impl<'a, S, F, K, E> Iterator for GroupByIter<'a, S, F, K, E>
where
    S: Sequence,
    F: Fn(&S::Item) -> K,
    E: EqualityComparator<K>,
{
    type Item = Grouping<K, S::Item>;

    fn next(&mut self) -> Option<Self::Item> {
        let source = self.source;
        let selector = self.selector;
        let equality = self.equality;
        let buffered = self
            .buffered
            .get_or_insert_with(|| collect_groups(source.iterate(), selector, equality).into_iter());
        buffered.next()
    }
}

// =============================================================================
// Lookup
// =============================================================================

/// An immutable, materialized one-to-many map from keys to element slices.
///
/// Access is total: probing an absent key yields an empty slice rather than
/// an error. Groups keep first-key-encounter order.
pub struct Lookup<K, T> {
    groups: Vec<Grouping<K, T>>,
    equality: Box<dyn Fn(&K, &K) -> bool>,
}

impl<K, T> Lookup<K, T> {
    pub(crate) fn from_groups(
        groups: Vec<Grouping<K, T>>,
        equality: Box<dyn Fn(&K, &K) -> bool>,
    ) -> Self {
        Self { groups, equality }
    }

    /// The elements grouped under `key`; empty when the key is absent.
    pub fn get(&self, key: &K) -> &[T] {
        self.groups
            .iter()
            .find(|group| (self.equality)(&group.key, key))
            .map_or(&[], |group| group.elements())
    }

    /// Returns whether at least one element grouped under `key`.
    pub fn contains_key(&self, key: &K) -> bool {
        self.groups
            .iter()
            .any(|group| (self.equality)(&group.key, key))
    }

    /// The number of distinct keys.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Returns whether the lookup holds no groups.
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Iterates the groups by reference, in first-key-encounter order.
    pub fn iter(&self) -> slice::Iter<'_, Grouping<K, T>> {
        self.groups.iter()
    }

    /// Iterates the distinct keys in first-encounter order.
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.groups.iter().map(Grouping::key)
    }
}

impl<K: Clone, T: Clone> Sequence for Lookup<K, T> {
    type Item = Grouping<K, T>;
    type Iter<'a>
        = iter::Cloned<slice::Iter<'a, Grouping<K, T>>>
    where
        Self: 'a;

    fn iterate(&self) -> Self::Iter<'_> {
        self.groups.iter().cloned()
    }
}

impl<K: fmt::Debug, T: fmt::Debug> fmt::Debug for Lookup<K, T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_list().entries(&self.groups).finish()
    }
}
