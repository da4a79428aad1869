//! A key-ordered map over the red-black substrate.

use std::cmp::Ordering;
use std::fmt;
use std::mem;

use crate::compare::{Comparator, Natural};
use crate::error::QueryError;
use crate::sequence::Sequence;
use crate::tree::red_black::{InOrderIter, RedBlackTree};

/// A stored key-value pair. The tree orders entries by key alone.
#[derive(Debug, Clone)]
struct MapEntry<K, V> {
    key: K,
    value: V,
}

/// Lifts a key comparator to whole entries.
#[derive(Debug, Clone, Copy, Default)]
pub struct EntryOrder<C>(C);

impl<K, V, C: Comparator<K>> Comparator<MapEntry<K, V>> for EntryOrder<C> {
    fn compare(&self, left: &MapEntry<K, V>, right: &MapEntry<K, V>) -> Ordering {
        self.0.compare(&left.key, &right.key)
    }
}

/// An ordered map from distinct keys to values.
///
/// Two keys are the same key when the comparator ranks them equal.
/// Iteration is always ascending in key order.
#[derive(Clone)]
pub struct SortedMap<K, V, C = Natural> {
    tree: RedBlackTree<MapEntry<K, V>, EntryOrder<C>>,
    comparator: C,
}

impl<K: Ord, V> SortedMap<K, V> {
    /// Creates an empty map under the key type's natural ordering.
    pub fn new() -> Self {
        Self::with_comparator(Natural)
    }
}

impl<K, V, C: Comparator<K> + Clone> SortedMap<K, V, C> {
    /// Creates an empty map with keys ordered by `comparator`.
    pub fn with_comparator(comparator: C) -> Self {
        Self {
            tree: RedBlackTree::with_comparator(EntryOrder(comparator.clone())),
            comparator,
        }
    }
}

impl<K, V, C: Comparator<K>> SortedMap<K, V, C> {
    /// The number of entries in the map.
    pub const fn len(&self) -> usize {
        self.tree.len()
    }

    /// Returns whether the map is empty.
    pub const fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// Removes every entry.
    pub fn clear(&mut self) {
        self.tree.clear();
    }

    /// Inserts `value` under `key`, returning the previous value when the
    /// key was already present.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        let comparator = &self.comparator;
        if let Some(entry) = self
            .tree
            .find_by_mut(|entry| comparator.compare(&key, &entry.key))
        {
            return Some(mem::replace(&mut entry.value, value));
        }
        self.tree.insert(MapEntry { key, value });
        None
    }

    /// Inserts `value` under `key`, rejecting an already-present key.
    ///
    /// # Errors
    ///
    /// `KeyAlreadyAdded` when the key is present; the map is unchanged.
    pub fn try_insert(&mut self, key: K, value: V) -> Result<(), QueryError> {
        if self.contains_key(&key) {
            return Err(QueryError::KeyAlreadyAdded);
        }
        self.tree.insert(MapEntry { key, value });
        Ok(())
    }

    /// The value stored under `key`, if any.
    pub fn get(&self, key: &K) -> Option<&V> {
        let comparator = &self.comparator;
        self.tree
            .find_by(|entry| comparator.compare(key, &entry.key))
            .map(|entry| &entry.value)
    }

    /// Mutable access to the value stored under `key`, if any.
    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        let comparator = &self.comparator;
        self.tree
            .find_by_mut(|entry| comparator.compare(key, &entry.key))
            .map(|entry| &mut entry.value)
    }

    /// The value stored under `key`.
    ///
    /// # Errors
    ///
    /// `KeyNotFound` when the key is absent.
    pub fn get_or_err(&self, key: &K) -> Result<&V, QueryError> {
        self.get(key).ok_or(QueryError::KeyNotFound)
    }

    /// Removes the entry under `key`, returning its value.
    pub fn remove(&mut self, key: &K) -> Option<V> {
        let comparator = &self.comparator;
        self.tree
            .remove_by(|entry| comparator.compare(key, &entry.key))
            .map(|entry| entry.value)
    }

    /// Returns whether an entry is stored under `key`.
    pub fn contains_key(&self, key: &K) -> bool {
        self.get(key).is_some()
    }

    /// Iterates the entries ascending by key, by reference.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.tree.in_order().map(|entry| (&entry.key, &entry.value))
    }

    /// Iterates the keys ascending.
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.tree.in_order().map(|entry| &entry.key)
    }

    /// Iterates the values in ascending key order.
    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.tree.in_order().map(|entry| &entry.value)
    }
}

impl<K, V, C> Sequence for SortedMap<K, V, C>
where
    K: Clone,
    V: Clone,
    C: Comparator<K>,
{
    type Item = (K, V);
    type Iter<'a>
        = PairsIter<'a, K, V, C>
    where
        Self: 'a;

    fn iterate(&self) -> Self::Iter<'_> {
        PairsIter {
            entries: self.tree.in_order(),
        }
    }
}

/// Pull cursor yielding owned `(key, value)` pairs ascending by key.
pub struct PairsIter<'a, K, V, C> {
    entries: InOrderIter<'a, MapEntry<K, V>, EntryOrder<C>>,
}

impl<'a, K: Clone, V: Clone, C: Comparator<K>> Iterator for PairsIter<'a, K, V, C> {
    type Item = (K, V);

    fn next(&mut self) -> Option<(K, V)> {
        self.entries
            .next()
            .map(|entry| (entry.key.clone(), entry.value.clone()))
    }
}

impl<K: Ord, V> Default for SortedMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: fmt::Debug, V: fmt::Debug, C: Comparator<K>> fmt::Debug for SortedMap<K, V, C> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_map().entries(self.iter()).finish()
    }
}

impl<K: Ord, V> FromIterator<(K, V)> for SortedMap<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(pairs: I) -> Self {
        let mut map = Self::new();
        map.extend(pairs);
        map
    }
}

impl<K, V, C: Comparator<K>> Extend<(K, V)> for SortedMap<K, V, C> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, pairs: I) {
        for (key, value) in pairs {
            self.insert(key, value);
        }
    }
}
