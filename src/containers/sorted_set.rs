//! A duplicate-free ordered set over the red-black substrate.

use std::fmt;
use std::iter;

use crate::compare::{Comparator, Natural};
use crate::sequence::Sequence;
use crate::tree::red_black::{InOrderIter, RedBlackTree};

/// An ordered set of distinct values.
///
/// Two values are the same element when the comparator ranks them equal;
/// inserting a duplicate leaves the set unchanged. Iteration is always
/// ascending in comparator order.
#[derive(Clone)]
pub struct SortedSet<T, C = Natural> {
    tree: RedBlackTree<T, C>,
}

impl<T: Ord> SortedSet<T> {
    /// Creates an empty set under the element type's natural ordering.
    pub fn new() -> Self {
        Self {
            tree: RedBlackTree::new(),
        }
    }
}

impl<T, C: Comparator<T>> SortedSet<T, C> {
    /// Creates an empty set ordered by `comparator`.
    pub fn with_comparator(comparator: C) -> Self {
        Self {
            tree: RedBlackTree::with_comparator(comparator),
        }
    }

    /// The number of elements in the set.
    pub const fn len(&self) -> usize {
        self.tree.len()
    }

    /// Returns whether the set is empty.
    pub const fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// Removes every element.
    pub fn clear(&mut self) {
        self.tree.clear();
    }

    /// Inserts `value`, returning whether it was newly added.
    pub fn insert(&mut self, value: T) -> bool {
        self.tree.insert(value)
    }

    /// Removes the element ranked equal to `value`, returning whether a
    /// removal occurred.
    pub fn remove(&mut self, value: &T) -> bool {
        self.tree.remove(value)
    }

    /// Returns whether an element ranked equal to `value` is present.
    pub fn contains(&self, value: &T) -> bool {
        self.tree.contains(value)
    }

    /// The stored element ranked equal to `value`, if any.
    pub fn get(&self, value: &T) -> Option<&T> {
        self.tree.get(value)
    }

    /// The smallest element, or `None` for an empty set.
    pub fn minimum(&self) -> Option<&T> {
        self.tree.minimum_value()
    }

    /// The largest element, or `None` for an empty set.
    pub fn maximum(&self) -> Option<&T> {
        self.tree.maximum_value()
    }

    /// Iterates the elements ascending, by reference.
    pub fn iter(&self) -> InOrderIter<'_, T, C> {
        self.tree.in_order()
    }
}

impl<T: Clone, C: Comparator<T>> Sequence for SortedSet<T, C> {
    type Item = T;
    type Iter<'a>
        = iter::Cloned<InOrderIter<'a, T, C>>
    where
        Self: 'a;

    fn iterate(&self) -> Self::Iter<'_> {
        self.tree.in_order().cloned()
    }
}

impl<T: Ord> Default for SortedSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug, C: Comparator<T>> fmt::Debug for SortedSet<T, C> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_set().entries(self.iter()).finish()
    }
}

impl<T: Ord> FromIterator<T> for SortedSet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(items: I) -> Self {
        let mut set = Self::new();
        set.extend(items);
        set
    }
}

impl<T, C: Comparator<T>> Extend<T> for SortedSet<T, C> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, items: I) {
        for item in items {
            self.insert(item);
        }
    }
}

impl<'a, T, C: Comparator<T>> IntoIterator for &'a SortedSet<T, C> {
    type Item = &'a T;
    type IntoIter = InOrderIter<'a, T, C>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
