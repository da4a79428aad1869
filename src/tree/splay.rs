//! Splay tree over an index-addressed arena.
//!
//! # Overview
//!
//! [`SplayTree`] implements the same ordered-tree contract as
//! [`RedBlackTree`](crate::tree::RedBlackTree) (sortedness, uniqueness
//! under the order comparator, identical traversal order) but trades
//! worst-case balance for amortized O(log n) with recency locality: every
//! successful `contains`, `insert`, or `remove` splays the accessed node to
//! the root through zig, zig-zig, and zig-zag rotations.
//!
//! Removal splays the target to the root, then joins the subtrees by
//! splaying the left subtree's maximum (the in-order predecessor) to its
//! root and attaching the right subtree beneath it.
//!
//! # Examples
//!
//! ```rust
//! use riffle::tree::{OrderedTree, SplayTree};
//!
//! let mut tree = SplayTree::new();
//! for value in [2, 1, 3] {
//!     tree.insert(value);
//! }
//!
//! // A successful lookup moves the element to the root.
//! assert!(tree.contains(&1));
//! assert_eq!(tree.root_value(), Some(&1));
//! ```

use std::cmp::Ordering;
use std::fmt;

use crate::compare::{Comparator, Natural};
use crate::sequence::Sequence;
use crate::tree::OrderedTree;

const NIL: usize = usize::MAX;

#[derive(Debug, Clone)]
struct Node<T> {
    value: T,
    parent: usize,
    left: usize,
    right: usize,
}

#[derive(Debug, Clone)]
enum Slot<T> {
    Occupied(Node<T>),
    Vacant,
}

/// A self-optimizing ordered tree of unique elements, ordered by a
/// [`Comparator`] chosen at the type level ([`Natural`] by default).
#[derive(Clone)]
pub struct SplayTree<T, C = Natural> {
    slots: Vec<Slot<T>>,
    free: Vec<usize>,
    root: usize,
    len: usize,
    comparator: C,
}

impl<T: Ord> SplayTree<T> {
    /// Creates an empty tree ordered by [`Ord`].
    pub fn new() -> Self {
        Self::with_comparator(Natural)
    }
}

impl<T, C: Comparator<T>> SplayTree<T, C> {
    /// Creates an empty tree ordered by `comparator`.
    pub fn with_comparator(comparator: C) -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            root: NIL,
            len: 0,
            comparator,
        }
    }

    /// The number of elements in the tree.
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns whether the tree is empty.
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Removes every element.
    pub fn clear(&mut self) {
        self.slots.clear();
        self.free.clear();
        self.root = NIL;
        self.len = 0;
    }

    /// The value at the root, or `None` for an empty tree. After a
    /// successful access this is the most recently touched element.
    pub fn root_value(&self) -> Option<&T> {
        if self.root == NIL {
            None
        } else {
            Some(&self.node(self.root).value)
        }
    }

    /// Inserts `value`, returning whether it was newly added.
    ///
    /// The inserted node (or the existing equal node, for a duplicate) is
    /// splayed to the root.
    pub fn insert(&mut self, value: T) -> bool {
        let mut parent = NIL;
        let mut current = self.root;
        let mut ordering = Ordering::Equal;
        while current != NIL {
            ordering = self.comparator.compare(&value, &self.node(current).value);
            match ordering {
                Ordering::Less => {
                    parent = current;
                    current = self.node(current).left;
                }
                Ordering::Greater => {
                    parent = current;
                    current = self.node(current).right;
                }
                Ordering::Equal => {
                    self.splay(current);
                    return false;
                }
            }
        }

        let index = self.allocate(value, parent);
        if parent == NIL {
            self.root = index;
        } else if ordering == Ordering::Less {
            self.node_mut(parent).left = index;
        } else {
            self.node_mut(parent).right = index;
        }
        self.len += 1;
        self.splay(index);
        true
    }

    /// Removes the element comparing equal to `value`, returning whether a
    /// removal occurred.
    pub fn remove(&mut self, value: &T) -> bool {
        let comparator = &self.comparator;
        let index = self.locate_by(&|candidate| comparator.compare(value, candidate));
        if index == NIL {
            return false;
        }
        self.remove_index(index);
        true
    }

    /// Returns whether an element comparing equal to `value` is present,
    /// splaying it to the root when found.
    pub fn contains(&mut self, value: &T) -> bool {
        let comparator = &self.comparator;
        let index = self.locate_by(&|candidate| comparator.compare(value, candidate));
        if index == NIL {
            false
        } else {
            self.splay(index);
            true
        }
    }

    /// Non-restructuring lookup.
    pub fn get(&self, value: &T) -> Option<&T> {
        let comparator = &self.comparator;
        let index = self.locate_by(&|candidate| comparator.compare(value, candidate));
        if index == NIL {
            None
        } else {
            Some(&self.node(index).value)
        }
    }

    /// Unordered root/left/right scan; returns the first element satisfying
    /// `predicate`, if any.
    pub fn find(&self, predicate: impl Fn(&T) -> bool) -> Option<&T> {
        let mut stack = Vec::new();
        if self.root != NIL {
            stack.push(self.root);
        }
        while let Some(index) = stack.pop() {
            let node = self.node(index);
            if predicate(&node.value) {
                return Some(&node.value);
            }
            if node.right != NIL {
                stack.push(node.right);
            }
            if node.left != NIL {
                stack.push(node.left);
            }
        }
        None
    }

    /// In-order (sorted ascending) traversal.
    pub fn in_order(&self) -> InOrderIter<'_, T, C> {
        let mut iterator = InOrderIter {
            tree: self,
            stack: Vec::new(),
        };
        iterator.descend_left(self.root);
        iterator
    }

    /// Pre-order (root, left, right) traversal.
    pub fn pre_order(&self) -> PreOrderIter<'_, T, C> {
        let mut stack = Vec::new();
        if self.root != NIL {
            stack.push(self.root);
        }
        PreOrderIter { tree: self, stack }
    }

    /// Post-order (left, right, root) traversal.
    pub fn post_order(&self) -> PostOrderIter<'_, T, C> {
        let mut stack = Vec::new();
        if self.root != NIL {
            stack.push((self.root, false));
        }
        PostOrderIter { tree: self, stack }
    }

    // =========================================================================
    // Arena plumbing
    // =========================================================================

    fn node(&self, index: usize) -> &Node<T> {
        match &self.slots[index] {
            Slot::Occupied(node) => node,
            Slot::Vacant => unreachable!("vacant arena slot {index}"),
        }
    }

    fn node_mut(&mut self, index: usize) -> &mut Node<T> {
        match &mut self.slots[index] {
            Slot::Occupied(node) => node,
            Slot::Vacant => unreachable!("vacant arena slot {index}"),
        }
    }

    fn allocate(&mut self, value: T, parent: usize) -> usize {
        let node = Node {
            value,
            parent,
            left: NIL,
            right: NIL,
        };
        if let Some(index) = self.free.pop() {
            self.slots[index] = Slot::Occupied(node);
            index
        } else {
            self.slots.push(Slot::Occupied(node));
            self.slots.len() - 1
        }
    }

    fn release(&mut self, index: usize) -> T {
        self.free.push(index);
        match std::mem::replace(&mut self.slots[index], Slot::Vacant) {
            Slot::Occupied(node) => node.value,
            Slot::Vacant => unreachable!("released a vacant slot"),
        }
    }

    fn parent_of(&self, index: usize) -> usize {
        if index == NIL {
            NIL
        } else {
            self.node(index).parent
        }
    }

    fn left_of(&self, index: usize) -> usize {
        if index == NIL {
            NIL
        } else {
            self.node(index).left
        }
    }

    fn right_of(&self, index: usize) -> usize {
        if index == NIL {
            NIL
        } else {
            self.node(index).right
        }
    }

    fn maximum(&self, mut index: usize) -> usize {
        while self.right_of(index) != NIL {
            index = self.right_of(index);
        }
        index
    }

    fn locate_by(&self, probe: &impl Fn(&T) -> Ordering) -> usize {
        let mut current = self.root;
        while current != NIL {
            match probe(&self.node(current).value) {
                Ordering::Less => current = self.node(current).left,
                Ordering::Greater => current = self.node(current).right,
                Ordering::Equal => return current,
            }
        }
        NIL
    }

    // =========================================================================
    // Rotations and splaying
    // =========================================================================

    fn rotate_left(&mut self, x: usize) {
        let y = self.right_of(x);
        let y_left = self.left_of(y);

        self.node_mut(x).right = y_left;
        if y_left != NIL {
            self.node_mut(y_left).parent = x;
        }

        let x_parent = self.parent_of(x);
        self.node_mut(y).parent = x_parent;
        if x_parent == NIL {
            self.root = y;
        } else if x == self.left_of(x_parent) {
            self.node_mut(x_parent).left = y;
        } else {
            self.node_mut(x_parent).right = y;
        }

        self.node_mut(y).left = x;
        self.node_mut(x).parent = y;
    }

    fn rotate_right(&mut self, x: usize) {
        let y = self.left_of(x);
        let y_right = self.right_of(y);

        self.node_mut(x).left = y_right;
        if y_right != NIL {
            self.node_mut(y_right).parent = x;
        }

        let x_parent = self.parent_of(x);
        self.node_mut(y).parent = x_parent;
        if x_parent == NIL {
            self.root = y;
        } else if x == self.right_of(x_parent) {
            self.node_mut(x_parent).right = y;
        } else {
            self.node_mut(x_parent).left = y;
        }

        self.node_mut(y).right = x;
        self.node_mut(x).parent = y;
    }

    fn rotate_up(&mut self, index: usize) {
        let parent = self.parent_of(index);
        if index == self.left_of(parent) {
            self.rotate_right(parent);
        } else {
            self.rotate_left(parent);
        }
    }

    /// Moves `index` to the root by zig / zig-zig / zig-zag steps.
    fn splay(&mut self, index: usize) {
        while self.parent_of(index) != NIL {
            let parent = self.parent_of(index);
            let grandparent = self.parent_of(parent);
            if grandparent == NIL {
                // Zig: parent is the root.
                self.rotate_up(index);
            } else {
                let index_is_left = index == self.left_of(parent);
                let parent_is_left = parent == self.left_of(grandparent);
                if index_is_left == parent_is_left {
                    // Zig-zig: rotate the grandparent first, then the parent.
                    self.rotate_up(parent);
                    self.rotate_up(index);
                } else {
                    // Zig-zag: two rotations at the accessed node.
                    self.rotate_up(index);
                    self.rotate_up(index);
                }
            }
        }
    }

    fn remove_index(&mut self, index: usize) -> T {
        // Splay the doomed node to the root, then join its subtrees.
        self.splay(index);
        let left = self.left_of(index);
        let right = self.right_of(index);
        let value = self.release(index);
        self.len -= 1;

        if left == NIL {
            self.root = right;
            if right != NIL {
                self.node_mut(right).parent = NIL;
            }
        } else {
            self.node_mut(left).parent = NIL;
            self.root = left;
            // The in-order predecessor becomes the new root; it has no
            // right child after the splay, so the right subtree hangs there.
            let predecessor = self.maximum(left);
            self.splay(predecessor);
            self.node_mut(predecessor).right = right;
            if right != NIL {
                self.node_mut(right).parent = predecessor;
            }
        }
        value
    }
}

// =============================================================================
// Traversal iterators
// =============================================================================

/// Lazy in-order traversal over a [`SplayTree`].
pub struct InOrderIter<'a, T, C> {
    tree: &'a SplayTree<T, C>,
    stack: Vec<usize>,
}

impl<'a, T, C: Comparator<T>> InOrderIter<'a, T, C> {
    fn descend_left(&mut self, mut index: usize) {
        while index != NIL {
            self.stack.push(index);
            index = self.tree.node(index).left;
        }
    }
}

impl<'a, T, C: Comparator<T>> Iterator for InOrderIter<'a, T, C> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        let tree = self.tree;
        let index = self.stack.pop()?;
        let node = tree.node(index);
        self.descend_left(node.right);
        Some(&node.value)
    }
}

/// Lazy pre-order traversal over a [`SplayTree`].
pub struct PreOrderIter<'a, T, C> {
    tree: &'a SplayTree<T, C>,
    stack: Vec<usize>,
}

impl<'a, T, C: Comparator<T>> Iterator for PreOrderIter<'a, T, C> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        let tree = self.tree;
        let index = self.stack.pop()?;
        let node = tree.node(index);
        if node.right != NIL {
            self.stack.push(node.right);
        }
        if node.left != NIL {
            self.stack.push(node.left);
        }
        Some(&node.value)
    }
}

/// Lazy post-order traversal over a [`SplayTree`].
pub struct PostOrderIter<'a, T, C> {
    tree: &'a SplayTree<T, C>,
    stack: Vec<(usize, bool)>,
}

impl<'a, T, C: Comparator<T>> Iterator for PostOrderIter<'a, T, C> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        let tree = self.tree;
        loop {
            let (index, expanded) = self.stack.pop()?;
            let node = tree.node(index);
            if expanded {
                return Some(&node.value);
            }
            self.stack.push((index, true));
            if node.right != NIL {
                self.stack.push((node.right, false));
            }
            if node.left != NIL {
                self.stack.push((node.left, false));
            }
        }
    }
}

// =============================================================================
// Trait implementations
// =============================================================================

impl<T, C: Comparator<T>> OrderedTree<T> for SplayTree<T, C> {
    type InOrder<'a>
        = InOrderIter<'a, T, C>
    where
        Self: 'a,
        T: 'a;
    type PreOrder<'a>
        = PreOrderIter<'a, T, C>
    where
        Self: 'a,
        T: 'a;
    type PostOrder<'a>
        = PostOrderIter<'a, T, C>
    where
        Self: 'a,
        T: 'a;

    fn insert(&mut self, value: T) -> bool {
        Self::insert(self, value)
    }

    fn remove(&mut self, value: &T) -> bool {
        Self::remove(self, value)
    }

    fn contains(&mut self, value: &T) -> bool {
        Self::contains(self, value)
    }

    fn find(&self, predicate: impl Fn(&T) -> bool) -> Option<&T> {
        Self::find(self, predicate)
    }

    fn len(&self) -> usize {
        self.len
    }

    fn clear(&mut self) {
        Self::clear(self);
    }

    fn root_value(&self) -> Option<&T> {
        Self::root_value(self)
    }

    fn in_order(&self) -> Self::InOrder<'_> {
        Self::in_order(self)
    }

    fn pre_order(&self) -> Self::PreOrder<'_> {
        Self::pre_order(self)
    }

    fn post_order(&self) -> Self::PostOrder<'_> {
        Self::post_order(self)
    }
}

impl<T: Clone, C: Comparator<T>> Sequence for SplayTree<T, C> {
    type Item = T;
    type Iter<'a>
        = std::iter::Cloned<InOrderIter<'a, T, C>>
    where
        Self: 'a;

    fn iterate(&self) -> Self::Iter<'_> {
        self.in_order().cloned()
    }
}

impl<T: Ord> Default for SplayTree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug, C: Comparator<T>> fmt::Debug for SplayTree<T, C> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_set().entries(self.in_order()).finish()
    }
}

impl<T: Ord> FromIterator<T> for SplayTree<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iterable: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iterable);
        tree
    }
}

impl<T, C: Comparator<T>> Extend<T> for SplayTree<T, C> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iterable: I) {
        for value in iterable {
            self.insert(value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    impl<T, C: Comparator<T>> SplayTree<T, C> {
        fn assert_links(&self) {
            if self.root == NIL {
                assert_eq!(self.len, 0);
                return;
            }
            assert_eq!(self.parent_of(self.root), NIL);
            let mut stack = vec![self.root];
            let mut visited = 0usize;
            while let Some(index) = stack.pop() {
                visited += 1;
                let node = self.node(index);
                if node.left != NIL {
                    assert_eq!(self.parent_of(node.left), index, "stale parent link");
                    stack.push(node.left);
                }
                if node.right != NIL {
                    assert_eq!(self.parent_of(node.right), index, "stale parent link");
                    stack.push(node.right);
                }
            }
            assert_eq!(visited, self.len);
        }
    }

    #[test]
    fn test_links_stay_consistent_across_operations() {
        let mut tree = SplayTree::new();
        let mut state: u64 = 0x9E37_79B9_7F4A_7C15;
        let mut values = Vec::new();
        for _ in 0..400 {
            state = state.wrapping_mul(6_364_136_223_846_793_005).wrapping_add(1);
            let value = (state >> 33) % 200;
            if state % 3 == 0 {
                if tree.remove(&value) {
                    values.retain(|existing| *existing != value);
                }
            } else if tree.insert(value) {
                values.push(value);
            }
            tree.assert_links();
            assert_eq!(tree.len(), values.len());
        }
        values.sort_unstable();
        let in_order: Vec<u64> = tree.in_order().copied().collect();
        assert_eq!(in_order, values);
    }

    #[test]
    fn test_duplicate_insert_splays_existing_node() {
        let mut tree = SplayTree::new();
        for value in [5, 3, 8, 1] {
            tree.insert(value);
        }
        assert!(!tree.insert(3));
        assert_eq!(tree.root_value(), Some(&3));
        assert_eq!(tree.len(), 4);
    }
}
