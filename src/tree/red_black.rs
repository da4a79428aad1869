//! Red-black tree over an index-addressed arena.
//!
//! # Overview
//!
//! [`RedBlackTree`] is a mutable ordered set of unique elements providing:
//!
//! - O(log n) insert
//! - O(log n) remove
//! - O(log n) lookup
//! - O(n) in-order / pre-order / post-order traversal
//! - O(1) len and `is_empty`
//!
//! # Internal Structure
//!
//! Nodes live in a `Vec`-backed arena with a free-list stack; `NIL`
//! (`usize::MAX`) is the absent-child sentinel. The arena owns every node,
//! so parent back-references are plain indices used only to walk upward
//! during fix-up; rotations keep them consistent with the true parent.
//!
//! The tree maintains the red-black invariants:
//!
//! 1. Every node is either red or black
//! 2. The root is black (or the tree is empty)
//! 3. NIL children count as black
//! 4. A red node never has a red child
//! 5. Every root-to-NIL path carries the same number of black nodes
//!
//! Insertion places a red node at the binary-descent position and repairs
//! double-red states by uncle-color case analysis; deletion reduces to a
//! node with at most one child (swapping values with the in-order successor
//! when needed) and repairs the double-black deficiency by sibling case
//! analysis.
//!
//! # Examples
//!
//! ```rust
//! use riffle::tree::RedBlackTree;
//!
//! let mut tree = RedBlackTree::new();
//! assert!(tree.insert(2));
//! assert!(tree.insert(1));
//! assert!(!tree.insert(2)); // duplicates are a no-op
//!
//! assert!(tree.remove(&1));
//! assert!(!tree.remove(&1)); // absent values report false, never an error
//! ```

use std::cmp::Ordering;
use std::fmt;

use crate::compare::{Comparator, Natural};
use crate::sequence::Sequence;
use crate::tree::OrderedTree;

/// Absent-node sentinel.
const NIL: usize = usize::MAX;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum Color {
    Red,
    Black,
}

#[derive(Debug, Clone)]
struct Node<T> {
    value: T,
    parent: usize,
    left: usize,
    right: usize,
    color: Color,
}

/// An arena slot. Vacant slots are recycled through the free-list stack.
#[derive(Debug, Clone)]
enum Slot<T> {
    Occupied(Node<T>),
    Vacant,
}

/// A mutable red-black tree of unique elements, ordered by a
/// [`Comparator`] chosen at the type level ([`Natural`] by default).
#[derive(Clone)]
pub struct RedBlackTree<T, C = Natural> {
    slots: Vec<Slot<T>>,
    free: Vec<usize>,
    root: usize,
    len: usize,
    comparator: C,
}

impl<T: Ord> RedBlackTree<T> {
    /// Creates an empty tree ordered by [`Ord`].
    pub fn new() -> Self {
        Self::with_comparator(Natural)
    }
}

impl<T, C: Comparator<T>> RedBlackTree<T, C> {
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

    /// The order comparator this tree was built with.
    pub const fn comparator(&self) -> &C {
        &self.comparator
    }

    /// Removes every element.
    pub fn clear(&mut self) {
        self.slots.clear();
        self.free.clear();
        self.root = NIL;
        self.len = 0;
    }

    /// The value at the root, or `None` for an empty tree.
    pub fn root_value(&self) -> Option<&T> {
        if self.root == NIL {
            None
        } else {
            Some(&self.node(self.root).value)
        }
    }

    /// The smallest element, or `None` for an empty tree.
    pub fn minimum_value(&self) -> Option<&T> {
        if self.root == NIL {
            None
        } else {
            Some(&self.node(self.minimum(self.root)).value)
        }
    }

    /// The largest element, or `None` for an empty tree.
    pub fn maximum_value(&self) -> Option<&T> {
        if self.root == NIL {
            None
        } else {
            Some(&self.node(self.maximum(self.root)).value)
        }
    }

    /// Inserts `value`, returning whether it was newly added.
    ///
    /// A value comparing equal to an existing element (the comparator
    /// returning [`Ordering::Equal`]) leaves the tree unchanged.
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
                Ordering::Equal => return false,
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
        self.insert_fixup(index);
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

    /// Removes the element located by `probe`, returning it.
    ///
    /// `probe` receives a candidate element and returns how the sought key
    /// ranks against it ([`Ordering::Less`] descends left).
    pub fn remove_by(&mut self, probe: impl Fn(&T) -> Ordering) -> Option<T> {
        let index = self.locate_by(&probe);
        if index == NIL {
            None
        } else {
            Some(self.remove_index(index))
        }
    }

    /// Returns whether an element comparing equal to `value` is present.
    pub fn contains(&self, value: &T) -> bool {
        self.get(value).is_some()
    }

    /// Returns the stored element comparing equal to `value`, if any.
    pub fn get(&self, value: &T) -> Option<&T> {
        let comparator = &self.comparator;
        self.find_by(|candidate| comparator.compare(value, candidate))
    }

    /// Root-to-leaf comparator descent guided by `probe`.
    ///
    /// `probe` receives a candidate element and returns how the sought key
    /// ranks against it ([`Ordering::Less`] descends left).
    pub fn find_by(&self, probe: impl Fn(&T) -> Ordering) -> Option<&T> {
        let index = self.locate_by(&probe);
        if index == NIL {
            None
        } else {
            Some(&self.node(index).value)
        }
    }

    /// Mutable variant of [`find_by`](Self::find_by).
    ///
    /// The caller must not alter the parts of the element the tree's order
    /// comparator observes.
    pub fn find_by_mut(&mut self, probe: impl Fn(&T) -> Ordering) -> Option<&mut T> {
        let index = self.locate_by(&probe);
        if index == NIL {
            None
        } else {
            Some(&mut self.node_mut(index).value)
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
            color: Color::Red,
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

    fn swap_values(&mut self, first: usize, second: usize) {
        if first == second {
            return;
        }
        let (low, high) = if first < second {
            (first, second)
        } else {
            (second, first)
        };
        let (head, tail) = self.slots.split_at_mut(high);
        match (&mut head[low], &mut tail[0]) {
            (Slot::Occupied(left), Slot::Occupied(right)) => {
                std::mem::swap(&mut left.value, &mut right.value);
            }
            _ => unreachable!("swap across vacant slots"),
        }
    }

    fn color(&self, index: usize) -> Color {
        if index == NIL {
            Color::Black
        } else {
            self.node(index).color
        }
    }

    // Coloring the NIL sentinel is a silent no-op, matching the classic
    // sentinel formulation of the fix-up procedures.
    fn set_color(&mut self, index: usize, color: Color) {
        if index != NIL {
            self.node_mut(index).color = color;
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

    fn minimum(&self, mut index: usize) -> usize {
        while self.left_of(index) != NIL {
            index = self.left_of(index);
        }
        index
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
    // Rotations
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

    // =========================================================================
    // Insert fix-up: double-red repair by uncle-color case analysis
    // =========================================================================

    fn insert_fixup(&mut self, mut node: usize) {
        while self.color(self.parent_of(node)) == Color::Red {
            let parent = self.parent_of(node);
            let grandparent = self.parent_of(parent);
            if parent == self.left_of(grandparent) {
                let uncle = self.right_of(grandparent);
                if self.color(uncle) == Color::Red {
                    // Red uncle: recolor and push the violation upward.
                    self.set_color(parent, Color::Black);
                    self.set_color(uncle, Color::Black);
                    self.set_color(grandparent, Color::Red);
                    node = grandparent;
                } else {
                    if node == self.right_of(parent) {
                        // Inner case: rotate onto the outer case first.
                        node = parent;
                        self.rotate_left(node);
                    }
                    let parent = self.parent_of(node);
                    let grandparent = self.parent_of(parent);
                    self.set_color(parent, Color::Black);
                    self.set_color(grandparent, Color::Red);
                    self.rotate_right(grandparent);
                }
            } else {
                let uncle = self.left_of(grandparent);
                if self.color(uncle) == Color::Red {
                    self.set_color(parent, Color::Black);
                    self.set_color(uncle, Color::Black);
                    self.set_color(grandparent, Color::Red);
                    node = grandparent;
                } else {
                    if node == self.left_of(parent) {
                        node = parent;
                        self.rotate_right(node);
                    }
                    let parent = self.parent_of(node);
                    let grandparent = self.parent_of(parent);
                    self.set_color(parent, Color::Black);
                    self.set_color(grandparent, Color::Red);
                    self.rotate_left(grandparent);
                }
            }
        }
        let root = self.root;
        self.set_color(root, Color::Black);
    }

    // =========================================================================
    // Removal: reduce to <= 1 child, splice, repair double-black
    // =========================================================================

    fn remove_index(&mut self, mut node: usize) -> T {
        if self.left_of(node) != NIL && self.right_of(node) != NIL {
            // Two children: swap values with the in-order successor and
            // splice the successor out instead.
            let successor = self.minimum(self.right_of(node));
            self.swap_values(node, successor);
            node = successor;
        }

        let child = if self.left_of(node) != NIL {
            self.left_of(node)
        } else {
            self.right_of(node)
        };
        let parent = self.parent_of(node);
        let removed_color = self.color(node);

        if child != NIL {
            self.node_mut(child).parent = parent;
        }
        if parent == NIL {
            self.root = child;
        } else if self.left_of(parent) == node {
            self.node_mut(parent).left = child;
        } else {
            self.node_mut(parent).right = child;
        }

        let value = self.release(node);
        self.len -= 1;

        if removed_color == Color::Black {
            if self.color(child) == Color::Red {
                self.set_color(child, Color::Black);
            } else {
                self.remove_fixup(child, parent);
            }
        }
        value
    }

    /// Repairs the double-black deficiency left at `node` (possibly `NIL`)
    /// under `parent` by sibling case analysis.
    fn remove_fixup(&mut self, mut node: usize, mut parent: usize) {
        while node != self.root && self.color(node) == Color::Black {
            if parent == NIL {
                break;
            }
            if node == self.left_of(parent) {
                let mut sibling = self.right_of(parent);
                if self.color(sibling) == Color::Red {
                    // Red sibling: rotate to expose a black sibling.
                    self.set_color(sibling, Color::Black);
                    self.set_color(parent, Color::Red);
                    self.rotate_left(parent);
                    sibling = self.right_of(parent);
                }
                if self.color(self.left_of(sibling)) == Color::Black
                    && self.color(self.right_of(sibling)) == Color::Black
                {
                    // Black sibling, no red child: push the deficiency up.
                    self.set_color(sibling, Color::Red);
                    node = parent;
                    parent = self.parent_of(node);
                } else {
                    if self.color(self.right_of(sibling)) == Color::Black {
                        // Red child on the near side: rotate it outward.
                        let near = self.left_of(sibling);
                        self.set_color(near, Color::Black);
                        self.set_color(sibling, Color::Red);
                        self.rotate_right(sibling);
                        sibling = self.right_of(parent);
                    }
                    let parent_color = self.color(parent);
                    self.set_color(sibling, parent_color);
                    self.set_color(parent, Color::Black);
                    let far = self.right_of(sibling);
                    self.set_color(far, Color::Black);
                    self.rotate_left(parent);
                    node = self.root;
                    break;
                }
            } else {
                let mut sibling = self.left_of(parent);
                if self.color(sibling) == Color::Red {
                    self.set_color(sibling, Color::Black);
                    self.set_color(parent, Color::Red);
                    self.rotate_right(parent);
                    sibling = self.left_of(parent);
                }
                if self.color(self.right_of(sibling)) == Color::Black
                    && self.color(self.left_of(sibling)) == Color::Black
                {
                    self.set_color(sibling, Color::Red);
                    node = parent;
                    parent = self.parent_of(node);
                } else {
                    if self.color(self.left_of(sibling)) == Color::Black {
                        let near = self.right_of(sibling);
                        self.set_color(near, Color::Black);
                        self.set_color(sibling, Color::Red);
                        self.rotate_left(sibling);
                        sibling = self.left_of(parent);
                    }
                    let parent_color = self.color(parent);
                    self.set_color(sibling, parent_color);
                    self.set_color(parent, Color::Black);
                    let far = self.left_of(sibling);
                    self.set_color(far, Color::Black);
                    self.rotate_right(parent);
                    node = self.root;
                    break;
                }
            }
        }
        self.set_color(node, Color::Black);
    }
}

// =============================================================================
// Traversal iterators
// =============================================================================

/// Lazy in-order traversal over a [`RedBlackTree`].
pub struct InOrderIter<'a, T, C> {
    tree: &'a RedBlackTree<T, C>,
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

/// Lazy pre-order traversal over a [`RedBlackTree`].
pub struct PreOrderIter<'a, T, C> {
    tree: &'a RedBlackTree<T, C>,
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

/// Lazy post-order traversal over a [`RedBlackTree`].
pub struct PostOrderIter<'a, T, C> {
    tree: &'a RedBlackTree<T, C>,
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

impl<T, C: Comparator<T>> OrderedTree<T> for RedBlackTree<T, C> {
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
        Self::get(self, value).is_some()
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

impl<T: Clone, C: Comparator<T>> Sequence for RedBlackTree<T, C> {
    type Item = T;
    type Iter<'a>
        = std::iter::Cloned<InOrderIter<'a, T, C>>
    where
        Self: 'a;

    fn iterate(&self) -> Self::Iter<'_> {
        self.in_order().cloned()
    }
}

impl<T: Ord> Default for RedBlackTree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug, C: Comparator<T>> fmt::Debug for RedBlackTree<T, C> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_set().entries(self.in_order()).finish()
    }
}

impl<T: Ord> FromIterator<T> for RedBlackTree<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iterable: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iterable);
        tree
    }
}

impl<T, C: Comparator<T>> Extend<T> for RedBlackTree<T, C> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iterable: I) {
        for value in iterable {
            self.insert(value);
        }
    }
}
