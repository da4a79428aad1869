//! Integration tests for the red-black tree.

use pretty_assertions::assert_eq;
use riffle::compare::compare_fn;
use riffle::sequence::Sequence;
use riffle::tree::{OrderedTree, RedBlackTree};
use rstest::rstest;

fn tree_of(values: &[i32]) -> RedBlackTree<i32> {
    values.iter().copied().collect()
}

// =============================================================================
// Construction and basic queries
// =============================================================================

#[rstest]
fn test_new_tree_is_empty() {
    let tree: RedBlackTree<i32> = RedBlackTree::new();
    assert!(tree.is_empty());
    assert_eq!(tree.len(), 0);
    assert_eq!(tree.root_value(), None);
    assert_eq!(tree.minimum_value(), None);
    assert_eq!(tree.maximum_value(), None);
}

#[rstest]
fn test_insert_reports_newly_added() {
    let mut tree = RedBlackTree::new();
    assert!(tree.insert(10));
    assert!(tree.insert(20));
    assert!(!tree.insert(10));
    assert_eq!(tree.len(), 2);
}

#[rstest]
fn test_duplicate_insert_leaves_tree_unchanged() {
    let mut tree = tree_of(&[3, 1, 4]);
    let before: Vec<i32> = tree.in_order().copied().collect();
    assert!(!tree.insert(4));
    let after: Vec<i32> = tree.in_order().copied().collect();
    assert_eq!(before, after);
    assert_eq!(tree.len(), 3);
}

#[rstest]
fn test_contains_and_get() {
    let tree = tree_of(&[5, 3, 8]);
    assert!(tree.contains(&3));
    assert!(!tree.contains(&4));
    assert_eq!(tree.get(&8), Some(&8));
    assert_eq!(tree.get(&9), None);
}

#[rstest]
fn test_minimum_and_maximum() {
    let tree = tree_of(&[7, 2, 9, 4, 1]);
    assert_eq!(tree.minimum_value(), Some(&1));
    assert_eq!(tree.maximum_value(), Some(&9));
}

// =============================================================================
// Removal
// =============================================================================

#[rstest]
fn test_remove_present_value() {
    let mut tree = tree_of(&[5, 3, 8, 1]);
    assert!(tree.remove(&3));
    assert_eq!(tree.len(), 3);
    let values: Vec<i32> = tree.in_order().copied().collect();
    assert_eq!(values, vec![1, 5, 8]);
}

#[rstest]
fn test_remove_absent_value_is_a_no_op() {
    let mut tree = tree_of(&[5, 3, 8]);
    assert!(!tree.remove(&4));
    assert_eq!(tree.len(), 3);
}

#[rstest]
fn test_remove_from_empty_tree() {
    let mut tree: RedBlackTree<i32> = RedBlackTree::new();
    assert!(!tree.remove(&1));
}

#[rstest]
fn test_remove_root_until_empty() {
    let mut tree = tree_of(&[4, 2, 6, 1, 3, 5, 7]);
    while let Some(&root) = tree.root_value() {
        assert!(tree.remove(&root));
    }
    assert!(tree.is_empty());
    assert_eq!(tree.in_order().count(), 0);
}

#[rstest]
fn test_clear_resets_the_tree() {
    let mut tree = tree_of(&[1, 2, 3]);
    tree.clear();
    assert!(tree.is_empty());
    assert!(tree.insert(2));
    assert_eq!(tree.len(), 1);
}

// =============================================================================
// Traversal order
// =============================================================================

#[rstest]
fn test_traversals_after_known_insertions() {
    let tree = tree_of(&[4, 1, 3, 5, 2]);

    let in_order: Vec<i32> = tree.in_order().copied().collect();
    let pre_order: Vec<i32> = tree.pre_order().copied().collect();
    let post_order: Vec<i32> = tree.post_order().copied().collect();

    assert_eq!(in_order, vec![1, 2, 3, 4, 5]);
    assert_eq!(pre_order, vec![3, 1, 2, 4, 5]);
    assert_eq!(post_order, vec![2, 1, 5, 4, 3]);
}

#[rstest]
fn test_in_order_is_sorted_for_descending_input() {
    let tree = tree_of(&[9, 8, 7, 6, 5, 4, 3, 2, 1]);
    let values: Vec<i32> = tree.in_order().copied().collect();
    assert_eq!(values, vec![1, 2, 3, 4, 5, 6, 7, 8, 9]);
}

#[rstest]
fn test_traversals_visit_every_element_once() {
    let tree = tree_of(&[6, 2, 8, 1, 4, 7, 9, 3, 5]);
    let mut pre: Vec<i32> = tree.pre_order().copied().collect();
    let mut post: Vec<i32> = tree.post_order().copied().collect();
    pre.sort_unstable();
    post.sort_unstable();
    let sorted: Vec<i32> = tree.in_order().copied().collect();
    assert_eq!(pre, sorted);
    assert_eq!(post, sorted);
}

// =============================================================================
// Custom comparators
// =============================================================================

#[rstest]
fn test_descending_comparator_reverses_in_order() {
    let mut tree = RedBlackTree::with_comparator(compare_fn(|left: &i32, right: &i32| {
        right.cmp(left)
    }));
    for value in [3, 1, 4, 1, 5, 9, 2, 6] {
        tree.insert(value);
    }
    let values: Vec<i32> = tree.in_order().copied().collect();
    assert_eq!(values, vec![9, 6, 5, 4, 3, 2, 1]);
}

#[rstest]
fn test_comparator_equality_defines_uniqueness() {
    // Case-insensitive ordering treats "Apple" and "apple" as one element.
    let mut tree = RedBlackTree::with_comparator(compare_fn(|left: &String, right: &String| {
        left.to_lowercase().cmp(&right.to_lowercase())
    }));
    assert!(tree.insert("Apple".to_string()));
    assert!(!tree.insert("apple".to_string()));
    assert_eq!(tree.len(), 1);
    assert_eq!(tree.get(&"APPLE".to_string()), Some(&"Apple".to_string()));
}

// =============================================================================
// Probing
// =============================================================================

#[rstest]
fn test_find_by_descends_by_probe() {
    let mut tree: RedBlackTree<(i32, &str), _> =
        RedBlackTree::with_comparator(compare_fn(|left: &(i32, &str), right: &(i32, &str)| {
            left.0.cmp(&right.0)
        }));
    tree.insert((1, "one"));
    tree.insert((2, "two"));
    tree.insert((3, "three"));

    assert_eq!(tree.find_by(|entry| 2.cmp(&entry.0)), Some(&(2, "two")));
    assert_eq!(tree.find_by(|entry| 9.cmp(&entry.0)), None);
}

#[rstest]
fn test_find_scans_without_order() {
    let tree = tree_of(&[10, 20, 30, 40]);
    let found = tree.find(|value| value % 20 == 0);
    assert!(matches!(found, Some(value) if value % 20 == 0));
    assert_eq!(tree.find(|value| *value > 100), None);
}

#[rstest]
fn test_remove_by_returns_the_element() {
    let mut tree = tree_of(&[1, 2, 3]);
    assert_eq!(tree.remove_by(|value| 2.cmp(value)), Some(2));
    assert_eq!(tree.remove_by(|value| 2.cmp(value)), None);
    assert_eq!(tree.len(), 2);
}

// =============================================================================
// Trait surface and query integration
// =============================================================================

#[rstest]
fn test_ordered_tree_contract() {
    fn exercise<T: OrderedTree<i32>>(tree: &mut T) {
        assert!(tree.insert(2));
        assert!(tree.insert(1));
        assert!(tree.contains(&1));
        assert!(!tree.contains(&3));
        assert!(tree.remove(&1));
        assert_eq!(tree.len(), 1);
    }
    let mut tree: RedBlackTree<i32> = RedBlackTree::new();
    exercise(&mut tree);
}

#[rstest]
fn test_tree_is_a_sequence_source() {
    let tree = tree_of(&[5, 1, 4, 2, 3]);
    let even_squares = (&tree).filter(|value| *value % 2 == 0).select(|value| value * value);
    assert_eq!(even_squares.to_vec(), vec![4, 16]);
}

#[rstest]
fn test_pipeline_reflects_later_mutation() {
    let mut tree = tree_of(&[1, 2, 3]);
    tree.insert(4);
    let doubled = (&tree).select(|value| value * 2);
    assert_eq!(doubled.to_vec(), vec![2, 4, 6, 8]);
}

#[rstest]
fn test_debug_renders_as_a_set() {
    let tree = tree_of(&[2, 1, 3]);
    assert_eq!(format!("{tree:?}"), "{1, 2, 3}");
}
