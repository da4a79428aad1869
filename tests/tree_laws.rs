//! Property-based tests shared by both ordered-tree variants.
//!
//! These verify the structural laws the trees promise for arbitrary
//! workloads: sorted duplicate-free iteration, membership consistency, and
//! complete removal.

use proptest::prelude::*;
use riffle::tree::{OrderedTree, RedBlackTree, SplayTree};

fn sorted_unique(values: &[i32]) -> Vec<i32> {
    let mut sorted = values.to_vec();
    sorted.sort_unstable();
    sorted.dedup();
    sorted
}

proptest! {
    /// Law: in-order traversal yields the distinct inputs ascending.
    #[test]
    fn prop_red_black_in_order_is_sorted_unique(values in prop::collection::vec(any::<i32>(), 0..200)) {
        let tree: RedBlackTree<i32> = values.iter().copied().collect();
        let traversed: Vec<i32> = tree.in_order().copied().collect();
        prop_assert_eq!(traversed, sorted_unique(&values));
    }

    /// Law: the splay tree yields exactly the same sorted view.
    #[test]
    fn prop_splay_in_order_is_sorted_unique(values in prop::collection::vec(any::<i32>(), 0..200)) {
        let tree: SplayTree<i32> = values.iter().copied().collect();
        let traversed: Vec<i32> = tree.in_order().copied().collect();
        prop_assert_eq!(traversed, sorted_unique(&values));
    }

    /// Law: both variants agree element-for-element on any input.
    #[test]
    fn prop_variants_agree(values in prop::collection::vec(any::<i32>(), 0..200)) {
        let red_black: RedBlackTree<i32> = values.iter().copied().collect();
        let splay: SplayTree<i32> = values.iter().copied().collect();
        let left: Vec<i32> = red_black.in_order().copied().collect();
        let right: Vec<i32> = splay.in_order().copied().collect();
        prop_assert_eq!(left, right);
    }

    /// Law: membership matches the input set, inserted or probed.
    #[test]
    fn prop_membership_is_consistent(
        values in prop::collection::vec(0i32..100, 0..100),
        probes in prop::collection::vec(0i32..100, 0..50),
    ) {
        let tree: RedBlackTree<i32> = values.iter().copied().collect();
        for probe in probes {
            prop_assert_eq!(tree.contains(&probe), values.contains(&probe));
        }
    }

    /// Law: removing every distinct input leaves an empty tree, and every
    /// removal reports success exactly once.
    #[test]
    fn prop_remove_all_empties_red_black(values in prop::collection::vec(any::<i32>(), 0..150)) {
        let mut tree: RedBlackTree<i32> = values.iter().copied().collect();
        for value in sorted_unique(&values) {
            prop_assert!(OrderedTree::remove(&mut tree, &value));
            prop_assert!(!tree.in_order().any(|stored| *stored == value));
        }
        prop_assert!(tree.is_empty());
    }

    /// Law: the splay variant also empties completely, in arbitrary
    /// removal order.
    #[test]
    fn prop_remove_all_empties_splay(values in prop::collection::vec(any::<i32>(), 0..150)) {
        let mut tree: SplayTree<i32> = values.iter().copied().collect();
        let mut remaining = sorted_unique(&values);
        // Remove from the middle outward to vary join shapes.
        while !remaining.is_empty() {
            let value = remaining.remove(remaining.len() / 2);
            prop_assert!(tree.remove(&value));
        }
        prop_assert!(tree.is_empty());
    }

    /// Law: interleaved inserts and removes keep the sorted view equal to a
    /// model set.
    #[test]
    fn prop_interleaved_ops_match_model(
        operations in prop::collection::vec((any::<bool>(), 0i32..50), 0..200),
    ) {
        let mut tree: RedBlackTree<i32> = RedBlackTree::new();
        let mut model = std::collections::BTreeSet::new();
        for (is_insert, value) in operations {
            if is_insert {
                prop_assert_eq!(tree.insert(value), model.insert(value));
            } else {
                prop_assert_eq!(OrderedTree::remove(&mut tree, &value), model.remove(&value));
            }
        }
        let traversed: Vec<i32> = tree.in_order().copied().collect();
        let expected: Vec<i32> = model.into_iter().collect();
        prop_assert_eq!(traversed, expected);
    }
}
