//! Property-based tests for the query engine.
//!
//! These verify the operator laws for arbitrary inputs: agreement between
//! overloads of one semantics, stability of ordering, replayability, and
//! conservation across partitioning.

use proptest::prelude::*;
use riffle::compare::compare_fn;
use riffle::sequence::Sequence;

proptest! {
    /// Law: a replayed enumeration yields exactly the same elements.
    #[test]
    fn prop_enumeration_is_replayable(values in prop::collection::vec(any::<i32>(), 0..100)) {
        let pipeline = (&values).filter(|n| *n % 3 != 0).select(|n| n.wrapping_mul(2));
        prop_assert_eq!(pipeline.to_vec(), pipeline.to_vec());
    }

    /// Law: skip(n) and take(n) partition the sequence.
    #[test]
    fn prop_skip_take_partition(
        values in prop::collection::vec(any::<i32>(), 0..100),
        count in 0usize..120,
    ) {
        let head = (&values).take(count).to_vec();
        let tail = (&values).skip(count).to_vec();
        let mut rejoined = head;
        rejoined.extend(tail);
        prop_assert_eq!(rejoined, values);
    }

    /// Law: skip_last(n) and take_last(n) partition the sequence.
    #[test]
    fn prop_last_partition(
        values in prop::collection::vec(any::<i32>(), 0..100),
        count in 0usize..120,
    ) {
        let head = (&values).skip_last(count).to_vec();
        let tail = (&values).take_last(count).to_vec();
        let mut rejoined = head;
        rejoined.extend(tail);
        prop_assert_eq!(rejoined, values);
    }

    /// Law: chunked elements concatenate back to the input, and only the
    /// final chunk may run short.
    #[test]
    fn prop_chunk_conserves_elements(
        values in prop::collection::vec(any::<i32>(), 0..100),
        size in 1usize..10,
    ) {
        let chunks = (&values).chunk(size).unwrap().to_vec();
        if !chunks.is_empty() {
            for chunk in &chunks[..chunks.len() - 1] {
                prop_assert_eq!(chunk.len(), size);
            }
            prop_assert!(chunks[chunks.len() - 1].len() <= size);
        }
        let rejoined: Vec<i32> = chunks.into_iter().flatten().collect();
        prop_assert_eq!(rejoined, values);
    }

    /// Law: distinct keeps the first occurrence and never reorders.
    #[test]
    fn prop_distinct_keeps_first_occurrences(values in prop::collection::vec(0i32..20, 0..100)) {
        let distinct = (&values).distinct().to_vec();
        let mut expected = Vec::new();
        for value in &values {
            if !expected.contains(value) {
                expected.push(*value);
            }
        }
        prop_assert_eq!(distinct, expected);
    }

    /// Law: union equals concat followed by distinct.
    #[test]
    fn prop_union_is_concat_distinct(
        first in prop::collection::vec(0i32..20, 0..50),
        second in prop::collection::vec(0i32..20, 0..50),
    ) {
        let union = (&first).union(&second).to_vec();
        let concat_distinct = (&first).concat(&second).distinct().to_vec();
        prop_assert_eq!(union, concat_distinct);
    }

    /// Law: the pairwise and merge-based membership overloads agree.
    #[test]
    fn prop_membership_overloads_agree(
        first in prop::collection::vec(0i32..30, 0..60),
        second in prop::collection::vec(0i32..30, 0..60),
    ) {
        let natural = compare_fn(|left: &i32, right: &i32| left.cmp(right));
        prop_assert_eq!(
            (&first).intersect(&second).to_vec(),
            (&first).intersect_ordered(&second, natural).to_vec()
        );
        let natural = compare_fn(|left: &i32, right: &i32| left.cmp(right));
        prop_assert_eq!(
            (&first).except(&second).to_vec(),
            (&first).except_ordered(&second, natural).to_vec()
        );
    }

    /// Law: intersect and except partition the first operand by membership.
    #[test]
    fn prop_intersect_except_partition(
        first in prop::collection::vec(0i32..30, 0..60),
        second in prop::collection::vec(0i32..30, 0..60),
    ) {
        let kept = (&first).intersect(&second).count();
        let dropped = (&first).except(&second).count();
        prop_assert_eq!(kept + dropped, first.len());
    }

    /// Law: order_by sorts stably by key.
    #[test]
    fn prop_order_by_is_stable(values in prop::collection::vec((0u8..10, any::<i32>()), 0..80)) {
        let sorted = (&values).order_by(|pair| pair.0).to_vec();
        let mut expected = values;
        expected.sort_by_key(|pair| pair.0);
        prop_assert_eq!(sorted, expected);
    }

    /// Law: reverse is an involution.
    #[test]
    fn prop_reverse_twice_is_identity(values in prop::collection::vec(any::<i32>(), 0..100)) {
        let twice = (&values).reverse().reverse().to_vec();
        prop_assert_eq!(twice, values);
    }

    /// Law: group_by conserves every element exactly once.
    #[test]
    fn prop_group_by_conserves_elements(values in prop::collection::vec(0i32..15, 0..100)) {
        let groups = (&values).group_by(|n| n % 5);
        let total: usize = groups.iterate().map(|group| group.len()).sum();
        prop_assert_eq!(total, values.len());
        for group in groups.iterate() {
            let key = *group.key();
            prop_assert!(group.iter().all(|value| value % 5 == key));
        }
    }

    /// Law: to_sorted_set holds exactly the distinct values, ascending.
    #[test]
    fn prop_to_sorted_set_matches_model(values in prop::collection::vec(any::<i32>(), 0..100)) {
        let set = (&values).to_sorted_set();
        let ascending: Vec<i32> = set.iter().copied().collect();
        let mut expected = values;
        expected.sort_unstable();
        expected.dedup();
        prop_assert_eq!(ascending, expected);
    }
}
