//! Integration tests for `SortedSet` and `SortedMap`.

use pretty_assertions::assert_eq;
use riffle::compare::compare_fn;
use riffle::containers::{SortedMap, SortedSet};
use riffle::error::QueryError;
use riffle::sequence::Sequence;
use rstest::rstest;

// =============================================================================
// SortedSet
// =============================================================================

#[rstest]
fn test_set_new_is_empty() {
    let set: SortedSet<i32> = SortedSet::new();
    assert!(set.is_empty());
    assert_eq!(set.len(), 0);
    assert_eq!(set.minimum(), None);
    assert_eq!(set.maximum(), None);
}

#[rstest]
fn test_set_insert_rejects_duplicates() {
    let mut set = SortedSet::new();
    assert!(set.insert(3));
    assert!(set.insert(1));
    assert!(!set.insert(3));
    assert_eq!(set.len(), 2);
}

#[rstest]
fn test_set_iterates_ascending() {
    let set: SortedSet<i32> = [5, 1, 4, 2, 3].into_iter().collect();
    let values: Vec<i32> = set.iter().copied().collect();
    assert_eq!(values, vec![1, 2, 3, 4, 5]);
    assert_eq!(set.minimum(), Some(&1));
    assert_eq!(set.maximum(), Some(&5));
}

#[rstest]
fn test_set_remove_and_contains() {
    let mut set: SortedSet<i32> = [1, 2, 3].into_iter().collect();
    assert!(set.contains(&2));
    assert!(set.remove(&2));
    assert!(!set.remove(&2));
    assert!(!set.contains(&2));
    assert_eq!(set.len(), 2);
}

#[rstest]
fn test_set_with_comparator_defines_order_and_identity() {
    let mut set = SortedSet::with_comparator(compare_fn(|left: &String, right: &String| {
        left.to_lowercase().cmp(&right.to_lowercase())
    }));
    assert!(set.insert("Pear".to_string()));
    assert!(set.insert("apple".to_string()));
    assert!(!set.insert("PEAR".to_string()));
    let values: Vec<String> = set.iter().cloned().collect();
    assert_eq!(values, vec!["apple".to_string(), "Pear".to_string()]);
}

#[rstest]
fn test_set_clear() {
    let mut set: SortedSet<i32> = [1, 2].into_iter().collect();
    set.clear();
    assert!(set.is_empty());
    assert!(set.insert(1));
}

#[rstest]
fn test_set_is_a_sequence_source() {
    let set: SortedSet<i32> = [4, 1, 3, 2].into_iter().collect();
    let doubled_evens = (&set).filter(|n| *n % 2 == 0).select(|n| n * 2);
    assert_eq!(doubled_evens.to_vec(), vec![4, 8]);
}

#[rstest]
fn test_set_debug_format() {
    let set: SortedSet<i32> = [2, 1].into_iter().collect();
    assert_eq!(format!("{set:?}"), "{1, 2}");
}

// =============================================================================
// SortedMap
// =============================================================================

#[rstest]
fn test_map_new_is_empty() {
    let map: SortedMap<i32, &str> = SortedMap::new();
    assert!(map.is_empty());
    assert_eq!(map.len(), 0);
    assert_eq!(map.get(&1), None);
}

#[rstest]
fn test_map_insert_replaces_and_returns_previous() {
    let mut map = SortedMap::new();
    assert_eq!(map.insert(1, "one"), None);
    assert_eq!(map.insert(2, "two"), None);
    assert_eq!(map.insert(1, "uno"), Some("one"));
    assert_eq!(map.len(), 2);
    assert_eq!(map.get(&1), Some(&"uno"));
}

#[rstest]
fn test_map_try_insert_rejects_present_key() {
    let mut map = SortedMap::new();
    assert_eq!(map.try_insert(1, "one"), Ok(()));
    assert_eq!(map.try_insert(1, "uno"), Err(QueryError::KeyAlreadyAdded));
    assert_eq!(map.get(&1), Some(&"one"));
}

#[rstest]
fn test_map_get_or_err() {
    let mut map = SortedMap::new();
    map.insert(1, "one");
    assert_eq!(map.get_or_err(&1), Ok(&"one"));
    assert_eq!(map.get_or_err(&2), Err(QueryError::KeyNotFound));
}

#[rstest]
fn test_map_get_mut() {
    let mut map = SortedMap::new();
    map.insert(1, String::from("one"));
    if let Some(value) = map.get_mut(&1) {
        value.push_str("!");
    }
    assert_eq!(map.get(&1), Some(&String::from("one!")));
}

#[rstest]
fn test_map_remove() {
    let mut map: SortedMap<i32, &str> = [(1, "one"), (2, "two")].into_iter().collect();
    assert_eq!(map.remove(&1), Some("one"));
    assert_eq!(map.remove(&1), None);
    assert!(!map.contains_key(&1));
    assert_eq!(map.len(), 1);
}

#[rstest]
fn test_map_iterates_ascending_by_key() {
    let map: SortedMap<i32, &str> = [(3, "three"), (1, "one"), (2, "two")].into_iter().collect();
    let keys: Vec<i32> = map.keys().copied().collect();
    let values: Vec<&str> = map.values().copied().collect();
    assert_eq!(keys, vec![1, 2, 3]);
    assert_eq!(values, vec!["one", "two", "three"]);
}

#[rstest]
fn test_map_with_key_comparator() {
    let mut map = SortedMap::with_comparator(compare_fn(|left: &i32, right: &i32| {
        right.cmp(left)
    }));
    map.insert(1, "one");
    map.insert(3, "three");
    map.insert(2, "two");
    let keys: Vec<i32> = map.keys().copied().collect();
    assert_eq!(keys, vec![3, 2, 1]);
}

#[rstest]
fn test_map_is_a_sequence_of_pairs() {
    let map: SortedMap<i32, &str> = [(2, "two"), (1, "one")].into_iter().collect();
    let rendered = (&map).select(|(key, value)| format!("{key}={value}"));
    assert_eq!(rendered.to_vec(), vec!["1=one", "2=two"]);
}

#[rstest]
fn test_map_from_iterator_later_pair_wins() {
    let map: SortedMap<i32, &str> = [(1, "one"), (1, "uno")].into_iter().collect();
    assert_eq!(map.len(), 1);
    assert_eq!(map.get(&1), Some(&"uno"));
}

#[rstest]
fn test_map_debug_format() {
    let map: SortedMap<i32, &str> = [(2, "b"), (1, "a")].into_iter().collect();
    assert_eq!(format!("{map:?}"), r#"{1: "a", 2: "b"}"#);
}
