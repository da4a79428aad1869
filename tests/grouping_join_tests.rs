//! Integration tests for grouping, lookups, and the three join shapes.

use pretty_assertions::assert_eq;
use riffle::sequence::Sequence;
use rstest::rstest;

#[derive(Debug, Clone, PartialEq, Eq)]
struct Owner {
    id: u32,
    name: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Pet {
    owner_id: u32,
    name: &'static str,
}

fn owners() -> Vec<Owner> {
    vec![
        Owner { id: 1, name: "Hedlund" },
        Owner { id: 2, name: "Adams" },
        Owner { id: 3, name: "Weiss" },
    ]
}

fn pets() -> Vec<Pet> {
    vec![
        Pet { owner_id: 2, name: "Barley" },
        Pet { owner_id: 1, name: "Boots" },
        Pet { owner_id: 2, name: "Whiskers" },
        Pet { owner_id: 1, name: "Daisy" },
    ]
}

// =============================================================================
// group_by
// =============================================================================

#[rstest]
fn test_group_by_first_key_encounter_order() {
    let numbers = vec![1, 4, 2, 7, 5, 8];
    let groups = (&numbers).group_by(|n| n % 3);
    let collected: Vec<(i32, Vec<i32>)> = groups
        .iterate()
        .map(|group| (*group.key(), group.elements().to_vec()))
        .collect();
    assert_eq!(
        collected,
        vec![(1, vec![1, 4, 7]), (2, vec![2, 5, 8])]
    );
}

#[rstest]
fn test_group_by_groups_are_sequences() {
    let words = vec!["ant", "bee", "cow", "bat"];
    let by_initial = (&words).group_by(|word| word.as_bytes()[0]);
    let first_group = by_initial.first().unwrap();
    assert_eq!(*first_group.key(), b'a');
    assert_eq!(first_group.count(), 1);
    let b_group = by_initial.iterate().nth(1).unwrap();
    assert_eq!(b_group.elements(), &["bee", "bat"]);
}

#[rstest]
fn test_group_by_with_custom_equality() {
    let words = vec!["Ant", "ant", "Bee"];
    let groups = (&words).group_by_with(|word| *word, |a, b| a.eq_ignore_ascii_case(b));
    assert_eq!(groups.count(), 2);
}

#[rstest]
fn test_group_by_is_deferred() {
    let mut numbers = vec![1, 2];
    {
        let groups = (&numbers).group_by(|n| n % 2);
        assert_eq!(groups.count(), 2);
    }
    numbers.push(4);
    let groups = (&numbers).group_by(|n| n % 2);
    let even = groups.iterate().nth(1).unwrap();
    assert_eq!(even.elements(), &[2, 4]);
}

// =============================================================================
// to_lookup
// =============================================================================

#[rstest]
fn test_lookup_offers_total_access() {
    let source = pets();
    let by_owner = (&source).to_lookup(|pet| pet.owner_id);
    assert_eq!(by_owner.len(), 2);
    assert_eq!(by_owner.get(&2).len(), 2);
    assert_eq!(by_owner.get(&1)[0].name, "Boots");
    // Absent keys yield an empty slice, never an error.
    assert_eq!(by_owner.get(&9), &[] as &[Pet]);
    assert!(!by_owner.contains_key(&9));
}

#[rstest]
fn test_lookup_is_a_snapshot() {
    let mut source = vec![1, 2, 1];
    let lookup = (&source).to_lookup(|n| *n);
    source.push(1);
    assert_eq!(lookup.get(&1).len(), 2);
}

#[rstest]
fn test_lookup_keys_in_first_encounter_order() {
    let numbers = vec![3, 1, 3, 2];
    let lookup = (&numbers).to_lookup(|n| *n);
    let keys: Vec<i32> = lookup.keys().copied().collect();
    assert_eq!(keys, vec![3, 1, 2]);
}

#[rstest]
fn test_lookup_with_custom_equality() {
    let words = vec!["Ant", "ant", "Bee"];
    let lookup = (&words).to_lookup_with(|word| *word, |a: &&str, b: &&str| {
        a.eq_ignore_ascii_case(b)
    });
    assert_eq!(lookup.len(), 2);
    assert_eq!(lookup.get(&"ANT").len(), 2);
}

// =============================================================================
// join
// =============================================================================

#[rstest]
fn test_join_emits_one_result_per_matching_pair() {
    let owner_rows = owners();
    let pet_rows = pets();
    let pairs = (&owner_rows).join(
        &pet_rows,
        |owner| owner.id,
        |pet| pet.owner_id,
        |owner, pet| (owner.name, pet.name),
    );
    assert_eq!(
        pairs.to_vec(),
        vec![
            ("Hedlund", "Boots"),
            ("Hedlund", "Daisy"),
            ("Adams", "Barley"),
            ("Adams", "Whiskers"),
        ]
    );
}

#[rstest]
fn test_join_drops_matchless_outer_elements() {
    let owner_rows = owners();
    let pet_rows = pets();
    let matched_owners = (&owner_rows)
        .join(&pet_rows, |o| o.id, |p| p.owner_id, |o, _| o.name)
        .distinct();
    assert!(!matched_owners.contains_element(&"Weiss"));
}

#[rstest]
fn test_join_with_custom_equality() {
    let left = vec![10, 25];
    let right = vec![11, 27, 29];
    // Correlate by decade.
    let pairs = (&left).join_with(
        &right,
        |n| *n,
        |n| *n,
        |a, b| (a, b),
        |a, b| a / 10 == b / 10,
    );
    assert_eq!(pairs.to_vec(), vec![(10, 11), (25, 27), (25, 29)]);
}

// =============================================================================
// left_join
// =============================================================================

#[rstest]
fn test_left_join_keeps_matchless_outer_elements() {
    let owner_rows = owners();
    let pet_rows = pets();
    let rows = (&owner_rows).left_join(
        &pet_rows,
        |owner| owner.id,
        |pet| pet.owner_id,
        |owner, pet| (owner.name, pet.map(|p| p.name)),
    );
    assert_eq!(
        rows.to_vec(),
        vec![
            ("Hedlund", Some("Boots")),
            ("Hedlund", Some("Daisy")),
            ("Adams", Some("Barley")),
            ("Adams", Some("Whiskers")),
            ("Weiss", None),
        ]
    );
}

#[rstest]
fn test_left_join_on_empty_inner() {
    let owner_rows = owners();
    let empty: Vec<Pet> = Vec::new();
    let rows = (&owner_rows).left_join(
        &empty,
        |owner| owner.id,
        |pet| pet.owner_id,
        |owner, pet| (owner.id, pet.is_some()),
    );
    assert_eq!(rows.to_vec(), vec![(1, false), (2, false), (3, false)]);
}

// =============================================================================
// group_join
// =============================================================================

#[rstest]
fn test_group_join_emits_one_result_per_outer_element() {
    let owner_rows = owners();
    let pet_rows = pets();
    let rows = (&owner_rows).group_join(
        &pet_rows,
        |owner| owner.id,
        |pet| pet.owner_id,
        |owner, matching| (owner.name, matching.len()),
    );
    assert_eq!(
        rows.to_vec(),
        vec![("Hedlund", 2), ("Adams", 2), ("Weiss", 0)]
    );
}

#[rstest]
fn test_group_join_preserves_inner_order_within_groups() {
    let owner_rows = owners();
    let pet_rows = pets();
    let rows = (&owner_rows).group_join(
        &pet_rows,
        |owner| owner.id,
        |pet| pet.owner_id,
        |_, matching| matching.into_iter().map(|p| p.name).collect::<Vec<_>>(),
    );
    assert_eq!(
        rows.to_vec(),
        vec![vec!["Boots", "Daisy"], vec!["Barley", "Whiskers"], vec![]]
    );
}

// =============================================================================
// Prelude surface
// =============================================================================

mod prelude_names {
    use pretty_assertions::assert_eq;
    use riffle::prelude::*;
    use rstest::rstest;

    /// The prelude alone is enough to annotate query results.
    #[rstest]
    fn test_prelude_names_query_result_types() {
        let numbers = vec![3, 1, 3, 2];

        let by_value: Lookup<i32, i32> = (&numbers).to_lookup(|n| *n);
        assert_eq!(by_value.get(&3).len(), 2);

        let groups: Vec<Grouping<i32, i32>> = (&numbers).group_by(|n| n % 2).to_vec();
        assert_eq!(groups.len(), 2);

        let ordered: Ordered<&Vec<i32>> = (&numbers).order_by(|n| *n);
        assert_eq!(ordered.to_vec(), vec![1, 2, 3, 3]);
    }
}
