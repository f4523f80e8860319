#![cfg(feature = "bitset")]
//! Integration tests for Bitset.

use llrb_collections::set::bitset::{Bitset, BitsetError, WORD_BITS, chunk_location, member_value};
use proptest::prelude::*;
use rstest::rstest;

fn reference_count(set: &Bitset) -> u64 {
    set.iter().count() as u64
}

// =============================================================================
// Scenario Tests
// =============================================================================

#[rstest]
fn test_make_and_add_with_repeat() {
    let mut set = Bitset::new();
    for member in [-1, 28, 18, 28, 9] {
        set.add(member).unwrap();
    }
    assert_eq!(set.cardinality(), 4);
    assert_eq!(set.iter().collect::<Vec<_>>(), vec![-1, 9, 18, 28]);
}

#[rstest]
fn test_disjoint_ranges() {
    let set_a = Bitset::try_from_members(-100..=0).unwrap();
    let set_b = Bitset::try_from_members(1..=100).unwrap();
    assert!(set_a.is_disjoint(&set_b));
    assert!(!set_a.intersects(&set_b));
    assert_eq!(set_a.union(&set_b).cardinality(), 201);
}

#[rstest]
fn test_mixed_member_types_share_values() {
    let mut set = Bitset::new();
    set.add(7_u8).unwrap();
    set.add(-7_i8).unwrap();
    assert!(set.contains(7_i128));
    assert!(set.contains(-7_isize));
    assert!(set.remove(7_u64));
    assert!(!set.contains(7_u16));
}

#[rstest]
#[case(u128::MAX)]
#[case(u128::from(u64::MAX) << 64)]
fn test_huge_unsigned_members_are_rejected(#[case] member: u128) {
    let mut set = Bitset::new();
    let result = set.add(member);
    assert!(matches!(result, Err(BitsetError::OutOfRange { .. })));
    assert_eq!(
        result.unwrap_err().to_string(),
        format!("value {member} is outside the range a bitset can hold")
    );
}

#[rstest]
fn test_largest_storable_members() {
    let top = i128::from(i64::MAX) * i128::from(WORD_BITS) + 63;
    let bottom = i128::from(i64::MIN) * i128::from(WORD_BITS);
    let mut set = Bitset::new();
    assert_eq!(set.add(top), Ok(true));
    assert_eq!(set.add(bottom), Ok(true));
    assert!(set.add(top + 1).is_err());
    assert!(set.add(bottom - 1).is_err());
    assert_eq!(set.iter().collect::<Vec<_>>(), vec![bottom, top]);
}

// =============================================================================
// Bit Count Consistency
// =============================================================================

#[rstest]
fn test_cardinality_tracks_adds_and_removes() {
    const LOOP_SIZE: i64 = 1000;
    let mut set = Bitset::new();
    let mut state = 0x9E37_79B9_7F4A_7C15_u64;
    let mut next = || {
        state ^= state << 13;
        state ^= state >> 7;
        state ^= state << 17;
        state
    };

    for member in 0..LOOP_SIZE {
        set.add(member).unwrap();
        assert_eq!(reference_count(&set), set.cardinality());
    }
    for _ in 0..LOOP_SIZE {
        set.add(next() >> 1).unwrap();
        assert_eq!(reference_count(&set), set.cardinality());
    }
    for _ in 0..LOOP_SIZE {
        set.add(next() % 2000).unwrap();
        assert_eq!(reference_count(&set), set.cardinality());
    }
    for _ in 0..LOOP_SIZE {
        set.remove(next() >> 1);
        assert_eq!(reference_count(&set), set.cardinality());
    }
    for _ in 0..LOOP_SIZE {
        set.remove(next() % 2000);
        assert_eq!(reference_count(&set), set.cardinality());
    }
    for member in 0..LOOP_SIZE {
        set.remove(member);
        assert_eq!(reference_count(&set), set.cardinality());
    }
}

#[rstest]
fn test_clear_empties_set() {
    let mut set = Bitset::try_from_members(0..500).unwrap();
    assert_eq!(set.chunk_count(), 8);
    set.clear();
    assert!(set.is_empty());
    assert_eq!(set.chunk_count(), 0);
    assert_eq!(set.to_string(), "{}");
}

// =============================================================================
// Key Mapping Properties
// =============================================================================

proptest! {
    /// Law: value -> (key, offset) -> value is the identity.
    #[test]
    fn prop_location_round_trips(value in any::<i64>()) {
        let (key, offset) = chunk_location(i128::from(value)).unwrap();
        prop_assert!(offset < WORD_BITS);
        prop_assert_eq!(member_value(key, offset), i128::from(value));
    }

    /// Law: negative values map to negative keys (floor division).
    #[test]
    fn prop_negative_values_have_negative_keys(value in i64::MIN..0) {
        let (key, _) = chunk_location(i128::from(value)).unwrap();
        prop_assert!(key < 0);
    }

    /// Law: iteration is strictly ascending and matches a sorted, deduplicated input.
    #[test]
    fn prop_iteration_matches_sorted_input(members in prop::collection::vec(any::<i32>(), 0..200)) {
        let set = Bitset::try_from_members(members.iter().copied()).unwrap();
        let mut expected: Vec<i128> = members.into_iter().map(i128::from).collect();
        expected.sort_unstable();
        expected.dedup();
        prop_assert_eq!(set.cardinality(), expected.len() as u64);
        prop_assert_eq!(set.iter().collect::<Vec<_>>(), expected);
    }

    /// Law: |A ∪ B| = |A| + |B| - |A ∩ B|, and disjointness is symmetric.
    #[test]
    fn prop_set_algebra(
        members_a in prop::collection::vec(-300_i32..300, 0..100),
        members_b in prop::collection::vec(-300_i32..300, 0..100)
    ) {
        let set_a = Bitset::try_from_members(members_a).unwrap();
        let set_b = Bitset::try_from_members(members_b).unwrap();
        let union = set_a.union(&set_b);
        let intersection = set_a.intersection(&set_b);
        prop_assert_eq!(
            union.cardinality(),
            set_a.cardinality() + set_b.cardinality() - intersection.cardinality()
        );
        prop_assert_eq!(set_a.intersects(&set_b), set_b.intersects(&set_a));
        prop_assert_eq!(set_a.is_disjoint(&set_b), !set_a.intersects(&set_b));
        prop_assert!(intersection.is_subset(&set_a));
        prop_assert!(union.is_superset(&set_b));
        prop_assert_eq!(
            set_a.symmetric_difference(&set_b),
            set_a.difference(&set_b).union(&set_b.difference(&set_a))
        );
    }
}
