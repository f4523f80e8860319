#![cfg(feature = "sort")]
//! Integration tests for the tree sort adapters.

use llrb_collections::ordering::ReverseOrder;
use llrb_collections::sort::{self, TreeSortExt};
use proptest::prelude::*;
use rstest::rstest;

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
struct Record {
    priority: u8,
    label: &'static str,
}

fn by_priority(left: &Record, right: &Record) -> std::cmp::Ordering {
    left.priority.cmp(&right.priority)
}

fn records() -> Vec<Record> {
    vec![
        Record { priority: 2, label: "write" },
        Record { priority: 1, label: "read" },
        Record { priority: 2, label: "flush" },
        Record { priority: 0, label: "open" },
        Record { priority: 1, label: "seek" },
    ]
}

fn labels(records: &[Record]) -> Vec<&'static str> {
    records.iter().map(|record| record.label).collect()
}

#[rstest]
fn test_sort_by_key_is_stable() {
    let sorted = sort::sort_by(records(), by_priority);
    assert_eq!(labels(&sorted), vec!["open", "read", "seek", "write", "flush"]);
}

#[rstest]
fn test_reverse_sort_by_key_mirrors_ascending() {
    let sorted = sort::reverse_sort_by(records(), by_priority);
    assert_eq!(labels(&sorted), vec!["flush", "write", "seek", "read", "open"]);
}

#[rstest]
fn test_filtered_sort_by_key_keeps_last_seen() {
    let sorted = sort::sort_filtered_by(records(), by_priority);
    assert_eq!(labels(&sorted), vec!["open", "seek", "flush"]);
    let reversed = sort::reverse_sort_filtered_by(records(), by_priority);
    assert_eq!(labels(&reversed), vec!["flush", "seek", "open"]);
}

#[rstest]
fn test_sort_with_reverse_comparator_matches_reverse_sort() {
    let input = vec![4, 8, 1, 8, 3];
    assert_eq!(sort::sort_by(input.clone(), ReverseOrder), sort::reverse_sort(input));
}

#[rstest]
fn test_sort_accepts_any_iterable() {
    let words = ["delta", "alpha", "charlie", "bravo"];
    assert_eq!(
        sort::sort(words.iter().map(|word| word.to_uppercase())),
        vec!["ALPHA", "BRAVO", "CHARLIE", "DELTA"]
    );
}

#[rstest]
fn test_stream_adapter_is_lazy_and_sized() {
    let mut sorted = (0..100).rev().tree_sorted();
    assert_eq!(sorted.len(), 100);
    assert_eq!(sorted.next(), Some(0));
    assert_eq!(sorted.nth(98), Some(99));
    assert_eq!(sorted.next(), None);
}

proptest! {
    /// Law: tree sort agrees with the standard stable sort.
    #[test]
    fn prop_sort_matches_std(items in prop::collection::vec(any::<i32>(), 0..300)) {
        let mut expected = items.clone();
        expected.sort();
        prop_assert_eq!(sort::sort(items), expected);
    }

    /// Law: filtered sort equals sort followed by dedup.
    #[test]
    fn prop_filtered_sort_matches_dedup(items in prop::collection::vec(-50_i32..50, 0..300)) {
        let mut expected = items.clone();
        expected.sort_unstable();
        expected.dedup();
        prop_assert_eq!(sort::sort_filtered(items.clone()), expected.clone());
        expected.reverse();
        prop_assert_eq!(sort::reverse_sort_filtered(items), expected);
    }
}
