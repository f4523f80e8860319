//! Tree sort adapters.
//!
//! Each adapter inserts its input into an [`LlrbTree`] and reads it back with
//! an in-order or reverse-order traversal. The plain variants keep every item;
//! the `filtered` variants keep one item per equivalence class, the last one
//! inserted.
//!
//! Sorting is stable: equal items keep their input order in ascending output.
//! Descending output is the exact reverse of the ascending output, so equal
//! items come out in reverse input order.
//!
//! # Examples
//!
//! ```rust
//! use llrb_collections::sort;
//!
//! assert_eq!(sort::sort([3, 1, 2, 1]), vec![1, 1, 2, 3]);
//! assert_eq!(sort::sort_filtered([3, 1, 2, 1]), vec![1, 2, 3]);
//! assert_eq!(sort::reverse_sort([3, 1, 2, 1]), vec![3, 2, 1, 1]);
//! assert_eq!(sort::reverse_sort_filtered([3, 1, 2, 1]), vec![3, 2, 1]);
//! ```

use crate::ordering::{Comparator, NaturalOrder};
use crate::tree::{DuplicatePolicy, IntoTraversal, LlrbTree, TraversalOrder};

fn tree_sort<T, C, I>(
    items: I,
    policy: DuplicatePolicy,
    comparator: C,
    order: TraversalOrder,
) -> IntoTraversal<T>
where
    C: Comparator<T>,
    I: IntoIterator<Item = T>,
{
    let mut tree = LlrbTree::with_comparator(policy, comparator);
    tree.extend(items);
    tree.into_traversal(order)
}

/// Returns the items in ascending order.
pub fn sort<T: Ord, I: IntoIterator<Item = T>>(items: I) -> Vec<T> {
    sort_by(items, NaturalOrder)
}

/// Returns the items in ascending `comparator` order.
///
/// # Examples
///
/// ```rust
/// use llrb_collections::sort::sort_by;
///
/// let words = ["pear", "fig", "apple", "kiwi"];
/// let by_length = |left: &&str, right: &&str| left.len().cmp(&right.len());
/// assert_eq!(sort_by(words, by_length), vec!["fig", "pear", "kiwi", "apple"]);
/// ```
pub fn sort_by<T, C, I>(items: I, comparator: C) -> Vec<T>
where
    C: Comparator<T>,
    I: IntoIterator<Item = T>,
{
    tree_sort(items, DuplicatePolicy::Keep, comparator, TraversalOrder::InOrder).collect()
}

/// Returns the distinct items in ascending order.
pub fn sort_filtered<T: Ord, I: IntoIterator<Item = T>>(items: I) -> Vec<T> {
    sort_filtered_by(items, NaturalOrder)
}

/// Returns one item per `comparator` equivalence class in ascending order.
///
/// Of several equal items, the last one in the input is kept.
pub fn sort_filtered_by<T, C, I>(items: I, comparator: C) -> Vec<T>
where
    C: Comparator<T>,
    I: IntoIterator<Item = T>,
{
    tree_sort(items, DuplicatePolicy::Filter, comparator, TraversalOrder::InOrder).collect()
}

/// Returns the items in descending order.
pub fn reverse_sort<T: Ord, I: IntoIterator<Item = T>>(items: I) -> Vec<T> {
    reverse_sort_by(items, NaturalOrder)
}

/// Returns the items in descending `comparator` order.
pub fn reverse_sort_by<T, C, I>(items: I, comparator: C) -> Vec<T>
where
    C: Comparator<T>,
    I: IntoIterator<Item = T>,
{
    tree_sort(items, DuplicatePolicy::Keep, comparator, TraversalOrder::ReverseOrder).collect()
}

/// Returns the distinct items in descending order.
pub fn reverse_sort_filtered<T: Ord, I: IntoIterator<Item = T>>(items: I) -> Vec<T> {
    reverse_sort_filtered_by(items, NaturalOrder)
}

/// Returns one item per `comparator` equivalence class in descending order.
pub fn reverse_sort_filtered_by<T, C, I>(items: I, comparator: C) -> Vec<T>
where
    C: Comparator<T>,
    I: IntoIterator<Item = T>,
{
    tree_sort(
        items,
        DuplicatePolicy::Filter,
        comparator,
        TraversalOrder::ReverseOrder,
    )
    .collect()
}

/// Tree sort as an iterator adapter.
///
/// The input is consumed when the adapter is called; the returned traversal
/// then yields the sorted items lazily.
///
/// # Examples
///
/// ```rust
/// use llrb_collections::sort::TreeSortExt;
///
/// let sorted: Vec<char> = "banana".chars().tree_sorted_filtered().collect();
/// assert_eq!(sorted, vec!['a', 'b', 'n']);
///
/// let mut descending = [4, 9, 1].into_iter().tree_sorted_rev();
/// assert_eq!(descending.next(), Some(9));
/// assert_eq!(descending.len(), 2);
/// ```
pub trait TreeSortExt: Iterator + Sized {
    /// Yields the items in ascending order.
    fn tree_sorted(self) -> IntoTraversal<Self::Item>
    where
        Self::Item: Ord,
    {
        tree_sort(
            self,
            DuplicatePolicy::Keep,
            NaturalOrder,
            TraversalOrder::InOrder,
        )
    }

    /// Yields the distinct items in ascending order.
    fn tree_sorted_filtered(self) -> IntoTraversal<Self::Item>
    where
        Self::Item: Ord,
    {
        tree_sort(
            self,
            DuplicatePolicy::Filter,
            NaturalOrder,
            TraversalOrder::InOrder,
        )
    }

    /// Yields the items in descending order.
    fn tree_sorted_rev(self) -> IntoTraversal<Self::Item>
    where
        Self::Item: Ord,
    {
        tree_sort(
            self,
            DuplicatePolicy::Keep,
            NaturalOrder,
            TraversalOrder::ReverseOrder,
        )
    }

    /// Yields the distinct items in descending order.
    fn tree_sorted_filtered_rev(self) -> IntoTraversal<Self::Item>
    where
        Self::Item: Ord,
    {
        tree_sort(
            self,
            DuplicatePolicy::Filter,
            NaturalOrder,
            TraversalOrder::ReverseOrder,
        )
    }
}

impl<I: Iterator> TreeSortExt for I {}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn by_key(left: &(u8, char), right: &(u8, char)) -> std::cmp::Ordering {
        left.0.cmp(&right.0)
    }

    #[rstest]
    #[case(vec![], vec![])]
    #[case(vec![1], vec![1])]
    #[case(vec![5, 3, 8, 1, 4, 7, 9], vec![1, 3, 4, 5, 7, 8, 9])]
    #[case(vec![2, 2, 1, 2], vec![1, 2, 2, 2])]
    fn test_sort(#[case] input: Vec<i32>, #[case] expected: Vec<i32>) {
        assert_eq!(sort(input), expected);
    }

    #[rstest]
    fn test_sort_by_is_stable() {
        let input = [(2, 'a'), (1, 'b'), (2, 'c'), (1, 'd')];
        assert_eq!(
            sort_by(input, by_key),
            vec![(1, 'b'), (1, 'd'), (2, 'a'), (2, 'c')]
        );
        assert_eq!(
            reverse_sort_by(input, by_key),
            vec![(2, 'c'), (2, 'a'), (1, 'd'), (1, 'b')]
        );
    }

    #[rstest]
    fn test_filtered_keeps_last_of_equal_items() {
        let input = [(2, 'a'), (1, 'b'), (2, 'c'), (1, 'd')];
        assert_eq!(sort_filtered_by(input, by_key), vec![(1, 'd'), (2, 'c')]);
        assert_eq!(
            reverse_sort_filtered_by(input, by_key),
            vec![(2, 'c'), (1, 'd')]
        );
    }

    #[rstest]
    fn test_iterator_adapters() {
        let input = [3, 1, 3, 2];
        assert_eq!(input.into_iter().tree_sorted().collect::<Vec<_>>(), vec![1, 2, 3, 3]);
        assert_eq!(
            input.into_iter().tree_sorted_filtered().collect::<Vec<_>>(),
            vec![1, 2, 3]
        );
        assert_eq!(input.into_iter().tree_sorted_rev().collect::<Vec<_>>(), vec![3, 3, 2, 1]);
        assert_eq!(
            input.into_iter().tree_sorted_filtered_rev().collect::<Vec<_>>(),
            vec![3, 2, 1]
        );
    }
}
