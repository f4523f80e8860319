//! Ordering capabilities used to arrange items in a tree.
//!
//! Every [`LlrbTree`](crate::tree::LlrbTree) owns a [`Comparator`] that
//! defines the strict total order of its items. Two items are *equal* for the
//! tree when neither precedes the other, i.e. when the comparator returns
//! [`Ordering::Equal`].
//!
//! A comparator must satisfy the usual requirements of a total order
//! (for all `a`, `b`, `c` of the item type):
//!
//! - `compare(a, b) == Less` implies `compare(b, a) == Greater`
//! - `compare(a, b) == Less && compare(b, c) == Less` implies `compare(a, c) == Less`
//! - `compare(a, b) == Equal` implies `a` and `b` are interchangeable as keys
//!
//! # Examples
//!
//! ```rust
//! use llrb_collections::ordering::{Comparator, NaturalOrder, ReverseOrder};
//! use std::cmp::Ordering;
//!
//! assert_eq!(NaturalOrder.compare(&1, &2), Ordering::Less);
//! assert_eq!(ReverseOrder.compare(&1, &2), Ordering::Greater);
//!
//! let by_length = |left: &&str, right: &&str| left.len().cmp(&right.len());
//! assert_eq!(by_length.compare(&"abc", &"de"), Ordering::Greater);
//! ```

use std::cmp::Ordering;

/// A strict total order over values of type `T`.
pub trait Comparator<T: ?Sized> {
    /// Compares `left` with `right`.
    fn compare(&self, left: &T, right: &T) -> Ordering;
}

/// Orders items by their [`Ord`] implementation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct NaturalOrder;

impl<T: Ord + ?Sized> Comparator<T> for NaturalOrder {
    #[inline]
    fn compare(&self, left: &T, right: &T) -> Ordering {
        left.cmp(right)
    }
}

/// Orders items by the reverse of their [`Ord`] implementation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct ReverseOrder;

impl<T: Ord + ?Sized> Comparator<T> for ReverseOrder {
    #[inline]
    fn compare(&self, left: &T, right: &T) -> Ordering {
        right.cmp(left)
    }
}

impl<T: ?Sized, F> Comparator<T> for F
where
    F: Fn(&T, &T) -> Ordering,
{
    #[inline]
    fn compare(&self, left: &T, right: &T) -> Ordering {
        self(left, right)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(1, 2, Ordering::Less)]
    #[case(2, 2, Ordering::Equal)]
    #[case(3, 2, Ordering::Greater)]
    fn test_natural_order(#[case] left: i32, #[case] right: i32, #[case] expected: Ordering) {
        assert_eq!(NaturalOrder.compare(&left, &right), expected);
    }

    #[rstest]
    #[case(1, 2, Ordering::Greater)]
    #[case(2, 2, Ordering::Equal)]
    #[case(3, 2, Ordering::Less)]
    fn test_reverse_order(#[case] left: i32, #[case] right: i32, #[case] expected: Ordering) {
        assert_eq!(ReverseOrder.compare(&left, &right), expected);
    }

    #[rstest]
    fn test_closure_comparator() {
        let by_absolute = |left: &i32, right: &i32| left.abs().cmp(&right.abs());
        assert_eq!(by_absolute.compare(&-3, &2), Ordering::Greater);
        assert_eq!(by_absolute.compare(&-2, &2), Ordering::Equal);
    }

    #[rstest]
    fn test_unsized_natural_order() {
        assert_eq!(NaturalOrder.compare("apple", "banana"), Ordering::Less);
    }
}
