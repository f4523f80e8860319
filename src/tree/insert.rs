//! Recursive insertion for both duplicate policies.
//!
//! Both variants descend a single path, attach a new red leaf at the first
//! absent link and call [`fix_up`] on every level while unwinding. The caller
//! is responsible for turning the final root black and for handing out a
//! fresh, increasing `seq` stamp per call.

use std::cmp::Ordering;
use std::mem;

use super::node::{Link, Node, fix_up};
use crate::ordering::Comparator;

/// Inserts `item`, overwriting the stored item if an equal one exists.
///
/// Returns the new subtree root and the item that was overwritten, if any.
/// `None` means a new node was created. An overwritten node keeps its stamp.
pub(crate) fn insert_filtered<T, C>(
    link: Link<T>,
    item: T,
    seq: u64,
    comparator: &C,
) -> (Box<Node<T>>, Option<T>)
where
    C: Comparator<T> + ?Sized,
{
    let Some(mut node) = link else {
        return (Node::new_red(item, seq), None);
    };

    let replaced = match comparator.compare(&item, &node.item) {
        Ordering::Less => {
            let (left, replaced) = insert_filtered(node.left.take(), item, seq, comparator);
            node.left = Some(left);
            replaced
        }
        Ordering::Greater => {
            let (right, replaced) = insert_filtered(node.right.take(), item, seq, comparator);
            node.right = Some(right);
            replaced
        }
        Ordering::Equal => Some(mem::replace(&mut node.item, item)),
    };

    (fix_up(node), replaced)
}

/// Inserts `item` unconditionally.
///
/// Items equal to a stored item go to its right, so equal items keep their
/// insertion order in an in-order traversal. Since stamps increase, the
/// in-order sequence is also sorted by `(item, seq)`.
pub(crate) fn insert_duplicate<T, C>(link: Link<T>, item: T, seq: u64, comparator: &C) -> Box<Node<T>>
where
    C: Comparator<T> + ?Sized,
{
    let Some(mut node) = link else {
        return Node::new_red(item, seq);
    };

    if comparator.compare(&item, &node.item) == Ordering::Less {
        node.left = Some(insert_duplicate(node.left.take(), item, seq, comparator));
    } else {
        node.right = Some(insert_duplicate(node.right.take(), item, seq, comparator));
    }

    fix_up(node)
}
