//! Top-down deletion.
//!
//! The search never steps into a 2-node: before going left it makes sure the
//! left child or its left child is red ([`move_red_left`]), before going right
//! it does the same for the right side ([`move_red_right`]). The node to delete
//! is therefore always part of a 3- or 4-node and can be removed without
//! breaking black balance. [`fix_up`] repairs the temporary right-leaning and
//! 4-node links while unwinding.
//!
//! An internal node is never removed directly. Its item is replaced by the
//! in-order successor, and the successor's node (the left-most node of the
//! right subtree) is removed instead.
//!
//! The target is described by a probe: `probe(node)` returns the ordering of
//! the target relative to `node`. The probe must match at most one node; a
//! tree keeping duplicates breaks ties between equal items with the node
//! stamp.

use std::cmp::Ordering;
use std::mem;

use super::node::{Link, Node, fix_up, is_red, move_red_left, move_red_right, rotate_right};

/// Deletes the node matching the probe from the subtree rooted at `node`.
///
/// Returns the new subtree root and the removed item. When nothing matches,
/// the subtree is still rebalanced along the search path but keeps all of its
/// items.
pub(crate) fn delete<T, F>(mut node: Box<Node<T>>, probe: &mut F) -> (Link<T>, Option<T>)
where
    F: FnMut(&Node<T>) -> Ordering,
{
    if probe(&node) == Ordering::Less {
        if node.left.is_none() {
            return (Some(node), None);
        }
        if !is_red(&node.left) && !node.left_left_is_red() {
            node = move_red_left(node);
        }
        let removed = match node.left.take() {
            Some(left) => {
                let (left, removed) = delete(left, probe);
                node.left = left;
                removed
            }
            None => None,
        };
        return (Some(fix_up(node)), removed);
    }

    if is_red(&node.left) {
        node = rotate_right(node);
    }
    if probe(&node) == Ordering::Equal && node.right.is_none() {
        let Node { item, left, .. } = *node;
        debug_assert!(left.is_none(), "a node without a right child must be a leaf");
        return (None, Some(item));
    }
    if node.right.is_some() && !is_red(&node.right) && !node.right_left_is_red() {
        node = move_red_right(node);
    }

    let removed = match node.right.take() {
        Some(right) if probe(&node) == Ordering::Equal => {
            let (right, successor) = delete_left_most(right);
            node.right = right;
            node.seq = successor.seq;
            Some(mem::replace(&mut node.item, successor.item))
        }
        Some(right) => {
            let (right, removed) = delete(right, probe);
            node.right = right;
            removed
        }
        None => None,
    };

    (Some(fix_up(node)), removed)
}

/// Detaches the left-most node of the subtree and returns it.
pub(crate) fn delete_left_most<T>(mut node: Box<Node<T>>) -> (Link<T>, Box<Node<T>>) {
    if node.left.is_some() && !is_red(&node.left) && !node.left_left_is_red() {
        node = move_red_left(node);
    }

    let Some(left) = node.left.take() else {
        let right = node.right.take();
        return (right, node);
    };

    let (left, minimum) = delete_left_most(left);
    node.left = left;
    (Some(fix_up(node)), minimum)
}
