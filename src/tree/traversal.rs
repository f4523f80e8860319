//! Pull-based traversal in four orders.
//!
//! Traversals keep an explicit stack of pending work instead of recursing, so
//! each call to `next` does a bounded amount of work and an abandoned
//! traversal simply drops its stack. The stack never holds more than a small
//! multiple of the tree height, which is at most `2 * log2(len + 1)`.

use std::iter::FusedIterator;

use smallvec::SmallVec;

use super::node::{Link, Node};

/// Inline capacity of a traversal stack; enough for trees of a few thousand
/// items before spilling to the heap.
const INLINE_STACK: usize = 32;

/// The order in which a traversal visits items.
///
/// # Examples
///
/// ```rust
/// use llrb_collections::tree::{LlrbTree, TraversalOrder};
///
/// let tree: LlrbTree<i32> = [2, 1, 3].into_iter().collect();
///
/// let ascending: Vec<&i32> = tree.traverse(TraversalOrder::InOrder).collect();
/// assert_eq!(ascending, vec![&1, &2, &3]);
///
/// let descending: Vec<&i32> = tree.traverse(TraversalOrder::ReverseOrder).collect();
/// assert_eq!(descending, vec![&3, &2, &1]);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum TraversalOrder {
    /// Node, then left subtree, then right subtree.
    PreOrder,
    /// Left subtree, node, right subtree: ascending comparator order.
    #[default]
    InOrder,
    /// Left subtree, right subtree, then node.
    PostOrder,
    /// Right subtree, node, left subtree: descending comparator order.
    ReverseOrder,
}

/// Work left to do for a traversal: either expand a subtree or emit an item.
enum Pending<N, T> {
    Expand(N),
    Emit(T),
}

/// Pushes the work for one node so that popping yields the requested order.
///
/// Returns the node's item when it must be emitted immediately (pre-order).
fn schedule<N, T>(
    stack: &mut SmallVec<[Pending<N, T>; INLINE_STACK]>,
    order: TraversalOrder,
    item: T,
    left: Option<N>,
    right: Option<N>,
) -> Option<T> {
    match order {
        TraversalOrder::PreOrder => {
            stack.extend(right.map(Pending::Expand));
            stack.extend(left.map(Pending::Expand));
            Some(item)
        }
        TraversalOrder::InOrder => {
            stack.extend(right.map(Pending::Expand));
            stack.push(Pending::Emit(item));
            stack.extend(left.map(Pending::Expand));
            None
        }
        TraversalOrder::PostOrder => {
            stack.push(Pending::Emit(item));
            stack.extend(right.map(Pending::Expand));
            stack.extend(left.map(Pending::Expand));
            None
        }
        TraversalOrder::ReverseOrder => {
            stack.extend(left.map(Pending::Expand));
            stack.push(Pending::Emit(item));
            stack.extend(right.map(Pending::Expand));
            None
        }
    }
}

// =============================================================================
// Borrowing Traversal
// =============================================================================

/// A lazy traversal over references to the items of an
/// [`LlrbTree`](super::LlrbTree).
///
/// The traversal borrows the tree, so the tree cannot be mutated until the
/// traversal is dropped.
pub struct Traversal<'a, T> {
    stack: SmallVec<[Pending<&'a Node<T>, &'a T>; INLINE_STACK]>,
    order: TraversalOrder,
    remaining: usize,
}

impl<'a, T> Traversal<'a, T> {
    pub(crate) fn new(root: &'a Link<T>, order: TraversalOrder, len: usize) -> Self {
        let mut stack = SmallVec::new();
        stack.extend(root.as_deref().map(Pending::Expand));
        Self {
            stack,
            order,
            remaining: len,
        }
    }

    /// Returns the order this traversal follows.
    #[must_use]
    pub const fn order(&self) -> TraversalOrder {
        self.order
    }
}

impl<'a, T> Iterator for Traversal<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(pending) = self.stack.pop() {
            let emitted = match pending {
                Pending::Emit(item) => Some(item),
                Pending::Expand(node) => schedule(
                    &mut self.stack,
                    self.order,
                    &node.item,
                    node.left.as_deref(),
                    node.right.as_deref(),
                ),
            };
            if emitted.is_some() {
                self.remaining = self.remaining.saturating_sub(1);
                return emitted;
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for Traversal<'_, T> {
    fn len(&self) -> usize {
        self.remaining
    }
}

impl<T> FusedIterator for Traversal<'_, T> {}

// =============================================================================
// Owning Traversal
// =============================================================================

/// A lazy traversal that takes ownership of the items of an
/// [`LlrbTree`](super::LlrbTree).
///
/// Nodes are dismantled as they are visited; dropping the traversal early
/// drops the items that were not yielded.
pub struct IntoTraversal<T> {
    stack: SmallVec<[Pending<Box<Node<T>>, T>; INLINE_STACK]>,
    order: TraversalOrder,
    remaining: usize,
}

impl<T> IntoTraversal<T> {
    pub(crate) fn new(root: Link<T>, order: TraversalOrder, len: usize) -> Self {
        let mut stack = SmallVec::new();
        stack.extend(root.map(Pending::Expand));
        Self {
            stack,
            order,
            remaining: len,
        }
    }

    /// Returns the order this traversal follows.
    #[must_use]
    pub const fn order(&self) -> TraversalOrder {
        self.order
    }
}

impl<T> Iterator for IntoTraversal<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(pending) = self.stack.pop() {
            let emitted = match pending {
                Pending::Emit(item) => Some(item),
                Pending::Expand(node) => {
                    let Node {
                        item, left, right, ..
                    } = *node;
                    schedule(&mut self.stack, self.order, item, left, right)
                }
            };
            if emitted.is_some() {
                self.remaining = self.remaining.saturating_sub(1);
                return emitted;
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for IntoTraversal<T> {
    fn len(&self) -> usize {
        self.remaining
    }
}

impl<T> FusedIterator for IntoTraversal<T> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::node::Color;
    use rstest::rstest;

    //        4
    //      /   \
    //     2     6
    //    / \   / \
    //   1   3 5   7
    fn perfect() -> Link<i32> {
        fn leaf(item: i32) -> Link<i32> {
            Some(Box::new(Node {
                item,
                seq: 0,
                left: None,
                right: None,
                color: Color::Black,
            }))
        }
        fn branch(item: i32, left: Link<i32>, right: Link<i32>) -> Link<i32> {
            Some(Box::new(Node {
                item,
                seq: 0,
                left,
                right,
                color: Color::Black,
            }))
        }
        branch(
            4,
            branch(2, leaf(1), leaf(3)),
            branch(6, leaf(5), leaf(7)),
        )
    }

    #[rstest]
    #[case(TraversalOrder::PreOrder, vec![4, 2, 1, 3, 6, 5, 7])]
    #[case(TraversalOrder::InOrder, vec![1, 2, 3, 4, 5, 6, 7])]
    #[case(TraversalOrder::PostOrder, vec![1, 3, 2, 5, 7, 6, 4])]
    #[case(TraversalOrder::ReverseOrder, vec![7, 6, 5, 4, 3, 2, 1])]
    fn test_borrowing_traversal_orders(#[case] order: TraversalOrder, #[case] expected: Vec<i32>) {
        let root = perfect();
        let visited: Vec<i32> = Traversal::new(&root, order, 7).copied().collect();
        assert_eq!(visited, expected);
    }

    #[rstest]
    #[case(TraversalOrder::PreOrder, vec![4, 2, 1, 3, 6, 5, 7])]
    #[case(TraversalOrder::InOrder, vec![1, 2, 3, 4, 5, 6, 7])]
    #[case(TraversalOrder::PostOrder, vec![1, 3, 2, 5, 7, 6, 4])]
    #[case(TraversalOrder::ReverseOrder, vec![7, 6, 5, 4, 3, 2, 1])]
    fn test_owning_traversal_orders(#[case] order: TraversalOrder, #[case] expected: Vec<i32>) {
        let visited: Vec<i32> = IntoTraversal::new(perfect(), order, 7).collect();
        assert_eq!(visited, expected);
    }

    #[rstest]
    fn test_traversal_reports_exact_length() {
        let root = perfect();
        let mut traversal = Traversal::new(&root, TraversalOrder::PostOrder, 7);
        assert_eq!(traversal.len(), 7);
        traversal.next();
        traversal.next();
        assert_eq!(traversal.len(), 5);
        assert_eq!(traversal.by_ref().count(), 5);
        assert_eq!(traversal.next(), None);
    }

    #[rstest]
    fn test_empty_traversal_yields_nothing() {
        let root: Link<i32> = None;
        assert_eq!(Traversal::new(&root, TraversalOrder::InOrder, 0).next(), None);
        assert_eq!(IntoTraversal::new(root, TraversalOrder::PreOrder, 0).next(), None);
    }
}
