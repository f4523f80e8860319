//! Tree nodes and the balancing primitives shared by insertion and deletion.
//!
//! A node owns its two children exclusively. An absent link (`None`) marks the
//! boundary of the tree and is treated as black.
//!
//! The color stored in a node is the color of the link from its parent. The
//! primitives below only ever move red links around; they never change the
//! number of black links on any root-to-leaf path.

// =============================================================================
// Color Definition
// =============================================================================

/// The color of the link pointing at a node.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub(crate) enum Color {
    Red,
    Black,
}

impl Color {
    #[inline]
    const fn flipped(self) -> Self {
        match self {
            Self::Red => Self::Black,
            Self::Black => Self::Red,
        }
    }
}

// =============================================================================
// Node Definition
// =============================================================================

/// An owned, possibly absent child.
pub(crate) type Link<T> = Option<Box<Node<T>>>;

/// Internal node structure of a left-leaning red-black tree.
#[derive(Clone, Debug)]
pub(crate) struct Node<T> {
    pub(crate) item: T,
    /// Insertion stamp. Breaks ties between equal items so that deletion in a
    /// tree keeping duplicates always targets exactly one node.
    pub(crate) seq: u64,
    pub(crate) left: Link<T>,
    pub(crate) right: Link<T>,
    pub(crate) color: Color,
}

impl<T> Node<T> {
    /// Creates a new red leaf.
    #[inline]
    pub(crate) fn new_red(item: T, seq: u64) -> Box<Self> {
        Box::new(Self {
            item,
            seq,
            left: None,
            right: None,
            color: Color::Red,
        })
    }

    #[inline]
    pub(crate) fn is_red(&self) -> bool {
        self.color == Color::Red
    }

    /// Returns `true` if the left child and its own left child are both red.
    #[inline]
    pub(crate) fn left_left_is_red(&self) -> bool {
        self.left.as_ref().is_some_and(|left| is_red(&left.left))
    }

    /// Returns `true` if the left child of the right child is red.
    #[inline]
    pub(crate) fn right_left_is_red(&self) -> bool {
        self.right.as_ref().is_some_and(|right| is_red(&right.left))
    }
}

/// Helper function to check if an optional node is red.
#[inline]
pub(crate) fn is_red<T>(link: &Link<T>) -> bool {
    link.as_ref().is_some_and(|node| node.is_red())
}

// =============================================================================
// Balancing Primitives
// =============================================================================

/// Makes the right child the root of this subtree.
///
/// The new root inherits the old root's color and the old root becomes red.
/// The in-order sequence of the subtree is unchanged.
pub(crate) fn rotate_left<T>(mut node: Box<Node<T>>) -> Box<Node<T>> {
    let Some(mut pivot) = node.right.take() else {
        return node;
    };
    node.right = pivot.left.take();
    pivot.color = node.color;
    node.color = Color::Red;
    pivot.left = Some(node);
    pivot
}

/// Mirror of [`rotate_left`].
pub(crate) fn rotate_right<T>(mut node: Box<Node<T>>) -> Box<Node<T>> {
    let Some(mut pivot) = node.left.take() else {
        return node;
    };
    node.left = pivot.right.take();
    pivot.color = node.color;
    node.color = Color::Red;
    pivot.right = Some(node);
    pivot
}

/// Toggles the color of a node and of both of its children.
///
/// Splits a temporary 4-node when used on the way up, and merges two 2-nodes
/// with their parent when used on the way down.
pub(crate) fn flip_colors<T>(node: &mut Node<T>) {
    node.color = node.color.flipped();
    if let Some(left) = node.left.as_mut() {
        left.color = left.color.flipped();
    }
    if let Some(right) = node.right.as_mut() {
        right.color = right.color.flipped();
    }
}

/// Restores the left-leaning invariants on the way back up a search path.
///
/// The three steps must run in this order: lean a right red link to the left,
/// break two consecutive left red links, then split a 4-node.
pub(crate) fn fix_up<T>(mut node: Box<Node<T>>) -> Box<Node<T>> {
    if is_red(&node.right) && !is_red(&node.left) {
        node = rotate_left(node);
    }
    if is_red(&node.left) && node.left_left_is_red() {
        node = rotate_right(node);
    }
    if is_red(&node.left) && is_red(&node.right) {
        flip_colors(&mut node);
    }
    node
}

/// Borrows a red link from the right sibling so that the left child is not a
/// 2-node before descending into it.
pub(crate) fn move_red_left<T>(mut node: Box<Node<T>>) -> Box<Node<T>> {
    flip_colors(&mut node);
    if node.right_left_is_red() {
        node.right = node.right.take().map(rotate_right);
        node = rotate_left(node);
        flip_colors(&mut node);
    }
    node
}

/// Borrows a red link from the left sibling so that the right child is not a
/// 2-node before descending into it.
pub(crate) fn move_red_right<T>(mut node: Box<Node<T>>) -> Box<Node<T>> {
    flip_colors(&mut node);
    if node.left_left_is_red() {
        node = rotate_right(node);
        flip_colors(&mut node);
    }
    node
}

// =============================================================================
// Tests
// =============================================================================
