//! Diagnostics reported by [`LlrbTree::check_invariants`](super::LlrbTree::check_invariants).

use std::fmt;

/// A broken structural invariant of a left-leaning red-black tree.
///
/// A well-formed tree never produces one of these; they exist so that tests
/// and cautious callers can verify a tree after a sequence of operations.
///
/// # Examples
///
/// ```rust
/// use llrb_collections::tree::InvariantViolation;
///
/// let violation = InvariantViolation::CountMismatch { recorded: 3, actual: 2 };
/// assert_eq!(
///     format!("{violation}"),
///     "recorded count 3 does not match the 2 items present"
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvariantViolation {
    /// Two items are out of comparator order at the given in-order position.
    OutOfOrder {
        /// In-order index of the later of the two items.
        position: usize,
    },
    /// A node has a red right link.
    RedRightLink {
        /// Depth of the offending node, the root being at depth 0.
        depth: usize,
    },
    /// A red node has a red left child.
    ConsecutiveRedLinks {
        /// Depth of the upper red node.
        depth: usize,
    },
    /// Two root-to-leaf paths cross different numbers of black links.
    BlackHeightMismatch {
        /// Black height of the left subtree.
        left: usize,
        /// Black height of the right subtree.
        right: usize,
    },
    /// The root link is red.
    RedRoot,
    /// Two items compare equal under the filtering policy.
    DuplicateItem {
        /// In-order index of the second of the two items.
        position: usize,
    },
    /// The recorded item count differs from the number of nodes.
    CountMismatch {
        /// The count kept by the tree.
        recorded: usize,
        /// The number of nodes actually present.
        actual: usize,
    },
}

impl fmt::Display for InvariantViolation {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfOrder { position } => {
                write!(formatter, "item at in-order position {position} precedes its predecessor")
            }
            Self::RedRightLink { depth } => {
                write!(formatter, "red right link at depth {depth}")
            }
            Self::ConsecutiveRedLinks { depth } => {
                write!(formatter, "two consecutive red links at depth {depth}")
            }
            Self::BlackHeightMismatch { left, right } => write!(
                formatter,
                "black height mismatch: left subtree {left}, right subtree {right}"
            ),
            Self::RedRoot => write!(formatter, "root link is red"),
            Self::DuplicateItem { position } => write!(
                formatter,
                "duplicate item at in-order position {position} in a filtering tree"
            ),
            Self::CountMismatch { recorded, actual } => write!(
                formatter,
                "recorded count {recorded} does not match the {actual} items present"
            ),
        }
    }
}

impl std::error::Error for InvariantViolation {}
