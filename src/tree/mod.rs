//! The left-leaning red-black tree engine.
//!
//! - [`LlrbTree`]: the ordered container, with a [`DuplicatePolicy`] fixed at
//!   construction
//! - [`TraversalOrder`], [`Traversal`], [`IntoTraversal`]: lazy pull-based
//!   traversals in pre-, in-, post- and reverse order
//! - [`InvariantViolation`]: diagnostics from [`LlrbTree::check_invariants`]
//!
//! # Invariants
//!
//! Before and after every public operation:
//!
//! 1. In-order traversal follows the tree's comparator.
//! 2. No node has a red right link.
//! 3. No red node has a red left child.
//! 4. Every root-to-leaf path crosses the same number of black links.
//! 5. The root link is black.
//! 6. [`LlrbTree::len`] equals the number of stored items.
//!
//! All mutation goes through [`LlrbTree`], so a tree built through the public
//! API cannot break them.
//!
//! # Examples
//!
//! ```rust
//! use llrb_collections::tree::{DuplicatePolicy, LlrbTree, TraversalOrder};
//!
//! let mut tree = LlrbTree::new(DuplicatePolicy::Keep);
//! tree.extend([3, 1, 3, 2]);
//!
//! let descending: Vec<i32> = tree.into_traversal(TraversalOrder::ReverseOrder).collect();
//! assert_eq!(descending, vec![3, 3, 2, 1]);
//! ```

mod delete;
mod error;
mod insert;
mod llrb;
mod node;
mod traversal;

pub use error::InvariantViolation;
pub use llrb::{DuplicatePolicy, LlrbTree, Search};
pub use traversal::{IntoTraversal, Traversal, TraversalOrder};
