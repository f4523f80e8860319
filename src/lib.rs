//! # llrb-collections
//!
//! Ordered collections built on a left-leaning red-black (LLRB) tree.
//!
//! ## Overview
//!
//! The crate is organised around one balanced-tree engine and a few thin
//! collections layered on its public contract:
//!
//! - **Tree**: [`LlrbTree`](tree::LlrbTree), a balanced binary search tree with
//!   a construction-time duplicate policy and four lazy traversal orders
//! - **Ordering**: the [`Comparator`](ordering::Comparator) capability that
//!   orders a tree's items
//! - **Ordered map**: [`OrderedMap`](map::OrderedMap), key/value entries kept
//!   in key order
//! - **Heterogeneous set**: [`HeteroSet`](set::heteroset::HeteroSet), members
//!   of several kinds ordered by kind, then by value
//! - **Sparse bitset**: [`Bitset`](set::bitset::Bitset), sets of arbitrarily
//!   spread integers stored as 64-bit chunks
//! - **Sort adapters**: tree sort over iterators, optionally removing
//!   duplicates or reversing the order
//!
//! ## Feature Flags
//!
//! - `sort`: Sort adapters (default)
//! - `map`: Ordered map (default)
//! - `heteroset`: Heterogeneous set (default)
//! - `bitset`: Sparse integer bitset (default)
//! - `serde`: `Serialize`/`Deserialize` implementations
//! - `full`: Enable all features
//!
//! ## Example
//!
//! ```rust
//! use llrb_collections::prelude::*;
//!
//! let mut tree = LlrbTree::new(DuplicatePolicy::Filter);
//! tree.extend([5, 3, 8, 1, 4, 7, 9]);
//! assert_eq!(tree.len(), 7);
//! assert_eq!(tree.first(), Some(&1));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

/// Prelude module for convenient imports.
///
/// Re-exports commonly used types and traits.
///
/// # Usage
///
/// ```rust
/// use llrb_collections::prelude::*;
/// ```
pub mod prelude {
    pub use crate::ordering::*;
    pub use crate::tree::*;

    #[cfg(feature = "sort")]
    pub use crate::sort::TreeSortExt;

    #[cfg(feature = "map")]
    pub use crate::map::OrderedMap;

    #[cfg(feature = "heteroset")]
    pub use crate::set::heteroset::{Discriminant, HeteroSet, Member, RankedOrder};

    #[cfg(feature = "bitset")]
    pub use crate::set::bitset::{Bitset, BitsetError, BitsetMember};
}

pub mod ordering;
pub mod tree;

#[cfg(feature = "sort")]
pub mod sort;

#[cfg(feature = "map")]
pub mod map;

#[cfg(any(feature = "heteroset", feature = "bitset"))]
pub mod set;
