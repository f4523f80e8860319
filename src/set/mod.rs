//! Sets layered on the tree engine.
//!
//! - [`heteroset`]: sets whose members come in several kinds, ordered by kind
//!   and then by value
//! - [`bitset`]: sparse sets of integers stored as 64-bit chunks

#[cfg(feature = "heteroset")]
pub mod heteroset;

#[cfg(feature = "bitset")]
pub mod bitset;
