//! Sparse sets of integers.
//!
//! A [`Bitset`] splits the integer line into 64-bit chunks. Chunk `key` covers
//! the values `key * 64 ..= key * 64 + 63`; only chunks with at least one
//! member are stored, as records in an [`LlrbTree`] ordered by key. Memory use
//! is therefore proportional to the number of occupied chunks, not to the
//! range of values.
//!
//! Values are located with floor division, so negative values map to
//! negative keys and [`chunk_location`] and [`member_value`] are exact
//! inverses over the whole supported domain.
//!
//! # Examples
//!
//! ```rust
//! use llrb_collections::set::bitset::Bitset;
//!
//! let mut set = Bitset::new();
//! for member in [-1, 28, 18, 28, 9] {
//!     set.add(member)?;
//! }
//! assert_eq!(set.cardinality(), 4);
//! assert_eq!(set.to_string(), "{-1, 9, 18, 28}");
//! # Ok::<(), llrb_collections::set::bitset::BitsetError>(())
//! ```

use std::cmp::Ordering;
use std::fmt;
use std::iter::FusedIterator;

use crate::ordering::Comparator;
use crate::tree::{DuplicatePolicy, LlrbTree, Traversal};

/// Number of values covered by one chunk.
pub const WORD_BITS: u32 = u64::BITS;

const WORD: i128 = 64;

// =============================================================================
// Errors
// =============================================================================

/// Failures reported by [`Bitset`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BitsetError {
    /// The value's chunk key does not fit in an `i64`.
    OutOfRange {
        /// The rejected value, as written.
        value: String,
    },
}

impl fmt::Display for BitsetError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfRange { value } => {
                write!(formatter, "value {value} is outside the range a bitset can hold")
            }
        }
    }
}

impl std::error::Error for BitsetError {}

// =============================================================================
// Members and Locations
// =============================================================================

/// An integer type whose values can be stored in a [`Bitset`].
///
/// Implemented for every primitive integer type.
pub trait BitsetMember: Copy + fmt::Display {
    /// Returns the value as an `i128`, or `None` if it does not fit.
    fn to_i128(self) -> Option<i128>;
}

macro_rules! impl_bitset_member {
    ($($member:ty),+) => {
        $(
            impl BitsetMember for $member {
                #[inline]
                fn to_i128(self) -> Option<i128> {
                    i128::try_from(self).ok()
                }
            }
        )+
    };
}

impl_bitset_member!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

/// Returns the chunk key and the bit offset within the chunk for `value`.
///
/// # Errors
///
/// Returns [`BitsetError::OutOfRange`] if the chunk key does not fit in an
/// `i64`.
///
/// # Examples
///
/// ```rust
/// use llrb_collections::set::bitset::{chunk_location, member_value};
///
/// assert_eq!(chunk_location(-1), Ok((-1, 63)));
/// assert_eq!(chunk_location(64), Ok((1, 0)));
/// assert_eq!(member_value(-1, 63), -1);
/// ```
pub fn chunk_location(value: i128) -> Result<(i64, u32), BitsetError> {
    let out_of_range = || BitsetError::OutOfRange {
        value: value.to_string(),
    };
    let key = i64::try_from(value.div_euclid(WORD)).map_err(|_| out_of_range())?;
    let offset = u32::try_from(value.rem_euclid(WORD)).map_err(|_| out_of_range())?;
    Ok((key, offset))
}

/// Returns the value stored at `offset` within chunk `key`.
#[must_use]
pub fn member_value(key: i64, offset: u32) -> i128 {
    i128::from(key) * WORD + i128::from(offset)
}

/// One occupied chunk; `bits` is never zero while stored.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Chunk {
    key: i64,
    bits: u64,
}

/// Orders chunk records by key only, so a record for an existing key
/// overwrites the stored one.
#[derive(Clone, Copy, Debug, Default)]
struct ChunkOrder;

impl Comparator<Chunk> for ChunkOrder {
    #[inline]
    fn compare(&self, left: &Chunk, right: &Chunk) -> Ordering {
        left.key.cmp(&right.key)
    }
}

// =============================================================================
// Bitset Definition
// =============================================================================

/// A sparse set of integers.
///
/// Members of any primitive integer type can be mixed; they are identified by
/// numeric value, so `5_u8` and `5_i64` are the same member. Members are
/// reported back as `i128`.
///
/// # Time Complexity
///
/// | Operation     | Complexity                   |
/// |---------------|------------------------------|
/// | `add`         | O(log C), C occupied chunks  |
/// | `remove`      | O(log C)                     |
/// | `contains`    | O(log C)                     |
/// | `cardinality` | O(1)                         |
/// | `union`       | O(min(C₁, C₂) · log(C₁ + C₂)) |
///
/// # Examples
///
/// ```rust
/// use llrb_collections::set::bitset::Bitset;
///
/// let small = Bitset::try_from_members([1_u8, 2, 3])?;
/// let large = Bitset::try_from_members(-10_i64..=10)?;
///
/// assert!(small.is_proper_subset(&large));
/// assert_eq!(large.difference(&small).cardinality(), 18);
/// # Ok::<(), llrb_collections::set::bitset::BitsetError>(())
/// ```
#[derive(Clone)]
pub struct Bitset {
    chunks: LlrbTree<Chunk, ChunkOrder>,
    cardinality: u64,
}

static_assertions::assert_impl_all!(Bitset: Send, Sync, Clone);

impl Bitset {
    /// Creates an empty bitset.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            chunks: LlrbTree::with_comparator(DuplicatePolicy::Filter, ChunkOrder),
            cardinality: 0,
        }
    }

    /// Creates a bitset holding the given members.
    ///
    /// # Errors
    ///
    /// Returns [`BitsetError::OutOfRange`] for the first member that cannot be
    /// stored.
    pub fn try_from_members<M, I>(members: I) -> Result<Self, BitsetError>
    where
        M: BitsetMember,
        I: IntoIterator<Item = M>,
    {
        let mut set = Self::new();
        for member in members {
            set.add(member)?;
        }
        Ok(set)
    }

    /// Returns the number of members.
    #[inline]
    #[must_use]
    pub const fn cardinality(&self) -> u64 {
        self.cardinality
    }

    /// Returns `true` if the set has no members.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.cardinality == 0
    }

    /// Returns the number of occupied chunks.
    #[inline]
    #[must_use]
    pub const fn chunk_count(&self) -> usize {
        self.chunks.len()
    }

    /// Removes every member.
    pub fn clear(&mut self) {
        self.chunks.clear();
        self.cardinality = 0;
    }

    /// Adds a member; returns `true` if it was not already present.
    ///
    /// # Errors
    ///
    /// Returns [`BitsetError::OutOfRange`] if the member's chunk key does not
    /// fit in an `i64`. Only 128-bit members can be out of range.
    pub fn add<M: BitsetMember>(&mut self, member: M) -> Result<bool, BitsetError> {
        let (key, offset) = locate(member).inspect_err(|error| {
            log::debug!("bitset rejected member: {error}");
        })?;
        let bits = self.chunk_bits(key);
        let mask = 1_u64 << offset;
        if bits & mask != 0 {
            return Ok(false);
        }
        self.chunks.insert(Chunk {
            key,
            bits: bits | mask,
        });
        self.cardinality += 1;
        Ok(true)
    }

    /// Removes a member; returns `true` if it was present.
    ///
    /// A chunk left without members is dropped.
    pub fn remove<M: BitsetMember>(&mut self, member: M) -> bool {
        let Ok((key, offset)) = locate(member) else {
            return false;
        };
        let bits = self.chunk_bits(key);
        let mask = 1_u64 << offset;
        if bits & mask == 0 {
            return false;
        }
        let remaining = bits & !mask;
        if remaining == 0 {
            self.chunks.delete_by(|chunk| key.cmp(&chunk.key));
        } else {
            self.chunks.insert(Chunk {
                key,
                bits: remaining,
            });
        }
        self.cardinality -= 1;
        true
    }

    /// Returns `true` if `member` is present.
    #[must_use]
    pub fn contains<M: BitsetMember>(&self, member: M) -> bool {
        locate(member).is_ok_and(|(key, offset)| self.chunk_bits(key) & (1_u64 << offset) != 0)
    }

    /// Returns an iterator over the members in ascending order.
    #[must_use]
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            chunks: self.chunks.iter(),
            current: None,
            remaining: self.cardinality,
        }
    }

    fn chunk_bits(&self, key: i64) -> u64 {
        self.chunks
            .find_by(|chunk| key.cmp(&chunk.key))
            .map_or(0, |chunk| chunk.bits)
    }

    /// ORs `bits` into the chunk at `key`.
    fn merge_chunk(&mut self, key: i64, bits: u64) {
        let stored = self.chunk_bits(key);
        let merged = stored | bits;
        if merged != stored {
            self.cardinality += u64::from(merged.count_ones() - stored.count_ones());
            self.chunks.insert(Chunk { key, bits: merged });
        }
    }

    fn from_chunks<I: IntoIterator<Item = (i64, u64)>>(chunks: I) -> Self {
        let mut set = Self::new();
        for (key, bits) in chunks {
            set.merge_chunk(key, bits);
        }
        set
    }
}

fn locate<M: BitsetMember>(member: M) -> Result<(i64, u32), BitsetError> {
    member.to_i128().map_or_else(
        || {
            Err(BitsetError::OutOfRange {
                value: member.to_string(),
            })
        },
        chunk_location,
    )
}

// =============================================================================
// Set Algebra
// =============================================================================

impl Bitset {
    /// Orders `self` and `other` by occupied chunk count, smaller first.
    fn in_size_order<'a>(&'a self, operation: &str, other: &'a Self) -> (&'a Self, &'a Self) {
        log::trace!(
            "bitset {operation}: operands of {} and {} chunks",
            self.chunk_count(),
            other.chunk_count()
        );
        if self.chunk_count() < other.chunk_count() {
            (self, other)
        } else {
            (other, self)
        }
    }

    /// Returns the members present in either set.
    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        let (smaller, larger) = self.in_size_order("union", other);
        let mut result = larger.clone();
        for chunk in smaller.chunks.iter() {
            result.merge_chunk(chunk.key, chunk.bits);
        }
        result
    }

    /// Returns the members present in both sets.
    #[must_use]
    pub fn intersection(&self, other: &Self) -> Self {
        let (smaller, larger) = self.in_size_order("intersection", other);
        Self::from_chunks(
            smaller
                .chunks
                .iter()
                .map(|chunk| (chunk.key, chunk.bits & larger.chunk_bits(chunk.key))),
        )
    }

    /// Returns the members of `self` that are not in `other`.
    #[must_use]
    pub fn difference(&self, other: &Self) -> Self {
        log::trace!(
            "bitset difference: operands of {} and {} chunks",
            self.chunk_count(),
            other.chunk_count()
        );
        Self::from_chunks(
            self.chunks
                .iter()
                .map(|chunk| (chunk.key, chunk.bits & !other.chunk_bits(chunk.key))),
        )
    }

    /// Returns the members present in exactly one of the two sets.
    #[must_use]
    pub fn symmetric_difference(&self, other: &Self) -> Self {
        let mut result = self.difference(other);
        for chunk in other.chunks.iter() {
            result.merge_chunk(chunk.key, chunk.bits & !self.chunk_bits(chunk.key));
        }
        result
    }

    /// Returns `true` if every member of `self` is in `other`.
    #[must_use]
    pub fn is_subset(&self, other: &Self) -> bool {
        self.cardinality <= other.cardinality
            && self.chunk_count() <= other.chunk_count()
            && self
                .chunks
                .iter()
                .all(|chunk| chunk.bits & other.chunk_bits(chunk.key) == chunk.bits)
    }

    /// Returns `true` if `self` is a subset of `other` and smaller than it.
    #[must_use]
    pub fn is_proper_subset(&self, other: &Self) -> bool {
        self.cardinality < other.cardinality && self.is_subset(other)
    }

    /// Returns `true` if every member of `other` is in `self`.
    #[must_use]
    pub fn is_superset(&self, other: &Self) -> bool {
        other.is_subset(self)
    }

    /// Returns `true` if `self` is a superset of `other` and larger than it.
    #[must_use]
    pub fn is_proper_superset(&self, other: &Self) -> bool {
        other.is_proper_subset(self)
    }

    /// Returns `true` if the sets share at least one member.
    #[must_use]
    pub fn intersects(&self, other: &Self) -> bool {
        let (smaller, larger) = self.in_size_order("intersects", other);
        smaller
            .chunks
            .iter()
            .any(|chunk| chunk.bits & larger.chunk_bits(chunk.key) != 0)
    }

    /// Returns `true` if the sets share no member.
    #[must_use]
    pub fn is_disjoint(&self, other: &Self) -> bool {
        !self.intersects(other)
    }
}

// =============================================================================
// Iterator
// =============================================================================

/// An iterator over the members of a [`Bitset`] in ascending order.
pub struct Iter<'a> {
    chunks: Traversal<'a, Chunk>,
    current: Option<(i64, u64)>,
    remaining: u64,
}

impl Iterator for Iter<'_> {
    type Item = i128;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some((key, bits)) = self.current.as_mut() {
                if *bits != 0 {
                    let offset = bits.trailing_zeros();
                    *bits &= *bits - 1;
                    self.remaining -= 1;
                    return Some(member_value(*key, offset));
                }
            }
            let chunk = self.chunks.next()?;
            self.current = Some((chunk.key, chunk.bits));
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match usize::try_from(self.remaining) {
            Ok(remaining) => (remaining, Some(remaining)),
            Err(_) => (usize::MAX, None),
        }
    }
}

impl FusedIterator for Iter<'_> {}

impl<'a> IntoIterator for &'a Bitset {
    type Item = i128;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

// =============================================================================
// Standard Trait Implementations
// =============================================================================

impl Default for Bitset {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for Bitset {
    fn eq(&self, other: &Self) -> bool {
        self.cardinality == other.cardinality && self.chunks == other.chunks
    }
}

impl Eq for Bitset {}

impl fmt::Debug for Bitset {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_set().entries(self.iter()).finish()
    }
}

impl fmt::Display for Bitset {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{{")?;
        for (index, member) in self.iter().enumerate() {
            if index > 0 {
                write!(formatter, ", ")?;
            }
            write!(formatter, "{member}")?;
        }
        write!(formatter, "}}")
    }
}

// =============================================================================
// Tests
// =============================================================================
