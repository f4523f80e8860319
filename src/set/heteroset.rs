//! Heterogeneous sets.
//!
//! Members of a [`HeteroSet`] may be of different kinds. Every kind has a
//! stable rank; members are ordered by rank first and then by the kind's own
//! total order, so members of different kinds never compare equal. The ready
//! made [`Member`] enum covers the primitive kinds; any other tagged enum can
//! take part by implementing [`Discriminant`].
//!
//! Set algebra is provided as free functions that iterate the smaller operand
//! and probe the larger one.
//!
//! # Examples
//!
//! ```rust
//! use llrb_collections::set::heteroset::{self, HeteroSet, Member};
//!
//! let numbers = HeteroSet::from_items([Member::from(1), Member::from(2.5), Member::from("two")]);
//! let more = HeteroSet::from_items([Member::from(2.5), Member::from('x')]);
//!
//! assert!(numbers.has(&Member::Int(1)));
//! assert!(!numbers.has(&Member::Real(1.0)));
//! assert_eq!(heteroset::union(&numbers, &more).cardinality(), 4);
//! assert_eq!(heteroset::intersection(&numbers, &more).cardinality(), 1);
//! ```

use std::cmp::Ordering;
use std::fmt;

use crate::ordering::Comparator;
use crate::tree::{DuplicatePolicy, IntoTraversal, LlrbTree, Traversal};

// =============================================================================
// Discriminant
// =============================================================================

/// A value that belongs to one of several ranked kinds.
///
/// Implementations must satisfy, for all `a`, `b`:
///
/// - `rank` is stable: the same kind always reports the same rank
/// - when `a.rank() == b.rank()`, `compare_within_rank` is a strict total
///   order
///
/// `compare_within_rank` is only ever called on two values of the same rank.
pub trait Discriminant {
    /// The rank of this value's kind.
    fn rank(&self) -> u32;

    /// Compares two values of the same kind.
    fn compare_within_rank(&self, other: &Self) -> Ordering;
}

/// Orders [`Discriminant`] values by rank, then within the rank.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct RankedOrder;

impl<T: Discriminant + ?Sized> Comparator<T> for RankedOrder {
    #[inline]
    fn compare(&self, left: &T, right: &T) -> Ordering {
        left.rank()
            .cmp(&right.rank())
            .then_with(|| left.compare_within_rank(right))
    }
}

// =============================================================================
// Member
// =============================================================================

/// A member of a heterogeneous set holding one primitive kind of value.
///
/// Kinds are ranked in declaration order. `Real` values are compared with
/// [`f64::total_cmp`], so `-0.0` and `0.0` are distinct members and a `NaN` is
/// equal to a `NaN` with the same bit pattern.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Member {
    /// A boolean.
    Bool(bool),
    /// A signed integer.
    Int(i64),
    /// An unsigned integer.
    UInt(u64),
    /// A floating point number.
    Real(f64),
    /// A character.
    Char(char),
    /// A string.
    Text(String),
    /// A byte string.
    Bytes(Vec<u8>),
}

impl Discriminant for Member {
    fn rank(&self) -> u32 {
        match self {
            Self::Bool(_) => 0,
            Self::Int(_) => 1,
            Self::UInt(_) => 2,
            Self::Real(_) => 3,
            Self::Char(_) => 4,
            Self::Text(_) => 5,
            Self::Bytes(_) => 6,
        }
    }

    fn compare_within_rank(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Bool(left), Self::Bool(right)) => left.cmp(right),
            (Self::Int(left), Self::Int(right)) => left.cmp(right),
            (Self::UInt(left), Self::UInt(right)) => left.cmp(right),
            (Self::Real(left), Self::Real(right)) => left.total_cmp(right),
            (Self::Char(left), Self::Char(right)) => left.cmp(right),
            (Self::Text(left), Self::Text(right)) => left.cmp(right),
            (Self::Bytes(left), Self::Bytes(right)) => left.cmp(right),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

impl PartialEq for Member {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Member {}

impl PartialOrd for Member {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Member {
    fn cmp(&self, other: &Self) -> Ordering {
        RankedOrder.compare(self, other)
    }
}

impl fmt::Display for Member {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(value) => write!(formatter, "{value}"),
            Self::Int(value) => write!(formatter, "{value}"),
            Self::UInt(value) => write!(formatter, "{value}"),
            Self::Real(value) => write!(formatter, "{value}"),
            Self::Char(value) => write!(formatter, "{value:?}"),
            Self::Text(value) => write!(formatter, "{value:?}"),
            Self::Bytes(value) => write!(formatter, "{value:?}"),
        }
    }
}

macro_rules! impl_member_from {
    ($variant:ident($target:ty) <= $($source:ty),+) => {
        $(
            impl From<$source> for Member {
                #[inline]
                fn from(value: $source) -> Self {
                    Self::$variant(<$target>::from(value))
                }
            }
        )+
    };
}

impl_member_from!(Bool(bool) <= bool);
impl_member_from!(Int(i64) <= i8, i16, i32, i64);
impl_member_from!(UInt(u64) <= u8, u16, u32, u64);
impl_member_from!(Real(f64) <= f32, f64);
impl_member_from!(Char(char) <= char);
impl_member_from!(Text(String) <= String, &str);
impl_member_from!(Bytes(Vec<u8>) <= Vec<u8>, &[u8]);

// =============================================================================
// HeteroSet Definition
// =============================================================================

/// A set of [`Discriminant`] values backed by a left-leaning red-black tree.
///
/// # Time Complexity
///
/// | Operation     | Complexity |
/// |---------------|------------|
/// | `add`         | O(log N)   |
/// | `remove`      | O(log N)   |
/// | `has`         | O(log N)   |
/// | `cardinality` | O(1)       |
/// | `clone`       | O(N)       |
///
/// # Examples
///
/// ```rust
/// use llrb_collections::set::heteroset::{HeteroSet, Member};
///
/// let mut set = HeteroSet::new();
/// assert!(set.add(Member::Int(4)));
/// assert!(set.add(Member::Real(4.0)));
/// assert!(!set.add(Member::Int(4)));
/// assert_eq!(set.cardinality(), 2);
///
/// let ordered: Vec<String> = set.iter().map(ToString::to_string).collect();
/// assert_eq!(ordered, vec!["4", "4"]);
/// ```
#[derive(Clone)]
pub struct HeteroSet<T = Member> {
    tree: LlrbTree<T, RankedOrder>,
}

impl<T> HeteroSet<T> {
    /// Creates an empty set.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            tree: LlrbTree::with_comparator(DuplicatePolicy::Filter, RankedOrder),
        }
    }

    /// Returns the number of members.
    #[inline]
    #[must_use]
    pub const fn cardinality(&self) -> usize {
        self.tree.len()
    }

    /// Returns `true` if the set has no members.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// Returns an iterator over the members, by rank and then in order within
    /// each rank.
    #[must_use]
    pub fn iter(&self) -> Traversal<'_, T> {
        self.tree.iter()
    }

    /// Returns an independent copy of the set.
    #[must_use]
    pub fn copy(&self) -> Self
    where
        T: Clone,
    {
        self.clone()
    }
}

impl<T: Discriminant> HeteroSet<T> {
    /// Creates a set holding the given members.
    pub fn from_items<I: IntoIterator<Item = T>>(items: I) -> Self {
        items.into_iter().collect()
    }

    /// Adds a member; returns `true` if it was not already present.
    ///
    /// Adding a member equal to a stored one replaces the stored value.
    pub fn add(&mut self, item: T) -> bool {
        self.tree.insert(item).is_none()
    }

    /// Removes a member; returns `true` if it was present.
    pub fn remove(&mut self, item: &T) -> bool {
        self.tree.delete(item).is_some()
    }

    /// Returns `true` if a member equal to `item` is present.
    #[must_use]
    pub fn has(&self, item: &T) -> bool {
        self.tree.contains(item)
    }

    /// Returns the stored member equal to `item`.
    #[must_use]
    pub fn find(&self, item: &T) -> Option<&T> {
        self.tree.find(item)
    }
}

// =============================================================================
// Set Algebra
// =============================================================================

/// Orders two operands by cardinality, smaller first.
fn in_size_order<'a, T>(
    operation: &str,
    set_a: &'a HeteroSet<T>,
    set_b: &'a HeteroSet<T>,
) -> (&'a HeteroSet<T>, &'a HeteroSet<T>) {
    log::trace!(
        "heteroset {operation}: operands of {} and {} members",
        set_a.cardinality(),
        set_b.cardinality()
    );
    if set_a.cardinality() < set_b.cardinality() {
        (set_a, set_b)
    } else {
        (set_b, set_a)
    }
}

/// Returns the members present in either set.
///
/// Copies the larger operand and adds the members of the smaller one.
#[must_use]
pub fn union<T: Discriminant + Clone>(set_a: &HeteroSet<T>, set_b: &HeteroSet<T>) -> HeteroSet<T> {
    let (smaller, larger) = in_size_order("union", set_a, set_b);
    let mut result = larger.clone();
    result.extend(smaller.iter().cloned());
    result
}

/// Returns the members present in both sets.
#[must_use]
pub fn intersection<T: Discriminant + Clone>(
    set_a: &HeteroSet<T>,
    set_b: &HeteroSet<T>,
) -> HeteroSet<T> {
    let (smaller, larger) = in_size_order("intersection", set_a, set_b);
    smaller
        .iter()
        .filter(|item| larger.has(item))
        .cloned()
        .collect()
}

/// Returns the members of `set_a` that are not in `set_b`.
#[must_use]
pub fn difference<T: Discriminant + Clone>(
    set_a: &HeteroSet<T>,
    set_b: &HeteroSet<T>,
) -> HeteroSet<T> {
    log::trace!(
        "heteroset difference: operands of {} and {} members",
        set_a.cardinality(),
        set_b.cardinality()
    );
    set_a
        .iter()
        .filter(|item| !set_b.has(item))
        .cloned()
        .collect()
}

/// Returns the members present in exactly one of the two sets.
#[must_use]
pub fn symmetric_difference<T: Discriminant + Clone>(
    set_a: &HeteroSet<T>,
    set_b: &HeteroSet<T>,
) -> HeteroSet<T> {
    let mut result = difference(set_a, set_b);
    result.extend(set_b.iter().filter(|item| !set_a.has(item)).cloned());
    result
}

/// Returns `true` if every member of `set_a` is in `set_b`.
#[must_use]
pub fn is_subset<T: Discriminant>(set_a: &HeteroSet<T>, set_b: &HeteroSet<T>) -> bool {
    set_a.cardinality() <= set_b.cardinality() && set_a.iter().all(|item| set_b.has(item))
}

/// Returns `true` if `set_a` is a subset of `set_b` and smaller than it.
#[must_use]
pub fn is_proper_subset<T: Discriminant>(set_a: &HeteroSet<T>, set_b: &HeteroSet<T>) -> bool {
    set_a.cardinality() < set_b.cardinality() && is_subset(set_a, set_b)
}

/// Returns `true` if every member of `set_b` is in `set_a`.
#[must_use]
pub fn is_superset<T: Discriminant>(set_a: &HeteroSet<T>, set_b: &HeteroSet<T>) -> bool {
    is_subset(set_b, set_a)
}

/// Returns `true` if `set_a` is a superset of `set_b` and larger than it.
#[must_use]
pub fn is_proper_superset<T: Discriminant>(set_a: &HeteroSet<T>, set_b: &HeteroSet<T>) -> bool {
    is_proper_subset(set_b, set_a)
}

/// Returns `true` if the sets share at least one member.
#[must_use]
pub fn intersects<T: Discriminant>(set_a: &HeteroSet<T>, set_b: &HeteroSet<T>) -> bool {
    let (smaller, larger) = in_size_order("intersects", set_a, set_b);
    smaller.iter().any(|item| larger.has(item))
}

/// Returns `true` if the sets share no member.
#[must_use]
pub fn is_disjoint<T: Discriminant>(set_a: &HeteroSet<T>, set_b: &HeteroSet<T>) -> bool {
    !intersects(set_a, set_b)
}

/// Returns `true` if both sets hold the same members.
#[must_use]
pub fn equal<T: Discriminant>(set_a: &HeteroSet<T>, set_b: &HeteroSet<T>) -> bool {
    set_a.cardinality() == set_b.cardinality() && is_subset(set_a, set_b)
}

// =============================================================================
// Iterator Integration
// =============================================================================

impl<T> IntoIterator for HeteroSet<T> {
    type Item = T;
    type IntoIter = IntoTraversal<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.tree.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a HeteroSet<T> {
    type Item = &'a T;
    type IntoIter = Traversal<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: Discriminant> FromIterator<T> for HeteroSet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

impl<T: Discriminant> Extend<T> for HeteroSet<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.add(item);
        }
    }
}

// =============================================================================
// Standard Trait Implementations
// =============================================================================

impl<T> Default for HeteroSet<T> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Discriminant> PartialEq for HeteroSet<T> {
    fn eq(&self, other: &Self) -> bool {
        equal(self, other)
    }
}

impl<T: Discriminant> Eq for HeteroSet<T> {}

impl<T: fmt::Debug> fmt::Debug for HeteroSet<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_set().entries(self.iter()).finish()
    }
}

// =============================================================================
// Serde Support
// =============================================================================

#[cfg(feature = "serde")]
impl<T: serde::Serialize> serde::Serialize for HeteroSet<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_seq(self.iter())
    }
}

#[cfg(feature = "serde")]
impl<'de, T> serde::Deserialize<'de> for HeteroSet<T>
where
    T: serde::Deserialize<'de> + Discriminant,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        <Vec<T> as serde::Deserialize>::deserialize(deserializer).map(Self::from_items)
    }
}

// =============================================================================
// Tests
// =============================================================================
