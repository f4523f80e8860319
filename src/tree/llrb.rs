//! The tree facade: policy, count, lookup, mutation and traversal entry points.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use super::delete::delete;
use super::error::InvariantViolation;
use super::insert::{insert_duplicate, insert_filtered};
use super::node::{Color, Link, Node, is_red};
use super::traversal::{IntoTraversal, Traversal, TraversalOrder};
use crate::ordering::{Comparator, NaturalOrder};

// =============================================================================
// Duplicate Policy
// =============================================================================

/// What an insertion does when an equal item is already stored.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DuplicatePolicy {
    /// At most one item per equivalence class. Inserting an equal item
    /// overwrites the stored one (last write wins).
    #[default]
    Filter,
    /// Every insertion adds a node; equal items are kept in insertion order.
    Keep,
}

// =============================================================================
// Search Result
// =============================================================================

/// The outcome of [`LlrbTree::search`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Search<'a, T> {
    /// The stored item equal to the probe, if any.
    pub found: Option<&'a T>,
    /// The number of comparator calls made during the descent.
    pub comparisons: usize,
}

// =============================================================================
// LlrbTree Definition
// =============================================================================

/// An ordered container backed by a left-leaning red-black tree.
///
/// Items are kept in the order defined by the tree's [`Comparator`]. The tree
/// height never exceeds `2 * log2(len + 1)`, so insertion, deletion and lookup
/// all take O(log N) comparisons.
///
/// The duplicate policy is fixed at construction:
///
/// - [`DuplicatePolicy::Filter`]: equal items are stored once and a later
///   insertion replaces the stored item, which makes the tree usable as a
///   lookup table keyed by part of the item.
/// - [`DuplicatePolicy::Keep`]: every insertion adds an item.
///
/// # Time Complexity
///
/// | Operation   | Complexity |
/// |-------------|------------|
/// | `insert`    | O(log N)   |
/// | `delete`    | O(log N)   |
/// | `find`      | O(log N)   |
/// | `len`       | O(1)       |
/// | `traverse`  | O(N)       |
/// | `clone`     | O(N)       |
///
/// # Concurrency
///
/// The tree has no internal synchronization. Mutation needs `&mut self`, and
/// traversals borrow the tree, so the borrow checker rules out mutation during
/// a traversal. Callers that share a tree between threads must serialize
/// writers themselves, for example with one lock per tree, or work on a clone.
///
/// # Examples
///
/// ```rust
/// use llrb_collections::tree::{DuplicatePolicy, LlrbTree, TraversalOrder};
///
/// let mut tree = LlrbTree::new(DuplicatePolicy::Filter);
/// for item in [5, 3, 8, 1, 4, 7, 9] {
///     tree.insert(item);
/// }
/// assert_eq!(tree.len(), 7);
///
/// let ascending: Vec<i32> = tree.iter().copied().collect();
/// assert_eq!(ascending, vec![1, 3, 4, 5, 7, 8, 9]);
///
/// assert_eq!(tree.delete(&5), Some(5));
/// assert!(!tree.contains(&5));
/// assert_eq!(tree.len(), 6);
/// ```
#[derive(Clone)]
pub struct LlrbTree<T, C = NaturalOrder> {
    /// Root node of the tree
    root: Link<T>,
    /// Number of items
    count: usize,
    /// Stamp handed to the next inserted node
    next_seq: u64,
    policy: DuplicatePolicy,
    comparator: C,
}

static_assertions::assert_impl_all!(LlrbTree<i32>: Send, Sync, Clone);
static_assertions::assert_not_impl_any!(LlrbTree<std::rc::Rc<i32>>: Send, Sync);

impl<T> LlrbTree<T, NaturalOrder> {
    /// Creates an empty tree ordered by `T`'s [`Ord`] implementation.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use llrb_collections::tree::{DuplicatePolicy, LlrbTree};
    ///
    /// let tree: LlrbTree<i32> = LlrbTree::new(DuplicatePolicy::Keep);
    /// assert!(tree.is_empty());
    /// assert_eq!(tree.policy(), DuplicatePolicy::Keep);
    /// ```
    #[inline]
    #[must_use]
    pub const fn new(policy: DuplicatePolicy) -> Self {
        Self::with_comparator(policy, NaturalOrder)
    }

    /// Creates an empty tree that stores each distinct item once.
    #[inline]
    #[must_use]
    pub const fn filtered() -> Self {
        Self::new(DuplicatePolicy::Filter)
    }

    /// Creates an empty tree that keeps duplicate items.
    #[inline]
    #[must_use]
    pub const fn keeping_duplicates() -> Self {
        Self::new(DuplicatePolicy::Keep)
    }
}

impl<T, C> LlrbTree<T, C> {
    /// Creates an empty tree ordered by `comparator`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use llrb_collections::ordering::ReverseOrder;
    /// use llrb_collections::tree::{DuplicatePolicy, LlrbTree};
    ///
    /// let mut tree = LlrbTree::with_comparator(DuplicatePolicy::Filter, ReverseOrder);
    /// tree.extend([1, 3, 2]);
    /// assert_eq!(tree.iter().copied().collect::<Vec<_>>(), vec![3, 2, 1]);
    /// ```
    #[inline]
    #[must_use]
    pub const fn with_comparator(policy: DuplicatePolicy, comparator: C) -> Self {
        Self {
            root: None,
            count: 0,
            next_seq: 0,
            policy,
            comparator,
        }
    }

    /// Returns the number of items in the tree.
    ///
    /// Under [`DuplicatePolicy::Filter`] this is the number of distinct items;
    /// under [`DuplicatePolicy::Keep`] it is the number of insertions minus
    /// the number of successful deletions.
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.count
    }

    /// Returns `true` if the tree holds no items.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Returns the duplicate policy chosen at construction.
    #[inline]
    #[must_use]
    pub const fn policy(&self) -> DuplicatePolicy {
        self.policy
    }

    /// Returns the comparator that orders this tree.
    #[inline]
    #[must_use]
    pub const fn comparator(&self) -> &C {
        &self.comparator
    }

    /// Removes every item, keeping the policy and comparator.
    pub fn clear(&mut self) {
        self.root = None;
        self.count = 0;
    }

    /// Returns the number of nodes on the longest root-to-leaf path.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use llrb_collections::tree::LlrbTree;
    ///
    /// let tree: LlrbTree<u32> = (0..1023).collect();
    /// assert!(tree.height() <= 20);
    /// ```
    #[must_use]
    pub fn height(&self) -> usize {
        fn height_of<T>(link: &Link<T>) -> usize {
            link.as_ref().map_or(0, |node| {
                1 + height_of(&node.left).max(height_of(&node.right))
            })
        }
        height_of(&self.root)
    }

    /// Returns the first item in comparator order.
    #[must_use]
    pub fn first(&self) -> Option<&T> {
        let mut node = self.root.as_deref()?;
        while let Some(left) = node.left.as_deref() {
            node = left;
        }
        Some(&node.item)
    }

    /// Returns the last item in comparator order.
    #[must_use]
    pub fn last(&self) -> Option<&T> {
        let mut node = self.root.as_deref()?;
        while let Some(right) = node.right.as_deref() {
            node = right;
        }
        Some(&node.item)
    }

    /// Returns an iterator over the items in ascending order.
    #[must_use]
    pub fn iter(&self) -> Traversal<'_, T> {
        self.traverse(TraversalOrder::InOrder)
    }

    /// Returns a lazy traversal over the items in the given order.
    ///
    /// Each call starts a fresh traversal.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use llrb_collections::tree::{LlrbTree, TraversalOrder};
    ///
    /// let tree: LlrbTree<i32> = [2, 1, 3].into_iter().collect();
    /// let post_order: Vec<&i32> = tree.traverse(TraversalOrder::PostOrder).collect();
    /// assert_eq!(post_order, vec![&1, &3, &2]);
    /// ```
    #[must_use]
    pub fn traverse(&self, order: TraversalOrder) -> Traversal<'_, T> {
        Traversal::new(&self.root, order, self.count)
    }

    /// Consumes the tree and yields its items in the given order.
    #[must_use]
    pub fn into_traversal(self, order: TraversalOrder) -> IntoTraversal<T> {
        IntoTraversal::new(self.root, order, self.count)
    }

    /// Returns a structurally independent deep copy of the tree.
    ///
    /// Same as [`Clone::clone`]; every node is duplicated, so mutating the copy
    /// never affects the original and vice versa.
    #[must_use]
    pub fn copy(&self) -> Self
    where
        T: Clone,
        C: Clone,
    {
        self.clone()
    }
}

impl<T, C: Comparator<T>> LlrbTree<T, C> {
    /// Inserts an item.
    ///
    /// Under [`DuplicatePolicy::Filter`], inserting an item equal to a stored
    /// one replaces the stored item and returns it; the count is unchanged.
    /// Otherwise a new node is created and `None` is returned.
    ///
    /// # Complexity
    ///
    /// O(log N)
    ///
    /// # Examples
    ///
    /// ```rust
    /// use llrb_collections::tree::{DuplicatePolicy, LlrbTree};
    ///
    /// let by_key = |left: &(u8, char), right: &(u8, char)| left.0.cmp(&right.0);
    /// let mut table = LlrbTree::with_comparator(DuplicatePolicy::Filter, by_key);
    ///
    /// assert_eq!(table.insert((1, 'a')), None);
    /// assert_eq!(table.insert((1, 'b')), Some((1, 'a')));
    /// assert_eq!(table.len(), 1);
    /// assert_eq!(table.find(&(1, ' ')), Some(&(1, 'b')));
    /// ```
    pub fn insert(&mut self, item: T) -> Option<T> {
        let root = self.root.take();
        let seq = self.next_seq;
        self.next_seq += 1;
        let (mut new_root, replaced) = match self.policy {
            DuplicatePolicy::Filter => insert_filtered(root, item, seq, &self.comparator),
            DuplicatePolicy::Keep => (insert_duplicate(root, item, seq, &self.comparator), None),
        };
        new_root.color = Color::Black;
        self.root = Some(new_root);
        if replaced.is_none() {
            self.count += 1;
        }
        replaced
    }

    /// Deletes one item equal to `item` and returns it.
    ///
    /// If the tree keeps duplicates, only the earliest inserted of the equal
    /// items is removed. Deleting an absent item, or deleting from an empty tree, is a no-op.
    ///
    /// # Complexity
    ///
    /// O(log N)
    ///
    /// # Examples
    ///
    /// ```rust
    /// use llrb_collections::tree::LlrbTree;
    ///
    /// let mut tree = LlrbTree::keeping_duplicates();
    /// tree.extend([3, 3, 3]);
    ///
    /// assert_eq!(tree.delete(&3), Some(3));
    /// assert_eq!(tree.len(), 2);
    /// assert!(tree.contains(&3));
    /// assert_eq!(tree.delete(&4), None);
    /// ```
    pub fn delete(&mut self, item: &T) -> Option<T> {
        let Self {
            root,
            count,
            policy,
            comparator,
            ..
        } = self;
        remove_matching(root, count, *policy, &mut |stored: &T| {
            comparator.compare(item, stored)
        })
    }

    /// Returns the stored item equal to `item`.
    ///
    /// # Complexity
    ///
    /// O(log N)
    #[must_use]
    pub fn find(&self, item: &T) -> Option<&T> {
        self.search(item).found
    }

    /// Returns `true` if an item equal to `item` is stored.
    #[must_use]
    pub fn contains(&self, item: &T) -> bool {
        self.find(item).is_some()
    }

    /// Looks up `item` and reports how many comparisons the descent took.
    ///
    /// An empty tree answers without any comparison. The comparison count is
    /// bounded by the tree height.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use llrb_collections::tree::LlrbTree;
    ///
    /// let tree: LlrbTree<i32> = (0..100).collect();
    /// let search = tree.search(&42);
    /// assert_eq!(search.found, Some(&42));
    /// assert!(search.comparisons <= tree.height());
    /// ```
    #[must_use]
    pub fn search(&self, item: &T) -> Search<'_, T> {
        let mut comparisons = 0;
        let found = self.descend(|stored| {
            comparisons += 1;
            self.comparator.compare(item, stored)
        });
        Search { found, comparisons }
    }

    /// Checks every structural invariant of the tree.
    ///
    /// Verifies comparator order, the left-leaning and red-link rules,
    /// perfect black balance, a black root, the duplicate policy and the
    /// recorded count.
    ///
    /// # Errors
    ///
    /// Returns the first [`InvariantViolation`] found.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use llrb_collections::tree::LlrbTree;
    ///
    /// let mut tree: LlrbTree<i32> = (0..500).collect();
    /// for item in (0..500).step_by(3) {
    ///     tree.delete(&item);
    /// }
    /// assert_eq!(tree.check_invariants(), Ok(()));
    /// ```
    pub fn check_invariants(&self) -> Result<(), InvariantViolation> {
        let result = self.verify();
        if let Err(violation) = &result {
            log::debug!("llrb tree invariant violated: {violation}");
        }
        result
    }

    fn verify(&self) -> Result<(), InvariantViolation> {
        if is_red(&self.root) {
            return Err(InvariantViolation::RedRoot);
        }
        black_height(&self.root, 0)?;

        let mut actual = 0;
        let mut previous: Option<&T> = None;
        for (position, item) in self.iter().enumerate() {
            if let Some(previous) = previous {
                match self.comparator.compare(previous, item) {
                    Ordering::Greater => return Err(InvariantViolation::OutOfOrder { position }),
                    Ordering::Equal if self.policy == DuplicatePolicy::Filter => {
                        return Err(InvariantViolation::DuplicateItem { position });
                    }
                    _ => {}
                }
            }
            previous = Some(item);
            actual += 1;
        }

        if actual == self.count {
            Ok(())
        } else {
            Err(InvariantViolation::CountMismatch {
                recorded: self.count,
                actual,
            })
        }
    }
}

impl<T, C> LlrbTree<T, C> {
    /// Returns a stored item matched by `probe`.
    ///
    /// `probe(stored)` must return the ordering of the wanted item relative to
    /// `stored`, consistently with the tree's comparator. This allows looking
    /// up an item by a key without building a whole item.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use llrb_collections::tree::{DuplicatePolicy, LlrbTree};
    ///
    /// let by_id = |left: &(u32, String), right: &(u32, String)| left.0.cmp(&right.0);
    /// let mut tree = LlrbTree::with_comparator(DuplicatePolicy::Filter, by_id);
    /// tree.insert((7, "seven".to_string()));
    ///
    /// let found = tree.find_by(|stored| 7.cmp(&stored.0));
    /// assert_eq!(found.map(|entry| entry.1.as_str()), Some("seven"));
    /// ```
    #[must_use]
    pub fn find_by<F>(&self, probe: F) -> Option<&T>
    where
        F: FnMut(&T) -> Ordering,
    {
        self.descend(probe)
    }

    /// Deletes one item matched by `probe` and returns it.
    ///
    /// See [`find_by`](Self::find_by) for the meaning of `probe`. Under
    /// [`DuplicatePolicy::Keep`] the earliest inserted matching item is removed.
    pub fn delete_by<F>(&mut self, mut probe: F) -> Option<T>
    where
        F: FnMut(&T) -> Ordering,
    {
        remove_matching(&mut self.root, &mut self.count, self.policy, &mut probe)
    }

    fn descend<F>(&self, mut probe: F) -> Option<&T>
    where
        F: FnMut(&T) -> Ordering,
    {
        let mut link = &self.root;
        while let Some(node) = link {
            match probe(&node.item) {
                Ordering::Less => link = &node.left,
                Ordering::Greater => link = &node.right,
                Ordering::Equal => return Some(&node.item),
            }
        }
        None
    }
}

/// Removes one item matched by `probe` from `root` and keeps `count` in step.
///
/// Equal items of a tree keeping duplicates are told apart by their stamps:
/// the earliest matching node is located first, then deleted by
/// `(item, seq)`.
fn remove_matching<T, F>(
    root: &mut Link<T>,
    count: &mut usize,
    policy: DuplicatePolicy,
    probe: &mut F,
) -> Option<T>
where
    F: FnMut(&T) -> Ordering,
{
    let removed = match policy {
        DuplicatePolicy::Filter => unlink(root, &mut |node: &Node<T>| probe(&node.item)),
        DuplicatePolicy::Keep => earliest_match(root, probe).and_then(|seq| {
            unlink(root, &mut |node: &Node<T>| probe(&node.item).then(seq.cmp(&node.seq)))
        }),
    };

    if removed.is_some() {
        *count -= 1;
    } else {
        log::trace!("llrb delete found no matching item among {} items", *count);
    }
    removed
}

/// Runs a top-down deletion from `root` and turns the new root black.
fn unlink<T, F>(root: &mut Link<T>, probe: &mut F) -> Option<T>
where
    F: FnMut(&Node<T>) -> Ordering,
{
    let node = root.take()?;
    let (mut new_root, removed) = delete(node, probe);
    if let Some(node) = new_root.as_mut() {
        node.color = Color::Black;
    }
    *root = new_root;
    removed
}

/// Returns the stamp of the left-most node matched by `probe`.
fn earliest_match<T, F>(mut link: &Link<T>, probe: &mut F) -> Option<u64>
where
    F: FnMut(&T) -> Ordering,
{
    let mut found = None;
    while let Some(node) = link {
        match probe(&node.item) {
            Ordering::Greater => link = &node.right,
            Ordering::Less => link = &node.left,
            Ordering::Equal => {
                found = Some(node.seq);
                link = &node.left;
            }
        }
    }
    found
}

/// Returns the number of black links below `link`, checking the red-link rules.
fn black_height<T>(link: &Link<T>, depth: usize) -> Result<usize, InvariantViolation> {
    let Some(node) = link else {
        return Ok(0);
    };
    if is_red(&node.right) {
        return Err(InvariantViolation::RedRightLink { depth });
    }
    if node.is_red() && is_red(&node.left) {
        return Err(InvariantViolation::ConsecutiveRedLinks { depth });
    }

    let left = black_height(&node.left, depth + 1)?;
    let right = black_height(&node.right, depth + 1)?;
    if left != right {
        return Err(InvariantViolation::BlackHeightMismatch { left, right });
    }
    Ok(left + usize::from(!node.is_red()))
}

// =============================================================================
// Iterator Integration
// =============================================================================

impl<T, C> IntoIterator for LlrbTree<T, C> {
    type Item = T;
    type IntoIter = IntoTraversal<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.into_traversal(TraversalOrder::InOrder)
    }
}

impl<'a, T, C> IntoIterator for &'a LlrbTree<T, C> {
    type Item = &'a T;
    type IntoIter = Traversal<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Collects into a tree with [`DuplicatePolicy::Filter`].
impl<T, C: Comparator<T> + Default> FromIterator<T> for LlrbTree<T, C> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut tree = Self::with_comparator(DuplicatePolicy::Filter, C::default());
        tree.extend(iter);
        tree
    }
}

impl<T, C: Comparator<T>> Extend<T> for LlrbTree<T, C> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.insert(item);
        }
    }
}

// =============================================================================
// Standard Trait Implementations
// =============================================================================

impl<T, C: Default> Default for LlrbTree<T, C> {
    #[inline]
    fn default() -> Self {
        Self::with_comparator(DuplicatePolicy::Filter, C::default())
    }
}

/// Two trees are equal when they hold equal items in the same order; shape,
/// policy and comparator are not compared.
impl<T: PartialEq, C> PartialEq for LlrbTree<T, C> {
    fn eq(&self, other: &Self) -> bool {
        self.count == other.count && self.iter().eq(other.iter())
    }
}

impl<T: Eq, C> Eq for LlrbTree<T, C> {}

impl<T: Hash, C> Hash for LlrbTree<T, C> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.count.hash(state);
        for item in self {
            item.hash(state);
        }
    }
}

impl<T: fmt::Debug, C> fmt::Debug for LlrbTree<T, C> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_list().entries(self.iter()).finish()
    }
}

// =============================================================================
// Serde Support
// =============================================================================

#[cfg(feature = "serde")]
impl<T: serde::Serialize, C> serde::Serialize for LlrbTree<T, C> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeStruct;

        struct Items<'a, T, C>(&'a LlrbTree<T, C>);

        impl<T: serde::Serialize, C> serde::Serialize for Items<'_, T, C> {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: serde::Serializer,
            {
                serializer.collect_seq(self.0.iter())
            }
        }

        let mut state = serializer.serialize_struct("LlrbTree", 2)?;
        state.serialize_field("policy", &self.policy)?;
        state.serialize_field("items", &Items(self))?;
        state.end()
    }
}

#[cfg(feature = "serde")]
impl<'de, T, C> serde::Deserialize<'de> for LlrbTree<T, C>
where
    T: serde::Deserialize<'de>,
    C: Comparator<T> + Default,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(serde::Deserialize)]
        #[serde(rename = "LlrbTree")]
        struct Representation<T> {
            policy: DuplicatePolicy,
            items: Vec<T>,
        }

        let representation = Representation::<T>::deserialize(deserializer)?;
        let mut tree = Self::with_comparator(representation.policy, C::default());
        tree.extend(representation.items);
        Ok(tree)
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn scenario_tree() -> LlrbTree<i32> {
        let mut tree = LlrbTree::filtered();
        tree.extend([5, 3, 8, 1, 4, 7, 9]);
        tree
    }

    #[rstest]
    fn test_new_creates_empty_tree() {
        let tree: LlrbTree<i32> = LlrbTree::new(DuplicatePolicy::Filter);
        assert!(tree.is_empty());
        assert_eq!(tree.len(), 0);
        assert_eq!(tree.height(), 0);
        assert_eq!(tree.first(), None);
        assert_eq!(tree.check_invariants(), Ok(()));
    }

    #[rstest]
    fn test_insert_then_traverse_in_order() {
        let tree = scenario_tree();
        assert_eq!(tree.len(), 7);
        assert_eq!(tree.iter().copied().collect::<Vec<_>>(), vec![1, 3, 4, 5, 7, 8, 9]);
        assert_eq!(tree.check_invariants(), Ok(()));
    }

    #[rstest]
    fn test_delete_root_value() {
        let mut tree = scenario_tree();
        assert_eq!(tree.delete(&5), Some(5));
        assert_eq!(tree.find(&5), None);
        assert_eq!(tree.len(), 6);
        assert_eq!(tree.iter().copied().collect::<Vec<_>>(), vec![1, 3, 4, 7, 8, 9]);
        assert_eq!(tree.check_invariants(), Ok(()));
    }

    #[rstest]
    fn test_keep_duplicates_counts_every_insert() {
        let mut tree = LlrbTree::keeping_duplicates();
        for _ in 0..3 {
            assert_eq!(tree.insert(3), None);
        }
        assert_eq!(tree.len(), 3);
        assert!(tree.contains(&3));
        assert_eq!(tree.check_invariants(), Ok(()));
    }

    #[rstest]
    fn test_delete_from_empty_tree_is_noop() {
        let mut tree: LlrbTree<i32> = LlrbTree::filtered();
        assert_eq!(tree.delete(&1), None);
        assert!(tree.is_empty());
    }

    #[rstest]
    fn test_delete_last_item_empties_tree() {
        let mut tree = LlrbTree::filtered();
        tree.insert(1);
        assert_eq!(tree.delete(&1), Some(1));
        assert!(tree.is_empty());
        assert_eq!(tree.height(), 0);
        assert_eq!(tree.check_invariants(), Ok(()));
    }

    #[rstest]
    fn test_first_and_last() {
        let tree = scenario_tree();
        assert_eq!(tree.first(), Some(&1));
        assert_eq!(tree.last(), Some(&9));
    }

    #[rstest]
    fn test_search_on_empty_tree_makes_no_comparisons() {
        let tree: LlrbTree<i32> = LlrbTree::filtered();
        let search = tree.search(&1);
        assert_eq!(search.found, None);
        assert_eq!(search.comparisons, 0);
    }

    #[rstest]
    fn test_search_counts_comparisons_down_to_match() {
        let tree = scenario_tree();
        let root_search = tree.search(&tree.root.as_ref().unwrap().item);
        assert_eq!(root_search.comparisons, 1);

        let missing = tree.search(&6);
        assert_eq!(missing.found, None);
        assert!(missing.comparisons >= 1);
        assert!(missing.comparisons <= tree.height());
    }

    #[rstest]
    fn test_copy_is_independent() {
        let original = scenario_tree();
        let mut copy = original.copy();
        copy.delete(&1);
        copy.insert(100);

        assert_eq!(original.len(), 7);
        assert!(original.contains(&1));
        assert!(!original.contains(&100));
        assert_eq!(copy.len(), 7);
        assert_eq!(copy.check_invariants(), Ok(()));
    }

    #[rstest]
    fn test_clear_keeps_policy() {
        let mut tree = LlrbTree::keeping_duplicates();
        tree.extend([1, 1, 2]);
        tree.clear();
        assert!(tree.is_empty());
        assert_eq!(tree.policy(), DuplicatePolicy::Keep);
    }

    #[rstest]
    fn test_check_invariants_detects_red_root() {
        let mut tree = scenario_tree();
        if let Some(root) = tree.root.as_mut() {
            root.color = Color::Red;
        }
        assert_eq!(tree.check_invariants(), Err(InvariantViolation::RedRoot));
    }

    #[rstest]
    fn test_check_invariants_detects_count_mismatch() {
        let mut tree = scenario_tree();
        tree.count = 8;
        assert_eq!(
            tree.check_invariants(),
            Err(InvariantViolation::CountMismatch {
                recorded: 8,
                actual: 7
            })
        );
    }

    #[rstest]
    fn test_check_invariants_detects_out_of_order_items() {
        let mut tree = scenario_tree();
        if let Some(root) = tree.root.as_mut() {
            root.item = 100;
        }
        assert!(matches!(
            tree.check_invariants(),
            Err(InvariantViolation::OutOfOrder { .. })
        ));
    }

    #[rstest]
    fn test_debug_lists_items_in_order() {
        let tree = scenario_tree();
        assert_eq!(format!("{tree:?}"), "[1, 3, 4, 5, 7, 8, 9]");
    }

    #[rstest]
    fn test_equality_ignores_shape() {
        let ascending: LlrbTree<i32> = (0..50).collect();
        let descending: LlrbTree<i32> = (0..50).rev().collect();
        assert_eq!(ascending, descending);
    }

    #[rstest]
    #[case(1)]
    #[case(2)]
    #[case(5)]
    #[case(10)]
    #[case(14)]
    fn test_height_bound_for_sequential_inserts(#[case] exponent: u32) {
        let size = 1_usize << exponent;
        let tree: LlrbTree<usize> = (0..size).collect();
        assert!(tree.height() <= 2 * (exponent as usize + 1));
    }
}
