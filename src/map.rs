//! An ordered map backed by a left-leaning red-black tree.
//!
//! [`OrderedMap`] stores key/value entries in an [`LlrbTree`] under the
//! filtering policy, ordered by key only. Inserting an existing key replaces
//! the stored entry, which is exactly the last-write-wins behavior of the
//! tree.
//!
//! # Examples
//!
//! ```rust
//! use llrb_collections::map::OrderedMap;
//!
//! let mut scores = OrderedMap::new();
//! scores.insert("carol", 71);
//! scores.insert("alice", 93);
//! scores.insert("bob", 85);
//!
//! assert_eq!(scores.get("bob"), Some(&85));
//! assert_eq!(scores.insert("bob", 88), Some(85));
//! assert_eq!(scores.keys().copied().collect::<Vec<_>>(), vec!["alice", "bob", "carol"]);
//! ```

use std::borrow::Borrow;
use std::cmp::Ordering;
use std::fmt;
use std::iter::FusedIterator;

use crate::ordering::Comparator;
use crate::tree::{DuplicatePolicy, IntoTraversal, LlrbTree, Traversal, TraversalOrder};

/// Orders entries by key, ignoring the value.
#[derive(Clone, Copy, Debug, Default)]
struct KeyOrder;

impl<K: Ord, V> Comparator<(K, V)> for KeyOrder {
    #[inline]
    fn compare(&self, left: &(K, V), right: &(K, V)) -> Ordering {
        left.0.cmp(&right.0)
    }
}

// =============================================================================
// OrderedMap Definition
// =============================================================================

/// A map with keys kept in ascending [`Ord`] order.
///
/// # Time Complexity
///
/// | Operation      | Complexity |
/// |----------------|------------|
/// | `get`          | O(log N)   |
/// | `insert`       | O(log N)   |
/// | `remove`       | O(log N)   |
/// | `first`/`last` | O(log N)   |
/// | `len`          | O(1)       |
/// | `iter`         | O(N)       |
///
/// # Examples
///
/// ```rust
/// use llrb_collections::map::OrderedMap;
///
/// let map: OrderedMap<i32, &str> = [(3, "three"), (1, "one"), (2, "two")]
///     .into_iter()
///     .collect();
///
/// assert_eq!(map.first(), Some((&1, &"one")));
/// assert_eq!(map.to_string(), "{1: one, 2: two, 3: three}");
/// ```
#[derive(Clone)]
pub struct OrderedMap<K, V> {
    tree: LlrbTree<(K, V), KeyOrder>,
}

impl<K, V> OrderedMap<K, V> {
    /// Creates an empty map.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            tree: LlrbTree::with_comparator(DuplicatePolicy::Filter, KeyOrder),
        }
    }

    /// Returns the number of entries.
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.tree.len()
    }

    /// Returns `true` if the map contains no entries.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// Removes every entry.
    pub fn clear(&mut self) {
        self.tree.clear();
    }

    /// Returns the entry with the smallest key.
    #[must_use]
    pub fn first(&self) -> Option<(&K, &V)> {
        self.tree.first().map(|(key, value)| (key, value))
    }

    /// Returns the entry with the largest key.
    #[must_use]
    pub fn last(&self) -> Option<(&K, &V)> {
        self.tree.last().map(|(key, value)| (key, value))
    }

    /// Returns an iterator over the entries in ascending key order.
    #[must_use]
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            inner: self.tree.iter(),
        }
    }

    /// Returns an iterator over the entries in descending key order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use llrb_collections::map::OrderedMap;
    ///
    /// let map: OrderedMap<i32, char> = [(1, 'a'), (2, 'b'), (3, 'c')].into_iter().collect();
    /// let keys: Vec<i32> = map.iter_rev().map(|(key, _)| *key).collect();
    /// assert_eq!(keys, vec![3, 2, 1]);
    /// ```
    #[must_use]
    pub fn iter_rev(&self) -> Iter<'_, K, V> {
        Iter {
            inner: self.tree.traverse(TraversalOrder::ReverseOrder),
        }
    }

    /// Returns an iterator over the keys in ascending order.
    #[must_use]
    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys { inner: self.iter() }
    }

    /// Returns an iterator over the values in ascending key order.
    #[must_use]
    pub fn values(&self) -> Values<'_, K, V> {
        Values { inner: self.iter() }
    }
}

impl<K: Ord, V> OrderedMap<K, V> {
    /// Inserts a key/value pair.
    ///
    /// If the key was already present, the stored entry is replaced and the
    /// previous value is returned.
    ///
    /// # Complexity
    ///
    /// O(log N)
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        self.tree.insert((key, value)).map(|(_, previous)| previous)
    }

    /// Returns a reference to the value for `key`.
    ///
    /// The key may be any borrowed form of the map's key type, with the same
    /// ordering.
    ///
    /// # Complexity
    ///
    /// O(log N)
    #[must_use]
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.get_key_value(key).map(|(_, value)| value)
    }

    /// Returns the stored key and the value for `key`.
    #[must_use]
    pub fn get_key_value<Q>(&self, key: &Q) -> Option<(&K, &V)>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.tree
            .find_by(|(stored, _)| key.cmp(stored.borrow()))
            .map(|(key, value)| (key, value))
    }

    /// Returns `true` if the map contains `key`.
    #[must_use]
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.get_key_value(key).is_some()
    }

    /// Removes `key` and returns its value.
    ///
    /// # Complexity
    ///
    /// O(log N)
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.tree
            .delete_by(|(stored, _)| key.cmp(stored.borrow()))
            .map(|(_, value)| value)
    }
}

// =============================================================================
// Iterators
// =============================================================================

/// An iterator over the entries of an [`OrderedMap`].
pub struct Iter<'a, K, V> {
    inner: Traversal<'a, (K, V)>,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(key, value)| (key, value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

impl<K, V> FusedIterator for Iter<'_, K, V> {}

/// An iterator over the keys of an [`OrderedMap`].
pub struct Keys<'a, K, V> {
    inner: Iter<'a, K, V>,
}

impl<'a, K, V> Iterator for Keys<'a, K, V> {
    type Item = &'a K;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(key, _)| key)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Keys<'_, K, V> {}

/// An iterator over the values of an [`OrderedMap`].
pub struct Values<'a, K, V> {
    inner: Iter<'a, K, V>,
}

impl<'a, K, V> Iterator for Values<'a, K, V> {
    type Item = &'a V;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, value)| value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Values<'_, K, V> {}

/// An owning iterator over the entries of an [`OrderedMap`].
pub struct IntoIter<K, V> {
    inner: IntoTraversal<(K, V)>,
}

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = (K, V);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for IntoIter<K, V> {}

impl<K, V> IntoIterator for OrderedMap<K, V> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter {
            inner: self.tree.into_iter(),
        }
    }
}

impl<'a, K, V> IntoIterator for &'a OrderedMap<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K: Ord, V> FromIterator<(K, V)> for OrderedMap<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        map.extend(iter);
        map
    }
}

impl<K: Ord, V> Extend<(K, V)> for OrderedMap<K, V> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

// =============================================================================
// Standard Trait Implementations
// =============================================================================

impl<K, V> Default for OrderedMap<K, V> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<K: PartialEq, V: PartialEq> PartialEq for OrderedMap<K, V> {
    fn eq(&self, other: &Self) -> bool {
        self.tree == other.tree
    }
}

impl<K: Eq, V: Eq> Eq for OrderedMap<K, V> {}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for OrderedMap<K, V> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_map().entries(self.iter()).finish()
    }
}

impl<K: fmt::Display, V: fmt::Display> fmt::Display for OrderedMap<K, V> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{{")?;
        let mut first = true;
        for (key, value) in self {
            if first {
                first = false;
            } else {
                write!(formatter, ", ")?;
            }
            write!(formatter, "{key}: {value}")?;
        }
        write!(formatter, "}}")
    }
}

// =============================================================================
// Serde Support
// =============================================================================

#[cfg(feature = "serde")]
impl<K: serde::Serialize, V: serde::Serialize> serde::Serialize for OrderedMap<K, V> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeMap;
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (key, value) in self {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

#[cfg(feature = "serde")]
struct OrderedMapVisitor<K, V> {
    key_marker: std::marker::PhantomData<K>,
    value_marker: std::marker::PhantomData<V>,
}

#[cfg(feature = "serde")]
impl<'de, K, V> serde::de::Visitor<'de> for OrderedMapVisitor<K, V>
where
    K: serde::Deserialize<'de> + Ord,
    V: serde::Deserialize<'de>,
{
    type Value = OrderedMap<K, V>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a map")
    }

    fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
    where
        A: serde::de::MapAccess<'de>,
    {
        let mut map = OrderedMap::new();
        while let Some((key, value)) = access.next_entry()? {
            map.insert(key, value);
        }
        Ok(map)
    }
}

#[cfg(feature = "serde")]
impl<'de, K, V> serde::Deserialize<'de> for OrderedMap<K, V>
where
    K: serde::Deserialize<'de> + Ord,
    V: serde::Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        deserializer.deserialize_map(OrderedMapVisitor {
            key_marker: std::marker::PhantomData,
            value_marker: std::marker::PhantomData,
        })
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn sample() -> OrderedMap<i32, String> {
        [(2, "two"), (1, "one"), (3, "three")]
            .into_iter()
            .map(|(key, value)| (key, value.to_string()))
            .collect()
    }

    #[rstest]
    fn test_new_is_empty() {
        let map: OrderedMap<i32, i32> = OrderedMap::new();
        assert!(map.is_empty());
        assert_eq!(map.first(), None);
    }

    #[rstest]
    fn test_insert_returns_previous_value() {
        let mut map = OrderedMap::new();
        assert_eq!(map.insert("key", 1), None);
        assert_eq!(map.insert("key", 2), Some(1));
        assert_eq!(map.len(), 1);
        assert_eq!(map.get("key"), Some(&2));
    }

    #[rstest]
    fn test_get_by_borrowed_key() {
        let mut map = OrderedMap::new();
        map.insert("alpha".to_string(), 1);
        assert_eq!(map.get("alpha"), Some(&1));
        assert!(map.contains_key("alpha"));
        assert!(!map.contains_key("beta"));
    }

    #[rstest]
    #[case(1, Some("one"))]
    #[case(3, Some("three"))]
    #[case(4, None)]
    fn test_remove(#[case] key: i32, #[case] expected: Option<&str>) {
        let mut map = sample();
        let removed = map.remove(&key);
        assert_eq!(removed.as_deref(), expected);
        assert!(!map.contains_key(&key));
        assert_eq!(map.len(), if expected.is_some() { 2 } else { 3 });
    }

    #[rstest]
    fn test_iteration_orders() {
        let map = sample();
        assert_eq!(map.keys().copied().collect::<Vec<_>>(), vec![1, 2, 3]);
        assert_eq!(
            map.iter_rev().map(|(key, _)| *key).collect::<Vec<_>>(),
            vec![3, 2, 1]
        );
        assert_eq!(map.values().len(), 3);
    }

    #[rstest]
    fn test_first_and_last() {
        let map = sample();
        assert_eq!(map.first().map(|(key, _)| *key), Some(1));
        assert_eq!(map.last().map(|(key, _)| *key), Some(3));
    }

    #[rstest]
    fn test_display_and_debug() {
        let map = sample();
        assert_eq!(map.to_string(), "{1: one, 2: two, 3: three}");
        assert_eq!(format!("{map:?}"), r#"{1: "one", 2: "two", 3: "three"}"#);
        assert_eq!(OrderedMap::<i32, i32>::new().to_string(), "{}");
    }

    #[rstest]
    fn test_into_iter_yields_owned_entries() {
        let entries: Vec<(i32, String)> = sample().into_iter().collect();
        assert_eq!(entries[0], (1, "one".to_string()));
        assert_eq!(entries.len(), 3);
    }
}

#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn test_serialize_as_json_object() {
        let map: OrderedMap<String, i32> = [("b".to_string(), 2), ("a".to_string(), 1)]
            .into_iter()
            .collect();
        let json = serde_json::to_string(&map).unwrap();
        assert_eq!(json, r#"{"a":1,"b":2}"#);
    }

    #[rstest]
    fn test_deserialize_from_json_object() {
        let map: OrderedMap<String, i32> = serde_json::from_str(r#"{"z":26,"a":1}"#).unwrap();
        assert_eq!(map.keys().cloned().collect::<Vec<_>>(), vec!["a", "z"]);
    }
}
