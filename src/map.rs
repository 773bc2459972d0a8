//! Ordered map type for document-level pairs.
//!
//! This module provides [`PairMap`], a wrapper around [`IndexMap`] that keeps
//! `#pair` keys in the order they first appeared.
//!
//! ## Ordering
//!
//! - **Iteration order**: keys come back in first-insertion order
//! - **Overwrites**: a later `#pair` with the same key replaces the value in
//!   place; the key keeps its original position
//!
//! ## Examples
//!
//! ```rust
//! use rdb_json::{PairMap, Scalar};
//!
//! let mut map = PairMap::new();
//! map.insert("seed".to_string(), Scalar::Integer(1));
//! map.insert("solver".to_string(), Scalar::from("astar"));
//! map.insert("seed".to_string(), Scalar::Integer(2));
//!
//! let keys: Vec<_> = map.keys().cloned().collect();
//! assert_eq!(keys, vec!["seed", "solver"]);
//! assert_eq!(map.get("seed"), Some(&Scalar::Integer(2)));
//! ```

use crate::Scalar;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// An insertion-ordered map of pair keys to scalar values.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PairMap(IndexMap<String, Scalar>);

impl PairMap {
    /// Creates an empty `PairMap`.
    #[must_use]
    pub fn new() -> Self {
        PairMap(IndexMap::new())
    }

    /// Inserts or overwrites a pair.
    ///
    /// If the map already contained this key, the value is replaced without
    /// moving the key and the old value is returned.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use rdb_json::{PairMap, Scalar};
    ///
    /// let mut map = PairMap::new();
    /// assert!(map.insert("key".to_string(), Scalar::Integer(42)).is_none());
    /// assert_eq!(
    ///     map.insert("key".to_string(), Scalar::Integer(43)),
    ///     Some(Scalar::Integer(42))
    /// );
    /// ```
    pub fn insert(&mut self, key: String, value: Scalar) -> Option<Scalar> {
        self.0.insert(key, value)
    }

    /// Returns a reference to the value corresponding to the key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Scalar> {
        self.0.get(key)
    }

    /// Returns `true` if the map holds a value for `key`.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Returns the number of pairs in the map.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the map contains no pairs.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns an iterator over the keys of the map, in insertion order.
    pub fn keys(&self) -> indexmap::map::Keys<'_, String, Scalar> {
        self.0.keys()
    }

    /// Returns an iterator over the values of the map, in insertion order.
    pub fn values(&self) -> indexmap::map::Values<'_, String, Scalar> {
        self.0.values()
    }

    /// Returns an iterator over the key-value pairs of the map, in insertion order.
    pub fn iter(&self) -> indexmap::map::Iter<'_, String, Scalar> {
        self.0.iter()
    }
}

impl IntoIterator for PairMap {
    type Item = (String, Scalar);
    type IntoIter = indexmap::map::IntoIter<String, Scalar>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a PairMap {
    type Item = (&'a String, &'a Scalar);
    type IntoIter = indexmap::map::Iter<'a, String, Scalar>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl FromIterator<(String, Scalar)> for PairMap {
    fn from_iter<T: IntoIterator<Item = (String, Scalar)>>(iter: T) -> Self {
        PairMap(IndexMap::from_iter(iter))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overwrite_keeps_position() {
        let mut map = PairMap::new();
        map.insert("a".to_string(), Scalar::Integer(1));
        map.insert("b".to_string(), Scalar::Integer(2));
        map.insert("a".to_string(), Scalar::from("later"));

        let entries: Vec<_> = map.iter().map(|(k, v)| (k.as_str(), v.clone())).collect();
        assert_eq!(
            entries,
            vec![("a", Scalar::from("later")), ("b", Scalar::Integer(2))]
        );
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn test_serializes_as_object_in_order() {
        let map: PairMap = vec![
            ("z".to_string(), Scalar::Integer(1)),
            ("a".to_string(), Scalar::Float(0.5)),
        ]
        .into_iter()
        .collect();

        assert_eq!(serde_json::to_string(&map).unwrap(), r#"{"z":1,"a":0.5}"#);
    }
}
