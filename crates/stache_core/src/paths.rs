//! The key → path mapping of one container.

use crate::key::LogicalKey;
use serde::{Deserialize, Serialize};
use std::collections::btree_map::{self, BTreeMap};

/// Ordered mapping from [`LogicalKey`] to relative path.
///
/// Entries are ordered by key, so two mappings built from the same listing
/// compare equal and iterate identically regardless of listing order.
/// Serializes as a map from the `handle::path` string to the path.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PathMap {
    entries: BTreeMap<LogicalKey, String>,
}

impl PathMap {
    /// Creates an empty mapping.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts an entry, returning the previous path for that key.
    pub fn insert(&mut self, key: LogicalKey, path: impl Into<String>) -> Option<String> {
        self.entries.insert(key, path.into())
    }

    /// Returns the path for a key.
    #[must_use]
    pub fn get(&self, key: &LogicalKey) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Returns true if the key is present.
    #[must_use]
    pub fn contains_key(&self, key: &LogicalKey) -> bool {
        self.entries.contains_key(key)
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if there are no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over the keys in order.
    pub fn keys(&self) -> impl Iterator<Item = &LogicalKey> {
        self.entries.keys()
    }

    /// Iterates over the paths in key order.
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.entries.values().map(String::as_str)
    }

    /// Iterates over `(key, path)` pairs in order.
    pub fn iter(&self) -> btree_map::Iter<'_, LogicalKey, String> {
        self.entries.iter()
    }

    /// Returns the mapping with keys rendered as `handle::path` strings.
    #[must_use]
    pub fn to_string_map(&self) -> BTreeMap<String, String> {
        self.entries
            .iter()
            .map(|(key, path)| (key.to_string(), path.clone()))
            .collect()
    }
}

impl FromIterator<(LogicalKey, String)> for PathMap {
    fn from_iter<T: IntoIterator<Item = (LogicalKey, String)>>(iter: T) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a PathMap {
    type Item = (&'a LogicalKey, &'a String);
    type IntoIter = btree_map::Iter<'a, LogicalKey, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
