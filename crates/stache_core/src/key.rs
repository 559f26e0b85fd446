//! Logical keys.
//!
//! A logical key names one item: the container handle and the item's
//! relative path. Inside the crate it is a structured pair; the
//! `handle::path` string form only exists at the boundary (display,
//! parsing, serialization).

use crate::error::{CoreError, CoreResult};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Separator between the container handle and the relative path.
pub const KEY_DELIMITER: &str = "::";

/// Checks that a container handle can be used as a key prefix.
///
/// # Errors
///
/// Returns [`CoreError::InvalidHandle`] if the handle is empty or contains
/// the key delimiter.
pub fn validate_handle(handle: &str) -> CoreResult<()> {
    if handle.is_empty() {
        return Err(CoreError::invalid_handle(handle, "handle is empty"));
    }
    if handle.contains(KEY_DELIMITER) {
        return Err(CoreError::invalid_handle(
            handle,
            format!("handle contains {KEY_DELIMITER:?}"),
        ));
    }
    Ok(())
}

/// Identifier of one item: container handle plus relative path.
///
/// Keys order by handle, then path.
///
/// # Example
///
/// ```rust
/// use stache_core::LogicalKey;
///
/// let key: LogicalKey = "assets::img/hero.jpg".parse().unwrap();
/// assert_eq!(key.handle(), "assets");
/// assert_eq!(key.path(), "img/hero.jpg");
/// assert_eq!(key.to_string(), "assets::img/hero.jpg");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LogicalKey {
    handle: String,
    path: String,
}

impl LogicalKey {
    /// Creates a key from a handle and a relative path.
    ///
    /// # Errors
    ///
    /// Returns an error if the handle is invalid or the path is empty.
    pub fn new(handle: impl Into<String>, path: impl Into<String>) -> CoreResult<Self> {
        let handle = handle.into();
        let path = path.into();
        validate_handle(&handle)?;
        if path.is_empty() {
            return Err(CoreError::invalid_key(
                format!("{handle}{KEY_DELIMITER}"),
                "path is empty",
            ));
        }
        Ok(Self { handle, path })
    }

    /// Parses `handle::path`, splitting at the first delimiter.
    ///
    /// Everything after the first `::` is the path, even if it contains
    /// further delimiters.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidKey`] if there is no delimiter or either
    /// side is empty.
    pub fn parse(key: &str) -> CoreResult<Self> {
        let (handle, path) = key
            .split_once(KEY_DELIMITER)
            .ok_or_else(|| CoreError::invalid_key(key, "missing \"::\" delimiter"))?;

        if handle.is_empty() {
            return Err(CoreError::invalid_key(key, "handle is empty"));
        }
        if path.is_empty() {
            return Err(CoreError::invalid_key(key, "path is empty"));
        }

        Ok(Self {
            handle: handle.to_string(),
            path: path.to_string(),
        })
    }

    /// Returns the container handle.
    #[must_use]
    pub fn handle(&self) -> &str {
        &self.handle
    }

    /// Returns the relative path.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Returns true if this key belongs to the container `handle`.
    #[must_use]
    pub fn belongs_to(&self, handle: &str) -> bool {
        self.handle == handle
    }
}

impl fmt::Display for LogicalKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.handle, KEY_DELIMITER, self.path)
    }
}

impl FromStr for LogicalKey {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for LogicalKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for LogicalKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn parse_simple_key() {
        let key = LogicalKey::parse("assets::a.jpg").unwrap();
        assert_eq!(key.handle(), "assets");
        assert_eq!(key.path(), "a.jpg");
    }

    #[test]
    fn parse_splits_at_first_delimiter() {
        let key = LogicalKey::parse("assets::odd::name.jpg").unwrap();
        assert_eq!(key.handle(), "assets");
        assert_eq!(key.path(), "odd::name.jpg");
    }

    #[test]
    fn parse_without_delimiter_fails() {
        assert!(matches!(
            LogicalKey::parse("a.jpg"),
            Err(CoreError::InvalidKey { .. })
        ));
    }

    #[test]
    fn parse_empty_sides_fail() {
        assert!(LogicalKey::parse("::a.jpg").is_err());
        assert!(LogicalKey::parse("assets::").is_err());
    }

    #[test]
    fn new_rejects_delimiter_in_handle() {
        assert!(matches!(
            LogicalKey::new("as::sets", "a.jpg"),
            Err(CoreError::InvalidHandle { .. })
        ));
    }

    #[test]
    fn display_joins_with_delimiter() {
        let key = LogicalKey::new("assets", "sub/a.jpg").unwrap();
        assert_eq!(key.to_string(), "assets::sub/a.jpg");
        assert!(key.belongs_to("assets"));
        assert!(!key.belongs_to("other"));
    }

    #[test]
    fn serde_uses_string_form() {
        let key = LogicalKey::new("assets", "a.jpg").unwrap();
        let json = serde_json::to_string(&key).unwrap();
        assert_eq!(json, "\"assets::a.jpg\"");

        let back: LogicalKey = serde_json::from_str(&json).unwrap();
        assert_eq!(back, key);
    }

    #[test]
    fn deserialize_rejects_bad_key() {
        let result: Result<LogicalKey, _> = serde_json::from_str("\"nodelimiter\"");
        assert!(result.is_err());
    }

    proptest! {
        #[test]
        fn split_recovers_path(
            handle in "[a-z][a-z0-9_-]{0,15}",
            path in "[a-zA-Z0-9_./ -]{1,40}",
        ) {
            let key = LogicalKey::new(handle.clone(), path.clone()).unwrap();
            let parsed = LogicalKey::parse(&key.to_string()).unwrap();
            prop_assert_eq!(parsed.handle(), handle.as_str());
            prop_assert_eq!(parsed.path(), path.as_str());
        }
    }
}
