//! Error types for Stache core.

use std::io;
use thiserror::Error;

/// Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Result type for path cache operations.
pub type CacheResult<T> = Result<T, CacheError>;

/// Errors that can occur in Stache core operations.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Storage backend error.
    #[error("storage error: {0}")]
    Storage(#[from] stache_storage::StorageError),

    /// Path cache error.
    #[error("cache error: {0}")]
    Cache(#[from] CacheError),

    /// The index is bound to a container handle that does not resolve.
    #[error("container not found: {handle}")]
    ContainerNotFound {
        /// The unresolved container handle.
        handle: String,
    },

    /// The requested item does not exist on the backend.
    #[error("item not found: {key}")]
    ItemNotFound {
        /// The logical key that was requested.
        key: String,
    },

    /// A logical key string could not be parsed.
    #[error("invalid key {key:?}: {message}")]
    InvalidKey {
        /// The rejected key.
        key: String,
        /// Why it was rejected.
        message: String,
    },

    /// A container handle is not usable as a key prefix.
    #[error("invalid container handle {handle:?}: {message}")]
    InvalidHandle {
        /// The rejected handle.
        handle: String,
        /// Why it was rejected.
        message: String,
    },

    /// A key or item belongs to a different container than the index.
    #[error("key {key} does not belong to container {expected}")]
    KeyContainerMismatch {
        /// The key that was passed in.
        key: String,
        /// The handle of the index's container.
        expected: String,
    },

    /// An item was handed to a writing persistence layer without contents.
    #[error("item {key} has no contents to write")]
    MissingContents {
        /// The item's logical key.
        key: String,
    },
}

impl CoreError {
    /// Creates an item not found error.
    pub fn item_not_found(key: impl Into<String>) -> Self {
        Self::ItemNotFound { key: key.into() }
    }

    /// Creates an invalid key error.
    pub fn invalid_key(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidKey {
            key: key.into(),
            message: message.into(),
        }
    }

    /// Creates an invalid handle error.
    pub fn invalid_handle(handle: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidHandle {
            handle: handle.into(),
            message: message.into(),
        }
    }

    /// Returns true for errors that mean "this item does not exist".
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::ItemNotFound { .. } => true,
            Self::Storage(err) => err.is_not_found(),
            _ => false,
        }
    }
}

/// Errors raised by a [`PathCache`](crate::cache::PathCache).
///
/// The index never fails a request because of these: reads degrade to a
/// cache miss and writes are logged and skipped.
#[derive(Debug, Error)]
pub enum CacheError {
    /// I/O error talking to the cache store.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// A mapping could not be encoded for storage.
    #[error("encode error: {0}")]
    Encode(String),

    /// A stored entry could not be decoded.
    #[error("decode error: {0}")]
    Decode(String),

    /// The cache store cannot be reached.
    #[error("cache unavailable: {0}")]
    Unavailable(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use stache_storage::StorageError;

    #[test]
    fn storage_not_found_is_not_found() {
        let err = CoreError::from(StorageError::not_found("assets", "a.jpg"));
        assert!(err.is_not_found());
    }

    #[test]
    fn item_not_found_message() {
        let err = CoreError::item_not_found("assets::a.jpg");
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "item not found: assets::a.jpg");
    }

    #[test]
    fn container_not_found_is_not_item_not_found() {
        let err = CoreError::ContainerNotFound {
            handle: "assets".into(),
        };
        assert!(!err.is_not_found());
    }

    #[test]
    fn cache_error_converts() {
        let err: CoreError = CacheError::Unavailable("down".into()).into();
        assert!(matches!(err, CoreError::Cache(CacheError::Unavailable(_))));
    }
}
