//! Error types for storage operations.

use std::io;
use thiserror::Error;

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Errors that can occur during storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The requested file does not exist in the container.
    #[error("file not found: {path} in container {container}")]
    NotFound {
        /// The container that was searched.
        container: String,
        /// The relative path that was requested.
        path: String,
    },

    /// The container does not exist on this backend.
    #[error("container not found: {0}")]
    ContainerNotFound(String),

    /// The path is not a valid relative path inside a container.
    #[error("invalid path: {path}")]
    InvalidPath {
        /// The rejected path.
        path: String,
    },
}

impl StorageError {
    /// Creates a `NotFound` error.
    pub fn not_found(container: impl Into<String>, path: impl Into<String>) -> Self {
        Self::NotFound {
            container: container.into(),
            path: path.into(),
        }
    }

    /// Returns true if this error means the file does not exist.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::NotFound { .. } => true,
            Self::Io(err) => err.kind() == io::ErrorKind::NotFound,
            _ => false,
        }
    }
}
