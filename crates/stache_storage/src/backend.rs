//! Container backend trait definition.

use crate::descriptor::{FileDescriptor, FileMetadata};
use crate::error::StorageResult;

/// A storage backend holding named containers of files.
///
/// Backends are **general-purpose file stores**. Listings contain every
/// entry, including directories and bookkeeping files; deciding what is
/// addressable is the index's job, not the backend's.
///
/// # Invariants
///
/// - `list_contents` returns a complete, recursive listing in one call
/// - Paths in descriptors are normalized, `/`-separated and relative to the
///   container root
/// - `read` returns exactly the bytes last passed to `write` for that path
/// - Backends must be `Send + Sync` so indexes can share them
///
/// # Implementors
///
/// - [`super::InMemoryBackend`] - For testing
/// - [`super::FileBackend`] - Containers as directories on disk
pub trait ContainerBackend: Send + Sync {
    /// Returns the handles of all containers known to this backend.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be enumerated.
    fn containers(&self) -> StorageResult<Vec<String>>;

    /// Lists every file and directory in `container`, recursively.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The container does not exist
    /// - An I/O error occurs while walking it
    fn list_contents(&self, container: &str) -> StorageResult<Vec<FileDescriptor>>;

    /// Returns true if a file exists at `path` in `container`.
    ///
    /// # Errors
    ///
    /// Returns an error if the path is invalid or an I/O error occurs.
    fn exists(&self, container: &str, path: &str) -> StorageResult<bool>;

    /// Returns size and modification time of a file.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::NotFound`](crate::StorageError::NotFound) if
    /// the file does not exist.
    fn metadata(&self, container: &str, path: &str) -> StorageResult<FileMetadata>;

    /// Reads the full contents of a file.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::NotFound`](crate::StorageError::NotFound) if
    /// the file does not exist.
    fn read(&self, container: &str, path: &str) -> StorageResult<Vec<u8>>;

    /// Writes `data` to a file, creating parent directories and the
    /// container as needed. Existing contents are replaced.
    ///
    /// # Errors
    ///
    /// Returns an error if the path is invalid or the write fails.
    fn write(&self, container: &str, path: &str, data: &[u8]) -> StorageResult<()>;

    /// Deletes a file.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::NotFound`](crate::StorageError::NotFound) if
    /// the file does not exist.
    fn delete(&self, container: &str, path: &str) -> StorageResult<()>;
}
