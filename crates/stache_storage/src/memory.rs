//! In-memory container backend for testing.

use crate::backend::ContainerBackend;
use crate::descriptor::{FileDescriptor, FileMetadata};
use crate::error::{StorageError, StorageResult};
use crate::path::normalize_relative;
use parking_lot::RwLock;
use std::collections::{BTreeMap, BTreeSet};
use std::time::{SystemTime, UNIX_EPOCH};

#[derive(Debug, Clone)]
struct StoredFile {
    data: Vec<u8>,
    timestamp: u64,
}

type Container = BTreeMap<String, StoredFile>;

/// An in-memory container backend.
///
/// This backend stores all files in memory and is suitable for:
/// - Unit tests
/// - Integration tests
/// - Ephemeral stores that don't need persistence
///
/// Directories are implicit: a directory entry is listed for every
/// ancestor of a stored file.
///
/// # Thread Safety
///
/// This backend is thread-safe and can be shared across threads.
///
/// # Example
///
/// ```rust
/// use stache_storage::{ContainerBackend, InMemoryBackend};
///
/// let backend = InMemoryBackend::new();
/// backend.write("assets", "a.jpg", b"data").unwrap();
/// assert!(backend.exists("assets", "a.jpg").unwrap());
/// assert_eq!(backend.containers().unwrap(), vec!["assets".to_string()]);
/// ```
#[derive(Debug, Default)]
pub struct InMemoryBackend {
    containers: RwLock<BTreeMap<String, Container>>,
}

impl InMemoryBackend {
    /// Creates a new empty in-memory backend.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty container. Does nothing if it already exists.
    pub fn create_container(&self, container: &str) {
        self.containers
            .write()
            .entry(container.to_string())
            .or_default();
    }

    /// Returns the number of files stored in `container`.
    #[must_use]
    pub fn file_count(&self, container: &str) -> usize {
        self.containers
            .read()
            .get(container)
            .map_or(0, BTreeMap::len)
    }

    /// Removes every container and file.
    pub fn clear(&self) {
        self.containers.write().clear();
    }
}

fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}

impl ContainerBackend for InMemoryBackend {
    fn containers(&self) -> StorageResult<Vec<String>> {
        Ok(self.containers.read().keys().cloned().collect())
    }

    fn list_contents(&self, container: &str) -> StorageResult<Vec<FileDescriptor>> {
        let containers = self.containers.read();
        let files = containers
            .get(container)
            .ok_or_else(|| StorageError::ContainerNotFound(container.to_string()))?;

        let mut dirs = BTreeSet::new();
        for path in files.keys() {
            let mut end = 0;
            while let Some(idx) = path[end..].find('/') {
                end += idx;
                dirs.insert(path[..end].to_string());
                end += 1;
            }
        }

        let mut listing: Vec<FileDescriptor> = dirs.into_iter().map(FileDescriptor::dir).collect();
        listing.extend(files.iter().map(|(path, file)| {
            FileDescriptor::file(path.clone())
                .with_size(file.data.len() as u64)
                .with_timestamp(file.timestamp)
        }));
        listing.sort_by(|a, b| a.path.cmp(&b.path));

        Ok(listing)
    }

    fn exists(&self, container: &str, path: &str) -> StorageResult<bool> {
        let path = normalize_relative(path)?;
        Ok(self
            .containers
            .read()
            .get(container)
            .is_some_and(|files| files.contains_key(&path)))
    }

    fn metadata(&self, container: &str, path: &str) -> StorageResult<FileMetadata> {
        let path = normalize_relative(path)?;
        let containers = self.containers.read();
        let file = containers
            .get(container)
            .and_then(|files| files.get(&path))
            .ok_or_else(|| StorageError::not_found(container, &path))?;

        Ok(FileMetadata {
            size: file.data.len() as u64,
            timestamp: Some(file.timestamp),
        })
    }

    fn read(&self, container: &str, path: &str) -> StorageResult<Vec<u8>> {
        let path = normalize_relative(path)?;
        let containers = self.containers.read();
        containers
            .get(container)
            .and_then(|files| files.get(&path))
            .map(|file| file.data.clone())
            .ok_or_else(|| StorageError::not_found(container, &path))
    }

    fn write(&self, container: &str, path: &str, data: &[u8]) -> StorageResult<()> {
        let path = normalize_relative(path)?;
        self.containers
            .write()
            .entry(container.to_string())
            .or_default()
            .insert(
                path,
                StoredFile {
                    data: data.to_vec(),
                    timestamp: now_secs(),
                },
            );
        Ok(())
    }

    fn delete(&self, container: &str, path: &str) -> StorageResult<()> {
        let path = normalize_relative(path)?;
        let mut containers = self.containers.write();
        containers
            .get_mut(container)
            .and_then(|files| files.remove(&path))
            .map(|_| ())
            .ok_or_else(|| StorageError::not_found(container, &path))
    }
}
