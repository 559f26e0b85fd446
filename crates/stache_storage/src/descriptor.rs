//! File descriptors returned by container listings.

use crate::path::split_path;
use serde::{Deserialize, Serialize};

/// Kind of a listed entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    /// A regular file.
    File,
    /// A directory.
    Dir,
}

/// One entry of a container listing.
///
/// Descriptors are transient: they are produced by
/// [`ContainerBackend::list_contents`](crate::ContainerBackend::list_contents)
/// and consumed during discovery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileDescriptor {
    /// Whether this entry is a file or a directory.
    #[serde(rename = "type")]
    pub kind: EntryKind,
    /// Full path relative to the container root, `/`-separated.
    pub path: String,
    /// Containing directory, empty for top-level entries.
    pub dirname: String,
    /// Final path segment.
    pub basename: String,
    /// Size in bytes (files only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
    /// Last modification time in seconds since the Unix epoch.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<u64>,
}

impl FileDescriptor {
    /// Creates a file descriptor for a normalized relative path.
    pub fn file(path: impl Into<String>) -> Self {
        Self::new(EntryKind::File, path.into())
    }

    /// Creates a directory descriptor for a normalized relative path.
    pub fn dir(path: impl Into<String>) -> Self {
        Self::new(EntryKind::Dir, path.into())
    }

    fn new(kind: EntryKind, path: String) -> Self {
        let (dirname, basename) = split_path(&path);
        let (dirname, basename) = (dirname.to_string(), basename.to_string());
        Self {
            kind,
            path,
            dirname,
            basename,
            size: None,
            timestamp: None,
        }
    }

    /// Sets the size.
    #[must_use]
    pub fn with_size(mut self, size: u64) -> Self {
        self.size = Some(size);
        self
    }

    /// Sets the modification timestamp.
    #[must_use]
    pub fn with_timestamp(mut self, timestamp: u64) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    /// Returns true if this entry is a regular file.
    #[must_use]
    pub fn is_file(&self) -> bool {
        self.kind == EntryKind::File
    }

    /// Returns the extension of the basename, if any.
    #[must_use]
    pub fn extension(&self) -> Option<&str> {
        match self.basename.rfind('.') {
            Some(0) | None => None,
            Some(idx) => Some(&self.basename[idx + 1..]),
        }
    }
}

/// Metadata for a single stored file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FileMetadata {
    /// Size in bytes.
    pub size: u64,
    /// Last modification time in seconds since the Unix epoch.
    pub timestamp: Option<u64>,
}
