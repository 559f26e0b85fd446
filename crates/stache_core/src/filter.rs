//! Exclusion filter for container listings.
//!
//! Backends list everything, including directories and bookkeeping files.
//! The filter is the single gate deciding which entries become addressable
//! items.

use stache_storage::FileDescriptor;

/// Default name of the reserved metadata directory.
pub const META_DIR: &str = ".meta";

/// Default deny-list of filesystem bookkeeping files.
pub const IGNORED_BASENAMES: [&str; 3] = [".gitignore", ".gitkeep", ".DS_Store"];

/// Predicate removing non-addressable entries from a listing.
///
/// An entry is **excluded** if any of these holds:
/// - it is not a regular file
/// - its dirname is the metadata directory
/// - its path has the metadata directory as a directory component at any
///   depth (`/<meta_dir>/` anywhere, or a leading `<meta_dir>/`)
/// - its basename is on the deny-list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExclusionFilter {
    meta_dir: String,
    ignored_basenames: Vec<String>,
}

impl Default for ExclusionFilter {
    fn default() -> Self {
        Self {
            meta_dir: META_DIR.to_string(),
            ignored_basenames: IGNORED_BASENAMES.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl ExclusionFilter {
    /// Creates the default filter.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the metadata directory name.
    #[must_use]
    pub fn meta_dir(mut self, name: impl Into<String>) -> Self {
        self.meta_dir = name.into();
        self
    }

    /// Adds a basename to the deny-list.
    #[must_use]
    pub fn ignore_basename(mut self, name: impl Into<String>) -> Self {
        self.ignored_basenames.push(name.into());
        self
    }

    /// Returns the metadata directory name.
    #[must_use]
    pub fn meta_dir_name(&self) -> &str {
        &self.meta_dir
    }

    /// Returns true if the entry must not be indexed.
    #[must_use]
    pub fn excludes(&self, file: &FileDescriptor) -> bool {
        !file.is_file()
            || file.dirname == self.meta_dir
            || self.in_meta_dir(&file.path)
            || self.ignored_basenames.iter().any(|b| *b == file.basename)
    }

    fn in_meta_dir(&self, path: &str) -> bool {
        // every segment but the last is a directory
        path.split('/').rev().skip(1).any(|segment| segment == self.meta_dir)
    }

    /// Returns true if the entry is an addressable item.
    #[must_use]
    pub fn admits(&self, file: &FileDescriptor) -> bool {
        !self.excludes(file)
    }
}
