//! Path caches.
//!
//! A path cache stores the computed [`PathMap`] of a container under a
//! deterministic key so that a fresh index (another request, another
//! process) can skip the backend listing.
//!
//! ## Invariants
//!
//! - The cache is an optimization, never the source of truth
//! - Concurrent writers are last-writer-wins; recomputation is pure
//! - An unreachable cache behaves like an empty one for the index

mod file;
mod memory;

pub use file::FilePathCache;
pub use memory::MemoryPathCache;

use crate::error::CacheResult;
use crate::paths::PathMap;
use std::time::Duration;

/// A shared key-value store for path mappings.
pub trait PathCache: Send + Sync {
    /// Returns the mapping stored under `key`, or `None` on a miss or after
    /// the entry expired.
    ///
    /// # Errors
    ///
    /// Returns an error if the cache store cannot be read.
    fn get(&self, key: &str) -> CacheResult<Option<PathMap>>;

    /// Stores `paths` under `key`. `ttl` of `None` keeps the entry until it
    /// is forgotten.
    ///
    /// # Errors
    ///
    /// Returns an error if the entry cannot be written.
    fn put(&self, key: &str, paths: &PathMap, ttl: Option<Duration>) -> CacheResult<()>;

    /// Removes the entry under `key`. Returns true if one existed.
    ///
    /// # Errors
    ///
    /// Returns an error if the cache store cannot be modified.
    fn forget(&self, key: &str) -> CacheResult<bool>;
}
