//! Index configuration.

use crate::filter::ExclusionFilter;
use crate::persistence::PersistenceMode;
use std::time::Duration;

/// Default prefix of path cache keys.
pub const DEFAULT_CACHE_PREFIX: &str = "stache::indexes";

/// Configuration for a container index.
#[derive(Debug, Clone)]
pub struct IndexConfig {
    /// Whether to keep the materialized item list between calls.
    pub should_cache_file_items: bool,

    /// How long path cache entries live (`None` = until invalidated).
    pub paths_ttl: Option<Duration>,

    /// Prefix of path cache keys.
    pub cache_prefix: String,

    /// Which enumerated files become items.
    pub filter: ExclusionFilter,

    /// Whether writes and deletes reach the backend.
    pub persistence: PersistenceMode,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            should_cache_file_items: false,
            paths_ttl: None,
            cache_prefix: DEFAULT_CACHE_PREFIX.to_string(),
            filter: ExclusionFilter::default(),
            persistence: PersistenceMode::ReadOnly,
        }
    }
}

impl IndexConfig {
    /// Creates a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets whether the item list is reused between calls.
    #[must_use]
    pub const fn should_cache_file_items(mut self, value: bool) -> Self {
        self.should_cache_file_items = value;
        self
    }

    /// Sets the path cache TTL.
    #[must_use]
    pub const fn paths_ttl(mut self, ttl: Option<Duration>) -> Self {
        self.paths_ttl = ttl;
        self
    }

    /// Sets the cache key prefix.
    #[must_use]
    pub fn cache_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.cache_prefix = prefix.into();
        self
    }

    /// Sets the exclusion filter.
    #[must_use]
    pub fn filter(mut self, filter: ExclusionFilter) -> Self {
        self.filter = filter;
        self
    }

    /// Sets the persistence mode.
    #[must_use]
    pub const fn persistence(mut self, mode: PersistenceMode) -> Self {
        self.persistence = mode;
        self
    }

    /// Returns the path cache key of container `handle`.
    #[must_use]
    pub fn paths_cache_key(&self, handle: &str) -> String {
        format!("{}::assets::{handle}::_paths", self.cache_prefix)
    }
}
