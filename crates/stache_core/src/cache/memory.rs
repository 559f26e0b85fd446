//! In-process path cache.

use super::PathCache;
use crate::error::CacheResult;
use crate::paths::PathMap;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
struct Entry {
    paths: PathMap,
    expires_at: Option<Instant>,
}

impl Entry {
    fn is_expired(&self, now: Instant) -> bool {
        self.expires_at.is_some_and(|at| now >= at)
    }
}

/// A path cache held in memory and shared through an `Arc`.
///
/// Expired entries are dropped lazily on the next `get`.
///
/// # Example
///
/// ```rust
/// use stache_core::cache::{MemoryPathCache, PathCache};
/// use stache_core::PathMap;
///
/// let cache = MemoryPathCache::new();
/// cache.put("k", &PathMap::new(), None).unwrap();
/// assert!(cache.get("k").unwrap().is_some());
/// ```
#[derive(Debug, Default)]
pub struct MemoryPathCache {
    entries: RwLock<HashMap<String, Entry>>,
}

impl MemoryPathCache {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored entries, expired ones included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Returns true if nothing is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Removes every entry.
    pub fn clear(&self) {
        self.entries.write().clear();
    }
}

impl PathCache for MemoryPathCache {
    fn get(&self, key: &str) -> CacheResult<Option<PathMap>> {
        let now = Instant::now();
        {
            let entries = self.entries.read();
            match entries.get(key) {
                None => return Ok(None),
                Some(entry) if !entry.is_expired(now) => return Ok(Some(entry.paths.clone())),
                Some(_) => {}
            }
        }

        let mut entries = self.entries.write();
        if entries.get(key).is_some_and(|entry| entry.is_expired(now)) {
            entries.remove(key);
        }
        Ok(None)
    }

    fn put(&self, key: &str, paths: &PathMap, ttl: Option<Duration>) -> CacheResult<()> {
        let entry = Entry {
            paths: paths.clone(),
            // A TTL past the clock's range never expires.
            expires_at: ttl.and_then(|ttl| Instant::now().checked_add(ttl)),
        };
        self.entries.write().insert(key.to_string(), entry);
        Ok(())
    }

    fn forget(&self, key: &str) -> CacheResult<bool> {
        Ok(self.entries.write().remove(key).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::key::LogicalKey;

    fn sample() -> PathMap {
        let mut map = PathMap::new();
        map.insert(LogicalKey::new("assets", "a.jpg").unwrap(), "a.jpg");
        map
    }

    #[test]
    fn miss_on_empty_cache() {
        let cache = MemoryPathCache::new();
        assert!(cache.get("missing").unwrap().is_none());
        assert!(cache.is_empty());
    }

    #[test]
    fn put_then_get() {
        let cache = MemoryPathCache::new();
        cache.put("k", &sample(), None).unwrap();
        assert_eq!(cache.get("k").unwrap(), Some(sample()));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn put_overwrites() {
        let cache = MemoryPathCache::new();
        cache.put("k", &sample(), None).unwrap();
        cache.put("k", &PathMap::new(), None).unwrap();
        assert_eq!(cache.get("k").unwrap(), Some(PathMap::new()));
    }

    #[test]
    fn expired_entry_is_a_miss() {
        let cache = MemoryPathCache::new();
        cache.put("k", &sample(), Some(Duration::ZERO)).unwrap();
        assert!(cache.get("k").unwrap().is_none());
        assert!(cache.is_empty());
    }

    #[test]
    fn long_ttl_is_a_hit() {
        let cache = MemoryPathCache::new();
        cache
            .put("k", &sample(), Some(Duration::from_secs(3600)))
            .unwrap();
        assert!(cache.get("k").unwrap().is_some());
    }

    #[test]
    fn unbounded_ttl_never_expires() {
        let cache = MemoryPathCache::new();
        cache.put("k", &sample(), Some(Duration::MAX)).unwrap();
        assert_eq!(cache.get("k").unwrap(), Some(sample()));
    }

    #[test]
    fn forget_removes_entry() {
        let cache = MemoryPathCache::new();
        cache.put("k", &sample(), None).unwrap();
        assert!(cache.forget("k").unwrap());
        assert!(!cache.forget("k").unwrap());
        assert!(cache.get("k").unwrap().is_none());
    }

    #[test]
    fn clear_removes_everything() {
        let cache = MemoryPathCache::new();
        cache.put("a", &sample(), None).unwrap();
        cache.put("b", &sample(), None).unwrap();
        cache.clear();
        assert!(cache.is_empty());
    }
}
