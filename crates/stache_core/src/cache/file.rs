//! Directory-backed path cache shared between processes.
//!
//! ## Layout
//!
//! ```text
//! <cache_dir>/
//! ├─ LOCK                 # Advisory lock serializing writers
//! └─ <sha256(key)>.cache  # One CBOR entry per cache key
//! ```
//!
//! ## Format
//!
//! Each entry is CBOR:
//! ```text
//! CacheEntry {
//!     version: u8
//!     key: String            // full cache key, guards against collisions
//!     expires_at_ms: u64?    // Unix millis, absent = forever
//!     paths: { "handle::path": "path", ... }
//! }
//! ```
//!
//! Entries are written to a temp file and renamed into place, so readers
//! never see a partial entry and need no lock.

use super::PathCache;
use crate::error::{CacheError, CacheResult};
use crate::paths::PathMap;
use fs2::FileExt;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use tracing::debug;

const LOCK_FILE: &str = "LOCK";
const ENTRY_EXTENSION: &str = "cache";
const ENTRY_VERSION: u8 = 1;

#[derive(Debug, Serialize, Deserialize)]
struct CacheEntry {
    version: u8,
    key: String,
    expires_at_ms: Option<u64>,
    paths: PathMap,
}

fn millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

fn now_ms() -> u64 {
    millis(SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default())
}

fn is_expired(entry: &CacheEntry) -> bool {
    entry.expires_at_ms.is_some_and(|at| now_ms() >= at)
}

/// A path cache persisted as one file per key in a directory.
///
/// Survives process restarts and can be shared by several processes on the
/// same machine.
///
/// # Example
///
/// ```no_run
/// use stache_core::cache::{FilePathCache, PathCache};
/// use std::path::Path;
///
/// let cache = FilePathCache::open(Path::new("storage/stache")).unwrap();
/// let hit = cache.get("stache::indexes::assets::main::_paths").unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct FilePathCache {
    dir: PathBuf,
}

impl FilePathCache {
    /// Opens a cache directory, creating it if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    pub fn open(dir: &Path) -> CacheResult<Self> {
        fs::create_dir_all(dir)?;
        Ok(Self {
            dir: dir.to_path_buf(),
        })
    }

    /// Returns the cache directory.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Returns the file that stores `key`.
    #[must_use]
    pub fn entry_path(&self, key: &str) -> PathBuf {
        let digest = Sha256::digest(key.as_bytes());
        let name: String = digest.iter().map(|b| format!("{b:02x}")).collect();
        self.dir.join(format!("{name}.{ENTRY_EXTENSION}"))
    }

    /// Removes every cached entry.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be read or an entry cannot
    /// be removed.
    pub fn clear(&self) -> CacheResult<usize> {
        let _lock = self.lock()?;
        let mut removed = 0;
        for entry in fs::read_dir(&self.dir)? {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) == Some(ENTRY_EXTENSION) {
                fs::remove_file(&path)?;
                removed += 1;
            }
        }
        Ok(removed)
    }

    fn lock(&self) -> CacheResult<File> {
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(self.dir.join(LOCK_FILE))?;
        file.lock_exclusive()?;
        Ok(file)
    }

    fn read_entry(&self, path: &Path) -> CacheResult<Option<CacheEntry>> {
        let data = match fs::read(path) {
            Ok(data) => data,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };

        let entry: CacheEntry = ciborium::from_reader(data.as_slice())
            .map_err(|e| CacheError::Decode(e.to_string()))?;
        if entry.version != ENTRY_VERSION {
            return Err(CacheError::Decode(format!(
                "unsupported entry version {}",
                entry.version
            )));
        }
        Ok(Some(entry))
    }

    /// Removes the entry at `path` only if it is still expired once the
    /// lock is held, so an entry rewritten by another writer survives.
    fn forget_expired(&self, key: &str, path: &Path) -> CacheResult<()> {
        let _lock = self.lock()?;
        let still_expired = match self.read_entry(path) {
            Ok(Some(entry)) => entry.key == key && is_expired(&entry),
            Ok(None) => false,
            Err(err) => {
                debug!("Cache entry for {} unreadable after expiry: {}", key, err);
                false
            }
        };
        if still_expired {
            match fs::remove_file(path) {
                Ok(()) => {}
                Err(err) if err.kind() == io::ErrorKind::NotFound => {}
                Err(err) => return Err(err.into()),
            }
        }
        Ok(())
    }
}

impl PathCache for FilePathCache {
    fn get(&self, key: &str) -> CacheResult<Option<PathMap>> {
        let path = self.entry_path(key);
        let Some(entry) = self.read_entry(&path)? else {
            return Ok(None);
        };

        if entry.key != key {
            debug!("Cache entry {:?} holds a different key, ignoring", path);
            return Ok(None);
        }

        if is_expired(&entry) {
            debug!("Cache entry for {} expired", key);
            self.forget_expired(key, &path)?;
            return Ok(None);
        }

        Ok(Some(entry.paths))
    }

    fn put(&self, key: &str, paths: &PathMap, ttl: Option<Duration>) -> CacheResult<()> {
        let entry = CacheEntry {
            version: ENTRY_VERSION,
            key: key.to_string(),
            expires_at_ms: ttl.map(|ttl| now_ms().saturating_add(millis(ttl))),
            paths: paths.clone(),
        };

        let mut data = Vec::new();
        ciborium::into_writer(&entry, &mut data).map_err(|e| CacheError::Encode(e.to_string()))?;

        let path = self.entry_path(key);
        let temp_path = path.with_extension("tmp");

        let _lock = self.lock()?;
        let mut file = File::create(&temp_path)?;
        file.write_all(&data)?;
        file.sync_all()?;
        drop(file);

        fs::rename(&temp_path, &path)?;
        Ok(())
    }

    fn forget(&self, key: &str) -> CacheResult<bool> {
        let _lock = self.lock()?;
        match fs::remove_file(self.entry_path(key)) {
            Ok(()) => Ok(true),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(err) => Err(err.into()),
        }
    }
}
