//! CLI command implementations.

pub mod clear_cache;
pub mod containers;
pub mod get;
pub mod items;
pub mod paths;

use stache_core::cache::{FilePathCache, MemoryPathCache, PathCache};
use stache_core::{AssetMaterializer, Stache};
use stache_storage::FileBackend;
use std::path::Path;
use std::sync::Arc;
use tracing::debug;

/// Opens the asset store rooted at `root`.
///
/// With `cache_dir` the path cache persists between runs; otherwise every
/// run lists the backend again.
pub fn open_store(
    root: &Path,
    cache_dir: Option<&Path>,
) -> Result<Stache<AssetMaterializer>, Box<dyn std::error::Error>> {
    let backend = Arc::new(FileBackend::open(root)?);
    let cache: Arc<dyn PathCache> = match cache_dir {
        Some(dir) => {
            debug!("Using path cache at {:?}", dir);
            Arc::new(FilePathCache::open(dir)?)
        }
        None => Arc::new(MemoryPathCache::new()),
    };
    Ok(Stache::for_assets(backend, cache))
}
