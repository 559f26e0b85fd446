//! Clear-cache command implementation.

use super::open_store;
use stache_core::cache::PathCache;
use std::path::Path;
use tracing::info;

/// Runs the clear-cache command.
pub fn run(
    root: &Path,
    cache_dir: Option<&Path>,
    container: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let Some(cache_dir) = cache_dir else {
        println!("No --cache-dir given, nothing to clear");
        return Ok(());
    };
    info!("Clearing cached paths of {} in {:?}", container, cache_dir);

    let store = open_store(root, Some(cache_dir))?;
    let key = store.config().paths_cache_key(container);
    if store.cache().forget(&key)? {
        println!("✓ Cleared {key}");
    } else {
        println!("No cache entry for {container}");
    }

    Ok(())
}
