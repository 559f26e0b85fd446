//! Paths command implementation.

use super::open_store;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::info;

/// Returns the `handle::path` → path mapping of a container.
pub fn collect(
    root: &Path,
    cache_dir: Option<&Path>,
    container: &str,
) -> Result<BTreeMap<String, String>, Box<dyn std::error::Error>> {
    let store = open_store(root, cache_dir)?;
    let mut index = store.index(container)?;
    Ok(index.paths()?.to_string_map())
}

/// Runs the paths command.
pub fn run(
    root: &Path,
    cache_dir: Option<&Path>,
    container: &str,
    format: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    info!("Indexing container {} in {:?}", container, root);
    let paths = collect(root, cache_dir, container)?;

    match format {
        "json" => {
            println!("{}", serde_json::to_string_pretty(&paths)?);
        }
        _ => {
            for (key, path) in &paths {
                println!("{key} -> {path}");
            }
            println!();
            println!("{} paths", paths.len());
        }
    }

    Ok(())
}
