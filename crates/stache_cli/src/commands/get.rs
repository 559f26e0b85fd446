//! Get command implementation.

use super::open_store;
use stache_core::Asset;
use std::path::Path;
use tracing::info;

/// Materializes the asset named by `key`.
pub fn fetch(
    root: &Path,
    cache_dir: Option<&Path>,
    key: &str,
) -> Result<Asset, Box<dyn std::error::Error>> {
    Ok(open_store(root, cache_dir)?.get_item(key)?)
}

/// Runs the get command.
pub fn run(
    root: &Path,
    cache_dir: Option<&Path>,
    key: &str,
    format: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    info!("Looking up {} in {:?}", key, root);
    let asset = fetch(root, cache_dir, key)?;

    match format {
        "json" => {
            println!("{}", serde_json::to_string_pretty(&asset)?);
        }
        _ => {
            println!("Key:           {}", asset.key());
            println!("Container:     {}", asset.container_handle());
            println!("Path:          {}", asset.path());
            println!("Basename:      {}", asset.basename());
            println!("Extension:     {}", asset.extension().unwrap_or("-"));
            println!("Size:          {} bytes", asset.size());
            match asset.last_modified() {
                Some(ts) => println!("Last modified: {ts}"),
                None => println!("Last modified: unknown"),
            }
        }
    }

    Ok(())
}
