//! Items command implementation.

use super::open_store;
use stache_core::Asset;
use std::path::Path;
use tracing::info;

/// Materializes every asset of a container.
pub fn collect(
    root: &Path,
    cache_dir: Option<&Path>,
    container: &str,
) -> Result<Vec<Asset>, Box<dyn std::error::Error>> {
    let store = open_store(root, cache_dir)?;
    let mut index = store.index(container)?;
    Ok(index.get_items_from_files()?.to_vec())
}

/// Runs the items command.
pub fn run(
    root: &Path,
    cache_dir: Option<&Path>,
    container: &str,
    format: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    info!("Loading assets of {} in {:?}", container, root);
    let items = collect(root, cache_dir, container)?;

    match format {
        "json" => {
            println!("{}", serde_json::to_string_pretty(&items)?);
        }
        _ => {
            println!("{:<40} {:>12} {:>6}", "Key", "Size", "Image");
            println!("{}", "-".repeat(60));
            for asset in &items {
                println!(
                    "{:<40} {:>12} {:>6}",
                    asset.key().to_string(),
                    asset.size(),
                    if asset.is_image() { "yes" } else { "" }
                );
            }
            println!();
            println!("{} assets", items.len());
        }
    }

    Ok(())
}
