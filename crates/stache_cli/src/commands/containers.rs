//! Containers command implementation.

use serde::Serialize;
use stache_core::{BackendRegistry, ContainerRegistry};
use stache_storage::FileBackend;
use std::path::Path;
use std::sync::Arc;
use tracing::info;

/// One listed container.
#[derive(Debug, Serialize)]
pub struct ContainerInfo {
    /// Container handle.
    pub handle: String,
    /// Display title.
    pub title: String,
}

/// Lists the containers under `root`.
pub fn list(root: &Path) -> Result<Vec<ContainerInfo>, Box<dyn std::error::Error>> {
    let registry = BackendRegistry::new(Arc::new(FileBackend::open(root)?));
    Ok(registry
        .all()?
        .into_iter()
        .map(|container| ContainerInfo {
            handle: container.handle().to_string(),
            title: container.title().to_string(),
        })
        .collect())
}

/// Runs the containers command.
pub fn run(root: &Path, format: &str) -> Result<(), Box<dyn std::error::Error>> {
    info!("Listing containers in {:?}", root);
    let containers = list(root)?;

    match format {
        "json" => {
            println!("{}", serde_json::to_string_pretty(&containers)?);
        }
        _ => {
            if containers.is_empty() {
                println!("No containers found");
            }
            for container in &containers {
                println!("{:<24} {}", container.handle, container.title);
            }
        }
    }

    Ok(())
}
