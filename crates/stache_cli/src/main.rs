//! Stache CLI
//!
//! Command-line tools for directory-backed asset stores.
//!
//! # Commands
//!
//! - `containers` - List the containers under the root
//! - `paths` - Show the key → path mapping of a container
//! - `items` - Show the materialized assets of a container
//! - `get` - Show a single asset by logical key
//! - `clear-cache` - Drop the cached mapping of a container

mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Stache asset index tools.
#[derive(Parser)]
#[command(name = "stache")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Root directory; each subdirectory is a container
    #[arg(global = true, short, long)]
    root: Option<PathBuf>,

    /// Directory for the persistent path cache (in-memory if omitted)
    #[arg(global = true, short, long)]
    cache_dir: Option<PathBuf>,

    /// Enable verbose output
    #[arg(global = true, short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List containers
    Containers {
        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Show the key → path mapping of a container
    Paths {
        /// Container handle
        container: String,

        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Show every asset of a container
    Items {
        /// Container handle
        container: String,

        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Show a single asset
    Get {
        /// Logical key, e.g. `main::images/hero.jpg`
        key: String,

        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Drop the cached mapping of a container
    ClearCache {
        /// Container handle
        container: String,
    },

    /// Show version information
    Version,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let cache_dir = cli.cache_dir.as_deref();
    match cli.command {
        Commands::Containers { format } => {
            let root = cli.root.ok_or("Root directory required for containers")?;
            commands::containers::run(&root, &format)?;
        }
        Commands::Paths { container, format } => {
            let root = cli.root.ok_or("Root directory required for paths")?;
            commands::paths::run(&root, cache_dir, &container, &format)?;
        }
        Commands::Items { container, format } => {
            let root = cli.root.ok_or("Root directory required for items")?;
            commands::items::run(&root, cache_dir, &container, &format)?;
        }
        Commands::Get { key, format } => {
            let root = cli.root.ok_or("Root directory required for get")?;
            commands::get::run(&root, cache_dir, &key, &format)?;
        }
        Commands::ClearCache { container } => {
            let root = cli.root.ok_or("Root directory required for clear-cache")?;
            commands::clear_cache::run(&root, cache_dir, &container)?;
        }
        Commands::Version => {
            println!("Stache CLI v{}", env!("CARGO_PKG_VERSION"));
            println!("Stache Core v{}", stache_core::VERSION);
        }
    }

    Ok(())
}
