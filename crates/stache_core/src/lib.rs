//! # Stache Core
//!
//! Container-scoped indexing of flat-file asset stores.
//!
//! This crate provides:
//! - Logical keys (`handle::path`) and the exclusion filter for meta files
//! - Containers and container registries
//! - Path caches (in-memory and directory-backed)
//! - Item materialization and the default [`Asset`]
//! - The [`ContainerIndex`] with its three-tier lookup chain
//! - Change events and the read-only / read-write persistence modes

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod cache;
mod change;
mod config;
mod container;
mod error;
mod filter;
mod index;
mod key;
mod materializer;
mod paths;
mod persistence;
mod stache;

pub use change::{ChangeEvent, ChangeKind};
pub use config::{IndexConfig, DEFAULT_CACHE_PREFIX};
pub use container::{BackendRegistry, Container, ContainerRegistry, StaticRegistry};
pub use error::{CacheError, CacheResult, CoreError, CoreResult};
pub use filter::{ExclusionFilter, IGNORED_BASENAMES, META_DIR};
pub use index::ContainerIndex;
pub use key::{validate_handle, LogicalKey, KEY_DELIMITER};
pub use materializer::{Asset, AssetMaterializer, Materializer, StoredItem};
pub use paths::PathMap;
pub use persistence::{
    ItemPersistence, PersistenceMode, ReadOnlyPersistence, ReadWritePersistence,
};
pub use stache::Stache;

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
