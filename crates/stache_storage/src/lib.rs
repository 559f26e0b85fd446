//! # Stache Storage
//!
//! Container storage backends for Stache.
//!
//! This crate provides the lowest-level storage abstraction for Stache.
//! A backend holds a set of named **containers**, each of which is a tree of
//! files addressed by `/`-separated relative paths. Backends do not know
//! anything about logical keys, path caches or assets.
//!
//! ## Design Principles
//!
//! - Backends list, read, write and delete raw bytes
//! - Listings are complete and recursive (no pagination)
//! - No knowledge of the index, its cache or its exclusion rules
//! - Must be `Send + Sync` so one backend can serve many indexes
//!
//! ## Available Backends
//!
//! - [`InMemoryBackend`] - For testing and ephemeral stores
//! - [`FileBackend`] - Containers are subdirectories of a root directory
//!
//! ## Example
//!
//! ```rust
//! use stache_storage::{ContainerBackend, InMemoryBackend};
//!
//! let backend = InMemoryBackend::new();
//! backend.write("assets", "images/hero.jpg", b"jpeg").unwrap();
//!
//! let listing = backend.list_contents("assets").unwrap();
//! assert!(listing.iter().any(|f| f.path == "images/hero.jpg"));
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod backend;
mod descriptor;
mod error;
mod file;
mod memory;
mod path;

pub use backend::ContainerBackend;
pub use descriptor::{EntryKind, FileDescriptor, FileMetadata};
pub use error::{StorageError, StorageResult};
pub use file::FileBackend;
pub use memory::InMemoryBackend;
pub use path::normalize_relative;
