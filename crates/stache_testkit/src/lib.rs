//! # Stache Testkit
//!
//! Test utilities for Stache.
//!
//! This crate provides:
//! - Backend and cache wrappers that count or fail calls
//! - Temporary directory-backed stores
//! - Property-based test generators using proptest
//!
//! ## Usage
//!
//! ```rust
//! use stache_testkit::prelude::*;
//!
//! let fx = IndexFixture::with_files("assets", &["a.jpg", ".meta/a.jpg.yaml"]);
//! let mut index = fx.index(Default::default());
//! assert_eq!(index.paths().unwrap().len(), 1);
//! assert_eq!(fx.backend.list_calls(), 1);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod fixtures;
pub mod generators;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::fixtures::*;
    pub use crate::generators::*;
}

pub use fixtures::*;
pub use generators::*;
