//! Property-based test generators using proptest.
//!
//! Provides strategies for container handles, relative paths and listing
//! entries, including the meta files and deny-listed names the exclusion
//! filter must drop.

use proptest::prelude::*;
use stache_core::{IGNORED_BASENAMES, META_DIR};
use stache_storage::FileDescriptor;

/// Strategy for generating valid container handles.
pub fn handle_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-z][a-z0-9_]{0,15}").expect("Invalid regex")
}

/// Strategy for generating a single ordinary path segment.
pub fn segment_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[A-Za-z0-9_-]{1,8}(\\.[a-z]{2,4})?").expect("Invalid regex")
}

/// Strategy for generating a path segment, sometimes a special name.
///
/// Special names are the metadata directory and the deny-listed basenames.
pub fn any_segment_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        6 => segment_strategy(),
        1 => Just(META_DIR.to_string()),
        1 => prop::sample::select(IGNORED_BASENAMES.to_vec()).prop_map(str::to_string),
    ]
}

/// Strategy for generating normalized relative paths of 1 to 4 segments.
pub fn relative_path_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec(any_segment_strategy(), 1..5).prop_map(|segments| segments.join("/"))
}

/// Strategy for generating relative paths that may contain the key
/// delimiter.
pub fn delimited_path_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop_oneof![3 => segment_strategy(), 1 => Just("a::b".to_string())],
        1..4,
    )
    .prop_map(|segments| segments.join("/"))
}

/// Strategy for generating listing entries, files and directories.
pub fn descriptor_strategy() -> impl Strategy<Value = FileDescriptor> {
    (relative_path_strategy(), prop::bool::weighted(0.8)).prop_map(|(path, is_file)| {
        if is_file {
            FileDescriptor::file(path)
        } else {
            FileDescriptor::dir(path)
        }
    })
}

/// Strategy for generating a whole container listing.
pub fn listing_strategy(max_entries: usize) -> impl Strategy<Value = Vec<FileDescriptor>> {
    prop::collection::vec(descriptor_strategy(), 0..max_entries)
}

/// Configuration for property tests.
#[derive(Debug, Clone)]
pub struct PropTestConfig {
    /// Number of test cases to run.
    pub cases: u32,
    /// Maximum shrink iterations.
    pub max_shrink_iters: u32,
}

impl Default for PropTestConfig {
    fn default() -> Self {
        Self {
            cases: 256,
            max_shrink_iters: 1000,
        }
    }
}

impl PropTestConfig {
    /// Creates a configuration for quick tests.
    #[must_use]
    pub fn quick() -> Self {
        Self {
            cases: 32,
            max_shrink_iters: 100,
        }
    }

    /// Creates a configuration for thorough tests.
    #[must_use]
    pub fn thorough() -> Self {
        Self {
            cases: 1024,
            max_shrink_iters: 10000,
        }
    }

    /// Converts to proptest config.
    #[must_use]
    pub fn to_proptest_config(&self) -> ProptestConfig {
        ProptestConfig {
            cases: self.cases,
            max_shrink_iters: self.max_shrink_iters,
            ..ProptestConfig::default()
        }
    }
}
