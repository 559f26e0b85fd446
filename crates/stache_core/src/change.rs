//! File change notifications.
//!
//! When the backend reports that a file was added, removed or modified, the
//! owning index must drop everything derived from the old state: its
//! in-memory mapping, the shared path cache entry and its item list.

use crate::key::LogicalKey;

/// Type of change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    /// A file appeared.
    Added,
    /// A file disappeared.
    Removed,
    /// A file's contents changed.
    Modified,
}

/// A single change to an item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChangeEvent {
    /// A file appeared.
    ItemAdded(LogicalKey),
    /// A file disappeared.
    ItemRemoved(LogicalKey),
    /// A file's contents changed.
    ItemModified(LogicalKey),
}

impl ChangeEvent {
    /// Returns the affected key.
    #[must_use]
    pub fn key(&self) -> &LogicalKey {
        match self {
            Self::ItemAdded(key) | Self::ItemRemoved(key) | Self::ItemModified(key) => key,
        }
    }

    /// Returns the type of change.
    #[must_use]
    pub fn kind(&self) -> ChangeKind {
        match self {
            Self::ItemAdded(_) => ChangeKind::Added,
            Self::ItemRemoved(_) => ChangeKind::Removed,
            Self::ItemModified(_) => ChangeKind::Modified,
        }
    }

    /// Returns true if the change affects the container `handle`.
    #[must_use]
    pub fn affects(&self, handle: &str) -> bool {
        self.key().belongs_to(handle)
    }
}
