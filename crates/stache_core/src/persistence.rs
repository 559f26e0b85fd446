//! Write-back of items to the backend.
//!
//! Indexing and content mutation are separate concerns. A store that only
//! indexes an externally managed container uses [`ReadOnlyPersistence`];
//! a store that owns its files uses [`ReadWritePersistence`]. The variant is
//! chosen with [`PersistenceMode`] in the index configuration.

use crate::change::ChangeEvent;
use crate::error::{CoreError, CoreResult};
use crate::materializer::StoredItem;
use stache_storage::ContainerBackend;
use tracing::debug;

/// Which persistence capability an index gets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PersistenceMode {
    /// Writes and deletes are accepted and ignored.
    #[default]
    ReadOnly,
    /// Writes and deletes go to the backend.
    ReadWrite,
}

impl PersistenceMode {
    /// Builds the persistence implementation for this mode.
    #[must_use]
    pub fn build(self) -> Box<dyn ItemPersistence> {
        match self {
            Self::ReadOnly => Box::new(ReadOnlyPersistence),
            Self::ReadWrite => Box::new(ReadWritePersistence),
        }
    }
}

/// Persists item creation and removal.
///
/// Implementations return the change they caused so the caller can
/// invalidate its index, or `None` if nothing on the backend changed.
pub trait ItemPersistence: Send + Sync {
    /// Returns the mode this implementation represents.
    fn mode(&self) -> PersistenceMode;

    /// Writes an item's contents.
    ///
    /// # Errors
    ///
    /// Returns an error if the item has no contents or the write fails.
    fn write_item(
        &self,
        backend: &dyn ContainerBackend,
        item: &dyn StoredItem,
    ) -> CoreResult<Option<ChangeEvent>>;

    /// Deletes an item's file.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    fn delete_item(
        &self,
        backend: &dyn ContainerBackend,
        item: &dyn StoredItem,
    ) -> CoreResult<Option<ChangeEvent>>;
}

/// Persistence for containers whose files are managed elsewhere.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReadOnlyPersistence;

impl ItemPersistence for ReadOnlyPersistence {
    fn mode(&self) -> PersistenceMode {
        PersistenceMode::ReadOnly
    }

    fn write_item(
        &self,
        _backend: &dyn ContainerBackend,
        item: &dyn StoredItem,
    ) -> CoreResult<Option<ChangeEvent>> {
        debug!("Read-only store, not writing {}", item.key());
        Ok(None)
    }

    fn delete_item(
        &self,
        _backend: &dyn ContainerBackend,
        item: &dyn StoredItem,
    ) -> CoreResult<Option<ChangeEvent>> {
        debug!("Read-only store, not deleting {}", item.key());
        Ok(None)
    }
}

/// Persistence that writes through to the backend.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReadWritePersistence;

impl ItemPersistence for ReadWritePersistence {
    fn mode(&self) -> PersistenceMode {
        PersistenceMode::ReadWrite
    }

    fn write_item(
        &self,
        backend: &dyn ContainerBackend,
        item: &dyn StoredItem,
    ) -> CoreResult<Option<ChangeEvent>> {
        let key = item.key();
        let contents = item.contents().ok_or_else(|| CoreError::MissingContents {
            key: key.to_string(),
        })?;

        let existed = backend.exists(key.handle(), key.path())?;
        backend.write(key.handle(), key.path(), contents)?;
        debug!("Wrote {} ({} bytes)", key, contents.len());

        Ok(Some(if existed {
            ChangeEvent::ItemModified(key.clone())
        } else {
            ChangeEvent::ItemAdded(key.clone())
        }))
    }

    fn delete_item(
        &self,
        backend: &dyn ContainerBackend,
        item: &dyn StoredItem,
    ) -> CoreResult<Option<ChangeEvent>> {
        let key = item.key();
        match backend.delete(key.handle(), key.path()) {
            Ok(()) => {}
            Err(err) if err.is_not_found() => {
                return Err(CoreError::item_not_found(key.to_string()))
            }
            Err(err) => return Err(err.into()),
        }
        debug!("Deleted {}", key);

        Ok(Some(ChangeEvent::ItemRemoved(key.clone())))
    }
}
