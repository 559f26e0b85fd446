//! Item materialization.
//!
//! The index decides *which* paths become items and *when*; a
//! [`Materializer`] decides *how* an item is built from a container and a
//! path.

use crate::container::Container;
use crate::error::{CoreError, CoreResult};
use crate::key::LogicalKey;
use serde::Serialize;
use stache_storage::{ContainerBackend, FileDescriptor};

/// Builds domain objects from `(container, path)` pairs.
pub trait Materializer: Send + Sync {
    /// The item type produced.
    type Item;

    /// Builds the item stored at `path` in `container`.
    ///
    /// # Errors
    ///
    /// Implementations return [`CoreError::ItemNotFound`] if nothing exists
    /// at `path`, and propagate backend failures.
    fn make_item(
        &self,
        backend: &dyn ContainerBackend,
        container: &Container,
        path: &str,
    ) -> CoreResult<Self::Item>;
}

/// An item that can be written to or removed from a backend.
pub trait StoredItem {
    /// Returns the item's logical key.
    fn key(&self) -> &LogicalKey;

    /// Returns the raw bytes to persist, if the item carries any.
    fn contents(&self) -> Option<&[u8]>;
}

/// A file in an asset container.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Asset {
    key: LogicalKey,
    basename: String,
    extension: Option<String>,
    size: u64,
    last_modified: Option<u64>,
    #[serde(skip)]
    contents: Option<Vec<u8>>,
}

impl Asset {
    /// Creates a new, not yet persisted asset carrying `contents`.
    #[must_use]
    pub fn new(key: LogicalKey, contents: impl Into<Vec<u8>>) -> Self {
        let contents = contents.into();
        let mut asset = Self::from_key(key);
        asset.size = contents.len() as u64;
        asset.contents = Some(contents);
        asset
    }

    fn from_key(key: LogicalKey) -> Self {
        let descriptor = FileDescriptor::file(key.path());
        let extension = descriptor.extension().map(str::to_lowercase);

        Self {
            key,
            basename: descriptor.basename,
            extension,
            size: 0,
            last_modified: None,
            contents: None,
        }
    }

    /// Returns the logical key.
    #[must_use]
    pub fn key(&self) -> &LogicalKey {
        &self.key
    }

    /// Returns the container handle.
    #[must_use]
    pub fn container_handle(&self) -> &str {
        self.key.handle()
    }

    /// Returns the path relative to the container.
    #[must_use]
    pub fn path(&self) -> &str {
        self.key.path()
    }

    /// Returns the final path segment.
    #[must_use]
    pub fn basename(&self) -> &str {
        &self.basename
    }

    /// Returns the lowercased extension, if any.
    #[must_use]
    pub fn extension(&self) -> Option<&str> {
        self.extension.as_deref()
    }

    /// Returns the size in bytes.
    #[must_use]
    pub fn size(&self) -> u64 {
        self.size
    }

    /// Returns the last modification time in seconds since the Unix epoch.
    #[must_use]
    pub fn last_modified(&self) -> Option<u64> {
        self.last_modified
    }

    /// Returns true for common raster and vector image extensions.
    #[must_use]
    pub fn is_image(&self) -> bool {
        matches!(
            self.extension(),
            Some("jpg" | "jpeg" | "png" | "gif" | "webp" | "svg" | "avif")
        )
    }
}

impl StoredItem for Asset {
    fn key(&self) -> &LogicalKey {
        &self.key
    }

    fn contents(&self) -> Option<&[u8]> {
        self.contents.as_deref()
    }
}

/// Materializes [`Asset`]s from backend metadata.
///
/// File contents are not loaded; only size and modification time are read.
#[derive(Debug, Clone, Copy, Default)]
pub struct AssetMaterializer;

impl Materializer for AssetMaterializer {
    type Item = Asset;

    fn make_item(
        &self,
        backend: &dyn ContainerBackend,
        container: &Container,
        path: &str,
    ) -> CoreResult<Asset> {
        let key = container.key_for(path)?;
        let metadata = match backend.metadata(container.handle(), path) {
            Ok(metadata) => metadata,
            Err(err) if err.is_not_found() => {
                return Err(CoreError::item_not_found(key.to_string()))
            }
            Err(err) => return Err(err.into()),
        };

        let mut asset = Asset::from_key(key);
        asset.size = metadata.size;
        asset.last_modified = metadata.timestamp;
        Ok(asset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stache_storage::{InMemoryBackend, StorageError};

    fn setup() -> (InMemoryBackend, Container) {
        let backend = InMemoryBackend::new();
        backend.write("assets", "img/Hero.JPG", b"12345").unwrap();
        (backend, Container::new("assets").unwrap())
    }

    #[test]
    fn materializes_existing_asset() {
        let (backend, container) = setup();
        let asset = AssetMaterializer
            .make_item(&backend, &container, "img/Hero.JPG")
            .unwrap();

        assert_eq!(asset.key().to_string(), "assets::img/Hero.JPG");
        assert_eq!(asset.container_handle(), "assets");
        assert_eq!(asset.path(), "img/Hero.JPG");
        assert_eq!(asset.basename(), "Hero.JPG");
        assert_eq!(asset.extension(), Some("jpg"));
        assert_eq!(asset.size(), 5);
        assert!(asset.last_modified().is_some());
        assert!(asset.is_image());
        assert!(StoredItem::contents(&asset).is_none());
    }

    #[test]
    fn missing_asset_is_item_not_found() {
        let (backend, container) = setup();
        let err = AssetMaterializer
            .make_item(&backend, &container, "nope.jpg")
            .unwrap_err();
        assert!(matches!(err, CoreError::ItemNotFound { ref key } if key == "assets::nope.jpg"));
    }

    #[test]
    fn escaping_path_is_rejected() {
        let (backend, container) = setup();
        let err = AssetMaterializer
            .make_item(&backend, &container, "../secret")
            .unwrap_err();
        assert!(matches!(
            err,
            CoreError::Storage(StorageError::InvalidPath { .. })
        ));
    }

    #[test]
    fn new_asset_carries_contents() {
        let key = LogicalKey::new("assets", "docs/readme").unwrap();
        let asset = Asset::new(key, b"hello".to_vec());
        assert_eq!(asset.size(), 5);
        assert_eq!(asset.extension(), None);
        assert!(!asset.is_image());
        assert_eq!(StoredItem::contents(&asset), Some(&b"hello"[..]));
    }

    #[test]
    fn serialized_asset_omits_contents() {
        let key = LogicalKey::new("assets", "a.png").unwrap();
        let json = serde_json::to_string(&Asset::new(key, b"png".to_vec())).unwrap();
        assert!(json.contains("\"key\":\"assets::a.png\""));
        assert!(!json.contains("contents"));
    }
}
