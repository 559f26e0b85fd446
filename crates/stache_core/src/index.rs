//! The container-scoped index.
//!
//! A [`ContainerIndex`] answers three questions about one container: which
//! logical keys exist, what item a key names, and what every item is.
//!
//! ## Lookup chain
//!
//! ```text
//! paths()
//!   ├─ in-memory mapping   (set by a previous call)
//!   ├─ path cache          (shared, keyed by IndexConfig::paths_cache_key)
//!   └─ backend listing     → filter → key derivation → cache put
//! ```
//!
//! The backend is listed at most once per index until a change event or
//! [`ContainerIndex::clear_cached_paths`] drops the mapping.

use crate::cache::PathCache;
use crate::change::ChangeEvent;
use crate::config::IndexConfig;
use crate::container::{Container, ContainerRegistry};
use crate::error::{CoreError, CoreResult};
use crate::key::{validate_handle, LogicalKey};
use crate::materializer::{Materializer, StoredItem};
use crate::paths::PathMap;
use crate::persistence::ItemPersistence;
use stache_storage::ContainerBackend;
use std::sync::Arc;
use tracing::{debug, warn};

/// Index over the files of a single container.
///
/// Instances are single-owner: every operation that may populate a cache
/// takes `&mut self`. Share the backend, path cache and registry between
/// instances instead of the index itself.
///
/// # Example
///
/// ```rust
/// use stache_core::cache::MemoryPathCache;
/// use stache_core::{AssetMaterializer, BackendRegistry, ContainerIndex, IndexConfig};
/// use stache_storage::{ContainerBackend, InMemoryBackend};
/// use std::sync::Arc;
///
/// let backend = Arc::new(InMemoryBackend::new());
/// backend.write("assets", "a.jpg", b"jpeg").unwrap();
///
/// let mut index = ContainerIndex::new(
///     "assets",
///     backend.clone(),
///     Arc::new(MemoryPathCache::new()),
///     Arc::new(BackendRegistry::new(backend)),
///     AssetMaterializer,
///     IndexConfig::default(),
/// )
/// .unwrap();
///
/// let keys: Vec<String> = index.keys().unwrap().iter().map(ToString::to_string).collect();
/// assert_eq!(keys, ["assets::a.jpg"]);
/// ```
pub struct ContainerIndex<M: Materializer> {
    handle: String,
    backend: Arc<dyn ContainerBackend>,
    cache: Arc<dyn PathCache>,
    registry: Arc<dyn ContainerRegistry>,
    materializer: M,
    persistence: Box<dyn ItemPersistence>,
    config: IndexConfig,
    /// Resolved on first use.
    container: Option<Container>,
    paths: Option<PathMap>,
    file_items: Option<Arc<[M::Item]>>,
}

impl<M: Materializer> ContainerIndex<M> {
    /// Creates an index bound to the container `handle`.
    ///
    /// Nothing is resolved or listed until the first query.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidHandle`] if the handle is empty or
    /// contains the key delimiter.
    pub fn new(
        handle: impl Into<String>,
        backend: Arc<dyn ContainerBackend>,
        cache: Arc<dyn PathCache>,
        registry: Arc<dyn ContainerRegistry>,
        materializer: M,
        config: IndexConfig,
    ) -> CoreResult<Self> {
        let handle = handle.into();
        validate_handle(&handle)?;
        let persistence = config.persistence.build();

        Ok(Self {
            handle,
            backend,
            cache,
            registry,
            materializer,
            persistence,
            config,
            container: None,
            paths: None,
            file_items: None,
        })
    }

    /// Returns the container handle this index is bound to.
    #[must_use]
    pub fn handle(&self) -> &str {
        &self.handle
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &IndexConfig {
        &self.config
    }

    /// Returns the key under which the mapping is stored in the path cache.
    #[must_use]
    pub fn paths_cache_key(&self) -> String {
        self.config.paths_cache_key(&self.handle)
    }

    /// Returns true if the mapping is held in memory.
    #[must_use]
    pub fn is_loaded(&self) -> bool {
        self.paths.is_some()
    }

    /// Resolves the container, asking the registry only once.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::ContainerNotFound`] if the registry does not
    /// know the handle.
    pub fn container(&mut self) -> CoreResult<&Container> {
        let container = match self.container.take() {
            Some(container) => container,
            None => self
                .registry
                .find_by_handle(&self.handle)?
                .ok_or_else(|| CoreError::ContainerNotFound {
                    handle: self.handle.clone(),
                })?,
        };
        Ok(self.container.insert(container))
    }

    /// Returns the key → path mapping of the container.
    ///
    /// # Errors
    ///
    /// Returns an error if the mapping has to be rebuilt and the container
    /// cannot be resolved or listed. Path cache failures never surface.
    pub fn paths(&mut self) -> CoreResult<&PathMap> {
        let paths = match self.paths.take() {
            Some(paths) => paths,
            None => self.load_paths()?,
        };
        Ok(self.paths.insert(paths))
    }

    /// Returns the logical keys of the container in mapping order.
    ///
    /// # Errors
    ///
    /// See [`paths`](Self::paths).
    pub fn keys(&mut self) -> CoreResult<Vec<LogicalKey>> {
        Ok(self.paths()?.keys().cloned().collect())
    }

    /// Materializes the item named by a `handle::path` key.
    ///
    /// The key is not checked against the mapping; a path that was never
    /// listed is still looked up on the backend.
    ///
    /// # Errors
    ///
    /// - [`CoreError::InvalidKey`] if the key has no delimiter
    /// - [`CoreError::KeyContainerMismatch`] if it names another container
    /// - [`CoreError::ItemNotFound`] if nothing exists at the path
    pub fn get_item(&mut self, key: &str) -> CoreResult<M::Item> {
        let key = LogicalKey::parse(key)?;
        self.get_item_by_key(&key)
    }

    /// Materializes the item named by a structured key.
    ///
    /// # Errors
    ///
    /// See [`get_item`](Self::get_item).
    pub fn get_item_by_key(&mut self, key: &LogicalKey) -> CoreResult<M::Item> {
        self.ensure_owns(key)?;
        let container = self.container()?.clone();
        self.materializer
            .make_item(self.backend.as_ref(), &container, key.path())
    }

    /// Returns one item per mapped path, in mapping order.
    ///
    /// With `should_cache_file_items` enabled, the list built by the first
    /// call is returned again until the index is invalidated. The list
    /// holds exactly one item per mapped path.
    ///
    /// # Errors
    ///
    /// Returns an error if the mapping cannot be built or the materializer
    /// fails. A path whose file has vanished since the mapping was built
    /// yields `ItemNotFound`, and no list is stored.
    pub fn get_items_from_files(&mut self) -> CoreResult<Arc<[M::Item]>> {
        if self.config.should_cache_file_items {
            if let Some(items) = &self.file_items {
                return Ok(Arc::clone(items));
            }
        }

        let container = self.container()?.clone();
        let paths: Vec<String> = self.paths()?.paths().map(str::to_string).collect();

        let items = paths
            .iter()
            .map(|path| {
                self.materializer
                    .make_item(self.backend.as_ref(), &container, path)
            })
            .collect::<CoreResult<Vec<_>>>()?;
        debug!("Materialized {} items for {}", items.len(), self.handle);

        let items: Arc<[M::Item]> = items.into();
        self.file_items = Some(Arc::clone(&items));
        Ok(items)
    }

    /// Applies a change notification.
    ///
    /// Returns true if the event concerned this container and the index
    /// was invalidated.
    pub fn handle_change(&mut self, event: &ChangeEvent) -> bool {
        if !event.affects(&self.handle) {
            return false;
        }
        debug!("{:?} {}, invalidating", event.kind(), event.key());
        self.clear_cached_paths();
        true
    }

    /// Applies a batch of change notifications.
    ///
    /// The index is invalidated at most once. Returns the number of events
    /// that concerned this container.
    pub fn handle_file_changes<'a>(
        &mut self,
        events: impl IntoIterator<Item = &'a ChangeEvent>,
    ) -> usize {
        let relevant = events
            .into_iter()
            .filter(|event| event.affects(&self.handle))
            .count();
        if relevant > 0 {
            debug!("{} changes in {}, invalidating", relevant, self.handle);
            self.clear_cached_paths();
        }
        relevant
    }

    /// Drops the in-memory mapping, the path cache entry and the item list.
    pub fn clear_cached_paths(&mut self) {
        self.paths = None;
        self.file_items = None;

        let cache_key = self.paths_cache_key();
        if let Err(err) = self.cache.forget(&cache_key) {
            warn!("Failed to forget path cache entry {}: {}", cache_key, err);
        }
    }

    /// Persists an item through the configured persistence mode.
    ///
    /// Returns true if the backend changed, in which case the index has
    /// been invalidated.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::KeyContainerMismatch`] for items of another
    /// container, or the persistence error.
    pub fn write_item_to_disk(&mut self, item: &impl StoredItem) -> CoreResult<bool> {
        self.ensure_owns(item.key())?;
        let event = self
            .persistence
            .write_item(self.backend.as_ref(), item)?;
        Ok(self.apply(event))
    }

    /// Removes an item through the configured persistence mode.
    ///
    /// Returns true if the backend changed, in which case the index has
    /// been invalidated.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::KeyContainerMismatch`] for items of another
    /// container, or the persistence error.
    pub fn delete_item_from_disk(&mut self, item: &impl StoredItem) -> CoreResult<bool> {
        self.ensure_owns(item.key())?;
        let event = self
            .persistence
            .delete_item(self.backend.as_ref(), item)?;
        Ok(self.apply(event))
    }

    fn apply(&mut self, event: Option<ChangeEvent>) -> bool {
        match event {
            Some(event) => self.handle_change(&event),
            None => false,
        }
    }

    fn ensure_owns(&self, key: &LogicalKey) -> CoreResult<()> {
        if key.belongs_to(&self.handle) {
            Ok(())
        } else {
            Err(CoreError::KeyContainerMismatch {
                key: key.to_string(),
                expected: self.handle.clone(),
            })
        }
    }

    fn load_paths(&mut self) -> CoreResult<PathMap> {
        let cache_key = self.paths_cache_key();
        match self.cache.get(&cache_key) {
            Ok(Some(paths)) => {
                debug!("Path cache hit for {} ({} paths)", cache_key, paths.len());
                return Ok(paths);
            }
            Ok(None) => debug!("Path cache miss for {}", cache_key),
            Err(err) => warn!("Path cache read for {} failed, rebuilding: {}", cache_key, err),
        }

        let paths = self.build_paths()?;
        if let Err(err) = self.cache.put(&cache_key, &paths, self.config.paths_ttl) {
            warn!("Failed to store path cache entry {}: {}", cache_key, err);
        }
        Ok(paths)
    }

    fn build_paths(&mut self) -> CoreResult<PathMap> {
        let handle = self.container()?.handle().to_string();
        let files = self.backend.list_contents(&handle)?;
        let listed = files.len();

        let filter = &self.config.filter;
        let paths = files
            .into_iter()
            .filter(|file| filter.admits(file))
            .map(|file| LogicalKey::new(handle.clone(), file.path.clone()).map(|key| (key, file.path)))
            .collect::<CoreResult<PathMap>>()?;

        debug!(
            "Indexed {} of {} entries in container {}",
            paths.len(),
            listed,
            handle
        );
        Ok(paths)
    }
}

impl<M: Materializer> std::fmt::Debug for ContainerIndex<M> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContainerIndex")
            .field("handle", &self.handle)
            .field("config", &self.config)
            .field("loaded", &self.paths.is_some())
            .field("items_cached", &self.file_items.is_some())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::MemoryPathCache;
    use crate::container::StaticRegistry;
    use crate::error::CacheError;
    use crate::error::CacheResult;
    use crate::materializer::{Asset, AssetMaterializer};
    use crate::persistence::PersistenceMode;
    use stache_storage::{FileDescriptor, FileMetadata, InMemoryBackend, StorageResult};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    /// Backend wrapper counting `list_contents` calls.
    #[derive(Default)]
    struct CountingBackend {
        inner: InMemoryBackend,
        listings: AtomicUsize,
    }

    impl CountingBackend {
        fn listings(&self) -> usize {
            self.listings.load(Ordering::SeqCst)
        }
    }

    impl ContainerBackend for CountingBackend {
        fn containers(&self) -> StorageResult<Vec<String>> {
            self.inner.containers()
        }

        fn list_contents(&self, container: &str) -> StorageResult<Vec<FileDescriptor>> {
            self.listings.fetch_add(1, Ordering::SeqCst);
            self.inner.list_contents(container)
        }

        fn exists(&self, container: &str, path: &str) -> StorageResult<bool> {
            self.inner.exists(container, path)
        }

        fn metadata(&self, container: &str, path: &str) -> StorageResult<FileMetadata> {
            self.inner.metadata(container, path)
        }

        fn read(&self, container: &str, path: &str) -> StorageResult<Vec<u8>> {
            self.inner.read(container, path)
        }

        fn write(&self, container: &str, path: &str, data: &[u8]) -> StorageResult<()> {
            self.inner.write(container, path, data)
        }

        fn delete(&self, container: &str, path: &str) -> StorageResult<()> {
            self.inner.delete(container, path)
        }
    }

    /// A cache that fails every operation.
    struct BrokenCache;

    impl PathCache for BrokenCache {
        fn get(&self, _key: &str) -> CacheResult<Option<PathMap>> {
            Err(CacheError::Unavailable("down".into()))
        }

        fn put(&self, _key: &str, _paths: &PathMap, _ttl: Option<Duration>) -> CacheResult<()> {
            Err(CacheError::Unavailable("down".into()))
        }

        fn forget(&self, _key: &str) -> CacheResult<bool> {
            Err(CacheError::Unavailable("down".into()))
        }
    }

    struct Fixture {
        backend: Arc<CountingBackend>,
        cache: Arc<MemoryPathCache>,
        registry: Arc<StaticRegistry>,
    }

    impl Fixture {
        fn new() -> Self {
            let backend = Arc::new(CountingBackend::default());
            backend.inner.write("assets", "a.jpg", b"a").unwrap();
            backend.inner.write("assets", "b.jpg", b"bb").unwrap();
            backend.inner.write("assets", ".meta/a.jpg.yaml", b"").unwrap();
            backend.inner.write("assets", ".gitkeep", b"").unwrap();

            let registry = Arc::new(StaticRegistry::new());
            registry.register(Container::new("assets").unwrap());

            Self {
                backend,
                cache: Arc::new(MemoryPathCache::new()),
                registry,
            }
        }

        fn index(&self, config: IndexConfig) -> ContainerIndex<AssetMaterializer> {
            ContainerIndex::new(
                "assets",
                self.backend.clone(),
                self.cache.clone(),
                self.registry.clone(),
                AssetMaterializer,
                config,
            )
            .unwrap()
        }
    }

    fn key(path: &str) -> LogicalKey {
        LogicalKey::new("assets", path).unwrap()
    }

    #[test]
    fn rejects_invalid_handle() {
        let fx = Fixture::new();
        let result = ContainerIndex::new(
            "a::b",
            fx.backend.clone(),
            fx.cache.clone(),
            fx.registry.clone(),
            AssetMaterializer,
            IndexConfig::default(),
        );
        assert!(matches!(result, Err(CoreError::InvalidHandle { .. })));
    }

    #[test]
    fn paths_filters_and_keys() {
        let fx = Fixture::new();
        let mut index = fx.index(IndexConfig::default());

        let paths = index.paths().unwrap();
        assert_eq!(paths.len(), 2);
        assert_eq!(paths.get(&key("a.jpg")), Some("a.jpg"));
        assert_eq!(paths.get(&key("b.jpg")), Some("b.jpg"));

        assert_eq!(index.keys().unwrap(), vec![key("a.jpg"), key("b.jpg")]);
    }

    #[test]
    fn paths_are_memoized() {
        let fx = Fixture::new();
        let mut index = fx.index(IndexConfig::default());

        let first = index.paths().unwrap().clone();
        let second = index.paths().unwrap().clone();
        assert_eq!(first, second);
        assert_eq!(fx.backend.listings(), 1);
        assert!(index.is_loaded());
    }

    #[test]
    fn paths_are_written_to_the_cache() {
        let fx = Fixture::new();
        let mut index = fx.index(IndexConfig::default());
        let built = index.paths().unwrap().clone();

        let cached = fx.cache.get(&index.paths_cache_key()).unwrap();
        assert_eq!(cached, Some(built));
    }

    #[test]
    fn fresh_index_reads_the_cache() {
        let fx = Fixture::new();
        fx.index(IndexConfig::default()).paths().unwrap();

        let mut second = fx.index(IndexConfig::default());
        assert_eq!(second.paths().unwrap().len(), 2);
        assert_eq!(fx.backend.listings(), 1);
    }

    #[test]
    fn prepopulated_cache_skips_backend_and_registry() {
        let fx = Fixture::new();
        let mut seeded = PathMap::new();
        seeded.insert(key("x.png"), "x.png");
        fx.cache
            .put("stache::indexes::assets::assets::_paths", &seeded, None)
            .unwrap();
        fx.registry.unregister("assets");

        let mut index = fx.index(IndexConfig::default());
        assert_eq!(index.paths().unwrap(), &seeded);
        assert_eq!(fx.backend.listings(), 0);
    }

    #[test]
    fn unknown_container_fails_fast() {
        let fx = Fixture::new();
        fx.registry.unregister("assets");
        let mut index = fx.index(IndexConfig::default());

        let err = index.paths().unwrap_err();
        assert!(matches!(err, CoreError::ContainerNotFound { ref handle } if handle == "assets"));
        assert_eq!(fx.backend.listings(), 0);
    }

    #[test]
    fn broken_cache_degrades_to_backend() {
        let fx = Fixture::new();
        let mut index = ContainerIndex::new(
            "assets",
            fx.backend.clone(),
            Arc::new(BrokenCache),
            fx.registry.clone(),
            AssetMaterializer,
            IndexConfig::default(),
        )
        .unwrap();

        assert_eq!(index.paths().unwrap().len(), 2);
        index.clear_cached_paths();
        assert_eq!(index.paths().unwrap().len(), 2);
        assert_eq!(fx.backend.listings(), 2);
    }

    #[test]
    fn get_item_materializes_without_membership_check() {
        let fx = Fixture::new();
        let mut index = fx.index(IndexConfig::default());

        let asset = index.get_item("assets::b.jpg").unwrap();
        assert_eq!(asset.size(), 2);

        // not in the mapping, but present on the backend
        let meta = index.get_item("assets::.meta/a.jpg.yaml").unwrap();
        assert_eq!(meta.basename(), "a.jpg.yaml");
        assert_eq!(fx.backend.listings(), 0);
    }

    #[test]
    fn get_item_errors() {
        let fx = Fixture::new();
        let mut index = fx.index(IndexConfig::default());

        assert!(matches!(
            index.get_item("a.jpg"),
            Err(CoreError::InvalidKey { .. })
        ));
        assert!(matches!(
            index.get_item("downloads::a.jpg"),
            Err(CoreError::KeyContainerMismatch { .. })
        ));
        assert!(matches!(
            index.get_item("assets::missing.jpg"),
            Err(CoreError::ItemNotFound { .. })
        ));
    }

    #[test]
    fn get_item_splits_on_first_delimiter() {
        let fx = Fixture::new();
        fx.backend.inner.write("assets", "odd::name.txt", b"x").unwrap();
        let mut index = fx.index(IndexConfig::default());

        let asset = index.get_item("assets::odd::name.txt").unwrap();
        assert_eq!(asset.path(), "odd::name.txt");
    }

    #[test]
    fn item_list_is_shared_when_caching() {
        let fx = Fixture::new();
        let mut index = fx.index(IndexConfig::new().should_cache_file_items(true));

        let first = index.get_items_from_files().unwrap();
        let second = index.get_items_from_files().unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(first.len(), 2);
        assert_eq!(first[0].path(), "a.jpg");
        assert_eq!(first[1].path(), "b.jpg");
    }

    #[test]
    fn item_list_is_rebuilt_without_caching() {
        let fx = Fixture::new();
        let mut index = fx.index(IndexConfig::default());

        let first = index.get_items_from_files().unwrap();
        let second = index.get_items_from_files().unwrap();
        assert!(!Arc::ptr_eq(&first, &second));
        assert_eq!(first, second);
    }

    #[test]
    fn item_list_reports_vanished_files() {
        let fx = Fixture::new();
        let mut index = fx.index(IndexConfig::new().should_cache_file_items(true));
        index.paths().unwrap();

        fx.backend.inner.delete("assets", "a.jpg").unwrap();
        let err = index.get_items_from_files().unwrap_err();
        assert!(matches!(err, CoreError::ItemNotFound { ref key } if key == "assets::a.jpg"));

        // Invalidation rebuilds the mapping without the vanished file.
        assert!(index.handle_change(&ChangeEvent::ItemRemoved(key("a.jpg"))));
        let items = index.get_items_from_files().unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].path(), "b.jpg");
    }

    #[test]
    fn change_in_container_invalidates() {
        let fx = Fixture::new();
        let mut index = fx.index(IndexConfig::new().should_cache_file_items(true));
        let before = index.get_items_from_files().unwrap();

        fx.backend.inner.write("assets", "c.jpg", b"ccc").unwrap();
        assert!(index.handle_change(&ChangeEvent::ItemAdded(key("c.jpg"))));
        assert!(!index.is_loaded());
        assert!(fx.cache.get(&index.paths_cache_key()).unwrap().is_none());

        let after = index.get_items_from_files().unwrap();
        assert!(!Arc::ptr_eq(&before, &after));
        assert_eq!(after.len(), 3);
        assert_eq!(fx.backend.listings(), 2);
    }

    #[test]
    fn change_in_other_container_is_ignored() {
        let fx = Fixture::new();
        let mut index = fx.index(IndexConfig::default());
        index.paths().unwrap();

        let other = ChangeEvent::ItemRemoved(LogicalKey::new("downloads", "a.jpg").unwrap());
        assert!(!index.handle_change(&other));
        assert!(index.is_loaded());
    }

    #[test]
    fn batch_changes_count_relevant_events() {
        let fx = Fixture::new();
        let mut index = fx.index(IndexConfig::default());
        index.paths().unwrap();

        let events = [
            ChangeEvent::ItemModified(key("a.jpg")),
            ChangeEvent::ItemRemoved(LogicalKey::new("downloads", "x").unwrap()),
            ChangeEvent::ItemRemoved(key("b.jpg")),
        ];
        assert_eq!(index.handle_file_changes(&events), 2);
        assert!(!index.is_loaded());

        assert_eq!(index.handle_file_changes(std::iter::empty()), 0);
    }

    #[test]
    fn clear_cached_paths_forces_rebuild() {
        let fx = Fixture::new();
        let mut index = fx.index(IndexConfig::default());
        index.paths().unwrap();
        index.clear_cached_paths();
        index.paths().unwrap();
        assert_eq!(fx.backend.listings(), 2);
    }

    #[test]
    fn read_only_persistence_keeps_index() {
        let fx = Fixture::new();
        let mut index = fx.index(IndexConfig::default());
        index.paths().unwrap();

        let asset = Asset::new(key("new.jpg"), b"new".to_vec());
        assert!(!index.write_item_to_disk(&asset).unwrap());
        assert!(!index.delete_item_from_disk(&asset).unwrap());
        assert!(index.is_loaded());
        assert!(!fx.backend.exists("assets", "new.jpg").unwrap());
    }

    #[test]
    fn read_write_persistence_invalidates() {
        let fx = Fixture::new();
        let mut index = fx.index(IndexConfig::new().persistence(PersistenceMode::ReadWrite));
        index.paths().unwrap();

        let asset = Asset::new(key("new.jpg"), b"new".to_vec());
        assert!(index.write_item_to_disk(&asset).unwrap());
        assert!(!index.is_loaded());
        assert!(index.keys().unwrap().contains(&key("new.jpg")));

        assert!(index.delete_item_from_disk(&asset).unwrap());
        assert!(!index.keys().unwrap().contains(&key("new.jpg")));
    }

    #[test]
    fn persistence_rejects_foreign_items() {
        let fx = Fixture::new();
        let mut index = fx.index(IndexConfig::new().persistence(PersistenceMode::ReadWrite));

        let foreign = Asset::new(LogicalKey::new("downloads", "a.jpg").unwrap(), b"x".to_vec());
        assert!(matches!(
            index.write_item_to_disk(&foreign),
            Err(CoreError::KeyContainerMismatch { .. })
        ));
        assert!(matches!(
            index.delete_item_from_disk(&foreign),
            Err(CoreError::KeyContainerMismatch { .. })
        ));
    }
}
