//! Entry point tying the shared collaborators together.

use crate::cache::PathCache;
use crate::config::IndexConfig;
use crate::container::{BackendRegistry, Container, ContainerRegistry};
use crate::error::CoreResult;
use crate::index::ContainerIndex;
use crate::key::LogicalKey;
use crate::materializer::{AssetMaterializer, Materializer};
use stache_storage::ContainerBackend;
use std::sync::Arc;

/// Factory for container indexes sharing one backend, path cache and
/// registry.
///
/// Indexes are cheap to create. Because the path cache is shared, a new
/// index for a container that was indexed before starts from the cached
/// mapping instead of listing the backend again.
///
/// # Example
///
/// ```rust
/// use stache_core::cache::MemoryPathCache;
/// use stache_core::Stache;
/// use stache_storage::{ContainerBackend, InMemoryBackend};
/// use std::sync::Arc;
///
/// let backend = Arc::new(InMemoryBackend::new());
/// backend.write("assets", "hero.png", b"png").unwrap();
///
/// let stache = Stache::for_assets(backend, Arc::new(MemoryPathCache::new()));
/// let asset = stache.get_item("assets::hero.png").unwrap();
/// assert_eq!(asset.extension(), Some("png"));
/// ```
pub struct Stache<M> {
    backend: Arc<dyn ContainerBackend>,
    cache: Arc<dyn PathCache>,
    registry: Arc<dyn ContainerRegistry>,
    materializer: M,
    config: IndexConfig,
}

impl Stache<AssetMaterializer> {
    /// Creates an asset store where every backend container is known.
    pub fn for_assets(backend: Arc<dyn ContainerBackend>, cache: Arc<dyn PathCache>) -> Self {
        let registry = Arc::new(BackendRegistry::new(Arc::clone(&backend)));
        Self::new(backend, cache, registry, AssetMaterializer)
    }
}

impl<M: Materializer + Clone> Stache<M> {
    /// Creates a factory with the default configuration.
    pub fn new(
        backend: Arc<dyn ContainerBackend>,
        cache: Arc<dyn PathCache>,
        registry: Arc<dyn ContainerRegistry>,
        materializer: M,
    ) -> Self {
        Self {
            backend,
            cache,
            registry,
            materializer,
            config: IndexConfig::default(),
        }
    }

    /// Sets the configuration handed to every new index.
    #[must_use]
    pub fn with_config(mut self, config: IndexConfig) -> Self {
        self.config = config;
        self
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &IndexConfig {
        &self.config
    }

    /// Returns the shared backend.
    #[must_use]
    pub fn backend(&self) -> &Arc<dyn ContainerBackend> {
        &self.backend
    }

    /// Returns the shared path cache.
    #[must_use]
    pub fn cache(&self) -> &Arc<dyn PathCache> {
        &self.cache
    }

    /// Creates an index for the container `handle`.
    ///
    /// # Errors
    ///
    /// Returns an error if the handle is not valid.
    pub fn index(&self, handle: &str) -> CoreResult<ContainerIndex<M>> {
        ContainerIndex::new(
            handle,
            Arc::clone(&self.backend),
            Arc::clone(&self.cache),
            Arc::clone(&self.registry),
            self.materializer.clone(),
            self.config.clone(),
        )
    }

    /// Returns every known container.
    ///
    /// # Errors
    ///
    /// Returns an error if the registry cannot be read.
    pub fn containers(&self) -> CoreResult<Vec<Container>> {
        self.registry.all()
    }

    /// Materializes an item from a `handle::path` key of any container.
    ///
    /// # Errors
    ///
    /// See [`ContainerIndex::get_item`].
    pub fn get_item(&self, key: &str) -> CoreResult<M::Item> {
        let key = LogicalKey::parse(key)?;
        self.index(key.handle())?.get_item_by_key(&key)
    }
}

impl<M> std::fmt::Debug for Stache<M> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Stache")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
