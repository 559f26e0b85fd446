//! Test fixtures and store helpers.
//!
//! Provides wrappers that observe how often an index reaches its
//! collaborators, and ready-made stores for common test scenarios.

use stache_core::cache::{FilePathCache, MemoryPathCache, PathCache};
use stache_core::{
    AssetMaterializer, CacheError, CacheResult, Container, ContainerIndex, IndexConfig, PathMap,
    Stache, StaticRegistry,
};
use stache_storage::{
    ContainerBackend, FileBackend, FileDescriptor, FileMetadata, InMemoryBackend, StorageError,
    StorageResult,
};
use std::io;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;

/// A backend wrapper that counts listing and metadata calls.
#[derive(Debug, Default)]
pub struct CountingBackend<B = InMemoryBackend> {
    inner: B,
    list_calls: AtomicUsize,
    metadata_calls: AtomicUsize,
}

impl<B: ContainerBackend> CountingBackend<B> {
    /// Wraps a backend.
    pub fn new(inner: B) -> Self {
        Self {
            inner,
            list_calls: AtomicUsize::new(0),
            metadata_calls: AtomicUsize::new(0),
        }
    }

    /// Returns the wrapped backend.
    pub fn inner(&self) -> &B {
        &self.inner
    }

    /// Number of `list_contents` calls so far.
    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    /// Number of `metadata` calls so far.
    pub fn metadata_calls(&self) -> usize {
        self.metadata_calls.load(Ordering::SeqCst)
    }

    /// Resets all counters.
    pub fn reset(&self) {
        self.list_calls.store(0, Ordering::SeqCst);
        self.metadata_calls.store(0, Ordering::SeqCst);
    }
}

impl<B: ContainerBackend> ContainerBackend for CountingBackend<B> {
    fn containers(&self) -> StorageResult<Vec<String>> {
        self.inner.containers()
    }

    fn list_contents(&self, container: &str) -> StorageResult<Vec<FileDescriptor>> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        self.inner.list_contents(container)
    }

    fn exists(&self, container: &str, path: &str) -> StorageResult<bool> {
        self.inner.exists(container, path)
    }

    fn metadata(&self, container: &str, path: &str) -> StorageResult<FileMetadata> {
        self.metadata_calls.fetch_add(1, Ordering::SeqCst);
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

/// A read-only backend that returns a fixed listing for one container.
///
/// Entries need not be consistent with each other, so listings that no
/// real filesystem would produce can be tested. Files have no metadata.
#[derive(Debug, Clone)]
pub struct ListingBackend {
    container: String,
    entries: Vec<FileDescriptor>,
}

impl ListingBackend {
    /// Creates a backend whose `container` lists `entries`.
    pub fn new(container: &str, entries: Vec<FileDescriptor>) -> Self {
        Self {
            container: container.to_string(),
            entries,
        }
    }

    fn check(&self, container: &str) -> StorageResult<()> {
        if container == self.container {
            Ok(())
        } else {
            Err(StorageError::ContainerNotFound(container.to_string()))
        }
    }
}

impl ContainerBackend for ListingBackend {
    fn containers(&self) -> StorageResult<Vec<String>> {
        Ok(vec![self.container.clone()])
    }

    fn list_contents(&self, container: &str) -> StorageResult<Vec<FileDescriptor>> {
        self.check(container)?;
        Ok(self.entries.clone())
    }

    fn exists(&self, container: &str, _path: &str) -> StorageResult<bool> {
        self.check(container)?;
        Ok(false)
    }

    fn metadata(&self, container: &str, path: &str) -> StorageResult<FileMetadata> {
        self.check(container)?;
        Err(StorageError::not_found(container, path))
    }

    fn read(&self, container: &str, path: &str) -> StorageResult<Vec<u8>> {
        self.check(container)?;
        Err(StorageError::not_found(container, path))
    }

    fn write(&self, _container: &str, _path: &str, _data: &[u8]) -> StorageResult<()> {
        Err(io::Error::new(io::ErrorKind::Unsupported, "listing backend is read-only").into())
    }

    fn delete(&self, _container: &str, _path: &str) -> StorageResult<()> {
        Err(io::Error::new(io::ErrorKind::Unsupported, "listing backend is read-only").into())
    }
}

/// A path cache wrapper that counts calls.
#[derive(Debug, Default)]
pub struct CountingCache<C = MemoryPathCache> {
    inner: C,
    gets: AtomicUsize,
    puts: AtomicUsize,
    forgets: AtomicUsize,
}

impl<C: PathCache> CountingCache<C> {
    /// Wraps a cache.
    pub fn new(inner: C) -> Self {
        Self {
            inner,
            gets: AtomicUsize::new(0),
            puts: AtomicUsize::new(0),
            forgets: AtomicUsize::new(0),
        }
    }

    /// Returns the wrapped cache.
    pub fn inner(&self) -> &C {
        &self.inner
    }

    /// Number of `get` calls so far.
    pub fn gets(&self) -> usize {
        self.gets.load(Ordering::SeqCst)
    }

    /// Number of `put` calls so far.
    pub fn puts(&self) -> usize {
        self.puts.load(Ordering::SeqCst)
    }

    /// Number of `forget` calls so far.
    pub fn forgets(&self) -> usize {
        self.forgets.load(Ordering::SeqCst)
    }
}

impl<C: PathCache> PathCache for CountingCache<C> {
    fn get(&self, key: &str) -> CacheResult<Option<PathMap>> {
        self.gets.fetch_add(1, Ordering::SeqCst);
        self.inner.get(key)
    }

    fn put(&self, key: &str, paths: &PathMap, ttl: Option<Duration>) -> CacheResult<()> {
        self.puts.fetch_add(1, Ordering::SeqCst);
        self.inner.put(key, paths, ttl)
    }

    fn forget(&self, key: &str) -> CacheResult<bool> {
        self.forgets.fetch_add(1, Ordering::SeqCst);
        self.inner.forget(key)
    }
}

/// A path cache whose every operation fails, as an unreachable cache
/// server would.
#[derive(Debug, Clone, Copy, Default)]
pub struct FailingCache;

impl PathCache for FailingCache {
    fn get(&self, _key: &str) -> CacheResult<Option<PathMap>> {
        Err(CacheError::Unavailable("cache is down".into()))
    }

    fn put(&self, _key: &str, _paths: &PathMap, _ttl: Option<Duration>) -> CacheResult<()> {
        Err(CacheError::Unavailable("cache is down".into()))
    }

    fn forget(&self, _key: &str) -> CacheResult<bool> {
        Err(CacheError::Unavailable("cache is down".into()))
    }
}

/// An in-memory backend, counting cache and registry with one registered
/// container.
pub struct IndexFixture {
    /// The counting backend.
    pub backend: Arc<CountingBackend>,
    /// The counting path cache.
    pub cache: Arc<CountingCache>,
    /// The container registry.
    pub registry: Arc<StaticRegistry>,
    handle: String,
}

impl IndexFixture {
    /// Creates a fixture with an empty, registered container.
    pub fn new(handle: &str) -> Self {
        let backend = CountingBackend::new(InMemoryBackend::new());
        backend.inner().create_container(handle);

        let registry = StaticRegistry::new();
        registry.register(Container::new(handle).expect("Invalid container handle"));

        Self {
            backend: Arc::new(backend),
            cache: Arc::new(CountingCache::new(MemoryPathCache::new())),
            registry: Arc::new(registry),
            handle: handle.to_string(),
        }
    }

    /// Creates a fixture whose container holds `paths`, each file
    /// containing its own path.
    pub fn with_files(handle: &str, paths: &[&str]) -> Self {
        let fixture = Self::new(handle);
        for path in paths {
            fixture.write(path, path.as_bytes());
        }
        fixture
    }

    /// Returns the container handle.
    pub fn handle(&self) -> &str {
        &self.handle
    }

    /// Writes a file into the container without going through an index.
    pub fn write(&self, path: &str, data: &[u8]) {
        self.backend
            .inner()
            .write(&self.handle, path, data)
            .expect("Failed to write fixture file");
    }

    /// Removes a file from the container without going through an index.
    pub fn remove(&self, path: &str) {
        self.backend
            .inner()
            .delete(&self.handle, path)
            .expect("Failed to delete fixture file");
    }

    /// Creates a fresh index over the fixture's container.
    pub fn index(&self, config: IndexConfig) -> ContainerIndex<AssetMaterializer> {
        ContainerIndex::new(
            self.handle.clone(),
            self.backend.clone(),
            self.cache.clone(),
            self.registry.clone(),
            AssetMaterializer,
            config,
        )
        .expect("Failed to create index")
    }
}

/// A directory-backed store with a persistent path cache, removed on drop.
pub struct TempStore {
    /// The directory backend.
    pub backend: Arc<FileBackend>,
    root: TempDir,
    cache_dir: TempDir,
}

impl TempStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        let root = TempDir::new().expect("Failed to create temp directory");
        let cache_dir = TempDir::new().expect("Failed to create temp directory");
        let backend = FileBackend::open(root.path()).expect("Failed to open file backend");

        Self {
            backend: Arc::new(backend),
            root,
            cache_dir,
        }
    }

    /// Returns the root directory.
    pub fn root(&self) -> &Path {
        self.root.path()
    }

    /// Returns the path cache directory.
    pub fn cache_dir(&self) -> &Path {
        self.cache_dir.path()
    }

    /// Writes a file, creating its container and parent directories.
    pub fn write(&self, container: &str, path: &str, data: &[u8]) {
        self.backend
            .write(container, path, data)
            .expect("Failed to write store file");
    }

    /// Opens a new handle on the persistent path cache.
    ///
    /// Each call behaves like a separate process reading the same cache.
    pub fn open_cache(&self) -> Arc<FilePathCache> {
        Arc::new(FilePathCache::open(self.cache_dir.path()).expect("Failed to open path cache"))
    }

    /// Creates an asset store over this directory with a fresh cache handle.
    pub fn stache(&self) -> Stache<AssetMaterializer> {
        Stache::for_assets(self.backend.clone(), self.open_cache())
    }
}

impl Default for TempStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Runs a test with a temporary directory-backed store.
///
/// # Example
///
/// ```rust
/// use stache_testkit::with_temp_store;
///
/// with_temp_store(|store| {
///     store.write("assets", "a.jpg", b"jpeg");
///     let item = store.stache().get_item("assets::a.jpg").unwrap();
///     assert_eq!(item.size(), 4);
/// });
/// ```
pub fn with_temp_store<F, R>(f: F) -> R
where
    F: FnOnce(&TempStore) -> R,
{
    let store = TempStore::new();
    f(&store)
}

/// Test scenario helpers.
pub mod scenarios {
    use super::*;

    /// A mixed listing of two top-level assets, one meta sidecar and one
    /// directory, of which only the two assets are indexed.
    pub fn four_descriptor_listing() -> Vec<FileDescriptor> {
        vec![
            FileDescriptor::file("a.jpg"),
            FileDescriptor::file(".meta/a.jpg.yaml"),
            FileDescriptor::dir("sub"),
            FileDescriptor::file("b.jpg"),
        ]
    }

    /// A fixture whose container holds `count` top-level images plus one
    /// file of every excluded kind.
    pub fn populated_fixture(handle: &str, count: usize) -> IndexFixture {
        let fixture = IndexFixture::new(handle);
        for i in 0..count {
            fixture.write(&format!("image_{i:03}.jpg"), &[0u8; 16]);
        }
        fixture.write(".meta/image_000.jpg.yaml", b"alt: ''");
        fixture.write("nested/.meta/x.yaml", b"");
        fixture.write(".gitignore", b"*");
        fixture.write("nested/.gitkeep", b"");
        fixture.write(".DS_Store", b"");
        fixture
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counting_backend_counts() {
        let fixture = IndexFixture::with_files("assets", &["a.jpg"]);
        fixture.backend.list_contents("assets").unwrap();
        fixture.backend.metadata("assets", "a.jpg").unwrap();
        assert_eq!(fixture.backend.list_calls(), 1);
        assert_eq!(fixture.backend.metadata_calls(), 1);

        fixture.backend.reset();
        assert_eq!(fixture.backend.list_calls(), 0);
    }

    #[test]
    fn failing_cache_fails() {
        assert!(FailingCache.get("k").is_err());
        assert!(FailingCache.put("k", &PathMap::new(), None).is_err());
        assert!(FailingCache.forget("k").is_err());
    }

    #[test]
    fn populated_fixture_admits_only_images() {
        let fixture = scenarios::populated_fixture("assets", 5);
        let mut index = fixture.index(IndexConfig::default());
        assert_eq!(index.paths().unwrap().len(), 5);
    }

    #[test]
    fn temp_store_roundtrip() {
        with_temp_store(|store| {
            store.write("assets", "docs/a.pdf", b"pdf");
            assert!(store.root().join("assets/docs/a.pdf").exists());
            let stache = store.stache();
            assert_eq!(stache.containers().unwrap().len(), 1);
        });
    }
}
