//! Containers and container registries.

use crate::error::CoreResult;
use crate::key::{validate_handle, LogicalKey};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use stache_storage::ContainerBackend;
use std::collections::BTreeMap;
use std::sync::Arc;

/// A named storage scope, e.g. one asset library.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Container {
    handle: String,
    title: String,
}

impl Container {
    /// Creates a container whose title is derived from the handle.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidHandle`](crate::CoreError::InvalidHandle)
    /// if the handle is empty or contains the key delimiter.
    pub fn new(handle: impl Into<String>) -> CoreResult<Self> {
        let handle = handle.into();
        validate_handle(&handle)?;
        let title = title_from_handle(&handle);
        Ok(Self { handle, title })
    }

    /// Sets a display title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Returns the handle.
    #[must_use]
    pub fn handle(&self) -> &str {
        &self.handle
    }

    /// Returns the display title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Builds the logical key of `path` inside this container.
    ///
    /// # Errors
    ///
    /// Returns an error if the path is empty.
    pub fn key_for(&self, path: impl Into<String>) -> CoreResult<LogicalKey> {
        LogicalKey::new(self.handle.clone(), path)
    }
}

/// "product_images" -> "Product Images"
fn title_from_handle(handle: &str) -> String {
    handle
        .split(['_', '-'])
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Resolves container handles to containers.
pub trait ContainerRegistry: Send + Sync {
    /// Looks up a container by handle. Returns `None` if it is unknown.
    ///
    /// # Errors
    ///
    /// Returns an error if the registry's source cannot be read.
    fn find_by_handle(&self, handle: &str) -> CoreResult<Option<Container>>;

    /// Returns every known container, ordered by handle.
    ///
    /// # Errors
    ///
    /// Returns an error if the registry's source cannot be read.
    fn all(&self) -> CoreResult<Vec<Container>>;
}

/// A registry of explicitly registered containers.
#[derive(Debug, Default)]
pub struct StaticRegistry {
    containers: RwLock<BTreeMap<String, Container>>,
}

impl StaticRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a container, replacing any with the same handle.
    pub fn register(&self, container: Container) {
        self.containers
            .write()
            .insert(container.handle.clone(), container);
    }

    /// Removes a container. Returns true if it was registered.
    pub fn unregister(&self, handle: &str) -> bool {
        self.containers.write().remove(handle).is_some()
    }
}

impl FromIterator<Container> for StaticRegistry {
    fn from_iter<T: IntoIterator<Item = Container>>(iter: T) -> Self {
        let registry = Self::new();
        for container in iter {
            registry.register(container);
        }
        registry
    }
}

impl ContainerRegistry for StaticRegistry {
    fn find_by_handle(&self, handle: &str) -> CoreResult<Option<Container>> {
        Ok(self.containers.read().get(handle).cloned())
    }

    fn all(&self) -> CoreResult<Vec<Container>> {
        Ok(self.containers.read().values().cloned().collect())
    }
}

/// A registry that treats every container of a backend as known.
pub struct BackendRegistry {
    backend: Arc<dyn ContainerBackend>,
}

impl BackendRegistry {
    /// Creates a registry over `backend`.
    pub fn new(backend: Arc<dyn ContainerBackend>) -> Self {
        Self { backend }
    }
}

impl std::fmt::Debug for BackendRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BackendRegistry").finish_non_exhaustive()
    }
}

impl ContainerRegistry for BackendRegistry {
    fn find_by_handle(&self, handle: &str) -> CoreResult<Option<Container>> {
        let known = self.backend.containers()?;
        if !known.iter().any(|h| h == handle) {
            return Ok(None);
        }
        Container::new(handle).map(Some)
    }

    fn all(&self) -> CoreResult<Vec<Container>> {
        self.backend
            .containers()?
            .into_iter()
            .filter(|handle| validate_handle(handle).is_ok())
            .map(Container::new)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoreError;
    use stache_storage::InMemoryBackend;

    #[test]
    fn container_title_from_handle() {
        assert_eq!(Container::new("assets").unwrap().title(), "Assets");
        assert_eq!(
            Container::new("product_images").unwrap().title(),
            "Product Images"
        );
        assert_eq!(
            Container::new("main").unwrap().with_title("Main Library").title(),
            "Main Library"
        );
    }

    #[test]
    fn container_rejects_bad_handle() {
        assert!(matches!(
            Container::new("a::b"),
            Err(CoreError::InvalidHandle { .. })
        ));
        assert!(Container::new("").is_err());
    }

    #[test]
    fn container_key_for() {
        let container = Container::new("assets").unwrap();
        assert_eq!(
            container.key_for("a.jpg").unwrap().to_string(),
            "assets::a.jpg"
        );
    }

    #[test]
    fn static_registry_lookup() {
        let registry: StaticRegistry = vec![
            Container::new("assets").unwrap(),
            Container::new("downloads").unwrap(),
        ]
        .into_iter()
        .collect();

        assert_eq!(
            registry.find_by_handle("assets").unwrap().unwrap().handle(),
            "assets"
        );
        assert!(registry.find_by_handle("missing").unwrap().is_none());
        assert_eq!(registry.all().unwrap().len(), 2);

        assert!(registry.unregister("assets"));
        assert!(registry.find_by_handle("assets").unwrap().is_none());
    }

    #[test]
    fn backend_registry_follows_backend() {
        let backend = Arc::new(InMemoryBackend::new());
        backend.create_container("assets");
        let registry = BackendRegistry::new(backend.clone());

        assert!(registry.find_by_handle("assets").unwrap().is_some());
        assert!(registry.find_by_handle("downloads").unwrap().is_none());

        backend.create_container("downloads");
        let handles: Vec<_> = registry
            .all()
            .unwrap()
            .into_iter()
            .map(|c| c.handle().to_string())
            .collect();
        assert_eq!(handles, vec!["assets", "downloads"]);
    }
}
