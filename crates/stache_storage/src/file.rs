//! Directory-based container backend.

use crate::backend::ContainerBackend;
use crate::descriptor::{FileDescriptor, FileMetadata};
use crate::error::{StorageError, StorageResult};
use crate::path::normalize_relative;
use std::fs::{self, Metadata};
use std::io;
use std::path::{Path, PathBuf};
use std::time::UNIX_EPOCH;
use walkdir::WalkDir;

/// A directory-based container backend.
///
/// Every immediate subdirectory of the root is a container; its handle is
/// the directory name. Files are addressed by their path relative to that
/// subdirectory.
///
/// ```text
/// <root>/
/// ├─ assets/
/// │  ├─ hero.jpg
/// │  └─ .meta/hero.jpg.yaml
/// └─ downloads/
///    └─ manual.pdf
/// ```
///
/// # Thread Safety
///
/// The backend holds no open handles and can be shared across threads.
/// Concurrent writers to the same file race at the OS level.
///
/// # Example
///
/// ```no_run
/// use stache_storage::{ContainerBackend, FileBackend};
/// use std::path::Path;
///
/// let backend = FileBackend::open(Path::new("public")).unwrap();
/// for entry in backend.list_contents("assets").unwrap() {
///     println!("{}", entry.path);
/// }
/// ```
#[derive(Debug, Clone)]
pub struct FileBackend {
    root: PathBuf,
}

impl FileBackend {
    /// Opens a backend rooted at an existing directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the path does not exist or is not a directory.
    pub fn open(root: &Path) -> StorageResult<Self> {
        let metadata = fs::metadata(root)?;
        if !metadata.is_dir() {
            return Err(StorageError::Io(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("not a directory: {}", root.display()),
            )));
        }

        Ok(Self {
            root: root.to_path_buf(),
        })
    }

    /// Opens a backend, creating the root directory if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created or opened.
    pub fn open_with_create_dirs(root: &Path) -> StorageResult<Self> {
        fs::create_dir_all(root)?;
        Self::open(root)
    }

    /// Returns the root directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn container_dir(&self, container: &str) -> StorageResult<PathBuf> {
        let normalized = normalize_relative(container)?;
        if normalized.contains('/') {
            return Err(StorageError::InvalidPath {
                path: container.to_string(),
            });
        }
        Ok(self.root.join(normalized))
    }

    fn file_path(&self, container: &str, path: &str) -> StorageResult<(PathBuf, String)> {
        let relative = normalize_relative(path)?;
        let full = self.container_dir(container)?.join(&relative);
        Ok((full, relative))
    }
}

fn timestamp(metadata: &Metadata) -> Option<u64> {
    metadata
        .modified()
        .ok()
        .and_then(|mtime| mtime.duration_since(UNIX_EPOCH).ok())
        .map(|d| d.as_secs())
}

fn map_not_found(err: io::Error, container: &str, path: &str) -> StorageError {
    if err.kind() == io::ErrorKind::NotFound {
        StorageError::not_found(container, path)
    } else {
        StorageError::Io(err)
    }
}

impl ContainerBackend for FileBackend {
    fn containers(&self) -> StorageResult<Vec<String>> {
        let mut handles = Vec::new();
        for entry in fs::read_dir(&self.root)? {
            let entry = entry?;
            if entry.file_type()?.is_dir() {
                if let Some(name) = entry.file_name().to_str() {
                    handles.push(name.to_string());
                }
            }
        }
        handles.sort();
        Ok(handles)
    }

    fn list_contents(&self, container: &str) -> StorageResult<Vec<FileDescriptor>> {
        let dir = self.container_dir(container)?;
        if !dir.is_dir() {
            return Err(StorageError::ContainerNotFound(container.to_string()));
        }

        let mut listing = Vec::new();
        for entry in WalkDir::new(&dir).min_depth(1).sort_by_file_name() {
            let entry = entry.map_err(io::Error::from)?;

            let relative = match entry.path().strip_prefix(&dir) {
                Ok(r) => r.to_string_lossy().replace('\\', "/"),
                Err(_) => continue,
            };

            let metadata = entry.metadata().map_err(io::Error::from)?;
            let descriptor = if metadata.is_dir() {
                FileDescriptor::dir(relative)
            } else {
                let desc = FileDescriptor::file(relative).with_size(metadata.len());
                match timestamp(&metadata) {
                    Some(ts) => desc.with_timestamp(ts),
                    None => desc,
                }
            };
            listing.push(descriptor);
        }

        listing.sort_by(|a, b| a.path.cmp(&b.path));
        Ok(listing)
    }

    fn exists(&self, container: &str, path: &str) -> StorageResult<bool> {
        let (full, _) = self.file_path(container, path)?;
        Ok(full.is_file())
    }

    fn metadata(&self, container: &str, path: &str) -> StorageResult<FileMetadata> {
        let (full, relative) = self.file_path(container, path)?;
        let metadata = fs::metadata(&full).map_err(|e| map_not_found(e, container, &relative))?;
        if !metadata.is_file() {
            return Err(StorageError::not_found(container, relative));
        }

        Ok(FileMetadata {
            size: metadata.len(),
            timestamp: timestamp(&metadata),
        })
    }

    fn read(&self, container: &str, path: &str) -> StorageResult<Vec<u8>> {
        let (full, relative) = self.file_path(container, path)?;
        fs::read(&full).map_err(|e| map_not_found(e, container, &relative))
    }

    fn write(&self, container: &str, path: &str, data: &[u8]) -> StorageResult<()> {
        let (full, _) = self.file_path(container, path)?;
        if let Some(parent) = full.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&full, data)?;
        Ok(())
    }

    fn delete(&self, container: &str, path: &str) -> StorageResult<()> {
        let (full, relative) = self.file_path(container, path)?;
        fs::remove_file(&full).map_err(|e| map_not_found(e, container, &relative))
    }
}
