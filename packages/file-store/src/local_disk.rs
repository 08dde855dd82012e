use std::path::{Component, Path, PathBuf};
use std::{fs, io};

use async_trait::async_trait;

use crate::{KeyValueStore, Result, StoreError};

/// A store that keeps each record in its own file under a root directory.
///
/// The key `repl/history` maps to `<root>/repl/history`. Parent directories
/// are created on write.
#[derive(Debug, Clone)]
pub struct LocalDiskStore {
    root: PathBuf,
}

impl LocalDiskStore {
    /// Open a store rooted at an existing, writable directory.
    pub fn new(root: PathBuf) -> Result<LocalDiskStore> {
        let attr = fs::metadata(&root).map_err(|error| StoreError::RootPathInvalid {
            path: root.clone(),
            error,
        })?;

        if !attr.is_dir() {
            return Err(StoreError::RootPathInvalid {
                path: root,
                error: io::Error::other("Root path must be a directory."),
            });
        }

        if attr.permissions().readonly() {
            return Err(StoreError::RootPathInvalid {
                path: root,
                error: io::Error::other("Root directory must be writable"),
            });
        }

        match root.canonicalize() {
            Ok(root) => Ok(LocalDiskStore { root }),
            Err(error) => Err(StoreError::RootPathInvalid { path: root, error }),
        }
    }

    /// Open a store rooted at `root`, creating the directory if needed.
    pub fn create(root: PathBuf) -> Result<LocalDiskStore> {
        fs::create_dir_all(&root).map_err(|error| StoreError::RootPathInvalid {
            path: root.clone(),
            error,
        })?;
        Self::new(root)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn key_to_file_path(&self, key: &str) -> Result<PathBuf> {
        let invalid = |message: &str| StoreError::InvalidKey {
            key: key.to_string(),
            message: message.to_string(),
        };

        let mut file_path = self.root.clone();
        for component in key.split('/') {
            match Path::new(component).components().next() {
                _ if component.is_empty() => return Err(invalid("empty component")),
                Some(Component::Normal(normal)) if normal == component => {
                    file_path.push(normal);
                }
                Some(Component::ParentDir) => {
                    return Err(invalid("parent components are not allowed"))
                }
                _ => return Err(invalid("component must be a plain file name")),
            }
        }

        Ok(file_path)
    }
}

#[async_trait]
impl KeyValueStore for LocalDiskStore {
    async fn get(&mut self, key: &str) -> Result<Option<String>> {
        let file_path = self.key_to_file_path(key)?;
        tracing::debug!("Reading {}...", file_path.display());

        match tokio::fs::read_to_string(&file_path).await {
            Ok(text) => Ok(Some(text)),
            Err(source) if source.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StoreError::Io {
                key: key.to_string(),
                source,
            }),
        }
    }

    async fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let file_path = self.key_to_file_path(key)?;
        tracing::debug!("Writing {}...", file_path.display());

        let io_error = |source| StoreError::Io {
            key: key.to_string(),
            source,
        };

        if let Some(parent) = file_path.parent() {
            tokio::fs::create_dir_all(parent).await.map_err(io_error)?;
        }
        tokio::fs::write(&file_path, value).await.map_err(io_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store() -> (TempDir, LocalDiskStore) {
        let dir = TempDir::new().unwrap();
        let store = LocalDiskStore::new(dir.path().to_path_buf()).unwrap();
        (dir, store)
    }

    #[test]
    fn new_rejects_missing_root() {
        let dir = TempDir::new().unwrap();
        let result = LocalDiskStore::new(dir.path().join("missing"));
        assert!(matches!(result, Err(StoreError::RootPathInvalid { .. })));
    }

    #[test]
    fn new_rejects_file_root() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("file");
        fs::write(&file, "x").unwrap();
        let result = LocalDiskStore::new(file);
        assert!(matches!(result, Err(StoreError::RootPathInvalid { .. })));
    }

    #[test]
    fn create_makes_root() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().join("data").join("stanza");
        let store = LocalDiskStore::create(root.clone()).unwrap();
        assert!(root.is_dir());
        assert_eq!(store.root(), root.canonicalize().unwrap());
    }

    #[tokio::test]
    async fn missing_key_reads_none() {
        let (_dir, mut store) = store();
        assert!(store.get("repl/history").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn set_creates_nested_file() {
        let (dir, mut store) = store();
        store.set("repl/history", "c\nb\na\n").await.unwrap();

        let on_disk = fs::read_to_string(dir.path().join("repl").join("history")).unwrap();
        assert_eq!(on_disk, "c\nb\na\n");
        assert_eq!(
            store.get("repl/history").await.unwrap().as_deref(),
            Some("c\nb\na\n")
        );
    }

    #[tokio::test]
    async fn set_overwrites() {
        let (_dir, mut store) = store();
        store.set("k", "first").await.unwrap();
        store.set("k", "second").await.unwrap();
        assert_eq!(store.get("k").await.unwrap().as_deref(), Some("second"));
    }

    #[tokio::test]
    async fn rejects_escaping_keys() {
        let (_dir, mut store) = store();
        for key in ["", "../x", "a//b", "/abs", "a/./b", "a/.."] {
            let result = store.set(key, "v").await;
            assert!(
                matches!(result, Err(StoreError::InvalidKey { .. })),
                "key {key:?} should be rejected"
            );
        }
    }
}
