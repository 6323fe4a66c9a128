//! Filesystem-backed object store implementation.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use tokio::fs;
use tokio::io::AsyncWriteExt;

use super::traits::ObjectStore;
use super::types::StorageError;

/// Object store mapping keys onto files under a root directory.
///
/// Writes go through a sibling temp file followed by a rename, so readers
/// never observe a partially written object even if the process dies
/// mid-write.
pub struct FsObjectStore {
    root: PathBuf,
}

impl FsObjectStore {
    /// Creates a store rooted at the given directory.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StorageError> {
        let relative = Path::new(key);
        if key.is_empty() {
            return Err(StorageError::Backend("empty object key".to_string()));
        }
        if relative
            .components()
            .any(|c| !matches!(c, std::path::Component::Normal(_)))
        {
            return Err(StorageError::Backend(format!(
                "object key escapes the store root: {key}"
            )));
        }
        Ok(self.root.join(relative))
    }

    async fn ensure_parent(&self, path: &Path, key: &str) -> Result<(), StorageError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| StorageError::io(key, e))?;
        }
        Ok(())
    }
}

#[async_trait]
impl ObjectStore for FsObjectStore {
    async fn get(&self, key: &str) -> Result<Vec<u8>, StorageError> {
        let path = self.path_for(key)?;
        fs::read(&path).await.map_err(|e| StorageError::io(key, e))
    }

    async fn put(&self, key: &str, bytes: &[u8]) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        self.ensure_parent(&path, key).await?;

        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| key.replace('/', "_"));
        // Per-write suffix so concurrent writers of the same key never
        // share a temp file.
        static WRITE_SEQ: AtomicU64 = AtomicU64::new(0);
        let seq = WRITE_SEQ.fetch_add(1, Ordering::Relaxed);
        let tmp = path.with_file_name(format!(
            "{}.part-{}-{}",
            file_name,
            std::process::id(),
            seq
        ));

        let mut file = fs::File::create(&tmp)
            .await
            .map_err(|e| StorageError::io(key, e))?;
        file.write_all(bytes)
            .await
            .map_err(|e| StorageError::io(key, e))?;
        file.flush().await.map_err(|e| StorageError::io(key, e))?;
        drop(file);

        fs::rename(&tmp, &path)
            .await
            .map_err(|e| StorageError::io(key, e))
    }

    async fn exists(&self, key: &str) -> Result<bool, StorageError> {
        let path = self.path_for(key)?;
        fs::try_exists(&path)
            .await
            .map_err(|e| StorageError::io(key, e))
    }

    async fn delete(&self, key: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StorageError::io(key, e)),
        }
    }

    async fn copy(&self, from: &str, to: &str) -> Result<(), StorageError> {
        let source = self.path_for(from)?;
        let destination = self.path_for(to)?;
        self.ensure_parent(&destination, to).await?;
        fs::copy(&source, &destination)
            .await
            .map(|_| ())
            .map_err(|e| StorageError::io(from, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store() -> (FsObjectStore, TempDir) {
        let dir = TempDir::new().expect("Failed to create temp dir");
        (FsObjectStore::new(dir.path()), dir)
    }

    #[tokio::test]
    async fn test_put_get_roundtrip_creates_directories() {
        let (store, _dir) = store();
        store.put("private/assets/png/1.png", b"pixels").await.unwrap();
        assert_eq!(store.get("private/assets/png/1.png").await.unwrap(), b"pixels");
    }

    #[tokio::test]
    async fn test_get_missing_is_not_found() {
        let (store, _dir) = store();
        let err = store.get("nope.json").await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_exists_and_delete() {
        let (store, _dir) = store();
        store.put("a/1.glb", b"model").await.unwrap();
        assert!(store.exists("a/1.glb").await.unwrap());
        store.delete("a/1.glb").await.unwrap();
        assert!(!store.exists("a/1.glb").await.unwrap());
        // Deleting again is a no-op.
        store.delete("a/1.glb").await.unwrap();
    }

    #[tokio::test]
    async fn test_copy_to_new_prefix() {
        let (store, _dir) = store();
        store.put("private/7.png", b"img").await.unwrap();
        store.copy("private/7.png", "public/7.png").await.unwrap();
        assert_eq!(store.get("public/7.png").await.unwrap(), b"img");
        // Source is retained by copy.
        assert!(store.exists("private/7.png").await.unwrap());
    }

    #[tokio::test]
    async fn test_traversal_key_rejected() {
        let (store, _dir) = store();
        let err = store.get("../outside").await.unwrap_err();
        assert!(matches!(err, StorageError::Backend(_)));
    }

    #[tokio::test]
    async fn test_concurrent_puts_to_same_key_leave_one_intact_object() {
        let (store, _dir) = store();
        let a = vec![b'a'; 64 * 1024];
        let b = vec![b'b'; 64 * 1024];

        let (ra, rb) = tokio::join!(store.put("m/1.json", &a), store.put("m/1.json", &b));
        ra.unwrap();
        rb.unwrap();

        // Whichever rename landed last wins; the object is never a blend.
        let got = store.get("m/1.json").await.unwrap();
        assert!(got == a || got == b);
    }

    #[tokio::test]
    async fn test_put_replaces_existing_object() {
        let (store, _dir) = store();
        store.put("m/1.json", b"old").await.unwrap();
        store.put("m/1.json", b"new").await.unwrap();
        assert_eq!(store.get("m/1.json").await.unwrap(), b"new");
    }
}
