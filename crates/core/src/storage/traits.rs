//! Trait definition for object stores.

use async_trait::async_trait;

use super::types::StorageError;

/// Key/value object storage scoped to one bucket.
///
/// Keys are bucket-relative paths. All operations must be safe to call
/// concurrently; writes must be atomic at the object level (readers never
/// observe a half-written object).
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Reads the full contents of an object.
    async fn get(&self, key: &str) -> Result<Vec<u8>, StorageError>;

    /// Writes an object, replacing any existing one at the same key.
    async fn put(&self, key: &str, bytes: &[u8]) -> Result<(), StorageError>;

    /// Returns whether an object exists at the given key.
    async fn exists(&self, key: &str) -> Result<bool, StorageError>;

    /// Deletes an object. Deleting an absent object succeeds, so deletes
    /// can be re-run safely.
    async fn delete(&self, key: &str) -> Result<(), StorageError>;

    /// Copies an object to a new key, replacing any existing destination.
    async fn copy(&self, from: &str, to: &str) -> Result<(), StorageError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MemoryObjectStore;

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let store = MemoryObjectStore::new();
        store.put("a", b"1").await.unwrap();
        store.delete("a").await.unwrap();
        store.delete("a").await.unwrap();
        assert!(!store.exists("a").await.unwrap());
    }

    #[tokio::test]
    async fn test_copy_replaces_destination() {
        let store = MemoryObjectStore::new();
        store.put("src", b"new").await.unwrap();
        store.put("dst", b"old").await.unwrap();
        store.copy("src", "dst").await.unwrap();
        assert_eq!(store.get("dst").await.unwrap(), b"new");
    }
}
