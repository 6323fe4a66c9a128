//! In-memory object store for testing.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::storage::{ObjectStore, StorageError};

/// Mock implementation of the ObjectStore trait.
///
/// Keeps objects in a map and records writes per key, with per-key
/// permission-denied injection for failure tests.
#[derive(Default)]
pub struct MemoryObjectStore {
    objects: Mutex<HashMap<String, Vec<u8>>>,
    denied: Mutex<HashSet<String>>,
    put_counts: Mutex<HashMap<String, usize>>,
}

impl MemoryObjectStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Deny every operation touching the given key.
    pub fn deny(&self, key: impl Into<String>) {
        self.denied.lock().unwrap().insert(key.into());
    }

    /// Lift a previous denial.
    pub fn allow(&self, key: &str) {
        self.denied.lock().unwrap().remove(key);
    }

    /// Number of writes the given key has received.
    pub fn put_count(&self, key: &str) -> usize {
        self.put_counts.lock().unwrap().get(key).copied().unwrap_or(0)
    }

    /// All keys currently present, sorted.
    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<_> = self.objects.lock().unwrap().keys().cloned().collect();
        keys.sort();
        keys
    }

    fn check_denied(&self, key: &str) -> Result<(), StorageError> {
        if self.denied.lock().unwrap().contains(key) {
            return Err(StorageError::permission_denied(key));
        }
        Ok(())
    }
}

#[async_trait]
impl ObjectStore for MemoryObjectStore {
    async fn get(&self, key: &str) -> Result<Vec<u8>, StorageError> {
        self.check_denied(key)?;
        self.objects
            .lock()
            .unwrap()
            .get(key)
            .cloned()
            .ok_or_else(|| StorageError::not_found(key))
    }

    async fn put(&self, key: &str, bytes: &[u8]) -> Result<(), StorageError> {
        self.check_denied(key)?;
        self.objects
            .lock()
            .unwrap()
            .insert(key.to_string(), bytes.to_vec());
        *self
            .put_counts
            .lock()
            .unwrap()
            .entry(key.to_string())
            .or_insert(0) += 1;
        Ok(())
    }

    async fn exists(&self, key: &str) -> Result<bool, StorageError> {
        self.check_denied(key)?;
        Ok(self.objects.lock().unwrap().contains_key(key))
    }

    async fn delete(&self, key: &str) -> Result<(), StorageError> {
        self.check_denied(key)?;
        self.objects.lock().unwrap().remove(key);
        Ok(())
    }

    async fn copy(&self, from: &str, to: &str) -> Result<(), StorageError> {
        self.check_denied(from)?;
        self.check_denied(to)?;
        let bytes = {
            let objects = self.objects.lock().unwrap();
            objects
                .get(from)
                .cloned()
                .ok_or_else(|| StorageError::not_found(from))?
        };
        self.put(to, &bytes).await
    }
}
