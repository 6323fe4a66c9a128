//! Per-token mutual exclusion.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

use crate::ledger::TokenId;

/// Concurrency-safe map of token id to an in-progress marker.
///
/// Exactly one update sequence may hold a token's lock at a time; further
/// acquirers queue and are served in turn rather than coalesced, so every
/// caller's intent is eventually honored. Entries are created on first use
/// and removed when the last interested caller releases, keeping the map
/// bounded as the token range grows.
#[derive(Default)]
pub struct TokenLocks {
    inner: Mutex<HashMap<TokenId, Arc<AsyncMutex<()>>>>,
}

impl TokenLocks {
    /// Creates an empty lock map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Acquires exclusive access for the given token, waiting behind any
    /// in-flight holder.
    pub async fn acquire(&self, token_id: TokenId) -> TokenGuard<'_> {
        let lock = {
            let mut map = self.inner.lock().expect("token lock map poisoned");
            Arc::clone(map.entry(token_id).or_default())
        };
        let guard = lock.lock_owned().await;
        TokenGuard {
            locks: self,
            token_id,
            guard: Some(guard),
        }
    }

    /// Number of tokens with an in-flight or queued update.
    pub fn len(&self) -> usize {
        self.inner.lock().expect("token lock map poisoned").len()
    }

    /// Whether no token currently has an in-flight or queued update.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Held for the duration of one token's update sequence.
pub struct TokenGuard<'a> {
    locks: &'a TokenLocks,
    token_id: TokenId,
    guard: Option<OwnedMutexGuard<()>>,
}

impl Drop for TokenGuard<'_> {
    fn drop(&mut self) {
        let mut map = self
            .locks
            .inner
            .lock()
            .expect("token lock map poisoned");
        // Release under the map lock, then drop the entry unless a queued
        // waiter still holds a clone of it.
        self.guard.take();
        if let Some(entry) = map.get(&self.token_id) {
            if Arc::strong_count(entry) == 1 {
                map.remove(&self.token_id);
            }
        }
    }
}
