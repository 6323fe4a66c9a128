//! Recording data updater for testing.

use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use crate::ledger::TokenId;
use crate::status::RevealState;
use crate::storage::StorageError;
use crate::updater::{DataUpdater, MigrationError};

/// Mock implementation of the DataUpdater trait.
///
/// Records every `apply` invocation, can fail for scripted tokens with a
/// permission error, and can sleep inside `apply` to widen race windows.
/// Tracks the peak number of concurrently running `apply` calls for
/// serialization and worker-pool assertions.
pub struct RecordingUpdater {
    asset_class: String,
    calls: Mutex<Vec<(TokenId, RevealState)>>,
    fail_tokens: Mutex<HashSet<TokenId>>,
    delay: Mutex<Option<Duration>>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl RecordingUpdater {
    /// Create a recording updater for the given asset class.
    pub fn new(asset_class: impl Into<String>) -> Self {
        Self {
            asset_class: asset_class.into(),
            calls: Mutex::new(Vec::new()),
            fail_tokens: Mutex::new(HashSet::new()),
            delay: Mutex::new(None),
            in_flight: AtomicUsize::new(0),
            max_in_flight: AtomicUsize::new(0),
        }
    }

    /// Make `apply` fail for the given token with a permission error.
    pub fn fail_for_token(&self, token_id: TokenId) {
        self.fail_tokens.lock().unwrap().insert(token_id);
    }

    /// Make every `apply` sleep for the given duration.
    pub fn set_delay(&self, delay: Duration) {
        *self.delay.lock().unwrap() = Some(delay);
    }

    /// All recorded `(token_id, state)` invocations, in order.
    pub fn calls(&self) -> Vec<(TokenId, RevealState)> {
        self.calls.lock().unwrap().clone()
    }

    /// Number of recorded invocations.
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// Recorded invocations for one token.
    pub fn calls_for(&self, token_id: TokenId) -> Vec<RevealState> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|(id, _)| *id == token_id)
            .map(|(_, state)| *state)
            .collect()
    }

    /// Peak number of concurrently running `apply` calls observed.
    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DataUpdater for RecordingUpdater {
    fn asset_class(&self) -> &str {
        &self.asset_class
    }

    async fn apply(&self, token_id: TokenId, state: RevealState) -> Result<(), MigrationError> {
        let running = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(running, Ordering::SeqCst);

        let delay = *self.delay.lock().unwrap();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        self.calls.lock().unwrap().push((token_id, state));
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        if self.fail_tokens.lock().unwrap().contains(&token_id) {
            return Err(MigrationError::new(
                &self.asset_class,
                token_id,
                StorageError::permission_denied(format!("mock://{token_id}")),
            ));
        }
        Ok(())
    }
}
