//! Mock ledger for testing.

use std::collections::{BTreeSet, HashSet};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use tokio::sync::mpsc;

use crate::ledger::{Ledger, LedgerError, MintEvent, TokenId};

type EventItem = Result<MintEvent, LedgerError>;

/// Mock implementation of the Ledger trait.
///
/// Provides controllable behavior for testing:
/// - Script which tokens are minted and which are revealed
/// - Push mint events (well-formed or malformed) to subscribers
/// - Simulate query and subscription failures
pub struct MockLedger {
    minted: Mutex<BTreeSet<TokenId>>,
    revealed: Mutex<HashSet<TokenId>>,
    fail_queries: AtomicBool,
    reveal_queries: AtomicUsize,
    subscribe_failures: AtomicUsize,
    subscribe_count: AtomicUsize,
    subscribers: Mutex<Vec<mpsc::Sender<EventItem>>>,
}

impl Default for MockLedger {
    fn default() -> Self {
        Self::new()
    }
}

impl MockLedger {
    /// Create a new mock ledger with nothing minted.
    pub fn new() -> Self {
        Self {
            minted: Mutex::new(BTreeSet::new()),
            revealed: Mutex::new(HashSet::new()),
            fail_queries: AtomicBool::new(false),
            reveal_queries: AtomicUsize::new(0),
            subscribe_failures: AtomicUsize::new(0),
            subscribe_count: AtomicUsize::new(0),
            subscribers: Mutex::new(Vec::new()),
        }
    }

    /// Mint a token and emit the event to all live subscribers.
    pub async fn mint(&self, token_id: TokenId) {
        self.minted.lock().unwrap().insert(token_id);
        self.emit(Ok(MintEvent::new(token_id))).await;
    }

    /// Push a malformed event to all live subscribers.
    pub async fn push_malformed_event(&self) {
        self.emit(Err(LedgerError::MalformedResponse {
            reason: "unparseable log entry".to_string(),
        }))
        .await;
    }

    async fn emit(&self, item: EventItem) {
        let senders: Vec<_> = self.subscribers.lock().unwrap().clone();
        for sender in senders {
            // A full or closed channel just drops the event, like a real
            // subscription whose consumer went away.
            let _ = sender.send(item.clone()).await;
        }
    }

    /// Mark a token revealed or hidden.
    pub fn set_revealed(&self, token_id: TokenId, revealed: bool) {
        let mut set = self.revealed.lock().unwrap();
        if revealed {
            set.insert(token_id);
        } else {
            set.remove(&token_id);
        }
    }

    /// Make every state query fail until reset.
    pub fn set_fail_queries(&self, fail: bool) {
        self.fail_queries.store(fail, Ordering::SeqCst);
    }

    /// Make the next `n` subscription attempts fail.
    pub fn fail_next_subscribes(&self, n: usize) {
        self.subscribe_failures.store(n, Ordering::SeqCst);
    }

    /// Close every live subscription (simulates stream loss).
    pub fn drop_subscriptions(&self) {
        self.subscribers.lock().unwrap().clear();
    }

    /// Number of reveal-state queries served or failed.
    pub fn reveal_queries(&self) -> usize {
        self.reveal_queries.load(Ordering::SeqCst)
    }

    /// Number of subscription attempts made.
    pub fn subscribe_count(&self) -> usize {
        self.subscribe_count.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Ledger for MockLedger {
    async fn is_token_revealed(&self, token_id: TokenId) -> Result<bool, LedgerError> {
        self.reveal_queries.fetch_add(1, Ordering::SeqCst);
        if self.fail_queries.load(Ordering::SeqCst) {
            return Err(LedgerError::query("mock ledger unavailable"));
        }
        if !self.minted.lock().unwrap().contains(&token_id) {
            return Err(LedgerError::query(format!(
                "token {token_id} has not been minted"
            )));
        }
        Ok(self.revealed.lock().unwrap().contains(&token_id))
    }

    async fn minted_count(&self) -> Result<u64, LedgerError> {
        if self.fail_queries.load(Ordering::SeqCst) {
            return Err(LedgerError::query("mock ledger unavailable"));
        }
        Ok(self.minted.lock().unwrap().len() as u64)
    }

    async fn subscribe_mints(
        &self,
    ) -> Result<mpsc::Receiver<EventItem>, LedgerError> {
        self.subscribe_count.fetch_add(1, Ordering::SeqCst);

        let remaining = self.subscribe_failures.load(Ordering::SeqCst);
        if remaining > 0 {
            self.subscribe_failures.store(remaining - 1, Ordering::SeqCst);
            return Err(LedgerError::subscribe("mock event endpoint unavailable"));
        }

        let (tx, rx) = mpsc::channel(64);
        self.subscribers.lock().unwrap().push(tx);
        Ok(rx)
    }
}
