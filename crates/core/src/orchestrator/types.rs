use std::time::Duration;

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::ledger::{LedgerError, TokenId};
use crate::status::RevealState;
use crate::updater::MigrationError;

/// Result of one token's update sequence: either full success or the list
/// of per-asset-class failures. A partial failure bounds the stuck surface
/// to the named asset classes; the rest of the token is up to date.
#[derive(Debug)]
pub struct TokenUpdateOutcome {
    pub token_id: TokenId,
    /// The reveal state every updater was invoked with.
    pub state: RevealState,
    /// Failures collected across the registry, in registration order.
    pub failures: Vec<MigrationError>,
    pub completed_at: DateTime<Utc>,
}

impl TokenUpdateOutcome {
    /// Whether every registered updater completed.
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    /// The asset classes that failed.
    pub fn failed_classes(&self) -> Vec<&str> {
        self.failures.iter().map(|f| f.asset_class.as_str()).collect()
    }
}

/// Summary of a full sweep over the minted token range.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SweepReport {
    /// Size of the token range the sweep covered.
    pub tokens_seen: u64,
    /// Tokens whose every updater completed.
    pub succeeded: u64,
    /// Tokens with at least one asset-class failure.
    pub partial_failures: u64,
    /// Tokens whose update failed outright (ledger query or timeout).
    pub failed: u64,
    /// Tokens not admitted because shutdown was requested mid-sweep.
    pub skipped: u64,
    pub duration_ms: u64,
}

/// Errors failing a whole update operation (as opposed to per-asset-class
/// migration failures, which are collected in the outcome).
#[derive(Debug, Error)]
pub enum OrchestratorError {
    /// The status or range query could not complete. Not retried here; the
    /// trigger cadence retries naturally.
    #[error(transparent)]
    Ledger(#[from] LedgerError),

    /// The configured per-token timeout elapsed.
    #[error("Token update timed out after {0:?}")]
    Timeout(Duration),
}

/// Snapshot of the orchestrator's runtime state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrchestratorStatus {
    pub running: bool,
    pub registered_updaters: usize,
    pub registered_triggers: usize,
    /// Tokens with an in-flight or queued update sequence.
    pub in_flight_tokens: usize,
}
