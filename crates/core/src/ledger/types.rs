use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Identifier of a token within the collection.
///
/// Token ids are dense and contiguous starting at the configured
/// `start_token_id`; the upper bound is never stored locally and is
/// re-derived from the ledger's minted count at evaluation time.
pub type TokenId = u64;

/// A mint event observed on the ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MintEvent {
    /// The newly minted token id.
    pub token_id: TokenId,
    /// When the event was observed.
    pub at: DateTime<Utc>,
}

impl MintEvent {
    /// Creates a mint event observed now.
    pub fn new(token_id: TokenId) -> Self {
        Self {
            token_id,
            at: Utc::now(),
        }
    }
}

/// Errors reported by the ledger collaborator.
#[derive(Debug, Clone, Error)]
pub enum LedgerError {
    /// A state query could not complete (network error, RPC failure).
    #[error("Ledger query failed: {reason}")]
    Query { reason: String },

    /// The ledger returned a response the client could not interpret.
    #[error("Malformed ledger response: {reason}")]
    MalformedResponse { reason: String },

    /// The mint event subscription could not be established or was lost.
    #[error("Mint subscription failed: {reason}")]
    Subscribe { reason: String },
}

impl LedgerError {
    /// Creates a query error.
    pub fn query(reason: impl Into<String>) -> Self {
        Self::Query {
            reason: reason.into(),
        }
    }

    /// Creates a subscription error.
    pub fn subscribe(reason: impl Into<String>) -> Self {
        Self::Subscribe {
            reason: reason.into(),
        }
    }
}
