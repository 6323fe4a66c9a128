//! Trait definition for the status provider.

use async_trait::async_trait;

use crate::ledger::{LedgerError, TokenId};

use super::types::RevealState;

/// Source of truth for whether a token is revealed.
///
/// Read-only and safe to query concurrently for different token ids.
/// Implementations must not cache a verdict across calls: the engine relies
/// on every `is_revealed` answer reflecting current ledger state.
#[async_trait]
pub trait StatusProvider: Send + Sync {
    /// Returns the current reveal state of the given token.
    async fn is_revealed(&self, token_id: TokenId) -> Result<RevealState, LedgerError>;
}
