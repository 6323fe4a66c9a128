//! Trait definition for the ledger collaborator.

use async_trait::async_trait;
use tokio::sync::mpsc;

use super::types::{LedgerError, MintEvent, TokenId};

/// Read access to reveal-relevant on-chain state.
///
/// Implementations wrap a specific chain client; the engine only depends on
/// this interface. All methods must be safe to call concurrently.
#[async_trait]
pub trait Ledger: Send + Sync {
    /// Returns whether the ledger-exposed reveal condition holds for the
    /// given token id (e.g. a reveal block has passed, or a per-token flag
    /// is set).
    async fn is_token_revealed(&self, token_id: TokenId) -> Result<bool, LedgerError>;

    /// Returns the total number of minted tokens.
    ///
    /// Together with the configured start token id this bounds the token
    /// range for a full sweep.
    async fn minted_count(&self) -> Result<u64, LedgerError>;

    /// Subscribes to mint events.
    ///
    /// Events the client could not fully parse arrive as `Err` items so a
    /// single malformed event never tears down the stream. The channel
    /// closing means the subscription itself was lost and the caller should
    /// resubscribe.
    async fn subscribe_mints(
        &self,
    ) -> Result<mpsc::Receiver<Result<MintEvent, LedgerError>>, LedgerError>;
}
