//! Ledger-backed status provider.

use std::sync::Arc;

use async_trait::async_trait;

use crate::ledger::{Ledger, LedgerError, TokenId};

use super::traits::StatusProvider;
use super::types::RevealState;

/// Status provider deriving reveal state from the ledger condition.
///
/// The collection's token ids start at `start_token_id`; an id below that
/// offset cannot belong to the collection and fails the query outright
/// rather than reaching the ledger.
pub struct CollectionStatusProvider {
    ledger: Arc<dyn Ledger>,
    start_token_id: TokenId,
}

impl CollectionStatusProvider {
    /// Creates a provider for a collection starting at the given token id.
    pub fn new(ledger: Arc<dyn Ledger>, start_token_id: TokenId) -> Self {
        Self {
            ledger,
            start_token_id,
        }
    }

    /// The first token id of the collection.
    pub fn start_token_id(&self) -> TokenId {
        self.start_token_id
    }
}

#[async_trait]
impl StatusProvider for CollectionStatusProvider {
    async fn is_revealed(&self, token_id: TokenId) -> Result<RevealState, LedgerError> {
        if token_id < self.start_token_id {
            return Err(LedgerError::query(format!(
                "token id {} is below the collection start id {}",
                token_id, self.start_token_id
            )));
        }

        let revealed = self.ledger.is_token_revealed(token_id).await?;
        Ok(RevealState::from(revealed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockLedger;

    #[tokio::test]
    async fn test_reveal_state_follows_ledger_condition() {
        let ledger = Arc::new(MockLedger::new());
        ledger.mint(1).await;
        ledger.mint(2).await;
        ledger.set_revealed(2, true);

        let provider = CollectionStatusProvider::new(ledger, 1);
        assert_eq!(provider.is_revealed(1).await.unwrap(), RevealState::Hidden);
        assert_eq!(provider.is_revealed(2).await.unwrap(), RevealState::Revealed);
    }

    #[tokio::test]
    async fn test_token_below_start_id_fails_without_ledger_query() {
        let ledger = Arc::new(MockLedger::new());
        let provider = CollectionStatusProvider::new(Arc::clone(&ledger) as Arc<dyn Ledger>, 10);

        let err = provider.is_revealed(3).await.unwrap_err();
        assert!(matches!(err, LedgerError::Query { .. }));
        assert_eq!(ledger.reveal_queries(), 0);
    }

    #[tokio::test]
    async fn test_never_minted_token_is_a_ledger_error() {
        let ledger = Arc::new(MockLedger::new());
        ledger.mint(1).await;

        let provider = CollectionStatusProvider::new(ledger, 1);
        let err = provider.is_revealed(99).await.unwrap_err();
        assert!(matches!(err, LedgerError::Query { .. }));
    }
}
