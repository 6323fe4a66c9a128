//! Trait definition for data updaters.

use async_trait::async_trait;

use crate::ledger::TokenId;
use crate::status::RevealState;

use super::error::MigrationError;

/// One idempotent migration action, scoped to one asset class.
///
/// `apply` must converge: re-invoking it after a prior success or a prior
/// partial failure ends in the same storage state without duplicating or
/// corrupting objects. An absent source object is a successful no-op rather
/// than an error, since not every token has every asset class.
#[async_trait]
pub trait DataUpdater: Send + Sync {
    /// The asset class this updater migrates (e.g. "Asset/png", "Metadata").
    fn asset_class(&self) -> &str;

    /// Brings storage for this asset class in line with the token's reveal
    /// state.
    async fn apply(&self, token_id: TokenId, state: RevealState) -> Result<(), MigrationError>;
}
