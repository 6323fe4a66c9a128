//! Error types for data updaters.

use thiserror::Error;

use crate::ledger::TokenId;
use crate::storage::StorageError;

/// Underlying cause of a failed migration action.
#[derive(Debug, Error)]
pub enum MigrationCause {
    /// The storage collaborator rejected or failed an operation.
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// The private metadata object was not valid JSON.
    #[error("Invalid metadata JSON: {0}")]
    InvalidMetadata(#[from] serde_json::Error),
}

/// One asset class's migration action failed for one token.
///
/// Collected by the orchestrator rather than aborting sibling updaters, so
/// a single failing asset class never blocks the rest of a token's update.
#[derive(Debug, Error)]
#[error("Migration of asset class {asset_class} failed for token {token_id}")]
pub struct MigrationError {
    /// The asset class whose action failed.
    pub asset_class: String,
    /// The token being updated.
    pub token_id: TokenId,
    /// What went wrong.
    #[source]
    pub cause: MigrationCause,
}

impl MigrationError {
    /// Creates a migration error for the given asset class and token.
    pub fn new(
        asset_class: impl Into<String>,
        token_id: TokenId,
        cause: impl Into<MigrationCause>,
    ) -> Self {
        Self {
            asset_class: asset_class.into(),
            token_id,
            cause: cause.into(),
        }
    }
}
