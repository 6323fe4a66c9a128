//! Token metadata data updater.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

use crate::ledger::TokenId;
use crate::status::RevealState;
use crate::storage::{ObjectStore, S3Config, StorageError, StorageLocator};

use super::basic_file::HiddenAction;
use super::error::MigrationError;
use super::traits::DataUpdater;

/// Pure transform applied to a token's deserialized metadata on reveal.
///
/// Supplied by the deployment; the engine guarantees it receives the
/// correctly-typed token id and the parsed JSON document, and that the
/// returned document is serialized verbatim to the public location.
pub type MetadataTransform = Arc<dyn Fn(TokenId, Value) -> Value + Send + Sync>;

/// Reads a token's private JSON metadata, applies a transform and writes
/// the result to the public metadata path.
///
/// Unlike [`super::BasicFileUpdater`] the destination is rewritten on every
/// reveal: the transform is deterministic over the source document, so
/// re-running converges, and edits to the private metadata propagate on the
/// next sweep.
pub struct MetadataUpdater {
    asset_class: String,
    store: Arc<dyn ObjectStore>,
    private: StorageLocator,
    public: StorageLocator,
    transform: MetadataTransform,
    on_hidden: HiddenAction,
}

impl MetadataUpdater {
    /// Creates a metadata updater with the given transform.
    pub fn new(
        asset_class: impl Into<String>,
        store: Arc<dyn ObjectStore>,
        s3: &S3Config,
        private_path: impl AsRef<str>,
        public_path: impl AsRef<str>,
        transform: MetadataTransform,
    ) -> Self {
        Self {
            asset_class: asset_class.into(),
            store,
            private: StorageLocator::new(&s3.path_prefix, private_path, ".json"),
            public: StorageLocator::new(&s3.path_prefix, public_path, ".json"),
            transform,
            on_hidden: HiddenAction::default(),
        }
    }

    /// Sets the policy for tokens reported hidden.
    pub fn with_hidden_action(mut self, on_hidden: HiddenAction) -> Self {
        self.on_hidden = on_hidden;
        self
    }

    /// Transform rewriting the metadata `image` field to a public URI
    /// template with `{{TOKEN_ID}}` substituted by the token id.
    ///
    /// This is the transform virtually every deployment wants; custom ones
    /// can be passed to [`MetadataUpdater::new`] directly.
    pub fn image_uri_transform(template: impl Into<String>) -> MetadataTransform {
        let template = template.into();
        Arc::new(move |token_id, mut metadata| {
            metadata["image"] =
                Value::String(template.replace("{{TOKEN_ID}}", &token_id.to_string()));
            metadata
        })
    }

    fn err(&self, token_id: TokenId, cause: StorageError) -> MigrationError {
        MigrationError::new(&self.asset_class, token_id, cause)
    }

    async fn reveal(&self, token_id: TokenId) -> Result<(), MigrationError> {
        let source = self.private.key_for(token_id);
        let destination = self.public.key_for(token_id);

        let raw = match self.store.get(&source).await {
            Ok(raw) => raw,
            Err(e) if e.is_not_found() => {
                debug!(
                    "{}: token {} has no private metadata, skipping",
                    self.asset_class, token_id
                );
                return Ok(());
            }
            Err(e) => return Err(self.err(token_id, e)),
        };

        let metadata: Value = serde_json::from_slice(&raw)
            .map_err(|e| MigrationError::new(&self.asset_class, token_id, e))?;
        let transformed = (self.transform)(token_id, metadata);
        let serialized = serde_json::to_vec(&transformed)
            .map_err(|e| MigrationError::new(&self.asset_class, token_id, e))?;

        self.store
            .put(&destination, &serialized)
            .await
            .map_err(|e| self.err(token_id, e))?;
        debug!(
            "{}: published metadata for token {} to {}",
            self.asset_class, token_id, destination
        );
        Ok(())
    }

    async fn hide(&self, token_id: TokenId) -> Result<(), MigrationError> {
        match self.on_hidden {
            HiddenAction::Ignore => Ok(()),
            HiddenAction::RemovePublic => {
                let destination = self.public.key_for(token_id);
                self.store
                    .delete(&destination)
                    .await
                    .map_err(|e| self.err(token_id, e))
            }
        }
    }
}

#[async_trait]
impl DataUpdater for MetadataUpdater {
    fn asset_class(&self) -> &str {
        &self.asset_class
    }

    async fn apply(&self, token_id: TokenId, state: RevealState) -> Result<(), MigrationError> {
        match state {
            RevealState::Revealed => self.reveal(token_id).await,
            RevealState::Hidden => self.hide(token_id).await,
        }
    }
}
