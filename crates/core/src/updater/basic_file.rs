//! Single-file data updater.

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::ledger::TokenId;
use crate::status::RevealState;
use crate::storage::{ObjectStore, S3Config, StorageError, StorageLocator};

use super::error::MigrationError;
use super::traits::DataUpdater;

/// What to do with the private object when a token is revealed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RevealAction {
    /// Copy the private object to the public location, keeping the source.
    #[default]
    Copy,
    /// Copy, then delete the source once the destination write confirmed.
    Move,
}

/// What to do with the public object when a token is (still or again)
/// hidden. Hide direction is deployment policy, not engine policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HiddenAction {
    /// Leave storage untouched.
    #[default]
    Ignore,
    /// Remove the public object so the placeholder shows again.
    RemovePublic,
}

/// Copies (or moves) one object per token from a private path to a public
/// one on reveal.
///
/// The simplest updater: one asset class, one fixed extension, key shape
/// `{base_path}/{token_id}{extension}` on both sides.
pub struct BasicFileUpdater {
    asset_class: String,
    store: Arc<dyn ObjectStore>,
    private: StorageLocator,
    public: StorageLocator,
    on_reveal: RevealAction,
    on_hidden: HiddenAction,
}

impl BasicFileUpdater {
    /// Creates an updater for one asset class.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        asset_class: impl Into<String>,
        store: Arc<dyn ObjectStore>,
        s3: &S3Config,
        private_path: impl AsRef<str>,
        public_path: impl AsRef<str>,
        extension: impl Into<String>,
        on_reveal: RevealAction,
        on_hidden: HiddenAction,
    ) -> Self {
        let extension = extension.into();
        Self {
            asset_class: asset_class.into(),
            store,
            private: StorageLocator::new(&s3.path_prefix, private_path, extension.clone()),
            public: StorageLocator::new(&s3.path_prefix, public_path, extension),
            on_reveal,
            on_hidden,
        }
    }

    fn err(&self, token_id: TokenId, cause: StorageError) -> MigrationError {
        MigrationError::new(&self.asset_class, token_id, cause)
    }

    async fn reveal(&self, token_id: TokenId) -> Result<(), MigrationError> {
        let source = self.private.key_for(token_id);
        let destination = self.public.key_for(token_id);

        if self
            .store
            .exists(&destination)
            .await
            .map_err(|e| self.err(token_id, e))?
        {
            // A prior attempt may have published the object and then failed
            // to remove the source; finish the move before declaring success.
            if self.on_reveal == RevealAction::Move {
                self.store
                    .delete(&source)
                    .await
                    .map_err(|e| self.err(token_id, e))?;
            }
            debug!(
                "{}: token {} already public, nothing to do",
                self.asset_class, token_id
            );
            return Ok(());
        }

        if !self
            .store
            .exists(&source)
            .await
            .map_err(|e| self.err(token_id, e))?
        {
            debug!(
                "{}: token {} has no private object, skipping",
                self.asset_class, token_id
            );
            return Ok(());
        }

        self.store
            .copy(&source, &destination)
            .await
            .map_err(|e| self.err(token_id, e))?;
        debug!(
            "{}: published token {} to {}",
            self.asset_class, token_id, destination
        );

        if self.on_reveal == RevealAction::Move {
            // Source removal only after the destination write confirmed.
            self.store
                .delete(&source)
                .await
                .map_err(|e| self.err(token_id, e))?;
        }

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
impl DataUpdater for BasicFileUpdater {
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
