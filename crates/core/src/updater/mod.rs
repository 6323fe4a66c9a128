//! Data updater capability.
//!
//! A data updater performs one idempotent migration action for one asset
//! class: moving or transforming a token's object between the private and
//! public sides of the bucket. "What changes" lives here; "when" is the
//! triggers' business and "whether" the status provider's.

mod basic_file;
mod error;
mod metadata;
mod traits;

use std::sync::Arc;

use crate::config::UpdaterConfig;
use crate::storage::{ObjectStore, S3Config};

pub use basic_file::{BasicFileUpdater, HiddenAction, RevealAction};
pub use error::{MigrationCause, MigrationError};
pub use metadata::{MetadataTransform, MetadataUpdater};
pub use traits::DataUpdater;

/// Builds the updater registry described by configuration, in declaration
/// order.
pub fn create_updaters(
    configs: &[UpdaterConfig],
    s3: &S3Config,
    store: Arc<dyn ObjectStore>,
) -> Vec<Arc<dyn DataUpdater>> {
    configs
        .iter()
        .map(|config| match config {
            UpdaterConfig::BasicFile {
                asset_class,
                private_path,
                public_path,
                extension,
                on_reveal,
                on_hidden,
            } => Arc::new(BasicFileUpdater::new(
                asset_class.clone(),
                Arc::clone(&store),
                s3,
                private_path,
                public_path,
                extension.clone(),
                *on_reveal,
                *on_hidden,
            )) as Arc<dyn DataUpdater>,
            UpdaterConfig::Metadata {
                asset_class,
                private_path,
                public_path,
                public_image_uri_template,
                on_hidden,
            } => {
                let updater = MetadataUpdater::new(
                    asset_class.clone(),
                    Arc::clone(&store),
                    s3,
                    private_path,
                    public_path,
                    MetadataUpdater::image_uri_transform(public_image_uri_template.clone()),
                )
                .with_hidden_action(*on_hidden);
                Arc::new(updater) as Arc<dyn DataUpdater>
            }
        })
        .collect()
}
