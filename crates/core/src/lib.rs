//! Reveal-state synchronization engine for off-chain collection assets.
//!
//! Tokens of an on-chain collection start hidden (their public assets are
//! placeholders) and get revealed by an on-chain condition. This crate
//! reconciles object storage with that condition: a [`StatusProvider`]
//! answers whether a token is revealed, registered [`DataUpdater`]s each
//! migrate one asset class between private and public storage, and
//! [`Trigger`]s decide when tokens are evaluated, either periodically over
//! the whole range or per token as mint events arrive. The
//! [`CollectionOrchestrator`] ties them together with per-token
//! serialization and a bounded worker pool.
//!
//! There is no durable job queue: every migration action is idempotent, so
//! the next sweep or mint event is always a safe retry.

pub mod config;
pub mod ledger;
pub mod metrics;
pub mod orchestrator;
pub mod status;
pub mod storage;
pub mod testing;
pub mod trigger;
pub mod updater;

pub use config::{
    load_config, load_config_from_str, validate_config, Config, ConfigError, LedgerConfig,
    SweepConfig, UpdaterConfig,
};
pub use ledger::{Ledger, LedgerError, MintEvent, TokenId};
pub use orchestrator::{
    CollectionOrchestrator, OrchestratorConfig, OrchestratorError, OrchestratorStatus,
    SweepReport, TokenUpdateOutcome,
};
pub use status::{CollectionStatusProvider, RevealState, StatusProvider};
pub use storage::{FsObjectStore, ObjectStore, S3Config, StorageError, StorageLocator};
pub use trigger::{OnMintTrigger, PeriodicSweepTrigger, Trigger};
pub use updater::{
    create_updaters, BasicFileUpdater, DataUpdater, HiddenAction, MetadataTransform,
    MetadataUpdater, MigrationCause, MigrationError, RevealAction,
};
