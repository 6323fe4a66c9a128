use serde::{Deserialize, Serialize};

use crate::orchestrator::OrchestratorConfig;
use crate::storage::S3Config;
use crate::updater::{HiddenAction, RevealAction};

/// Root configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub ledger: LedgerConfig,
    pub storage: S3Config,
    #[serde(default)]
    pub updaters: Vec<UpdaterConfig>,
    #[serde(default)]
    pub sweep: SweepConfig,
    #[serde(default)]
    pub orchestrator: OrchestratorConfig,
}

/// Ledger collaborator configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LedgerConfig {
    /// Address of the collection contract.
    pub contract_address: String,
    /// RPC endpoint the ledger client connects to.
    pub rpc_endpoint: String,
    /// First token id of the collection (offset for local/on-chain id
    /// translation).
    #[serde(default = "default_start_token_id")]
    pub start_token_id: u64,
}

/// Periodic full-sweep configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SweepConfig {
    /// Whether the periodic sweep trigger is registered at all.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Seconds between full sweeps. Lower means faster reconciliation and
    /// more ledger/storage load.
    #[serde(default = "default_sweep_interval_secs")]
    pub interval_secs: u64,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            interval_secs: default_sweep_interval_secs(),
        }
    }
}

/// One registered data updater.
///
/// Declaration order is registration order.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum UpdaterConfig {
    /// A single-file asset class copied/moved between private and public
    /// paths.
    BasicFile {
        asset_class: String,
        private_path: String,
        public_path: String,
        extension: String,
        #[serde(default)]
        on_reveal: RevealAction,
        #[serde(default)]
        on_hidden: HiddenAction,
    },
    /// JSON metadata rewritten with the public image URI on reveal.
    Metadata {
        #[serde(default = "default_metadata_class")]
        asset_class: String,
        private_path: String,
        public_path: String,
        /// Public asset URI with a `{{TOKEN_ID}}` placeholder.
        public_image_uri_template: String,
        #[serde(default)]
        on_hidden: HiddenAction,
    },
}

impl UpdaterConfig {
    /// The asset class this updater is registered under.
    pub fn asset_class(&self) -> &str {
        match self {
            Self::BasicFile { asset_class, .. } => asset_class,
            Self::Metadata { asset_class, .. } => asset_class,
        }
    }

    /// Private and public base paths.
    pub fn paths(&self) -> (&str, &str) {
        match self {
            Self::BasicFile {
                private_path,
                public_path,
                ..
            } => (private_path, public_path),
            Self::Metadata {
                private_path,
                public_path,
                ..
            } => (private_path, public_path),
        }
    }
}

fn default_start_token_id() -> u64 {
    1
}

fn default_sweep_interval_secs() -> u64 {
    300
}

fn default_metadata_class() -> String {
    "Metadata".to_string()
}

fn default_true() -> bool {
    true
}
