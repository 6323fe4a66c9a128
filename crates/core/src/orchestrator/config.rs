use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Orchestrator tuning knobs.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OrchestratorConfig {
    /// Upper bound on concurrently running per-token update sequences
    /// during a full sweep.
    #[serde(default = "default_max_concurrent_updates")]
    pub max_concurrent_updates: usize,

    /// Optional ceiling on a single token update (status query plus all
    /// updaters). Collaborator clients are expected to enforce their own
    /// timeouts; none is imposed here by default.
    #[serde(default)]
    pub update_timeout_secs: Option<u64>,
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            max_concurrent_updates: default_max_concurrent_updates(),
            update_timeout_secs: None,
        }
    }
}

impl OrchestratorConfig {
    /// The configured per-token timeout, if any.
    pub fn update_timeout(&self) -> Option<Duration> {
        self.update_timeout_secs.map(Duration::from_secs)
    }
}

fn default_max_concurrent_updates() -> usize {
    8
}
