//! Reconciliation orchestrator.
//!
//! Owns the status provider and the registered data updaters and triggers,
//! and exposes the two update entry points:
//! - `update_token(id)`: evaluate one token, per-token serialized
//! - `update_all_tokens()`: full sweep over the minted range, bounded by a
//!   worker-pool limit

mod config;
mod runner;
mod token_locks;
mod types;

pub use config::OrchestratorConfig;
pub use runner::CollectionOrchestrator;
pub use token_locks::{TokenGuard, TokenLocks};
pub use types::{OrchestratorError, OrchestratorStatus, SweepReport, TokenUpdateOutcome};
