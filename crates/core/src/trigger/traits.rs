//! Trait definition for triggers.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::broadcast;

use crate::orchestrator::CollectionOrchestrator;

/// A source of update events driving the orchestrator.
///
/// `run` loops until a shutdown signal arrives on the receiver; it is
/// spawned by [`CollectionOrchestrator::start`]. A trigger returns nothing
/// to its caller; its only effects flow through the orchestrator's entry
/// points.
#[async_trait]
pub trait Trigger: Send + Sync {
    /// Name used in logs.
    fn name(&self) -> &str;

    /// Runs the trigger's schedule until shutdown.
    async fn run(
        &self,
        orchestrator: Arc<CollectionOrchestrator>,
        shutdown: broadcast::Receiver<()>,
    );
}
