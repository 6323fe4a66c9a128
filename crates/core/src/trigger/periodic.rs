//! Periodic full-sweep trigger.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::broadcast;
use tracing::{info, warn};

use crate::orchestrator::CollectionOrchestrator;

use super::traits::Trigger;

/// Calls `update_all_tokens()` every configured interval.
///
/// This is the eventual-consistency path: it catches any mint event the
/// real-time trigger missed and re-derives reveal status for the whole
/// range. The first sweep runs immediately on start; a tick that fires
/// while the previous sweep is still running is delayed, so sweeps never
/// stack.
pub struct PeriodicSweepTrigger {
    interval: Duration,
}

impl PeriodicSweepTrigger {
    /// Creates a trigger sweeping every `interval`.
    pub fn new(interval: Duration) -> Self {
        Self { interval }
    }

    /// Creates a trigger from a whole-seconds interval.
    pub fn every_secs(secs: u64) -> Self {
        Self::new(Duration::from_secs(secs))
    }
}

#[async_trait]
impl Trigger for PeriodicSweepTrigger {
    fn name(&self) -> &str {
        "periodic-sweep"
    }

    async fn run(
        &self,
        orchestrator: Arc<CollectionOrchestrator>,
        mut shutdown: broadcast::Receiver<()>,
    ) {
        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = shutdown.recv() => {
                    info!("Periodic sweep trigger received shutdown signal");
                    break;
                }
                _ = ticker.tick() => {
                    match orchestrator.update_all_tokens().await {
                        Ok(report) => {
                            if report.partial_failures > 0 || report.failed > 0 {
                                warn!(
                                    "Periodic sweep completed with failures: {:?}",
                                    report
                                );
                            }
                        }
                        Err(e) => warn!("Periodic sweep failed: {}", e),
                    }
                }
            }
        }
    }
}
