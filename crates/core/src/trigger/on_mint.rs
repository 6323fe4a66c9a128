//! On-mint trigger.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::broadcast;
use tracing::{debug, info, warn};

use crate::ledger::Ledger;
use crate::metrics;
use crate::orchestrator::CollectionOrchestrator;

use super::traits::Trigger;

const INITIAL_BACKOFF: Duration = Duration::from_secs(1);
const MAX_BACKOFF: Duration = Duration::from_secs(60);

/// Subscribes to the ledger's mint event stream and updates each newly
/// minted token as its event arrives.
///
/// The subscription is supervised: on subscribe failure or stream loss the
/// trigger retries with exponential backoff (reset once events flow again)
/// and never propagates the problem further. A lost subscription costs
/// reconciliation latency, not correctness, since the periodic sweep
/// re-derives everything. A malformed event is logged and skipped.
pub struct OnMintTrigger {
    ledger: Arc<dyn Ledger>,
    initial_backoff: Duration,
    max_backoff: Duration,
}

impl OnMintTrigger {
    /// Creates a trigger subscribed to the given ledger.
    pub fn new(ledger: Arc<dyn Ledger>) -> Self {
        Self {
            ledger,
            initial_backoff: INITIAL_BACKOFF,
            max_backoff: MAX_BACKOFF,
        }
    }

    /// Overrides the reconnect backoff bounds (mostly for tests).
    pub fn with_backoff(mut self, initial: Duration, max: Duration) -> Self {
        self.initial_backoff = initial;
        self.max_backoff = max;
        self
    }

    /// Sleeps for the current backoff, or returns true if shutdown arrived
    /// first.
    async fn backoff_or_shutdown(
        &self,
        backoff: Duration,
        shutdown: &mut broadcast::Receiver<()>,
    ) -> bool {
        tokio::select! {
            _ = shutdown.recv() => true,
            _ = tokio::time::sleep(backoff) => false,
        }
    }
}

#[async_trait]
impl Trigger for OnMintTrigger {
    fn name(&self) -> &str {
        "on-mint"
    }

    async fn run(
        &self,
        orchestrator: Arc<CollectionOrchestrator>,
        mut shutdown: broadcast::Receiver<()>,
    ) {
        let mut backoff = self.initial_backoff;

        loop {
            let mut events = tokio::select! {
                _ = shutdown.recv() => {
                    info!("On-mint trigger received shutdown signal");
                    return;
                }
                subscribed = self.ledger.subscribe_mints() => match subscribed {
                    Ok(events) => events,
                    Err(e) => {
                        warn!(
                            "Mint subscription failed: {}, retrying in {:?}",
                            e, backoff
                        );
                        metrics::SUBSCRIPTION_RECONNECTS.inc();
                        if self.backoff_or_shutdown(backoff, &mut shutdown).await {
                            return;
                        }
                        backoff = (backoff * 2).min(self.max_backoff);
                        continue;
                    }
                }
            };

            loop {
                tokio::select! {
                    _ = shutdown.recv() => {
                        info!("On-mint trigger received shutdown signal");
                        return;
                    }
                    event = events.recv() => match event {
                        Some(Ok(event)) => {
                            backoff = self.initial_backoff;
                            metrics::MINT_EVENTS.inc();
                            debug!("Mint event for token {}", event.token_id);
                            match orchestrator.update_token(event.token_id).await {
                                Ok(outcome) if outcome.is_success() => {}
                                Ok(outcome) => warn!(
                                    "Minted token {} updated with failures in {:?}",
                                    event.token_id,
                                    outcome.failed_classes()
                                ),
                                Err(e) => warn!(
                                    "Update for minted token {} failed: {}",
                                    event.token_id, e
                                ),
                            }
                        }
                        Some(Err(e)) => {
                            warn!("Skipping malformed mint event: {}", e);
                        }
                        None => {
                            warn!("Mint event stream closed, resubscribing in {:?}", backoff);
                            metrics::SUBSCRIPTION_RECONNECTS.inc();
                            break;
                        }
                    }
                }
            }

            if self.backoff_or_shutdown(backoff, &mut shutdown).await {
                return;
            }
            backoff = (backoff * 2).min(self.max_backoff);
        }
    }
}
