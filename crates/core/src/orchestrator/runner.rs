//! Orchestrator implementation.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

use chrono::Utc;
use futures::StreamExt;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::ledger::{Ledger, TokenId};
use crate::metrics;
use crate::status::StatusProvider;
use crate::trigger::Trigger;
use crate::updater::DataUpdater;

use super::config::OrchestratorConfig;
use super::token_locks::TokenLocks;
use super::types::{OrchestratorError, OrchestratorStatus, SweepReport, TokenUpdateOutcome};

/// The reconciliation engine.
///
/// For each token it fetches the current reveal state and invokes every
/// registered data updater with it, serialized per token id across all
/// callers. Triggers registered at construction drive the entry points once
/// [`start`](Self::start) is called; direct calls work with or without any
/// trigger running.
pub struct CollectionOrchestrator {
    config: OrchestratorConfig,
    start_token_id: TokenId,
    ledger: Arc<dyn Ledger>,
    status_provider: Arc<dyn StatusProvider>,
    updaters: Vec<Arc<dyn DataUpdater>>,
    triggers: Vec<Arc<dyn Trigger>>,

    // Runtime state
    locks: TokenLocks,
    running: AtomicBool,
    draining: AtomicBool,
    shutdown_tx: broadcast::Sender<()>,
    trigger_tasks: tokio::sync::Mutex<Vec<JoinHandle<()>>>,
}

impl CollectionOrchestrator {
    /// Creates an orchestrator with the given updater registry.
    ///
    /// Updaters run in registration order; order has no correctness
    /// meaning, but it is the order partial completion becomes observable
    /// in if a token's update is interrupted.
    pub fn new(
        config: OrchestratorConfig,
        start_token_id: TokenId,
        ledger: Arc<dyn Ledger>,
        status_provider: Arc<dyn StatusProvider>,
        updaters: Vec<Arc<dyn DataUpdater>>,
    ) -> Self {
        let (shutdown_tx, _) = broadcast::channel(1);

        Self {
            config,
            start_token_id,
            ledger,
            status_provider,
            updaters,
            triggers: Vec::new(),
            locks: TokenLocks::new(),
            running: AtomicBool::new(false),
            draining: AtomicBool::new(false),
            shutdown_tx,
            trigger_tasks: tokio::sync::Mutex::new(Vec::new()),
        }
    }

    /// Registers a trigger. Any combination of triggers (including none)
    /// is valid.
    pub fn with_trigger(mut self, trigger: Arc<dyn Trigger>) -> Self {
        self.triggers.push(trigger);
        self
    }

    /// Starts the registered triggers (spawns their run loops).
    ///
    /// Takes an owned `Arc` because each trigger's run loop is handed a
    /// reference to the update entry points; call as
    /// `Arc::clone(&orchestrator).start()`.
    pub async fn start(self: Arc<Self>) {
        if self.running.swap(true, Ordering::SeqCst) {
            warn!("Orchestrator already running");
            return;
        }
        self.draining.store(false, Ordering::SeqCst);

        info!(
            "Starting collection orchestrator ({} updaters, {} triggers, start token {})",
            self.updaters.len(),
            self.triggers.len(),
            self.start_token_id
        );

        let mut tasks = self.trigger_tasks.lock().await;
        for trigger in &self.triggers {
            let trigger = Arc::clone(trigger);
            let orchestrator = Arc::clone(&self);
            let shutdown_rx = self.shutdown_tx.subscribe();
            let name = trigger.name().to_string();

            tasks.push(tokio::spawn(async move {
                info!("Trigger {} started", name);
                trigger.run(orchestrator, shutdown_rx).await;
                info!("Trigger {} stopped", name);
            }));
        }
    }

    /// Stops the orchestrator gracefully: no new per-token work is
    /// admitted, in-flight updates finish so no destination object is left
    /// half-written, and trigger tasks are awaited.
    pub async fn stop(&self) {
        if !self.running.swap(false, Ordering::SeqCst) {
            warn!("Orchestrator not running");
            return;
        }

        info!("Stopping collection orchestrator");
        self.draining.store(true, Ordering::SeqCst);
        let _ = self.shutdown_tx.send(());

        let mut tasks = self.trigger_tasks.lock().await;
        for task in tasks.drain(..) {
            if let Err(e) = task.await {
                warn!("Trigger task ended abnormally: {}", e);
            }
        }

        info!("Collection orchestrator stopped");
    }

    /// Current runtime status.
    pub fn status(&self) -> OrchestratorStatus {
        OrchestratorStatus {
            running: self.running.load(Ordering::Relaxed),
            registered_updaters: self.updaters.len(),
            registered_triggers: self.triggers.len(),
            in_flight_tokens: self.locks.len(),
        }
    }

    /// Evaluates one token: fetch its reveal state and run every
    /// registered updater with it.
    ///
    /// Concurrent calls for the same token id queue behind each other and
    /// never interleave their updater sequences. A ledger failure fails
    /// the whole call and is the trigger cadence's to retry; updater
    /// failures are collected per asset class in the outcome.
    pub async fn update_token(
        &self,
        token_id: TokenId,
    ) -> Result<TokenUpdateOutcome, OrchestratorError> {
        let _guard = self.locks.acquire(token_id).await;

        match self.config.update_timeout() {
            Some(limit) => tokio::time::timeout(limit, self.update_token_locked(token_id))
                .await
                .map_err(|_| OrchestratorError::Timeout(limit))?,
            None => self.update_token_locked(token_id).await,
        }
    }

    async fn update_token_locked(
        &self,
        token_id: TokenId,
    ) -> Result<TokenUpdateOutcome, OrchestratorError> {
        let state = self.status_provider.is_revealed(token_id).await?;
        debug!("Token {} is {}", token_id, state);

        let mut failures = Vec::new();
        for updater in &self.updaters {
            if let Err(e) = updater.apply(token_id, state).await {
                warn!(
                    "Updater {} failed for token {}: {}",
                    updater.asset_class(),
                    token_id,
                    e.cause
                );
                metrics::MIGRATION_FAILURES
                    .with_label_values(&[updater.asset_class()])
                    .inc();
                failures.push(e);
            }
        }

        let result = if failures.is_empty() {
            "success"
        } else {
            "partial_failure"
        };
        metrics::TOKEN_UPDATES.with_label_values(&[result]).inc();

        Ok(TokenUpdateOutcome {
            token_id,
            state,
            failures,
            completed_at: Utc::now(),
        })
    }

    /// Sweeps the whole minted token range.
    ///
    /// The range upper bound is re-derived from the ledger's minted count
    /// at call time. At most `max_concurrent_updates` per-token sequences
    /// run at once regardless of range size. Per-token failures are logged
    /// and counted, never abort the sweep.
    pub async fn update_all_tokens(&self) -> Result<SweepReport, OrchestratorError> {
        let started = Instant::now();
        let minted = self.ledger.minted_count().await?;
        let first = self.start_token_id;
        let last = first.saturating_add(minted);

        info!("Starting full sweep over tokens {}..{}", first, last);

        let succeeded = AtomicU64::new(0);
        let partial_failures = AtomicU64::new(0);
        let failed = AtomicU64::new(0);
        let skipped = AtomicU64::new(0);

        futures::stream::iter(first..last)
            .for_each_concurrent(self.config.max_concurrent_updates.max(1), |token_id| {
                let succeeded = &succeeded;
                let partial_failures = &partial_failures;
                let failed = &failed;
                let skipped = &skipped;
                async move {
                    if self.draining.load(Ordering::SeqCst) {
                        skipped.fetch_add(1, Ordering::Relaxed);
                        return;
                    }
                    match self.update_token(token_id).await {
                        Ok(outcome) if outcome.is_success() => {
                            succeeded.fetch_add(1, Ordering::Relaxed);
                        }
                        Ok(outcome) => {
                            warn!(
                                "Sweep: token {} updated with failures in {:?}",
                                token_id,
                                outcome.failed_classes()
                            );
                            partial_failures.fetch_add(1, Ordering::Relaxed);
                        }
                        Err(e) => {
                            warn!("Sweep: update failed for token {}: {}", token_id, e);
                            failed.fetch_add(1, Ordering::Relaxed);
                        }
                    }
                }
            })
            .await;

        let report = SweepReport {
            tokens_seen: minted,
            succeeded: succeeded.into_inner(),
            partial_failures: partial_failures.into_inner(),
            failed: failed.into_inner(),
            skipped: skipped.into_inner(),
            duration_ms: started.elapsed().as_millis() as u64,
        };
        metrics::SWEEP_DURATION.observe(started.elapsed().as_secs_f64());
        info!(
            "Sweep finished: {}/{} succeeded, {} partial, {} failed, {} skipped in {} ms",
            report.succeeded,
            report.tokens_seen,
            report.partial_failures,
            report.failed,
            report.skipped,
            report.duration_ms
        );

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_default() {
        let status = OrchestratorStatus::default();
        assert!(!status.running);
        assert_eq!(status.in_flight_tokens, 0);
    }
}
