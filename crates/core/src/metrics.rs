//! Prometheus metrics for core components.
//!
//! This module provides metrics for:
//! - Orchestrator (token updates, sweeps)
//! - Data updaters (migration failures by asset class)
//! - Triggers (mint events, subscription reconnects)

use once_cell::sync::Lazy;
use prometheus::{Histogram, HistogramOpts, IntCounter, IntCounterVec, Opts};

/// Token updates total by result.
pub static TOKEN_UPDATES: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("collection_sync_token_updates_total", "Total token updates"),
        &["result"], // "success", "partial_failure"
    )
    .unwrap()
});

/// Migration failures by asset class.
pub static MIGRATION_FAILURES: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new(
            "collection_sync_migration_failures_total",
            "Total failed migration actions",
        ),
        &["asset_class"],
    )
    .unwrap()
});

/// Full-sweep duration in seconds.
pub static SWEEP_DURATION: Lazy<Histogram> = Lazy::new(|| {
    Histogram::with_opts(
        HistogramOpts::new(
            "collection_sync_sweep_duration_seconds",
            "Duration of full token range sweeps",
        )
        .buckets(vec![0.1, 0.5, 1.0, 5.0, 15.0, 60.0, 300.0, 900.0]),
    )
    .unwrap()
});

/// Mint events received from the ledger subscription.
pub static MINT_EVENTS: Lazy<IntCounter> = Lazy::new(|| {
    IntCounter::new(
        "collection_sync_mint_events_total",
        "Total mint events received",
    )
    .unwrap()
});

/// Mint subscription reconnect attempts.
pub static SUBSCRIPTION_RECONNECTS: Lazy<IntCounter> = Lazy::new(|| {
    IntCounter::new(
        "collection_sync_subscription_reconnects_total",
        "Total mint subscription reconnect attempts",
    )
    .unwrap()
});

/// Get all core metrics for registration in a registry.
pub fn all_metrics() -> Vec<Box<dyn prometheus::core::Collector>> {
    vec![
        Box::new(TOKEN_UPDATES.clone()),
        Box::new(MIGRATION_FAILURES.clone()),
        Box::new(SWEEP_DURATION.clone()),
        Box::new(MINT_EVENTS.clone()),
        Box::new(SUBSCRIPTION_RECONNECTS.clone()),
    ]
}

/// Register all core metrics in the given registry.
pub fn register_all(registry: &prometheus::Registry) -> Result<(), prometheus::Error> {
    for metric in all_metrics() {
        registry.register(metric)?;
    }
    Ok(())
}
