//! Engine lifecycle integration tests.
//!
//! These tests run the orchestrator with real triggers against mock
//! collaborators: mint-driven updates, subscription recovery with backoff,
//! periodic sweeps and graceful shutdown.

use std::sync::Arc;
use std::time::Duration;

use collection_sync_core::{
    testing::{MockLedger, RecordingUpdater},
    CollectionOrchestrator, CollectionStatusProvider, OnMintTrigger, OrchestratorConfig,
    PeriodicSweepTrigger, RevealState, Trigger,
};

fn orchestrator_with_trigger(
    ledger: &Arc<MockLedger>,
    recorder: &Arc<RecordingUpdater>,
    trigger: Arc<dyn Trigger>,
) -> Arc<CollectionOrchestrator> {
    let status_provider = Arc::new(CollectionStatusProvider::new(Arc::clone(ledger) as _, 1));
    Arc::new(
        CollectionOrchestrator::new(
            OrchestratorConfig::default(),
            1,
            Arc::clone(ledger) as _,
            status_provider,
            vec![Arc::clone(recorder) as _],
        )
        .with_trigger(trigger),
    )
}

/// Polls a condition until it holds or the timeout elapses.
async fn wait_until(timeout: Duration, mut condition: impl FnMut() -> bool) -> bool {
    let start = std::time::Instant::now();
    while start.elapsed() < timeout {
        if condition() {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    false
}

#[tokio::test]
async fn test_mint_event_updates_exactly_that_token() {
    let ledger = Arc::new(MockLedger::new());
    // Tokens minted before the engine came up.
    ledger.mint(1).await;
    ledger.mint(2).await;

    let recorder = Arc::new(RecordingUpdater::new("Recorder"));
    let trigger = Arc::new(OnMintTrigger::new(Arc::clone(&ledger) as _));
    let orchestrator = orchestrator_with_trigger(&ledger, &recorder, trigger);

    Arc::clone(&orchestrator).start().await;
    assert!(
        wait_until(Duration::from_secs(1), || ledger.subscribe_count() >= 1).await,
        "trigger never subscribed"
    );

    ledger.mint(5).await;

    assert!(
        wait_until(Duration::from_secs(1), || recorder.call_count() >= 1).await,
        "mint event never produced an update"
    );
    orchestrator.stop().await;

    // Exactly one update, for exactly the minted id.
    assert_eq!(recorder.calls(), vec![(5, RevealState::Hidden)]);
}

#[tokio::test]
async fn test_malformed_mint_event_is_skipped() {
    let ledger = Arc::new(MockLedger::new());
    let recorder = Arc::new(RecordingUpdater::new("Recorder"));
    let trigger = Arc::new(OnMintTrigger::new(Arc::clone(&ledger) as _));
    let orchestrator = orchestrator_with_trigger(&ledger, &recorder, trigger);

    Arc::clone(&orchestrator).start().await;
    assert!(wait_until(Duration::from_secs(1), || ledger.subscribe_count() >= 1).await);

    ledger.push_malformed_event().await;
    ledger.mint(3).await;

    assert!(
        wait_until(Duration::from_secs(1), || recorder.call_count() >= 1).await,
        "trigger died on a malformed event"
    );
    orchestrator.stop().await;

    assert_eq!(recorder.calls(), vec![(3, RevealState::Hidden)]);
}

#[tokio::test]
async fn test_subscription_failures_are_retried_with_backoff() {
    let ledger = Arc::new(MockLedger::new());
    ledger.fail_next_subscribes(2);

    let recorder = Arc::new(RecordingUpdater::new("Recorder"));
    let trigger = Arc::new(
        OnMintTrigger::new(Arc::clone(&ledger) as _)
            .with_backoff(Duration::from_millis(10), Duration::from_millis(50)),
    );
    let orchestrator = orchestrator_with_trigger(&ledger, &recorder, trigger);

    Arc::clone(&orchestrator).start().await;
    assert!(
        wait_until(Duration::from_secs(2), || ledger.subscribe_count() >= 3).await,
        "trigger gave up after subscription failures"
    );

    ledger.mint(1).await;
    assert!(wait_until(Duration::from_secs(1), || recorder.call_count() >= 1).await);
    orchestrator.stop().await;
}

#[tokio::test]
async fn test_stream_loss_causes_resubscription() {
    let ledger = Arc::new(MockLedger::new());
    let recorder = Arc::new(RecordingUpdater::new("Recorder"));
    let trigger = Arc::new(
        OnMintTrigger::new(Arc::clone(&ledger) as _)
            .with_backoff(Duration::from_millis(10), Duration::from_millis(50)),
    );
    let orchestrator = orchestrator_with_trigger(&ledger, &recorder, trigger);

    Arc::clone(&orchestrator).start().await;
    assert!(wait_until(Duration::from_secs(1), || ledger.subscribe_count() >= 1).await);

    ledger.drop_subscriptions();
    assert!(
        wait_until(Duration::from_secs(2), || ledger.subscribe_count() >= 2).await,
        "trigger never resubscribed after stream loss"
    );

    ledger.mint(8).await;
    assert!(wait_until(Duration::from_secs(1), || recorder.call_count() >= 1).await);
    orchestrator.stop().await;

    assert_eq!(recorder.calls(), vec![(8, RevealState::Hidden)]);
}

#[tokio::test]
async fn test_periodic_trigger_sweeps_repeatedly() {
    let ledger = Arc::new(MockLedger::new());
    ledger.mint(1).await;
    ledger.set_revealed(1, true);

    let recorder = Arc::new(RecordingUpdater::new("Recorder"));
    let trigger = Arc::new(PeriodicSweepTrigger::new(Duration::from_millis(50)));
    let orchestrator = orchestrator_with_trigger(&ledger, &recorder, trigger);

    Arc::clone(&orchestrator).start().await;
    assert!(
        wait_until(Duration::from_secs(2), || recorder.call_count() >= 2).await,
        "periodic trigger did not keep sweeping"
    );
    orchestrator.stop().await;

    assert!(recorder
        .calls()
        .iter()
        .all(|call| *call == (1, RevealState::Revealed)));
}

#[tokio::test]
async fn test_stop_is_idempotent_and_drains_triggers() {
    let ledger = Arc::new(MockLedger::new());
    let recorder = Arc::new(RecordingUpdater::new("Recorder"));
    let trigger = Arc::new(PeriodicSweepTrigger::new(Duration::from_millis(20)));
    let orchestrator = orchestrator_with_trigger(&ledger, &recorder, trigger);

    Arc::clone(&orchestrator).start().await;
    assert!(orchestrator.status().running);
    assert_eq!(orchestrator.status().registered_triggers, 1);

    orchestrator.stop().await;
    assert!(!orchestrator.status().running);

    // A second stop is a warning, not a hang.
    orchestrator.stop().await;
}

#[tokio::test]
async fn test_manual_updates_work_without_any_trigger() {
    let ledger = Arc::new(MockLedger::new());
    ledger.mint(1).await;
    ledger.mint(2).await;

    let recorder = Arc::new(RecordingUpdater::new("Recorder"));
    let status_provider = Arc::new(CollectionStatusProvider::new(Arc::clone(&ledger) as _, 1));
    let orchestrator = CollectionOrchestrator::new(
        OrchestratorConfig::default(),
        1,
        Arc::clone(&ledger) as _,
        status_provider,
        vec![Arc::clone(&recorder) as _],
    );

    // The interactive/manual path: direct calls, no trigger registered.
    orchestrator.update_token(1).await.unwrap();
    let report = orchestrator.update_all_tokens().await.unwrap();
    assert_eq!(report.tokens_seen, 2);
    assert_eq!(recorder.call_count(), 3);
}
