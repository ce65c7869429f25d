mod common;

use common::{remote_item, FakeRemote, SyncHarness};
use quotebook_core::{SchedulerState, SyncScheduler};
use std::time::Duration;

const INTERVAL: Duration = Duration::from_millis(50);

#[tokio::test]
async fn stop_twice_is_harmless_and_leaves_idle() {
    let harness = SyncHarness::new(FakeRemote::returning(Vec::new()));
    let mut scheduler = SyncScheduler::new(harness.sync.clone());

    scheduler.stop();
    assert!(scheduler.start(INTERVAL));
    scheduler.stop();
    scheduler.stop();

    assert_eq!(scheduler.state(), SchedulerState::Idle);
}

#[tokio::test]
async fn start_while_running_keeps_existing_timer() {
    let harness = SyncHarness::new(FakeRemote::returning(Vec::new()));
    let mut scheduler = SyncScheduler::new(harness.sync.clone());

    assert!(scheduler.start(INTERVAL));
    assert!(!scheduler.start(Duration::from_secs(1)));
    assert_eq!(scheduler.state(), SchedulerState::Running);

    scheduler.shutdown().await;
    assert_eq!(scheduler.state(), SchedulerState::Idle);
}

#[tokio::test]
async fn zero_interval_is_refused() {
    let harness = SyncHarness::new(FakeRemote::returning(Vec::new()));
    let mut scheduler = SyncScheduler::new(harness.sync.clone());

    assert!(!scheduler.start(Duration::ZERO));
    assert_eq!(scheduler.state(), SchedulerState::Idle);
}

#[tokio::test(start_paused = true)]
async fn ticks_run_cycles_until_stopped() {
    let harness = SyncHarness::new(FakeRemote::returning(vec![remote_item(1, "New idea")]));
    let mut scheduler = SyncScheduler::new(harness.sync.clone());

    scheduler.start(INTERVAL);
    tokio::time::sleep(INTERVAL * 3 + INTERVAL / 2).await;
    scheduler.shutdown().await;

    let calls = harness.remote.fetch_calls();
    assert_eq!(calls, 3);
    assert_eq!(
        harness.notifier.labels(),
        vec!["applied", "up_to_date", "up_to_date"]
    );

    tokio::time::sleep(INTERVAL * 4).await;
    assert_eq!(harness.remote.fetch_calls(), calls);
}

#[tokio::test(start_paused = true)]
async fn stop_mid_cycle_lets_cycle_commit_and_runs_no_more() {
    let (remote, gate) = FakeRemote::returning(vec![remote_item(1, "New idea")]).gated();
    let harness = SyncHarness::new(remote);
    let mut scheduler = SyncScheduler::new(harness.sync.clone());

    scheduler.start(INTERVAL);
    gate.entered.notified().await;

    scheduler.stop();
    assert_eq!(scheduler.state(), SchedulerState::Idle);
    gate.release.notify_one();

    tokio::time::sleep(INTERVAL * 10).await;

    assert_eq!(harness.remote.fetch_calls(), 1);
    assert!(harness.has_text("New idea").await);
    assert!(harness.stored_quotes().unwrap().contains("New idea"));
    assert_eq!(harness.notifier.labels(), vec!["applied"]);
}

#[tokio::test(start_paused = true)]
async fn slow_cycle_never_overlaps_with_next_tick() {
    let (remote, gate) = FakeRemote::returning(vec![remote_item(1, "New idea")]).gated();
    let harness = SyncHarness::new(remote);
    let mut scheduler = SyncScheduler::new(harness.sync.clone());

    scheduler.start(INTERVAL);
    gate.entered.notified().await;

    // Several intervals elapse while the first fetch is held open.
    tokio::time::sleep(INTERVAL * 5).await;
    assert_eq!(harness.remote.fetch_calls(), 1);

    scheduler.stop();
    gate.release.notify_one();
    tokio::time::sleep(INTERVAL).await;
    assert_eq!(harness.remote.fetch_calls(), 1);
}
