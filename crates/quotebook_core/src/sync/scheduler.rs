//! Interval-driven sync scheduler.
//!
//! # Invariants
//! - `stop` is idempotent and safe mid-cycle.
//! - Stopping never interrupts a cycle: the in-flight cycle completes (commit
//!   or no-op) and the timer task exits before the next tick.
//! - Starting while running keeps the existing timer.

use super::cycle::SyncService;
use log::{debug, error, info, warn};
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerState {
    Idle,
    Running,
}

struct RunningTimer {
    shutdown: watch::Sender<bool>,
    handle: JoinHandle<()>,
}

/// Recurring timer invoking [`SyncService::run_cycle`].
pub struct SyncScheduler {
    sync: SyncService,
    running: Option<RunningTimer>,
}

impl SyncScheduler {
    pub fn new(sync: SyncService) -> Self {
        Self {
            sync,
            running: None,
        }
    }

    pub fn state(&self) -> SchedulerState {
        if self.running.is_some() {
            SchedulerState::Running
        } else {
            SchedulerState::Idle
        }
    }

    /// Starts ticking every `interval`; the first cycle fires after one
    /// interval. Must be called inside a tokio runtime.
    ///
    /// Returns `false` without changing state when already running or when
    /// `interval` is zero.
    pub fn start(&mut self, interval: Duration) -> bool {
        if self.running.is_some() {
            warn!("event=scheduler_start module=sync status=ignored reason=already_running");
            return false;
        }
        if interval.is_zero() {
            error!("event=scheduler_start module=sync status=error reason=zero_interval");
            return false;
        }

        let (shutdown, shutdown_rx) = watch::channel(false);
        let handle = tokio::spawn(run_timer(self.sync.clone(), interval, shutdown_rx));
        self.running = Some(RunningTimer { shutdown, handle });

        info!(
            "event=scheduler_start module=sync status=ok interval_ms={}",
            interval.as_millis()
        );
        true
    }

    /// Cancels the timer. An in-flight cycle still runs to completion.
    pub fn stop(&mut self) {
        match self.running.take() {
            Some(timer) => {
                let _ = timer.shutdown.send(true);
                info!("event=scheduler_stop module=sync status=ok");
            }
            None => debug!("event=scheduler_stop module=sync status=noop state=idle"),
        }
    }

    /// Stops and waits for the timer task, including any in-flight cycle.
    pub async fn shutdown(&mut self) {
        let Some(timer) = self.running.take() else {
            return;
        };
        let _ = timer.shutdown.send(true);
        if let Err(err) = timer.handle.await {
            error!("event=scheduler_stop module=sync status=error error={err}");
            return;
        }
        info!("event=scheduler_stop module=sync status=ok drained=true");
    }
}

impl Drop for SyncScheduler {
    fn drop(&mut self) {
        self.stop();
    }
}

async fn run_timer(sync: SyncService, period: Duration, mut shutdown: watch::Receiver<bool>) {
    let mut ticker = interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            biased;
            changed = shutdown.changed() => {
                if changed.is_err() || *shutdown.borrow() {
                    break;
                }
            }
            _ = ticker.tick() => {
                sync.run_cycle().await;
            }
        }
    }
    debug!("event=scheduler_task module=sync status=exited");
}
