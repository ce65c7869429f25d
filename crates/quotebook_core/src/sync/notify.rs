//! Status reporting for sync cycles.

use super::cycle::SyncOutcome;
use log::{info, warn};

/// Receives the outcome of every sync cycle.
pub trait StatusNotifier: Send + Sync {
    fn notify(&self, outcome: &SyncOutcome);
}

/// Notifier that writes outcomes to the log.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl StatusNotifier for LogNotifier {
    fn notify(&self, outcome: &SyncOutcome) {
        match outcome {
            SyncOutcome::Failed(err) => warn!(
                "event=sync_status module=sync status=failed error_code={} error={}",
                err.code(),
                err
            ),
            other => info!("event=sync_status module=sync status={}", other.label()),
        }
    }
}
