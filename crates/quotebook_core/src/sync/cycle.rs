//! One fetch → reconcile → persist → notify pass.
//!
//! # Invariants
//! - At most one cycle runs at a time; a cycle requested while another is in
//!   flight is skipped.
//! - The quote service lock is never held across a network call. It is held
//!   across the durable write in `merge`, which is a synchronous SQLite call
//!   on the runtime worker; readers wait for that single-row write.
//! - Failures are reported, never propagated; the store is left untouched.

use super::notify::StatusNotifier;
use super::reconcile::{reconcile, ChangeRecord};
use super::remote::{items_to_quotes, PostPayload, PostReceipt, RemoteSource};
use crate::error::{QuoteError, QuoteResult};
use crate::model::quote::Quote;
use crate::service::quote_service::QuoteService;
use log::{info, warn};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Mutex;

/// Result of one sync cycle.
#[derive(Debug)]
pub enum SyncOutcome {
    /// Net-new remote quotes were merged and persisted.
    Applied { changes: Vec<ChangeRecord> },
    /// Remote returned items, all already known locally.
    UpToDate,
    /// Remote returned zero usable items.
    NoData,
    /// Another cycle was in flight.
    Skipped,
    /// Fetch or persist failed; nothing was mutated.
    Failed(QuoteError),
}

impl SyncOutcome {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Applied { .. } => "applied",
            Self::UpToDate => "up_to_date",
            Self::NoData => "no_data",
            Self::Skipped => "skipped",
            Self::Failed(_) => "failed",
        }
    }

    /// Number of quotes added by this cycle.
    pub fn added(&self) -> usize {
        match self {
            Self::Applied { changes } => changes.len(),
            _ => 0,
        }
    }
}

/// Runs sync cycles against a shared quote service.
///
/// Clones share the same cycle gate, so a scheduler tick and a manual sync
/// never overlap.
#[derive(Clone)]
pub struct SyncService {
    remote: Arc<dyn RemoteSource>,
    quotes: Arc<Mutex<QuoteService>>,
    notifier: Arc<dyn StatusNotifier>,
    fetch_limit: u32,
    gate: Arc<Mutex<()>>,
}

impl SyncService {
    pub fn new(
        remote: Arc<dyn RemoteSource>,
        quotes: Arc<Mutex<QuoteService>>,
        notifier: Arc<dyn StatusNotifier>,
        fetch_limit: u32,
    ) -> Self {
        Self {
            remote,
            quotes,
            notifier,
            fetch_limit,
            gate: Arc::new(Mutex::new(())),
        }
    }

    pub fn quotes(&self) -> &Arc<Mutex<QuoteService>> {
        &self.quotes
    }

    /// Runs one cycle unless another is in flight.
    pub async fn run_cycle(&self) -> SyncOutcome {
        let Ok(_guard) = self.gate.try_lock() else {
            warn!("event=sync_cycle module=sync status=skipped reason=cycle_in_flight");
            let outcome = SyncOutcome::Skipped;
            self.notifier.notify(&outcome);
            return outcome;
        };

        let started_at = Instant::now();
        info!(
            "event=sync_cycle module=sync status=start limit={}",
            self.fetch_limit
        );

        let outcome = match self.fetch_remote_quotes().await {
            Err(err) => SyncOutcome::Failed(err),
            Ok(remote) if remote.is_empty() => SyncOutcome::NoData,
            Ok(remote) => self.merge(remote).await,
        };

        info!(
            "event=sync_cycle module=sync status={} added={} duration_ms={}",
            outcome.label(),
            outcome.added(),
            started_at.elapsed().as_millis()
        );
        self.notifier.notify(&outcome);
        outcome
    }

    /// Publishes a local quote to the remote collection.
    ///
    /// Local state is never altered, whatever the result.
    pub async fn post_quote(&self, quote: &Quote) -> QuoteResult<PostReceipt> {
        let payload = PostPayload::from_quote(quote);
        match self.remote.post_item(&payload).await {
            Ok(receipt) => {
                info!(
                    "event=quote_post module=sync status=ok remote_id={:?}",
                    receipt.id
                );
                Ok(receipt)
            }
            Err(err) => {
                let err = QuoteError::from(err);
                warn!(
                    "event=quote_post module=sync status=error error_code={} error={}",
                    err.code(),
                    err
                );
                Err(err)
            }
        }
    }

    async fn fetch_remote_quotes(&self) -> QuoteResult<Vec<Quote>> {
        let items = self.remote.fetch_list(self.fetch_limit).await?;
        Ok(items_to_quotes(items))
    }

    /// Reconciles under the service lock and commits the merged list.
    ///
    /// The commit blocks the current worker for one SQLite upsert.
    async fn merge(&self, remote: Vec<Quote>) -> SyncOutcome {
        let mut quotes = self.quotes.lock().await;
        let reconciliation = reconcile(quotes.store().as_slice(), &remote);
        if !reconciliation.has_changes() {
            return SyncOutcome::UpToDate;
        }

        match quotes.apply_merged(reconciliation.merged) {
            Ok(()) => SyncOutcome::Applied {
                changes: reconciliation.changes,
            },
            Err(err) => SyncOutcome::Failed(err),
        }
    }
}
