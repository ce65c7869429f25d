//! Core domain logic for Quotebook.
//!
//! The crate owns the quote store, persistence adapters, JSON transfer and
//! the remote sync machinery. Presentation lives in `quotebook_cli`.

pub mod config;
pub mod db;
pub mod error;
pub mod logging;
pub mod model;
pub mod service;
pub mod storage;
pub mod store;
pub mod sync;
pub mod transfer;

pub use config::{Config, ConfigError};
pub use error::{QuoteError, QuoteResult};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::quote::{Quote, QuoteOrigin, QuoteValidationError, ALL_CATEGORIES};
pub use service::quote_service::QuoteService;
pub use storage::{KeyValueStore, MemoryKeyValueStore, SqliteKeyValueStore, StorageError};
pub use store::quote_store::{pick_random, QuoteStore};
pub use sync::cycle::{SyncOutcome, SyncService};
pub use sync::notify::{LogNotifier, StatusNotifier};
pub use sync::reconcile::{reconcile, ChangeKind, ChangeRecord, Reconciliation};
pub use sync::remote::{
    HttpRemoteSource, PostPayload, PostReceipt, RemoteError, RemoteItem, RemoteSource,
};
pub use sync::scheduler::{SchedulerState, SyncScheduler};
pub use transfer::{ImportMode, EXPORT_FILE_NAME};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
