//! Persistence adapters.
//!
//! # Responsibility
//! - Define the string key-value contract the core persists through.
//! - Provide a durable SQLite backend and an ephemeral per-session backend.
//!
//! # Invariants
//! - Adapters store opaque strings; JSON encoding happens in the caller.
//! - A failed `set` leaves the previous value in place.

use crate::db::DbError;
use thiserror::Error;

mod memory_store;
mod sqlite_store;

pub use memory_store::MemoryKeyValueStore;
pub use sqlite_store::SqliteKeyValueStore;

/// Durable key holding the JSON quote array.
pub const QUOTES_KEY: &str = "quotes";
/// Durable key holding the last selected category filter.
pub const SELECTED_CATEGORY_KEY: &str = "selectedCategory";
/// Session key holding the last displayed quote as a JSON object.
///
/// Written on every random pick. The CLI opens a fresh session per process,
/// so there it is write-only; long-lived hosts read it via
/// `QuoteService::last_viewed`.
pub const LAST_VIEWED_QUOTE_KEY: &str = "lastViewedQuote";

pub type StorageResult<T> = Result<T, StorageError>;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("{0}")]
    Db(#[from] DbError),
    #[error("storage lock poisoned: {0}")]
    Poisoned(&'static str),
}

impl From<rusqlite::Error> for StorageError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// String key-value persistence contract.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> StorageResult<Option<String>>;
    fn set(&self, key: &str, value: &str) -> StorageResult<()>;
}
