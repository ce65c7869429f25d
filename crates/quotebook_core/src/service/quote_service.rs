//! Quote use-case service.
//!
//! # Responsibility
//! - Load the quote list and remembered filter on open.
//! - Persist every mutation of the quote list.
//! - Track the last displayed quote in session storage.
//!
//! # Invariants
//! - Mutations are staged on a copy, persisted, then committed. A failed write
//!   leaves both memory and storage at their previous state.

use crate::error::QuoteResult;
use crate::model::quote::{normalize_category, Quote, QuoteOrigin, ALL_CATEGORIES};
use crate::model::seed::seed_quotes;
use crate::storage::{
    KeyValueStore, LAST_VIEWED_QUOTE_KEY, QUOTES_KEY, SELECTED_CATEGORY_KEY,
};
use crate::store::quote_store::{pick_random_with, QuoteStore};
use crate::transfer::{decode_quotes, encode_json, export_json, ImportMode};
use log::{info, warn};
use rand::Rng;
use std::sync::Arc;

/// Quote service facade over the store and persistence adapters.
pub struct QuoteService {
    store: QuoteStore,
    durable: Arc<dyn KeyValueStore>,
    session: Arc<dyn KeyValueStore>,
    current_category: String,
}

impl QuoteService {
    /// Loads persisted state, seeding built-in quotes when none are stored.
    ///
    /// # Errors
    /// - `QuoteError::Parse` when the stored quote list is corrupt. Storage is
    ///   not rewritten in that case.
    pub fn open(
        durable: Arc<dyn KeyValueStore>,
        session: Arc<dyn KeyValueStore>,
    ) -> QuoteResult<Self> {
        let quotes = match durable.get(QUOTES_KEY)? {
            Some(payload) => decode_quotes(&payload)?,
            None => seed_quotes(),
        };
        let current_category = durable
            .get(SELECTED_CATEGORY_KEY)?
            .map(|value| normalize_category(&value))
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| ALL_CATEGORIES.to_string());

        info!(
            "event=quotes_load module=service status=ok count={} category={}",
            quotes.len(),
            current_category
        );

        Ok(Self {
            store: QuoteStore::from_quotes(quotes),
            durable,
            session,
            current_category,
        })
    }

    pub fn store(&self) -> &QuoteStore {
        &self.store
    }

    pub fn snapshot(&self) -> Vec<Quote> {
        self.store.snapshot()
    }

    pub fn categories(&self) -> Vec<String> {
        self.store.categories()
    }

    /// Active category filter (`"all"` when none was chosen).
    pub fn current_category(&self) -> &str {
        &self.current_category
    }

    /// Adds a user-entered quote and persists the list.
    pub fn add_quote(&mut self, text: &str, category: &str) -> QuoteResult<Quote> {
        let mut staged = self.store.clone();
        let quote = staged.add(text, category, QuoteOrigin::Local)?;
        self.commit(staged)?;
        info!(
            "event=quote_add module=service status=ok category={} count={}",
            quote.category,
            self.store.len()
        );
        Ok(quote)
    }

    /// Selects `category` as the active filter and returns matching quotes.
    pub fn filter(&mut self, category: &str) -> QuoteResult<Vec<Quote>> {
        let category = normalize_category(category);
        let category = if category.is_empty() {
            ALL_CATEGORIES.to_string()
        } else {
            category
        };
        self.durable.set(SELECTED_CATEGORY_KEY, &category)?;
        self.current_category = category;
        Ok(self.filtered())
    }

    /// Quotes matching the active filter.
    pub fn filtered(&self) -> Vec<Quote> {
        self.store
            .filter_by_category(&self.current_category)
            .into_iter()
            .cloned()
            .collect()
    }

    /// Picks a random quote from the active filter.
    pub fn show_random(&self) -> QuoteResult<Quote> {
        self.show_random_with(&mut rand::thread_rng())
    }

    /// Picks a random quote from the active filter using `rng`, recording it
    /// as the last viewed quote for this session.
    ///
    /// # Errors
    /// - `QuoteError::EmptyCollection` when the filter matches nothing.
    pub fn show_random_with<R: Rng>(&self, rng: &mut R) -> QuoteResult<Quote> {
        let candidates = self.store.filter_by_category(&self.current_category);
        let picked = (*pick_random_with(&candidates, rng)?).clone();
        let payload = encode_json(&picked)?;
        self.session.set(LAST_VIEWED_QUOTE_KEY, &payload)?;
        Ok(picked)
    }

    /// Last quote shown in this session, if any.
    ///
    /// Only meaningful while the session store outlives a single pick; the
    /// one-shot CLI never reads it back.
    pub fn last_viewed(&self) -> QuoteResult<Option<Quote>> {
        match self.session.get(LAST_VIEWED_QUOTE_KEY)? {
            Some(payload) => Ok(Some(serde_json::from_str(&payload)?)),
            None => Ok(None),
        }
    }

    pub fn export_json(&self) -> QuoteResult<String> {
        export_json(self.store.as_slice())
    }

    /// Imports a JSON document and persists the result.
    ///
    /// Returns the number of imported records.
    ///
    /// # Errors
    /// - `QuoteError::Parse` for malformed documents; existing data is kept.
    pub fn import_json(&mut self, document: &str, mode: ImportMode) -> QuoteResult<usize> {
        let imported = match decode_quotes(document) {
            Ok(quotes) => quotes,
            Err(err) => {
                warn!(
                    "event=quotes_import module=service status=error error_code={} error={}",
                    err.code(),
                    err
                );
                return Err(err);
            }
        };
        let count = imported.len();

        let mut staged = self.store.clone();
        match mode {
            ImportMode::Append => staged.append_all(imported),
            ImportMode::Replace => staged.replace_all(imported),
        }
        self.commit(staged)?;

        info!(
            "event=quotes_import module=service status=ok mode={:?} imported={} count={}",
            mode,
            count,
            self.store.len()
        );
        Ok(count)
    }

    /// Installs a reconciled list produced by a sync cycle.
    pub fn apply_merged(&mut self, merged: Vec<Quote>) -> QuoteResult<()> {
        self.commit(QuoteStore::from_quotes(merged))
    }

    fn commit(&mut self, staged: QuoteStore) -> QuoteResult<()> {
        let payload = encode_json(staged.as_slice())?;
        self.durable.set(QUOTES_KEY, &payload)?;
        self.store = staged;
        Ok(())
    }
}
