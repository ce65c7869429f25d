//! Ordered quote store with category filtering and random selection.

use crate::error::{QuoteError, QuoteResult};
use crate::model::quote::{
    normalize_category, Quote, QuoteOrigin, QuoteValidationError, ALL_CATEGORIES,
};
use rand::Rng;

/// Owns the ordered quote list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuoteStore {
    quotes: Vec<Quote>,
}

impl QuoteStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_quotes(quotes: Vec<Quote>) -> Self {
        Self { quotes }
    }

    /// Validates input and appends a new quote.
    ///
    /// Returns a copy of the appended record.
    pub fn add(
        &mut self,
        text: &str,
        category: &str,
        origin: QuoteOrigin,
    ) -> Result<Quote, QuoteValidationError> {
        let quote = Quote::new(text, category, origin)?;
        self.quotes.push(quote.clone());
        Ok(quote)
    }

    /// Returns quotes in `category`, or all quotes for `"all"`.
    pub fn filter_by_category(&self, category: &str) -> Vec<&Quote> {
        let category = normalize_category(category);
        if category == ALL_CATEGORIES {
            return self.quotes.iter().collect();
        }
        self.quotes
            .iter()
            .filter(|quote| quote.category == category)
            .collect()
    }

    /// Replaces the entire content.
    pub fn replace_all(&mut self, records: Vec<Quote>) {
        self.quotes = records;
    }

    /// Appends `records` in order without de-duplication.
    pub fn append_all(&mut self, records: impl IntoIterator<Item = Quote>) {
        self.quotes.extend(records);
    }

    /// Unique categories in first-seen order.
    pub fn categories(&self) -> Vec<String> {
        let mut categories: Vec<String> = Vec::new();
        for quote in &self.quotes {
            if !categories.contains(&quote.category) {
                categories.push(quote.category.clone());
            }
        }
        categories
    }

    pub fn snapshot(&self) -> Vec<Quote> {
        self.quotes.clone()
    }

    pub fn as_slice(&self) -> &[Quote] {
        &self.quotes
    }

    pub fn len(&self) -> usize {
        self.quotes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quotes.is_empty()
    }
}

/// Picks a uniformly random element using the thread-local generator.
pub fn pick_random<T>(subset: &[T]) -> QuoteResult<&T> {
    pick_random_with(subset, &mut rand::thread_rng())
}

/// Picks a uniformly random element using `rng`.
///
/// # Errors
/// - `QuoteError::EmptyCollection` when `subset` is empty.
pub fn pick_random_with<'a, T, R: Rng>(subset: &'a [T], rng: &mut R) -> QuoteResult<&'a T> {
    if subset.is_empty() {
        return Err(QuoteError::EmptyCollection);
    }
    let index = rng.gen_range(0..subset.len());
    Ok(&subset[index])
}
