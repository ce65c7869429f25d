//! Quote record and validation.
//!
//! # Responsibility
//! - Define the quote shape persisted to storage and exchanged as JSON.
//! - Normalize user input before it reaches the store.
//!
//! # Invariants
//! - `text` and `category` are non-empty after trimming.
//! - `category` is lowercased.
//! - Two quotes are the same entity when their texts match ignoring case.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Pseudo-category selecting every quote.
pub const ALL_CATEGORIES: &str = "all";

/// Provenance tag for a quote.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuoteOrigin {
    /// Entered by the user or imported from a file.
    #[default]
    Local,
    /// Contributed by the remote collection during sync.
    Remote,
}

/// Missing required quote field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum QuoteValidationError {
    #[error("quote text cannot be empty")]
    EmptyText,
    #[error("quote category cannot be empty")]
    EmptyCategory,
}

/// Canonical quote record.
///
/// Serialized with camelCase keys so exported documents stay readable by the
/// browser build (`text`, `category`, `origin`, `createdAt`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    pub text: String,
    pub category: String,
    /// Missing in legacy documents; those quotes are treated as local.
    #[serde(default)]
    pub origin: QuoteOrigin,
    /// Unix epoch milliseconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<i64>,
}

impl Quote {
    /// Normalizes and validates input, stamping `created_at` with now.
    pub fn new(
        text: &str,
        category: &str,
        origin: QuoteOrigin,
    ) -> Result<Self, QuoteValidationError> {
        let mut quote = Self::unstamped(text, category, origin)?;
        quote.created_at = Some(chrono::Utc::now().timestamp_millis());
        Ok(quote)
    }

    /// Normalizes and validates input without a creation timestamp.
    ///
    /// Used for built-in seed data and legacy records.
    pub fn unstamped(
        text: &str,
        category: &str,
        origin: QuoteOrigin,
    ) -> Result<Self, QuoteValidationError> {
        let quote = Self {
            text: normalize_text(text),
            category: normalize_category(category),
            origin,
            created_at: None,
        };
        quote.validate()?;
        Ok(quote)
    }

    /// Checks required fields.
    pub fn validate(&self) -> Result<(), QuoteValidationError> {
        if self.text.trim().is_empty() {
            return Err(QuoteValidationError::EmptyText);
        }
        if self.category.trim().is_empty() {
            return Err(QuoteValidationError::EmptyCategory);
        }
        Ok(())
    }

    /// Key used for identity comparisons.
    pub fn identity_key(&self) -> String {
        identity_key(&self.text)
    }

    /// Returns whether both quotes denote the same entity.
    pub fn same_entity(&self, other: &Quote) -> bool {
        self.identity_key() == other.identity_key()
    }

    /// Returns a copy tagged with `origin`.
    pub fn with_origin(mut self, origin: QuoteOrigin) -> Self {
        self.origin = origin;
        self
    }
}

/// Trims surrounding whitespace from quote text.
pub fn normalize_text(value: &str) -> String {
    value.trim().to_string()
}

/// Trims and lowercases a category name.
pub fn normalize_category(value: &str) -> String {
    value.trim().to_lowercase()
}

/// Lowercased text used as the identity of a quote.
pub fn identity_key(text: &str) -> String {
    text.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::{Quote, QuoteOrigin, QuoteValidationError};

    #[test]
    fn new_normalizes_text_and_category() {
        let quote = Quote::new("  Stay hungry.  ", " Motivation ", QuoteOrigin::Local).unwrap();
        assert_eq!(quote.text, "Stay hungry.");
        assert_eq!(quote.category, "motivation");
        assert!(quote.created_at.is_some());
    }

    #[test]
    fn blank_fields_are_rejected() {
        assert_eq!(
            Quote::new("   ", "life", QuoteOrigin::Local).unwrap_err(),
            QuoteValidationError::EmptyText
        );
        assert_eq!(
            Quote::new("text", "\t", QuoteOrigin::Local).unwrap_err(),
            QuoteValidationError::EmptyCategory
        );
    }

    #[test]
    fn identity_ignores_case_and_category() {
        let a = Quote::unstamped("Be bold", "x", QuoteOrigin::Local).unwrap();
        let b = Quote::unstamped("be BOLD", "y", QuoteOrigin::Remote).unwrap();
        assert!(a.same_entity(&b));
    }

    #[test]
    fn serializes_with_camel_case_and_skips_missing_timestamp() {
        let quote = Quote::unstamped("Be bold", "x", QuoteOrigin::Remote).unwrap();
        let value = serde_json::to_value(&quote).unwrap();
        assert_eq!(value["origin"], "remote");
        assert!(value.get("createdAt").is_none());

        let stamped = Quote {
            created_at: Some(42),
            ..quote
        };
        let value = serde_json::to_value(&stamped).unwrap();
        assert_eq!(value["createdAt"], 42);
    }

    #[test]
    fn legacy_record_without_origin_defaults_to_local() {
        let quote: Quote =
            serde_json::from_str(r#"{"text":"Be yourself","category":"life"}"#).unwrap();
        assert_eq!(quote.origin, QuoteOrigin::Local);
        assert_eq!(quote.created_at, None);
    }
}
