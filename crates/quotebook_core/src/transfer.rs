//! JSON export and import of quote lists.
//!
//! # Invariants
//! - Export is pretty-printed with two-space indentation.
//! - Import either yields every record or fails as a whole; callers never see
//!   a partially decoded list.

use crate::error::{QuoteError, QuoteResult};
use crate::model::quote::{normalize_category, normalize_text, Quote, QuoteOrigin};
use serde::{Deserialize, Serialize};

/// File name offered for exported documents.
pub const EXPORT_FILE_NAME: &str = "quotes.json";

/// How imported records combine with the existing store.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ImportMode {
    /// Append every imported record, duplicates included.
    #[default]
    Append,
    /// Discard the current store and keep only imported records.
    Replace,
}

/// Shape accepted on import. Only `text` and `category` are required.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ImportedQuote {
    text: String,
    category: String,
    #[serde(default)]
    origin: QuoteOrigin,
    #[serde(default)]
    created_at: Option<i64>,
}

/// Serializes `quotes` as a pretty-printed JSON array.
pub fn export_json(quotes: &[Quote]) -> QuoteResult<String> {
    serde_json::to_string_pretty(quotes)
        .map_err(|err| QuoteError::encode(format!("failed to export quotes: {err}")))
}

/// Compact JSON used for stored payloads.
///
/// # Errors
/// - `QuoteError::Encode` when `value` cannot be represented as JSON.
pub fn encode_json<T: Serialize + ?Sized>(value: &T) -> QuoteResult<String> {
    serde_json::to_string(value).map_err(|err| QuoteError::encode(err.to_string()))
}

/// Decodes a JSON array of `{text, category}` records.
///
/// # Errors
/// - `QuoteError::Parse` when the document is not valid JSON, is not an array
///   of objects with string `text`/`category`, or an entry has a blank field.
pub fn decode_quotes(document: &str) -> QuoteResult<Vec<Quote>> {
    let records: Vec<ImportedQuote> = serde_json::from_str(document)?;
    records
        .into_iter()
        .enumerate()
        .map(|(index, record)| {
            let text = normalize_text(&record.text);
            let category = normalize_category(&record.category);
            if text.is_empty() {
                return Err(QuoteError::parse(format!("entry {index} has empty text")));
            }
            if category.is_empty() {
                return Err(QuoteError::parse(format!(
                    "entry {index} has empty category"
                )));
            }
            Ok(Quote {
                text,
                category,
                origin: record.origin,
                created_at: record.created_at,
            })
        })
        .collect()
}
