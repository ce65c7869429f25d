//! Crate-level error taxonomy.
//!
//! Validation and parse errors go straight back to the caller. Network errors
//! raised during sync are absorbed at the cycle boundary and reported through
//! the status notifier instead.

use crate::model::quote::QuoteValidationError;
use crate::storage::StorageError;
use crate::sync::remote::RemoteError;
use thiserror::Error;

pub type QuoteResult<T> = Result<T, QuoteError>;

#[derive(Debug, Error)]
pub enum QuoteError {
    /// Required field empty after trimming.
    #[error("invalid quote: {0}")]
    Validation(#[from] QuoteValidationError),
    /// Random pick requested on an empty selection.
    #[error("no quotes available in this category")]
    EmptyCollection,
    /// Malformed import document, stored payload or remote body.
    #[error("parse error: {0}")]
    Parse(String),
    /// Serialization of an outgoing payload failed.
    #[error("encode error: {0}")]
    Encode(String),
    /// Fetch/post failure, including timeouts and non-success statuses.
    #[error("network error: {0}")]
    Network(String),
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}

impl QuoteError {
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse(message.into())
    }

    pub fn encode(message: impl Into<String>) -> Self {
        Self::Encode(message.into())
    }

    /// Stable short code used in structured log lines.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation",
            Self::EmptyCollection => "empty_collection",
            Self::Parse(_) => "parse",
            Self::Encode(_) => "encode",
            Self::Network(_) => "network",
            Self::Storage(_) => "storage",
        }
    }
}

impl From<RemoteError> for QuoteError {
    fn from(value: RemoteError) -> Self {
        match value {
            RemoteError::Decode(message) => Self::Parse(message),
            other => Self::Network(other.to_string()),
        }
    }
}

/// Decode-side conversion only; serialization sites go through
/// [`crate::transfer::encode_json`] so they surface as [`QuoteError::Encode`].
impl From<serde_json::Error> for QuoteError {
    fn from(value: serde_json::Error) -> Self {
        Self::Parse(value.to_string())
    }
}
