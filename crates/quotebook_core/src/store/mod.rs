//! In-memory quote collection.
//!
//! # Invariants
//! - Order is insertion order; nothing is reordered or removed in place.
//! - Full replacement happens only through `replace_all`.

pub mod quote_store;
