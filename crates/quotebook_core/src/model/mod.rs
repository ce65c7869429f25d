//! Quote domain model.
//!
//! # Responsibility
//! - Define the canonical quote record shared by store, sync and transfer.
//! - Own text/category normalization rules.
//!
//! # Invariants
//! - Quote identity is case-insensitive text equality, never a generated key.
//! - Stored categories are trimmed and lowercased.

pub mod quote;
pub mod seed;
