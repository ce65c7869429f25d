//! Remote reconciliation and background sync.
//!
//! # Responsibility
//! - Merge remotely fetched quotes under a local-wins policy.
//! - Run fetch → reconcile → persist → notify cycles, one at a time.
//! - Drive cycles from a cancellable interval timer.
//!
//! # Invariants
//! - Remote data never overwrites or reorders an existing local quote.
//! - A failed cycle leaves the store and durable storage untouched.

pub mod cycle;
pub mod notify;
pub mod reconcile;
pub mod remote;
pub mod scheduler;
