//! Core use-case services.
//!
//! # Responsibility
//! - Bind the in-memory store to durable and session persistence.
//! - Keep the CLI decoupled from storage keys and encoding.

pub mod quote_service;
