//! Deterministic, pure logic for portfolio documents.
//!
//! Core modules must be free of I/O side effects. They operate on in-memory
//! records and document text and return deterministic outputs suitable for
//! tests.

pub mod document;
pub mod layout;
pub mod listing;
pub mod reconcile;
pub mod record;
pub mod slug;
pub mod validate;
