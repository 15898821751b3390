//! Shared test doubles for the record store.

pub mod document_stores;
pub use document_stores::*;
