//! Storage abstractions for service layer
//!
//! The document store maps logical document names to pretty-printed JSON
//! files under one data directory. Repositories in `file` build on it.

pub mod document_store;

pub use document_store::{DocumentStore, StoreError};
