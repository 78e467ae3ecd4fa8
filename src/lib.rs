//! fjour - Field journal
//!
//! Offline store for agricultural field observations: entries with location,
//! template and media attachments, kept as a JSON list in a key-value store
//! with media blobs in a managed directory, plus synced/unsynced bookkeeping
//! for a future sync client.

pub mod application;
pub mod cli;
pub mod domain;
pub mod error;
pub mod infrastructure;

pub use error::JournalError;
