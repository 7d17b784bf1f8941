//! intake-store: durable persistence adapters for intake
//!
//! Implements the [`SchemaStore`] / [`ResponseStore`] contracts from
//! `intake-core` twice over:
//!
//! - [`JsonFileStore`] - local-first JSON files; a missing or corrupt file
//!   reads as empty
//! - [`SqliteStore`] - key-value tables of JSON bodies behind rusqlite
//!
//! [`SchemaStore`]: intake_core::store::SchemaStore
//! [`ResponseStore`]: intake_core::store::ResponseStore

mod json_file;
mod sqlite;

pub use json_file::JsonFileStore;
pub use sqlite::SqliteStore;
