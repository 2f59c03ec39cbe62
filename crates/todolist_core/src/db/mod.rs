//! SQLite connections for the todo store.
//!
//! Connections handed out here are migrated to `migrations::latest_version()`
//! before any list or item query runs against them. Failures surface as
//! `StoreError::Sqlite` or `StoreError::UnsupportedSchemaVersion`.

pub mod migrations;
mod open;

pub use open::{open_db, open_db_in_memory};
