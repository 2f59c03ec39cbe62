//! Schema migrations for the todo store.
//!
//! Steps are SQL scripts applied once, in order. All pending steps share one
//! transaction, and the number of applied steps is the schema version kept
//! in `PRAGMA user_version`.

use crate::repo::todo_store::{StoreError, StoreResult};
use log::info;
use rusqlite::Connection;

/// Step `n` (1-based) brings the schema to version `n`.
const STEPS: &[(&str, &str)] = &[("lists_and_items", include_str!("0001_init.sql"))];

/// Schema version produced by running every known step.
pub fn latest_version() -> u32 {
    STEPS.len() as u32
}

/// Reads the schema version recorded on `conn`.
pub fn schema_version(conn: &Connection) -> StoreResult<u32> {
    Ok(conn.pragma_query_value(None, "user_version", |row| row.get(0))?)
}

/// Runs the steps `conn` has not seen yet and returns how many ran.
///
/// # Errors
/// - `UnsupportedSchemaVersion` when the database is ahead of this binary.
pub fn apply_migrations(conn: &mut Connection) -> StoreResult<usize> {
    let from = schema_version(conn)?;
    let latest = latest_version();
    if from > latest {
        return Err(StoreError::UnsupportedSchemaVersion {
            db_version: from,
            latest_supported: latest,
        });
    }

    let pending = &STEPS[from as usize..];
    if pending.is_empty() {
        return Ok(0);
    }

    let tx = conn.transaction()?;
    for (version, (_, sql)) in (from + 1..).zip(pending) {
        tx.execute_batch(sql)?;
        tx.pragma_update(None, "user_version", version)?;
    }
    tx.commit()?;

    let names: Vec<&str> = pending.iter().map(|(name, _)| *name).collect();
    info!(
        "event=db_migrate module=db status=ok from_version={from} to_version={latest} steps={}",
        names.join(",")
    );
    Ok(pending.len())
}
