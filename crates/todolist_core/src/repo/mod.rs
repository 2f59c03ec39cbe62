//! Persistence layer for lists and items.
//!
//! # Responsibility
//! - Define the storage contract the list/item services depend on.
//! - Isolate SQLite query details from access-control rules.
//!
//! # Invariants
//! - Store APIs return semantic errors (`ListNotFound`, `ItemNotFound`) in
//!   addition to DB transport errors.
//! - Deleting a list removes its items in the same transaction.

pub mod todo_store;
