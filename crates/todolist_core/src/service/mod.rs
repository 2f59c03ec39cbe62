//! List and item use-case services.
//!
//! # Responsibility
//! - Enforce the list-key access gate in front of every operation.
//! - Return sanitized projections, never stored records with keys.
//!
//! # Invariants
//! - Every item operation passes `ListService::validate` first.
//! - List validation failures reach item callers unchanged.

pub mod error;
pub mod item_service;
pub mod list_service;
