//! Todo list record and projections.
//!
//! # Invariants
//! - `id` and `key` are generated once in `TodoList::new` and never change.
//! - `ListView` omits `key` unless built with `ListView::with_key`.

use super::token::{generate_id, generate_key};
use super::{require_text, ValidationError};
use serde::{Deserialize, Serialize};

/// Opaque list identifier (32 hex chars).
pub type ListId = String;

/// Stored list record, including its secret key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoList {
    pub id: ListId,
    pub key: String,
    pub name: String,
}

impl TodoList {
    /// Creates a list with a fresh id and a fresh secret key.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: generate_id(),
            key: generate_key(),
            name: name.into(),
        }
    }
}

/// Caller-facing projection of a list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListView {
    pub id: ListId,
    /// Only present on create and update acknowledgements.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    pub name: String,
}

impl ListView {
    /// Projection that echoes the secret key back to the caller.
    pub fn with_key(list: &TodoList) -> Self {
        Self {
            id: list.id.clone(),
            key: Some(list.key.clone()),
            name: list.name.clone(),
        }
    }

    /// Projection with the key stripped.
    pub fn without_key(list: &TodoList) -> Self {
        Self {
            id: list.id.clone(),
            key: None,
            name: list.name.clone(),
        }
    }
}

/// Request body for creating or renaming a list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListInput {
    pub name: String,
}

impl ListInput {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Rejects a blank `name`.
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text("name", &self.name)
    }
}
