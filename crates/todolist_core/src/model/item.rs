//! Todo item record and projection.
//!
//! # Invariants
//! - `id` and `list_id` never change after creation.
//! - `is_complete` defaults to `false`.

use super::list::ListId;
use super::token::generate_id;
use super::{require_text, ValidationError};
use serde::{Deserialize, Serialize};

/// Opaque item identifier (32 hex chars).
pub type ItemId = String;

/// Stored item record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoItem {
    pub id: ItemId,
    pub list_id: ListId,
    pub content: String,
    pub is_complete: bool,
}

impl TodoItem {
    /// Creates an item owned by `list_id` with a fresh id.
    pub fn new(list_id: impl Into<ListId>, content: impl Into<String>, is_complete: bool) -> Self {
        Self {
            id: generate_id(),
            list_id: list_id.into(),
            content: content.into(),
            is_complete,
        }
    }
}

/// Caller-facing projection of an item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemView {
    pub id: ItemId,
    pub list_id: ListId,
    pub content: String,
    pub is_complete: bool,
}

impl From<&TodoItem> for ItemView {
    fn from(item: &TodoItem) -> Self {
        Self {
            id: item.id.clone(),
            list_id: item.list_id.clone(),
            content: item.content.clone(),
            is_complete: item.is_complete,
        }
    }
}

impl From<TodoItem> for ItemView {
    fn from(item: TodoItem) -> Self {
        Self {
            id: item.id,
            list_id: item.list_id,
            content: item.content,
            is_complete: item.is_complete,
        }
    }
}

/// Request body for creating or replacing an item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemInput {
    pub content: String,
    #[serde(default)]
    pub is_complete: bool,
}

impl ItemInput {
    pub fn new(content: impl Into<String>, is_complete: bool) -> Self {
        Self {
            content: content.into(),
            is_complete,
        }
    }

    /// Rejects a blank `content`.
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text("content", &self.content)
    }
}
