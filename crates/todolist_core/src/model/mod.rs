//! Domain model for lists, items and their access tokens.
//!
//! # Responsibility
//! - Define the stored records (`TodoList`, `TodoItem`).
//! - Define the caller-facing projections (`ListView`, `ItemView`).
//! - Define request inputs and their validation rules.
//!
//! # Invariants
//! - A list key is only ever exposed through `ListView::with_key`.
//! - Every item references exactly one owning list by `list_id`.

pub mod item;
pub mod list;
pub mod token;

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Input validation failure for list and item requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Required text field is missing or blank.
    BlankField(&'static str),
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankField(field) => write!(f, "`{field}` is required and must not be blank"),
        }
    }
}

impl Error for ValidationError {}

pub(crate) fn require_text(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::BlankField(field));
    }
    Ok(())
}
