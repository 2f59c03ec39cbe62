//! Error taxonomy surfaced by list and item services.

use crate::model::item::ItemId;
use crate::model::list::ListId;
use crate::model::ValidationError;
use crate::repo::todo_store::StoreError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type TodoResult<T> = Result<T, TodoError>;

/// Terminal failure of one list or item operation.
#[derive(Debug)]
pub enum TodoError {
    /// No list with this id exists.
    ListNotFound(ListId),
    /// No item with this id exists (or, in strict scope, not in this list).
    ItemNotFound(ItemId),
    /// The list exists but the supplied key does not match.
    Unauthorized(ListId),
    /// Request input is missing a required field.
    Validation(ValidationError),
    /// Persistence failure.
    Store(StoreError),
}

impl TodoError {
    /// HTTP status semantics for this failure.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::ListNotFound(_) | Self::ItemNotFound(_) => 404,
            Self::Unauthorized(_) => 401,
            Self::Validation(_) => 400,
            Self::Store(_) => 500,
        }
    }

    /// Stable code used in log lines and error payloads.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::ListNotFound(_) => "list_not_found",
            Self::ItemNotFound(_) => "item_not_found",
            Self::Unauthorized(_) => "unauthorized",
            Self::Validation(_) => "validation_failed",
            Self::Store(_) => "store_failed",
        }
    }
}

impl Display for TodoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ListNotFound(id) => write!(f, "list not found: {id}"),
            Self::ItemNotFound(id) => write!(f, "item not found: {id}"),
            Self::Unauthorized(id) => write!(f, "key does not match list: {id}"),
            Self::Validation(err) => write!(f, "{err}"),
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for TodoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Store(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ValidationError> for TodoError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<StoreError> for TodoError {
    fn from(value: StoreError) -> Self {
        match value {
            StoreError::ListNotFound(id) => Self::ListNotFound(id),
            StoreError::ItemNotFound(id) => Self::ItemNotFound(id),
            other => Self::Store(other),
        }
    }
}
