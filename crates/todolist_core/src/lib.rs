//! Core of the todo-list service.
//!
//! Lists are guarded by a server-generated secret key; items live inside
//! lists. This crate owns identity minting, the key gate, cascade deletes
//! and the SQLite store behind them.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use config::{ConfigError, ItemScope, ServiceConfig};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::item::{ItemId, ItemInput, ItemView, TodoItem};
pub use model::list::{ListId, ListInput, ListView, TodoList};
pub use model::ValidationError;
pub use repo::todo_store::{SqliteTodoStore, StoreError, StoreResult, TodoStore};
pub use service::error::{TodoError, TodoResult};
pub use service::item_service::ItemService;
pub use service::list_service::ListService;
