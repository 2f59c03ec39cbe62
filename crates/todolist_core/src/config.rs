//! Runtime configuration for the todo-list core.
//!
//! # Responsibility
//! - Hold database, logging and item-scope settings in one value.
//! - Load settings from `TODOLIST_*` environment variables.
//!
//! # Invariants
//! - Defaults produce a working in-memory service with lenient item scope.
//! - Unknown enum values are rejected, never silently defaulted.

use crate::db::{open_db, open_db_in_memory};
use crate::logging::default_log_level;
use crate::repo::todo_store::StoreResult;
use rusqlite::Connection;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;
use std::str::FromStr;

pub const ENV_DB_PATH: &str = "TODOLIST_DB_PATH";
pub const ENV_LOG_LEVEL: &str = "TODOLIST_LOG_LEVEL";
pub const ENV_LOG_DIR: &str = "TODOLIST_LOG_DIR";
pub const ENV_ITEM_SCOPE: &str = "TODOLIST_ITEM_SCOPE";

/// How item ids are resolved relative to the list in the request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ItemScope {
    /// Item ids are global; any item can be read through any list whose key
    /// the caller holds.
    #[default]
    Lenient,
    /// An item is only visible through the list that owns it.
    Strict,
}

impl ItemScope {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Lenient => "lenient",
            Self::Strict => "strict",
        }
    }
}

impl FromStr for ItemScope {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "lenient" => Ok(Self::Lenient),
            "strict" => Ok(Self::Strict),
            other => Err(ConfigError::InvalidValue {
                name: ENV_ITEM_SCOPE,
                value: other.to_string(),
                expected: "lenient|strict",
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    InvalidValue {
        name: &'static str,
        value: String,
        expected: &'static str,
    },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidValue {
                name,
                value,
                expected,
            } => write!(f, "invalid value `{value}` for {name}; expected {expected}"),
        }
    }
}

impl Error for ConfigError {}

/// Settings for one todo-list process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    /// SQLite file; `None` means a fresh in-memory database.
    pub db_path: Option<PathBuf>,
    pub log_level: String,
    /// Absolute directory for rolling log files; `None` disables file logs.
    pub log_dir: Option<PathBuf>,
    pub item_scope: ItemScope,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            db_path: None,
            log_level: default_log_level().to_string(),
            log_dir: None,
            item_scope: ItemScope::default(),
        }
    }
}

impl ServiceConfig {
    /// Loads settings from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Loads settings through an arbitrary variable lookup.
    ///
    /// Blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let read = |name: &str| {
            lookup(name)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let mut config = Self::default();
        if let Some(path) = read(ENV_DB_PATH) {
            config.db_path = Some(PathBuf::from(path));
        }
        if let Some(level) = read(ENV_LOG_LEVEL) {
            config.log_level = level;
        }
        if let Some(dir) = read(ENV_LOG_DIR) {
            config.log_dir = Some(PathBuf::from(dir));
        }
        if let Some(scope) = read(ENV_ITEM_SCOPE) {
            config.item_scope = scope.parse()?;
        }
        Ok(config)
    }

    /// Opens the configured database with migrations applied.
    pub fn open_connection(&self) -> StoreResult<Connection> {
        match &self.db_path {
            Some(path) => open_db(path),
            None => open_db_in_memory(),
        }
    }
}
