//! Dispatches one parsed command to the core services.
//!
//! Each command maps to exactly one list or item operation and yields the
//! status its HTTP counterpart would answer with.

use crate::cli::{Commands, ItemCommands, ListCommands};
use rusqlite::Connection;
use serde::Serialize;
use serde_json::Value;
use todolist_core::{
    ItemInput, ItemScope, ItemService, ListInput, ListService, SqliteTodoStore, TodoError,
};

const STATUS_OK: u16 = 200;
const STATUS_CREATED: u16 = 201;

/// Successful command result.
#[derive(Debug, Serialize)]
pub struct Outcome {
    pub status: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<Value>,
}

impl Outcome {
    fn with_body(status: u16, body: impl Serialize) -> Result<Self, Failure> {
        let body = serde_json::to_value(body).map_err(Failure::internal)?;
        Ok(Self {
            status,
            body: Some(body),
        })
    }

    fn empty() -> Self {
        Self {
            status: STATUS_OK,
            body: None,
        }
    }
}

/// Failed command result, shaped like an HTTP error payload.
#[derive(Debug, Serialize)]
pub struct Failure {
    pub status: u16,
    pub code: &'static str,
    pub error: String,
}

impl Failure {
    pub fn internal(err: impl std::fmt::Display) -> Self {
        Self {
            status: 500,
            code: "internal",
            error: err.to_string(),
        }
    }
}

impl From<TodoError> for Failure {
    fn from(err: TodoError) -> Self {
        Self {
            status: err.status_code(),
            code: err.error_code(),
            error: err.to_string(),
        }
    }
}

pub fn run(conn: &Connection, scope: ItemScope, command: Commands) -> Result<Outcome, Failure> {
    match command {
        Commands::List { command } => run_list(conn, command),
        Commands::Item { command } => run_item(conn, scope, command),
    }
}

fn run_list(conn: &Connection, command: ListCommands) -> Result<Outcome, Failure> {
    let lists = ListService::new(SqliteTodoStore::try_new(conn).map_err(Failure::internal)?);

    match command {
        ListCommands::Create { name } => {
            Outcome::with_body(STATUS_CREATED, lists.create(&ListInput::new(name))?)
        }
        ListCommands::Get { list_id, key } => {
            Outcome::with_body(STATUS_OK, lists.get(&list_id, &key.key)?)
        }
        ListCommands::Update { list_id, name, key } => Outcome::with_body(
            STATUS_OK,
            lists.update(&list_id, &key.key, &ListInput::new(name))?,
        ),
        ListCommands::Delete { list_id, key } => {
            lists.delete(&list_id, &key.key)?;
            Ok(Outcome::empty())
        }
    }
}

fn run_item(conn: &Connection, scope: ItemScope, command: ItemCommands) -> Result<Outcome, Failure> {
    let items = ItemService::with_scope(
        SqliteTodoStore::try_new(conn).map_err(Failure::internal)?,
        scope,
    );

    match command {
        ItemCommands::List { list_id, key } => {
            Outcome::with_body(STATUS_OK, items.list(&list_id, &key.key)?)
        }
        ItemCommands::Create {
            list_id,
            content,
            complete,
            key,
        } => Outcome::with_body(
            STATUS_CREATED,
            items.create(&list_id, &key.key, &ItemInput::new(content, complete))?,
        ),
        ItemCommands::Get {
            list_id,
            item_id,
            key,
        } => Outcome::with_body(STATUS_OK, items.get(&list_id, &item_id, &key.key)?),
        ItemCommands::Update {
            list_id,
            item_id,
            content,
            complete,
            key,
        } => Outcome::with_body(
            STATUS_OK,
            items.update(
                &list_id,
                &item_id,
                &key.key,
                &ItemInput::new(content, complete),
            )?,
        ),
        ItemCommands::Delete {
            list_id,
            item_id,
            key,
        } => {
            items.delete(&list_id, &item_id, &key.key)?;
            Ok(Outcome::empty())
        }
    }
}
