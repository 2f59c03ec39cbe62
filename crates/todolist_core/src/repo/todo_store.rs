//! Todo store contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide lookup, insert, update and delete over `todo_lists` and
//!   `todo_items`.
//! - Keep SQL details inside the persistence boundary.
//!
//! # Invariants
//! - Every call is committed when it returns.
//! - `delete_list_cascade` removes the list row and all of its items in one
//!   IMMEDIATE transaction.
//! - Item inserts are not fenced against that transaction: an item whose
//!   list was validated just before the cascade commits is inserted after
//!   it and remains as an orphan row.
//! - Read paths reject invalid persisted state instead of masking it.

use crate::db::migrations::{latest_version, schema_version};
use crate::model::item::{ItemId, TodoItem};
use crate::model::list::{ListId, TodoList};
use rusqlite::{params, Connection, Row, Transaction, TransactionBehavior};
use std::error::Error;
use std::fmt::{Display, Formatter};

const LIST_SELECT_SQL: &str = "SELECT id, key, name FROM todo_lists";
const ITEM_SELECT_SQL: &str = "SELECT id, list_id, content, is_complete FROM todo_items";

pub type StoreResult<T> = Result<T, StoreError>;

/// Persistence error for list and item storage.
#[derive(Debug)]
pub enum StoreError {
    Sqlite(rusqlite::Error),
    /// Database was written by a newer binary.
    UnsupportedSchemaVersion {
        db_version: u32,
        latest_supported: u32,
    },
    ListNotFound(ListId),
    ItemNotFound(ItemId),
    /// Connection schema is not at the expected migrated version.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    MissingRequiredTable(&'static str),
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
    InvalidData(String),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "{err}"),
            Self::UnsupportedSchemaVersion {
                db_version,
                latest_supported,
            } => write!(
                f,
                "database schema version {db_version} is newer than supported {latest_supported}"
            ),
            Self::ListNotFound(id) => write!(f, "list not found: {id}"),
            Self::ItemNotFound(id) => write!(f, "item not found: {id}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "todo store requires schema version {expected_version}, got {actual_version}"
            ),
            Self::MissingRequiredTable(table) => {
                write!(f, "todo store requires table `{table}`")
            }
            Self::MissingRequiredColumn { table, column } => write!(
                f,
                "todo store requires column `{column}` in table `{table}`"
            ),
            Self::InvalidData(message) => write!(f, "invalid persisted todo data: {message}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            _ => None,
        }
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}

/// Storage contract consumed by the list and item services.
pub trait TodoStore {
    fn find_list(&self, id: &str) -> StoreResult<Option<TodoList>>;
    fn insert_list(&self, list: &TodoList) -> StoreResult<()>;
    /// Overwrites the mutable fields of an existing list.
    fn update_list(&self, list: &TodoList) -> StoreResult<()>;
    /// Removes the list and every item whose `list_id` matches.
    ///
    /// Returns the number of items removed.
    fn delete_list_cascade(&self, id: &str) -> StoreResult<usize>;

    fn find_item(&self, id: &str) -> StoreResult<Option<TodoItem>>;
    /// Returns the items of one list in insertion order.
    fn find_items_by_list(&self, list_id: &str) -> StoreResult<Vec<TodoItem>>;
    fn insert_item(&self, item: &TodoItem) -> StoreResult<()>;
    /// Overwrites `content` and `is_complete` of an existing item.
    fn update_item(&self, item: &TodoItem) -> StoreResult<()>;
    fn delete_item(&self, id: &str) -> StoreResult<()>;
}

/// SQLite-backed todo store.
pub struct SqliteTodoStore<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteTodoStore<'conn> {
    /// Creates a store from a migrated connection.
    pub fn try_new(conn: &'conn Connection) -> StoreResult<Self> {
        ensure_store_connection_ready(conn)?;
        Ok(Self { conn })
    }
}

impl TodoStore for SqliteTodoStore<'_> {
    fn find_list(&self, id: &str) -> StoreResult<Option<TodoList>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{LIST_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_list_row(row)?));
        }
        Ok(None)
    }

    fn insert_list(&self, list: &TodoList) -> StoreResult<()> {
        self.conn.execute(
            "INSERT INTO todo_lists (id, key, name) VALUES (?1, ?2, ?3);",
            params![list.id.as_str(), list.key.as_str(), list.name.as_str()],
        )?;
        Ok(())
    }

    fn update_list(&self, list: &TodoList) -> StoreResult<()> {
        let changed = self.conn.execute(
            "UPDATE todo_lists
             SET
                name = ?1,
                updated_at = (strftime('%s', 'now') * 1000)
             WHERE id = ?2;",
            params![list.name.as_str(), list.id.as_str()],
        )?;

        if changed == 0 {
            return Err(StoreError::ListNotFound(list.id.clone()));
        }
        Ok(())
    }

    fn delete_list_cascade(&self, id: &str) -> StoreResult<usize> {
        let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Immediate)?;

        let removed_lists = tx.execute("DELETE FROM todo_lists WHERE id = ?1;", [id])?;
        if removed_lists == 0 {
            return Err(StoreError::ListNotFound(id.to_string()));
        }
        let removed_items = tx.execute("DELETE FROM todo_items WHERE list_id = ?1;", [id])?;

        tx.commit()?;
        Ok(removed_items)
    }

    fn find_item(&self, id: &str) -> StoreResult<Option<TodoItem>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{ITEM_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_item_row(row)?));
        }
        Ok(None)
    }

    fn find_items_by_list(&self, list_id: &str) -> StoreResult<Vec<TodoItem>> {
        let mut stmt = self.conn.prepare(&format!(
            "{ITEM_SELECT_SQL}
             WHERE list_id = ?1
             ORDER BY created_at ASC, rowid ASC;"
        ))?;
        let mut rows = stmt.query([list_id])?;
        let mut items = Vec::new();
        while let Some(row) = rows.next()? {
            items.push(parse_item_row(row)?);
        }
        Ok(items)
    }

    fn insert_item(&self, item: &TodoItem) -> StoreResult<()> {
        self.conn.execute(
            "INSERT INTO todo_items (id, list_id, content, is_complete)
             VALUES (?1, ?2, ?3, ?4);",
            params![
                item.id.as_str(),
                item.list_id.as_str(),
                item.content.as_str(),
                bool_to_int(item.is_complete),
            ],
        )?;
        Ok(())
    }

    fn update_item(&self, item: &TodoItem) -> StoreResult<()> {
        let changed = self.conn.execute(
            "UPDATE todo_items
             SET
                content = ?1,
                is_complete = ?2,
                updated_at = (strftime('%s', 'now') * 1000)
             WHERE id = ?3;",
            params![
                item.content.as_str(),
                bool_to_int(item.is_complete),
                item.id.as_str(),
            ],
        )?;

        if changed == 0 {
            return Err(StoreError::ItemNotFound(item.id.clone()));
        }
        Ok(())
    }

    fn delete_item(&self, id: &str) -> StoreResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM todo_items WHERE id = ?1;", [id])?;
        if changed == 0 {
            return Err(StoreError::ItemNotFound(id.to_string()));
        }
        Ok(())
    }
}

fn parse_list_row(row: &Row<'_>) -> StoreResult<TodoList> {
    Ok(TodoList {
        id: row.get("id")?,
        key: row.get("key")?,
        name: row.get("name")?,
    })
}

fn parse_item_row(row: &Row<'_>) -> StoreResult<TodoItem> {
    let is_complete = match row.get::<_, i64>("is_complete")? {
        0 => false,
        1 => true,
        other => {
            return Err(StoreError::InvalidData(format!(
                "invalid is_complete value `{other}` in todo_items.is_complete"
            )));
        }
    };

    Ok(TodoItem {
        id: row.get("id")?,
        list_id: row.get("list_id")?,
        content: row.get("content")?,
        is_complete,
    })
}

fn bool_to_int(value: bool) -> i64 {
    if value {
        1
    } else {
        0
    }
}

fn ensure_store_connection_ready(conn: &Connection) -> StoreResult<()> {
    let expected_version = latest_version();
    let actual_version = schema_version(conn)?;
    if actual_version != expected_version {
        return Err(StoreError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }

    let required: [(&'static str, &[&'static str]); 2] = [
        ("todo_lists", &["id", "key", "name", "created_at", "updated_at"]),
        (
            "todo_items",
            &["id", "list_id", "content", "is_complete", "created_at", "updated_at"],
        ),
    ];
    for (table, columns) in required {
        if !table_exists(conn, table)? {
            return Err(StoreError::MissingRequiredTable(table));
        }
        for &column in columns {
            if !table_has_column(conn, table, column)? {
                return Err(StoreError::MissingRequiredColumn { table, column });
            }
        }
    }

    Ok(())
}

fn table_exists(conn: &Connection, table: &str) -> StoreResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

fn table_has_column(conn: &Connection, table: &str, column: &str) -> StoreResult<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({table});"))?;
    let mut rows = stmt.query([])?;
    while let Some(row) = rows.next()? {
        let current: String = row.get(1)?;
        if current == column {
            return Ok(true);
        }
    }
    Ok(false)
}
