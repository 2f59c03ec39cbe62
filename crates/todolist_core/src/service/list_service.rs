//! List use-case service.
//!
//! # Responsibility
//! - Mint lists with fresh ids and secret keys.
//! - Gate get/update/delete behind the list key.
//! - Provide `validate`, the single access gate reused by item operations.
//!
//! # Invariants
//! - The key is returned only by `create` and `update`.
//! - A wrong key on an existing list is `Unauthorized`, never `ListNotFound`.
//! - `delete` removes the list and its items as one unit.

use crate::model::list::{ListInput, ListView, TodoList};
use crate::model::token::keys_match;
use crate::repo::todo_store::TodoStore;
use crate::service::error::{TodoError, TodoResult};
use log::{info, warn};

/// List service facade over a todo store.
pub struct ListService<S: TodoStore> {
    store: S,
}

impl<S: TodoStore> ListService<S> {
    /// Creates a service using the provided store implementation.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub(crate) fn store(&self) -> &S {
        &self.store
    }

    /// Creates a list and returns it together with its secret key.
    pub fn create(&self, input: &ListInput) -> TodoResult<ListView> {
        input.validate()?;

        let list = TodoList::new(input.name.as_str());
        self.store.insert_list(&list)?;
        info!(
            "event=list_create module=service status=ok list_id={}",
            list.id
        );
        Ok(ListView::with_key(&list))
    }

    /// Gets one list without its key.
    pub fn get(&self, list_id: &str, key: &str) -> TodoResult<ListView> {
        let list = self.validate(list_id, key)?;
        Ok(ListView::without_key(&list))
    }

    /// Renames a list and acknowledges the still-valid key.
    pub fn update(&self, list_id: &str, key: &str, input: &ListInput) -> TodoResult<ListView> {
        let mut list = self.validate(list_id, key)?;
        input.validate()?;

        list.name = input.name.clone();
        self.store.update_list(&list)?;
        info!(
            "event=list_update module=service status=ok list_id={}",
            list.id
        );
        Ok(ListView::with_key(&list))
    }

    /// Deletes a list together with all of its items.
    pub fn delete(&self, list_id: &str, key: &str) -> TodoResult<()> {
        let list = self.validate(list_id, key)?;
        let removed_items = self.store.delete_list_cascade(&list.id)?;
        info!(
            "event=list_delete module=service status=ok list_id={} removed_items={}",
            list.id, removed_items
        );
        Ok(())
    }

    /// Resolves a list and checks the supplied key against it.
    ///
    /// # Errors
    /// - `ListNotFound` when no list has this id.
    /// - `Unauthorized` when the list exists but the key differs.
    pub fn validate(&self, list_id: &str, key: &str) -> TodoResult<TodoList> {
        let list = self
            .store
            .find_list(list_id)?
            .ok_or_else(|| TodoError::ListNotFound(list_id.to_string()))?;

        if !keys_match(&list.key, key) {
            warn!(
                "event=list_auth module=service status=denied list_id={}",
                list.id
            );
            return Err(TodoError::Unauthorized(list.id));
        }
        Ok(list)
    }
}
