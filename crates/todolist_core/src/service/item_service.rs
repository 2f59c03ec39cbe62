//! Item use-case service.
//!
//! # Responsibility
//! - Provide list/create/get/update/delete for items inside a list.
//! - Apply the configured `ItemScope` when resolving items by id.
//!
//! # Invariants
//! - The parent list is validated before any item is looked up, so callers
//!   without the key cannot learn whether an item id exists.
//! - `ItemScope::Lenient` resolves item ids globally; `ItemScope::Strict`
//!   reports items of other lists as `ItemNotFound`.

use crate::config::ItemScope;
use crate::model::item::{ItemInput, ItemView, TodoItem};
use crate::model::list::TodoList;
use crate::repo::todo_store::TodoStore;
use crate::service::error::{TodoError, TodoResult};
use crate::service::list_service::ListService;
use log::{debug, info};

/// Item service facade; owns the list gate it validates through.
pub struct ItemService<S: TodoStore> {
    lists: ListService<S>,
    scope: ItemScope,
}

impl<S: TodoStore> ItemService<S> {
    /// Creates a service with lenient item scope.
    pub fn new(store: S) -> Self {
        Self::with_scope(store, ItemScope::default())
    }

    pub fn with_scope(store: S, scope: ItemScope) -> Self {
        Self {
            lists: ListService::new(store),
            scope,
        }
    }

    pub fn scope(&self) -> ItemScope {
        self.scope
    }

    /// Lists every item of a list in insertion order.
    pub fn list(&self, list_id: &str, key: &str) -> TodoResult<Vec<ItemView>> {
        let list = self.lists.validate(list_id, key)?;
        let items = self.lists.store().find_items_by_list(&list.id)?;
        Ok(items.into_iter().map(ItemView::from).collect())
    }

    /// Adds an item to a list.
    pub fn create(&self, list_id: &str, key: &str, input: &ItemInput) -> TodoResult<ItemView> {
        let list = self.lists.validate(list_id, key)?;
        input.validate()?;

        let item = TodoItem::new(list.id, input.content.as_str(), input.is_complete);
        self.lists.store().insert_item(&item)?;
        info!(
            "event=item_create module=service status=ok list_id={} item_id={}",
            item.list_id, item.id
        );
        Ok(ItemView::from(item))
    }

    pub fn get(&self, list_id: &str, item_id: &str, key: &str) -> TodoResult<ItemView> {
        let list = self.lists.validate(list_id, key)?;
        let item = self.load_item(&list, item_id)?;
        Ok(ItemView::from(item))
    }

    /// Replaces `content` and `is_complete` of an item.
    pub fn update(
        &self,
        list_id: &str,
        item_id: &str,
        key: &str,
        input: &ItemInput,
    ) -> TodoResult<ItemView> {
        let list = self.lists.validate(list_id, key)?;
        let mut item = self.load_item(&list, item_id)?;
        input.validate()?;

        item.content = input.content.clone();
        item.is_complete = input.is_complete;
        self.lists.store().update_item(&item)?;
        info!(
            "event=item_update module=service status=ok list_id={} item_id={}",
            list.id, item.id
        );
        Ok(ItemView::from(item))
    }

    pub fn delete(&self, list_id: &str, item_id: &str, key: &str) -> TodoResult<()> {
        let list = self.lists.validate(list_id, key)?;
        let item = self.load_item(&list, item_id)?;
        self.lists.store().delete_item(&item.id)?;
        info!(
            "event=item_delete module=service status=ok list_id={} item_id={}",
            list.id, item.id
        );
        Ok(())
    }

    fn load_item(&self, list: &TodoList, item_id: &str) -> TodoResult<TodoItem> {
        let item = self
            .lists
            .store()
            .find_item(item_id)?
            .ok_or_else(|| TodoError::ItemNotFound(item_id.to_string()))?;

        if item.list_id != list.id {
            debug!(
                "event=item_lookup module=service status=cross_list scope={} list_id={} item_id={} owner_list_id={}",
                self.scope.as_str(),
                list.id,
                item.id,
                item.list_id
            );
            if self.scope == ItemScope::Strict {
                return Err(TodoError::ItemNotFound(item.id));
            }
        }
        Ok(item)
    }
}
