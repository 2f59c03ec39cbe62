use rusqlite::Connection;
use std::collections::HashSet;
use todolist_core::db::open_db_in_memory;
use todolist_core::{
    ItemInput, ItemScope, ItemService, ListInput, ListService, SqliteTodoStore, TodoError,
    TodoStore,
};

struct Fixture {
    conn: Connection,
}

impl Fixture {
    fn new() -> Self {
        Self {
            conn: open_db_in_memory().unwrap(),
        }
    }

    fn lists(&self) -> ListService<SqliteTodoStore<'_>> {
        ListService::new(SqliteTodoStore::try_new(&self.conn).unwrap())
    }

    fn items(&self, scope: ItemScope) -> ItemService<SqliteTodoStore<'_>> {
        ItemService::with_scope(SqliteTodoStore::try_new(&self.conn).unwrap(), scope)
    }

    /// Returns `(list_id, key)` of a fresh list.
    fn list(&self, name: &str) -> (String, String) {
        let created = self.lists().create(&ListInput::new(name)).unwrap();
        (created.id, created.key.unwrap())
    }
}

#[test]
fn create_then_get_and_update_roundtrip() {
    let fx = Fixture::new();
    let items = fx.items(ItemScope::Lenient);
    let (list_id, key) = fx.list("Groceries");

    let created = items
        .create(&list_id, &key, &ItemInput::new("x", false))
        .unwrap();
    assert_eq!(created.list_id, list_id);

    let fetched = items.get(&list_id, &created.id, &key).unwrap();
    assert_eq!(fetched.content, "x");
    assert!(!fetched.is_complete);

    let updated = items
        .update(&list_id, &created.id, &key, &ItemInput::new("y", true))
        .unwrap();
    assert_eq!(updated.content, "y");
    assert!(updated.is_complete);

    let fetched = items.get(&list_id, &created.id, &key).unwrap();
    assert_eq!(fetched.content, "y");
    assert!(fetched.is_complete);
}

#[test]
fn create_honors_explicit_completion_flag() {
    let fx = Fixture::new();
    let items = fx.items(ItemScope::Lenient);
    let (list_id, key) = fx.list("Done already");

    let created = items
        .create(&list_id, &key, &ItemInput::new("paid rent", true))
        .unwrap();
    assert!(created.is_complete);
}

#[test]
fn list_returns_only_this_lists_items_in_insertion_order() {
    let fx = Fixture::new();
    let items = fx.items(ItemScope::Lenient);
    let (list_a, key_a) = fx.list("A");
    let (list_b, key_b) = fx.list("B");

    for content in ["one", "two", "three"] {
        items
            .create(&list_a, &key_a, &ItemInput::new(content, false))
            .unwrap();
    }
    items
        .create(&list_b, &key_b, &ItemInput::new("elsewhere", false))
        .unwrap();

    let contents: Vec<String> = items
        .list(&list_a, &key_a)
        .unwrap()
        .into_iter()
        .map(|item| item.content)
        .collect();
    assert_eq!(contents, vec!["one", "two", "three"]);
    assert_eq!(items.list(&list_b, &key_b).unwrap().len(), 1);
}

#[test]
fn empty_list_has_no_items() {
    let fx = Fixture::new();
    let items = fx.items(ItemScope::Lenient);
    let (list_id, key) = fx.list("Empty");

    assert!(items.list(&list_id, &key).unwrap().is_empty());
}

#[test]
fn wrong_key_is_unauthorized_and_hides_item_existence() {
    let fx = Fixture::new();
    let items = fx.items(ItemScope::Lenient);
    let (list_id, key) = fx.list("Private");
    let item = items
        .create(&list_id, &key, &ItemInput::new("secret", false))
        .unwrap();

    let input = ItemInput::new("tampered", true);
    for item_id in [item.id.as_str(), "does-not-exist"] {
        assert!(matches!(
            items.get(&list_id, item_id, "bad"),
            Err(TodoError::Unauthorized(_))
        ));
        assert!(matches!(
            items.update(&list_id, item_id, "bad", &input),
            Err(TodoError::Unauthorized(_))
        ));
        assert!(matches!(
            items.delete(&list_id, item_id, "bad"),
            Err(TodoError::Unauthorized(_))
        ));
    }
    assert!(matches!(
        items.list(&list_id, "bad"),
        Err(TodoError::Unauthorized(_))
    ));
    assert!(matches!(
        items.create(&list_id, "bad", &input),
        Err(TodoError::Unauthorized(_))
    ));

    let unchanged = items.get(&list_id, &item.id, &key).unwrap();
    assert_eq!(unchanged.content, "secret");
    assert_eq!(items.list(&list_id, &key).unwrap().len(), 1);
}

#[test]
fn missing_list_is_not_found_for_item_operations() {
    let fx = Fixture::new();
    let items = fx.items(ItemScope::Lenient);

    let err = items.list("missing", "k").unwrap_err();
    assert!(matches!(err, TodoError::ListNotFound(_)));
    let err = items
        .create("missing", "k", &ItemInput::new("x", false))
        .unwrap_err();
    assert_eq!(err.status_code(), 404);
}

#[test]
fn missing_item_is_not_found() {
    let fx = Fixture::new();
    let items = fx.items(ItemScope::Lenient);
    let (list_id, key) = fx.list("L");

    let err = items.get(&list_id, "nope", &key).unwrap_err();
    assert!(matches!(err, TodoError::ItemNotFound(id) if id == "nope"));
    assert!(matches!(
        items.update(&list_id, "nope", &key, &ItemInput::new("x", false)),
        Err(TodoError::ItemNotFound(_))
    ));
    assert!(matches!(
        items.delete(&list_id, "nope", &key),
        Err(TodoError::ItemNotFound(_))
    ));
}

#[test]
fn blank_content_is_rejected() {
    let fx = Fixture::new();
    let items = fx.items(ItemScope::Lenient);
    let (list_id, key) = fx.list("L");

    let err = items
        .create(&list_id, &key, &ItemInput::new(" \n", false))
        .unwrap_err();
    assert_eq!(err.status_code(), 400);
    assert!(items.list(&list_id, &key).unwrap().is_empty());
}

#[test]
fn delete_removes_single_item() {
    let fx = Fixture::new();
    let items = fx.items(ItemScope::Lenient);
    let (list_id, key) = fx.list("L");
    let keep = items
        .create(&list_id, &key, &ItemInput::new("keep", false))
        .unwrap();
    let dropped = items
        .create(&list_id, &key, &ItemInput::new("drop", false))
        .unwrap();

    items.delete(&list_id, &dropped.id, &key).unwrap();

    assert!(matches!(
        items.get(&list_id, &dropped.id, &key),
        Err(TodoError::ItemNotFound(_))
    ));
    let remaining = items.list(&list_id, &key).unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].id, keep.id);
}

#[test]
fn lenient_scope_reads_items_of_other_lists() {
    let fx = Fixture::new();
    let items = fx.items(ItemScope::Lenient);
    let (list_a, key_a) = fx.list("A");
    let (list_b, key_b) = fx.list("B");
    let foreign = items
        .create(&list_b, &key_b, &ItemInput::new("belongs to B", false))
        .unwrap();

    let fetched = items.get(&list_a, &foreign.id, &key_a).unwrap();
    assert_eq!(fetched.id, foreign.id);
    assert_eq!(fetched.list_id, list_b);

    // Still gated by A's key.
    assert!(matches!(
        items.get(&list_a, &foreign.id, &key_b),
        Err(TodoError::Unauthorized(_))
    ));
}

#[test]
fn lenient_scope_updates_items_of_other_lists() {
    let fx = Fixture::new();
    let items = fx.items(ItemScope::Lenient);
    let (list_a, key_a) = fx.list("A");
    let (list_b, key_b) = fx.list("B");
    let foreign = items
        .create(&list_b, &key_b, &ItemInput::new("belongs to B", false))
        .unwrap();

    let updated = items
        .update(&list_a, &foreign.id, &key_a, &ItemInput::new("edited via A", true))
        .unwrap();
    assert_eq!(updated.list_id, list_b);

    let seen_from_b = items.get(&list_b, &foreign.id, &key_b).unwrap();
    assert_eq!(seen_from_b.content, "edited via A");
    assert!(seen_from_b.is_complete);
    assert_eq!(seen_from_b.list_id, list_b);
    assert!(items.list(&list_a, &key_a).unwrap().is_empty());
}

#[test]
fn lenient_scope_deletes_items_of_other_lists() {
    let fx = Fixture::new();
    let items = fx.items(ItemScope::Lenient);
    let (list_a, key_a) = fx.list("A");
    let (list_b, key_b) = fx.list("B");
    let foreign = items
        .create(&list_b, &key_b, &ItemInput::new("belongs to B", false))
        .unwrap();

    items.delete(&list_a, &foreign.id, &key_a).unwrap();

    assert!(items.list(&list_b, &key_b).unwrap().is_empty());
    assert!(matches!(
        items.get(&list_b, &foreign.id, &key_b),
        Err(TodoError::ItemNotFound(_))
    ));
}

#[test]
fn strict_scope_hides_items_of_other_lists() {
    let fx = Fixture::new();
    let items = fx.items(ItemScope::Strict);
    assert_eq!(items.scope(), ItemScope::Strict);
    let (list_a, key_a) = fx.list("A");
    let (list_b, key_b) = fx.list("B");
    let foreign = items
        .create(&list_b, &key_b, &ItemInput::new("belongs to B", false))
        .unwrap();

    assert!(matches!(
        items.get(&list_a, &foreign.id, &key_a),
        Err(TodoError::ItemNotFound(_))
    ));
    assert!(matches!(
        items.update(&list_a, &foreign.id, &key_a, &ItemInput::new("x", true)),
        Err(TodoError::ItemNotFound(_))
    ));
    assert!(matches!(
        items.delete(&list_a, &foreign.id, &key_a),
        Err(TodoError::ItemNotFound(_))
    ));

    let untouched = items.get(&list_b, &foreign.id, &key_b).unwrap();
    assert_eq!(untouched.content, "belongs to B");
}

#[test]
fn created_items_have_distinct_ids() {
    let fx = Fixture::new();
    let items = fx.items(ItemScope::Lenient);
    let (list_id, key) = fx.list("Many");

    let ids: HashSet<String> = (0..100)
        .map(|n| {
            items
                .create(&list_id, &key, &ItemInput::new(format!("item {n}"), false))
                .unwrap()
                .id
        })
        .collect();
    assert_eq!(ids.len(), 100);
}

#[test]
fn groceries_scenario_cascades_on_list_delete() {
    let fx = Fixture::new();
    let lists = fx.lists();
    let items = fx.items(ItemScope::Lenient);

    let list = lists.create(&ListInput::new("Groceries")).unwrap();
    let key = list.key.clone().unwrap();
    assert_eq!(list.name, "Groceries");

    let milk = items
        .create(&list.id, &key, &ItemInput::new("Milk", false))
        .unwrap();
    assert_eq!(milk.list_id, list.id);
    assert_eq!(milk.content, "Milk");
    assert!(!milk.is_complete);

    lists.delete(&list.id, &key).unwrap();

    let err = items.get(&list.id, &milk.id, &key).unwrap_err();
    assert!(matches!(err, TodoError::ListNotFound(_)));
    assert_eq!(err.status_code(), 404);

    let store = SqliteTodoStore::try_new(&fx.conn).unwrap();
    assert!(store.find_item(&milk.id).unwrap().is_none());
}
