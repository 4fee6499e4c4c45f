//! The persistence contract shared by every backend

use super::error::Result;
use super::{Item, ItemId, ListId, TodoList};

/// Operations every storage backend implements with identical semantics.
///
/// Lookups report a missing list as `None`. Mutations that name a list or
/// item that does not exist are silent no-ops. `Err` is reserved for
/// backend failures and is never retried here.
///
/// Names are stored as given; length and uniqueness checks belong to the
/// caller (see [`validation`](super::validation)).
pub trait TodoStore {
    /// Look up a single list with its aggregates
    fn find_list(&self, list_id: ListId) -> Result<Option<TodoList>>;

    /// All lists, ordered by name (then id)
    fn all_lists(&self) -> Result<Vec<TodoList>>;

    /// Items of a list in id order; empty for an unknown list
    fn list_items(&self, list_id: ListId) -> Result<Vec<Item>>;

    /// Create an empty list and return its id
    fn create_list(&mut self, name: &str) -> Result<ListId>;

    /// Delete a list together with all of its items
    fn delete_list(&mut self, list_id: ListId) -> Result<()>;

    fn rename_list(&mut self, list_id: ListId, new_name: &str) -> Result<()>;

    /// Append an open item; `None` when the list does not exist
    fn add_item(&mut self, list_id: ListId, name: &str) -> Result<Option<ItemId>>;

    fn delete_item(&mut self, list_id: ListId, item_id: ItemId) -> Result<()>;

    fn set_item_status(&mut self, list_id: ListId, item_id: ItemId, completed: bool) -> Result<()>;

    /// Mark every item of the list completed. An empty list is left alone.
    fn complete_all(&mut self, list_id: ListId) -> Result<()>;

    /// Release backend resources. Call once at shutdown.
    fn disconnect(self) -> Result<()>
    where
        Self: Sized;
}
