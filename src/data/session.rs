//! In-memory, session-scoped store
//!
//! Lists live in an ordered `Vec` owned by one session handle. Ids are
//! assigned as `max(existing) + 1` per collection, so a freed maximum id
//! can be handed out again; that is acceptable for ephemeral session data.
//!
//! A session can be loaded from and saved to a JSON snapshot file, which
//! stands in for the cookie a web session would travel in.

use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use super::error::{Result, StoreError};
use super::{Item, ItemId, ListId, TodoList, TodoStore};

/// A list as held in the session, items inline
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionList {
    pub id: ListId,
    pub name: String,
    pub items: Vec<Item>,
}

impl SessionList {
    fn summary(&self) -> TodoList {
        TodoList {
            id: self.id,
            name: self.name.clone(),
            total_count: self.items.len(),
            completed_count: self.items.iter().filter(|i| i.completed).count(),
        }
    }

    fn item_mut(&mut self, item_id: ItemId) -> Option<&mut Item> {
        self.items.iter_mut().find(|i| i.id == item_id)
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct Snapshot {
    lists: Vec<SessionList>,
}

/// Next id for a collection: one past the largest id present, or 1
fn next_id(ids: impl Iterator<Item = i64>) -> i64 {
    ids.max().unwrap_or(0) + 1
}

/// Store backed by the lists of a single session
#[derive(Debug, Default)]
pub struct SessionStore {
    lists: Vec<SessionList>,
    path: Option<PathBuf>,
}

impl SessionStore {
    /// Start an empty session
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap lists taken from an existing session
    pub fn from_lists(lists: Vec<SessionList>) -> Self {
        Self { lists, path: None }
    }

    /// Load a session snapshot. A missing file starts an empty session
    /// that will be written to `path` by [`save`](Self::save).
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let lists = match fs::read_to_string(path) {
            Ok(raw) => {
                let snapshot: Snapshot =
                    serde_json::from_str(&raw).map_err(|source| StoreError::SessionFormat {
                        path: path.to_path_buf(),
                        source,
                    })?;
                snapshot.lists
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Vec::new(),
            Err(source) => {
                return Err(StoreError::SessionIo {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };

        tracing::debug!(path = %path.display(), lists = lists.len(), "session loaded");

        Ok(Self {
            lists,
            path: Some(path.to_path_buf()),
        })
    }

    /// Save to the file the session was opened from; no-op for a session
    /// that never had a file.
    pub fn save(&self) -> Result<()> {
        match &self.path {
            Some(path) => self.save_to(path),
            None => Ok(()),
        }
    }

    /// Save to a specific file path
    pub fn save_to(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let snapshot = Snapshot {
            lists: self.lists.clone(),
        };
        let raw = serde_json::to_string_pretty(&snapshot).map_err(|source| {
            StoreError::SessionFormat {
                path: path.to_path_buf(),
                source,
            }
        })?;
        fs::write(path, raw).map_err(|source| StoreError::SessionIo {
            path: path.to_path_buf(),
            source,
        })?;

        tracing::debug!(path = %path.display(), lists = self.lists.len(), "session saved");
        Ok(())
    }

    fn list(&self, list_id: ListId) -> Option<&SessionList> {
        self.lists.iter().find(|l| l.id == list_id)
    }

    fn list_mut(&mut self, list_id: ListId) -> Option<&mut SessionList> {
        self.lists.iter_mut().find(|l| l.id == list_id)
    }
}

impl TodoStore for SessionStore {
    fn find_list(&self, list_id: ListId) -> Result<Option<TodoList>> {
        Ok(self.list(list_id).map(SessionList::summary))
    }

    fn all_lists(&self) -> Result<Vec<TodoList>> {
        let mut lists: Vec<TodoList> = self.lists.iter().map(SessionList::summary).collect();
        lists.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
        Ok(lists)
    }

    fn list_items(&self, list_id: ListId) -> Result<Vec<Item>> {
        Ok(self
            .list(list_id)
            .map(|l| l.items.clone())
            .unwrap_or_default())
    }

    fn create_list(&mut self, name: &str) -> Result<ListId> {
        let id = ListId(next_id(self.lists.iter().map(|l| l.id.0)));
        self.lists.push(SessionList {
            id,
            name: name.to_string(),
            items: Vec::new(),
        });
        Ok(id)
    }

    fn delete_list(&mut self, list_id: ListId) -> Result<()> {
        if let Some(list) = self.list_mut(list_id) {
            list.items.clear();
        }
        self.lists.retain(|l| l.id != list_id);
        Ok(())
    }

    fn rename_list(&mut self, list_id: ListId, new_name: &str) -> Result<()> {
        if let Some(list) = self.list_mut(list_id) {
            list.name = new_name.to_string();
        }
        Ok(())
    }

    fn add_item(&mut self, list_id: ListId, name: &str) -> Result<Option<ItemId>> {
        let Some(list) = self.list_mut(list_id) else {
            return Ok(None);
        };
        let id = ItemId(next_id(list.items.iter().map(|i| i.id.0)));
        list.items.push(Item::new(id, name));
        Ok(Some(id))
    }

    fn delete_item(&mut self, list_id: ListId, item_id: ItemId) -> Result<()> {
        if let Some(list) = self.list_mut(list_id) {
            list.items.retain(|i| i.id != item_id);
        }
        Ok(())
    }

    fn set_item_status(&mut self, list_id: ListId, item_id: ItemId, completed: bool) -> Result<()> {
        if let Some(item) = self.list_mut(list_id).and_then(|l| l.item_mut(item_id)) {
            item.completed = completed;
        }
        Ok(())
    }

    fn complete_all(&mut self, list_id: ListId) -> Result<()> {
        if let Some(list) = self.list_mut(list_id) {
            for item in &mut list.items {
                item.completed = true;
            }
        }
        Ok(())
    }

    fn disconnect(self) -> Result<()> {
        self.save()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn list_with_items(ids: &[i64]) -> SessionList {
        SessionList {
            id: ListId(1),
            name: "chores".to_string(),
            items: ids
                .iter()
                .map(|&id| Item::new(ItemId(id), format!("item {id}")))
                .collect(),
        }
    }

    #[test]
    fn test_next_id_after_gap() {
        let mut store = SessionStore::from_lists(vec![list_with_items(&[1, 3])]);

        let id = store.add_item(ListId(1), "sweep").unwrap();
        assert_eq!(id, Some(ItemId(4)));
    }

    #[test]
    fn test_freed_max_id_may_be_reissued() {
        let mut store = SessionStore::from_lists(vec![list_with_items(&[1, 3])]);

        let id = store.add_item(ListId(1), "sweep").unwrap().unwrap();
        assert_eq!(id, ItemId(4));
        store.delete_item(ListId(1), id).unwrap();

        let again = store.add_item(ListId(1), "mop").unwrap();
        assert_eq!(again, Some(ItemId(4)));
    }

    #[test]
    fn test_first_ids_start_at_one() {
        let mut store = SessionStore::new();
        let list_id = store.create_list("errands").unwrap();
        assert_eq!(list_id, ListId(1));
        assert_eq!(store.add_item(list_id, "post office").unwrap(), Some(ItemId(1)));
    }

    #[test]
    fn test_item_ids_are_per_list() {
        let mut store = SessionStore::new();
        let a = store.create_list("a").unwrap();
        let b = store.create_list("b").unwrap();
        store.add_item(a, "one").unwrap();
        store.add_item(a, "two").unwrap();

        assert_eq!(store.add_item(b, "first").unwrap(), Some(ItemId(1)));
    }

    #[test]
    fn test_snapshot_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("session.json");

        let mut store = SessionStore::open(&path).unwrap();
        let list_id = store.create_list("travel").unwrap();
        let item_id = store.add_item(list_id, "passport").unwrap().unwrap();
        store.set_item_status(list_id, item_id, true).unwrap();
        store.disconnect().unwrap();

        let reopened = SessionStore::open(&path).unwrap();
        let list = reopened.find_list(list_id).unwrap().unwrap();
        assert_eq!(list.name, "travel");
        assert_eq!(list.completed_count, 1);
        assert_eq!(reopened.list_items(list_id).unwrap()[0].id, item_id);
    }

    #[test]
    fn test_open_missing_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let store = SessionStore::open(dir.path().join("nope.json")).unwrap();
        assert!(store.all_lists().unwrap().is_empty());
    }

    #[test]
    fn test_open_rejects_garbage() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("session.json");
        fs::write(&path, "not json").unwrap();

        let err = SessionStore::open(&path).unwrap_err();
        assert!(matches!(err, StoreError::SessionFormat { .. }));
    }
}
