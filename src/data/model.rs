//! To-do list data structures

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a to-do list
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ListId(pub i64);

/// Identifier of an item, unique within its list's store
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(pub i64);

impl fmt::Display for ListId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single completable item on a list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub name: String,
    pub completed: bool,
}

impl Item {
    /// A freshly added item is never completed
    pub fn new(id: ItemId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            completed: false,
        }
    }

    /// Status glyph used by the item panel
    pub fn icon(&self) -> &'static str {
        if self.completed {
            "\u{2713}" // ✓
        } else {
            "\u{25cb}" // ○
        }
    }
}

/// A to-do list as returned by every store: identity plus aggregates.
///
/// Items themselves are fetched separately with
/// [`TodoStore::list_items`](super::TodoStore::list_items).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoList {
    pub id: ListId,
    pub name: String,
    /// Number of items on the list
    pub total_count: usize,
    /// Number of items marked completed
    pub completed_count: usize,
}

impl TodoList {
    /// Items still left to do
    pub fn remaining_count(&self) -> usize {
        self.total_count.saturating_sub(self.completed_count)
    }

    /// A list is complete when it has items and none of them remain.
    /// Empty lists are never complete.
    pub fn is_complete(&self) -> bool {
        self.total_count > 0 && self.remaining_count() == 0
    }

    /// "done/total" label for the list panel
    pub fn progress_label(&self) -> String {
        format!("{}/{}", self.completed_count, self.total_count)
    }
}

/// Incomplete lists first, complete lists last; relative order is kept
/// within each group.
pub fn partition_lists(lists: &[TodoList]) -> Vec<&TodoList> {
    let (complete, incomplete): (Vec<&TodoList>, Vec<&TodoList>) =
        lists.iter().partition(|l| l.is_complete());

    incomplete.into_iter().chain(complete).collect()
}

/// Open items first, completed items last; relative order is kept
/// within each group.
pub fn partition_items(items: &[Item]) -> Vec<&Item> {
    let (done, open): (Vec<&Item>, Vec<&Item>) = items.iter().partition(|i| i.completed);

    open.into_iter().chain(done).collect()
}
