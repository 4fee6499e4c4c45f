//! Data layer for todo-lists
//!
//! The `TodoStore` trait and its two backends: a session-scoped in-memory
//! store and a SQLite store. Presentation helpers and caller-side name
//! validation live here too since they share the entity model.

mod error;
mod model;
mod session;
mod sqlite;
mod store;
pub mod validation;


pub use error::StoreError;
pub use model::{partition_items, partition_lists, Item, ItemId, ListId, TodoList};
pub use session::{SessionList, SessionStore};
pub use sqlite::SqliteStore;
pub use store::TodoStore;
