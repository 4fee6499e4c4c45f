//! todo-lists - to-do lists behind a swappable persistence layer
//!
//! The `TodoStore` trait in [`data`] is the only thing the terminal UI in
//! [`app`] talks to. Two backends implement it: a session store kept in
//! memory (optionally snapshotted to JSON) and a SQLite store.

pub mod app;
pub mod data;
pub mod event;
pub mod logging;
pub mod ui;

// Re-export commonly used types
pub use app::App;
pub use data::{SessionStore, SqliteStore, StoreError, TodoStore};
