//! Store error types
//!
//! Not-found is not an error here: lookups return `Option` and mutations
//! on missing rows are no-ops. `StoreError` only covers backend failures.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Failure of a storage backend
#[derive(Error, Debug)]
pub enum StoreError {
    /// SQLite rejected a statement or the connection failed
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Session file could not be read or written
    #[error("session file {path:?}: {source}")]
    SessionIo { path: PathBuf, source: io::Error },

    /// Session file is not a valid snapshot
    #[error("invalid session snapshot in {path:?}: {source}")]
    SessionFormat {
        path: PathBuf,
        source: serde_json::Error,
    },
}

pub type Result<T, E = StoreError> = std::result::Result<T, E>;
