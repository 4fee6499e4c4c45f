//! todo - a TUI for keeping to-do lists
//!
//! Lists live either in a per-run session (optionally saved to a JSON file)
//! or in a SQLite database shared by everyone who opens it.

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use todo_lists::app;
use todo_lists::data::{SessionStore, SqliteStore};
use todo_lists::logging::{init_tracing, TracingConfig};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Backend {
    /// Lists kept for this run only, unless --session names a file
    Session,
    /// Lists kept in a SQLite database
    Sqlite,
}

/// A TUI for keeping to-do lists
#[derive(Parser, Debug)]
#[command(name = "todo", version, about, long_about = None)]
struct Args {
    /// Where lists are stored
    #[arg(short, long, value_enum, env = "TODO_BACKEND", default_value = "session")]
    backend: Backend,

    /// Path to the SQLite database, created if missing
    #[arg(long, env = "TODO_DATABASE", default_value = "todos.db")]
    db: PathBuf,

    /// JSON file the session is loaded from and saved to on exit
    #[arg(short, long, env = "TODO_SESSION")]
    session: Option<PathBuf>,

    /// File that receives log output
    #[arg(long, env = "TODO_LOG", default_value = "todo.log")]
    log_file: PathBuf,

    /// Log at debug level
    #[arg(long)]
    debug: bool,

    /// Refresh interval in seconds (0 to disable auto-refresh)
    #[arg(short, long, default_value = "3")]
    refresh: u64,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    init_tracing(&TracingConfig {
        log_file: args.log_file.clone(),
        debug: args.debug,
    })?;
    tracing::info!(backend = ?args.backend, "starting todo");

    match args.backend {
        Backend::Session => {
            let store = match &args.session {
                Some(path) => SessionStore::open(path)
                    .with_context(|| format!("Failed to load session from {:?}", path))?,
                None => SessionStore::new(),
            };
            app::run_and_disconnect(store, args.refresh).await
        }
        Backend::Sqlite => {
            let store = SqliteStore::open(&args.db)
                .with_context(|| format!("Failed to open database at {:?}", args.db))?;
            app::run_and_disconnect(store, args.refresh).await
        }
    }
}
