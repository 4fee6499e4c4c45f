//! Tracing setup
//!
//! The terminal belongs to the UI, so log output goes to a file.
//!
//! Usage:
//!   todo --log-file todo.log ...         # info and above
//!   todo --debug ...                     # debug and above
//!   RUST_LOG=todo_lists=trace todo ...   # fine-grained control

use anyhow::{anyhow, Context, Result};
use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

/// Tracing configuration options
#[derive(Debug, Clone)]
pub struct TracingConfig {
    /// File that receives log lines (appended)
    pub log_file: PathBuf,
    /// Default to debug level unless RUST_LOG says otherwise
    pub debug: bool,
}

/// Install the global subscriber writing to `config.log_file`
pub fn init_tracing(config: &TracingConfig) -> Result<()> {
    let filter = if config.debug {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"))
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&config.log_file)
        .with_context(|| format!("Failed to open log file: {:?}", config.log_file))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(config.debug)
        .try_init()
        .map_err(|err| anyhow!(err))
}
