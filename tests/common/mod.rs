//! Common test utilities for integration tests.
//!
//! Provides a harness for TUI testing using tmux.

use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{Duration, Instant};
use tempfile::TempDir;

use todo_lists::{SessionStore, TodoStore};

static TUI_SESSION_COUNTER: AtomicUsize = AtomicUsize::new(0);

/// Path to the todo binary built for this test run.
pub fn todo_bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_todo"))
}

/// Whether tmux can be used on this machine.
pub fn tmux_available() -> bool {
    Command::new("tmux")
        .arg("-V")
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false)
}

/// Bail out of a test when tmux is missing.
macro_rules! require_tmux {
    () => {
        if !common::tmux_available() {
            eprintln!("skipping: tmux not available");
            return;
        }
    };
}

/// A temporary directory holding the session file and log for one run.
pub struct TestProject {
    pub dir: TempDir,
}

impl TestProject {
    /// Create a new test project with a custom name (for debugging).
    pub fn with_name(name: &str) -> Self {
        let dir =
            TempDir::with_prefix(format!("todo-{}-", name)).expect("Failed to create temp dir");
        Self { dir }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn session_path(&self) -> PathBuf {
        self.path().join("session.json")
    }

    pub fn log_path(&self) -> PathBuf {
        self.path().join("todo.log")
    }

    /// Seed the session file with a list holding the given todos.
    pub fn seed_list(&self, name: &str, todos: &[&str]) {
        let mut store = SessionStore::open(self.session_path()).expect("Failed to open session");
        let list_id = store.create_list(name).expect("Failed to create list");
        for todo in todos {
            store.add_item(list_id, todo).expect("Failed to add todo");
        }
        store.disconnect().expect("Failed to save session");
    }

    /// Load whatever the TUI saved on exit.
    pub fn saved_session(&self) -> SessionStore {
        SessionStore::open(self.session_path()).expect("Failed to reopen session")
    }
}

/// TUI test harness using tmux.
pub struct TuiHarness {
    session_name: String,
}

impl TuiHarness {
    /// Start the TUI in a tmux session, backed by the project's session file.
    pub fn start(project: &TestProject) -> Self {
        let count = TUI_SESSION_COUNTER.fetch_add(1, Ordering::SeqCst);
        let session_name = format!("todo-tui-{}-{}", std::process::id(), count);
        let command = format!(
            "{} --backend session --session {} --log-file {} --refresh 0",
            todo_bin().display(),
            project.session_path().display(),
            project.log_path().display(),
        );

        let status = Command::new("tmux")
            .args([
                "new-session",
                "-d",
                "-s",
                &session_name,
                "-x",
                "100",
                "-y",
                "30",
                &command,
            ])
            .current_dir(project.path())
            .status()
            .expect("Failed to start tmux");

        assert!(status.success(), "Failed to start tmux session");

        // Give TUI time to initialize
        std::thread::sleep(Duration::from_millis(500));

        Self { session_name }
    }

    /// Capture the current pane content.
    pub fn capture(&self) -> String {
        let output = Command::new("tmux")
            .args(["capture-pane", "-t", &self.session_name, "-p"])
            .output()
            .expect("Failed to capture tmux pane");

        String::from_utf8_lossy(&output.stdout).to_string()
    }

    /// Send keys to the TUI. Key names like "Enter" or "Escape" work too.
    pub fn send_keys(&self, keys: &str) {
        let status = Command::new("tmux")
            .args(["send-keys", "-t", &self.session_name, keys])
            .status()
            .expect("Failed to send keys");

        assert!(status.success(), "Failed to send keys to tmux");

        // Small delay for TUI to process
        std::thread::sleep(Duration::from_millis(150));
    }

    /// Type literal text, without tmux key-name lookup.
    pub fn type_text(&self, text: &str) {
        let status = Command::new("tmux")
            .args(["send-keys", "-t", &self.session_name, "-l", text])
            .status()
            .expect("Failed to send text");

        assert!(status.success(), "Failed to send text to tmux");
        std::thread::sleep(Duration::from_millis(150));
    }

    /// Check if the session is still running.
    pub fn is_running(&self) -> bool {
        Command::new("tmux")
            .args(["has-session", "-t", &self.session_name])
            .status()
            .map(|s| s.success())
            .unwrap_or(false)
    }

    /// Wait for TUI to exit.
    pub fn wait_for_exit(&self, timeout_ms: u64) -> bool {
        let start = Instant::now();
        let timeout = Duration::from_millis(timeout_ms);

        while start.elapsed() < timeout {
            if !self.is_running() {
                return true;
            }
            std::thread::sleep(Duration::from_millis(50));
        }

        false
    }

    /// Assert that capture contains a string.
    pub fn assert_contains(&self, needle: &str) {
        let content = self.capture();
        assert!(
            content.contains(needle),
            "Expected TUI to contain '{}', got:\n{}",
            needle,
            content
        );
    }

    /// Kill the tmux session (cleanup).
    pub fn kill(&self) {
        let _ = Command::new("tmux")
            .args(["kill-session", "-t", &self.session_name])
            .status();
    }
}

impl Drop for TuiHarness {
    fn drop(&mut self) {
        self.kill();
    }
}
