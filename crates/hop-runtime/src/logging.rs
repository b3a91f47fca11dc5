//! File logging. Hook-triggered commands run invisibly behind Claude Code,
//! so diagnostics go to a state-directory log file, never the terminal.

use std::fs::{self, File, OpenOptions};
use std::path::PathBuf;
use std::sync::Arc;

use tracing_subscriber::EnvFilter;

/// Initialize the global subscriber. Filter from `HOP_LOG`/`RUST_LOG`
/// (default `info`). When the log file cannot be opened, no subscriber is
/// installed and events are discarded — silence beats noise in a hook.
pub fn init() {
    let filter = std::env::var("HOP_LOG")
        .or_else(|_| std::env::var("RUST_LOG"))
        .unwrap_or_else(|_| "info".to_string());

    let Some(file) = open_log_file() else {
        return;
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_ansi(false)
        .with_writer(Arc::new(file))
        .try_init();
}

fn open_log_file() -> Option<File> {
    let dir = log_dir()?;
    fs::create_dir_all(&dir).ok()?;
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(dir.join("hop.log"))
        .ok()
}

fn log_dir() -> Option<PathBuf> {
    let home = std::env::var_os("HOME")?;
    Some(PathBuf::from(home).join(".local/state/claude-hop"))
}
