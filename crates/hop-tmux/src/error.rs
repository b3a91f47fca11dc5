//! Error types for the tmux boundary.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TmuxError {
    #[error("tmux command failed: {0}")]
    CommandFailed(String),

    #[error("tmux io error: {0}")]
    Io(#[from] std::io::Error),
}
