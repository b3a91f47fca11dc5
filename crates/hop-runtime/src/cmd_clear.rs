//! `claude-hop clear` — hook entry point dropping the current pane's state.

use hop_tmux::{TmuxCommandRunner, options};

pub fn run(runner: &impl TmuxCommandRunner) -> anyhow::Result<i32> {
    if !hop_tmux::is_inside_tmux() {
        tracing::info!("clear: not inside tmux, skipping");
        return Ok(0);
    }
    options::clear_pane_state(runner, None);
    tracing::info!("state cleared");
    Ok(0)
}
