//! `claude-hop back` — jump to the previously focused pane.

use anyhow::bail;
use hop_tmux::{TmuxCommandRunner, navigate};

pub fn run(runner: &impl TmuxCommandRunner) -> anyhow::Result<i32> {
    if !hop_tmux::is_inside_tmux() {
        bail!("not running inside tmux");
    }

    let Some(previous) = navigate::previous_pane(runner) else {
        tracing::info!("back: no previous pane recorded");
        let _ = runner.run(&["display-message", "No previous pane to jump to"]);
        return Ok(0);
    };

    if navigate::switch_to_pane(runner, &previous, None, None)? {
        tracing::info!(pane = %previous, "jumped back");
        Ok(0)
    } else {
        tracing::warn!(pane = %previous, "previous pane gone, clearing pointer");
        navigate::clear_previous_pane(runner);
        let _ = runner.run(&["display-message", "Previous pane no longer exists"]);
        Ok(1)
    }
}
