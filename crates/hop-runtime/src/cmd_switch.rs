//! `claude-hop switch` — switch to a specific pane by id.

use anyhow::bail;
use hop_tmux::TmuxCommandRunner;

use crate::cli::SwitchOpts;

pub fn run(runner: &impl TmuxCommandRunner, opts: &SwitchOpts) -> anyhow::Result<i32> {
    if !hop_tmux::is_inside_tmux() {
        bail!("not running inside tmux");
    }
    let switched = hop_tmux::switch_to_pane(runner, &opts.pane, None, None)?;
    Ok(if switched { 0 } else { 1 })
}
