//! `claude-hop cycle` — jump to the next pane needing attention.

use anyhow::bail;
use hop_tmux::validate::DEFAULT_WAITING_AGE_SECS;
use hop_tmux::{TmuxCommandRunner, options};

use crate::cli::CycleOpts;
use crate::context;

pub fn run(runner: &impl TmuxCommandRunner, opts: &CycleOpts) -> anyhow::Result<i32> {
    if !hop_tmux::is_inside_tmux() {
        bail!("not running inside tmux");
    }

    // Housekeeping first: drop records whose process is gone. Best-effort —
    // a failed scan degrades to cycling over possibly-stale panes.
    match hop_tmux::stale_hop_panes(runner) {
        Ok(stale) => {
            for pane in stale {
                options::clear_pane_state(runner, Some(&pane.id));
                tracing::info!(pane = %pane.id, "auto-pruned stale pane");
            }
        }
        Err(err) => tracing::warn!(error = %err, "stale scan failed"),
    }

    let mut panes = hop_tmux::hop_panes(runner)?;
    let now = context::now();
    hop_tmux::validate_waiting_panes(runner, &mut panes, now, DEFAULT_WAITING_AGE_SECS);

    let group = hop_core::cycle_group(panes, opts.mode.into());
    let current = opts
        .pane
        .clone()
        .or_else(|| hop_tmux::current_pane_id(runner));

    let Some(target) = hop_core::next_in_group(&group, current.as_deref().unwrap_or("")) else {
        tracing::info!("cycle: no panes to cycle through");
        let _ = runner.run(&["display-message", "No Claude Code sessions found"]);
        return Ok(0);
    };

    tracing::info!(
        pane = %target.id,
        state = %target.state,
        location = format!("{}:{}", target.session, target.window),
        "cycle"
    );
    hop_tmux::switch_to_pane(runner, &target.id, Some(&target.session), Some(target.window))?;
    Ok(0)
}
