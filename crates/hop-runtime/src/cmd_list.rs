//! `claude-hop list` — managed panes in priority order.

use anyhow::bail;
use hop_tmux::TmuxCommandRunner;
use hop_tmux::validate::DEFAULT_WAITING_AGE_SECS;

use crate::cli::ListOpts;
use crate::context;

pub fn run(runner: &impl TmuxCommandRunner, opts: &ListOpts) -> anyhow::Result<i32> {
    if !hop_tmux::is_inside_tmux() {
        bail!("not running inside tmux");
    }

    let mut panes = hop_tmux::validated_hop_panes(runner)?;
    let now = context::now();
    hop_tmux::validate_waiting_panes(runner, &mut panes, now, DEFAULT_WAITING_AGE_SECS);

    let sorted = hop_core::sort_all(panes);

    if opts.json {
        println!("{}", serde_json::to_string_pretty(&sorted)?);
        return Ok(0);
    }

    if sorted.is_empty() {
        println!("No Claude Code sessions found");
        return Ok(0);
    }

    tracing::info!(count = sorted.len(), "list");
    for pane in sorted {
        println!(
            "{:<8} {:>4}  {:<6} {}:{}  {}",
            pane.state.as_str(),
            context::time_ago(pane.timestamp, now),
            pane.id,
            pane.session,
            pane.window,
            pane.project()
        );
    }
    Ok(0)
}
