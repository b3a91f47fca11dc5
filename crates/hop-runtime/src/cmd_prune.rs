//! `claude-hop prune` — drop hop state from panes whose Claude Code
//! process is gone.

use anyhow::bail;
use hop_tmux::{TmuxCommandRunner, options};

use crate::cli::PruneOpts;

pub fn run(runner: &impl TmuxCommandRunner, opts: &PruneOpts) -> anyhow::Result<i32> {
    if !hop_tmux::is_inside_tmux() {
        bail!("not running inside tmux");
    }

    let stale = hop_tmux::stale_hop_panes(runner)?;
    if stale.is_empty() {
        tracing::info!("prune: no stale panes");
        if !opts.quiet {
            println!("No stale panes found");
        }
        return Ok(0);
    }

    tracing::info!(count = stale.len(), "prune: stale panes found");
    for pane in &stale {
        if opts.dry_run {
            println!(
                "Would remove: {} ({}:{}) - {}",
                pane.id,
                pane.session,
                pane.window,
                pane.project()
            );
        } else {
            options::clear_pane_state(runner, Some(&pane.id));
            tracing::info!(pane = %pane.id, "pruned");
            if !opts.quiet {
                println!(
                    "Removed: {} ({}:{}) - {}",
                    pane.id,
                    pane.session,
                    pane.window,
                    pane.project()
                );
            }
        }
    }

    if !opts.dry_run && !opts.quiet {
        println!("\nPruned {} stale pane(s)", stale.len());
    }
    Ok(0)
}
