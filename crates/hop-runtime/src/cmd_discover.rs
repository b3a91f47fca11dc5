//! `claude-hop discover` — register running Claude Code sessions that have
//! no hop state yet, found by process inspection.

use anyhow::bail;
use hop_core::PaneState;
use hop_tmux::{TmuxCommandRunner, options};

use crate::cli::DiscoverOpts;
use crate::context;

pub fn run(runner: &impl TmuxCommandRunner, opts: &DiscoverOpts) -> anyhow::Result<i32> {
    if !hop_tmux::is_inside_tmux() {
        bail!("not running inside tmux");
    }

    let candidates = hop_tmux::discover_claude_panes(runner)?;
    if candidates.is_empty() {
        tracing::info!("discover: no claude panes found by process");
        if !opts.quiet {
            println!("No Claude Code sessions found");
        }
        return Ok(0);
    }

    tracing::info!(count = candidates.len(), "discover: claude panes found");
    let now = context::now();
    let mut registered = 0;
    let mut skipped = 0;

    for pane in &candidates {
        if options::has_state(runner, &pane.id) && !opts.force {
            skipped += 1;
            continue;
        }

        let project = pane
            .cwd
            .trim_end_matches('/')
            .rsplit('/')
            .next()
            .filter(|s| !s.is_empty())
            .unwrap_or("unknown");

        if opts.dry_run {
            println!(
                "Would register: {} ({}:{}) - {project}",
                pane.id, pane.session, pane.window
            );
        } else {
            options::set_pane_state(runner, Some(&pane.id), &PaneState::Idle, now)?;
            options::mark_managed(runner, Some(&pane.id))?;
            tracing::info!(pane = %pane.id, "discovered and registered as idle");
            if !opts.quiet {
                println!(
                    "Registered: {} ({}:{}) - {project}",
                    pane.id, pane.session, pane.window
                );
            }
        }
        registered += 1;
    }

    if !opts.dry_run && !opts.quiet {
        println!("\nDiscovered {registered} session(s)");
        if skipped > 0 {
            println!("Skipped {skipped} already registered session(s)");
        }
    }
    Ok(0)
}
