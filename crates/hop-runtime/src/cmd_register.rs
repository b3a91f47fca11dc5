//! `claude-hop register` — hook entry point declaring the current pane's
//! attention state.

use hop_core::PaneState;
use hop_tmux::validate::DEFAULT_WAITING_AGE_SECS;
use hop_tmux::{HopOptions, TmuxCommandRunner, options};

use crate::cli::RegisterOpts;
use crate::context;
use crate::notify;

/// Hook-triggered: outside tmux, or on a store failure, this is a silent
/// no-op — a hook must never surface errors into the Claude Code session.
pub fn run(runner: &impl TmuxCommandRunner, opts: &RegisterOpts) -> anyhow::Result<i32> {
    if !hop_tmux::is_inside_tmux() {
        tracing::info!("register: not inside tmux, skipping");
        return Ok(0);
    }

    let state = PaneState::from(opts.state);
    let now = context::now();

    if let Err(err) = options::set_pane_state(runner, None, &state, now) {
        tracing::error!(error = %err, "register: state write failed");
        return Ok(0);
    }
    if let Err(err) = options::mark_managed(runner, None) {
        tracing::error!(error = %err, "register: marker write failed");
        return Ok(0);
    }
    tracing::info!(state = %state, "state registered");

    let hop_opts = HopOptions::load(runner);
    let project = context::current_project();
    notify::handle_state_notifications(runner, &hop_opts, &state, &project);

    if should_auto_hop(runner, &hop_opts, &state, now) {
        auto_hop(runner);
    }

    Ok(0)
}

/// Auto-hop gate. With priority-only on (the default), the hop is
/// suppressed only when another validated pane holds a *strictly* higher
/// priority — an equal-priority pane does not block, so a second `waiting`
/// pane still pulls focus to the newest event.
fn should_auto_hop(
    runner: &impl TmuxCommandRunner,
    opts: &HopOptions,
    state: &PaneState,
    now: i64,
) -> bool {
    if !opts.auto.contains(state) {
        return false;
    }
    if !opts.auto_priority_only {
        return true;
    }

    let Ok(current) = std::env::var("TMUX_PANE") else {
        tracing::info!("auto-hop: no TMUX_PANE, skipping priority check");
        return true;
    };

    let mut panes = match hop_tmux::validated_hop_panes(runner) {
        Ok(panes) => panes,
        Err(err) => {
            tracing::warn!(error = %err, "auto-hop: pane query failed, proceeding");
            return true;
        }
    };
    hop_tmux::validate_waiting_panes(runner, &mut panes, now, DEFAULT_WAITING_AGE_SECS);

    let new_priority = state.priority();
    for pane in &panes {
        if pane.id == current {
            continue;
        }
        if pane.state.priority() < new_priority {
            tracing::info!(
                pane = %pane.id,
                state = %pane.state,
                "auto-hop suppressed by higher-priority pane"
            );
            return false;
        }
    }
    true
}

fn auto_hop(runner: &impl TmuxCommandRunner) {
    let Ok(current) = std::env::var("TMUX_PANE") else {
        tracing::info!("auto-hop: no TMUX_PANE, skipping");
        return;
    };
    match hop_tmux::switch_to_pane(runner, &current, None, None) {
        Ok(true) => tracing::info!(pane = %current, "auto-hop switched"),
        Ok(false) => tracing::warn!(pane = %current, "auto-hop target not found"),
        Err(err) => tracing::warn!(error = %err, "auto-hop failed"),
    }
}
