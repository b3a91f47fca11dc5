//! Downgrade stale `waiting` declarations whose dialog has been dismissed.
//!
//! A pane declares `waiting` when its hook fires for a permission dialog or
//! prompt; if the user dismisses it from inside the pane, no hook fires and
//! the declared state goes stale. This pass captures the pane content and
//! downgrades to `idle` when the heuristic says the dialog is gone.

use hop_core::{Pane, PaneState, has_active_dialog};

use crate::capture::capture_pane;
use crate::executor::TmuxCommandRunner;
use crate::options;

/// Panes younger than this are never validated; a dismissed dialog only
/// becomes plausible once the declaration has had time to go stale. This
/// also bounds the cost of validation to one capture per old-enough pane.
pub const DEFAULT_WAITING_AGE_SECS: i64 = 30;

/// Lines of scrollback the heuristic gets to inspect.
pub const CAPTURE_LINES: u32 = 50;

/// Re-check every `waiting` pane at least `age_threshold` seconds old.
/// Capture failure or empty content leaves the record untouched; a write
/// failure during the downgrade is logged and swallowed (best-effort
/// housekeeping, not a user-requested action).
pub fn validate_waiting_panes(
    runner: &impl TmuxCommandRunner,
    panes: &mut [Pane],
    now: i64,
    age_threshold: i64,
) {
    for pane in panes.iter_mut() {
        if pane.state != PaneState::Waiting || pane.age(now) < age_threshold {
            continue;
        }
        let content = match capture_pane(runner, &pane.id, CAPTURE_LINES) {
            Ok(c) if !c.trim().is_empty() => c,
            Ok(_) => continue,
            Err(err) => {
                tracing::debug!(pane = %pane.id, error = %err, "capture failed, state untouched");
                continue;
            }
        };
        if has_active_dialog(&content) {
            continue;
        }
        if let Err(err) = options::set_pane_state(runner, Some(&pane.id), &PaneState::Idle, now) {
            tracing::warn!(pane = %pane.id, error = %err, "idle downgrade write failed");
            continue;
        }
        tracing::info!(pane = %pane.id, "dialog dismissed, waiting pane downgraded to idle");
        pane.state = PaneState::Idle;
        pane.timestamp = now;
    }
}

// ─── Tests ────────────────────────────────────────────────────────
