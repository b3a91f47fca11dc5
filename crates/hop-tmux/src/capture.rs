//! Content capture: the visible rendered text of a pane's last lines.

use crate::error::TmuxError;
use crate::executor::TmuxCommandRunner;

/// Capture the last `lines` lines of a pane's buffer as one string.
/// Errors (pane gone, server unreachable) propagate to the caller.
pub fn capture_pane(
    runner: &impl TmuxCommandRunner,
    pane_id: &str,
    lines: u32,
) -> Result<String, TmuxError> {
    let start_line = format!("-{lines}");
    runner.run(&["capture-pane", "-p", "-S", &start_line, "-t", pane_id])
}
