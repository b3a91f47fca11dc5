//! Bulk query of managed pane records: one `list-panes` round trip with the
//! hop attributes inlined in the format string, parsed locally.

use hop_core::{Pane, PaneState};

use crate::error::TmuxError;
use crate::executor::TmuxCommandRunner;
use crate::process::running_claude_pane_ids;

/// Tab-delimited format for `tmux list-panes -a -F`: identity, hop
/// attributes, and navigation fields in one round trip.
pub const HOP_PANES_FORMAT: &str = "#{pane_id}\t#{@hop-claude}\t#{@hop-state}\t#{@hop-timestamp}\t#{pane_current_path}\t#{session_name}\t#{window_index}";

/// All managed pane records, unreconciled against process truth.
pub fn hop_panes(runner: &impl TmuxCommandRunner) -> Result<Vec<Pane>, TmuxError> {
    let output = runner.run(&["list-panes", "-a", "-F", HOP_PANES_FORMAT])?;
    Ok(parse_hop_panes_output(&output))
}

/// The validated set: managed records whose pane still hosts an interactive
/// Claude Code process. The process registry is consulted exactly once.
pub fn validated_hop_panes(runner: &impl TmuxCommandRunner) -> Result<Vec<Pane>, TmuxError> {
    let running = running_claude_pane_ids(runner)?;
    Ok(hop_core::validated_panes(hop_panes(runner)?, &running))
}

/// Stale records: declared state, but the hosting process is gone.
pub fn stale_hop_panes(runner: &impl TmuxCommandRunner) -> Result<Vec<Pane>, TmuxError> {
    let running = running_claude_pane_ids(runner)?;
    Ok(hop_core::stale_panes(hop_panes(runner)?, &running))
}

/// Parse the raw `list-panes` output. A row is a managed record only when
/// the marker is set and a state is declared; a malformed timestamp or
/// window index falls back to `0` without dropping the record.
pub fn parse_hop_panes_output(output: &str) -> Vec<Pane> {
    let mut panes = Vec::new();
    for line in output.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        let parts: Vec<&str> = trimmed.split('\t').collect();
        if parts.len() < 7 {
            continue;
        }
        let (id, marker, state, timestamp, cwd, session, window) = (
            parts[0], parts[1], parts[2], parts[3], parts[4], parts[5], parts[6],
        );
        if marker != "1" || state.is_empty() {
            continue;
        }
        panes.push(Pane::from_raw(
            id,
            PaneState::from(state),
            timestamp,
            cwd,
            session,
            window,
        ));
    }
    panes
}

// ─── Tests ────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_managed_record() {
        let output = "%3\t1\twaiting\t1700000100\t/home/me/api\tdev\t2";
        let panes = parse_hop_panes_output(output);
        assert_eq!(panes.len(), 1);
        let p = &panes[0];
        assert_eq!(p.id, "%3");
        assert_eq!(p.state, PaneState::Waiting);
        assert_eq!(p.timestamp, 1_700_000_100);
        assert_eq!(p.cwd, "/home/me/api");
        assert_eq!(p.session, "dev");
        assert_eq!(p.window, 2);
    }

    #[test]
    fn unmarked_or_stateless_rows_are_excluded() {
        let output = [
            "%0\t\t\t\t/home\tdev\t0",          // plain pane, no hop attributes
            "%1\t1\t\t\t/home\tdev\t0",         // marker but no declared state
            "%2\t\twaiting\t100\t/home\tdev\t0", // state but no marker
            "%3\t1\tidle\t100\t/home\tdev\t1",  // managed
        ]
        .join("\n");
        let panes = parse_hop_panes_output(&output);
        assert_eq!(panes.len(), 1);
        assert_eq!(panes[0].id, "%3");
    }

    #[test]
    fn malformed_fields_zeroed_without_dropping_record() {
        let output = "%4\t1\twaiting\tgarbage\t/repo\tdev\tnope";
        let panes = parse_hop_panes_output(output);
        assert_eq!(panes.len(), 1);
        assert_eq!(panes[0].timestamp, 0);
        assert_eq!(panes[0].window, 0);
    }

    #[test]
    fn unknown_state_kept_as_other() {
        let output = "%5\t1\tthinking\t100\t/repo\tdev\t0";
        let panes = parse_hop_panes_output(output);
        assert_eq!(panes[0].state, PaneState::Other("thinking".to_string()));
    }

    #[test]
    fn short_and_empty_lines_skipped() {
        let output = "\n%0\t1\n   \n";
        assert!(parse_hop_panes_output(output).is_empty());
    }

    #[test]
    fn mock_runner_round_trip() {
        struct MockRunner;
        impl TmuxCommandRunner for MockRunner {
            fn run(&self, args: &[&str]) -> Result<String, TmuxError> {
                assert!(args.contains(&"list-panes"));
                assert!(args.contains(&HOP_PANES_FORMAT));
                Ok("%1\t1\tactive\t100\t/repo\tmain\t0".to_string())
            }
        }
        let panes = hop_panes(&MockRunner).expect("list");
        assert_eq!(panes.len(), 1);
        assert_eq!(panes[0].state, PaneState::Active);
    }
}
