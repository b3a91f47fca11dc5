//! Process registry: which panes currently host an interactive Claude Code
//! session. One `list-panes` round trip for pane/tty pairs, then one `ps`
//! per candidate tty.

use std::collections::HashSet;

use crate::error::TmuxError;
use crate::executor::TmuxCommandRunner;

const PANE_TTY_FORMAT: &str = "#{pane_id}\t#{pane_tty}";

const DISCOVER_FORMAT: &str =
    "#{pane_id}\t#{pane_tty}\t#{pane_current_path}\t#{session_name}\t#{window_index}";

/// Pane ids whose tty hosts an interactive Claude Code process.
pub fn running_claude_pane_ids(
    runner: &impl TmuxCommandRunner,
) -> Result<HashSet<String>, TmuxError> {
    let output = runner.run(&["list-panes", "-a", "-F", PANE_TTY_FORMAT])?;
    let mut ids = HashSet::new();
    for (pane_id, tty) in parse_pane_tty_output(&output) {
        if interactive_claude_on_tty(&tty) {
            ids.insert(pane_id);
        }
    }
    Ok(ids)
}

fn parse_pane_tty_output(output: &str) -> Vec<(String, String)> {
    output
        .lines()
        .filter_map(|line| {
            let mut parts = line.trim().split('\t');
            let pane_id = parts.next()?;
            let tty = parts.next()?;
            if pane_id.is_empty() || tty.is_empty() {
                return None;
            }
            Some((pane_id.to_string(), tty.to_string()))
        })
        .collect()
}

// ─── Discovery ────────────────────────────────────────────────────

/// A pane found to be running interactive Claude Code, with the fields
/// needed to register it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveredPane {
    pub id: String,
    pub cwd: String,
    pub session: String,
    pub window: u32,
}

/// Find every pane hosting an interactive Claude Code process, regardless
/// of whether it carries hop attributes yet.
pub fn discover_claude_panes(
    runner: &impl TmuxCommandRunner,
) -> Result<Vec<DiscoveredPane>, TmuxError> {
    let output = runner.run(&["list-panes", "-a", "-F", DISCOVER_FORMAT])?;
    Ok(parse_discover_output(&output)
        .into_iter()
        .filter(|(tty, _)| interactive_claude_on_tty(tty))
        .map(|(_, pane)| pane)
        .collect())
}

fn parse_discover_output(output: &str) -> Vec<(String, DiscoveredPane)> {
    let mut rows = Vec::new();
    for line in output.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        let parts: Vec<&str> = trimmed.split('\t').collect();
        if parts.len() < 5 {
            continue;
        }
        let tty = parts[1];
        if tty.is_empty() {
            continue;
        }
        rows.push((
            tty.to_string(),
            DiscoveredPane {
                id: parts[0].to_string(),
                cwd: parts[2].to_string(),
                session: parts[3].to_string(),
                window: parts[4].trim().parse().unwrap_or(0),
            },
        ));
    }
    rows
}

// ─── Interactive-instance rule ────────────────────────────────────

/// `ps -t <tty> -o args=`, then the argv rule below. Failure (tty gone,
/// `ps` unavailable) counts as not running.
fn interactive_claude_on_tty(tty: &str) -> bool {
    let output = match std::process::Command::new("ps")
        .args(["-t", tty, "-o", "args="])
        .output()
    {
        Ok(o) if o.status.success() => o,
        _ => return false,
    };
    has_interactive_claude(&String::from_utf8_lossy(&output.stdout))
}

/// The distinguishing rule for an interactive instance, isolated here so it
/// can be swapped per target program: some process on the tty whose argv[0]
/// basename is `claude`, minus `-p`/`--print` batch invocations.
pub fn has_interactive_claude(ps_output: &str) -> bool {
    ps_output.lines().any(is_interactive_claude_argv)
}

fn is_interactive_claude_argv(line: &str) -> bool {
    let mut parts = line.split_whitespace();
    let Some(cmd) = parts.next() else {
        return false;
    };
    let name = cmd.rsplit('/').next().unwrap_or(cmd);
    if !name.eq_ignore_ascii_case("claude") {
        return false;
    }
    !parts.any(|arg| arg == "-p" || arg == "--print")
}

// ─── Tests ────────────────────────────────────────────────────────
