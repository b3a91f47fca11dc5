//! `claude-hop status` — one-line summary for the tmux status bar.
//!
//! The template comes from `@hop-status-format`; `{state:icon}` expands to
//! `icon count` when the tier is non-empty and to nothing otherwise.

use hop_tmux::validate::DEFAULT_WAITING_AGE_SECS;
use hop_tmux::{TmuxCommandRunner, options};

use crate::context;

const DEFAULT_STATUS_FORMAT: &str = "{waiting:󰂜} {idle:󰄬}";

pub fn run(runner: &impl TmuxCommandRunner) -> anyhow::Result<i32> {
    // Polled by the status bar: outside tmux there is nothing to print.
    if !hop_tmux::is_inside_tmux() {
        return Ok(0);
    }

    // Unvalidated read keeps the poll cheap; validation still corrects
    // stale waiting declarations so the counts do not lie for long.
    let mut panes = match hop_tmux::hop_panes(runner) {
        Ok(panes) => panes,
        Err(_) => return Ok(0),
    };
    hop_tmux::validate_waiting_panes(runner, &mut panes, context::now(), DEFAULT_WAITING_AGE_SECS);

    let groups = hop_core::group_by_state(panes);
    let format = options::get_global_option(runner, options::STATUS_FORMAT_KEY)
        .unwrap_or_else(|| DEFAULT_STATUS_FORMAT.to_string());

    let line = expand_status_format(
        &format,
        groups.waiting.len(),
        groups.idle.len(),
        groups.active.len(),
    );
    if !line.is_empty() {
        print!("{line}");
    }
    Ok(0)
}

/// Expand `{state:icon}` placeholders; anything that is not a well-formed
/// placeholder passes through literally. Whitespace collapses at the end so
/// empty expansions leave no holes.
fn expand_status_format(format: &str, waiting: usize, idle: usize, active: usize) -> String {
    let mut out = String::new();
    let mut rest = format;

    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let after = &rest[start + 1..];
        let Some(end) = after.find('}') else {
            out.push_str(&rest[start..]);
            rest = "";
            break;
        };
        match after[..end].split_once(':') {
            Some((state, icon)) => {
                let count = match state {
                    "waiting" => waiting,
                    "idle" => idle,
                    "active" => active,
                    _ => 0,
                };
                if count > 0 {
                    out.push_str(icon);
                    out.push(' ');
                    out.push_str(&count.to_string());
                }
            }
            None => out.push_str(&rest[start..start + end + 2]),
        }
        rest = &after[end + 1..];
    }
    out.push_str(rest);

    out.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expands_nonzero_counts() {
        let line = expand_status_format("{waiting:W} {idle:I}", 2, 1, 0);
        assert_eq!(line, "W 2 I 1");
    }

    #[test]
    fn zero_counts_collapse() {
        assert_eq!(expand_status_format("{waiting:W} {idle:I}", 0, 0, 5), "");
        assert_eq!(expand_status_format("{waiting:W} {active:A}", 0, 0, 5), "A 5");
    }

    #[test]
    fn unknown_placeholder_state_expands_empty() {
        assert_eq!(expand_status_format("{paused:P} {waiting:W}", 1, 0, 0), "W 1");
    }

    #[test]
    fn literal_braces_pass_through() {
        assert_eq!(expand_status_format("{nope} x", 1, 1, 1), "{nope} x");
        assert_eq!(expand_status_format("tail {", 1, 1, 1), "tail {");
    }

    #[test]
    fn default_format_shape() {
        let line = expand_status_format(DEFAULT_STATUS_FORMAT, 1, 2, 3);
        assert_eq!(line, "󰂜 1 󰄬 2");
    }
}
