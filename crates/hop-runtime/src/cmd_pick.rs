//! `claude-hop pick` — interactive pane picker via fzf.

use std::io::Write;
use std::process::{Command, Stdio};

use anyhow::bail;
use hop_core::Pane;
use hop_tmux::TmuxCommandRunner;
use hop_tmux::validate::DEFAULT_WAITING_AGE_SECS;

use crate::cli::PickOpts;
use crate::context;

/// Candidate lines for fzf: `icon project (session:window) [age]<TAB>pane_id`.
/// fzf shows the label; the pane id rides along in a hidden field.
fn format_pick_candidates(panes: &[Pane], now: i64) -> Vec<String> {
    panes
        .iter()
        .map(|pane| {
            format!(
                "{} {} ({}:{}) [{}]\t{}",
                context::state_icon(&pane.state),
                pane.project(),
                pane.session,
                pane.window,
                context::time_ago(pane.timestamp, now),
                pane.id
            )
        })
        .collect()
}

pub fn run(runner: &impl TmuxCommandRunner, opts: &PickOpts) -> anyhow::Result<i32> {
    if !hop_tmux::is_inside_tmux() {
        bail!("not running inside tmux");
    }

    let mut panes = hop_tmux::validated_hop_panes(runner)?;
    let now = context::now();
    hop_tmux::validate_waiting_panes(runner, &mut panes, now, DEFAULT_WAITING_AGE_SECS);

    if panes.is_empty() {
        eprintln!("no Claude Code sessions");
        return Ok(0);
    }

    let sorted = hop_core::sort_all(panes);
    let candidates = format_pick_candidates(&sorted, now);
    let candidate_text = candidates.join("\n");

    if opts.dry_run {
        println!("{candidate_text}");
        return Ok(0);
    }

    let fzf_available = Command::new("which")
        .arg("fzf")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false);
    if !fzf_available {
        bail!("fzf not found; install fzf or use --dry-run");
    }

    let mut child = Command::new("fzf")
        .args(["--no-multi", "--delimiter=\t", "--with-nth=1"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::inherit())
        .spawn()
        .map_err(|e| anyhow::anyhow!("failed to spawn fzf: {e}"))?;

    if let Some(ref mut stdin) = child.stdin {
        stdin
            .write_all(candidate_text.as_bytes())
            .map_err(|e| anyhow::anyhow!("failed to write to fzf stdin: {e}"))?;
    }
    drop(child.stdin.take());

    let output = child
        .wait_with_output()
        .map_err(|e| anyhow::anyhow!("fzf failed: {e}"))?;
    if !output.status.success() {
        // Escape or Ctrl-C in fzf
        return Ok(0);
    }

    let selected = String::from_utf8_lossy(&output.stdout);
    let Some(pane_id) = selected.trim().rsplit('\t').next().filter(|s| !s.is_empty()) else {
        return Ok(0);
    };

    tracing::info!(pane = pane_id, "picked");
    let switched = hop_tmux::switch_to_pane(runner, pane_id, None, None)?;
    Ok(if switched { 0 } else { 1 })
}

#[cfg(test)]
mod tests {
    use super::*;
    use hop_core::PaneState;

    fn pane(id: &str, state: PaneState, timestamp: i64) -> Pane {
        Pane {
            id: id.to_string(),
            state,
            timestamp,
            cwd: "/home/me/api".to_string(),
            session: "dev".to_string(),
            window: 2,
        }
    }

    #[test]
    fn candidate_carries_label_and_hidden_id() {
        let panes = vec![pane("%3", PaneState::Waiting, 970)];
        let lines = format_pick_candidates(&panes, 1000);
        assert_eq!(lines.len(), 1);
        let (label, id) = lines[0].split_once('\t').expect("tab-separated");
        assert!(label.contains("api (dev:2)"));
        assert!(label.contains("[30s]"));
        assert_eq!(id, "%3");
    }

    #[test]
    fn candidates_preserve_input_order() {
        let panes = vec![
            pane("%4", PaneState::Waiting, 100),
            pane("%2", PaneState::Waiting, 200),
        ];
        let lines = format_pick_candidates(&panes, 1000);
        assert!(lines[0].ends_with("%4"));
        assert!(lines[1].ends_with("%2"));
    }
}
