//! Pane navigation: the minimal context-switch sequence to bring a pane to
//! the foreground, plus the previous-pane pointer for `back`.

use crate::error::TmuxError;
use crate::executor::TmuxCommandRunner;
use crate::options::{self, PREVIOUS_PANE_KEY};

const PANE_LOCATION_FORMAT: &str = "#{pane_id}\t#{session_name}\t#{window_index}";

/// Whether this process runs inside a tmux client environment.
pub fn is_inside_tmux() -> bool {
    std::env::var_os("TMUX").is_some()
}

/// The active pane id, via `display-message` — works from keybindings
/// where `TMUX_PANE` is not set.
pub fn current_pane_id(runner: &impl TmuxCommandRunner) -> Option<String> {
    match runner.run(&["display-message", "-p", "#{pane_id}"]) {
        Ok(id) if !id.trim().is_empty() => Some(id.trim().to_string()),
        _ => None,
    }
}

/// The active session name and window index.
pub fn current_location(runner: &impl TmuxCommandRunner) -> Option<(String, Option<u32>)> {
    let output = runner
        .run(&["display-message", "-p", "#{session_name}\t#{window_index}"])
        .ok()?;
    let mut parts = output.trim().split('\t');
    let session = parts.next()?.to_string();
    if session.is_empty() {
        return None;
    }
    let window = parts.next().and_then(|w| w.trim().parse().ok());
    Some((session, window))
}

/// Find where a pane lives, scanning all panes.
fn lookup_pane_location(
    runner: &impl TmuxCommandRunner,
    pane_id: &str,
) -> Result<Option<(String, Option<u32>)>, TmuxError> {
    let output = runner.run(&["list-panes", "-a", "-F", PANE_LOCATION_FORMAT])?;
    for line in output.lines() {
        let parts: Vec<&str> = line.trim().split('\t').collect();
        if parts.len() >= 3 && parts[0] == pane_id {
            let window = parts[2].trim().parse().ok();
            return Ok(Some((parts[1].to_string(), window)));
        }
    }
    Ok(None)
}

/// The pane id recorded by the last switch, if any.
pub fn previous_pane(runner: &impl TmuxCommandRunner) -> Option<String> {
    options::get_global_option(runner, PREVIOUS_PANE_KEY)
}

/// Drop a previous-pane pointer that no longer resolves.
pub fn clear_previous_pane(runner: &impl TmuxCommandRunner) {
    options::unset_global_option(runner, PREVIOUS_PANE_KEY);
}

/// Switch to a pane, crossing session and window boundaries as needed.
///
/// Records the departing pane in the global previous-pane pointer first —
/// a plain last-writer-wins cell with no compare-and-swap; a lost update
/// costs one `back` jump, nothing more. Returns `Ok(false)` when the target
/// pane cannot be located.
pub fn switch_to_pane(
    runner: &impl TmuxCommandRunner,
    pane_id: &str,
    session: Option<&str>,
    window: Option<u32>,
) -> Result<bool, TmuxError> {
    let (target_session, target_window) = match session {
        Some(s) => (s.to_string(), window),
        None => match lookup_pane_location(runner, pane_id)? {
            Some(loc) => loc,
            None => {
                let msg = format!("Pane {pane_id} not found");
                let _ = runner.run(&["display-message", &msg]);
                return Ok(false);
            }
        },
    };

    if let Some(current) = current_pane_id(runner)
        && current != pane_id
        && let Err(err) = options::set_global_option(runner, PREVIOUS_PANE_KEY, &current)
    {
        tracing::warn!(error = %err, "failed to record previous pane");
    }

    let (current_session, current_window) =
        current_location(runner).unwrap_or((String::new(), None));

    if target_session != current_session {
        match target_window {
            Some(w) => {
                let target = format!("{target_session}:{w}");
                runner.run(&["switch-client", "-t", &target])?;
            }
            None => {
                runner.run(&["switch-client", "-t", &target_session])?;
            }
        }
    } else if let Some(w) = target_window
        && Some(w) != current_window
    {
        let target = format!("{target_session}:{w}");
        runner.run(&["select-window", "-t", &target])?;
    }

    runner.run(&["select-pane", "-t", pane_id])?;
    Ok(true)
}

// ─── Tests ────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    /// Simulates a server with one known pane layout and records calls.
    struct FakeServer {
        current_pane: &'static str,
        current_location: &'static str,
        panes: &'static str,
        calls: RefCell<Vec<Vec<String>>>,
    }

    impl FakeServer {
        fn calls(&self) -> Vec<String> {
            self.calls.borrow().iter().map(|c| c.join(" ")).collect()
        }
    }

    impl TmuxCommandRunner for FakeServer {
        fn run(&self, args: &[&str]) -> Result<String, TmuxError> {
            self.calls
                .borrow_mut()
                .push(args.iter().map(|s| s.to_string()).collect());
            match args {
                ["display-message", "-p", "#{pane_id}"] => Ok(self.current_pane.to_string()),
                ["display-message", "-p", "#{session_name}\t#{window_index}"] => {
                    Ok(self.current_location.to_string())
                }
                ["list-panes", ..] => Ok(self.panes.to_string()),
                _ => Ok(String::new()),
            }
        }
    }

    fn server() -> FakeServer {
        FakeServer {
            current_pane: "%0",
            current_location: "main\t0",
            panes: "%0\tmain\t0\n%7\tdev\t3",
            calls: RefCell::new(Vec::new()),
        }
    }

    #[test]
    fn cross_session_switch_uses_switch_client() {
        let srv = server();
        let switched = switch_to_pane(&srv, "%7", None, None).expect("switch");
        assert!(switched);
        let calls = srv.calls();
        assert!(calls.iter().any(|c| c == "switch-client -t dev:3"));
        assert!(calls.iter().any(|c| c == "select-pane -t %7"));
    }

    #[test]
    fn same_session_other_window_selects_window() {
        let srv = FakeServer {
            panes: "%0\tmain\t0\n%4\tmain\t2",
            ..server()
        };
        switch_to_pane(&srv, "%4", Some("main"), Some(2)).expect("switch");
        let calls = srv.calls();
        assert!(calls.iter().any(|c| c == "select-window -t main:2"));
        assert!(!calls.iter().any(|c| c.starts_with("switch-client")));
    }

    #[test]
    fn same_window_only_selects_pane() {
        let srv = server();
        switch_to_pane(&srv, "%1", Some("main"), Some(0)).expect("switch");
        let calls = srv.calls();
        assert!(calls.iter().any(|c| c == "select-pane -t %1"));
        assert!(!calls.iter().any(|c| c.starts_with("switch-client")));
        assert!(!calls.iter().any(|c| c.starts_with("select-window")));
    }

    #[test]
    fn unknown_pane_reports_not_found() {
        let srv = server();
        let switched = switch_to_pane(&srv, "%99", None, None).expect("no error");
        assert!(!switched);
        assert!(srv.calls().iter().any(|c| c.contains("not found")));
    }

    #[test]
    fn departing_pane_recorded_as_previous() {
        let srv = server();
        switch_to_pane(&srv, "%7", None, None).expect("switch");
        assert!(
            srv.calls()
                .iter()
                .any(|c| c == &format!("set-option -g {PREVIOUS_PANE_KEY} %0"))
        );
    }

    #[test]
    fn switching_to_current_pane_keeps_pointer() {
        let srv = FakeServer {
            current_pane: "%7",
            ..server()
        };
        switch_to_pane(&srv, "%7", Some("dev"), Some(3)).expect("switch");
        let prefix = format!("set-option -g {PREVIOUS_PANE_KEY}");
        assert!(
            !srv.calls().iter().any(|c| c.starts_with(&prefix)),
            "pointer must not be overwritten with the pane itself"
        );
    }
}
