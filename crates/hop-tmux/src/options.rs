//! The `@hop-*` attribute store: per-pane declared state and the global
//! configuration options.
//!
//! tmux offers no transaction across option writes: state and timestamp are
//! two consecutive `set-option` calls, and global keys are plain
//! last-writer-wins cells. Per-pane attributes have exactly one writer in
//! practice (the pane's own hook), so this is an accepted tradeoff.

use hop_core::PaneState;

use crate::error::TmuxError;
use crate::executor::TmuxCommandRunner;

// ─── Option keys ──────────────────────────────────────────────────

pub const STATE_KEY: &str = "@hop-state";
pub const TIMESTAMP_KEY: &str = "@hop-timestamp";
pub const MARKER_KEY: &str = "@hop-claude";

pub const PREVIOUS_PANE_KEY: &str = "@hop-previous-pane";
pub const AUTO_KEY: &str = "@hop-auto";
pub const AUTO_PRIORITY_ONLY_KEY: &str = "@hop-auto-priority-only";
pub const NOTIFY_KEY: &str = "@hop-notify";
pub const FOCUS_APP_KEY: &str = "@hop-focus-app";
pub const STATUS_FORMAT_KEY: &str = "@hop-status-format";
pub const TERMINAL_APP_KEY: &str = "@hop-terminal-app";

/// Explicit pane id, or the `TMUX_PANE` the hook environment provides.
pub fn resolve_pane_id(pane_id: Option<&str>) -> Option<String> {
    pane_id
        .map(str::to_string)
        .or_else(|| std::env::var("TMUX_PANE").ok())
}

// ─── Per-pane attributes ──────────────────────────────────────────

/// Write the declared state and its timestamp for a pane (two consecutive
/// option writes; see module note on atomicity).
pub fn set_pane_state(
    runner: &impl TmuxCommandRunner,
    pane_id: Option<&str>,
    state: &PaneState,
    now: i64,
) -> Result<(), TmuxError> {
    let target = resolve_pane_id(pane_id);
    let ts = now.to_string();
    set_pane_option(runner, target.as_deref(), STATE_KEY, state.as_str())?;
    set_pane_option(runner, target.as_deref(), TIMESTAMP_KEY, &ts)
}

/// Mark a pane as managed (hosting a Claude Code session).
pub fn mark_managed(
    runner: &impl TmuxCommandRunner,
    pane_id: Option<&str>,
) -> Result<(), TmuxError> {
    let target = resolve_pane_id(pane_id);
    set_pane_option(runner, target.as_deref(), MARKER_KEY, "1")
}

/// Unset all hop attributes on a pane. Best-effort: an already-unset key is
/// not an error worth surfacing.
pub fn clear_pane_state(runner: &impl TmuxCommandRunner, pane_id: Option<&str>) {
    let target = resolve_pane_id(pane_id);
    for key in [MARKER_KEY, STATE_KEY, TIMESTAMP_KEY] {
        if let Err(err) = unset_pane_option(runner, target.as_deref(), key) {
            tracing::debug!(key, error = %err, "unset skipped");
        }
    }
}

/// Whether a pane already has a declared state.
pub fn has_state(runner: &impl TmuxCommandRunner, pane_id: &str) -> bool {
    get_pane_option(runner, Some(pane_id), STATE_KEY).is_some()
}

fn set_pane_option(
    runner: &impl TmuxCommandRunner,
    target: Option<&str>,
    key: &str,
    value: &str,
) -> Result<(), TmuxError> {
    let mut args = vec!["set-option", "-p"];
    if let Some(t) = target {
        args.extend(["-t", t]);
    }
    args.extend([key, value]);
    runner.run(&args).map(|_| ())
}

fn unset_pane_option(
    runner: &impl TmuxCommandRunner,
    target: Option<&str>,
    key: &str,
) -> Result<(), TmuxError> {
    let mut args = vec!["set-option", "-p"];
    if let Some(t) = target {
        args.extend(["-t", t]);
    }
    args.extend(["-u", key]);
    runner.run(&args).map(|_| ())
}

/// Read one pane option; `None` when unset, empty, or the call fails.
pub fn get_pane_option(
    runner: &impl TmuxCommandRunner,
    target: Option<&str>,
    key: &str,
) -> Option<String> {
    let mut args = vec!["show-option", "-p"];
    if let Some(t) = target {
        args.extend(["-t", t]);
    }
    args.extend(["-qv", key]);
    match runner.run(&args) {
        Ok(value) if !value.trim().is_empty() => Some(value.trim().to_string()),
        _ => None,
    }
}

// ─── Global attributes ────────────────────────────────────────────

/// Read one global option; `None` when unset, empty, or the call fails.
pub fn get_global_option(runner: &impl TmuxCommandRunner, key: &str) -> Option<String> {
    match runner.run(&["show-option", "-gqv", key]) {
        Ok(value) if !value.trim().is_empty() => Some(value.trim().to_string()),
        _ => None,
    }
}

pub fn set_global_option(
    runner: &impl TmuxCommandRunner,
    key: &str,
    value: &str,
) -> Result<(), TmuxError> {
    runner.run(&["set-option", "-g", key, value]).map(|_| ())
}

pub fn unset_global_option(runner: &impl TmuxCommandRunner, key: &str) {
    if let Err(err) = runner.run(&["set-option", "-g", "-u", key]) {
        tracing::debug!(key, error = %err, "global unset skipped");
    }
}

// ─── Configuration snapshot ───────────────────────────────────────

/// Point-in-time snapshot of the global hop configuration. Absence of a
/// key means the feature is disabled or the built-in default applies.
#[derive(Debug, Clone)]
pub struct HopOptions {
    /// States that trigger an auto-hop on register.
    pub auto: Vec<PaneState>,
    /// Suppress auto-hop when another pane holds strictly higher priority.
    pub auto_priority_only: bool,
    /// States that trigger a desktop notification on register.
    pub notify: Vec<PaneState>,
    /// States that trigger a terminal-focus on register.
    pub focus_app: Vec<PaneState>,
    /// Status-bar template; `None` selects the built-in default.
    pub status_format: Option<String>,
    /// Terminal application override for the focus shim.
    pub terminal_app: Option<String>,
}

impl Default for HopOptions {
    fn default() -> Self {
        Self {
            auto: Vec::new(),
            auto_priority_only: true,
            notify: Vec::new(),
            focus_app: Vec::new(),
            status_format: None,
            terminal_app: None,
        }
    }
}

impl HopOptions {
    pub fn load(runner: &impl TmuxCommandRunner) -> Self {
        let states = |key| {
            get_global_option(runner, key)
                .map(|v| PaneState::parse_set(&v))
                .unwrap_or_default()
        };
        Self {
            auto: states(AUTO_KEY),
            auto_priority_only: get_global_option(runner, AUTO_PRIORITY_ONLY_KEY)
                .map(|v| !v.eq_ignore_ascii_case("off"))
                .unwrap_or(true),
            notify: states(NOTIFY_KEY),
            focus_app: states(FOCUS_APP_KEY),
            status_format: get_global_option(runner, STATUS_FORMAT_KEY),
            terminal_app: get_global_option(runner, TERMINAL_APP_KEY),
        }
    }
}

// ─── Tests ────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    /// Records every call; answers `show-option` from a fixed table.
    struct FakeStore {
        globals: Vec<(&'static str, &'static str)>,
        calls: RefCell<Vec<Vec<String>>>,
    }

    impl FakeStore {
        fn new(globals: Vec<(&'static str, &'static str)>) -> Self {
            Self {
                globals,
                calls: RefCell::new(Vec::new()),
            }
        }
    }

    impl TmuxCommandRunner for FakeStore {
        fn run(&self, args: &[&str]) -> Result<String, TmuxError> {
            self.calls
                .borrow_mut()
                .push(args.iter().map(|s| s.to_string()).collect());
            if args.first() == Some(&"show-option") {
                let key = args.last().expect("key arg");
                return Ok(self
                    .globals
                    .iter()
                    .find(|(k, _)| k == key)
                    .map(|(_, v)| v.to_string())
                    .unwrap_or_default());
            }
            Ok(String::new())
        }
    }

    #[test]
    fn set_pane_state_writes_state_then_timestamp() {
        let store = FakeStore::new(vec![]);
        set_pane_state(&store, Some("%5"), &PaneState::Waiting, 1_700_000_000).expect("set");
        let calls = store.calls.borrow();
        assert_eq!(
            calls[0],
            ["set-option", "-p", "-t", "%5", STATE_KEY, "waiting"]
        );
        assert_eq!(
            calls[1],
            ["set-option", "-p", "-t", "%5", TIMESTAMP_KEY, "1700000000"]
        );
    }

    #[test]
    fn clear_pane_state_unsets_all_keys() {
        let store = FakeStore::new(vec![]);
        clear_pane_state(&store, Some("%5"));
        let calls = store.calls.borrow();
        assert_eq!(calls.len(), 3);
        for (call, key) in calls.iter().zip([MARKER_KEY, STATE_KEY, TIMESTAMP_KEY]) {
            assert_eq!(call, &["set-option", "-p", "-t", "%5", "-u", key]);
        }
    }

    #[test]
    fn clear_pane_state_swallows_failures() {
        struct Failing;
        impl TmuxCommandRunner for Failing {
            fn run(&self, _args: &[&str]) -> Result<String, TmuxError> {
                Err(TmuxError::CommandFailed("no such option".to_string()))
            }
        }
        clear_pane_state(&Failing, Some("%5"));
    }

    #[test]
    fn empty_option_value_reads_as_none() {
        let store = FakeStore::new(vec![(STATUS_FORMAT_KEY, "")]);
        assert_eq!(get_global_option(&store, STATUS_FORMAT_KEY), None);
    }

    #[test]
    fn options_load_defaults() {
        let store = FakeStore::new(vec![]);
        let opts = HopOptions::load(&store);
        assert!(opts.auto.is_empty());
        assert!(opts.auto_priority_only, "priority-only defaults to on");
        assert!(opts.notify.is_empty());
        assert_eq!(opts.status_format, None);
        assert_eq!(opts.terminal_app, None);
    }

    #[test]
    fn options_load_reads_globals() {
        let store = FakeStore::new(vec![
            (AUTO_KEY, "waiting,idle"),
            (AUTO_PRIORITY_ONLY_KEY, "off"),
            (NOTIFY_KEY, "waiting"),
            (TERMINAL_APP_KEY, "WezTerm"),
        ]);
        let opts = HopOptions::load(&store);
        assert_eq!(opts.auto, vec![PaneState::Waiting, PaneState::Idle]);
        assert!(!opts.auto_priority_only);
        assert_eq!(opts.notify, vec![PaneState::Waiting]);
        assert_eq!(opts.terminal_app.as_deref(), Some("WezTerm"));
    }
}
