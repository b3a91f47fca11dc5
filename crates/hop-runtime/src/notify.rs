//! Desktop notification and terminal-focus shims.
//!
//! Narrow contracts over platform tools: macOS `osascript`, Linux
//! `notify-send` (focus via `wmctrl`/`xdotool`), Windows PowerShell toast.
//! The trigger sets in the global options gate everything; delivery is
//! best-effort and never fails a command.

use std::process::Command;

use hop_core::PaneState;
use hop_tmux::{HopOptions, TmuxCommandRunner, navigate};

// ─── Backend ──────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotifyBackend {
    MacOs,
    Linux,
    Windows,
    /// No suitable tool — notifications are no-ops.
    None,
}

impl NotifyBackend {
    pub fn detect() -> Self {
        if cfg!(target_os = "macos") {
            Self::MacOs
        } else if cfg!(target_os = "linux") {
            Self::Linux
        } else if cfg!(target_os = "windows") {
            Self::Windows
        } else {
            Self::None
        }
    }
}

/// A platform command ready for execution.
#[derive(Debug, Clone)]
pub struct ShellCommand {
    pub program: String,
    pub args: Vec<String>,
}

impl ShellCommand {
    fn new(program: &str, args: Vec<String>) -> Self {
        Self {
            program: program.to_string(),
            args,
        }
    }

    fn run_quiet(&self) -> bool {
        Command::new(&self.program)
            .args(&self.args)
            .output()
            .map(|o| o.status.success())
            .unwrap_or(false)
    }
}

// ─── Notification command builders ────────────────────────────────

pub fn build_notify_command(
    backend: NotifyBackend,
    title: &str,
    body: &str,
) -> Option<ShellCommand> {
    match backend {
        NotifyBackend::MacOs => {
            let script = format!(
                "display notification \"{}\" with title \"{}\"",
                escape_applescript(body),
                escape_applescript(title)
            );
            Some(ShellCommand::new("osascript", vec!["-e".to_string(), script]))
        }
        NotifyBackend::Linux => Some(ShellCommand::new(
            "notify-send",
            vec![
                title.to_string(),
                body.to_string(),
                "--app-name=claude-hop".to_string(),
            ],
        )),
        NotifyBackend::Windows => {
            let script = format!(
                "[Windows.UI.Notifications.ToastNotificationManager, Windows.UI.Notifications, ContentType = WindowsRuntime] | Out-Null; \
                 $xml = [Windows.UI.Notifications.ToastNotificationManager]::GetTemplateContent([Windows.UI.Notifications.ToastTemplateType]::ToastText02); \
                 $text = $xml.GetElementsByTagName('text'); \
                 $text.Item(0).AppendChild($xml.CreateTextNode('{title}')) | Out-Null; \
                 $text.Item(1).AppendChild($xml.CreateTextNode('{body}')) | Out-Null; \
                 $toast = [Windows.UI.Notifications.ToastNotification]::new($xml); \
                 [Windows.UI.Notifications.ToastNotificationManager]::CreateToastNotifier('claude-hop').Show($toast)",
                title = escape_powershell(title),
                body = escape_powershell(body)
            );
            Some(ShellCommand::new(
                "powershell",
                vec!["-Command".to_string(), script],
            ))
        }
        NotifyBackend::None => None,
    }
}

fn escape_applescript(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}

fn escape_powershell(s: &str) -> String {
    s.replace('\'', "''")
}

pub fn send_notification(title: &str, body: &str) -> bool {
    match build_notify_command(NotifyBackend::detect(), title, body) {
        Some(cmd) => cmd.run_quiet(),
        None => false,
    }
}

// ─── Terminal app resolution ──────────────────────────────────────

/// Bundle-id prefixes take priority: `__CFBundleIdentifier` survives tmux
/// while `TERM_PROGRAM` is often rewritten to `tmux`.
const MACOS_BUNDLE_MAP: &[(&str, &str)] = &[
    ("com.apple.Terminal", "Terminal"),
    ("com.googlecode.iterm2", "iTerm"),
    ("io.alacritty", "Alacritty"),
    ("net.kovidgoyal.kitty", "kitty"),
    ("com.github.wez.wezterm", "WezTerm"),
    ("com.mitchellh.ghostty", "Ghostty"),
    ("com.microsoft.VSCode", "Visual Studio Code"),
    ("com.todesktop.230313mzl4w4u92", "Cursor"),
    ("dev.zed.Zed", "Zed"),
];

const TERM_PROGRAM_MAP: &[(&str, &str)] = &[
    ("Apple_Terminal", "Terminal"),
    ("iTerm.app", "iTerm"),
    ("Alacritty", "Alacritty"),
    ("alacritty", "Alacritty"),
    ("kitty", "kitty"),
    ("WezTerm", "WezTerm"),
    ("Ghostty", "Ghostty"),
    ("vscode", "Visual Studio Code"),
    ("gnome-terminal", "Gnome-terminal"),
    ("konsole", "Konsole"),
];

/// Resolve the terminal application name for focus commands. Priority:
/// explicit override, bundle id, `TERM_PROGRAM` mapping, raw
/// `TERM_PROGRAM`. `None` when undetectable (focus becomes a no-op).
pub fn resolve_terminal_app(
    override_app: Option<&str>,
    bundle_id: Option<&str>,
    term_program: Option<&str>,
) -> Option<String> {
    if let Some(app) = override_app.filter(|s| !s.is_empty()) {
        return Some(app.to_string());
    }
    if let Some(bundle) = bundle_id.filter(|s| !s.is_empty()) {
        for (prefix, app) in MACOS_BUNDLE_MAP {
            if bundle == *prefix || bundle.starts_with(&format!("{prefix}.")) {
                return Some(app.to_string());
            }
        }
    }
    let tp = term_program.filter(|s| !s.is_empty() && *s != "tmux")?;
    for (key, app) in TERM_PROGRAM_MAP {
        if tp == *key {
            return Some(app.to_string());
        }
    }
    Some(tp.to_string())
}

fn terminal_app_from_env(opts: &HopOptions) -> Option<String> {
    let bundle = std::env::var("__CFBundleIdentifier").ok();
    let term_program = std::env::var("TERM_PROGRAM").ok();
    resolve_terminal_app(
        opts.terminal_app.as_deref(),
        bundle.as_deref(),
        term_program.as_deref(),
    )
}

// ─── Focus ────────────────────────────────────────────────────────

/// Bring the terminal application to the foreground. The session name, when
/// known, gives window managers a more specific title to match.
pub fn focus_terminal(app: &str, session: Option<&str>) -> bool {
    match NotifyBackend::detect() {
        NotifyBackend::MacOs => {
            let script = format!(
                "tell application \"{}\" to activate",
                escape_applescript(app)
            );
            ShellCommand::new("osascript", vec!["-e".to_string(), script]).run_quiet()
        }
        NotifyBackend::Linux => {
            let search = session.unwrap_or(app);
            ShellCommand::new("wmctrl", vec!["-a".to_string(), search.to_string()]).run_quiet()
                || ShellCommand::new(
                    "xdotool",
                    vec![
                        "search".to_string(),
                        "--name".to_string(),
                        search.to_string(),
                        "windowactivate".to_string(),
                    ],
                )
                .run_quiet()
        }
        NotifyBackend::Windows => {
            let script = format!(
                "(New-Object -ComObject WScript.Shell).AppActivate('{}')",
                escape_powershell(app)
            );
            ShellCommand::new("powershell", vec!["-Command".to_string(), script]).run_quiet()
        }
        NotifyBackend::None => false,
    }
}

/// Whether the terminal app is already frontmost — used to suppress
/// notifications the user is looking at. Only macOS can answer reliably
/// from inside tmux; elsewhere assume not focused (show the notification).
fn is_terminal_focused(app: &str) -> bool {
    if NotifyBackend::detect() != NotifyBackend::MacOs {
        return false;
    }
    let output = Command::new("osascript")
        .args([
            "-e",
            "tell application \"System Events\" to get name of first application process whose frontmost is true",
        ])
        .output();
    match output {
        Ok(o) if o.status.success() => {
            let frontmost = String::from_utf8_lossy(&o.stdout);
            frontmost.trim().eq_ignore_ascii_case(app)
        }
        _ => false,
    }
}

// ─── Trigger gating ───────────────────────────────────────────────

/// Run the notification and focus actions configured for a state change.
pub fn handle_state_notifications(
    runner: &impl TmuxCommandRunner,
    opts: &HopOptions,
    state: &PaneState,
    project: &str,
) {
    let wants_focus = opts.focus_app.contains(state);
    let wants_notify = opts.notify.contains(state);
    if !wants_focus && !wants_notify {
        return;
    }

    let app = terminal_app_from_env(opts);
    let session = navigate::current_location(runner).map(|(s, _)| s);

    // Sampled before focus_terminal changes it.
    let already_focused = wants_notify
        && app
            .as_deref()
            .map(is_terminal_focused)
            .unwrap_or(false);

    if wants_focus {
        match app.as_deref() {
            Some(a) if focus_terminal(a, session.as_deref()) => {
                tracing::info!(state = %state, app = a, "terminal focused");
            }
            Some(a) => tracing::debug!(state = %state, app = a, "terminal focus failed"),
            None => tracing::debug!("focus skipped, terminal app undetectable"),
        }
    }

    if wants_notify {
        if already_focused {
            tracing::info!(state = %state, "notification suppressed, terminal already focused");
            return;
        }
        let body = format!("{project}: {state}");
        if send_notification("Claude Code", &body) {
            tracing::info!(state = %state, "notification sent");
        } else {
            tracing::debug!(state = %state, "notification failed");
        }
    }
}

// ─── Tests ────────────────────────────────────────────────────────
