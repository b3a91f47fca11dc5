//! `claude-hop doctor` — environment and dependency checks.

use std::process::Command;

use serde::Serialize;

use crate::cli::DoctorOpts;

const MIN_TMUX_VERSION: (u32, u32) = (3, 0);
const MAX_VERSION_DISPLAY_LENGTH: usize = 50;

#[derive(Debug, Serialize)]
pub struct CheckResult {
    pub name: &'static str,
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub required: bool,
}

impl CheckResult {
    fn ok(name: &'static str, version: Option<String>) -> Self {
        Self {
            name,
            ok: true,
            version,
            message: None,
            required: true,
        }
    }

    fn fail(name: &'static str, message: &str) -> Self {
        Self {
            name,
            ok: false,
            version: None,
            message: Some(message.to_string()),
            required: true,
        }
    }

    fn optional(mut self) -> Self {
        self.required = false;
        self
    }
}

fn run_version_command(program: &str, arg: &str) -> Option<String> {
    let output = Command::new(program).arg(arg).output().ok()?;
    if !output.status.success() {
        return None;
    }
    let version = String::from_utf8_lossy(&output.stdout).trim().to_string();
    Some(if version.len() > MAX_VERSION_DISPLAY_LENGTH {
        format!("{}...", &version[..MAX_VERSION_DISPLAY_LENGTH - 3])
    } else {
        version
    })
}

/// Parse `tmux 3.2a` into `(3, 2)`.
fn parse_tmux_version(version: &str) -> Option<(u32, u32)> {
    let numeric = version
        .split_whitespace()
        .find(|tok| tok.chars().next().is_some_and(|c| c.is_ascii_digit()))?;
    let mut parts = numeric.split('.');
    let major: u32 = parts.next()?.parse().ok()?;
    let minor_raw = parts.next()?;
    let minor: u32 = minor_raw
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect::<String>()
        .parse()
        .ok()?;
    Some((major, minor))
}

fn check_tmux() -> CheckResult {
    let Some(version) = run_version_command("tmux", "-V") else {
        return CheckResult::fail("tmux", "Not installed");
    };
    if let Some((major, minor)) = parse_tmux_version(&version)
        && (major, minor) < MIN_TMUX_VERSION
    {
        let mut result = CheckResult::fail("tmux", &format!("Requires 3.0+, found {major}.{minor}"));
        result.version = Some(version);
        return result;
    }
    CheckResult::ok("tmux", Some(version))
}

fn check_claude() -> CheckResult {
    match run_version_command("claude", "--version") {
        Some(version) => CheckResult::ok("claude", Some(version)),
        None => CheckResult::fail("claude", "Not installed"),
    }
}

fn check_fzf() -> CheckResult {
    let found = Command::new("which")
        .arg("fzf")
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false);
    if found {
        CheckResult::ok("fzf", None).optional()
    } else {
        CheckResult::fail("fzf", "Not found (picker unavailable)").optional()
    }
}

fn check_in_tmux() -> CheckResult {
    if hop_tmux::is_inside_tmux() {
        CheckResult::ok("in-tmux", None).optional()
    } else {
        CheckResult::fail("in-tmux", "Not running inside tmux").optional()
    }
}

fn run_all_checks() -> Vec<CheckResult> {
    vec![check_tmux(), check_claude(), check_fzf(), check_in_tmux()]
}

pub fn run(opts: &DoctorOpts) -> anyhow::Result<i32> {
    let results = run_all_checks();

    if opts.json {
        println!("{}", serde_json::to_string_pretty(&results)?);
    } else {
        println!("Environment Check\n");
        for r in &results {
            let icon = if r.ok {
                "OK"
            } else if r.required {
                "FAIL"
            } else {
                "WARN"
            };
            let detail = r.version.as_deref().or(r.message.as_deref()).unwrap_or("");
            println!("  [{icon:<4}] {}: {detail}", r.name);
        }
        println!();
    }

    let required_failed = results.iter().filter(|r| !r.ok && r.required).count();
    if required_failed > 0 {
        if !opts.json {
            println!("FAIL: {required_failed} required check(s) failed");
        }
        return Ok(1);
    }
    if !opts.json {
        println!("OK: All required checks passed");
    }
    Ok(0)
}
