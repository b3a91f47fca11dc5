//! `claude-hop setup-hooks` — wire the state-declaring hooks into Claude
//! Code's settings.json. Merge, never overwrite: unrelated settings and
//! hook types stay as they are.

use std::path::PathBuf;

use crate::cli::SetupHooksOpts;

/// Hook events and the subcommand each one declares.
const HOOK_COMMANDS: &[(&str, &str)] = &[
    ("UserPromptSubmit", "register --state active"),
    ("Notification", "register --state waiting"),
    ("Stop", "register --state idle"),
    ("SessionEnd", "clear"),
];

/// Resolve the settings.json path based on scope.
pub fn settings_path(scope: &str) -> anyhow::Result<PathBuf> {
    match scope {
        "project" => Ok(PathBuf::from(".claude/settings.json")),
        "user" => {
            let home = std::env::var("HOME")
                .map_err(|_| anyhow::anyhow!("HOME not set; cannot resolve user scope"))?;
            Ok(PathBuf::from(home).join(".claude/settings.json"))
        }
        _ => anyhow::bail!("invalid scope: {scope:?} (expected \"project\" or \"user\")"),
    }
}

/// The binary path embedded in hook commands: explicit flag, this
/// executable, or the bare name resolved from PATH.
fn resolve_binary(explicit: Option<&str>) -> String {
    if let Some(path) = explicit {
        return path.to_string();
    }
    std::env::current_exe()
        .ok()
        .map(|p| p.to_string_lossy().into_owned())
        .unwrap_or_else(|| "claude-hop".to_string())
}

/// Shell-quote a path for safe embedding in a hook command string.
fn shell_quote(path: &str) -> String {
    if path.contains(|c: char| c.is_whitespace() || c == '\'' || c == '"' || c == '\\') {
        format!("'{}'", path.replace('\'', "'\\''"))
    } else {
        path.to_string()
    }
}

/// Generate this tool's hook entries for Claude Code settings.json.
pub fn generate_hooks_config(binary: &str) -> serde_json::Map<String, serde_json::Value> {
    let quoted = shell_quote(binary);
    let mut hooks = serde_json::Map::new();
    for (event, subcommand) in HOOK_COMMANDS {
        let command = format!("{quoted} {subcommand}");
        hooks.insert(
            (*event).to_string(),
            serde_json::json!([{
                "type": "command",
                "command": command,
            }]),
        );
    }
    hooks
}

/// Merge the hook configuration into the settings file.
pub fn apply_hooks(opts: &SetupHooksOpts) -> anyhow::Result<PathBuf> {
    let path = settings_path(&opts.scope)?;
    let binary = resolve_binary(opts.binary.as_deref());

    let mut settings: serde_json::Value = if path.exists() {
        let content = std::fs::read_to_string(&path)?;
        serde_json::from_str(&content)?
    } else {
        serde_json::json!({})
    };

    let obj = settings
        .as_object_mut()
        .ok_or_else(|| anyhow::anyhow!("settings.json is not a JSON object"))?;
    let hooks = obj
        .entry("hooks")
        .or_insert_with(|| serde_json::json!({}))
        .as_object_mut()
        .ok_or_else(|| anyhow::anyhow!("settings.json \"hooks\" is not a JSON object"))?;
    for (event, entry) in generate_hooks_config(&binary) {
        hooks.insert(event, entry);
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let output = serde_json::to_string_pretty(&settings)?;
    std::fs::write(&path, format!("{output}\n"))?;

    Ok(path)
}

// ─── Tests ────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_hook_events_generated() {
        let hooks = generate_hooks_config("/usr/local/bin/claude-hop");
        for (event, subcommand) in HOOK_COMMANDS {
            let entry = hooks.get(*event).expect("event present");
            let arr = entry.as_array().expect("array");
            assert_eq!(arr.len(), 1);
            assert_eq!(arr[0]["type"], "command");
            let cmd = arr[0]["command"].as_str().expect("command string");
            assert!(cmd.ends_with(subcommand), "{cmd}");
            assert!(cmd.starts_with("/usr/local/bin/claude-hop"));
        }
    }

    #[test]
    fn path_with_spaces_is_quoted() {
        let hooks = generate_hooks_config("/Users/m e/bin/claude-hop");
        let cmd = hooks["Stop"][0]["command"].as_str().expect("cmd");
        assert!(cmd.starts_with("'/Users/m e/bin/claude-hop'"), "{cmd}");
    }

    #[test]
    fn path_with_single_quote_is_escaped() {
        let hooks = generate_hooks_config("/Users/it's/claude-hop");
        let cmd = hooks["Stop"][0]["command"].as_str().expect("cmd");
        assert!(cmd.contains("'\\''"), "{cmd}");
    }

    #[test]
    fn settings_path_scopes() {
        assert_eq!(
            settings_path("project").expect("ok"),
            PathBuf::from(".claude/settings.json")
        );
        assert!(
            settings_path("user")
                .expect("ok")
                .ends_with(".claude/settings.json")
        );
        assert!(settings_path("global").is_err());
    }

    #[test]
    fn merge_preserves_unrelated_keys() {
        let mut settings = serde_json::json!({
            "model": "opus",
            "hooks": {
                "PreToolUse": [{"type": "command", "command": "other-tool check"}]
            }
        });
        let obj = settings.as_object_mut().expect("object");
        let hooks = obj
            .entry("hooks")
            .or_insert_with(|| serde_json::json!({}))
            .as_object_mut()
            .expect("hooks object");
        for (event, entry) in generate_hooks_config("claude-hop") {
            hooks.insert(event, entry);
        }

        assert_eq!(settings["model"], "opus", "unrelated settings key kept");
        assert_eq!(
            settings["hooks"]["PreToolUse"][0]["command"], "other-tool check",
            "unrelated hook type kept"
        );
        assert!(settings["hooks"]["Stop"][0]["command"]
            .as_str()
            .expect("cmd")
            .contains("register --state idle"));
    }
}
