//! Display helpers shared by the CLI commands.

use hop_core::PaneState;

/// Current epoch seconds.
pub fn now() -> i64 {
    chrono::Utc::now().timestamp()
}

/// State marker for listings and the picker.
pub fn state_icon(state: &PaneState) -> &'static str {
    match state {
        PaneState::Waiting => "󰂜",
        PaneState::Idle => "󰄬",
        PaneState::Active => "󰑮",
        PaneState::Other(_) => "?",
    }
}

const SECONDS_PER_MINUTE: i64 = 60;
const SECONDS_PER_HOUR: i64 = 3600;
const SECONDS_PER_DAY: i64 = 86400;
const SECONDS_PER_WEEK: i64 = 604_800;

/// Compact age string: `5s`, `5m`, `2h`, `1d`, `3w`. A zero or future
/// timestamp renders as `?`.
pub fn time_ago(timestamp: i64, now: i64) -> String {
    if timestamp <= 0 {
        return "?".to_string();
    }
    let diff = now - timestamp;
    if diff < 0 {
        return "?".to_string();
    }
    if diff < SECONDS_PER_MINUTE {
        format!("{diff}s")
    } else if diff < SECONDS_PER_HOUR {
        format!("{}m", diff / SECONDS_PER_MINUTE)
    } else if diff < SECONDS_PER_DAY {
        format!("{}h", diff / SECONDS_PER_HOUR)
    } else if diff < SECONDS_PER_WEEK {
        format!("{}d", diff / SECONDS_PER_DAY)
    } else {
        format!("{}w", diff / SECONDS_PER_WEEK)
    }
}

/// Project name for notifications: the final segment of the working
/// directory this command runs in.
pub fn current_project() -> String {
    std::env::current_dir()
        .ok()
        .and_then(|p| p.file_name().map(|s| s.to_string_lossy().into_owned()))
        .unwrap_or_else(|| "unknown".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn time_ago_buckets() {
        assert_eq!(time_ago(1000, 1030), "30s");
        assert_eq!(time_ago(1000, 1000 + 180), "3m");
        assert_eq!(time_ago(1000, 1000 + 7200), "2h");
        assert_eq!(time_ago(1000, 1000 + 2 * 86400), "2d");
        assert_eq!(time_ago(1000, 1000 + 3 * 604_800), "3w");
    }

    #[test]
    fn time_ago_zero_and_future_are_unknown() {
        assert_eq!(time_ago(0, 100), "?");
        assert_eq!(time_ago(200, 100), "?");
    }

    #[test]
    fn unknown_state_icon() {
        assert_eq!(state_icon(&PaneState::Other("thinking".to_string())), "?");
    }
}
