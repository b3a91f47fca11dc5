//! The closed attention-state enum and the per-pane record.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

// ─── PaneState ────────────────────────────────────────────────────

/// Declared attention level of a pane.
///
/// `Other` carries any state string outside the three known ones: such a
/// record is never dropped, it sorts at `Active` priority (lowest urgency)
/// and the grouping step emits a diagnostic for it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PaneState {
    Waiting,
    Idle,
    Active,
    Other(String),
}

impl PaneState {
    /// Priority rank: lower value = higher urgency.
    pub fn priority(&self) -> u8 {
        match self {
            Self::Waiting => 0,
            Self::Idle => 1,
            Self::Active | Self::Other(_) => 2,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Waiting => "waiting",
            Self::Idle => "idle",
            Self::Active => "active",
            Self::Other(raw) => raw,
        }
    }

    /// Parse a comma-separated trigger-set string from a global option,
    /// e.g. `"waiting,idle"`. Empty segments are skipped.
    pub fn parse_set(raw: &str) -> Vec<PaneState> {
        raw.split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(PaneState::from)
            .collect()
    }
}

impl From<&str> for PaneState {
    fn from(s: &str) -> Self {
        match s {
            "waiting" => Self::Waiting,
            "idle" => Self::Idle,
            "active" => Self::Active,
            other => Self::Other(other.to_string()),
        }
    }
}

impl fmt::Display for PaneState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// Wire form is the bare lowercase string, so `Other` round-trips too.
impl Serialize for PaneState {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for PaneState {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(PaneState::from(raw.as_str()))
    }
}

// ─── Pane ─────────────────────────────────────────────────────────

/// One tmux pane carrying hop attributes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pane {
    /// tmux pane id, e.g. `%12`. Opaque and stable for the pane's lifetime.
    pub id: String,
    pub state: PaneState,
    /// Epoch seconds of the last state write. Written together with `state`.
    pub timestamp: i64,
    /// Working directory at declaration time; display label only.
    pub cwd: String,
    pub session: String,
    pub window: u32,
}

impl Pane {
    /// Build a pane from raw bulk-query fields. A malformed timestamp or
    /// window index substitutes `0` for that field rather than failing the
    /// record — parse errors must not block the rest of the batch.
    pub fn from_raw(
        id: impl Into<String>,
        state: PaneState,
        timestamp_raw: &str,
        cwd: impl Into<String>,
        session: impl Into<String>,
        window_raw: &str,
    ) -> Self {
        Self {
            id: id.into(),
            state,
            timestamp: timestamp_raw.trim().parse().unwrap_or(0),
            cwd: cwd.into(),
            session: session.into(),
            window: window_raw.trim().parse().unwrap_or(0),
        }
    }

    /// Display label: the final segment of `cwd`.
    pub fn project(&self) -> &str {
        let trimmed = self.cwd.trim_end_matches('/');
        match trimmed.rsplit('/').next() {
            Some(seg) if !seg.is_empty() => seg,
            _ => "unknown",
        }
    }

    pub fn age(&self, now: i64) -> i64 {
        now - self.timestamp
    }
}

// ─── Tests ────────────────────────────────────────────────────────
