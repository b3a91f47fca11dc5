//! Heuristic detection of an open interactive dialog in captured pane text.
//!
//! Claude Code renders a status bar at the bottom of the pane, separated
//! from the main content by a horizontal rule. When the input prompt is
//! idle, the line directly above that rule is the bare prompt marker; while
//! a dialog or menu is open, that line is dialog content instead. The rule
//! is tied to the target program's rendering conventions, so it lives here
//! behind a single function and two glyph constants — swap these to
//! retarget the detection without touching the sequencer.

/// Glyph a status-boundary rule consists of.
pub const SEPARATOR_GLYPH: char = '─';

/// Glyph the idle input prompt starts with.
pub const PROMPT_MARKER: char = '❯';

/// Decide whether a pane declared `waiting` is still blocked on an
/// interactive dialog, from its captured buffer.
///
/// Scans from the last line upward: lines below the bottom-most separator
/// rule are status metadata and are ignored; the first non-blank line above
/// it decides. An empty buffer, or one with no separator at all, counts as
/// an active dialog — the conservative default, rather than risk silently
/// downgrading a real pending dialog.
pub fn has_active_dialog(content: &str) -> bool {
    let mut above_separator = false;
    for line in content.lines().rev() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        if !above_separator {
            if is_separator_line(trimmed) {
                above_separator = true;
            }
            continue;
        }
        return !is_idle_prompt_line(trimmed);
    }
    true
}

fn is_separator_line(line: &str) -> bool {
    !line.is_empty() && line.chars().all(|c| c == SEPARATOR_GLYPH)
}

/// Exactly the prompt marker, or the marker followed by a space and text.
fn is_idle_prompt_line(line: &str) -> bool {
    let mut chars = line.chars();
    if chars.next() != Some(PROMPT_MARKER) {
        return false;
    }
    matches!(chars.next(), None | Some(' '))
}

// ─── Tests ────────────────────────────────────────────────────────
