//! Priority grouping, per-tier ordering, and cycle selection.

use crate::pane::{Pane, PaneState};

// ─── Cycle mode ───────────────────────────────────────────────────

/// How `cycle_group` selects panes to iterate over.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum CycleMode {
    /// Only the highest-priority non-empty tier; cycling never crosses tiers.
    #[default]
    Priority,
    /// All tiers concatenated in priority order.
    Flat,
}

// ─── Grouping ─────────────────────────────────────────────────────

/// Panes partitioned into the three priority tiers.
#[derive(Debug, Default, Clone)]
pub struct StateGroups {
    pub waiting: Vec<Pane>,
    pub idle: Vec<Pane>,
    pub active: Vec<Pane>,
}

/// Partition panes by state. An unrecognized state lands in the `active`
/// bucket (lowest urgency) with a diagnostic — records are never dropped.
pub fn group_by_state(panes: Vec<Pane>) -> StateGroups {
    let mut groups = StateGroups::default();
    for pane in panes {
        match pane.state {
            PaneState::Waiting => groups.waiting.push(pane),
            PaneState::Idle => groups.idle.push(pane),
            PaneState::Active => groups.active.push(pane),
            PaneState::Other(ref raw) => {
                tracing::warn!(pane = %pane.id, state = %raw, "unknown state, treating as active");
                groups.active.push(pane);
            }
        }
    }
    groups
}

// ─── Ordering ─────────────────────────────────────────────────────

/// Sort panes within one tier.
///
/// Waiting sorts oldest first — the pane that has been blocking longest is
/// the most urgent. Idle/Active sort newest first — the freshest activity
/// is the most relevant. The sort is stable; ties keep input order.
pub fn sort_within_group(mut panes: Vec<Pane>, state: &PaneState) -> Vec<Pane> {
    if matches!(state, PaneState::Waiting) {
        panes.sort_by_key(|p| p.timestamp);
    } else {
        panes.sort_by_key(|p| std::cmp::Reverse(p.timestamp));
    }
    panes
}

/// The pane sequence a "next" command iterates over.
pub fn cycle_group(panes: Vec<Pane>, mode: CycleMode) -> Vec<Pane> {
    let groups = group_by_state(panes);
    match mode {
        CycleMode::Priority => {
            if !groups.waiting.is_empty() {
                sort_within_group(groups.waiting, &PaneState::Waiting)
            } else if !groups.idle.is_empty() {
                sort_within_group(groups.idle, &PaneState::Idle)
            } else {
                sort_within_group(groups.active, &PaneState::Active)
            }
        }
        CycleMode::Flat => {
            let mut all = sort_within_group(groups.waiting, &PaneState::Waiting);
            all.extend(sort_within_group(groups.idle, &PaneState::Idle));
            all.extend(sort_within_group(groups.active, &PaneState::Active));
            all
        }
    }
}

/// Total order over all panes for display listings: equal to the flat-mode
/// concatenation, independent of cycle mode.
pub fn sort_all(mut panes: Vec<Pane>) -> Vec<Pane> {
    panes.sort_by_key(|p| {
        let ts = if p.state == PaneState::Waiting {
            p.timestamp
        } else {
            -p.timestamp
        };
        (p.state.priority(), ts)
    });
    panes
}

/// The element after `current_id` in `group`, wrapping around. A pane that
/// is not a member (pruned, or newly moved to a different tier) yields the
/// first element. `None` only for an empty group.
pub fn next_in_group<'a>(group: &'a [Pane], current_id: &str) -> Option<&'a Pane> {
    if group.is_empty() {
        return None;
    }
    match group.iter().position(|p| p.id == current_id) {
        Some(idx) => group.get((idx + 1) % group.len()),
        None => group.first(),
    }
}

// ─── Tests ────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn pane(id: &str, state: PaneState, timestamp: i64) -> Pane {
        Pane {
            id: id.to_string(),
            state,
            timestamp,
            cwd: "/repo".to_string(),
            session: "main".to_string(),
            window: 0,
        }
    }

    fn sample() -> Vec<Pane> {
        vec![
            pane("%1", PaneState::Active, 100),
            pane("%2", PaneState::Waiting, 200),
            pane("%3", PaneState::Idle, 150),
            pane("%4", PaneState::Waiting, 100),
        ]
    }

    fn ids(panes: &[Pane]) -> Vec<&str> {
        panes.iter().map(|p| p.id.as_str()).collect()
    }

    #[test]
    fn waiting_sorts_oldest_first() {
        let sorted = sort_within_group(
            vec![
                pane("%a", PaneState::Waiting, 300),
                pane("%b", PaneState::Waiting, 100),
                pane("%c", PaneState::Waiting, 200),
            ],
            &PaneState::Waiting,
        );
        let ts: Vec<i64> = sorted.iter().map(|p| p.timestamp).collect();
        assert!(ts.windows(2).all(|w| w[0] <= w[1]), "non-decreasing: {ts:?}");
    }

    #[test]
    fn idle_and_active_sort_newest_first() {
        for state in [PaneState::Idle, PaneState::Active] {
            let sorted = sort_within_group(
                vec![
                    pane("%a", state.clone(), 100),
                    pane("%b", state.clone(), 300),
                    pane("%c", state.clone(), 200),
                ],
                &state,
            );
            let ts: Vec<i64> = sorted.iter().map(|p| p.timestamp).collect();
            assert!(ts.windows(2).all(|w| w[0] >= w[1]), "non-increasing: {ts:?}");
        }
    }

    #[test]
    fn group_by_state_buckets() {
        let groups = group_by_state(sample());
        assert_eq!(groups.waiting.len(), 2);
        assert_eq!(groups.idle.len(), 1);
        assert_eq!(groups.active.len(), 1);
    }

    #[test]
    fn unknown_state_counts_as_active() {
        let groups = group_by_state(vec![
            pane("%1", PaneState::Other("thinking".to_string()), 50),
            pane("%2", PaneState::Active, 100),
        ]);
        assert_eq!(groups.active.len(), 2);
        assert!(groups.waiting.is_empty());
        assert!(groups.idle.is_empty());
    }

    #[test]
    fn priority_mode_returns_single_highest_tier() {
        let group = cycle_group(sample(), CycleMode::Priority);
        assert_eq!(ids(&group), ["%4", "%2"]);
        assert!(group.iter().all(|p| p.state == PaneState::Waiting), "never mixes tiers");
    }

    #[test]
    fn priority_mode_falls_through_empty_tiers() {
        let group = cycle_group(
            vec![pane("%1", PaneState::Active, 10), pane("%2", PaneState::Active, 20)],
            CycleMode::Priority,
        );
        assert_eq!(ids(&group), ["%2", "%1"]);

        assert!(cycle_group(vec![], CycleMode::Priority).is_empty());
    }

    #[test]
    fn flat_mode_concatenates_all_tiers() {
        let group = cycle_group(sample(), CycleMode::Flat);
        assert_eq!(group.len(), 4, "length equals sum of tier lengths");
        assert_eq!(ids(&group), ["%4", "%2", "%3", "%1"]);
    }

    #[test]
    fn sort_all_matches_flat_order() {
        let sorted = sort_all(sample());
        assert_eq!(ids(&sorted), ["%4", "%2", "%3", "%1"]);
    }

    #[test]
    fn next_in_group_wraps_and_defaults() {
        let group = vec![pane("%4", PaneState::Waiting, 100), pane("%2", PaneState::Waiting, 200)];
        assert_eq!(next_in_group(&group, "%4").map(|p| p.id.as_str()), Some("%2"));
        assert_eq!(next_in_group(&group, "%2").map(|p| p.id.as_str()), Some("%4"));
        // non-member goes to the first element
        assert_eq!(next_in_group(&group, "%9").map(|p| p.id.as_str()), Some("%4"));
        assert_eq!(next_in_group(&[], "%4"), None);
    }
}
