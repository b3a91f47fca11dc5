//! hop-core: pane attention-state model and priority engine.
//! Pure logic — no IO, no subprocess. The tmux boundary lives in hop-tmux.

pub mod dialog;
pub mod pane;
pub mod priority;
pub mod reconcile;

pub use dialog::has_active_dialog;
pub use pane::{Pane, PaneState};
pub use priority::{
    CycleMode, StateGroups, cycle_group, group_by_state, next_in_group, sort_all,
    sort_within_group,
};
pub use reconcile::{stale_panes, validated_panes};
