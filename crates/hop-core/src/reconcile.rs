//! Reconciliation of declared pane records against process-registry truth.
//!
//! The registry's interactive/non-interactive judgement is taken as ground
//! truth: a record whose id is absent from the running set is stale and
//! eligible for pruning, never for cycling or listing. These functions have
//! no side effects — callers decide whether to prune through the store.

use std::collections::HashSet;

use crate::pane::Pane;

/// Records whose pane currently hosts an interactive target process.
pub fn validated_panes(records: Vec<Pane>, running_ids: &HashSet<String>) -> Vec<Pane> {
    records
        .into_iter()
        .filter(|p| running_ids.contains(&p.id))
        .collect()
}

/// The complement of [`validated_panes`]: records whose process is gone.
pub fn stale_panes(records: Vec<Pane>, running_ids: &HashSet<String>) -> Vec<Pane> {
    records
        .into_iter()
        .filter(|p| !running_ids.contains(&p.id))
        .collect()
}
