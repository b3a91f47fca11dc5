//! hop-tmux: tmux IO boundary for the hop engine.
//! Subprocess execution, the `@hop-*` attribute store, bulk pane queries,
//! process-registry checks, content capture, and navigation. No priority
//! logic — that lives in hop-core.

pub mod capture;
pub mod error;
pub mod executor;
pub mod navigate;
pub mod options;
pub mod process;
pub mod store;
pub mod validate;

pub use capture::capture_pane;
pub use error::TmuxError;
pub use executor::{TmuxCommandRunner, TmuxExecutor};
pub use navigate::{current_pane_id, is_inside_tmux, switch_to_pane};
pub use options::HopOptions;
pub use process::{DiscoveredPane, discover_claude_panes, running_claude_pane_ids};
pub use store::{hop_panes, stale_hop_panes, validated_hop_panes};
pub use validate::validate_waiting_panes;
