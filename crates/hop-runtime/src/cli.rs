//! CLI definition using clap derive.

use clap::{Parser, Subcommand, ValueEnum};
use hop_core::{CycleMode, PaneState};

#[derive(Parser)]
#[command(
    name = "claude-hop",
    version,
    about = "Hop between Claude Code sessions in tmux panes"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Register the current pane with a state (hook entry point)
    Register(RegisterOpts),
    /// Clear hop state from the current pane (hook entry point)
    Clear,
    /// Cycle to the next pane in priority order
    Cycle(CycleOpts),
    /// Jump back to the previous pane
    Back,
    /// List managed panes in priority order
    List(ListOpts),
    /// Interactive pane picker via fzf
    Pick(PickOpts),
    /// Switch to a specific pane (picker/keybinding glue)
    Switch(SwitchOpts),
    /// Register running Claude Code sessions found by process
    Discover(DiscoverOpts),
    /// Clear state from panes no longer running Claude Code
    Prune(PruneOpts),
    /// Single-line output for the tmux status bar
    Status,
    /// Check environment and dependencies
    Doctor(DoctorOpts),
    /// Write Claude Code hook configuration into settings.json
    SetupHooks(SetupHooksOpts),
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum StateArg {
    Waiting,
    Idle,
    Active,
}

impl From<StateArg> for PaneState {
    fn from(arg: StateArg) -> Self {
        match arg {
            StateArg::Waiting => PaneState::Waiting,
            StateArg::Idle => PaneState::Idle,
            StateArg::Active => PaneState::Active,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ModeArg {
    /// Cycle within the highest-priority non-empty tier only
    Priority,
    /// Cycle through all panes in one priority-ordered sequence
    Flat,
}

impl From<ModeArg> for CycleMode {
    fn from(arg: ModeArg) -> Self {
        match arg {
            ModeArg::Priority => CycleMode::Priority,
            ModeArg::Flat => CycleMode::Flat,
        }
    }
}

#[derive(clap::Args)]
pub struct RegisterOpts {
    /// State to register
    #[arg(long, short, value_enum)]
    pub state: StateArg,
}

#[derive(clap::Args)]
pub struct CycleOpts {
    /// Current pane id (passed by the tmux keybinding)
    #[arg(long, short)]
    pub pane: Option<String>,

    #[arg(long, short, value_enum, default_value = "priority")]
    pub mode: ModeArg,
}

#[derive(clap::Args)]
pub struct ListOpts {
    /// Output the sorted pane records as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(clap::Args)]
pub struct PickOpts {
    /// Print candidate lines instead of launching fzf
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(clap::Args)]
pub struct SwitchOpts {
    /// Pane id to switch to
    #[arg(long, short)]
    pub pane: String,
}

#[derive(clap::Args)]
pub struct DiscoverOpts {
    /// Show what would be registered without making changes
    #[arg(long, short = 'n')]
    pub dry_run: bool,

    /// Re-register panes that are already registered
    #[arg(long, short)]
    pub force: bool,

    /// Suppress output except errors
    #[arg(long, short)]
    pub quiet: bool,
}

#[derive(clap::Args)]
pub struct PruneOpts {
    /// Show what would be removed without making changes
    #[arg(long, short = 'n')]
    pub dry_run: bool,

    /// Suppress output except errors
    #[arg(long, short)]
    pub quiet: bool,
}

#[derive(clap::Args)]
pub struct DoctorOpts {
    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(clap::Args)]
pub struct SetupHooksOpts {
    /// Settings scope: "project" (.claude/settings.json) or "user" (~/.claude/settings.json)
    #[arg(long, default_value = "project")]
    pub scope: String,

    /// Explicit claude-hop binary path to embed in hook commands
    #[arg(long)]
    pub binary: Option<String>,
}
