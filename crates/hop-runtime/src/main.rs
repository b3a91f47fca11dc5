//! claude-hop: hop between Claude Code sessions in tmux panes.
//! Every invocation is a short-lived synchronous run: read the option
//! store, act, exit. No daemon, no async runtime.

use clap::Parser;

mod cli;
mod cmd_back;
mod cmd_clear;
mod cmd_cycle;
mod cmd_discover;
mod cmd_doctor;
mod cmd_list;
mod cmd_pick;
mod cmd_prune;
mod cmd_register;
mod cmd_status;
mod cmd_switch;
mod context;
mod logging;
mod notify;
mod setup_hooks;

fn main() -> anyhow::Result<()> {
    logging::init();

    let args = cli::Cli::parse();
    let runner = hop_tmux::TmuxExecutor::default();

    let exit_code = match args.command {
        cli::Command::Register(opts) => cmd_register::run(&runner, &opts)?,
        cli::Command::Clear => cmd_clear::run(&runner)?,
        cli::Command::Cycle(opts) => cmd_cycle::run(&runner, &opts)?,
        cli::Command::Back => cmd_back::run(&runner)?,
        cli::Command::List(opts) => cmd_list::run(&runner, &opts)?,
        cli::Command::Pick(opts) => cmd_pick::run(&runner, &opts)?,
        cli::Command::Switch(opts) => cmd_switch::run(&runner, &opts)?,
        cli::Command::Discover(opts) => cmd_discover::run(&runner, &opts)?,
        cli::Command::Prune(opts) => cmd_prune::run(&runner, &opts)?,
        cli::Command::Status => cmd_status::run(&runner)?,
        cli::Command::Doctor(opts) => cmd_doctor::run(&opts)?,
        cli::Command::SetupHooks(opts) => {
            let path = setup_hooks::apply_hooks(&opts)?;
            println!("hooks written to {}", path.display());
            0
        }
    };

    if exit_code != 0 {
        std::process::exit(exit_code);
    }
    Ok(())
}
