use anyhow::Result;
use clap::Parser;

mod cli;
mod compile_cmd;
mod path_guard;
mod plan_cmd;
mod verify_cmd;

use cli::{Cli, Command};

fn main() -> Result<()> {
    let cli = Cli::parse();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(cli.log_level()))
        .format_timestamp(None)
        .init();

    let verbose = cli.verbose || cli.debug;
    match cli.command {
        Command::Compile(args) => compile_cmd::run_compile(args),
        Command::Verify(args) => verify_cmd::run_verify(args, verbose),
        Command::Plan(args) => plan_cmd::run_plan(args),
    }
}
