use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod aggregate;
mod cli;
mod error;
mod metric;
mod model;
mod output;
mod plan;
mod records;
mod workflow;

use cli::{Command, RootArgs};

fn main() -> Result<()> {
    let args = RootArgs::parse();
    init_tracing(args.verbose);

    match args.command_or_default() {
        Command::Generate(generate) => {
            let summary = workflow::run_generate(&generate)?;
            tracing::debug!(?summary, "verse tree summary");
            Ok(())
        }
        Command::Plan(plan) => workflow::run_plan(&plan),
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
