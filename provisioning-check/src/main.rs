use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod admit_cmd;
mod cli;
mod derive_cmd;
mod manifest_cmd;
mod path_guard;
mod validate_cmd;

use cli::{Cli, Command};

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Command::Validate(args) => validate_cmd::run_validate(args),
        Command::Mode(args) => validate_cmd::run_mode(args),
        Command::Derive(args) => derive_cmd::run_derive(args),
        Command::Env(args) => derive_cmd::run_env(args),
        Command::Manifest(args) => manifest_cmd::run_manifest(args),
        Command::Admit(args) => admit_cmd::run_admit(args),
    }
}
