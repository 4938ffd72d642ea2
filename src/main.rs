//! Cartage - source dependency manager
//!
//! Fetches the dependencies listed in a Cartridge file into a Go workspace,
//! pins every working copy (git, Mercurial or Bazaar) to the requested
//! revision, and records the exact revisions in Cartridge.lock.

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

mod checker;
mod cli;
mod commands;
mod config;
mod dependency;
mod error;
mod fetcher;
mod installer;
mod repository;
mod runner;
mod ui;
mod workspace;

#[cfg(test)]
mod test_fixtures;

use cli::{Cli, Commands, InstallArgs};
use commands::helpers::Settings;
use error::Result;

/// Initialize the tracing subscriber.
///
/// `--verbose` forces debug output for this crate. Otherwise `RUST_LOG` is
/// honoured, falling back to warnings only. Logs go to stderr.
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("cartage=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("cartage=warn"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let Cli {
        gopath,
        dir,
        go,
        verbose: _,
        command,
    } = cli;

    let settings = || Settings::resolve(gopath.as_deref(), &dir, &go);

    match command {
        Some(Commands::Install(args)) => commands::install::run(&settings()?, args),
        None => commands::install::run(&settings()?, InstallArgs::default()),
        Some(Commands::Check(args)) => commands::check::run(&settings()?, args),
        Some(Commands::Version) => commands::version::run(),
        Some(Commands::Completions(args)) => commands::completions::run(args),
    }
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    tracing::debug!(?cli, "starting");

    if let Err(e) = run(cli) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
