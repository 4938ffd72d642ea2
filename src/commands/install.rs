//! Install command implementation
//!
//! The installation process:
//! 1. Load the Cartridge, pinned by Cartridge.lock when present
//! 2. Fetch and pin every dependency (and nested ones with `--recursive`)
//! 3. Write Cartridge.lock with the resolved revisions
//!
//! Nothing is written when any fetch fails or two requests for the same
//! import path resolve to different revisions.

use crate::cli::InstallArgs;
use crate::commands::helpers::Settings;
use crate::config::DependencySet;
use crate::error::Result;
use crate::installer::{InstallOptions, Installer};
use crate::runner::{CommandRunner, ShellRunner};
use crate::ui::{InteractiveProgressReporter, ProgressReporter, display};

/// Run install command
pub fn run(settings: &Settings, args: InstallArgs) -> Result<()> {
    let runner = ShellRunner::new();
    let mut reporter = InteractiveProgressReporter::new();

    install(settings, args.into(), &runner, &mut reporter)?;

    println!("{}", display::ok());
    Ok(())
}

fn install(
    settings: &Settings,
    options: InstallOptions,
    runner: &dyn CommandRunner,
    reporter: &mut dyn ProgressReporter,
) -> Result<DependencySet> {
    let mut installer = Installer::new(runner, &settings.workspace, &settings.source, options);
    let locked = installer.install(&settings.dir, reporter)?;

    tracing::info!(
        locked = locked.len(),
        fetched = installer.registry().len(),
        "install finished"
    );

    Ok(locked)
}
