//! Check command implementation
//!
//! Reports every dependency (nested ones included) whose working copy has
//! local modifications or sits at a different revision than the one pinned.
//! Exits non-zero when anything is reported.

use crate::checker::{CheckReport, Checker};
use crate::cli::CheckArgs;
use crate::commands::helpers::Settings;
use crate::error::{CartageError, Result};
use crate::runner::{CommandRunner, ShellRunner};
use crate::ui::display;

/// Run check command
pub fn run(settings: &Settings, args: CheckArgs) -> Result<()> {
    let runner = ShellRunner::new();
    let report = check(settings, args, &runner)?;

    print!("{}", render(&report));
    outcome(&report)
}

fn check(settings: &Settings, args: CheckArgs, runner: &dyn CommandRunner) -> Result<CheckReport> {
    Checker::new(runner, &settings.workspace, args.exclude).check(&settings.dir)
}

fn render(report: &CheckReport) -> String {
    if report.is_clean() {
        return format!("{}\n", display::ok());
    }

    report
        .findings
        .iter()
        .map(|finding| format!("{}\n", display::finding(finding)))
        .collect()
}

fn outcome(report: &CheckReport) -> Result<()> {
    if report.is_clean() {
        Ok(())
    } else {
        Err(CartageError::DirtyDependencies {
            count: report.findings.len(),
        })
    }
}
