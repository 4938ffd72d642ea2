//! Uniform access to git, Mercurial and Bazaar working copies
//!
//! This module handles:
//! - Detecting which version control system owns a directory
//! - Pinning a working copy to a reference and pulling remote state
//! - Reading the current revision, local modifications and commit ranges
//!
//! All operations shell out to the VCS tool through a [`CommandRunner`].

pub mod detection;

use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::runner::{CommandRunner, CommandSpec};

pub use detection::detect;

/// Advisory that `bzr status` prints even when nothing is modified
pub const BZR_OUT_OF_DATE_ADVISORY: &str = "working tree is out of date, run 'bzr update'\n";

/// Supported version control systems
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VcsKind {
    Git,
    Mercurial,
    Bazaar,
}

impl VcsKind {
    /// All kinds, in detection order
    pub const ALL: [VcsKind; 3] = [VcsKind::Git, VcsKind::Mercurial, VcsKind::Bazaar];

    /// Metadata directory that marks a working copy
    pub fn marker(self) -> &'static str {
        match self {
            VcsKind::Git => ".git",
            VcsKind::Mercurial => ".hg",
            VcsKind::Bazaar => ".bzr",
        }
    }

    /// Command-line tool
    pub fn program(self) -> &'static str {
        match self {
            VcsKind::Git => "git",
            VcsKind::Mercurial => "hg",
            VcsKind::Bazaar => "bzr",
        }
    }

    fn checkout_args(self, version: &str) -> Vec<String> {
        match self {
            VcsKind::Git => args(&["checkout", version]),
            VcsKind::Mercurial => args(&["update", "-c", version]),
            VcsKind::Bazaar => args(&["update", "-r", version]),
        }
    }

    fn update_args(self) -> Vec<String> {
        match self {
            VcsKind::Git => args(&["fetch"]),
            VcsKind::Mercurial | VcsKind::Bazaar => args(&["pull"]),
        }
    }

    fn current_version_args(self) -> Vec<String> {
        match self {
            VcsKind::Git => args(&["rev-parse", "HEAD"]),
            VcsKind::Mercurial => args(&["id", "-i"]),
            VcsKind::Bazaar => args(&["revno", "--tree"]),
        }
    }

    fn status_args(self) -> Vec<String> {
        match self {
            VcsKind::Git => args(&["status", "--porcelain"]),
            VcsKind::Mercurial | VcsKind::Bazaar => args(&["status"]),
        }
    }

    fn log_args(self, from: &str, to: &str) -> Vec<String> {
        match self {
            VcsKind::Git => args(&["log", "--oneline", &format!("{from}..{to}")]),
            VcsKind::Mercurial => args(&[
                "log",
                "--template",
                "{rev}:{node}: {desc|firstline}\n",
                "-r",
                &format!("{from}::{to}"),
            ]),
            VcsKind::Bazaar => args(&["log", "--line", "-r", &format!("{from}..{to}")]),
        }
    }
}

impl std::fmt::Display for VcsKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.program())
    }
}

fn args(list: &[&str]) -> Vec<String> {
    list.iter().map(ToString::to_string).collect()
}

/// A working copy on disk and the system that owns it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Repository {
    pub path: PathBuf,
    pub kind: VcsKind,
}

impl Repository {
    pub fn new(path: impl Into<PathBuf>, kind: VcsKind) -> Self {
        Self {
            path: path.into(),
            kind,
        }
    }

    /// Detect the owning system of `path`
    pub fn open(path: &Path) -> Result<Self> {
        let kind = detect(path)?;
        Ok(Self::new(path, kind))
    }

    /// Switch the working copy to `version`
    pub fn checkout(&self, runner: &dyn CommandRunner, version: &str) -> Result<()> {
        runner.run(&self.command(self.kind.checkout_args(version)))?;
        Ok(())
    }

    /// Pull remote state without moving the working copy
    pub fn update(&self, runner: &dyn CommandRunner) -> Result<()> {
        runner.run(&self.command(self.kind.update_args()))?;
        Ok(())
    }

    /// Concrete identifier of the checked-out revision
    pub fn current_version(&self, runner: &dyn CommandRunner) -> Result<String> {
        let output = runner.run(&self.command(self.kind.current_version_args()))?;
        Ok(output.stdout.trim_end_matches('\n').to_string())
    }

    /// Local modifications, empty when the working copy is clean
    pub fn status(&self, runner: &dyn CommandRunner) -> Result<String> {
        let output = runner.run(&self.command(self.kind.status_args()))?;

        if self.kind == VcsKind::Bazaar {
            return Ok(output.combined.replacen(BZR_OUT_OF_DATE_ADVISORY, "", 1));
        }

        Ok(output.combined)
    }

    /// One line per commit between `from` and `to`
    pub fn log(&self, runner: &dyn CommandRunner, from: &str, to: &str) -> Result<String> {
        let output = runner.run(&self.command(self.kind.log_args(from, to)))?;
        Ok(output.combined)
    }

    fn command(&self, args: Vec<String>) -> CommandSpec {
        CommandSpec::new(self.kind.program(), args).in_dir(&self.path)
    }
}
