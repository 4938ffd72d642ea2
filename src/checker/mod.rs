//! Working copy status checks
//!
//! This module handles:
//! - Walking a manifest and every nested manifest below it
//! - Flagging working copies with local modifications
//! - Flagging working copies whose revision differs from the pinned one,
//!   with the commit distance in either direction when it can be measured
//!
//! Nothing here mutates a working copy. Dependencies that are not on disk
//! yet have nothing to check and are skipped.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::config;
use crate::dependency::Dependency;
use crate::error::Result;
use crate::repository::Repository;
use crate::runner::CommandRunner;
use crate::workspace::Workspace;

/// Distance between the pinned revision and the checked-out one
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VersionDelta {
    /// The working copy has commits the pinned version does not
    Ahead { commits: usize, log: String },
    /// The working copy lacks commits the pinned version has
    Behind { commits: usize, log: String },
    /// Neither revision is reachable from the other locally
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Problem {
    Dirty {
        output: String,
    },
    VersionMismatch {
        expected: String,
        current: String,
        delta: VersionDelta,
    },
}

/// One dependency that is not in its pinned state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finding {
    pub path: String,
    pub full_path: PathBuf,
    pub problem: Problem,
}

#[derive(Debug, Default)]
pub struct CheckReport {
    pub findings: Vec<Finding>,
}

impl CheckReport {
    pub fn is_clean(&self) -> bool {
        self.findings.is_empty()
    }
}

/// State of one recursive walk
#[derive(Default)]
struct Walk {
    report: CheckReport,
    /// Working copies already compared against a given version
    compared: HashSet<(PathBuf, String)>,
    /// Working copies whose nested manifest has been walked
    descended: HashSet<PathBuf>,
}

pub struct Checker<'a> {
    runner: &'a dyn CommandRunner,
    workspace: &'a Workspace,
    exclude: Vec<String>,
}

impl<'a> Checker<'a> {
    pub fn new(runner: &'a dyn CommandRunner, workspace: &'a Workspace, exclude: Vec<String>) -> Self {
        Self {
            runner,
            workspace,
            exclude,
        }
    }

    /// Check every dependency reachable from the manifest in `root`.
    ///
    /// Fails if `root` has no manifest. Nested directories without one
    /// simply end the descent.
    pub fn check(&self, root: &Path) -> Result<CheckReport> {
        let set = config::load(root)?.excluding(&self.exclude);

        let mut nested_exclude = self.exclude.clone();
        nested_exclude.push(config::NESTED_EXCLUDED_TAG.to_string());

        let mut walk = Walk::default();

        for dep in set.iter() {
            self.check_dependency(dep, &nested_exclude, &mut walk)?;
        }

        Ok(walk.report)
    }

    fn check_dependency(
        &self,
        dep: &Dependency,
        nested_exclude: &[String],
        walk: &mut Walk,
    ) -> Result<()> {
        let full_path = self.workspace.dependency_path(dep);

        // every distinct version requirement is compared, even for a path
        // that was already checked against another manifest
        if walk.compared.insert((full_path.clone(), dep.version.clone())) {
            if let Some(problem) = self.dependency_status(dep, &full_path)? {
                walk.report.findings.push(Finding {
                    path: dep.path.clone(),
                    full_path: full_path.clone(),
                    problem,
                });
            }
        }

        if !walk.descended.insert(full_path.clone()) {
            return Ok(());
        }

        let Some(nested) = config::load_if_present(&full_path)? else {
            return Ok(());
        };

        tracing::debug!(path = %dep.path, "checking nested manifest");

        for nested_dep in nested.excluding(nested_exclude).iter() {
            self.check_dependency(nested_dep, nested_exclude, walk)?;
        }

        Ok(())
    }

    fn dependency_status(&self, dep: &Dependency, full_path: &Path) -> Result<Option<Problem>> {
        if !full_path.exists() {
            return Ok(None);
        }

        let repo = Repository::open(full_path)?;

        let status = repo.status(self.runner)?;
        if !status.is_empty() {
            return Ok(Some(Problem::Dirty { output: status }));
        }

        let current = repo.current_version(self.runner)?;
        if current == dep.version {
            return Ok(None);
        }

        Ok(Some(Problem::VersionMismatch {
            delta: self.delta(&repo, &dep.version, &current),
            expected: dep.version.clone(),
            current,
        }))
    }

    /// Measure how far `current` has drifted from `expected`.
    ///
    /// A failing log command only means that direction is not measurable.
    fn delta(&self, repo: &Repository, expected: &str, current: &str) -> VersionDelta {
        if let Some(log) = self.commits_between(repo, expected, current) {
            return VersionDelta::Ahead {
                commits: log.lines().count(),
                log,
            };
        }

        if let Some(log) = self.commits_between(repo, current, expected) {
            return VersionDelta::Behind {
                commits: log.lines().count(),
                log,
            };
        }

        VersionDelta::Unknown
    }

    fn commits_between(&self, repo: &Repository, from: &str, to: &str) -> Option<String> {
        match repo.log(self.runner, from, to) {
            Ok(log) if !log.trim().is_empty() => Some(log),
            Ok(_) => None,
            Err(e) => {
                tracing::debug!(path = %repo.path.display(), %from, %to, error = %e, "log unavailable");
                None
            }
        }
    }
}
