//! Dependency fetching
//!
//! This module handles:
//! - Acquiring or refreshing a dependency's source tree
//! - Pinning the working copy to the requested reference
//! - Resolving the "hard" version (e.g. a commit hash) actually checked out
//! - Recording the result, failing on conflicts with earlier resolutions
//!
//! Bleeding-edge dependencies that already have a working copy are never
//! pinned, and are only pulled forward when they have no local changes.

pub mod registry;
pub mod source;

use crate::dependency::Dependency;
use crate::error::Result;
use crate::repository::Repository;
use crate::runner::CommandRunner;
use crate::workspace::Workspace;

pub use registry::FetchedRegistry;
pub use source::SourceFetcher;

/// How a single fetch treats the working copy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct FetchPlan {
    /// Force the working copy onto the requested version
    lock_down: bool,
    /// Pull the latest remote state while fetching sources
    update_remote: bool,
}

pub struct Fetcher<'a> {
    runner: &'a dyn CommandRunner,
    workspace: &'a Workspace,
    source: &'a SourceFetcher,
}

impl<'a> Fetcher<'a> {
    pub fn new(
        runner: &'a dyn CommandRunner,
        workspace: &'a Workspace,
        source: &'a SourceFetcher,
    ) -> Self {
        Self {
            runner,
            workspace,
            source,
        }
    }

    /// Fetch `dep`, pin it, and record its resolved version in `registry`.
    ///
    /// Returns `dep` with its version replaced by the resolved version.
    pub fn fetch(&self, dep: &Dependency, registry: &mut FetchedRegistry) -> Result<Dependency> {
        let repo_path = self.workspace.dependency_path(dep);
        let plan = self.plan(dep)?;

        tracing::debug!(
            path = %dep.path,
            lock_down = plan.lock_down,
            update_remote = plan.update_remote,
            "fetching"
        );

        self.source
            .fetch(self.runner, self.workspace, &dep.path, plan.update_remote)?;

        let repo = Repository::open(&repo_path)?;

        if plan.lock_down {
            self.sync(&repo, &dep.version)?;
        }

        let resolved = Dependency {
            version: repo.current_version(self.runner)?,
            ..dep.clone()
        };

        registry.record(&resolved)?;

        Ok(resolved)
    }

    fn plan(&self, dep: &Dependency) -> Result<FetchPlan> {
        if !dep.bleeding_edge {
            return Ok(FetchPlan {
                lock_down: true,
                update_remote: false,
            });
        }

        let repo_path = self.workspace.dependency_path(dep);
        if !repo_path.exists() {
            // a locked version still pins a fresh checkout
            return Ok(FetchPlan {
                lock_down: !dep.version.is_empty(),
                update_remote: true,
            });
        }

        let status = Repository::open(&repo_path)?.status(self.runner)?;
        if !status.is_empty() {
            tracing::warn!(path = %dep.path, "bleeding-edge dependency has local changes, not updating");
        }

        Ok(FetchPlan {
            lock_down: false,
            update_remote: status.is_empty(),
        })
    }

    fn sync(&self, repo: &Repository, version: &str) -> Result<()> {
        let current = repo.current_version(self.runner)?;

        if current == version {
            tracing::debug!(path = %repo.path.display(), %version, "already pinned");
            return Ok(());
        }

        repo.update(self.runner)?;
        repo.checkout(self.runner, version)
    }
}
