//! Install engine
//!
//! This module handles:
//! - Fetching every dependency of a manifest, in manifest order
//! - Descending into nested manifests of fetched dependencies (recursive mode)
//! - Letting top-level resolutions override nested requests (trickle-down)
//! - Writing the lock manifest once the whole run has succeeded
//!
//! Every fetch in a run shares one [`FetchedRegistry`], so an import path
//! required at two different versions anywhere in the tree aborts the run
//! before any lock manifest is written.

use std::collections::{HashMap, HashSet};
use std::path::Path;

use crate::config::{self, DependencySet};
use crate::dependency::Dependency;
use crate::error::Result;
use crate::fetcher::{FetchedRegistry, Fetcher, SourceFetcher};
use crate::runner::CommandRunner;
use crate::ui::{ProgressReporter, display};
use crate::workspace::Workspace;

/// Options for one install run
#[derive(Debug, Clone, Default)]
pub struct InstallOptions {
    /// Install the dependencies of dependencies too
    pub recursive: bool,

    /// Lock every dependency resolved in the run, not just the top level
    pub aggregate: bool,

    /// Top-level dependencies override nested requests for the same path
    pub trickle_down: bool,

    /// Skip dependencies carrying any of these tags
    pub exclude: Vec<String>,
}

impl InstallOptions {
    /// Tags excluded below the top level
    fn nested_exclude(&self) -> Vec<String> {
        let mut tags = self.exclude.clone();
        tags.push(config::NESTED_EXCLUDED_TAG.to_string());
        tags
    }
}

pub struct Installer<'a> {
    fetcher: Fetcher<'a>,
    workspace: &'a Workspace,
    options: InstallOptions,
    registry: FetchedRegistry,
    /// Top-level dependencies, by path, handed down to nested manifests
    trickled: HashMap<String, Dependency>,
    /// Paths whose nested manifest has already been installed
    descended: HashSet<String>,
}

impl<'a> Installer<'a> {
    pub fn new(
        runner: &'a dyn CommandRunner,
        workspace: &'a Workspace,
        source: &'a SourceFetcher,
        options: InstallOptions,
    ) -> Self {
        Self {
            fetcher: Fetcher::new(runner, workspace, source),
            workspace,
            options,
            registry: FetchedRegistry::new(),
            trickled: HashMap::new(),
            descended: HashSet::new(),
        }
    }

    /// Install the manifest in `root` and write its lock manifest.
    ///
    /// Returns the dependencies written to the lock manifest. On any error
    /// the existing lock manifest is left untouched.
    pub fn install(
        &mut self,
        root: &Path,
        reporter: &mut dyn ProgressReporter,
    ) -> Result<DependencySet> {
        let requested = config::load(root)?.excluding(&self.options.exclude);
        if requested.is_empty() {
            tracing::info!(dir = %root.display(), "no dependencies to install");
        }

        if self.options.trickle_down {
            // later top-level entries may be requested by an earlier sibling's
            // nested manifest before they are fetched
            for dep in requested.iter() {
                self.trickled.insert(dep.path.clone(), dep.clone());
            }
        }

        let top_level = match self.install_set(&requested, 0, reporter) {
            Ok(set) => set,
            Err(e) => {
                reporter.abandon();
                return Err(e);
            }
        };

        let lock = if self.options.aggregate {
            self.registry.resolved()
        } else {
            top_level
        };

        config::save_lock(root, &lock)?;
        Ok(lock)
    }

    /// Dependencies resolved so far in this run
    pub fn registry(&self) -> &FetchedRegistry {
        &self.registry
    }

    fn install_set(
        &mut self,
        set: &DependencySet,
        depth: usize,
        reporter: &mut dyn ProgressReporter,
    ) -> Result<DependencySet> {
        let width = display::path_width(set.iter());
        let mut resolved = Vec::with_capacity(set.len());

        for requested in set.iter() {
            let dep = self.trickle(requested, depth);

            reporter.start_dependency(depth, &dep, width);
            let fetched = self.fetcher.fetch(&dep, &mut self.registry)?;
            reporter.finish_dependency(&fetched);

            if depth == 0 && self.options.trickle_down {
                self.trickled.insert(fetched.path.clone(), fetched.clone());
            }

            if self.options.recursive {
                self.descend(&fetched, depth, reporter)?;
            }

            resolved.push(fetched);
        }

        Ok(DependencySet::new(resolved))
    }

    fn trickle(&self, requested: &Dependency, depth: usize) -> Dependency {
        if depth == 0 || !self.options.trickle_down {
            return requested.clone();
        }

        match self.trickled.get(&requested.path) {
            Some(top_level) => {
                tracing::debug!(
                    path = %requested.path,
                    requested = %requested.version,
                    using = %top_level.version,
                    "trickling down top-level version"
                );
                top_level.clone()
            }
            None => requested.clone(),
        }
    }

    fn descend(
        &mut self,
        dep: &Dependency,
        depth: usize,
        reporter: &mut dyn ProgressReporter,
    ) -> Result<()> {
        if !self.descended.insert(dep.path.clone()) {
            tracing::debug!(path = %dep.path, "nested manifest already installed");
            return Ok(());
        }

        let dir = self.workspace.dependency_path(dep);
        let Some(nested) = config::load_if_present(&dir)? else {
            return Ok(());
        };

        tracing::info!(path = %dep.path, depth = depth + 1, "installing nested dependencies");
        reporter.enter_nested(depth, &dep.path);

        let nested = nested.excluding(&self.options.nested_exclude());
        self.install_set(&nested, depth + 1, reporter)?;
        Ok(())
    }
}
