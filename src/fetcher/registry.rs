//! Registry of dependencies resolved during one install run
//!
//! The registry is the single source of truth for "which concrete version of
//! this import path is checked out right now". Any second resolution of the
//! same path must agree with the first, otherwise the run is aborted.

use std::collections::HashMap;

use crate::config::DependencySet;
use crate::dependency::Dependency;
use crate::error::{CartageError, Result};

#[derive(Debug, Default)]
pub struct FetchedRegistry {
    entries: HashMap<String, Dependency>,
    /// Paths in the order they were first resolved
    order: Vec<String>,
}

impl FetchedRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a resolved dependency.
    ///
    /// Fails with [`CartageError::VersionConflict`] if the same path was
    /// already resolved to a different version.
    pub fn record(&mut self, resolved: &Dependency) -> Result<()> {
        if let Some(existing) = self.entries.get(&resolved.path) {
            if existing.version != resolved.version {
                return Err(CartageError::VersionConflict {
                    path: resolved.path.clone(),
                    version_a: existing.version.clone(),
                    version_b: resolved.version.clone(),
                });
            }
        } else {
            self.order.push(resolved.path.clone());
        }

        self.entries
            .insert(resolved.path.clone(), resolved.clone());
        Ok(())
    }

    #[allow(dead_code)] // used in tests
    pub fn get(&self, path: &str) -> Option<&Dependency> {
        self.entries.get(path)
    }

    /// Everything resolved so far, in first-resolution order
    pub fn resolved(&self) -> DependencySet {
        self.order
            .iter()
            .filter_map(|path| self.entries.get(path))
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    #[allow(dead_code)] // used in tests
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}
