//! Workspace root resolution
//!
//! Dependencies are checked out under a single workspace root (the first
//! entry of `GOPATH`), at `<root>/src/<import path>`.
//!
//! ## Workspace Structure
//!
//! ```text
//! $GOPATH/
//! └── src/
//!     ├── example.com/org/project/   # one working copy per dependency
//!     └── bitbucket.org/x/y/
//! ```

use std::path::{Path, PathBuf};

use crate::dependency::Dependency;
use crate::error::{CartageError, Result};

/// The directory every dependency is installed under
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Workspace {
    pub root: PathBuf,
}

impl Workspace {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Resolve the workspace from a `GOPATH`-style list.
    ///
    /// The first entry of the list is used. An unset or empty list is an
    /// error, and a relative entry is made absolute against the current
    /// directory.
    pub fn from_gopath(gopath: Option<&str>) -> Result<Self> {
        let first = gopath
            .filter(|value| !value.trim().is_empty())
            .and_then(|value| std::env::split_paths(value).next())
            .filter(|path| !path.as_os_str().is_empty())
            .ok_or(CartageError::WorkspaceRootNotSet)?;

        Ok(Self::new(std::path::absolute(first)?))
    }

    /// Working copy location of `dep`
    pub fn dependency_path(&self, dep: &Dependency) -> PathBuf {
        dep.full_path(&self.root)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}
