//! Command helper utilities

use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::fetcher::SourceFetcher;
use crate::workspace::Workspace;

/// What `install` and `check` need from the global flags
#[derive(Debug, Clone)]
pub struct Settings {
    /// Where dependencies are checked out
    pub workspace: Workspace,

    /// Directory holding the top-level Cartridge
    pub dir: PathBuf,

    pub source: SourceFetcher,
}

impl Settings {
    /// Resolve the global flags.
    ///
    /// Fails with `WorkspaceRootNotSet` when no workspace root was given.
    pub fn resolve(gopath: Option<&str>, dir: &Path, go: &str) -> Result<Self> {
        Ok(Self {
            workspace: Workspace::from_gopath(gopath)?,
            dir: dir.to_path_buf(),
            source: SourceFetcher::new(go),
        })
    }
}
