//! The external source-fetch step
//!
//! Places or refreshes the raw source tree of an import path under the
//! workspace with `go get -d`, without touching which revision is checked
//! out afterwards.

use crate::error::Result;
use crate::runner::{CommandRunner, CommandSpec};
use crate::workspace::Workspace;

/// Default program used to fetch sources
pub const DEFAULT_GO_PROGRAM: &str = "go";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFetcher {
    program: String,
}

impl Default for SourceFetcher {
    fn default() -> Self {
        Self::new(DEFAULT_GO_PROGRAM)
    }
}

impl SourceFetcher {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Fetch `import_path` into `workspace`, pulling the latest remote state
    /// as well when `update_remote` is set.
    pub fn fetch(
        &self,
        runner: &dyn CommandRunner,
        workspace: &Workspace,
        import_path: &str,
        update_remote: bool,
    ) -> Result<()> {
        runner.run(&self.command(workspace, import_path, update_remote))?;
        Ok(())
    }

    fn command(&self, workspace: &Workspace, import_path: &str, update_remote: bool) -> CommandSpec {
        let mut args = vec!["get"];
        if update_remote {
            args.push("-u");
        }
        args.extend(["-d", "-v", import_path]);

        CommandSpec::new(&self.program, args)
            .with_env("GOPATH", workspace.root().display().to_string())
    }
}
