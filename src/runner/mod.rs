//! External command execution
//!
//! Every interaction with a version control tool or the source-fetch tool
//! goes through a [`CommandRunner`], so the fetch and check engines can be
//! exercised against a scripted runner in tests.

#[cfg(test)]
pub mod fake;

use std::fmt;
use std::path::PathBuf;
use std::process::Command;

use crate::error::{CartageError, Result};

/// A single program invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    /// Program name, resolved through `PATH`
    pub program: String,

    /// Arguments, not including the program name
    pub args: Vec<String>,

    /// Working directory (inherits the current one when `None`)
    pub dir: Option<PathBuf>,

    /// Extra environment variables, merged with the process environment
    pub env: Vec<(String, String)>,
}

impl CommandSpec {
    pub fn new<I, S>(program: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
            dir: None,
            env: Vec::new(),
        }
    }

    #[must_use]
    pub fn in_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.dir = Some(dir.into());
        self
    }

    #[must_use]
    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.push((key.into(), value.into()));
        self
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

/// Captured output of a successful invocation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// Standard output alone, for parsing versions
    pub stdout: String,

    /// Standard output followed by standard error, for status and log text
    pub combined: String,
}

impl CommandOutput {
    pub fn new(stdout: impl Into<String>, stderr: impl AsRef<str>) -> Self {
        let stdout = stdout.into();
        let combined = format!("{stdout}{}", stderr.as_ref());
        Self { stdout, combined }
    }
}

/// Runs commands to completion
pub trait CommandRunner {
    /// Run `spec`, failing with [`CartageError::CommandFailed`] on a spawn
    /// error or a non-zero exit status.
    fn run(&self, spec: &CommandSpec) -> Result<CommandOutput>;
}

/// Runs commands as real child processes
#[derive(Debug, Default, Clone, Copy)]
pub struct ShellRunner;

impl ShellRunner {
    pub fn new() -> Self {
        Self
    }
}

impl CommandRunner for ShellRunner {
    fn run(&self, spec: &CommandSpec) -> Result<CommandOutput> {
        tracing::debug!(command = %spec, dir = ?spec.dir, "running");

        let mut cmd = Command::new(&spec.program);
        cmd.args(&spec.args);

        if let Some(dir) = &spec.dir {
            cmd.current_dir(dir);
        }

        for (key, value) in &spec.env {
            cmd.env(key, value);
        }

        let output = cmd.output().map_err(|e| CartageError::CommandFailed {
            command: spec.to_string(),
            reason: e.to_string(),
            output: String::new(),
        })?;

        let captured = CommandOutput::new(
            String::from_utf8_lossy(&output.stdout).to_string(),
            String::from_utf8_lossy(&output.stderr),
        );

        if !output.status.success() {
            return Err(CartageError::CommandFailed {
                command: spec.to_string(),
                reason: output.status.to_string(),
                output: captured.combined,
            });
        }

        Ok(captured)
    }
}
