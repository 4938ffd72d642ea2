//! Error types and handling for Cartage
//!
//! Uses `thiserror` for error definitions and `miette` for pretty diagnostics.
//!
//! Errors fall into a few families:
//! - manifest parsing (missing version, overlapping paths)
//! - repository detection
//! - subprocess failures
//! - version conflicts between two fetches of the same path
//! - file system access

use miette::Diagnostic;
use thiserror::Error;

use crate::dependency::Dependency;

/// Main error type for Cartage operations
#[derive(Error, Diagnostic, Debug)]
pub enum CartageError {
    // Manifest errors
    #[error("missing version for '{path}'")]
    #[diagnostic(
        code(cartage::manifest::missing_version),
        help("Add a version after the path, or '*' to track the latest remote state")
    )]
    MissingVersion { path: String },

    #[error("duplicate dependencies: '{original}' and '{duplicate}'")]
    #[diagnostic(
        code(cartage::manifest::duplicate),
        help("Two entries may not claim the same path or one nested inside the other")
    )]
    DuplicateDependency {
        original: Dependency,
        duplicate: Dependency,
    },

    #[error("invalid import path '{path}'")]
    #[diagnostic(
        code(cartage::manifest::invalid_path),
        help("Import paths are relative to the workspace src directory and may not contain '..'")
    )]
    InvalidImportPath { path: String },

    #[error("no manifest file present at {path}")]
    #[diagnostic(
        code(cartage::manifest::not_found),
        help("Create a Cartridge file listing '<import path> <version>' per line")
    )]
    ManifestNotFound { path: String },

    // Repository errors
    #[error("unknown repository type at {path}")]
    #[diagnostic(
        code(cartage::repository::unknown_type),
        help("Supported version control systems: git, hg, bzr")
    )]
    UnknownRepositoryType { path: String },

    #[error("command '{command}' failed with {reason}:\n{output}")]
    #[diagnostic(code(cartage::command::failed))]
    CommandFailed {
        command: String,
        reason: String,
        output: String,
    },

    // Install errors
    #[error("version conflict for {path}: {version_a} and {version_b}")]
    #[diagnostic(
        code(cartage::install::version_conflict),
        help("Pin the dependency to one version in every manifest that requires it")
    )]
    VersionConflict {
        path: String,
        version_a: String,
        version_b: String,
    },

    // Check errors
    #[error("{count} dependencies are dirty or out of sync")]
    #[diagnostic(code(cartage::check::dirty))]
    DirtyDependencies { count: usize },

    // Configuration errors
    #[error("The GOPATH environment variable needs to be set.")]
    #[diagnostic(
        code(cartage::config::workspace_root_not_set),
        help("Set GOPATH or pass --gopath")
    )]
    WorkspaceRootNotSet,

    #[error("Unknown shell: {shell}")]
    #[diagnostic(
        code(cartage::cli::unsupported_shell),
        help("Supported shells: bash, elvish, fish, powershell, zsh")
    )]
    UnsupportedShell { shell: String },

    // File system errors
    #[error("Failed to read file: {path}")]
    #[diagnostic(code(cartage::fs::read_failed))]
    FileReadFailed { path: String, reason: String },

    #[error("Failed to write file: {path}")]
    #[diagnostic(code(cartage::fs::write_failed))]
    FileWriteFailed { path: String, reason: String },

    #[error("IO error: {message}")]
    #[diagnostic(code(cartage::fs::io_error))]
    IoError { message: String },
}

impl From<std::io::Error> for CartageError {
    fn from(err: std::io::Error) -> Self {
        CartageError::IoError {
            message: err.to_string(),
        }
    }
}

/// Result type alias using miette for error handling
pub type Result<T> = miette::Result<T, CartageError>;
