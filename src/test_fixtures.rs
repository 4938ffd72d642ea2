//! Test fixtures and utilities for reducing test setup duplication.
//!
//! This module provides helper functions to create common test environments
//! (temp directories, fake working copies, manifests) with a single call.
//!
//! # Usage
//!
//! ```ignore
//! use crate::test_fixtures::{create_temp_dir, create_working_copy, write_manifest};
//!
//! #[test]
//! fn my_test() {
//!     let gopath = create_temp_dir();
//!     let repo = create_working_copy(gopath.path(), "example.com/dep", VcsKind::Git);
//!     write_manifest(&repo, "example.com/nested v1\n");
//! }
//! ```

#![allow(clippy::expect_used)]

use std::path::{Path, PathBuf};

use tempfile::TempDir;

use crate::config::{LOCK_FILE, MANIFEST_FILE};
use crate::repository::VcsKind;
use crate::runner::fake::FakeRunner;
use crate::runner::CommandOutput;

/// Absolute base for temp directories.
///
/// A relative `TMPDIR` would place fixtures under the current working
/// directory, which is itself inside this crate's git checkout and would
/// change what repository detection sees.
fn temp_dir_base() -> PathBuf {
    let t = std::env::temp_dir();
    if t.is_absolute() {
        t
    } else {
        PathBuf::from("/tmp")
    }
}

/// Create a temp directory in the system temp location.
///
/// # Panics
///
/// Panics if the temp directory cannot be created.
#[must_use]
pub fn create_temp_dir() -> TempDir {
    TempDir::new_in(temp_dir_base()).expect("Failed to create temp directory")
}

/// Create a nested directory structure inside a temp directory.
///
/// # Panics
///
/// Panics if the directory cannot be created.
#[must_use]
pub fn create_nested_dir(temp: &TempDir, path: &str) -> PathBuf {
    let nested = temp.path().join(path);
    std::fs::create_dir_all(&nested).expect("Failed to create nested directory");
    nested
}

/// Create the metadata directory that marks `dir` as a working copy of `kind`.
///
/// # Panics
///
/// Panics if the directory cannot be created.
pub fn create_vcs_marker(dir: &Path, kind: VcsKind) {
    std::fs::create_dir_all(dir.join(kind.marker())).expect("Failed to create VCS marker");
}

/// Create `<gopath>/src/<import_path>` as a working copy of `kind`.
///
/// # Panics
///
/// Panics if any directory cannot be created.
#[must_use]
pub fn create_working_copy(gopath: &Path, import_path: &str, kind: VcsKind) -> PathBuf {
    let repo = gopath.join("src").join(import_path);
    std::fs::create_dir_all(&repo).expect("Failed to create working copy");
    create_vcs_marker(&repo, kind);
    repo
}

/// Write a Cartridge manifest into `dir`.
///
/// # Panics
///
/// Panics if the file cannot be written.
pub fn write_manifest(dir: &Path, content: &str) {
    std::fs::create_dir_all(dir).expect("Failed to create manifest directory");
    std::fs::write(dir.join(MANIFEST_FILE), content).expect("Failed to write manifest");
}

/// Write a Cartridge.lock into `dir`.
///
/// # Panics
///
/// Panics if the file cannot be written.
pub fn write_lock(dir: &Path, content: &str) {
    std::fs::create_dir_all(dir).expect("Failed to create lock directory");
    std::fs::write(dir.join(LOCK_FILE), content).expect("Failed to write lock");
}

/// Make `go get` (with or without `-u`) of `import_path` create a working
/// copy of `kind` under `gopath`, the way the real tool would.
pub fn serve_sources(runner: &FakeRunner, gopath: &Path, import_path: &str, kind: VcsKind) {
    for args in [
        vec!["get", "-d", "-v", import_path],
        vec!["get", "-u", "-d", "-v", import_path],
    ] {
        let gopath = gopath.to_path_buf();
        let import_path = import_path.to_string();
        runner.when_running("go", &args, move |_| {
            let _ = create_working_copy(&gopath, &import_path, kind);
            Ok(CommandOutput::default())
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_temp_dir() {
        let temp = create_temp_dir();
        assert!(temp.path().exists());
    }

    #[test]
    fn test_create_working_copy() {
        let temp = create_temp_dir();
        let repo = create_working_copy(temp.path(), "example.com/dep", VcsKind::Mercurial);

        assert_eq!(repo, temp.path().join("src/example.com/dep"));
        assert!(repo.join(".hg").is_dir());
    }

    #[test]
    fn test_write_manifest_and_lock() {
        let temp = create_temp_dir();
        write_manifest(temp.path(), "a v1\n");
        write_lock(temp.path(), "a\tabc\n");

        assert!(temp.path().join(MANIFEST_FILE).exists());
        assert!(temp.path().join(LOCK_FILE).exists());
    }
}
