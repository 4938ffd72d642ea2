//! Common test utilities for Cartage integration tests

#![allow(dead_code)]

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use tempfile::TempDir;

/// A workspace root plus a project directory holding the top-level Cartridge
pub struct TestProject {
    pub gopath: TempDir,
    pub project: TempDir,
}

impl TestProject {
    pub fn new() -> Self {
        Self {
            gopath: TempDir::new().expect("Failed to create gopath"),
            project: TempDir::new().expect("Failed to create project directory"),
        }
    }

    pub fn path(&self) -> &Path {
        self.project.path()
    }

    /// Write a file relative to the project directory
    pub fn write_file(&self, path: &str, content: &str) {
        write_file(&self.project.path().join(path), content);
    }

    pub fn read_file(&self, path: &str) -> String {
        std::fs::read_to_string(self.project.path().join(path)).expect("Failed to read file")
    }

    pub fn file_exists(&self, path: &str) -> bool {
        self.project.path().join(path).exists()
    }

    /// `<gopath>/src/<import_path>`
    pub fn dependency_dir(&self, import_path: &str) -> PathBuf {
        self.gopath.path().join("src").join(import_path)
    }

    /// The cartage binary, run in the project directory against this gopath
    pub fn cartage(&self) -> Command {
        let mut cmd = cartage_cmd();
        cmd.current_dir(self.project.path())
            .env("GOPATH", self.gopath.path())
            .env_remove("CARTAGE_GO")
            .env_remove("RUST_LOG");
        cmd
    }
}

impl Default for TestProject {
    fn default() -> Self {
        Self::new()
    }
}

// Temporary fix for deprecated cargo_bin - will be updated when build-dir issues are resolved
#[allow(deprecated)]
pub fn cartage_cmd() -> Command {
    Command::cargo_bin("cartage").expect("cartage binary")
}

pub fn write_file(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("Failed to create parent directory");
    }
    std::fs::write(path, content).expect("Failed to write file");
}

/// Whether a usable `git` is on `PATH`
pub fn git_available() -> bool {
    std::process::Command::new("git")
        .arg("--version")
        .output()
        .is_ok_and(|output| output.status.success())
}

/// Run git in `dir`, panicking on failure
pub fn git(dir: &Path, args: &[&str]) -> String {
    let output = std::process::Command::new("git")
        .args(args)
        .current_dir(dir)
        .output()
        .expect("Failed to run git");
    assert!(
        output.status.success(),
        "git {args:?} failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).trim().to_string()
}

/// Write a stand-in for `go get` that creates a one-commit git repository at
/// `$GOPATH/src/<import path>` (the last argument) when it does not exist yet.
#[cfg(unix)]
pub fn fake_go_program(dir: &Path) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let script = dir.join("fake-go");
    write_file(
        &script,
        r#"#!/bin/sh
set -e
for last; do :; done
repo="$GOPATH/src/$last"
if [ ! -d "$repo/.git" ]; then
  mkdir -p "$repo"
  cd "$repo"
  git init -q
  echo "package dep" > dep.go
  git add dep.go
  git -c user.name=cartage -c user.email=cartage@example.com commit -q -m initial
fi
"#,
    );
    let mut permissions = std::fs::metadata(&script)
        .expect("script metadata")
        .permissions();
    permissions.set_mode(0o755);
    std::fs::set_permissions(&script, permissions).expect("Failed to make script executable");
    script
}
