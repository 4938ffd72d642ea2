//! CLI integration tests using the REAL cartage binary

mod common;

use common::TestProject;
use predicates::prelude::*;

#[test]
fn test_help_output() {
    common::cartage_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Cartridge.lock"))
        .stdout(predicate::str::contains("install"))
        .stdout(predicate::str::contains("check"));
}

#[test]
fn test_version_output() {
    common::cartage_cmd()
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains(format!(
            "cartage {}",
            env!("CARGO_PKG_VERSION")
        )))
        .stdout(predicate::str::contains("Build info"));
}

#[test]
fn test_unknown_command_fails() {
    common::cartage_cmd()
        .arg("frobnicate")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unrecognized subcommand"));
}

#[test]
fn test_completions_bash() {
    common::cartage_cmd()
        .args(["completions", "--shell", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("cartage"));
}

#[test]
fn test_completions_unknown_shell() {
    common::cartage_cmd()
        .args(["completions", "--shell", "tcsh"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown shell: tcsh"));
}

#[test]
fn test_install_without_manifest_fails() {
    let project = TestProject::new();

    project
        .cartage()
        .arg("install")
        .assert()
        .failure()
        .stderr(predicate::str::contains("no manifest file present"));

    assert!(!project.file_exists("Cartridge.lock"));
}

#[test]
fn test_default_command_is_install() {
    let project = TestProject::new();

    project
        .cartage()
        .assert()
        .failure()
        .stderr(predicate::str::contains("no manifest file present"));
}

#[test]
fn test_install_requires_gopath() {
    let project = TestProject::new();
    project.write_file("Cartridge", "");

    project
        .cartage()
        .env_remove("GOPATH")
        .arg("install")
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "The GOPATH environment variable needs to be set.",
        ));
}

#[test]
fn test_install_empty_manifest_writes_empty_lock() {
    let project = TestProject::new();
    project.write_file("Cartridge", "# nothing yet\n\n");

    project
        .cartage()
        .arg("install")
        .assert()
        .success()
        .stdout(predicate::str::contains("OK"));

    assert_eq!(project.read_file("Cartridge.lock"), "");
}

#[test]
fn test_install_reports_missing_version() {
    let project = TestProject::new();
    project.write_file("Cartridge", "example.com/p\n");

    project
        .cartage()
        .arg("install")
        .assert()
        .failure()
        .stderr(predicate::str::contains("missing version for 'example.com/p'"));

    assert!(!project.file_exists("Cartridge.lock"));
}

#[test]
fn test_install_reports_overlapping_paths() {
    let project = TestProject::new();
    project.write_file("Cartridge", "example.com/a v1\nexample.com/a/sub v2\n");

    project
        .cartage()
        .arg("install")
        .assert()
        .failure()
        .stderr(predicate::str::contains("duplicate dependencies"));
}

#[test]
fn test_install_with_dir_flag() {
    let project = TestProject::new();
    project.write_file("nested/Cartridge", "");

    project
        .cartage()
        .args(["--dir", "nested", "install"])
        .assert()
        .success();

    assert!(project.file_exists("nested/Cartridge.lock"));
    assert!(!project.file_exists("Cartridge.lock"));
}

#[test]
fn test_check_with_absent_dependencies_is_ok() {
    let project = TestProject::new();
    project.write_file("Cartridge", "example.com/never-fetched v1\n");

    project
        .cartage()
        .arg("check")
        .assert()
        .success()
        .stdout(predicate::str::contains("OK"));
}

#[test]
fn test_check_unknown_repository_type_fails() {
    let project = TestProject::new();
    project.write_file("Cartridge", "example.com/plain v1\n");
    std::fs::create_dir_all(project.dependency_dir("example.com/plain")).expect("mkdir");

    project
        .cartage()
        .arg("check")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown repository type"));
}

#[test]
fn test_source_fetch_failure_fails_install() {
    let project = TestProject::new();
    project.write_file("Cartridge", "example.com/p v1\n");

    project
        .cartage()
        .args(["--go", "cartage-no-such-program", "install"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cartage-no-such-program get -d -v example.com/p"));

    assert!(!project.file_exists("Cartridge.lock"));
}
