//! End-to-end exit-code contract, with a stub terraform binary standing in
//! for the real one. The picker needs a TTY, so these tests only cover the
//! paths that abort before selection.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

#[cfg(unix)]
fn stub_terraform(dir: &TempDir, script_body: &str) -> std::path::PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let path = dir.path().join("terraform-stub");
    std::fs::write(&path, format!("#!/bin/sh\n{script_body}\n")).unwrap();
    let mut permissions = std::fs::metadata(&path).unwrap().permissions();
    permissions.set_mode(0o755);
    std::fs::set_permissions(&path, permissions).unwrap();
    path
}

fn tfprune() -> Command {
    Command::cargo_bin("tfprune").unwrap()
}

#[test]
fn state_list_failure_exits_one_before_any_scan() {
    let dir = TempDir::new().unwrap();
    // A scan of this file would fail loudly; the state listing must abort
    // the run first.
    std::fs::write(dir.path().join("broken.tf"), "resource \"only_type\" {\n").unwrap();

    tfprune()
        .arg("--chdir")
        .arg(dir.path())
        .arg("--terraform-bin=/nonexistent/terraform-binary")
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::contains("No terraform state found"));
}

#[cfg(unix)]
#[test]
fn empty_state_yields_no_candidates_and_exits_one() {
    let dir = TempDir::new().unwrap();
    let stub = stub_terraform(&dir, "exit 0");
    std::fs::write(
        dir.path().join("main.tf"),
        "resource \"aws_instance\" \"web\" {\n}\n",
    )
    .unwrap();

    tfprune()
        .arg("--chdir")
        .arg(dir.path())
        .arg("--terraform-bin")
        .arg(&stub)
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::contains(
            "No resources available for removal were found",
        ));
}

#[cfg(unix)]
#[test]
fn tracked_but_undeclared_resources_are_not_candidates() {
    let dir = TempDir::new().unwrap();
    let stub = stub_terraform(&dir, "printf 'aws_instance.other\\n'");
    std::fs::write(
        dir.path().join("main.tf"),
        "resource \"aws_instance\" \"web\" {\n}\n",
    )
    .unwrap();

    tfprune()
        .arg("--chdir")
        .arg(dir.path())
        .arg("--terraform-bin")
        .arg(&stub)
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::contains(
            "No resources available for removal were found",
        ));
}

#[cfg(unix)]
#[test]
fn scan_failure_is_reported_distinctly_from_zero_candidates() {
    let dir = TempDir::new().unwrap();
    let stub = stub_terraform(&dir, "printf 'aws_instance.web\\n'");
    std::fs::write(dir.path().join("broken.tf"), "resource \"only_type\" {\n}\n").unwrap();

    tfprune()
        .arg("--chdir")
        .arg(dir.path())
        .arg("--terraform-bin")
        .arg(&stub)
        .assert()
        .failure()
        .stdout(predicate::str::contains("No resources available").not())
        .stderr(predicate::str::contains("broken.tf"));
}
