//! End-to-end checks of the binary for paths that fail before any network call.

use assert_cmd::Command;
use predicates::prelude::*;
use std::path::Path;

fn backup_cmd(cwd: &Path) -> Command {
    let mut cmd = Command::cargo_bin("firestore-backup").unwrap();
    cmd.current_dir(cwd)
        .env_remove("FIRESTORE_PROJECT_ID")
        .env_remove("RUST_LOG");
    cmd
}

fn json_files(dir: &Path) -> Vec<String> {
    std::fs::read_dir(dir)
        .unwrap()
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.file_name().to_string_lossy().into_owned())
        .filter(|name| name.ends_with(".json") && name != "key.json")
        .collect()
}

#[test]
fn test_missing_collections_is_usage_error() {
    let dir = tempfile::tempdir().unwrap();
    backup_cmd(dir.path())
        .args(["backup", "-p", "key.json"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("--collections"));
}

#[test]
fn test_missing_path_is_usage_error() {
    let dir = tempfile::tempdir().unwrap();
    backup_cmd(dir.path())
        .args(["backup", "-c", "users"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("--path"));
}

#[test]
fn test_empty_collection_name_is_usage_error() {
    let dir = tempfile::tempdir().unwrap();
    backup_cmd(dir.path())
        .args(["backup", "-c", "", "-p", "key.json"])
        .assert()
        .code(2)
        .stderr(predicate::str::starts_with("Error: Usage error"));
}

#[test]
fn test_missing_credential_file() {
    let dir = tempfile::tempdir().unwrap();
    backup_cmd(dir.path())
        .args(["backup", "-c", "users", "-p", "does-not-exist.json"])
        .assert()
        .code(3)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("credential file not found"));

    assert!(json_files(dir.path()).is_empty());
}

#[test]
fn test_malformed_credential_file() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("key.json"), "{ this is not json").unwrap();

    backup_cmd(dir.path())
        .args(["backup", "-c", "users,orders", "-p", "key.json"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("invalid credential file"));

    assert!(json_files(dir.path()).is_empty());
}

#[test]
fn test_unresolvable_project_is_auth_error() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("key.json"),
        r#"{"type": "service_account", "client_email": "a@b.iam.gserviceaccount.com"}"#,
    )
    .unwrap();

    backup_cmd(dir.path())
        .args(["backup", "-c", "users", "-p", "key.json"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("project id"));

    assert!(json_files(dir.path()).is_empty());
}

#[test]
fn test_missing_output_dir_is_usage_error() {
    let dir = tempfile::tempdir().unwrap();
    backup_cmd(dir.path())
        .args(["backup", "-c", "users", "-p", "key.json", "-o", "nowhere"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("output directory"));
}

#[test]
fn test_completion_script() {
    let dir = tempfile::tempdir().unwrap();
    backup_cmd(dir.path())
        .args(["completion", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("firestore-backup"));
}

#[test]
fn test_version_flag() {
    let dir = tempfile::tempdir().unwrap();
    backup_cmd(dir.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}
