//! End-to-end CLI tests for the studyshelf binary.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Builds a command isolated from any real user config, pointed at a
/// temp database.
fn cmd(temp: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("studyshelf").unwrap();
    cmd.env_remove("STUDYSHELF_CONFIG")
        .env("XDG_CONFIG_HOME", temp.path())
        .arg("--db")
        .arg(temp.path().join("test.db"));
    cmd
}

/// Test that --help displays usage information and exits with code 0.
#[test]
fn test_binary_help_displays_usage() {
    let mut cmd = Command::cargo_bin("studyshelf").unwrap();
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("student resource catalog"));
}

/// Test that --version displays version and exits with code 0.
#[test]
fn test_binary_version_displays_version() {
    let mut cmd = Command::cargo_bin("studyshelf").unwrap();
    cmd.arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("studyshelf"));
}

/// Test that invalid subcommands cause non-zero exit.
#[test]
fn test_binary_invalid_subcommand_returns_error() {
    let mut cmd = Command::cargo_bin("studyshelf").unwrap();
    cmd.arg("frobnicate")
        .assert()
        .failure()
        .stderr(predicate::str::contains("error"));
}

/// Fresh database: semesters prints the empty-state line.
#[test]
fn test_semesters_on_fresh_database() {
    let temp = TempDir::new().unwrap();
    cmd(&temp)
        .arg("semesters")
        .assert()
        .success()
        .stdout(predicate::str::contains("No semesters"));
}

/// grant-admin succeeds without any storage configuration.
#[test]
fn test_grant_admin_roundtrip() {
    let temp = TempDir::new().unwrap();
    cmd(&temp)
        .args(["grant-admin", "alice"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Granted admin to alice"));
}

/// Admin mutations fail cleanly when no session user is provided.
#[test]
fn test_delete_without_user_is_refused() {
    let temp = TempDir::new().unwrap();
    cmd(&temp)
        .args(["delete", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not signed in"));
}

/// Mutations by a user without the admin role are refused.
#[test]
fn test_add_by_non_admin_is_refused() {
    let temp = TempDir::new().unwrap();
    cmd(&temp)
        .args([
            "add",
            "1",
            "--title",
            "Notes",
            "--url",
            "https://example.com/n.pdf",
            "--type",
            "notes",
            "--user",
            "mallory",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("does not have the admin role"));
}

/// File uploads require a configured storage endpoint.
#[test]
fn test_upload_without_storage_config_is_refused() {
    let temp = TempDir::new().unwrap();
    cmd(&temp)
        .args(["upload", "1", "--type", "see", "--user", "alice", "a.pdf"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No storage endpoint configured"));
}

/// Preview classification needs no database or config.
#[test]
fn test_preview_classifies_drive_url() {
    let temp = TempDir::new().unwrap();
    let mut cmd = Command::cargo_bin("studyshelf").unwrap();
    cmd.env_remove("STUDYSHELF_CONFIG")
        .env("XDG_CONFIG_HOME", temp.path())
        .args([
            "preview",
            "https://drive.google.com/file/d/ABC123/view?usp=sharing",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "https://drive.google.com/file/d/ABC123/preview",
        ))
        .stdout(predicate::str::contains(
            "uc?export=download&id=ABC123",
        ));
}

/// Unknown URLs are download-only, never an error.
#[test]
fn test_preview_unknown_url_is_download_only() {
    let temp = TempDir::new().unwrap();
    let mut cmd = Command::cargo_bin("studyshelf").unwrap();
    cmd.env_remove("STUDYSHELF_CONFIG")
        .env("XDG_CONFIG_HOME", temp.path())
        .args(["preview", "https://example.com/archive.zip"])
        .assert()
        .success()
        .stdout(predicate::str::contains("download only"));
}
