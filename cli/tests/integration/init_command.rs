//! Integration tests for `rolesync init`.

#![allow(clippy::expect_used)]

use predicates::prelude::*;
use tempfile::TempDir;

use crate::fixtures::{read, rolesync_in, write};

#[test]
fn test_init_creates_project_layout() {
    let dir = TempDir::new().expect("tempdir");
    rolesync_in(&dir)
        .arg("init")
        .assert()
        .success()
        .stderr(predicate::str::contains("Project initialized"));

    for d in ["data", "logs", "config", "bot"] {
        assert!(dir.path().join(d).is_dir(), "{d}/ should exist");
    }
    assert_eq!(
        read(&dir, ".env").as_deref(),
        Some("DISCORD_BOT_TOKEN=your_token_here\n")
    );
    let mappings = read(&dir, "config/role_mappings.json").expect("mappings written");
    let v: serde_json::Value = serde_json::from_str(&mappings).expect("valid JSON");
    assert_eq!(v["mappings"][0]["enabled"], false);
}

#[test]
fn test_init_second_run_reports_already_initialized() {
    let dir = TempDir::new().expect("tempdir");
    rolesync_in(&dir).arg("init").assert().success();
    rolesync_in(&dir)
        .arg("init")
        .assert()
        .success()
        .stderr(predicate::str::contains("already initialized"));
}

#[test]
fn test_init_force_with_yes_overwrites() {
    let dir = TempDir::new().expect("tempdir");
    write(dir.path(), ".env", "DISCORD_BOT_TOKEN=real\n");
    rolesync_in(&dir)
        .args(["init", "--force", "--yes"])
        .assert()
        .success();
    assert_eq!(
        read(&dir, ".env").as_deref(),
        Some("DISCORD_BOT_TOKEN=your_token_here\n")
    );
}

#[test]
fn test_init_without_force_keeps_existing_env() {
    let dir = TempDir::new().expect("tempdir");
    write(dir.path(), ".env", "DISCORD_BOT_TOKEN=real\n");
    rolesync_in(&dir).arg("init").assert().success();
    assert_eq!(read(&dir, ".env").as_deref(), Some("DISCORD_BOT_TOKEN=real\n"));
}

#[test]
fn test_init_json_lists_created_paths() {
    let dir = TempDir::new().expect("tempdir");
    let output = rolesync_in(&dir)
        .args(["init", "--json"])
        .output()
        .expect("run");
    assert!(output.status.success());
    let v: serde_json::Value = serde_json::from_slice(&output.stdout).expect("valid JSON");
    let created = v["created"].as_array().expect("created array");
    assert!(created.iter().any(|p| p == ".env"));
}
