//! Unit tests for the project scaffolding service.

#![allow(clippy::expect_used)]

use rolesync_cli::application::services::scaffold::scaffold;
use rolesync_cli::domain::LauncherConfig;
use rolesync_cli::domain::project::inspect_mappings;

use crate::helpers::{empty_project, write};
use crate::mocks::{FixedConfirm, RecordingReporter};

fn read(dir: &tempfile::TempDir, rel: &str) -> String {
    std::fs::read_to_string(dir.path().join(rel)).expect("read scaffolded file")
}

#[test]
fn test_scaffold_fresh_project_creates_everything() {
    let (dir, fs) = empty_project();
    let reporter = RecordingReporter::default();

    let report = scaffold(&fs, &LauncherConfig::default(), false, &FixedConfirm::no(), &reporter)
        .expect("scaffold");

    for d in ["data", "logs", "config", "bot"] {
        assert!(dir.path().join(d).is_dir(), "{d}/ should exist");
    }
    assert!(report.created.contains(&".env".to_string()));
    assert!(report.created.contains(&"config/role_mappings.json".to_string()));
    assert!(report.skipped.is_empty());
    assert_eq!(read(&dir, ".env"), "DISCORD_BOT_TOKEN=your_token_here\n");
}

#[test]
fn test_scaffold_copies_env_template_when_present() {
    let (dir, fs) = empty_project();
    write(dir.path(), ".env.example", "DISCORD_BOT_TOKEN=your_token_here\nLOG_LEVEL=INFO\n");

    scaffold(
        &fs,
        &LauncherConfig::default(),
        false,
        &FixedConfirm::no(),
        &RecordingReporter::default(),
    )
    .expect("scaffold");

    assert_eq!(
        read(&dir, ".env"),
        "DISCORD_BOT_TOKEN=your_token_here\nLOG_LEVEL=INFO\n"
    );
}

#[test]
fn test_scaffold_mappings_file_is_valid_and_disabled() {
    let (dir, fs) = empty_project();
    scaffold(
        &fs,
        &LauncherConfig::default(),
        false,
        &FixedConfirm::no(),
        &RecordingReporter::default(),
    )
    .expect("scaffold");

    let report = inspect_mappings(&read(&dir, "config/role_mappings.json")).expect("valid json");
    assert_eq!(report.total, 1);
    assert_eq!(report.enabled, 0);
    assert!(report.problems.is_empty());
}

#[test]
fn test_scaffold_leaves_existing_files_without_force() {
    let (dir, fs) = empty_project();
    write(dir.path(), ".env", "DISCORD_BOT_TOKEN=real\n");
    let confirm = FixedConfirm::yes();

    let report = scaffold(
        &fs,
        &LauncherConfig::default(),
        false,
        &confirm,
        &RecordingReporter::default(),
    )
    .expect("scaffold");

    assert_eq!(read(&dir, ".env"), "DISCORD_BOT_TOKEN=real\n");
    assert_eq!(report.skipped, [".env"]);
    assert!(confirm.prompts.borrow().is_empty(), "no prompt without --force");
}

#[test]
fn test_scaffold_force_overwrites_after_confirmation() {
    let (dir, fs) = empty_project();
    write(dir.path(), ".env", "DISCORD_BOT_TOKEN=real\n");
    let confirm = FixedConfirm::yes();

    let report = scaffold(
        &fs,
        &LauncherConfig::default(),
        true,
        &confirm,
        &RecordingReporter::default(),
    )
    .expect("scaffold");

    assert_eq!(report.overwritten, [".env"]);
    assert_eq!(read(&dir, ".env"), "DISCORD_BOT_TOKEN=your_token_here\n");
    assert_eq!(confirm.prompts.borrow().len(), 1);
}

#[test]
fn test_scaffold_force_declined_keeps_file() {
    let (dir, fs) = empty_project();
    write(dir.path(), ".env", "DISCORD_BOT_TOKEN=real\n");

    let report = scaffold(
        &fs,
        &LauncherConfig::default(),
        true,
        &FixedConfirm::no(),
        &RecordingReporter::default(),
    )
    .expect("scaffold");

    assert_eq!(report.skipped, [".env"]);
    assert_eq!(read(&dir, ".env"), "DISCORD_BOT_TOKEN=real\n");
}

#[test]
fn test_scaffold_second_run_changes_nothing() {
    let (_dir, fs) = empty_project();
    let config = LauncherConfig::default();
    let confirm = FixedConfirm::no();
    let reporter = RecordingReporter::default();

    scaffold(&fs, &config, false, &confirm, &reporter).expect("first run");
    let second = scaffold(&fs, &config, false, &confirm, &reporter).expect("second run");

    assert!(second.created.is_empty());
    assert!(second.overwritten.is_empty());
    assert_eq!(second.skipped.len(), 2);
}
