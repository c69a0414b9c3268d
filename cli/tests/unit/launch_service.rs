//! Unit tests for the launch service gate sequence.

#![allow(clippy::expect_used)]

use std::ffi::OsStr;
use std::path::Path;

use rolesync_cli::application::ports::ProjectFs;
use rolesync_cli::application::services::launch::{launch, log_location};
use rolesync_cli::domain::{LauncherConfig, PreflightError};

use crate::helpers::{empty_project, launchable_project, write};
use crate::mocks::{RecordingReporter, RuntimeCheck, ScriptedRunner};

async fn run_launch(
    fs: &impl ProjectFs,
    config: &LauncherConfig,
    runner: &ScriptedRunner,
) -> anyhow::Result<()> {
    let reporter = RecordingReporter::default();
    launch(fs, config, runner, &reporter, Some(OsStr::new("/usr/bin"))).await
}

fn preflight(err: &anyhow::Error) -> &PreflightError {
    err.downcast_ref::<PreflightError>()
        .expect("error should be a PreflightError")
}

// ── Success path ──────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_launch_all_gates_pass_service_exit_zero_is_ok() {
    let (_dir, fs) = launchable_project();
    let runner = ScriptedRunner::healthy();
    let reporter = RecordingReporter::default();

    launch(&fs, &LauncherConfig::default(), &runner, &reporter, None)
        .await
        .expect("launch should succeed");

    let services = runner.service_calls();
    assert_eq!(services.len(), 1, "service invoked exactly once");
    assert_eq!(services[0].args, ["run.py"]);
    assert_eq!(services[0].cwd.as_deref(), Some(fs.root()));
    assert!(reporter.contains("starting"));
}

#[tokio::test]
async fn test_launch_passes_configured_service_args() {
    let (_dir, fs) = launchable_project();
    let mut config = LauncherConfig::default();
    config.service.args = vec!["--once".to_string()];
    let runner = ScriptedRunner::healthy();

    run_launch(&fs, &config, &runner).await.expect("launch");

    assert_eq!(runner.service_calls()[0].args, ["run.py", "--once"]);
}

#[tokio::test]
async fn test_launch_is_idempotent_over_unchanged_state() {
    let (_dir, fs) = launchable_project();
    let config = LauncherConfig::default();

    let first = ScriptedRunner::healthy();
    run_launch(&fs, &config, &first).await.expect("first launch");
    let second = ScriptedRunner::healthy();
    run_launch(&fs, &config, &second).await.expect("second launch");

    assert_eq!(*first.calls.borrow(), *second.calls.borrow());
}

// ── Gate failures ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_launch_runtime_not_found_is_runtime_unavailable() {
    let (_dir, fs) = launchable_project();
    let runner = ScriptedRunner::healthy().with_runtime(RuntimeCheck::NotFound);

    let err = run_launch(&fs, &LauncherConfig::default(), &runner)
        .await
        .expect_err("must fail");

    assert!(matches!(preflight(&err), PreflightError::RuntimeUnavailable { .. }));
    assert_eq!(runner.check_count(), 1, "no import check after runtime failure");
    assert!(runner.service_calls().is_empty());
}

#[tokio::test]
async fn test_launch_runtime_check_nonzero_is_runtime_unavailable() {
    let (_dir, fs) = launchable_project();
    let runner = ScriptedRunner::healthy().with_runtime(RuntimeCheck::Fails);

    let err = run_launch(&fs, &LauncherConfig::default(), &runner)
        .await
        .expect_err("must fail");

    assert_eq!(preflight(&err).code(), "MISSING_RUNTIME");
    assert!(runner.service_calls().is_empty());
}

#[tokio::test]
async fn test_launch_missing_dependency_never_invokes_service() {
    let (_dir, fs) = launchable_project();
    let runner = ScriptedRunner::healthy().missing("discord");

    let err = run_launch(&fs, &LauncherConfig::default(), &runner)
        .await
        .expect_err("must fail");

    match preflight(&err) {
        PreflightError::DependencyMissing { module, requirements, .. } => {
            assert_eq!(module, "discord");
            assert_eq!(requirements, "requirements.txt");
        }
        other => panic!("expected DependencyMissing, got {other:?}"),
    }
    assert!(err.to_string().contains("pip install -r requirements.txt"));
    assert!(runner.service_calls().is_empty());
}

#[tokio::test]
async fn test_launch_dependency_checked_before_config_file() {
    // Neither the module nor .env is present: the dependency gate reports first.
    let (dir, fs) = empty_project();
    write(dir.path(), "run.py", "");
    let runner = ScriptedRunner::healthy().missing("discord");

    let err = run_launch(&fs, &LauncherConfig::default(), &runner)
        .await
        .expect_err("must fail");

    assert_eq!(preflight(&err).code(), "MISSING_DEPENDENCY");
}

#[tokio::test]
async fn test_launch_only_required_module_gates_launch() {
    // yaml is checked by doctor, not by launch.
    let (_dir, fs) = launchable_project();
    let runner = ScriptedRunner::healthy().missing("yaml");

    run_launch(&fs, &LauncherConfig::default(), &runner)
        .await
        .expect("optional modules do not block launch");
}

#[tokio::test]
async fn test_launch_missing_env_file_never_invokes_service() {
    let (dir, fs) = empty_project();
    write(dir.path(), "run.py", "");
    let runner = ScriptedRunner::healthy();

    let err = run_launch(&fs, &LauncherConfig::default(), &runner)
        .await
        .expect_err("must fail");

    match preflight(&err) {
        PreflightError::ConfigMissing { path, template } => {
            assert_eq!(path, ".env");
            assert_eq!(template, ".env.example");
        }
        other => panic!("expected ConfigMissing, got {other:?}"),
    }
    assert!(runner.service_calls().is_empty());
}

// ── Service failure ───────────────────────────────────────────────────────────

#[tokio::test]
async fn test_launch_service_nonzero_exit_references_log() {
    let (_dir, fs) = launchable_project();
    let runner = ScriptedRunner::healthy().service_exit(3);

    let err = run_launch(&fs, &LauncherConfig::default(), &runner)
        .await
        .expect_err("non-zero exit must fail");

    match preflight(&err) {
        PreflightError::ServiceFailed { status, log } => {
            assert_eq!(status, "exit code 3");
            let expected = fs.resolve(Path::new("logs/bot.log"));
            assert_eq!(log, &expected.display().to_string());
        }
        other => panic!("expected ServiceFailed, got {other:?}"),
    }
    assert!(err.to_string().contains("See the log"));
    assert_eq!(runner.service_calls().len(), 1, "service is not retried");
}

// ── Virtual environment ───────────────────────────────────────────────────────

#[cfg(unix)]
#[tokio::test]
async fn test_launch_applies_virtualenv_to_every_invocation() {
    let (dir, fs) = launchable_project();
    crate::helpers::add_virtualenv(dir.path());
    let runner = ScriptedRunner::healthy();

    run_launch(&fs, &LauncherConfig::default(), &runner)
        .await
        .expect("launch");

    let venv_root = fs.resolve(Path::new("venv"));
    let interpreter = venv_root.join("bin").join("python3");
    for call in runner.calls.borrow().iter() {
        assert_eq!(call.program, interpreter);
        let env = |k: &str| {
            call.envs
                .iter()
                .find(|(name, _)| name == k)
                .map(|(_, v)| v.clone())
        };
        assert_eq!(env("VIRTUAL_ENV"), Some(venv_root.clone().into_os_string()));
        let path = env("PATH").expect("PATH overlay");
        let first = std::env::split_paths(&path).next().expect("first entry");
        assert_eq!(first, venv_root.join("bin"));
    }
}

#[tokio::test]
async fn test_launch_without_virtualenv_uses_configured_interpreter() {
    let (_dir, fs) = launchable_project();
    let runner = ScriptedRunner::healthy();

    run_launch(&fs, &LauncherConfig::default(), &runner)
        .await
        .expect("launch");

    for call in runner.calls.borrow().iter() {
        assert_eq!(call.program, Path::new(&LauncherConfig::default().runtime.interpreter));
        assert!(call.envs.is_empty());
    }
}

// ── Log location ──────────────────────────────────────────────────────────────

#[test]
fn test_log_location_defaults_to_logs_bot_log() {
    let (_dir, fs) = empty_project();
    assert_eq!(
        log_location(&fs, &LauncherConfig::default()),
        fs.resolve(Path::new("logs/bot.log"))
    );
}

#[test]
fn test_log_location_reads_settings_file_path() {
    let (dir, fs) = empty_project();
    write(
        dir.path(),
        "config/config.yaml",
        "logging:\n  file_path: logs/custom.log\n",
    );
    assert_eq!(
        log_location(&fs, &LauncherConfig::default()),
        fs.resolve(Path::new("logs/custom.log"))
    );
}

#[test]
fn test_log_location_override_wins_over_settings() {
    let (dir, fs) = empty_project();
    write(
        dir.path(),
        "config/config.yaml",
        "logging:\n  file_path: logs/custom.log\n",
    );
    let mut config = LauncherConfig::default();
    config.service.log_file = Some("var/service.log".to_string());
    assert_eq!(
        log_location(&fs, &config),
        fs.resolve(Path::new("var/service.log"))
    );
}

#[test]
fn test_log_location_ignores_unparseable_settings() {
    let (dir, fs) = empty_project();
    write(dir.path(), "config/config.yaml", "logging: [unclosed\n");
    assert_eq!(
        log_location(&fs, &LauncherConfig::default()),
        fs.resolve(Path::new("logs/bot.log"))
    );
}
