//! Application service: launch use-case.
//!
//! Runs the pre-flight gate sequence and hands off to the service process.
//! The first failing gate ends the run; nothing is retried.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::application::ports::{CommandRunner, ProgressReporter, ProjectFs};
use crate::application::services::runtime::{ResolvedRuntime, resolve_runtime};
use crate::domain::LauncherConfig;
use crate::domain::config::{DEFAULT_LOG_FILE, import_check_args};
use crate::domain::error::PreflightError;
use crate::domain::project::settings_log_path;
use crate::domain::runtime::describe_exit;

/// Run the gate sequence, then the service.
///
/// Returns `Ok(())` only when the service exits zero.
///
/// # Errors
///
/// Returns a [`PreflightError`] (inside `anyhow::Error`) for a failed gate or
/// a non-zero service exit, or a plain error if the service cannot be spawned.
pub async fn launch(
    fs: &impl ProjectFs,
    config: &LauncherConfig,
    runner: &impl CommandRunner,
    reporter: &impl ProgressReporter,
    inherited_path: Option<&OsStr>,
) -> Result<()> {
    let runtime = resolve_runtime(fs, &config.runtime, inherited_path)?;
    if let Some(venv) = &runtime.virtualenv {
        reporter.success(&format!("virtual environment {}", venv.root.display()));
    }

    check_runtime(&runtime, config, runner).await?;
    reporter.success(&format!("runtime {}", runtime.interpreter.display()));

    check_dependency(&runtime, config, runner).await?;
    reporter.success(&format!("module {}", config.dependencies.required));

    check_config_file(fs, config)?;
    reporter.success(&format!("configuration {}", config.service.env_file));

    let service = runtime.invocation(
        std::iter::once(config.service.entry_point.clone()).chain(config.service.args.iter().cloned()),
    );
    reporter.step(&format!("starting {}", service.display()));
    tracing::info!(command = %service.display(), "launching service");

    let status = runner
        .status(&service)
        .await
        .with_context(|| format!("failed to launch {}", service.display()))?;
    tracing::info!(?status, "service exited");

    if status.success() {
        return Ok(());
    }
    Err(PreflightError::ServiceFailed {
        status: describe_exit(status.code()),
        log: log_location(fs, config).display().to_string(),
    }
    .into())
}

async fn check_runtime(
    runtime: &ResolvedRuntime,
    config: &LauncherConfig,
    runner: &impl CommandRunner,
) -> Result<(), PreflightError> {
    let invocation = runtime.invocation(config.runtime.version_args.iter().cloned());
    let ok = match runner.output(&invocation).await {
        Ok(out) => out.status.success(),
        Err(e) => {
            tracing::debug!(error = %e, command = %invocation.display(), "runtime check failed");
            false
        }
    };
    if ok {
        return Ok(());
    }
    Err(PreflightError::RuntimeUnavailable {
        interpreter: runtime.interpreter.display().to_string(),
        venv_dir: config.runtime.venv_dir.clone(),
    })
}

async fn check_dependency(
    runtime: &ResolvedRuntime,
    config: &LauncherConfig,
    runner: &impl CommandRunner,
) -> Result<(), PreflightError> {
    let module = &config.dependencies.required;
    let invocation = runtime.invocation(import_check_args(&config.runtime.import_check, module));
    let ok = match runner.output(&invocation).await {
        Ok(out) => out.status.success(),
        Err(e) => {
            tracing::debug!(error = %e, command = %invocation.display(), "import check failed");
            false
        }
    };
    if ok {
        return Ok(());
    }
    Err(PreflightError::DependencyMissing {
        module: module.clone(),
        interpreter: runtime.interpreter.display().to_string(),
        requirements: config.dependencies.requirements_file.clone(),
    })
}

fn check_config_file(fs: &impl ProjectFs, config: &LauncherConfig) -> Result<(), PreflightError> {
    let svc = &config.service;
    if fs.exists(Path::new(&svc.env_file)) {
        return Ok(());
    }
    Err(PreflightError::ConfigMissing {
        path: svc.env_file.clone(),
        template: svc.env_template.clone(),
    })
}

/// Where the service writes its log, resolved against the project directory.
///
/// Order: `service.log_file`, then `logging.file_path` from the settings
/// file, then [`DEFAULT_LOG_FILE`].
#[must_use]
pub fn log_location(fs: &impl ProjectFs, config: &LauncherConfig) -> PathBuf {
    let rel = config
        .service
        .log_file
        .clone()
        .or_else(|| {
            let settings = Path::new(&config.project.settings_file);
            if !fs.exists(settings) {
                return None;
            }
            fs.read_to_string(settings)
                .ok()
                .and_then(|content| settings_log_path(&content))
        })
        .unwrap_or_else(|| DEFAULT_LOG_FILE.to_string());
    fs.resolve(Path::new(&rel))
}
