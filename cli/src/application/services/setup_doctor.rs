//! Application service: setup doctor use-case.
//!
//! Imports only from `crate::domain` and `crate::application::ports`.
//! All I/O is routed through injected port traits. Unlike `launch`, every
//! check runs regardless of earlier failures and the service is never started.

use std::ffi::OsStr;
use std::path::Path;

use anyhow::Result;

use crate::application::ports::{CommandRunner, ProgressReporter, ProjectFs};
use crate::application::services::runtime::{ResolvedRuntime, resolve_runtime};
use crate::domain::LauncherConfig;
use crate::domain::config::import_check_args;
use crate::domain::health::{FileCheck, ModuleCheck, PathCheck, RuntimeCheck, SetupChecks};
use crate::domain::project::{inspect_env_file, inspect_mappings, inspect_settings};
use crate::domain::runtime::{parse_version, version_ok};

/// Run every setup check and return the collected results.
///
/// The service never touches `OutputContext` or any presentation type;
/// rendering is the caller's responsibility.
///
/// # Errors
///
/// Returns an error only if the runtime overlay cannot be built; individual
/// check failures are recorded in the result.
pub async fn run_doctor(
    fs: &impl ProjectFs,
    config: &LauncherConfig,
    runner: &impl CommandRunner,
    reporter: &impl ProgressReporter,
    inherited_path: Option<&OsStr>,
) -> Result<SetupChecks> {
    let runtime = resolve_runtime(fs, &config.runtime, inherited_path)?;

    reporter.step("checking runtime...");
    let runtime_check = inspect_runtime(&runtime, config, runner).await;

    reporter.step("checking dependencies...");
    let modules = inspect_modules(&runtime, config, runner, runtime_check.found).await;

    reporter.step("checking project files...");
    let directories = config
        .project
        .required_dirs
        .iter()
        .map(|d| PathCheck {
            path: d.clone(),
            present: fs.is_dir(Path::new(d)),
        })
        .collect();
    let entry_point = PathCheck {
        path: config.service.entry_point.clone(),
        present: fs.exists(Path::new(&config.service.entry_point)),
    };

    let source_files = config
        .project
        .required_files
        .iter()
        .map(|f| PathCheck {
            path: f.clone(),
            present: fs.exists(Path::new(f)),
        })
        .collect();

    let project = &config.project;
    let env_file = inspect_file(fs, &config.service.env_file, |content| {
        Ok(inspect_env_file(content, &project.token_var, &project.token_placeholder))
    });
    let settings = inspect_file(fs, &project.settings_file, inspect_settings);
    let mappings = inspect_file(fs, &project.mappings_file, inspect_mappings);

    reporter.success("diagnostics complete");

    Ok(SetupChecks {
        runtime: runtime_check,
        modules,
        directories,
        entry_point,
        source_files,
        env_file,
        settings,
        mappings,
    })
}

// ── Internal checks ───────────────────────────────────────────────────────────

async fn inspect_runtime(
    runtime: &ResolvedRuntime,
    config: &LauncherConfig,
    runner: &impl CommandRunner,
) -> RuntimeCheck {
    let invocation = runtime.invocation(config.runtime.version_args.iter().cloned());
    let output = runner.output(&invocation).await;

    let (found, version) = match output {
        Ok(out) if out.status.success() => {
            // Python 2 printed its banner to stderr; search both streams.
            let mut text = String::from_utf8_lossy(&out.stdout).into_owned();
            text.push('\n');
            text.push_str(&String::from_utf8_lossy(&out.stderr));
            (true, parse_version(&text))
        }
        Ok(out) => {
            tracing::debug!(status = ?out.status, "runtime check exited non-zero");
            (false, None)
        }
        Err(e) => {
            tracing::debug!(error = %e, "runtime check failed");
            (false, None)
        }
    };

    let minimum = parse_version(&config.runtime.min_version);
    let version_ok = found && minimum.is_none_or(|min| version_ok(version.as_ref(), &min));

    RuntimeCheck {
        interpreter: runtime.interpreter.display().to_string(),
        found,
        version: version.map(|v| v.to_string()),
        version_ok,
        min_version: config.runtime.min_version.clone(),
        virtualenv: runtime
            .virtualenv
            .as_ref()
            .map(|v| v.root.display().to_string()),
    }
}

async fn inspect_modules(
    runtime: &ResolvedRuntime,
    config: &LauncherConfig,
    runner: &impl CommandRunner,
    runtime_found: bool,
) -> Vec<ModuleCheck> {
    let mut checks = Vec::with_capacity(config.dependencies.modules.len());
    for name in &config.dependencies.modules {
        let installed = runtime_found && {
            let invocation = runtime.invocation(import_check_args(&config.runtime.import_check, name));
            runner
                .output(&invocation)
                .await
                .is_ok_and(|out| out.status.success())
        };
        checks.push(ModuleCheck {
            name: name.clone(),
            installed,
        });
    }
    checks
}

fn inspect_file<R>(
    fs: &impl ProjectFs,
    rel: &str,
    inspect: impl FnOnce(&str) -> Result<R, String>,
) -> FileCheck<R> {
    let path = Path::new(rel);
    if !fs.exists(path) {
        return FileCheck::absent(rel);
    }
    let parsed = fs
        .read_to_string(path)
        .map_err(|e| format!("{e:#}"))
        .and_then(|content| inspect(&content));
    match parsed {
        Ok(report) => FileCheck {
            path: rel.to_string(),
            present: true,
            parse_error: None,
            report: Some(report),
        },
        Err(e) => FileCheck {
            path: rel.to_string(),
            present: true,
            parse_error: Some(e),
            report: None,
        },
    }
}
