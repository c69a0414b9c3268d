//! Typed domain error enums.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `tokio`, `std::fs`, `std::process`, or `std::net`.
//! All error types implement `thiserror::Error` and convert to `anyhow::Error`
//! via the `?` operator.

use thiserror::Error;

// ── Pre-flight errors ─────────────────────────────────────────────────────────

/// Terminal conditions of the launch gate sequence.
///
/// Each variant is reported once and ends the run with exit code 1.
#[derive(Debug, Error)]
pub enum PreflightError {
    #[error(
        "Runtime '{interpreter}' could not be started.\n\nInstall it, or create a virtual environment in '{venv_dir}'."
    )]
    RuntimeUnavailable {
        interpreter: String,
        venv_dir: String,
    },

    #[error(
        "Required module '{module}' is not installed.\n\nInstall the dependencies with: {interpreter} -m pip install -r {requirements}"
    )]
    DependencyMissing {
        module: String,
        interpreter: String,
        requirements: String,
    },

    #[error("Configuration file '{path}' not found.\n\nCreate it from the template: cp {template} {path}")]
    ConfigMissing { path: String, template: String },

    #[error("Service terminated with error ({status}).\n\nSee the log for details: {log}")]
    ServiceFailed { status: String, log: String },
}

impl PreflightError {
    /// Stable machine-readable code used by `--json` error output.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::RuntimeUnavailable { .. } => "MISSING_RUNTIME",
            Self::DependencyMissing { .. } => "MISSING_DEPENDENCY",
            Self::ConfigMissing { .. } => "MISSING_CONFIG",
            Self::ServiceFailed { .. } => "SERVICE_FAILED",
        }
    }
}

// ── Config errors ─────────────────────────────────────────────────────────────

/// Errors raised while validating `launcher.yaml`.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}
