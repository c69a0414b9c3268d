//! Domain types and validators for launcher configuration.
//!
//! Pure functions only; no I/O, no async, no filesystem access.

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::domain::error::ConfigError;
use crate::domain::runtime::parse_version;

// ── Constants ────────────────────────────────────────────────────────────────

/// Placeholder substituted with the module name in `runtime.import_check`.
pub const MODULE_PLACEHOLDER: &str = "{module}";

/// Log path used when neither `launcher.yaml` nor the settings file names one.
pub const DEFAULT_LOG_FILE: &str = "logs/bot.log";

/// Source files of the role sync bot, relative to the project directory.
pub const BOT_MODULES: &[&str] = &[
    "bot/main.py",
    "bot/config.py",
    "bot/cogs/sync_button.py",
    "bot/cogs/role_monitor.py",
    "bot/cogs/admin_commands.py",
    "bot/cogs/stats_commands.py",
    "bot/core/sync_engine.py",
    "bot/core/role_mapper.py",
    "bot/core/permissions.py",
    "bot/database/models.py",
    "bot/database/operations.py",
    "bot/ui/buttons.py",
    "bot/ui/embeds.py",
    "bot/utils/logger.py",
    "bot/utils/errors.py",
    "bot/utils/validators.py",
];

#[cfg(windows)]
const DEFAULT_INTERPRETER: &str = "python";
#[cfg(not(windows))]
const DEFAULT_INTERPRETER: &str = "python3";

// ── Config schema ────────────────────────────────────────────────────────────

/// Top-level configuration stored in `launcher.yaml`.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct LauncherConfig {
    pub runtime: RuntimeConfig,
    pub dependencies: DependencyConfig,
    pub service: ServiceConfig,
    pub project: ProjectConfig,
}

/// How the interpreter is located and checked.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    /// Interpreter program name, resolved inside the virtual environment first.
    pub interpreter: String,
    /// Virtual environment directory, relative to the project directory.
    pub venv_dir: String,
    /// Arguments that make the interpreter print its version and exit.
    pub version_args: Vec<String>,
    /// Arguments that import a module; `{module}` is replaced by its name.
    pub import_check: Vec<String>,
    /// Minimum interpreter version accepted by `doctor`.
    pub min_version: String,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            interpreter: DEFAULT_INTERPRETER.to_string(),
            venv_dir: "venv".to_string(),
            version_args: vec!["--version".to_string()],
            import_check: vec!["-c".to_string(), format!("import {MODULE_PLACEHOLDER}")],
            min_version: "3.9".to_string(),
        }
    }
}

/// Modules the service imports.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DependencyConfig {
    /// The single module gating `launch`.
    pub required: String,
    /// Every module `doctor` checks.
    pub modules: Vec<String>,
    /// Requirements file named in the install hint.
    pub requirements_file: String,
}

impl Default for DependencyConfig {
    fn default() -> Self {
        Self {
            required: "discord".to_string(),
            modules: ["discord", "dotenv", "yaml", "aiosqlite"]
                .into_iter()
                .map(String::from)
                .collect(),
            requirements_file: "requirements.txt".to_string(),
        }
    }
}

/// The external program and its configuration artifact.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// Script handed to the interpreter.
    pub entry_point: String,
    /// Extra arguments after the entry point.
    pub args: Vec<String>,
    /// Configuration file whose existence gates `launch`.
    pub env_file: String,
    /// Template the operator copies to create `env_file`.
    pub env_template: String,
    /// Log location shown when the service fails. Overrides the settings file.
    pub log_file: Option<String>,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            entry_point: "run.py".to_string(),
            args: Vec::new(),
            env_file: ".env".to_string(),
            env_template: ".env.example".to_string(),
            log_file: None,
        }
    }
}

/// Project layout inspected by `doctor` and prepared by `init`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectConfig {
    pub settings_file: String,
    pub mappings_file: String,
    pub required_dirs: Vec<String>,
    /// Bot modules that must exist besides the entry point.
    pub required_files: Vec<String>,
    /// Variable in `env_file` holding the bot token.
    pub token_var: String,
    /// Template value that means the token was never filled in.
    pub token_placeholder: String,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            settings_file: "config/config.yaml".to_string(),
            mappings_file: "config/role_mappings.json".to_string(),
            required_dirs: ["data", "logs", "config", "bot"]
                .into_iter()
                .map(String::from)
                .collect(),
            required_files: BOT_MODULES.iter().copied().map(String::from).collect(),
            token_var: "DISCORD_BOT_TOKEN".to_string(),
            token_placeholder: "your_token_here".to_string(),
        }
    }
}

// ── Validators ───────────────────────────────────────────────────────────────

impl LauncherConfig {
    /// Check the fields the gate sequence cannot run without.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the first offending field.
    pub fn validate(&self) -> Result<()> {
        non_empty("runtime.interpreter", &self.runtime.interpreter)?;
        non_empty("service.entry_point", &self.service.entry_point)?;
        non_empty("dependencies.required", &self.dependencies.required)?;
        if parse_version(&self.runtime.min_version).is_none() {
            return Err(ConfigError::Invalid {
                field: "runtime.min_version",
                reason: format!(
                    "'{}' is not MAJOR.MINOR[.PATCH]",
                    self.runtime.min_version
                ),
            }
            .into());
        }
        Ok(())
    }
}

fn non_empty(field: &'static str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(ConfigError::Invalid {
            field,
            reason: "must not be empty".to_string(),
        }
        .into());
    }
    Ok(())
}

/// Render the import check arguments for `module`.
#[must_use]
pub fn import_check_args(template: &[String], module: &str) -> Vec<String> {
    template
        .iter()
        .map(|arg| arg.replace(MODULE_PLACEHOLDER, module))
        .collect()
}

// ── Unit tests ───────────────────────────────────────────────────────────────
