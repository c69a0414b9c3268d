//! Application context: unified state passed to every command handler.
//!
//! `AppContext` resolves the project directory and loads `launcher.yaml`
//! once, so command handlers only decide what to run and how to render it.

use std::path::PathBuf;

use anyhow::Result;

use crate::application::ports::{ConfigStore, Confirm, ProjectFs};
use crate::domain::LauncherConfig;
use crate::infra::config::YamlConfigStore;
use crate::infra::fs::LocalProjectFs;
use crate::output::{HumanRenderer, JsonRenderer, OutputContext, Renderer};

/// Environment variable that, like `CI`, disables prompts.
pub const YES_ENV: &str = "ROLESYNC_YES";

/// Output rendering mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Human-readable terminal output (default).
    Human,
    /// Machine-readable JSON output.
    Json,
}

/// Output rendering flags.
pub struct OutputFlags {
    /// Disable ANSI color output.
    pub no_color: bool,
    /// Suppress non-error output.
    pub quiet: bool,
    /// Enable JSON output mode.
    pub json: bool,
}

/// Behaviour flags.
pub struct BehaviourFlags {
    /// Skip interactive prompts (also set by `CI` / `ROLESYNC_YES` env vars).
    pub yes: bool,
}

/// Flags passed from the top-level CLI to `AppContext::new`.
pub struct AppFlags {
    /// Output rendering options.
    pub output: OutputFlags,
    /// Behaviour options.
    pub behaviour: BehaviourFlags,
    /// Project directory, relative to the current directory or absolute.
    pub project_dir: PathBuf,
}

/// Unified application context passed to every command handler.
pub struct AppContext {
    /// Terminal output context (colors, quiet mode).
    pub output: OutputContext,
    /// Output rendering mode (human vs JSON).
    pub mode: OutputMode,
    /// The bot's project directory.
    pub project: LocalProjectFs,
    /// Launcher settings, defaults when `launcher.yaml` is absent.
    pub config: LauncherConfig,
    /// When `true`, skip interactive prompts and use defaults.
    ///
    /// Set when `--yes` / `-y` is passed, or when the `CI` or `ROLESYNC_YES`
    /// environment variables are present.
    pub non_interactive: bool,
}

impl AppContext {
    /// Construct an `AppContext` from top-level CLI flags.
    ///
    /// # Errors
    ///
    /// Returns an error if the project directory cannot be resolved or the
    /// launcher configuration is unreadable or invalid.
    pub fn new(flags: &AppFlags) -> Result<Self> {
        let ci_env = std::env::var("CI").is_ok() || std::env::var(YES_ENV).is_ok();
        let non_interactive = flags.behaviour.yes || ci_env;

        let mode = if flags.output.json {
            OutputMode::Json
        } else {
            OutputMode::Human
        };

        let project = LocalProjectFs::new(&flags.project_dir)?;
        let config = YamlConfigStore::new(project.root()).load()?;
        tracing::debug!(project = %project.root().display(), "project resolved");

        Ok(Self {
            output: OutputContext::new(flags.output.no_color, flags.output.quiet),
            mode,
            project,
            config,
            non_interactive,
        })
    }

    /// Returns `true` when JSON output mode is active.
    #[must_use]
    pub fn is_json(&self) -> bool {
        self.mode == OutputMode::Json
    }

    /// Returns the appropriate `Renderer` variant for the current output mode.
    #[must_use]
    pub fn renderer(&self) -> Renderer<'_> {
        match self.mode {
            OutputMode::Human => Renderer::Human(HumanRenderer::new(&self.output)),
            OutputMode::Json => Renderer::Json(JsonRenderer),
        }
    }
}

impl Confirm for AppContext {
    /// Ask the user for confirmation.
    ///
    /// When `non_interactive` is `true` (CI, `--yes` flag, or `ROLESYNC_YES` env),
    /// returns `default` immediately without prompting.
    fn confirm(&self, prompt: &str, default: bool) -> Result<bool> {
        if self.non_interactive {
            return Ok(default);
        }
        let confirmed = dialoguer::Confirm::new()
            .with_prompt(prompt)
            .default(default)
            .interact()?;
        Ok(confirmed)
    }
}
