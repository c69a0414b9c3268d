//! `rolesync launch`: pre-flight gates, then the bot itself.

use anyhow::Result;

use crate::app::{AppContext, OutputMode};
use crate::application::services::launch::launch;
use crate::infra::command_runner::TokioCommandRunner;
use crate::output::TerminalReporter;
use crate::output::reporter::SilentReporter;

/// Run the launch command.
///
/// Gate results are reported line by line rather than with a spinner: the
/// service shares the terminal once it starts.
///
/// # Errors
///
/// Returns the failing gate's `PreflightError`, or `ServiceFailed` when the
/// service exits non-zero.
pub async fn run(app: &AppContext) -> Result<()> {
    let runner = TokioCommandRunner::default();
    let path = std::env::var_os("PATH");

    match app.mode {
        OutputMode::Json => {
            launch(&app.project, &app.config, &runner, &SilentReporter, path.as_deref()).await
        }
        OutputMode::Human => {
            let reporter = TerminalReporter::new(&app.output);
            launch(&app.project, &app.config, &runner, &reporter, path.as_deref()).await
        }
    }
}
