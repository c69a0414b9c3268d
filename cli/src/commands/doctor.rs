//! `rolesync doctor`: project setup diagnostics.

use anyhow::Result;

use crate::app::AppContext;
use crate::application::services::setup_doctor::run_doctor;
use crate::domain::health::{Category, SetupChecks, passed_count};
use crate::infra::command_runner::TokioCommandRunner;
use crate::output::Renderer;
use crate::output::reporter::{SilentReporter, SpinnerReporter};

/// Run every check and render the report.
///
/// Returns `true` when every category passed.
///
/// # Errors
///
/// Returns an error if the checks cannot be run or JSON serialization fails.
pub async fn run(app: &AppContext) -> Result<bool> {
    let runner = TokioCommandRunner::default();
    let path = std::env::var_os("PATH");

    let checks: SetupChecks = if app.output.show_progress() && !app.is_json() {
        let reporter = SpinnerReporter::new("running diagnostics...");
        run_doctor(&app.project, &app.config, &runner, &reporter, path.as_deref()).await?
    } else {
        run_doctor(&app.project, &app.config, &runner, &SilentReporter, path.as_deref()).await?
    };

    let ready = passed_count(&checks) == Category::ALL.len();
    tracing::info!(ready, passed = passed_count(&checks), "diagnostics finished");

    match app.renderer() {
        Renderer::Human(r) => r.render_checks(&checks, &app.config),
        Renderer::Json(r) => r.render_checks(&checks)?,
    }
    Ok(ready)
}
