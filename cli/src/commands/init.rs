//! `rolesync init`: scaffold a fresh checkout.

use anyhow::Result;
use clap::Args;

use crate::app::{AppContext, OutputMode};
use crate::application::services::scaffold::scaffold;
use crate::output::reporter::SilentReporter;
use crate::output::{Renderer, TerminalReporter};

/// Arguments for the init command.
#[derive(Args)]
pub struct InitArgs {
    /// Overwrite existing files after confirmation
    #[arg(long)]
    pub force: bool,
}

/// Run the init command.
///
/// # Errors
///
/// Returns an error if a file cannot be written or a prompt fails.
pub fn run(app: &AppContext, args: &InitArgs) -> Result<()> {
    let report = match app.mode {
        OutputMode::Json => scaffold(&app.project, &app.config, args.force, app, &SilentReporter)?,
        OutputMode::Human => {
            let reporter = TerminalReporter::new(&app.output);
            scaffold(&app.project, &app.config, args.force, app, &reporter)?
        }
    };

    match app.renderer() {
        Renderer::Human(r) => r.render_scaffold(&report),
        Renderer::Json(r) => r.render_scaffold(&report)?,
    }
    Ok(())
}
