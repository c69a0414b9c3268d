//! rolesync - pre-flight checks and launcher for the role sync bot

use std::process::ExitCode;

use clap::Parser;

use rolesync_cli::cli::Cli;
use rolesync_cli::domain::PreflightError;
use rolesync_cli::logging;
use rolesync_cli::output::{OutputContext, json};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let is_json = cli.json;
    let ctx = OutputContext::new(cli.no_color, cli.quiet);

    match cli.run().await {
        Ok(code) => code,
        Err(e) => {
            report_error(&ctx, is_json, &e);
            ExitCode::FAILURE
        }
    }
}

fn report_error(ctx: &OutputContext, is_json: bool, err: &anyhow::Error) {
    let message = format!("{err:#}");
    tracing::debug!(error = ?err, "command failed");
    if is_json {
        let code = err
            .downcast_ref::<PreflightError>()
            .map_or("ERROR", PreflightError::code);
        if let Ok(out) = json::format_error(&message, code) {
            println!("{out}");
            return;
        }
    }
    ctx.error(&message);
}
