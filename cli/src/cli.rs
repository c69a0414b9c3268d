//! CLI argument parsing with clap derive

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::builder::FalseyValueParser;
use clap::{ArgAction, Parser, Subcommand};

use crate::app::{AppContext, AppFlags, BehaviourFlags, OutputFlags};
use crate::commands;
use crate::output::OutputContext;

/// Pre-flight checks and launcher for the role sync bot
#[derive(Parser)]
#[command(name = "rolesync", version, propagate_version = true)]
pub struct Cli {
    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(
        long,
        global = true,
        env = "NO_COLOR",
        value_parser = FalseyValueParser::new()
    )]
    pub no_color: bool,

    /// Increase diagnostic logging (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Project directory containing the bot
    #[arg(
        short = 'C',
        long,
        global = true,
        env = "ROLESYNC_PROJECT_DIR",
        default_value = "."
    )]
    pub project_dir: PathBuf,

    /// Skip confirmation prompts
    #[arg(short, long, global = true)]
    pub yes: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Check the environment and start the bot (default)
    Launch,

    /// Diagnose the project setup without starting the bot
    Doctor,

    /// Create missing directories and configuration files
    Init(commands::init::InitArgs),

    /// Show version
    Version,
}

impl Cli {
    /// Execute the CLI command.
    ///
    /// # Errors
    ///
    /// Returns an error if the launcher configuration cannot be loaded or
    /// the command fails.
    pub async fn run(self) -> Result<ExitCode> {
        let Cli {
            json,
            quiet,
            no_color,
            verbose: _,
            project_dir,
            yes,
            command,
        } = self;

        let command = command.unwrap_or(Command::Launch);
        if let Command::Version = command {
            let ctx = OutputContext::new(no_color, quiet);
            commands::version::run(&ctx, json)?;
            return Ok(ExitCode::SUCCESS);
        }

        let app = AppContext::new(&AppFlags {
            output: OutputFlags {
                no_color,
                quiet,
                json,
            },
            behaviour: BehaviourFlags { yes },
            project_dir,
        })?;

        match command {
            Command::Launch => commands::launch::run(&app).await?,
            Command::Doctor => {
                if !commands::doctor::run(&app).await? {
                    return Ok(ExitCode::FAILURE);
                }
            }
            Command::Init(args) => commands::init::run(&app, &args)?,
            Command::Version => {}
        }
        Ok(ExitCode::SUCCESS)
    }
}
