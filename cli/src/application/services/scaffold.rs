//! Application service: project scaffolding use-case.
//!
//! Creates what `launch` and `doctor` expect in a fresh checkout. Existing
//! files are only replaced when the caller forces it and the operator agrees.

use std::path::Path;

use anyhow::{Context, Result};

use crate::application::ports::{Confirm, ProgressReporter, ProjectFs};
use crate::domain::LauncherConfig;
use crate::domain::project::default_mappings_document;

/// What happened to each scaffolded path.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct ScaffoldReport {
    pub created: Vec<String>,
    pub overwritten: Vec<String>,
    pub skipped: Vec<String>,
}

/// Create missing directories, the environment file and the role mappings.
///
/// # Errors
///
/// Returns an error if a file or directory cannot be written, or the
/// operator prompt fails.
pub fn scaffold(
    fs: &impl ProjectFs,
    config: &LauncherConfig,
    force: bool,
    confirm: &impl Confirm,
    reporter: &impl ProgressReporter,
) -> Result<ScaffoldReport> {
    let mut report = ScaffoldReport::default();

    for dir in &config.project.required_dirs {
        let path = Path::new(dir);
        if fs.is_dir(path) {
            continue;
        }
        fs.create_dir_all(path)?;
        reporter.success(&format!("created {dir}/"));
        report.created.push(dir.clone());
    }

    let env_contents = env_file_contents(fs, config)?;
    write_file(
        fs,
        &config.service.env_file,
        &env_contents,
        force,
        confirm,
        reporter,
        &mut report,
    )?;

    let mappings = serde_json::to_string_pretty(&default_mappings_document())
        .context("cannot serialize default role mappings")?;
    write_file(
        fs,
        &config.project.mappings_file,
        &format!("{mappings}\n"),
        force,
        confirm,
        reporter,
        &mut report,
    )?;

    Ok(report)
}

/// The template's contents when it exists, else a single placeholder token line.
fn env_file_contents(fs: &impl ProjectFs, config: &LauncherConfig) -> Result<String> {
    let template = Path::new(&config.service.env_template);
    if fs.exists(template) {
        return fs.read_to_string(template);
    }
    tracing::debug!(template = %template.display(), "template missing, writing placeholder token");
    Ok(format!(
        "{}={}\n",
        config.project.token_var, config.project.token_placeholder
    ))
}

fn write_file(
    fs: &impl ProjectFs,
    rel: &str,
    contents: &str,
    force: bool,
    confirm: &impl Confirm,
    reporter: &impl ProgressReporter,
    report: &mut ScaffoldReport,
) -> Result<()> {
    let path = Path::new(rel);
    let existed = fs.exists(path);
    if existed && (!force || !confirm.confirm(&format!("Overwrite {rel}?"), true)?) {
        reporter.warn(&format!("{rel} exists, left unchanged"));
        report.skipped.push(rel.to_string());
        return Ok(());
    }
    fs.write(path, contents)?;
    if existed {
        reporter.success(&format!("overwrote {rel}"));
        report.overwritten.push(rel.to_string());
    } else {
        reporter.success(&format!("created {rel}"));
        report.created.push(rel.to_string());
    }
    Ok(())
}
