//! JSON output helpers.
//!
//! Every `--json` code path writes one pretty-printed document to stdout.
//! Failures use the shared error object from [`format_error`].

use anyhow::{Context, Result};

use crate::application::services::scaffold::ScaffoldReport;
use crate::domain::health::{SetupChecks, passed_count};
use crate::domain::{collect_issues, collect_warnings};

/// Format a JSON error object.
///
/// Output (pretty-printed):
/// ```json
/// {
///   "error": true,
///   "message": "...",
///   "code": "..."
/// }
/// ```
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn format_error(message: &str, code: &str) -> Result<String> {
    let obj = serde_json::json!({
        "error": true,
        "message": message,
        "code": code,
    });
    serde_json::to_string_pretty(&obj).context("JSON serialization failed")
}

/// Renders domain types as JSON on stdout.
pub struct JsonRenderer;

impl JsonRenderer {
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_version(&self, version: &str) -> Result<()> {
        let out = serde_json::json!({ "version": version });
        println!("{}", serde_json::to_string(&out).context("JSON serialization")?);
        Ok(())
    }

    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_checks(&self, checks: &SetupChecks) -> Result<()> {
        println!("{}", checks_document(checks)?);
        Ok(())
    }

    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_scaffold(&self, report: &ScaffoldReport) -> Result<()> {
        let out = serde_json::json!({
            "created": report.created,
            "overwritten": report.overwritten,
            "skipped": report.skipped,
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&out).context("JSON serialization")?
        );
        Ok(())
    }
}

/// The doctor report as a pretty-printed JSON document.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn checks_document(checks: &SetupChecks) -> Result<String> {
    let issues = collect_issues(checks);
    let status = if issues.is_empty() { "ready" } else { "not_ready" };
    let out = serde_json::json!({
        "status": status,
        "passed": passed_count(checks),
        "total": crate::domain::health::Category::ALL.len(),
        "checks": checks,
        "issues": issues,
        "warnings": collect_warnings(checks),
    });
    serde_json::to_string_pretty(&out).context("JSON serialization")
}
