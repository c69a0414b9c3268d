//! Setup check domain types and pure diagnostic functions.
//!
//! This module is intentionally free of I/O, async, and external layer imports.
//! All functions take data in and return data out.

use serde::Serialize;

use crate::domain::project::{EnvFileReport, MappingsReport, SettingsReport, TokenState};

// ── Types ─────────────────────────────────────────────────────────────────────

/// All check categories returned by the doctor command.
#[derive(Debug, Serialize)]
pub struct SetupChecks {
    pub runtime: RuntimeCheck,
    pub modules: Vec<ModuleCheck>,
    pub directories: Vec<PathCheck>,
    pub entry_point: PathCheck,
    /// `project.required_files`, in configured order.
    pub source_files: Vec<PathCheck>,
    pub env_file: FileCheck<EnvFileReport>,
    pub settings: FileCheck<SettingsReport>,
    pub mappings: FileCheck<MappingsReport>,
}

/// Interpreter check.
#[derive(Debug, Serialize)]
pub struct RuntimeCheck {
    /// Interpreter program actually checked (venv copy when present).
    pub interpreter: String,
    pub found: bool,
    pub version: Option<String>,
    pub version_ok: bool,
    pub min_version: String,
    /// Virtual environment applied before probing.
    pub virtualenv: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ModuleCheck {
    pub name: String,
    pub installed: bool,
}

#[derive(Debug, Serialize)]
pub struct PathCheck {
    pub path: String,
    pub present: bool,
}

/// A project file that is read and inspected when present.
#[derive(Debug, Serialize)]
pub struct FileCheck<R> {
    pub path: String,
    pub present: bool,
    pub parse_error: Option<String>,
    pub report: Option<R>,
}

impl<R> FileCheck<R> {
    #[must_use]
    pub fn absent(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            present: false,
            parse_error: None,
            report: None,
        }
    }
}

/// Doctor check categories, in report order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Runtime,
    Modules,
    Directories,
    Sources,
    EnvFile,
    Settings,
    Mappings,
}

impl Category {
    pub const ALL: [Self; 7] = [
        Self::Runtime,
        Self::Modules,
        Self::Directories,
        Self::Sources,
        Self::EnvFile,
        Self::Settings,
        Self::Mappings,
    ];

    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            Self::Runtime => "Runtime",
            Self::Modules => "Dependencies",
            Self::Directories => "Directories",
            Self::Sources => "Bot sources",
            Self::EnvFile => "Environment file",
            Self::Settings => "Settings",
            Self::Mappings => "Role mappings",
        }
    }
}

// ── Pure functions ────────────────────────────────────────────────────────────

/// Whether a single category passes.
#[must_use]
pub fn category_ok(checks: &SetupChecks, category: Category) -> bool {
    match category {
        Category::Runtime => checks.runtime.found && checks.runtime.version_ok,
        Category::Modules => checks.modules.iter().all(|m| m.installed),
        Category::Directories => checks.directories.iter().all(|d| d.present),
        Category::Sources => {
            checks.entry_point.present && checks.source_files.iter().all(|f| f.present)
        }
        Category::EnvFile => file_ok(&checks.env_file, |r| {
            r.token == TokenState::Set && r.parse_error.is_none()
        }),
        Category::Settings => file_ok(&checks.settings, |r| r.problems.is_empty()),
        Category::Mappings => file_ok(&checks.mappings, |r| r.problems.is_empty()),
    }
}

fn file_ok<R>(check: &FileCheck<R>, report_ok: impl Fn(&R) -> bool) -> bool {
    check.present && check.parse_error.is_none() && check.report.as_ref().is_some_and(report_ok)
}

/// Number of passing categories out of [`Category::ALL`].
#[must_use]
pub fn passed_count(checks: &SetupChecks) -> usize {
    Category::ALL
        .iter()
        .filter(|c| category_ok(checks, **c))
        .count()
}

/// Collect actionable issues from check results.
///
/// Returns one human-readable line per failing condition. Warnings from
/// [`collect_warnings`] are never included.
#[must_use]
pub fn collect_issues(checks: &SetupChecks) -> Vec<String> {
    let mut issues = Vec::new();

    let rt = &checks.runtime;
    if !rt.found {
        issues.push(format!("Runtime '{}' could not be started", rt.interpreter));
    } else if !rt.version_ok {
        let ver = rt.version.as_deref().unwrap_or("unknown");
        issues.push(format!(
            "Runtime {ver} is too old (need ≥ {})",
            rt.min_version
        ));
    }

    for m in checks.modules.iter().filter(|m| !m.installed) {
        issues.push(format!("Module '{}' is not installed", m.name));
    }
    for d in checks.directories.iter().filter(|d| !d.present) {
        issues.push(format!("Directory '{}' does not exist", d.path));
    }
    if !checks.entry_point.present {
        issues.push(format!("Entry point '{}' not found", checks.entry_point.path));
    }
    for f in checks.source_files.iter().filter(|f| !f.present) {
        issues.push(format!("Bot module '{}' not found", f.path));
    }

    file_issues(&checks.env_file, &mut issues, |r, out| {
        if let Some(e) = &r.parse_error {
            out.push(format!("Cannot parse environment file: {e}"));
        }
        match r.token {
            TokenState::Missing => out.push("Bot token is not set".to_string()),
            TokenState::Placeholder => out.push("Bot token still uses the template value".to_string()),
            TokenState::Set => {}
        }
    });
    file_issues(&checks.settings, &mut issues, |r, out| {
        out.extend(r.problems.iter().map(|p| format!("Settings: {p}")));
    });
    file_issues(&checks.mappings, &mut issues, |r, out| {
        out.extend(r.problems.iter().map(|p| format!("Role mappings: {p}")));
    });

    issues
}

fn file_issues<R>(
    check: &FileCheck<R>,
    out: &mut Vec<String>,
    report_issues: impl Fn(&R, &mut Vec<String>),
) {
    if !check.present {
        out.push(format!("'{}' not found", check.path));
    } else if let Some(e) = &check.parse_error {
        out.push(format!("Cannot parse '{}': {e}", check.path));
    } else if let Some(r) = &check.report {
        report_issues(r, out);
    }
}

/// Non-blocking findings: empty or template role mappings.
#[must_use]
pub fn collect_warnings(checks: &SetupChecks) -> Vec<String> {
    checks
        .mappings
        .report
        .as_ref()
        .map(|r| r.warnings.clone())
        .unwrap_or_default()
}

// ── Unit tests ────────────────────────────────────────────────────────────────
