//! Human-readable terminal renderer.

use crate::application::services::scaffold::ScaffoldReport;
use crate::domain::health::{Category, FileCheck, SetupChecks, category_ok, passed_count};
use crate::domain::project::TokenState;
use crate::domain::LauncherConfig;
use crate::output::OutputContext;

/// Renders domain types as human-readable terminal output using `OutputContext`.
pub struct HumanRenderer<'a> {
    ctx: &'a OutputContext,
}

impl<'a> HumanRenderer<'a> {
    #[must_use]
    pub fn new(ctx: &'a OutputContext) -> Self {
        Self { ctx }
    }

    pub fn render_version(&self, version: &str) {
        println!("rolesync {version}");
    }

    /// Render the doctor report, one section per category.
    pub fn render_checks(&self, checks: &SetupChecks, config: &LauncherConfig) {
        let ctx = self.ctx;
        ctx.blank();
        ctx.header("Role Sync Setup Check");
        ctx.blank();

        for category in Category::ALL {
            ctx.header(&format!("{}:", category.title()));
            self.render_category(checks, config, category);
            ctx.blank();
        }

        let passed = passed_count(checks);
        let total = Category::ALL.len();
        if passed == total {
            ctx.success(&format!("All checks passed ({passed}/{total})"));
            ctx.hint("Ready to launch: rolesync");
        } else {
            ctx.error(&format!("{passed}/{total} checks passed"));
            ctx.hint("Fix the problems above before launching the bot");
        }
        ctx.blank();
    }

    fn render_category(&self, checks: &SetupChecks, config: &LauncherConfig, category: Category) {
        let ctx = self.ctx;
        match category {
            Category::Runtime => {
                let rt = &checks.runtime;
                if let Some(venv) = &rt.virtualenv {
                    ctx.check(true, &format!("Virtual environment {venv}"));
                }
                if !rt.found {
                    ctx.check(false, &format!("'{}' could not be started", rt.interpreter));
                    return;
                }
                let version = rt.version.as_deref().unwrap_or("unknown version");
                if rt.version_ok {
                    ctx.check(true, &format!("{} ({version})", rt.interpreter));
                } else {
                    ctx.check(false, &format!("{} {version} is too old", rt.interpreter));
                    ctx.hint(&format!("{} or newer is required", rt.min_version));
                }
            }
            Category::Modules => {
                for m in &checks.modules {
                    let state = if m.installed { "installed" } else { "not installed" };
                    ctx.check(m.installed, &format!("{} {state}", m.name));
                }
                if !category_ok(checks, category) {
                    ctx.hint(&format!(
                        "Install with: pip install -r {}",
                        config.dependencies.requirements_file
                    ));
                }
            }
            Category::Directories => {
                for d in &checks.directories {
                    let state = if d.present { "exists" } else { "missing" };
                    ctx.check(d.present, &format!("{}/ {state}", d.path));
                }
                if !category_ok(checks, category) {
                    ctx.hint("Create them with: rolesync init");
                }
            }
            Category::Sources => {
                let e = &checks.entry_point;
                let state = if e.present { "found" } else { "not found" };
                ctx.check(e.present, &format!("{} {state}", e.path));

                let missing: Vec<_> = checks.source_files.iter().filter(|f| !f.present).collect();
                if missing.is_empty() {
                    if !checks.source_files.is_empty() {
                        let n = checks.source_files.len();
                        ctx.check(true, &format!("{n} bot modules found"));
                    }
                } else {
                    for f in missing {
                        ctx.check(false, &format!("{} not found", f.path));
                    }
                }
            }
            Category::EnvFile => {
                if self.render_file(&checks.env_file) {
                    if let Some(r) = &checks.env_file.report {
                        let var = &config.project.token_var;
                        match r.token {
                            TokenState::Set => ctx.check(true, &format!("{var} configured")),
                            TokenState::Missing => ctx.check(false, &format!("{var} is not set")),
                            TokenState::Placeholder => {
                                ctx.check(false, &format!("{var} still uses the template value"));
                            }
                        }
                        if let Some(e) = &r.parse_error {
                            ctx.check(false, &format!("cannot parse: {e}"));
                        }
                    }
                } else {
                    ctx.hint(&format!(
                        "Create it from the template: cp {} {}",
                        config.service.env_template, config.service.env_file
                    ));
                }
            }
            Category::Settings => {
                if self.render_file(&checks.settings) {
                    if let Some(r) = &checks.settings.report {
                        if let Some(id) = &r.main_server_id {
                            ctx.check(true, &format!("main_server_id {id}"));
                        }
                        for p in &r.problems {
                            ctx.check(false, p);
                        }
                    }
                }
            }
            Category::Mappings => {
                if self.render_file(&checks.mappings) {
                    if let Some(r) = &checks.mappings.report {
                        for p in &r.problems {
                            ctx.check(false, p);
                        }
                        for w in &r.warnings {
                            ctx.check_warn(w);
                        }
                        if r.problems.is_empty() && r.total > 0 {
                            ctx.check(true, &format!("{} mappings, {} enabled", r.total, r.enabled));
                        }
                    }
                }
            }
        }
    }

    /// Print presence and parse status. Returns `true` when the report is usable.
    fn render_file<R>(&self, check: &FileCheck<R>) -> bool {
        if !check.present {
            self.ctx.check(false, &format!("{} not found", check.path));
            return false;
        }
        if let Some(e) = &check.parse_error {
            self.ctx.check(false, &format!("{} cannot be parsed: {e}", check.path));
            return false;
        }
        self.ctx.check(true, &format!("{} found", check.path));
        true
    }

    /// Render the outcome of `init`.
    pub fn render_scaffold(&self, report: &ScaffoldReport) {
        let ctx = self.ctx;
        ctx.blank();
        if report.created.is_empty() && report.overwritten.is_empty() {
            ctx.success("Project already initialized");
        } else {
            let changed = report.created.len() + report.overwritten.len();
            ctx.success(&format!("Project initialized ({changed} paths written)"));
        }
        ctx.hint("Next: fill in your bot token, then run 'rolesync doctor'");
    }
}
