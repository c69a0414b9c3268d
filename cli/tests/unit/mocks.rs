//! Shared mock infrastructure for unit tests.
//!
//! Provides a scripted [`CommandRunner`] that answers the version and
//! import checks and records every invocation, plus reporter and confirm
//! doubles.

#![allow(dead_code)]

use std::cell::RefCell;
use std::process::{ExitStatus, Output};

use anyhow::Result;
use rolesync_cli::application::ports::{CommandRunner, Confirm, Invocation, ProgressReporter};

use crate::helpers::{err_output, exit_status, ok_output};

/// How the runtime answers its version check.
#[derive(Clone)]
pub enum RuntimeCheck {
    /// Exits zero printing this banner.
    Banner(&'static str),
    /// Exits non-zero.
    Fails,
    /// Cannot be spawned at all.
    NotFound,
}

/// `CommandRunner` double for the launch and doctor services.
///
/// Invocations whose first argument is `--version` are version checks;
/// `-c "import X"` is an import check for `X`; everything else run through
/// `status` is the service.
pub struct ScriptedRunner {
    pub runtime: RuntimeCheck,
    pub missing_modules: Vec<String>,
    pub service_exit: i32,
    pub calls: RefCell<Vec<Invocation>>,
}

impl ScriptedRunner {
    /// Healthy interpreter, every module installed, service exits zero.
    pub fn healthy() -> Self {
        Self {
            runtime: RuntimeCheck::Banner("Python 3.12.1"),
            missing_modules: Vec::new(),
            service_exit: 0,
            calls: RefCell::new(Vec::new()),
        }
    }

    pub fn with_runtime(mut self, runtime: RuntimeCheck) -> Self {
        self.runtime = runtime;
        self
    }

    pub fn missing(mut self, module: &str) -> Self {
        self.missing_modules.push(module.to_string());
        self
    }

    pub fn service_exit(mut self, code: i32) -> Self {
        self.service_exit = code;
        self
    }

    /// Invocations passed to `status`, i.e. service launches.
    pub fn service_calls(&self) -> Vec<Invocation> {
        self.calls
            .borrow()
            .iter()
            .filter(|i| !is_check(i))
            .cloned()
            .collect()
    }

    pub fn check_count(&self) -> usize {
        self.calls.borrow().iter().filter(|i| is_check(i)).count()
    }
}

fn is_check(inv: &Invocation) -> bool {
    matches!(inv.args.first().map(String::as_str), Some("--version" | "-c"))
}

impl CommandRunner for ScriptedRunner {
    async fn output(&self, invocation: &Invocation) -> Result<Output> {
        self.calls.borrow_mut().push(invocation.clone());
        if let RuntimeCheck::NotFound = self.runtime {
            anyhow::bail!("No such file or directory (os error 2)");
        }
        match invocation.args.first().map(String::as_str) {
            Some("--version") => match self.runtime {
                RuntimeCheck::Banner(b) => Ok(ok_output(b.as_bytes())),
                _ => Ok(err_output(1, b"")),
            },
            Some("-c") => {
                let module = invocation
                    .args
                    .get(1)
                    .and_then(|a| a.strip_prefix("import "))
                    .unwrap_or_default();
                if self.missing_modules.iter().any(|m| m == module) {
                    Ok(err_output(
                        1,
                        format!("ModuleNotFoundError: No module named '{module}'").as_bytes(),
                    ))
                } else {
                    Ok(ok_output(b""))
                }
            }
            _ => anyhow::bail!("unexpected check: {}", invocation.display()),
        }
    }

    async fn status(&self, invocation: &Invocation) -> Result<ExitStatus> {
        self.calls.borrow_mut().push(invocation.clone());
        Ok(exit_status(self.service_exit))
    }
}

/// Records every reporter event as `kind: message`.
#[derive(Default)]
pub struct RecordingReporter {
    pub events: RefCell<Vec<String>>,
}

impl RecordingReporter {
    pub fn contains(&self, needle: &str) -> bool {
        self.events.borrow().iter().any(|e| e.contains(needle))
    }
}

impl ProgressReporter for RecordingReporter {
    fn step(&self, message: &str) {
        self.events.borrow_mut().push(format!("step: {message}"));
    }
    fn success(&self, message: &str) {
        self.events.borrow_mut().push(format!("success: {message}"));
    }
    fn warn(&self, message: &str) {
        self.events.borrow_mut().push(format!("warn: {message}"));
    }
}

/// Answers every prompt with a fixed value and counts the prompts.
pub struct FixedConfirm {
    pub answer: bool,
    pub prompts: RefCell<Vec<String>>,
}

impl FixedConfirm {
    pub fn yes() -> Self {
        Self {
            answer: true,
            prompts: RefCell::new(Vec::new()),
        }
    }

    pub fn no() -> Self {
        Self {
            answer: false,
            prompts: RefCell::new(Vec::new()),
        }
    }
}

impl Confirm for FixedConfirm {
    fn confirm(&self, prompt: &str, _default: bool) -> Result<bool> {
        self.prompts.borrow_mut().push(prompt.to_string());
        Ok(self.answer)
    }
}
