//! Port trait definitions for the Application layer.
//!
//! Ports are the interfaces (contracts) that infrastructure must fulfill.
//! This file imports only from `crate::domain`; never from `crate::infra`,
//! `crate::commands`, or `crate::output`.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::{ExitStatus, Output};

use anyhow::Result;

use crate::domain::LauncherConfig;

// ── Value Types ───────────────────────────────────────────────────────────────

/// A fully resolved child process: program, arguments, environment overlay
/// and working directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: PathBuf,
    pub args: Vec<String>,
    /// Variables set on top of the inherited environment.
    pub envs: Vec<(String, OsString)>,
    pub cwd: Option<PathBuf>,
}

impl Invocation {
    #[must_use]
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            envs: Vec::new(),
            cwd: None,
        }
    }

    #[must_use]
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    #[must_use]
    pub fn envs(mut self, envs: &[(String, OsString)]) -> Self {
        self.envs.extend_from_slice(envs);
        self
    }

    #[must_use]
    pub fn cwd(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cwd = Some(dir.into());
        self
    }

    /// `program arg1 arg2`, for messages and logs.
    #[must_use]
    pub fn display(&self) -> String {
        std::iter::once(self.program.display().to_string())
            .chain(self.args.iter().cloned())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

// ── Command Runner Port ───────────────────────────────────────────────────────

/// Abstracts process execution so infrastructure can be swapped or mocked.
#[allow(async_fn_in_trait)]
pub trait CommandRunner {
    /// Run a short-lived check and capture its output.
    ///
    /// # Errors
    ///
    /// Returns an error if the program cannot be spawned or exceeds the
    /// runner's timeout.
    async fn output(&self, invocation: &Invocation) -> Result<Output>;

    /// Run a program with inherited stdio until it exits.
    ///
    /// Operator interrupts do not end the wait; the child decides how to
    /// handle them.
    ///
    /// # Errors
    ///
    /// Returns an error if the program cannot be spawned or awaited.
    async fn status(&self, invocation: &Invocation) -> Result<ExitStatus>;
}

// ── Project Filesystem Port ───────────────────────────────────────────────────

/// Access to files under the project directory. All paths are relative to
/// [`ProjectFs::root`].
pub trait ProjectFs {
    /// Absolute or caller-relative project directory.
    fn root(&self) -> &Path;

    /// Resolve `rel` against the project directory.
    fn resolve(&self, rel: &Path) -> PathBuf {
        self.root().join(rel)
    }

    fn exists(&self, rel: &Path) -> bool;
    fn is_dir(&self, rel: &Path) -> bool;

    /// # Errors
    ///
    /// Returns an error if the file cannot be read as UTF-8.
    fn read_to_string(&self, rel: &Path) -> Result<String>;

    /// Write `contents`, creating parent directories.
    ///
    /// # Errors
    ///
    /// Returns an error if the file or its parents cannot be written.
    fn write(&self, rel: &Path, contents: &str) -> Result<()>;

    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    fn create_dir_all(&self, rel: &Path) -> Result<()>;
}

// ── Config Store Port ─────────────────────────────────────────────────────────

/// Loads `launcher.yaml`.
pub trait ConfigStore {
    /// Load and validate; a missing file yields defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read, parsed or
    /// validated.
    fn load(&self) -> Result<LauncherConfig>;

    /// Path the configuration is read from.
    fn path(&self) -> PathBuf;
}

// ── Progress Reporter Port ────────────────────────────────────────────────────

/// Receives progress events from application services.
pub trait ProgressReporter {
    fn step(&self, message: &str);
    fn success(&self, message: &str);
    fn warn(&self, message: &str);
}

/// Confirms destructive actions with the operator.
pub trait Confirm {
    /// # Errors
    ///
    /// Returns an error if no answer can be obtained.
    fn confirm(&self, prompt: &str, default: bool) -> Result<bool>;
}
