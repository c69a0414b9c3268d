//! Interpreter resolution shared by the launch and doctor use-cases.

use std::ffi::{OsStr, OsString};
use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::application::ports::{Invocation, ProjectFs};
use crate::domain::config::RuntimeConfig;
use crate::domain::runtime::VirtualEnv;

/// Interpreter plus the environment overlay every child receives.
#[derive(Debug, Clone)]
pub struct ResolvedRuntime {
    pub interpreter: PathBuf,
    /// Applied virtual environment, if its activation marker exists.
    pub virtualenv: Option<VirtualEnv>,
    pub envs: Vec<(String, OsString)>,
    pub cwd: PathBuf,
}

impl ResolvedRuntime {
    /// Build an invocation of the interpreter with `args`.
    #[must_use]
    pub fn invocation<I, S>(&self, args: I) -> Invocation
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Invocation::new(&self.interpreter)
            .args(args)
            .envs(&self.envs)
            .cwd(&self.cwd)
    }
}

/// Apply the virtual environment, if present, and pick the interpreter.
///
/// `inherited_path` is the launcher's own `PATH`; the environment's
/// executable directory is prepended to it.
///
/// # Errors
///
/// Returns an error if the virtual environment path cannot be joined into
/// `PATH` (it contains the platform's path separator).
pub fn resolve_runtime(
    fs: &impl ProjectFs,
    runtime: &RuntimeConfig,
    inherited_path: Option<&OsStr>,
) -> Result<ResolvedRuntime> {
    let rel = VirtualEnv::new(&runtime.venv_dir);
    let mut envs = Vec::new();
    let mut interpreter = PathBuf::from(&runtime.interpreter);
    let mut virtualenv = None;

    if fs.exists(&rel.marker()) {
        let venv = VirtualEnv::new(fs.resolve(&rel.root));
        let bin = venv.bin_dir();
        let path = std::env::join_paths(
            std::iter::once(bin.clone()).chain(
                inherited_path
                    .map(|p| std::env::split_paths(p).collect::<Vec<_>>())
                    .unwrap_or_default(),
            ),
        )
        .with_context(|| format!("cannot add {} to PATH", bin.display()))?;

        envs.push(("VIRTUAL_ENV".to_string(), venv.root.clone().into_os_string()));
        envs.push(("PATH".to_string(), path));

        if let Some(candidate) = rel
            .interpreter_path(&runtime.interpreter)
            .filter(|c| fs.exists(c))
        {
            interpreter = fs.resolve(&candidate);
        }
        tracing::debug!(venv = %venv.root.display(), interpreter = %interpreter.display(), "virtual environment applied");
        virtualenv = Some(venv);
    }

    Ok(ResolvedRuntime {
        interpreter,
        virtualenv,
        envs,
        cwd: fs.root().to_path_buf(),
    })
}
