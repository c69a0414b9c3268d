//! Interpreter and virtual-environment rules.
//!
//! Pure functions only. Paths are computed here; whether they exist is
//! decided by the caller.

use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;

static VERSION_RE: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::expect_used)] // compile-time constant pattern
    Regex::new(r"(\d+)\.(\d+)(?:\.(\d+))?").expect("valid version regex")
});

/// Extract the first `MAJOR.MINOR[.PATCH]` in `text`.
///
/// Pre-release suffixes are dropped, so `Python 3.13.0rc2` yields `3.13.0`.
#[must_use]
pub fn parse_version(text: &str) -> Option<semver::Version> {
    let caps = VERSION_RE.captures(text)?;
    let major = caps.get(1)?.as_str().parse().ok()?;
    let minor = caps.get(2)?.as_str().parse().ok()?;
    let patch = caps
        .get(3)
        .map_or(Some(0), |m| m.as_str().parse().ok())?;
    Some(semver::Version::new(major, minor, patch))
}

/// Whether a reported version satisfies `minimum`.
///
/// Unparseable output is accepted: an interpreter that runs but prints an
/// unexpected banner is not treated as too old.
#[must_use]
pub fn version_ok(reported: Option<&semver::Version>, minimum: &semver::Version) -> bool {
    reported.is_none_or(|v| v >= minimum)
}

/// Human description of a child's exit, e.g. `exit code 2`.
#[must_use]
pub fn describe_exit(code: Option<i32>) -> String {
    match code {
        Some(code) => format!("exit code {code}"),
        None => "terminated by signal".to_string(),
    }
}

// ── Virtual environment layout ────────────────────────────────────────────────

#[cfg(windows)]
const BIN_DIR: &str = "Scripts";
#[cfg(not(windows))]
const BIN_DIR: &str = "bin";

#[cfg(windows)]
const ACTIVATE_MARKER: &str = "activate.bat";
#[cfg(not(windows))]
const ACTIVATE_MARKER: &str = "activate";

/// Paths inside a virtual environment rooted at `root`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VirtualEnv {
    pub root: PathBuf,
}

impl VirtualEnv {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Directory holding the environment's executables.
    #[must_use]
    pub fn bin_dir(&self) -> PathBuf {
        self.root.join(BIN_DIR)
    }

    /// Activation script whose presence marks the environment as usable.
    #[must_use]
    pub fn marker(&self) -> PathBuf {
        self.bin_dir().join(ACTIVATE_MARKER)
    }

    /// Location of `interpreter` inside the environment.
    ///
    /// Absolute or multi-component interpreter paths never resolve into the
    /// environment and return `None`.
    #[must_use]
    pub fn interpreter_path(&self, interpreter: &str) -> Option<PathBuf> {
        let name = Path::new(interpreter);
        if name.components().count() != 1 {
            return None;
        }
        let mut path = self.bin_dir().join(name);
        if cfg!(windows) && path.extension().is_none() {
            path.set_extension("exe");
        }
        Some(path)
    }
}

// ── Unit tests ────────────────────────────────────────────────────────────────
