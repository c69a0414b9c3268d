//! Presentation-layer implementations of `ProgressReporter`.
//!
//! Application services emit progress events through the port; these types
//! decide how, or whether, the operator sees them.

use indicatif::ProgressBar;

use crate::application::ports::ProgressReporter;
use crate::output::{OutputContext, progress};

/// Line-per-event reporter over an `OutputContext`.
///
/// - `step()` prints `"  → {message}"`
/// - `success()` prints `"  ✓ {message}"`
/// - `warn()` prints `"  ⚠ {message}"`
///
/// All three are suppressed when `ctx.quiet`.
pub struct TerminalReporter<'a> {
    ctx: &'a OutputContext,
}

impl<'a> TerminalReporter<'a> {
    #[must_use]
    pub fn new(ctx: &'a OutputContext) -> Self {
        Self { ctx }
    }
}

impl ProgressReporter for TerminalReporter<'_> {
    fn step(&self, message: &str) {
        self.ctx.step(message);
    }

    fn success(&self, message: &str) {
        self.ctx.success(message);
    }

    fn warn(&self, message: &str) {
        self.ctx.warn(message);
    }
}

/// Single spinner whose message follows the latest step.
pub struct SpinnerReporter {
    pb: ProgressBar,
}

impl SpinnerReporter {
    #[must_use]
    pub fn new(message: &str) -> Self {
        Self {
            pb: progress::spinner(message),
        }
    }
}

impl ProgressReporter for SpinnerReporter {
    fn step(&self, message: &str) {
        self.pb.set_message(message.to_string());
    }

    fn success(&self, message: &str) {
        progress::finish_ok(&self.pb, message);
    }

    fn warn(&self, message: &str) {
        self.pb.println(format!("  ⚠ {message}"));
    }
}

/// Discards every event; used for `--json` and non-TTY runs.
pub struct SilentReporter;

impl ProgressReporter for SilentReporter {
    fn step(&self, _: &str) {}
    fn success(&self, _: &str) {}
    fn warn(&self, _: &str) {}
}
