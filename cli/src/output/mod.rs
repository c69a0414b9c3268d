//! Output formatting module
//!
//! Launcher status lines go to stderr so the service's own stdout, which is
//! inherited, stays uninterleaved with ours when redirected.

pub mod human;
pub mod json;
pub mod progress;
pub mod reporter;
pub mod styles;

use console::Term;
use owo_colors::OwoColorize as _;

pub use human::HumanRenderer;
pub use json::JsonRenderer;
pub use reporter::TerminalReporter;
pub use styles::Styles;

/// Output context carrying styling and terminal state.
pub struct OutputContext {
    /// Stylesheet for colored output.
    pub styles: Styles,
    /// Whether stderr is a TTY.
    pub is_tty: bool,
    /// Whether to suppress non-error output.
    pub quiet: bool,
}

impl OutputContext {
    /// Create output context based on CLI flags and environment.
    #[must_use]
    pub fn new(no_color: bool, quiet: bool) -> Self {
        let is_tty = Term::stderr().is_term();
        let use_colors = !no_color && is_tty && std::env::var("NO_COLOR").is_err();

        let mut styles = Styles::default();
        if use_colors {
            styles.colorize();
        }

        Self {
            styles,
            is_tty,
            quiet,
        }
    }

    /// Check if progress indicators should be shown.
    #[must_use]
    pub fn show_progress(&self) -> bool {
        self.is_tty && !self.quiet
    }

    /// `✓ msg`. Suppressed when `quiet`.
    pub fn success(&self, msg: &str) {
        if !self.quiet {
            eprintln!("  {} {msg}", "✓".style(self.styles.success));
        }
    }

    /// `⚠ msg`. Suppressed when `quiet`.
    pub fn warn(&self, msg: &str) {
        if !self.quiet {
            eprintln!("  {} {msg}", "⚠".style(self.styles.warning));
        }
    }

    /// `✗ msg`. Never suppressed.
    pub fn error(&self, msg: &str) {
        eprintln!("  {} {msg}", "✗".style(self.styles.error));
    }

    /// `→ msg`. Suppressed when `quiet`.
    pub fn step(&self, msg: &str) {
        if !self.quiet {
            eprintln!("  {} {msg}", "→".style(self.styles.step));
        }
    }

    /// Indented hint under a check line. Suppressed when `quiet`.
    pub fn hint(&self, msg: &str) {
        if !self.quiet {
            eprintln!("      {}", msg.style(self.styles.dim));
        }
    }

    /// Section header. Suppressed when `quiet`.
    pub fn header(&self, msg: &str) {
        if !self.quiet {
            eprintln!("  {}", msg.style(self.styles.header));
        }
    }

    /// Nested check line: `✓`/`✗` depending on `ok`. Suppressed when `quiet`.
    pub fn check(&self, ok: bool, msg: &str) {
        if self.quiet {
            return;
        }
        if ok {
            eprintln!("    {} {msg}", "✓".style(self.styles.success));
        } else {
            eprintln!("    {} {msg}", "✗".style(self.styles.error));
        }
    }

    /// Nested warning line. Suppressed when `quiet`.
    pub fn check_warn(&self, msg: &str) {
        if !self.quiet {
            eprintln!("    {} {msg}", "⚠".style(self.styles.warning));
        }
    }

    /// Blank separator line. Suppressed when `quiet`.
    pub fn blank(&self) {
        if !self.quiet {
            eprintln!();
        }
    }
}

/// Human or JSON rendering, chosen once from `--json`.
pub enum Renderer<'a> {
    Human(HumanRenderer<'a>),
    Json(JsonRenderer),
}
