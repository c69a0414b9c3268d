//! Output styles using owo-colors stylesheet pattern

use owo_colors::Style;

/// Centralized stylesheet for CLI output colors.
#[derive(Default, Clone)]
pub struct Styles {
    /// Passing checks (green)
    pub success: Style,
    /// Non-blocking findings (yellow)
    pub warning: Style,
    /// Failed checks and errors (red)
    pub error: Style,
    /// Progress steps (cyan)
    pub step: Style,
    /// Hints and secondary text
    pub dim: Style,
    /// Report headings
    pub header: Style,
}

impl Styles {
    /// Apply colors to the stylesheet.
    pub fn colorize(&mut self) {
        self.success = Style::new().green();
        self.warning = Style::new().yellow();
        self.error = Style::new().red();
        self.step = Style::new().cyan();
        self.dim = Style::new().dimmed();
        self.header = Style::new().bold().cyan();
    }
}
