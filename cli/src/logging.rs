//! Diagnostic tracing for the launcher.
//!
//! Tracing records are operator diagnostics on stderr, separate from the
//! check marks printed through `OutputContext`.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Environment variable holding a filter directive for the launcher.
pub const LOG_ENV: &str = "ROLESYNC_LOG";

/// Default directive for a `-v` count.
#[must_use]
pub fn default_directive(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Install the global subscriber.
///
/// Reads `ROLESYNC_LOG`, then `RUST_LOG`, and falls back to the directive
/// for `verbosity`. Output: stderr, compact format.
pub fn init(verbosity: u8) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbosity)));

    // A second install (tests embedding the CLI) keeps the first subscriber.
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .compact(),
        )
        .try_init();
}
