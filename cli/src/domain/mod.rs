//! Domain layer: pure business logic, types, and validation.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `tokio`, `std::fs`, `std::process`, or `std::net`.
//! All functions are synchronous and take data in, returning data out.

pub mod config;
pub mod error;
pub mod health;
pub mod project;
pub mod runtime;

pub use config::LauncherConfig;
pub use error::{ConfigError, PreflightError};
pub use health::{SetupChecks, collect_issues, collect_warnings};
pub use runtime::VirtualEnv;
