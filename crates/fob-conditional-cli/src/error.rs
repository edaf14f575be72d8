//! Error types for `fob-cond`.
//!
//! Library errors convert into [`CliError`] via `#[from]`; `main` turns the
//! final error into a miette report with [`cli_error_to_miette`].

mod report;

pub use report::cli_error_to_miette;

use std::path::PathBuf;

use fob_conditional::{ConfigError, ResolveError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration could not be loaded
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Resolution of a specifier failed
    #[error(transparent)]
    Resolve(#[from] ResolveError),

    /// The conditions directory does not exist
    #[error("Conditions directory not found: {}", .0.display())]
    ConditionsNotFound(PathBuf),

    /// Some specifiers failed `check`
    #[error("{failed} of {total} specifiers are malformed")]
    CheckFailed { failed: usize, total: usize },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T, E = CliError> = std::result::Result<T, E>;
