//! Command-line front end for `fob-conditional`.
//!
//! `fob-cond` resolves conditional specifiers against a directory of condition
//! modules, either to one module (runtime) or to the full set of variants a
//! static build must carry.
//!
//! - [`cli`] - argument definitions (clap)
//! - [`commands`] - `resolve` and `check`
//! - [`host`] - the directory-backed module loader
//! - [`error`] - `CliError` and miette conversion
//! - [`logger`] - tracing subscriber setup
//! - [`ui`] - status messages

pub mod cli;
pub mod commands;
pub mod error;
pub mod host;
pub mod logger;
pub mod ui;

pub use error::{CliError, Result};
pub use host::DirectoryLoader;
