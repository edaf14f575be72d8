//! Command-line interface definition for `fob-cond`.
//!
//! - `fob-cond resolve` - resolve specifiers against a conditions directory
//! - `fob-cond check` - parse specifiers without resolving them


use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use fob_conditional::VariantStrategy;

/// fob-cond - conditional module specifiers
#[derive(Parser, Debug)]
#[command(
    name = "fob-cond",
    version,
    about = "Resolve conditional module specifiers",
    long_about = "Resolves module specifiers carrying #{condition} or #?condition tokens.\n\
                  At runtime a conditional resolves to one module; in a build every\n\
                  variant it could select is listed for bundling."
)]
pub struct Cli {
    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Path to a configuration file (default: ./fob-conditional.json)
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Resolve specifiers against a directory of condition modules
    ///
    /// A condition module `browser` is read from `<DIR>/browser.json`. Its JSON
    /// value is the module's exports.
    Resolve(ResolveArgs),

    /// Parse specifiers and report their conditional tokens
    Check(CheckArgs),
}

#[derive(Args, Debug, Clone)]
pub struct ResolveArgs {
    /// Specifiers to resolve, e.g. 'jquery/#{browser}'
    #[arg(required = true, value_name = "SPECIFIER")]
    pub specifiers: Vec<String>,

    /// Directory holding condition modules as <name>.json
    #[arg(short = 'd', long, value_name = "DIR", default_value = ".")]
    pub conditions: PathBuf,

    /// Expand every variant for a static build instead of resolving one
    #[arg(short, long)]
    pub build: bool,

    /// How build mode discovers substitution variants
    #[arg(short, long, value_enum)]
    pub strategy: Option<Strategy>,

    /// Print results as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug, Clone)]
pub struct CheckArgs {
    /// Specifiers to parse
    #[arg(required = true, value_name = "SPECIFIER")]
    pub specifiers: Vec<String>,
}

/// Variant discovery strategy
#[derive(Copy, Clone, PartialEq, Eq, Debug, ValueEnum)]
pub enum Strategy {
    /// Use the `cases` list exported by the condition module
    #[value(name = "cases")]
    Cases,

    /// List the files where the token stands in the path
    #[value(name = "filesystem", alias = "fs")]
    Filesystem,
}

impl From<Strategy> for VariantStrategy {
    fn from(strategy: Strategy) -> Self {
        match strategy {
            Strategy::Cases => VariantStrategy::DeclaredCases,
            Strategy::Filesystem => VariantStrategy::FilesystemDiscovery,
        }
    }
}
