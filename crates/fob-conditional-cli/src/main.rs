//! fob-cond - resolve conditional module specifiers from the command line.
//!
//! Parses arguments, loads configuration, initializes logging and dispatches
//! to the selected command.

use clap::Parser;
use fob_conditional::ConditionalConfig;
use fob_conditional::logging::LogLevel;
use fob_conditional_cli::{cli, commands, error, logger, ui};
use miette::Result;

#[tokio::main]
async fn main() -> Result<()> {
    let args = cli::Cli::parse();

    // Config is loaded first so its log level can seed the subscriber
    let config = ConditionalConfig::load(args.config.as_deref())
        .map_err(|e| error::cli_error_to_miette(e.into()))?;

    let log_level =
        LogLevel::from_config(&config).map_err(|e| error::cli_error_to_miette(e.into()))?;
    logger::init_logger(args.verbose, args.quiet, args.no_color, log_level);
    ui::init_colors(args.no_color);

    let result = match args.command {
        cli::Command::Resolve(resolve_args) => {
            commands::resolve_execute(resolve_args, config).await
        }
        cli::Command::Check(check_args) => commands::check_execute(check_args),
    };

    result.map_err(error::cli_error_to_miette)
}
