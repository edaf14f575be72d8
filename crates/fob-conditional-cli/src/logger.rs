//! Logging setup for `fob-cond`.
//!
//! Log output goes to stderr so resolved names on stdout stay pipeable. The
//! subscriber itself comes from `fob_conditional::logging`; this module only
//! decides the level from the global flags and configuration.

use fob_conditional::logging::{self, LogLevel};
use tracing_subscriber::EnvFilter;

/// Targets logged alongside the resolver's own.
const CLI_TARGETS: &[&str] = &["fob_conditional_cli"];

/// Initialize the tracing subscriber.
///
/// Level precedence: `--verbose`, then `--quiet`, then `RUST_LOG`, then the
/// `log_level` from configuration, then warnings only.
pub fn init_logger(verbose: bool, quiet: bool, no_color: bool, config_level: Option<LogLevel>) {
    // A second init (tests) keeps the first subscriber
    logging::init_logging_with(build_filter(verbose, quiet, config_level), !no_color);
}

fn build_filter(verbose: bool, quiet: bool, config_level: Option<LogLevel>) -> EnvFilter {
    if verbose {
        logging::resolver_filter(LogLevel::Debug, CLI_TARGETS)
    } else if quiet {
        logging::resolver_filter(LogLevel::Error, CLI_TARGETS)
    } else {
        logging::env_or_resolver_filter(config_level.unwrap_or_default(), CLI_TARGETS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn test_verbose_wins_over_config() {
        let filter = build_filter(true, false, Some(LogLevel::Error));
        assert!(filter.to_string().contains("fob_conditional=debug"));
    }

    #[test]
    #[serial]
    fn test_config_level_used_without_rust_log() {
        unsafe {
            std::env::remove_var("RUST_LOG");
        }
        let filter = build_filter(false, false, Some(LogLevel::Trace)).to_string();
        assert!(filter.contains("fob_conditional=trace"));
        assert!(filter.contains("fob_conditional_cli=trace"));
    }

    #[test]
    #[serial]
    fn test_default_is_warn() {
        unsafe {
            std::env::remove_var("RUST_LOG");
        }
        let filter = build_filter(false, false, None);
        assert!(filter.to_string().contains("fob_conditional=warn"));
    }

    #[test]
    fn test_quiet() {
        let filter = build_filter(false, true, None);
        assert!(filter.to_string().contains("fob_conditional=error"));
    }
}
