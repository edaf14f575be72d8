//! Subscriber setup for resolver output.
//!
//! Only available with the `logging` feature. The resolver emits `tracing`
//! events under the `fob_conditional` target; the helpers here build filters
//! scoped to that target (plus any host targets, such as a CLI crate) and
//! install a compact stderr subscriber.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::{ConditionalConfig, ConfigError};

/// Target the resolver logs under.
pub const RESOLVER_TARGET: &str = "fob_conditional";

/// Log level for resolver output
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogLevel {
    /// No logging output
    Silent,
    Error,
    /// Warnings, including build expansions that found no variants
    #[default]
    Warn,
    Info,
    /// Condition imports, substitutions and every bundled variant
    Debug,
    /// Also specifiers passed through untouched
    Trace,
}

impl LogLevel {
    fn as_directive(&self) -> &'static str {
        match self {
            LogLevel::Silent => "off",
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }

    /// The level named by `log_level` in the configuration, if any.
    pub fn from_config(config: &ConditionalConfig) -> Result<Option<Self>, ConfigError> {
        config
            .log_level
            .as_deref()
            .map(|level| level.parse().map_err(ConfigError::InvalidValue))
            .transpose()
    }
}

impl std::str::FromStr for LogLevel {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "silent" | "off" => Ok(LogLevel::Silent),
            "error" => Ok(LogLevel::Error),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "info" => Ok(LogLevel::Info),
            "debug" => Ok(LogLevel::Debug),
            "trace" => Ok(LogLevel::Trace),
            other => Err(format!("log_level: unknown level '{}'", other)),
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_directive())
    }
}

/// Filter enabling `level` for the resolver and each of `extra_targets`.
///
/// Everything else stays off, so a host's dependencies do not leak into
/// resolver logs.
pub fn resolver_filter(level: LogLevel, extra_targets: &[&str]) -> EnvFilter {
    let directives: Vec<String> = std::iter::once(RESOLVER_TARGET)
        .chain(extra_targets.iter().copied())
        .map(|target| format!("{}={}", target, level.as_directive()))
        .collect();
    EnvFilter::new(directives.join(","))
}

/// `RUST_LOG` when it is set and valid, otherwise [`resolver_filter`].
pub fn env_or_resolver_filter(level: LogLevel, extra_targets: &[&str]) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| resolver_filter(level, extra_targets))
}

/// Install a compact stderr subscriber with `filter`.
///
/// Returns false when a global subscriber was already installed; the first
/// one stays in effect.
pub fn init_logging_with(filter: EnvFilter, ansi: bool) -> bool {
    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(true)
        .with_ansi(ansi)
        .compact();

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init()
        .is_ok()
}

/// Install a subscriber for resolver output at `level`, unless `RUST_LOG` says
/// otherwise.
///
/// # Example
///
/// ```rust,no_run
/// use fob_conditional::logging::{init_logging, LogLevel};
///
/// init_logging(LogLevel::Debug);
/// ```
pub fn init_logging(level: LogLevel) -> bool {
    init_logging_with(env_or_resolver_filter(level, &[]), true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_from_str() {
        assert_eq!("info".parse::<LogLevel>().unwrap(), LogLevel::Info);
        assert_eq!("TRACE".parse::<LogLevel>().unwrap(), LogLevel::Trace);
        assert_eq!("warning".parse::<LogLevel>().unwrap(), LogLevel::Warn);
        assert_eq!("off".parse::<LogLevel>().unwrap(), LogLevel::Silent);
        assert!("loud".parse::<LogLevel>().is_err());
    }

    #[test]
    fn test_level_from_config() {
        let mut config = ConditionalConfig::default();
        assert_eq!(LogLevel::from_config(&config).unwrap(), None);

        config.log_level = Some("debug".to_string());
        assert_eq!(LogLevel::from_config(&config).unwrap(), Some(LogLevel::Debug));

        config.log_level = Some("chatty".to_string());
        let err = LogLevel::from_config(&config).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue(ref msg) if msg.contains("chatty")));
    }

    #[test]
    fn test_filter_is_scoped_to_targets() {
        let filter = resolver_filter(LogLevel::Debug, &["fob_conditional_cli"]).to_string();
        assert!(filter.contains("fob_conditional=debug"));
        assert!(filter.contains("fob_conditional_cli=debug"));

        let filter = resolver_filter(LogLevel::Silent, &[]).to_string();
        assert!(filter.contains("fob_conditional=off"));
    }
}
