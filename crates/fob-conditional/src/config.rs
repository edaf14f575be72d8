//! Configuration for conditional resolution.
//!
//! Loaded with figment from, in increasing priority: defaults, a JSON file
//! (`fob-conditional.json` in the working directory unless a path is given),
//! and `FOB_CONDITIONAL_*` environment variables.

use std::path::Path;
use std::sync::Arc;

use figment::{
    Figment,
    providers::{Env, Format as _, Json, Serialized},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::build::{BuildSession, ResolutionMode, VariantStrategy};
use crate::glob::GlobFacility;

/// Default configuration file name.
pub const CONFIG_FILE: &str = "fob-conditional.json";

/// Environment variable prefix.
pub const ENV_PREFIX: &str = "FOB_CONDITIONAL_";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid config value: {0}")]
    InvalidValue(String),

    #[error("config not found: {}", .0.display())]
    NotFound(std::path::PathBuf),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConditionalConfig {
    /// Loader environment; names starting with `build` select build mode
    #[serde(default)]
    pub env: Option<String>,

    /// How build mode discovers substitution variants
    #[serde(default)]
    pub strategy: VariantStrategy,

    #[serde(default)]
    pub log_level: Option<String>,
}

impl ConditionalConfig {
    /// Load configuration from defaults, the config file and the environment.
    pub fn load(config_path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut figment = Figment::new().merge(Serialized::defaults(Self::default()));

        match config_path {
            Some(path) if !path.exists() => {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Some(path) => figment = figment.merge(Json::file(path)),
            None => {
                let default_path = Path::new(CONFIG_FILE);
                if default_path.exists() {
                    figment = figment.merge(Json::file(default_path));
                }
            }
        }

        figment = figment.merge(Env::prefixed(ENV_PREFIX));

        figment
            .extract()
            .map_err(|e| ConfigError::InvalidValue(e.to_string()))
    }

    pub fn is_build(&self) -> bool {
        self.env.as_deref().is_some_and(crate::build::is_build_env)
    }

    /// Select the resolution mode once for this configuration.
    ///
    /// `glob` is attached to the build session when present; it is only used by
    /// the filesystem strategy.
    pub fn mode(&self, glob: Option<Arc<dyn GlobFacility>>) -> ResolutionMode {
        let env = self.env.as_deref().unwrap_or_default();
        ResolutionMode::from_env(env, || {
            let session = BuildSession::new(self.strategy);
            match glob {
                Some(glob) => session.with_glob(glob),
                None => session,
            }
        })
    }
}
