//! Build-time variant expansion.
//!
//! During a static build the value of a condition is not known yet: the bundle
//! has to carry every module a conditional specifier could select. Instead of
//! resolving `jquery/#{browser}` to one module, the expander records all of its
//! variants in the [`BuildSession`] bundle set and resolves the specifier itself
//! to the `@empty` sentinel.
//!
//! Two strategies discover substitution variants:
//!
//! - [`VariantStrategy::DeclaredCases`] (default): the condition module lists its
//!   possible values, e.g. `{ "default": "chrome", "cases": ["chrome", "ie"] }`.
//! - [`VariantStrategy::FilesystemDiscovery`]: for path-shaped conditionals such
//!   as `pkg/#{browser}`, the files next to the token are the variants. Needs a
//!   [`GlobFacility`](crate::GlobFacility).
//!
//! Boolean tokens have exactly one variant, the specifier without its token.

mod cases;
mod filesystem;
mod session;

pub use session::BuildSession;

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::error::Result;
use crate::loader::{ModuleLoader, Referrer};
use crate::parser::{ConditionKind, ConditionalExpression, is_conditional_module_name};

/// How substitution variants are discovered during a build.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum VariantStrategy {
    /// Read the `cases` list exported by the condition module
    #[default]
    #[serde(rename = "cases")]
    DeclaredCases,
    /// List the files in the directory the token stands for
    #[serde(rename = "filesystem")]
    FilesystemDiscovery,
}

impl std::str::FromStr for VariantStrategy {
    type Err = String;
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "cases" => Ok(VariantStrategy::DeclaredCases),
            "filesystem" | "fs" => Ok(VariantStrategy::FilesystemDiscovery),
            other => Err(format!("Invalid variant strategy: {}", other)),
        }
    }
}

impl std::fmt::Display for VariantStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VariantStrategy::DeclaredCases => write!(f, "cases"),
            VariantStrategy::FilesystemDiscovery => write!(f, "filesystem"),
        }
    }
}

/// Whether conditionals resolve to one module or expand into a bundle set.
#[derive(Debug, Clone, Default)]
pub enum ResolutionMode {
    /// Resolve each conditional to exactly one module
    #[default]
    Runtime,
    /// Record every variant in the session and resolve to `@empty`
    Build(Arc<BuildSession>),
}

impl ResolutionMode {
    /// Select the mode from a loader environment name such as `"build"` or
    /// `"build-development"`. Any name starting with `build` is a build run.
    pub fn from_env(env: &str, session: impl FnOnce() -> BuildSession) -> Self {
        if is_build_env(env) {
            ResolutionMode::Build(Arc::new(session()))
        } else {
            ResolutionMode::Runtime
        }
    }

    pub fn is_build(&self) -> bool {
        matches!(self, ResolutionMode::Build(_))
    }

    pub fn session(&self) -> Option<&Arc<BuildSession>> {
        match self {
            ResolutionMode::Build(session) => Some(session),
            ResolutionMode::Runtime => None,
        }
    }
}

pub fn is_build_env(env: &str) -> bool {
    env.starts_with("build")
}

/// Normalize one substitution variant through the wrapped entry point.
///
/// A variant that still carries a token is expanded by that normalization and
/// resolves to the sentinel; it yields `None` so only concrete names are
/// bundled.
async fn normalize_variant(
    entry: &dyn ModuleLoader,
    variant: String,
    referrer: &Referrer,
) -> Result<Option<String>> {
    let nested = is_conditional_module_name(&variant);
    let normalized = entry.normalize(&variant, referrer).await?;
    Ok((!nested).then_some(normalized))
}

/// One conditional specifier to expand.
#[derive(Debug, Clone, Copy)]
pub struct ExpandRequest<'a> {
    pub expr: &'a ConditionalExpression,
    /// Exports of the condition module
    pub exports: &'a Value,
    /// The specifier the expression was parsed from
    pub specifier: &'a str,
    pub referrer: &'a Referrer,
}

impl BuildSession {
    /// Record every variant of `request` in the bundle set.
    ///
    /// `entry` is the wrapped resolution entry point variants are normalized
    /// through; `host` is the underlying loader used for directory lookups.
    pub async fn expand(
        &self,
        request: ExpandRequest<'_>,
        entry: &dyn ModuleLoader,
        host: &dyn ModuleLoader,
    ) -> Result<()> {
        match request.expr.kind {
            ConditionKind::Boolean => {
                // Either branch may be taken once the bundle runs
                let stripped = request.expr.strip_token(request.specifier);
                if self.insert(stripped.clone()) {
                    debug!("Bundled boolean variant {}", stripped);
                }
                Ok(())
            }
            ConditionKind::Substitution => match self.strategy() {
                VariantStrategy::DeclaredCases => cases::expand(self, request, entry).await,
                VariantStrategy::FilesystemDiscovery => {
                    filesystem::expand(self, request, entry, host).await
                }
            },
        }
    }

    /// Insert normalized variants in order, logging the new ones.
    fn insert_variants(&self, token: &str, variants: impl IntoIterator<Item = String>) {
        for variant in variants {
            if self.insert(variant.clone()) {
                debug!("Bundled variant {} for {}", variant, token);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_env_prefix() {
        assert!(is_build_env("build"));
        assert!(is_build_env("build-production"));
        assert!(!is_build_env("development"));
        assert!(!is_build_env(""));
        assert!(!is_build_env("rebuild"));
    }

    #[test]
    fn test_mode_from_env() {
        let mode = ResolutionMode::from_env("build-development", || {
            BuildSession::new(VariantStrategy::DeclaredCases)
        });
        assert!(mode.is_build());
        assert!(mode.session().is_some());

        let mode = ResolutionMode::from_env("production", || {
            panic!("no session for runtime mode")
        });
        assert!(!mode.is_build());
    }

    #[test]
    fn test_strategy_parse_and_display() {
        assert_eq!("cases".parse::<VariantStrategy>().unwrap(), VariantStrategy::DeclaredCases);
        assert_eq!(
            "filesystem".parse::<VariantStrategy>().unwrap(),
            VariantStrategy::FilesystemDiscovery
        );
        assert_eq!("FS".parse::<VariantStrategy>().unwrap(), VariantStrategy::FilesystemDiscovery);
        assert!("glob".parse::<VariantStrategy>().is_err());
        assert_eq!(VariantStrategy::FilesystemDiscovery.to_string(), "filesystem");
    }

    #[test]
    fn test_strategy_serde_names() {
        let json = serde_json::to_string(&VariantStrategy::DeclaredCases).unwrap();
        assert_eq!(json, "\"cases\"");
        let parsed: VariantStrategy = serde_json::from_str("\"filesystem\"").unwrap();
        assert_eq!(parsed, VariantStrategy::FilesystemDiscovery);
    }
}
