//! # fob-conditional
//!
//! Conditional module specifiers for fob module loaders.
//!
//! A specifier can name a *condition module* whose export decides, at
//! resolution time, which module is actually loaded:
//!
//! | Specifier | Condition export | Resolves to |
//! |---|---|---|
//! | `jquery/#{browser}` | `browser.default = "chrome"` | `jquery/chrome` |
//! | `jquery#?browser.hasFoo` | `browser.hasFoo = true` | `jquery` |
//! | `jquery#?browser.hasFoo` | `browser.hasFoo = false` | `@empty` |
//! | `shim#?~features.fetch` | `features.fetch = true` | `@empty` |
//!
//! In a static build the condition cannot be evaluated yet, so every variant is
//! recorded in a [`BuildSession`] instead and the conditional specifier itself
//! resolves to `@empty`.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use fob_conditional::{ConditionalResolver, Host, ModuleLoader, Referrer};
//! use std::sync::Arc;
//!
//! # async fn example(loader: Arc<dyn ModuleLoader>) -> fob_conditional::Result<()> {
//! let resolver = ConditionalResolver::runtime(Host::new(loader));
//! let name = resolver.normalize("jquery/#{browser}", &Referrer::root()).await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Build mode
//!
//! ```rust,ignore
//! use fob_conditional::{BuildSession, ConditionalResolver, Host, ResolutionMode, VariantStrategy};
//! use std::sync::Arc;
//!
//! let session = Arc::new(BuildSession::new(VariantStrategy::DeclaredCases));
//! let resolver = ConditionalResolver::new(Host::new(loader), ResolutionMode::Build(session.clone()));
//! resolver.normalize("jquery/#{browser}", &Referrer::root()).await?;
//! for name in session.bundle() {
//!     println!("bundle: {}", name);
//! }
//! ```

pub mod build;
pub mod config;
pub mod error;
pub mod glob;
pub mod loader;
pub mod member;
pub mod parser;
pub mod resolver;

#[cfg(feature = "logging")]
pub mod logging;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

#[cfg(test)]
mod tests;

pub use build::{BuildSession, ExpandRequest, ResolutionMode, VariantStrategy};
pub use config::{ConditionalConfig, ConfigError};
pub use error::{ConditionType, ResolveError, Result};
#[cfg(not(target_family = "wasm"))]
pub use crate::glob::NativeGlob;
pub use crate::glob::{GlobFacility, GlobOptions};
pub use loader::{Host, LoadMetadata, LocateRequest, ModuleLoad, ModuleLoader, Referrer};
pub use member::read_member;
pub use parser::{ConditionKind, ConditionalExpression, is_conditional_module_name, parse};
pub use resolver::{ConditionalResolver, EMPTY_MODULE, substitute};
