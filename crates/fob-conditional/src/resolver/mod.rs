//! The conditional resolver.
//!
//! `ConditionalResolver` wraps a host loader and intercepts `normalize`:
//!
//! ```text
//! specifier ──▶ parse ──▶ no token ──────────────────────────▶ host.normalize
//!                  │
//!                  └─▶ import condition module (+ include in build)
//!                          │
//!                          ├─ Runtime: substitute ──▶ concrete name ─┐
//!                          └─ Build:   expand into bundle ▶ @empty ──┤
//!                                                                    ▼
//!                                                    ConditionalResolver::normalize
//! ```
//!
//! The final specifier re-enters the wrapped entry point, so a specifier with
//! several tokens is resolved one token at a time and any further loader
//! conventions still apply to the result.

mod condition;
mod substitute;

pub use substitute::substitute;

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, trace};

use crate::build::{ExpandRequest, ResolutionMode};
use crate::error::Result;
use crate::loader::{Host, LocateRequest, ModuleLoad, ModuleLoader, Referrer};
use crate::member::read_member;
use crate::parser::{self, ConditionalExpression};

/// Reserved specifier that resolves to an empty module.
pub const EMPTY_MODULE: &str = "@empty";

/// Module loader decorator that understands conditional specifiers.
///
/// # Example
///
/// ```rust,ignore
/// use fob_conditional::{ConditionalResolver, Host, ModuleLoader, Referrer, ResolutionMode};
/// use std::sync::Arc;
///
/// let resolver = ConditionalResolver::new(Host::new(Arc::new(my_loader)), ResolutionMode::Runtime);
/// let name = resolver.normalize("jquery/#{browser}", &Referrer::root()).await?;
/// ```
#[derive(Debug, Clone)]
pub struct ConditionalResolver {
    host: Host,
    mode: ResolutionMode,
}

impl ConditionalResolver {
    pub fn new(host: Host, mode: ResolutionMode) -> Self {
        Self { host, mode }
    }

    pub fn runtime(host: Host) -> Self {
        Self::new(host, ResolutionMode::Runtime)
    }

    pub fn host(&self) -> &Host {
        &self.host
    }

    pub fn mode(&self) -> &ResolutionMode {
        &self.mode
    }

    /// Import the condition module of `expr` through the plugin-aware view and
    /// return its exports.
    ///
    /// The module's load record is marked `include_in_build` before this
    /// returns, in both modes.
    pub async fn resolve_condition(
        &self,
        expr: &ConditionalExpression,
        referrer: &Referrer,
    ) -> Result<Value> {
        condition::import_condition(self.plugin_view(), expr, referrer).await
    }

    /// Prefer the plugin loader; fall back to this resolver so the condition
    /// name goes through the same entry point as any other specifier.
    fn plugin_view(&self) -> &dyn ModuleLoader {
        match &self.host.plugin_loader {
            Some(plugin_loader) => plugin_loader.as_ref(),
            None => self,
        }
    }

    async fn finalize(
        &self,
        expr: &ConditionalExpression,
        exports: &Value,
        specifier: &str,
        referrer: &Referrer,
    ) -> Result<String> {
        match &self.mode {
            ResolutionMode::Runtime => {
                let value = read_member(&expr.condition_export, exports)?;
                substitute(expr, value, specifier)
            }
            ResolutionMode::Build(session) => {
                let request = ExpandRequest {
                    expr,
                    exports,
                    specifier,
                    referrer,
                };
                session
                    .expand(request, self, self.host.loader.as_ref())
                    .await?;
                Ok(EMPTY_MODULE.to_string())
            }
        }
    }
}

#[async_trait]
impl ModuleLoader for ConditionalResolver {
    async fn normalize(&self, name: &str, referrer: &Referrer) -> Result<String> {
        let Some(expr) = parser::parse(name)? else {
            trace!("No condition in {}", name);
            return self.host.loader.normalize(name, referrer).await;
        };
        debug!(
            "Resolving {} in {} via condition module '{}'",
            expr.token, name, expr.condition_module
        );

        let exports = self.resolve_condition(&expr, referrer).await?;
        let specifier = self.finalize(&expr, &exports, name, referrer).await?;
        debug!("{} -> {}", name, specifier);

        self.normalize(&specifier, referrer).await
    }

    async fn import(&self, name: &str, referrer: &Referrer) -> Result<Value> {
        self.host.loader.import(name, referrer).await
    }

    async fn locate(&self, request: LocateRequest) -> Result<String> {
        self.host.loader.locate(request).await
    }

    fn module_load(&self, name: &str) -> Option<Arc<ModuleLoad>> {
        self.host.loader.module_load(name)
    }
}
