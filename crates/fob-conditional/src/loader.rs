//! Host module loader contract.
//!
//! This module defines the `ModuleLoader` trait: the small set of operations the
//! conditional resolver consumes from the module loader it is installed into.
//! Hosts implement the trait; [`ConditionalResolver`](crate::ConditionalResolver)
//! wraps one and implements it again, so it can be stacked under other loader
//! extensions.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::RwLock;
use serde_json::{Map, Value};

use crate::error::Result;

/// The module a specifier is being resolved from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Referrer {
    /// Normalized name of the importing module
    pub name: Option<String>,
    /// Address (URL or path) of the importing module
    pub address: Option<String>,
}

impl Referrer {
    pub fn new(name: impl Into<String>, address: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            address: Some(address.into()),
        }
    }

    /// A referrer for top-level requests with no importing module.
    pub fn root() -> Self {
        Self::default()
    }
}

/// Request passed to [`ModuleLoader::locate`].
#[derive(Debug, Clone, Default)]
pub struct LocateRequest {
    pub name: String,
    pub metadata: Map<String, Value>,
}

impl LocateRequest {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            metadata: Map::new(),
        }
    }
}

/// Load metadata the host keeps for each module.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadMetadata {
    /// Forces the module into static build output even when no application
    /// module imports it.
    pub include_in_build: bool,
    /// Host-specific metadata
    pub extra: Map<String, Value>,
}

/// A host load record.
#[derive(Debug, Default)]
pub struct ModuleLoad {
    pub name: String,
    pub metadata: RwLock<LoadMetadata>,
}

impl ModuleLoad {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            metadata: RwLock::new(LoadMetadata::default()),
        }
    }

    pub fn include_in_build(&self) -> bool {
        self.metadata.read().include_in_build
    }

    pub fn mark_include_in_build(&self) {
        self.metadata.write().include_in_build = true;
    }
}

/// Module loader operations consumed by the conditional resolver.
///
/// # Example
///
/// ```rust,ignore
/// use fob_conditional::{ModuleLoader, Referrer, Result};
/// use async_trait::async_trait;
///
/// #[derive(Debug)]
/// struct MyLoader;
///
/// #[async_trait]
/// impl ModuleLoader for MyLoader {
///     async fn normalize(&self, name: &str, _referrer: &Referrer) -> Result<String> {
///         Ok(name.to_string())
///     }
///
///     // ... implement other methods
/// }
/// ```
#[async_trait]
pub trait ModuleLoader: Send + Sync + fmt::Debug {
    /// Resolve `name` to its canonical module name.
    async fn normalize(&self, name: &str, referrer: &Referrer) -> Result<String>;

    /// Import a module and return its exports.
    async fn import(&self, name: &str, referrer: &Referrer) -> Result<Value>;

    /// Turn a normalized name into an address, e.g. `file:/app/pkg/*.js`.
    async fn locate(&self, request: LocateRequest) -> Result<String>;

    /// Look up the load record for a normalized name.
    fn module_load(&self, name: &str) -> Option<Arc<ModuleLoad>>;
}

/// The loaders a conditional resolver talks to.
#[derive(Debug, Clone)]
pub struct Host {
    /// Primary loader; its `normalize` is the resolution being wrapped
    pub loader: Arc<dyn ModuleLoader>,
    /// Loader used for loader plugins, preferred for condition modules so that
    /// conditionals keep working inside other plugins
    pub plugin_loader: Option<Arc<dyn ModuleLoader>>,
}

impl Host {
    pub fn new(loader: Arc<dyn ModuleLoader>) -> Self {
        Self {
            loader,
            plugin_loader: None,
        }
    }

    pub fn with_plugin_loader(mut self, plugin_loader: Arc<dyn ModuleLoader>) -> Self {
        self.plugin_loader = Some(plugin_loader);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_module_load_marking() {
        let load = ModuleLoad::new("browser");
        assert!(!load.include_in_build());
        load.mark_include_in_build();
        assert!(load.include_in_build());
        assert!(load.metadata.read().extra.is_empty());
    }

    #[test]
    fn test_referrer_root() {
        let root = Referrer::root();
        assert!(root.name.is_none());
        assert!(root.address.is_none());

        let parent = Referrer::new("app/main", "file:/app/main.js");
        assert_eq!(parent.name.as_deref(), Some("app/main"));
    }
}
