//! In-memory host loader for tests.
//!
//! `MemoryLoader` stands in for a real module loader: condition modules are
//! registered as JSON exports, `normalize` maps names through an optional alias
//! table, and every call is recorded so tests can assert on what the resolver
//! asked the host for.

use std::sync::Arc;

use async_trait::async_trait;
use indexmap::{IndexMap, IndexSet};
use parking_lot::{Mutex, RwLock};
use serde_json::Value;

use crate::error::{ResolveError, Result};
use crate::loader::{LocateRequest, ModuleLoad, ModuleLoader, Referrer};

#[derive(Debug, Default)]
pub struct MemoryLoader {
    modules: RwLock<IndexMap<String, Value>>,
    aliases: RwLock<IndexMap<String, String>>,
    loads: RwLock<IndexMap<String, Arc<ModuleLoad>>>,
    unrecorded: RwLock<IndexSet<String>>,
    normalize_failures: RwLock<IndexMap<String, String>>,
    imports: Mutex<Vec<(String, Referrer)>>,
    normalized: Mutex<Vec<String>>,
    located: Mutex<Vec<String>>,
    locate_root: String,
}

impl MemoryLoader {
    pub fn new() -> Self {
        Self {
            locate_root: "/".to_string(),
            ..Self::default()
        }
    }

    /// Register a module and its exports.
    pub fn with_module(self, name: impl Into<String>, exports: Value) -> Self {
        self.modules.write().insert(name.into(), exports);
        self
    }

    /// Make `normalize(name)` return `normalized`.
    pub fn with_alias(self, name: impl Into<String>, normalized: impl Into<String>) -> Self {
        self.aliases.write().insert(name.into(), normalized.into());
        self
    }

    /// Import `name` without keeping a load record for it.
    pub fn without_load_record(self, name: impl Into<String>) -> Self {
        self.unrecorded.write().insert(name.into());
        self
    }

    /// Make `normalize(name)` fail with `ResolveError::Host(message)`.
    pub fn with_normalize_error(self, name: impl Into<String>, message: impl Into<String>) -> Self {
        self.normalize_failures.write().insert(name.into(), message.into());
        self
    }

    /// Directory `locate` places modules in.
    pub fn with_locate_root(mut self, root: impl Into<String>) -> Self {
        self.locate_root = root.into();
        self
    }

    /// Names passed to `import`, in call order.
    pub fn imports(&self) -> Vec<String> {
        self.imports.lock().iter().map(|(name, _)| name.clone()).collect()
    }

    /// Referrers passed to `import`, in call order.
    pub fn import_referrers(&self) -> Vec<Referrer> {
        self.imports.lock().iter().map(|(_, referrer)| referrer.clone()).collect()
    }

    /// Names passed to `normalize`, in call order.
    pub fn normalized(&self) -> Vec<String> {
        self.normalized.lock().clone()
    }

    /// Names passed to `locate`, in call order.
    pub fn located(&self) -> Vec<String> {
        self.located.lock().clone()
    }

    fn normalize_name(&self, name: &str) -> String {
        self.aliases
            .read()
            .get(name)
            .cloned()
            .unwrap_or_else(|| name.to_string())
    }
}

#[async_trait]
impl ModuleLoader for MemoryLoader {
    async fn normalize(&self, name: &str, _referrer: &Referrer) -> Result<String> {
        self.normalized.lock().push(name.to_string());
        if let Some(message) = self.normalize_failures.read().get(name) {
            return Err(ResolveError::host(message.clone()));
        }
        Ok(self.normalize_name(name))
    }

    async fn import(&self, name: &str, referrer: &Referrer) -> Result<Value> {
        self.imports.lock().push((name.to_string(), referrer.clone()));

        let exports = self
            .modules
            .read()
            .get(name)
            .cloned()
            .ok_or_else(|| ResolveError::ModuleNotFound {
                name: name.to_string(),
            })?;

        if self.unrecorded.read().contains(name) {
            return Ok(exports);
        }
        let full_name = self.normalize_name(name);
        self.loads
            .write()
            .entry(full_name.clone())
            .or_insert_with(|| Arc::new(ModuleLoad::new(full_name)));

        Ok(exports)
    }

    async fn locate(&self, request: LocateRequest) -> Result<String> {
        self.located.lock().push(request.name.clone());
        let root = self.locate_root.trim_end_matches('/');
        Ok(format!("file:{}/{}.js", root, request.name))
    }

    fn module_load(&self, name: &str) -> Option<Arc<ModuleLoad>> {
        self.loads.read().get(name).cloned()
    }
}
