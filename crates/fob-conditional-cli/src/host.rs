//! Directory-backed module loader.
//!
//! Condition modules live in one directory as JSON files: `browser.json` holds
//! the exports of the condition module `browser`. Names normalize to
//! themselves, and `locate` places a module `name` at `file:<DIR>/<name>.js`,
//! which is where filesystem discovery looks for variants.

use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use fob_conditional::{LocateRequest, ModuleLoad, ModuleLoader, Referrer, ResolveError, Result};
use indexmap::IndexMap;
use parking_lot::RwLock;
use serde_json::Value;
use tracing::debug;

use crate::error::CliError;

#[derive(Debug)]
pub struct DirectoryLoader {
    root: PathBuf,
    loads: RwLock<IndexMap<String, Arc<ModuleLoad>>>,
}

impl DirectoryLoader {
    /// Create a loader over `root`, which must be an existing directory.
    pub fn new(root: impl Into<PathBuf>) -> std::result::Result<Self, CliError> {
        let root = root.into();
        if !root.is_dir() {
            return Err(CliError::ConditionsNotFound(root));
        }
        Ok(Self {
            root,
            loads: RwLock::new(IndexMap::new()),
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Names of modules imported so far, with whether each is marked for the build.
    pub fn loads(&self) -> Vec<(String, bool)> {
        self.loads
            .read()
            .values()
            .map(|load| (load.name.clone(), load.include_in_build()))
            .collect()
    }

    fn module_path(&self, name: &str) -> PathBuf {
        self.root.join(format!("{}.json", name))
    }
}

#[async_trait]
impl ModuleLoader for DirectoryLoader {
    async fn normalize(&self, name: &str, _referrer: &Referrer) -> Result<String> {
        Ok(name.to_string())
    }

    async fn import(&self, name: &str, _referrer: &Referrer) -> Result<Value> {
        let path = self.module_path(name);
        let source = match tokio::fs::read_to_string(&path).await {
            Ok(source) => source,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(ResolveError::ModuleNotFound {
                    name: name.to_string(),
                });
            }
            Err(e) => return Err(e.into()),
        };
        let exports: Value = serde_json::from_str(&source).map_err(|e| {
            ResolveError::host(format!("Invalid JSON in {}: {}", path.display(), e))
        })?;
        debug!("Loaded condition module {} from {}", name, path.display());

        self.loads
            .write()
            .entry(name.to_string())
            .or_insert_with(|| Arc::new(ModuleLoad::new(name)));
        Ok(exports)
    }

    async fn locate(&self, request: LocateRequest) -> Result<String> {
        let root = self.root.to_string_lossy();
        Ok(format!(
            "file:{}/{}.js",
            root.trim_end_matches('/'),
            request.name
        ))
    }

    fn module_load(&self, name: &str) -> Option<Arc<ModuleLoad>> {
        self.loads.read().get(name).cloned()
    }
}
