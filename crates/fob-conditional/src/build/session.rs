use std::fmt;
use std::sync::Arc;

use indexmap::IndexSet;
use parking_lot::Mutex;

use super::VariantStrategy;
use crate::glob::GlobFacility;

/// State for one static build run.
///
/// Owns the bundle set: every concrete module name a conditional specifier could
/// resolve to, in discovery order and without duplicates. The session is shared
/// (`Arc`) by every resolution chain of the build and read by the bundler once
/// resolution is done.
pub struct BuildSession {
    strategy: VariantStrategy,
    glob: Option<Arc<dyn GlobFacility>>,
    bundle: Mutex<IndexSet<String>>,
}

impl BuildSession {
    pub fn new(strategy: VariantStrategy) -> Self {
        Self {
            strategy,
            glob: None,
            bundle: Mutex::new(IndexSet::new()),
        }
    }

    /// Attach the facility used by [`VariantStrategy::FilesystemDiscovery`].
    pub fn with_glob(mut self, glob: Arc<dyn GlobFacility>) -> Self {
        self.glob = Some(glob);
        self
    }

    pub fn strategy(&self) -> VariantStrategy {
        self.strategy
    }

    pub(crate) fn glob(&self) -> Option<&dyn GlobFacility> {
        self.glob.as_deref()
    }

    /// Add `specifier` unless it is already bundled. Returns true if inserted.
    pub fn insert(&self, specifier: impl Into<String>) -> bool {
        self.bundle.lock().insert(specifier.into())
    }

    pub fn contains(&self, specifier: &str) -> bool {
        self.bundle.lock().contains(specifier)
    }

    pub fn len(&self) -> usize {
        self.bundle.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.bundle.lock().is_empty()
    }

    /// Snapshot of the bundle set in insertion order.
    pub fn bundle(&self) -> Vec<String> {
        self.bundle.lock().iter().cloned().collect()
    }
}

impl fmt::Debug for BuildSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BuildSession")
            .field("strategy", &self.strategy)
            .field("glob", &self.glob)
            .field("bundle", &*self.bundle.lock())
            .finish()
    }
}
