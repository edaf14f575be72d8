use std::sync::Arc;

use crate::loader::{Host, ModuleLoader};
use crate::test_utils::MemoryLoader;
use crate::{BuildSession, ConditionalResolver, ResolutionMode};

mod filesystem_tests;

fn runtime_resolver(loader: &Arc<MemoryLoader>) -> ConditionalResolver {
    let host = Host::new(Arc::clone(loader) as Arc<dyn ModuleLoader>);
    ConditionalResolver::runtime(host)
}

fn build_resolver(loader: &Arc<MemoryLoader>, session: &Arc<BuildSession>) -> ConditionalResolver {
    let host = Host::new(Arc::clone(loader) as Arc<dyn ModuleLoader>);
    ConditionalResolver::new(host, ResolutionMode::Build(Arc::clone(session)))
}
