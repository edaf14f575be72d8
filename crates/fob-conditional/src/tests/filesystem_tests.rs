use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::json;
use tempfile::TempDir;

use super::build_resolver;
use crate::loader::{ModuleLoader, Referrer};
use crate::test_utils::MemoryLoader;
use crate::{BuildSession, GlobFacility, GlobOptions, NativeGlob, ResolveError, Result, VariantStrategy};

/// Glob facility that returns fixed names and records what it was asked.
#[derive(Debug, Default)]
struct FixedGlob {
    names: Vec<String>,
    calls: Mutex<Vec<(String, GlobOptions)>>,
}

#[async_trait]
impl GlobFacility for FixedGlob {
    async fn glob(&self, pattern: &str, options: &GlobOptions) -> Result<Vec<String>> {
        self.calls.lock().push((pattern.to_string(), options.clone()));
        Ok(self.names.clone())
    }
}

fn fs_session(glob: Arc<dyn GlobFacility>) -> Arc<BuildSession> {
    Arc::new(BuildSession::new(VariantStrategy::FilesystemDiscovery).with_glob(glob))
}

#[tokio::test]
async fn discovers_variant_files() {
    let temp = TempDir::new().unwrap();
    let dir = temp.path().join("jquery");
    fs::create_dir(&dir).unwrap();
    fs::write(dir.join("chrome.js"), "export default 'chrome';").unwrap();
    fs::write(dir.join("firefox.js"), "export default 'firefox';").unwrap();
    fs::write(dir.join("README.md"), "# variants").unwrap();

    let loader = Arc::new(
        MemoryLoader::new()
            .with_module("browser", json!({ "default": "chrome" }))
            .with_locate_root(temp.path().to_string_lossy()),
    );
    let session = fs_session(Arc::new(NativeGlob::new()));
    let resolver = build_resolver(&loader, &session);

    let name = resolver
        .normalize("jquery/#{browser}", &Referrer::root())
        .await
        .unwrap();

    assert_eq!(name, "@empty");
    assert_eq!(
        session.bundle(),
        vec!["jquery/chrome".to_string(), "jquery/firefox".to_string()]
    );
    assert_eq!(loader.located(), vec!["jquery/*".to_string()]);
}

#[tokio::test]
async fn glob_receives_located_directory() {
    let glob = Arc::new(FixedGlob {
        names: vec!["ie.js".to_string(), "edge.js".to_string(), "ie.js".to_string()],
        ..FixedGlob::default()
    });
    let loader = Arc::new(
        MemoryLoader::new()
            .with_module("browser", json!({ "default": "ie" }))
            .with_alias("legacy/shims", "legacy@2.0.0#shims")
            .with_locate_root("/srv/app/node_modules"),
    );
    let session = fs_session(Arc::clone(&glob) as Arc<dyn GlobFacility>);
    let resolver = build_resolver(&loader, &session);

    resolver
        .normalize("legacy/shims/#{browser}", &Referrer::root())
        .await
        .unwrap();

    let calls = glob.calls.lock();
    assert_eq!(calls.len(), 1);
    let (pattern, options) = &calls[0];
    assert_eq!(pattern, "*.js");
    assert_eq!(
        options.cwd,
        PathBuf::from("/srv/app/node_modules/legacy@2.0.0#shims")
    );
    assert!(options.dot && options.no_dir && options.no_globstar);

    // Duplicate matches are bundled once
    assert_eq!(
        session.bundle(),
        vec!["legacy/shims/ie".to_string(), "legacy/shims/edge".to_string()]
    );
}

#[tokio::test]
async fn missing_glob_is_a_build_environment_error() {
    let loader = Arc::new(MemoryLoader::new().with_module("browser", json!({ "default": "chrome" })));
    let session = Arc::new(BuildSession::new(VariantStrategy::FilesystemDiscovery));
    let resolver = build_resolver(&loader, &session);

    let err = resolver
        .normalize("jquery/#{browser}", &Referrer::root())
        .await
        .unwrap_err();

    assert!(matches!(err, ResolveError::BuildEnvironment(_)));
    assert!(session.is_empty());
}

#[tokio::test]
async fn boolean_tokens_need_no_glob() {
    let loader = Arc::new(MemoryLoader::new().with_module("browser", json!({ "hasFoo": true })));
    let session = Arc::new(BuildSession::new(VariantStrategy::FilesystemDiscovery));
    let resolver = build_resolver(&loader, &session);

    resolver
        .normalize("jquery#?browser.hasFoo", &Referrer::root())
        .await
        .unwrap();

    assert_eq!(session.bundle(), vec!["jquery".to_string()]);
    assert!(loader.module_load("browser").unwrap().include_in_build());
}

#[tokio::test]
async fn nested_token_in_discovered_variant_is_expanded() {
    let glob = Arc::new(FixedGlob {
        names: vec!["chrome.js".to_string()],
        ..FixedGlob::default()
    });
    let loader = Arc::new(
        MemoryLoader::new()
            .with_module("browser", json!({ "default": "chrome" }))
            .with_module("theme", json!({ "default": "dark" })),
    );
    let session = fs_session(Arc::clone(&glob) as Arc<dyn GlobFacility>);
    let resolver = build_resolver(&loader, &session);

    resolver
        .normalize("ui/#{browser}#?theme.dark", &Referrer::root())
        .await
        .unwrap();

    // The boolean variant of the discovered name is concrete, the sentinel is not
    assert_eq!(session.bundle(), vec!["ui/chrome".to_string()]);
}
