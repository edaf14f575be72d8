//! Resolve command implementation.

use std::sync::Arc;

use fob_conditional::{
    ConditionalConfig, ConditionalResolver, GlobFacility, Host, ModuleLoader, NativeGlob,
    Referrer,
};
use serde::Serialize;
use tracing::info;

use crate::cli::ResolveArgs;
use crate::error::Result;
use crate::host::DirectoryLoader;
use crate::ui;

/// Result of a `resolve` run, printed as text or JSON.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct ResolveReport {
    pub mode: &'static str,
    pub resolutions: Vec<Resolution>,
    /// Variants recorded for the build, absent at runtime
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bundle: Option<Vec<String>>,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct Resolution {
    pub specifier: String,
    pub resolved: String,
}

/// Execute the resolve command.
///
/// `--build` and `--strategy` override the loaded configuration. Specifiers
/// are resolved in order and share one build session.
pub async fn execute(args: ResolveArgs, config: ConditionalConfig) -> Result<()> {
    let report = run(&args, config).await?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    for resolution in &report.resolutions {
        println!("{} -> {}", resolution.specifier, resolution.resolved);
    }
    if let Some(bundle) = &report.bundle {
        if bundle.is_empty() {
            ui::warning("No variants were recorded for the build");
        } else {
            ui::info(&format!("Build bundle ({} modules):", bundle.len()));
            for name in bundle {
                println!("  {}", name);
            }
        }
    }
    Ok(())
}

/// Resolve every specifier in `args` and collect the report.
pub async fn run(args: &ResolveArgs, mut config: ConditionalConfig) -> Result<ResolveReport> {
    if args.build && !config.is_build() {
        config.env = Some("build".to_string());
    }
    if let Some(strategy) = args.strategy {
        config.strategy = strategy.into();
    }

    let glob: Arc<dyn GlobFacility> = Arc::new(NativeGlob::new());
    let mode = config.mode(Some(glob));
    let loader = Arc::new(DirectoryLoader::new(&args.conditions)?);
    info!(
        "Resolving {} specifiers ({} mode, conditions in {})",
        args.specifiers.len(),
        if mode.is_build() { "build" } else { "runtime" },
        loader.root().display()
    );
    let resolver = ConditionalResolver::new(Host::new(loader), mode.clone());

    let referrer = Referrer::root();
    let mut resolutions = Vec::with_capacity(args.specifiers.len());
    for specifier in &args.specifiers {
        let resolved = resolver.normalize(specifier, &referrer).await?;
        resolutions.push(Resolution {
            specifier: specifier.clone(),
            resolved,
        });
    }

    Ok(ResolveReport {
        mode: if mode.is_build() { "build" } else { "runtime" },
        resolutions,
        bundle: mode.session().map(|session| session.bundle()),
    })
}
