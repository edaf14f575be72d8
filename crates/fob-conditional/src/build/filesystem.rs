use futures::future::try_join_all;
use tracing::{debug, warn};

use super::{BuildSession, ExpandRequest, normalize_variant};
use crate::error::{ResolveError, Result};
use crate::glob::GlobOptions;
use crate::loader::{LocateRequest, ModuleLoader};

/// Only this suffix is trimmed from discovered file names.
const SCRIPT_SUFFIX: &str = ".js";

/// Bundle one variant per file found where the token sits.
///
/// `pkg/#{browser}` lists the files of the directory `pkg` locates to; a file
/// `chrome.js` becomes the variant `pkg/chrome`.
pub(super) async fn expand(
    session: &BuildSession,
    request: ExpandRequest<'_>,
    entry: &dyn ModuleLoader,
    host: &dyn ModuleLoader,
) -> Result<()> {
    let expr = request.expr;
    let Some(glob) = session.glob() else {
        return Err(ResolveError::BuildEnvironment(format!(
            "cannot discover variants of {}: no glob facility is available in this environment",
            expr.token
        )));
    };

    let stripped = expr.strip_token(request.specifier);
    let base = stripped.trim_end_matches('/');
    let normalized = host.normalize(base, request.referrer).await?;
    let address = host
        .locate(LocateRequest::new(format!("{}/*", normalized)))
        .await?;

    let (cwd, pattern) = split_address(&address);
    debug!("Listing {} in {} for {}", pattern, cwd, expr.token);
    let files = glob.glob(pattern, &GlobOptions::variants(cwd)).await?;
    if files.is_empty() {
        warn!("No variants found for {} in {}", expr.token, cwd);
    }

    let normalized = try_join_all(files.iter().map(|file| {
        let variant = expr.replace_token(request.specifier, variant_name(file));
        normalize_variant(entry, variant, request.referrer)
    }))
    .await?;

    session.insert_variants(&expr.token, normalized.into_iter().flatten());
    Ok(())
}

/// Split a located address into the directory to list and the file pattern.
fn split_address(address: &str) -> (&str, &str) {
    let path = address.strip_prefix("file:").unwrap_or(address);
    match path.rsplit_once('/') {
        Some(("", pattern)) => ("/", pattern),
        Some((dir, pattern)) => (dir, pattern),
        None => (".", path),
    }
}

fn variant_name(file: &str) -> &str {
    file.strip_suffix(SCRIPT_SUFFIX).unwrap_or(file)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_address() {
        assert_eq!(split_address("file:/app/jquery/*.js"), ("/app/jquery", "*.js"));
        assert_eq!(split_address("/app/jquery/*"), ("/app/jquery", "*"));
        assert_eq!(split_address("file:/*.js"), ("/", "*.js"));
        assert_eq!(split_address("*.js"), (".", "*.js"));
    }

    #[test]
    fn test_variant_name_trims_js_suffix_only() {
        assert_eq!(variant_name("chrome.js"), "chrome");
        assert_eq!(variant_name("chrome.json"), "chrome.json");
        assert_eq!(variant_name("my.jsx.js"), "my.jsx");
        assert_eq!(variant_name("firefox.mjs"), "firefox.mjs");
        assert_eq!(variant_name("ie"), "ie");
    }
}
