//! File enumeration used by filesystem variant discovery.
//!
//! The glob facility is external to the resolver: hosts that can list files
//! (native builds) provide one, browser-like hosts do not. [`NativeGlob`] is the
//! implementation for native targets.

use std::fmt;
use std::path::PathBuf;

use async_trait::async_trait;

use crate::error::Result;

/// Matching options, mirroring the flags build tooling passes to glob.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlobOptions {
    /// Directory the pattern is matched in
    pub cwd: PathBuf,
    /// Match dotfiles
    pub dot: bool,
    /// Disable `{a,b}` brace expansion
    pub no_brace: bool,
    /// Treat `**` like `*`
    pub no_globstar: bool,
    /// Disable extended glob patterns
    pub no_ext: bool,
    /// Only return files
    pub no_dir: bool,
}

impl GlobOptions {
    /// Options used when listing condition variants in `cwd`.
    pub fn variants(cwd: impl Into<PathBuf>) -> Self {
        Self {
            cwd: cwd.into(),
            dot: true,
            no_brace: true,
            no_globstar: true,
            no_ext: true,
            no_dir: true,
        }
    }
}

/// Lists file names matching a pattern.
#[async_trait]
pub trait GlobFacility: Send + Sync + fmt::Debug {
    /// Returns matches relative to `options.cwd`.
    async fn glob(&self, pattern: &str, options: &GlobOptions) -> Result<Vec<String>>;
}

#[cfg(not(target_family = "wasm"))]
pub use native::NativeGlob;

#[cfg(not(target_family = "wasm"))]
mod native {
    use super::*;
    use crate::error::ResolveError;
    use ::glob::{MatchOptions, Pattern};
    use tokio::task;

    /// Glob facility backed by the `glob` crate.
    ///
    /// Directory listing is blocking, so it runs on tokio's blocking pool.
    #[derive(Debug, Clone, Copy, Default)]
    pub struct NativeGlob;

    impl NativeGlob {
        pub fn new() -> Self {
            Self
        }
    }

    #[async_trait]
    impl GlobFacility for NativeGlob {
        async fn glob(&self, pattern: &str, options: &GlobOptions) -> Result<Vec<String>> {
            let pattern = pattern.to_string();
            let options = options.clone();
            task::spawn_blocking(move || list_matches(&pattern, &options))
                .await
                .map_err(|e| ResolveError::Glob(format!("Task join error: {}", e)))?
        }
    }

    fn list_matches(pattern: &str, options: &GlobOptions) -> Result<Vec<String>> {
        // `glob` has no brace or extglob syntax, so only globstar needs handling
        let pattern = if options.no_globstar {
            pattern.replace("**", "*")
        } else {
            pattern.to_string()
        };
        let cwd = options.cwd.to_string_lossy();
        let full = format!("{}/{}", Pattern::escape(cwd.trim_end_matches('/')), pattern);

        let match_options = MatchOptions {
            case_sensitive: true,
            require_literal_separator: true,
            require_literal_leading_dot: !options.dot,
        };

        let paths = ::glob::glob_with(&full, match_options)
            .map_err(|e| ResolveError::Glob(format!("Invalid pattern {}: {}", full, e)))?;

        let mut matches = Vec::new();
        for entry in paths {
            let path = entry.map_err(|e| ResolveError::Glob(e.to_string()))?;
            if options.no_dir && !path.is_file() {
                continue;
            }
            let relative = path.strip_prefix(&options.cwd).unwrap_or(&path);
            matches.push(relative.to_string_lossy().into_owned());
        }
        matches.sort();
        Ok(matches)
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use std::fs;
        use tempfile::TempDir;

        #[tokio::test]
        async fn test_lists_files_only() {
            let temp = TempDir::new().unwrap();
            fs::write(temp.path().join("chrome.js"), "").unwrap();
            fs::write(temp.path().join("firefox.js"), "").unwrap();
            fs::write(temp.path().join("notes.txt"), "").unwrap();
            fs::create_dir(temp.path().join("nested.js")).unwrap();

            let found = NativeGlob::new()
                .glob("*.js", &GlobOptions::variants(temp.path()))
                .await
                .unwrap();

            assert_eq!(found, vec!["chrome.js".to_string(), "firefox.js".to_string()]);
        }

        #[tokio::test]
        async fn test_dotfiles_follow_option() {
            let temp = TempDir::new().unwrap();
            fs::write(temp.path().join(".hidden.js"), "").unwrap();
            fs::write(temp.path().join("shown.js"), "").unwrap();

            let mut options = GlobOptions::variants(temp.path());
            let found = NativeGlob.glob("*", &options).await.unwrap();
            assert_eq!(found, vec![".hidden.js".to_string(), "shown.js".to_string()]);

            options.dot = false;
            let found = NativeGlob.glob("*", &options).await.unwrap();
            assert_eq!(found, vec!["shown.js".to_string()]);
        }

        #[tokio::test]
        async fn test_missing_directory_matches_nothing() {
            let temp = TempDir::new().unwrap();
            let options = GlobOptions::variants(temp.path().join("absent"));
            let found = NativeGlob.glob("*.js", &options).await.unwrap();
            assert!(found.is_empty());
        }
    }
}
