//! Error types for conditional resolution.
//!
//! A single error type flows through both the resolver and the host loader
//! contract, so failures reported by the host (a condition module that cannot
//! be imported, a name that cannot be normalized) reach the caller as the very
//! same value the host produced.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ResolveError>;

/// Type a condition value must have for a given expression form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConditionType {
    /// `#{cond}` substitution tokens need text.
    String,
    /// `#?cond` boolean tokens need a boolean.
    Boolean,
}

impl ConditionType {
    fn mismatch_phrase(&self) -> &'static str {
        match self {
            ConditionType::String => "doesn't resolve to a string",
            ConditionType::Boolean => "isn't resolving to a boolean",
        }
    }
}

#[derive(Debug, Error)]
pub enum ResolveError {
    /// The condition reference names a path instead of a bare module.
    #[error("Invalid condition {token}\n\tCondition modules cannot contain . or / in the name.")]
    MalformedCondition { token: String },

    /// The condition value has the wrong type for the token form.
    #[error("The condition value for {token} {}.", .expected.mismatch_phrase())]
    TypeMismatch {
        token: String,
        expected: ConditionType,
    },

    /// A member path walked into a primitive or a missing member with
    /// segments still left to read.
    #[error("Cannot read '{segment}' of condition export path '{path}'")]
    MemberPath { path: String, segment: String },

    /// Declared-cases expansion found no usable `cases` list.
    #[error("The condition module '{module}' used by {token} does not declare a `cases` list")]
    MissingCases { token: String, module: String },

    /// Build-time discovery needs a facility the host does not provide.
    #[error("Build environment error: {0}")]
    BuildEnvironment(String),

    /// The host has no load record for a normalized condition module.
    #[error("No load record for condition module '{name}'")]
    LoadRecordMissing { name: String },

    // Host-originated failures
    #[error("Module not found: {name}")]
    ModuleNotFound { name: String },

    #[error("{0}")]
    Host(String),

    #[error("Glob error: {0}")]
    Glob(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ResolveError {
    pub fn host(msg: impl Into<String>) -> Self {
        Self::Host(msg.into())
    }

    pub(crate) fn type_mismatch(token: &str, expected: ConditionType) -> Self {
        Self::TypeMismatch {
            token: token.to_string(),
            expected,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_message_names_token() {
        let err = ResolveError::MalformedCondition {
            token: "#{.browser}".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.starts_with("Invalid condition #{.browser}"));
        assert!(msg.contains("Condition modules cannot contain . or / in the name."));
    }

    #[test]
    fn test_type_mismatch_messages() {
        let err = ResolveError::type_mismatch("#{browser}", ConditionType::String);
        assert_eq!(
            err.to_string(),
            "The condition value for #{browser} doesn't resolve to a string."
        );

        let err = ResolveError::type_mismatch("#?browser.hasFoo", ConditionType::Boolean);
        assert_eq!(
            err.to_string(),
            "The condition value for #?browser.hasFoo isn't resolving to a boolean."
        );
    }
}
