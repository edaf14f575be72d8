//! Conditional expression parsing.
//!
//! A module specifier may carry one conditional token:
//!
//! - `#{browser}` - substitution: the token is replaced by the string exported
//!   from the `browser` condition module (`jquery/#{browser}` → `jquery/chrome`)
//! - `#?browser.hasFoo` - boolean: runs to the end of the specifier; the token is
//!   dropped when the export is `true`, and the whole specifier becomes `@empty`
//!   when it is `false`. A leading `~` negates the condition.
//!
//! The reference inside a token is `[~]module[.export.path]`. The module part must
//! be a bare name; anything that looks like a path is rejected here, before any
//! module is imported.

use std::ops::Range;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::{ResolveError, Result};

static CONDITIONAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"#\{[^}]+\}|#\?.+$").expect("conditional token pattern is valid")
});

/// Export read from a condition module when the reference names none.
pub const DEFAULT_EXPORT: &str = "default";

const NEGATION: char = '~';

/// Form of a conditional token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConditionKind {
    /// `#{reference}`
    Substitution,
    /// `#?reference`
    Boolean,
}

/// A conditional token found in a module specifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConditionalExpression {
    pub kind: ConditionKind,
    /// Raw token text, e.g. `#{browser}` or `#?~browser.hasFoo`
    pub token: String,
    /// Byte range of the token within the parsed specifier
    pub span: Range<usize>,
    pub condition_module: String,
    pub condition_export: String,
    /// Only ever set for boolean tokens
    pub negated: bool,
}

impl ConditionalExpression {
    pub fn is_substitution(&self) -> bool {
        self.kind == ConditionKind::Substitution
    }

    /// Replace the token in `specifier` with `value`.
    ///
    /// `specifier` must be the string this expression was parsed from.
    pub fn replace_token(&self, specifier: &str, value: &str) -> String {
        let mut out = String::with_capacity(specifier.len() - self.span.len() + value.len());
        out.push_str(&specifier[..self.span.start]);
        out.push_str(value);
        out.push_str(&specifier[self.span.end..]);
        out
    }

    /// Remove the token from `specifier`.
    pub fn strip_token(&self, specifier: &str) -> String {
        self.replace_token(specifier, "")
    }
}

/// Returns true when `name` carries a conditional token.
///
/// Other loader extensions use this to skip names they must not touch.
pub fn is_conditional_module_name(name: &str) -> bool {
    CONDITIONAL.is_match(name)
}

/// Parse the conditional token out of `specifier`.
///
/// Returns `Ok(None)` when the specifier has no conditional syntax.
pub fn parse(specifier: &str) -> Result<Option<ConditionalExpression>> {
    let Some(found) = CONDITIONAL.find(specifier) else {
        return Ok(None);
    };

    let token = found.as_str();
    let kind = if token.as_bytes()[1] == b'?' {
        ConditionKind::Boolean
    } else {
        ConditionKind::Substitution
    };

    let reference = match kind {
        ConditionKind::Substitution => &token[2..token.len() - 1],
        ConditionKind::Boolean => &token[2..],
    };

    if reference.starts_with('.') || reference.contains('/') {
        return Err(ResolveError::MalformedCondition {
            token: token.to_string(),
        });
    }

    let (module, export) = match reference.split_once('.') {
        Some((module, export)) => (module, export),
        None => (reference, DEFAULT_EXPORT),
    };

    let (module, negated) = match module.strip_prefix(NEGATION) {
        Some(rest) if kind == ConditionKind::Boolean => (rest, true),
        _ => (module, false),
    };

    Ok(Some(ConditionalExpression {
        kind,
        token: token.to_string(),
        span: found.range(),
        condition_module: module.to_string(),
        condition_export: export.to_string(),
        negated,
    }))
}
