use serde_json::Value;
use tracing::debug;

use crate::error::{ConditionType, ResolveError, Result};
use crate::member::type_name;
use crate::parser::{ConditionKind, ConditionalExpression};
use crate::EMPTY_MODULE;

/// Compute the concrete specifier for a runtime condition value.
///
/// Substitution tokens are replaced by the (string) value. Boolean tokens are
/// dropped when the (possibly negated) value is true; a false value turns the
/// whole specifier into [`EMPTY_MODULE`]. Values of the wrong type are errors,
/// never coerced.
pub fn substitute(
    expr: &ConditionalExpression,
    value: Option<&Value>,
    specifier: &str,
) -> Result<String> {
    match expr.kind {
        ConditionKind::Substitution => {
            let Some(Value::String(value)) = value else {
                debug!("{} evaluated to {}", expr.token, type_name(value));
                return Err(ResolveError::type_mismatch(&expr.token, ConditionType::String));
            };
            Ok(expr.replace_token(specifier, value))
        }
        ConditionKind::Boolean => {
            let Some(Value::Bool(value)) = value else {
                debug!("{} evaluated to {}", expr.token, type_name(value));
                return Err(ResolveError::type_mismatch(&expr.token, ConditionType::Boolean));
            };
            if *value != expr.negated {
                Ok(expr.strip_token(specifier))
            } else {
                Ok(EMPTY_MODULE.to_string())
            }
        }
    }
}
