//! Dotted member-path evaluation over module exports.

use serde_json::Value;

use crate::error::{ResolveError, Result};

/// Read `path` (e.g. `"default"`, `"features.fetch"`) out of `exports`.
///
/// Primitive exports are their own condition value whatever the path says; a
/// condition module may export a bare string or boolean. Structured exports are
/// walked segment by segment, objects by key and arrays by index.
///
/// Returns `Ok(None)` when the last segment is missing (an undefined member). A
/// segment that would have to be read from a primitive or from a missing member
/// fails with [`ResolveError::MemberPath`].
pub fn read_member<'a>(path: &str, exports: &'a Value) -> Result<Option<&'a Value>> {
    if !is_structured(exports) {
        return Ok(Some(exports));
    }

    let mut current = Some(exports);
    for segment in path.split('.') {
        let value = match current {
            Some(value) if is_structured(value) => value,
            _ => {
                return Err(ResolveError::MemberPath {
                    path: path.to_string(),
                    segment: segment.to_string(),
                });
            }
        };
        current = match value {
            Value::Object(map) => map.get(segment),
            Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
            _ => None,
        };
    }

    Ok(current)
}

fn is_structured(value: &Value) -> bool {
    matches!(value, Value::Object(_) | Value::Array(_))
}

/// Short name of a JSON value's type, used in log output.
pub(crate) fn type_name(value: Option<&Value>) -> &'static str {
    match value {
        None => "undefined",
        Some(Value::Null) => "null",
        Some(Value::Bool(_)) => "boolean",
        Some(Value::Number(_)) => "number",
        Some(Value::String(_)) => "string",
        Some(Value::Array(_)) => "array",
        Some(Value::Object(_)) => "object",
    }
}
