use futures::future::try_join_all;
use serde_json::Value;
use tracing::debug;

use super::{BuildSession, ExpandRequest, normalize_variant};
use crate::error::{ConditionType, ResolveError, Result};
use crate::loader::ModuleLoader;

const CASES_EXPORT: &str = "cases";

/// Bundle one variant per value the condition module declares in `cases`.
pub(super) async fn expand(
    session: &BuildSession,
    request: ExpandRequest<'_>,
    entry: &dyn ModuleLoader,
) -> Result<()> {
    let expr = request.expr;
    let cases = declared_cases(request)?;
    debug!(
        "Expanding {} over {} declared case(s) of '{}'",
        expr.token,
        cases.len(),
        expr.condition_module
    );

    let normalized = try_join_all(cases.iter().map(|case| {
        let variant = expr.replace_token(request.specifier, case);
        normalize_variant(entry, variant, request.referrer)
    }))
    .await?;

    session.insert_variants(&expr.token, normalized.into_iter().flatten());
    Ok(())
}

fn declared_cases<'a>(request: ExpandRequest<'a>) -> Result<Vec<&'a str>> {
    let expr = request.expr;
    let Some(Value::Array(cases)) = request.exports.get(CASES_EXPORT) else {
        return Err(ResolveError::MissingCases {
            token: expr.token.clone(),
            module: expr.condition_module.clone(),
        });
    };

    cases
        .iter()
        .map(|case| {
            case.as_str()
                .ok_or_else(|| ResolveError::type_mismatch(&expr.token, ConditionType::String))
        })
        .collect()
}
