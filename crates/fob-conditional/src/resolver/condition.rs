use serde_json::Value;
use tracing::debug;

use crate::error::{ResolveError, Result};
use crate::loader::{ModuleLoader, Referrer};
use crate::parser::ConditionalExpression;

/// Import the condition module of `expr` and mark it for build output.
///
/// Condition modules are never imported by application code, so without the
/// mark a static build would leave them out. Import failures are returned as
/// the loader reported them.
pub(crate) async fn import_condition(
    view: &dyn ModuleLoader,
    expr: &ConditionalExpression,
    referrer: &Referrer,
) -> Result<Value> {
    let module = expr.condition_module.as_str();
    let exports = view.import(module, referrer).await?;

    let full_name = view.normalize(module, referrer).await?;
    let load = view
        .module_load(&full_name)
        .ok_or_else(|| ResolveError::LoadRecordMissing {
            name: full_name.clone(),
        })?;
    load.mark_include_in_build();

    debug!("Imported condition module {} ({})", module, full_name);
    Ok(exports)
}
