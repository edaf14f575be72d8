//! Check command implementation.
//!
//! Parses specifiers without importing anything, so a malformed condition can
//! be caught before a build runs.

use fob_conditional::{ConditionKind, ConditionalExpression, parse};

use crate::cli::CheckArgs;
use crate::error::{CliError, Result};
use crate::ui;

/// Execute the check command.
///
/// Every specifier is reported; the command fails if any is malformed.
pub fn execute(args: CheckArgs) -> Result<()> {
    let mut failed = 0;

    for specifier in &args.specifiers {
        match parse(specifier) {
            Ok(Some(expr)) => println!("{}: {}", specifier, describe(&expr)),
            Ok(None) => println!("{}: no condition", specifier),
            Err(e) => {
                failed += 1;
                ui::error(&format!("{}: {}", specifier, e));
            }
        }
    }

    if failed > 0 {
        return Err(CliError::CheckFailed {
            failed,
            total: args.specifiers.len(),
        });
    }

    ui::success(&format!("{} specifiers are well-formed", args.specifiers.len()));
    Ok(())
}

/// One-line summary of a parsed token.
pub fn describe(expr: &ConditionalExpression) -> String {
    let form = match expr.kind {
        ConditionKind::Substitution => "substitution",
        ConditionKind::Boolean if expr.negated => "negated boolean",
        ConditionKind::Boolean => "boolean",
    };
    format!(
        "{} {} (module '{}', export '{}')",
        form, expr.token, expr.condition_module, expr.condition_export
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check(specifiers: &[&str]) -> Result<()> {
        execute(CheckArgs {
            specifiers: specifiers.iter().map(|s| s.to_string()).collect(),
        })
    }

    #[test]
    fn test_describe() {
        let expr = parse("jquery/#{browser}").unwrap().unwrap();
        assert_eq!(
            describe(&expr),
            "substitution #{browser} (module 'browser', export 'default')"
        );

        let expr = parse("shim#?~features.fetch").unwrap().unwrap();
        assert_eq!(
            describe(&expr),
            "negated boolean #?~features.fetch (module 'features', export 'fetch')"
        );
    }

    #[test]
    fn test_well_formed() {
        assert!(check(&["jquery/#{browser}", "lodash", "jquery#?browser.hasFoo"]).is_ok());
    }

    #[test]
    fn test_malformed_counted() {
        let err = check(&["jquery/#{./browser}", "lodash", "x#?a/b"]).unwrap_err();
        assert!(matches!(err, CliError::CheckFailed { failed: 2, total: 3 }));
    }
}
