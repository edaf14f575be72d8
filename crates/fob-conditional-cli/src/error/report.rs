//! Miette report conversion for CLI errors.

use fob_conditional::ResolveError;
use miette::Report;

use crate::error::CliError;

/// Convert a `CliError` into a miette report, attaching a hint where one helps.
pub fn cli_error_to_miette(err: CliError) -> Report {
    match err {
        CliError::Resolve(e) => resolve_error_to_miette(e),
        CliError::ConditionsNotFound(path) => miette::miette!(
            help = "Pass the directory holding the condition modules with --conditions",
            "Conditions directory not found: {}",
            path.display()
        ),
        CliError::Config(e) => miette::miette!(
            help = "Check fob-conditional.json and FOB_CONDITIONAL_* variables",
            "Configuration error: {}",
            e
        ),
        other => miette::miette!("{}", other),
    }
}

fn resolve_error_to_miette(err: ResolveError) -> Report {
    match err {
        ResolveError::ModuleNotFound { name } => miette::miette!(
            help = format!("Add {}.json to the conditions directory", name),
            "Condition module not found: {}",
            name
        ),
        ResolveError::MissingCases { token, module } => miette::miette!(
            help = format!(
                "Export a \"cases\" array from {}.json, or use --strategy filesystem",
                module
            ),
            "Condition module {} for {} declares no cases",
            module,
            token
        ),
        ResolveError::BuildEnvironment(message) => miette::miette!(
            help = "Use --strategy cases to expand from declared cases instead",
            "{}",
            message
        ),
        other => miette::miette!("{}", other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_module_gets_hint() {
        let report = cli_error_to_miette(CliError::Resolve(ResolveError::ModuleNotFound {
            name: "browser".to_string(),
        }));
        let help = report.help().map(|h| h.to_string());
        assert_eq!(
            help.as_deref(),
            Some("Add browser.json to the conditions directory")
        );
    }

    #[test]
    fn test_other_errors_keep_message() {
        let report = cli_error_to_miette(CliError::CheckFailed { failed: 2, total: 2 });
        assert_eq!(report.to_string(), "2 of 2 specifiers are malformed");
    }
}
