//! Validation of statblock documents.
//!
//! Two layers: [`SchemaValidator`] checks emitted JSON/YAML against the
//! bundled statblock schema, and [`check_statblock`] adds semantic warnings
//! about the parsed model. Both report into a [`ValidationResult`]. Used by
//! `statblock validate` and by the conversion pipeline, where the report is
//! advisory.

mod checks;
mod schema;
mod warning;

pub use schema::SchemaValidator;
pub use warning::{Diagnostic, Severity, ValidationResult};

use crate::model::Statblock;
use crate::output::Printer;

/// Run all semantic checks against a statblock.
pub fn check_statblock(statblock: &Statblock) -> ValidationResult {
    let mut result = ValidationResult::new();

    result.merge(checks::check_name(statblock));
    result.merge(checks::check_shared_names(statblock));
    result.merge(checks::check_ability_types(statblock));
    result.merge(checks::check_power_rolls(statblock));

    result
}

/// Render each diagnostic as `<path>: <message>`, with `root` for the
/// document itself.
pub fn format_errors(result: &ValidationResult) -> Vec<String> {
    result.iter().map(ToString::to_string).collect()
}

/// Print diagnostics to stderr.
pub fn print_diagnostics(result: &ValidationResult, printer: &Printer) {
    for d in result.iter() {
        eprintln!(
            "  {}[{}]: {}",
            printer.severity(d.severity),
            d.code,
            d
        );
        if !d.allowed.is_empty() {
            eprintln!("    allowed: {}", d.allowed.join(", "));
        }
        if let Some(help) = &d.help {
            eprintln!("    help: {}", help);
        }
    }

    let errors = result.error_count();
    let warnings = result.warning_count();

    if errors > 0 {
        eprintln!(
            "Validation failed: {} error(s), {} warning(s)",
            errors, warnings
        );
    } else if warnings > 0 {
        eprintln!("Validation passed ({} warning(s))", warnings);
    } else {
        eprintln!("Validation passed.");
    }
}
