//! Validate command implementation.
//!
//! Checks JSON and YAML statblock files against the bundled schema. YAML is
//! picked by the `.yaml`/`.yml` extension; everything else is read as JSON.

use std::path::{Path, PathBuf};

use clap::Args;

use crate::error::{Result, StatblockError};
use crate::output::{display_path, plural, Printer};
use crate::validation::{print_diagnostics, SchemaValidator, ValidationResult};

use super::read_file;

/// Check JSON or YAML statblocks against the schema
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Files to validate
    #[arg(required = true)]
    pub files: Vec<PathBuf>,
}

pub fn run(args: ValidateArgs, printer: &Printer) -> Result<()> {
    let validator = SchemaValidator::bundled()?;
    let mut failed = 0;

    for file in &args.files {
        let result = validate_file(&validator, file)?;
        if result.has_errors() {
            failed += 1;
            printer.error("Invalid", &display_path(file));
        } else {
            printer.status("Valid", &display_path(file));
        }
        if !result.is_ok() {
            print_diagnostics(&result, printer);
        }
    }

    if failed > 0 {
        return Err(StatblockError::Validation {
            message: format!(
                "{} of {} failed",
                plural(failed, "file", "files"),
                args.files.len()
            ),
            help: Some("Fix the reported paths or re-run the conversion".to_string()),
        });
    }
    Ok(())
}

pub(crate) fn validate_file(validator: &SchemaValidator, path: &Path) -> Result<ValidationResult> {
    let text = read_file(path)?;
    let is_yaml = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("yaml") || e.eq_ignore_ascii_case("yml"));

    Ok(if is_yaml {
        validator.validate_yaml(&text)
    } else {
        validator.validate_json(&text)
    })
}
