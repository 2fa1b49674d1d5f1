//! Conversion pipeline.
//!
//! Reads text with a named reader, writes it with a named writer and, when
//! the output is JSON, checks it against the bundled schema. The check is
//! advisory: problems are logged and returned beside the output, never in
//! place of it.

use tracing::{debug, warn};

use crate::error::Result;
use crate::format::{looks_like_json, FormatRegistry};
use crate::model::Statblock;
use crate::validation::{check_statblock, SchemaValidator, Severity, ValidationResult};

/// Output of a single conversion.
#[derive(Debug, Clone, PartialEq)]
pub struct Conversion {
    pub output: String,
    /// Advisory report; `None` when validation is disabled.
    pub report: Option<ValidationResult>,
}

/// Converts statblocks between registered formats.
pub struct Converter {
    registry: FormatRegistry,
    validator: Option<SchemaValidator>,
}

impl Converter {
    /// Converter that validates JSON output with `validator`.
    pub fn new(registry: FormatRegistry, validator: SchemaValidator) -> Self {
        Self {
            registry,
            validator: Some(validator),
        }
    }

    /// Converter that never validates.
    pub fn without_validation(registry: FormatRegistry) -> Self {
        Self {
            registry,
            validator: None,
        }
    }

    /// Built-in formats with the bundled schema.
    pub fn with_defaults() -> Result<Self> {
        Ok(Self::new(
            FormatRegistry::with_defaults(),
            SchemaValidator::bundled()?,
        ))
    }

    pub fn registry(&self) -> &FormatRegistry {
        &self.registry
    }

    pub fn validates(&self) -> bool {
        self.validator.is_some()
    }

    /// Parse `text` with the named reader.
    pub fn read(&self, text: &str, source: &str) -> Result<Statblock> {
        self.registry.parse(text, source)
    }

    /// Format a statblock with the named writer.
    pub fn write(&self, statblock: &Statblock, target: &str) -> Result<String> {
        self.registry.serialize(statblock, target)
    }

    /// Convert `text` from `source` to `target`, logging any validation
    /// findings as warnings.
    pub fn convert(&self, text: &str, source: &str, target: &str) -> Result<String> {
        let conversion = self.convert_with_report(text, source, target)?;
        if let Some(report) = &conversion.report {
            log_report(report);
        }
        Ok(conversion.output)
    }

    /// Convert and return the advisory report alongside the output.
    pub fn convert_with_report(&self, text: &str, source: &str, target: &str) -> Result<Conversion> {
        // Resolve both ends first so an unknown writer fails before parsing.
        let reader = self.registry.get(source)?;
        let writer = self.registry.get(target)?;
        debug!(source = reader.name(), target = writer.name(), "converting");

        let statblock = self.read(text, reader.name())?;
        self.convert_statblock(&statblock, writer.name())
    }

    /// Write an already parsed statblock and validate the result.
    pub fn convert_statblock(&self, statblock: &Statblock, target: &str) -> Result<Conversion> {
        let output = self.write(statblock, target)?;
        let report = self.report(statblock, &output, target);
        Ok(Conversion { output, report })
    }

    fn report(&self, statblock: &Statblock, output: &str, target: &str) -> Option<ValidationResult> {
        let validator = self.validator.as_ref()?;
        let mut report = check_statblock(statblock);

        if target.to_lowercase().contains("json") || looks_like_json(output) {
            report.merge(validator.validate_json(output));
        }

        Some(report)
    }
}

fn log_report(report: &ValidationResult) {
    for d in report.iter() {
        match d.severity {
            Severity::Error => warn!(code = %d.code, "schema violation: {}", d),
            Severity::Warning => warn!(code = %d.code, "{}", d),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StatblockError;

    const WOLF: &str = "\
WOLF LEVEL 1 HORDE HARRIER
Animal EV 3
Stamina 8
Speed 7 Size 1M / Stability 0
Free Strike 1
Might 0 Agility +2 Reason -4 Intuition +1 Presence -2
Bite (Action) ◆ 2d10 + 2 ◆ Signature
Keywords Melee, Strike
Distance Melee 1 Target One creature
✦ ≤11 2 damage
★ 12–16 4 damage
✸ 17+ 5 damage
";

    #[test]
    fn test_convert_text_to_json() {
        let converter = Converter::with_defaults().unwrap();
        let conversion = converter
            .convert_with_report(WOLF, "Statblock Text", "JSON")
            .unwrap();

        assert!(conversion.output.contains("\"name\": \"WOLF\""));
        let report = conversion.report.unwrap();
        assert!(report.is_ok(), "{:?}", report);
    }

    #[test]
    fn test_unknown_source() {
        let converter = Converter::with_defaults().unwrap();
        let err = converter.convert(WOLF, "Bogus", "JSON").unwrap_err();
        assert!(matches!(err, StatblockError::FormatNotFound { ref name, .. } if name == "Bogus"));
    }

    #[test]
    fn test_unknown_target_fails_before_parsing() {
        let converter = Converter::with_defaults().unwrap();
        let err = converter.convert("{ broken", "JSON", "Nope").unwrap_err();
        assert!(matches!(err, StatblockError::FormatNotFound { .. }));
    }

    #[test]
    fn test_markdown_has_no_schema_report() {
        let converter = Converter::with_defaults().unwrap();
        let conversion = converter
            .convert_with_report(WOLF, "Automagic", "Markdown")
            .unwrap();
        assert!(conversion.output.starts_with("| WOLF |"));
        assert!(conversion.report.unwrap().is_ok());
    }

    #[test]
    fn test_sparse_json_input_is_completed() {
        let converter = Converter::with_defaults().unwrap();
        let conversion = converter
            .convert_with_report(r#"{"name": "Nameless", "level": 1}"#, "JSON", "JSON")
            .unwrap();

        let json: serde_json::Value = serde_json::from_str(&conversion.output).unwrap();
        assert_eq!(json["name"], "Nameless");
        assert!(conversion.report.unwrap().is_valid());
    }

    #[test]
    fn test_schema_errors_are_advisory() {
        let converter = Converter::with_defaults().unwrap();
        let conversion = converter
            .convert_with_report(r#"{"name": "", "level": 1}"#, "JSON", "JSON")
            .unwrap();

        let report = conversion.report.unwrap();
        assert!(report.has_errors());
        assert!(report.iter().any(|d| d.path == "/name"));
        assert!(conversion.output.contains("\"level\": 1"));
    }

    #[test]
    fn test_without_validation() {
        let converter = Converter::without_validation(FormatRegistry::with_defaults());
        let conversion = converter.convert_with_report(WOLF, "Automagic", "YAML").unwrap();
        assert!(conversion.report.is_none());
        assert!(!converter.validates());
    }
}
