//! JSON-Schema validation of emitted documents.
//!
//! The bundled statblock schema references the ability schema by name, so
//! the ability document is registered as a resource before the validator is
//! built. Every error becomes a [`Diagnostic`] whose path is the JSON
//! pointer of the offending value.

use jsonschema::error::ValidationErrorKind;
use jsonschema::{Draft, Resource, ValidationError, Validator};
use serde_json::Value;

use crate::error::{Result, StatblockError};
use crate::model::Statblock;

use super::warning::{Diagnostic, ValidationResult};

const STATBLOCK_SCHEMA: &str = include_str!("../../schemas/statblock.schema.json");
const ABILITY_SCHEMA: &str = include_str!("../../schemas/ability.schema.json");

/// URI the statblock schema resolves `ability.schema.json` to.
pub const ABILITY_SCHEMA_ID: &str = "https://statblock.dev/schemas/ability.schema.json";

/// Validates JSON values against a compiled root schema.
pub struct SchemaValidator {
    validator: Validator,
}

impl SchemaValidator {
    /// Compile `root` on its own.
    pub fn new(root: &Value) -> Result<Self> {
        Self::with_documents(root, Vec::new())
    }

    /// Compile `root`, registering each `(uri, schema)` pair so `$ref` can
    /// name it.
    pub fn with_documents(root: &Value, documents: Vec<(String, Value)>) -> Result<Self> {
        let resources = documents
            .into_iter()
            .map(|(uri, schema)| {
                Resource::from_contents(schema)
                    .map(|resource| (uri.clone(), resource))
                    .map_err(|e| schema_error(&uri, e))
            })
            .collect::<Result<Vec<_>>>()?;

        let validator = jsonschema::options()
            .with_draft(Draft::Draft7)
            .with_resources(resources.into_iter())
            .build(root)
            .map_err(|e| schema_error("statblock.schema.json", e))?;

        Ok(Self { validator })
    }

    /// The bundled statblock schema with its ability sub-schema.
    pub fn bundled() -> Result<Self> {
        let root = load_schema("statblock.schema.json", STATBLOCK_SCHEMA)?;
        let ability = load_schema("ability.schema.json", ABILITY_SCHEMA)?;
        Self::with_documents(&root, vec![(ABILITY_SCHEMA_ID.to_string(), ability)])
    }

    /// Validate an already parsed value.
    pub fn validate(&self, instance: &Value) -> ValidationResult {
        let mut result = ValidationResult::new();
        for error in self.validator.iter_errors(instance) {
            result.push(diagnostic(&error));
        }
        result
    }

    /// Parse and validate JSON text. A parse failure is reported as a root error.
    pub fn validate_json(&self, text: &str) -> ValidationResult {
        match serde_json::from_str::<Value>(text) {
            Ok(value) => self.validate(&value),
            Err(e) => parse_failure("JSON", e),
        }
    }

    /// Parse and validate YAML text against the same schema.
    pub fn validate_yaml(&self, text: &str) -> ValidationResult {
        match serde_yaml::from_str::<Value>(text) {
            Ok(value) => self.validate(&value),
            Err(e) => parse_failure("YAML", e),
        }
    }

    /// Validate a statblock as it would be written to JSON.
    pub fn validate_statblock(&self, statblock: &Statblock) -> ValidationResult {
        match serde_json::to_value(statblock) {
            Ok(value) => self.validate(&value),
            Err(e) => parse_failure("JSON", e),
        }
    }
}

fn diagnostic(error: &ValidationError<'_>) -> Diagnostic {
    let d = Diagnostic::error(format!("statblock::schema::{}", code(&error.kind)), error.to_string())
        .at(error.instance_path.to_string());

    match &error.kind {
        ValidationErrorKind::Enum { options } => d.with_allowed(
            options
                .as_array()
                .map(|values| values.iter().map(display_value).collect())
                .unwrap_or_default(),
        ),
        ValidationErrorKind::AdditionalProperties { unexpected } => {
            d.with_help(format!("unexpected: {}", unexpected.join(", ")))
        }
        _ => d,
    }
}

fn code(kind: &ValidationErrorKind) -> &'static str {
    match kind {
        ValidationErrorKind::Type { .. } => "type",
        ValidationErrorKind::Enum { .. } => "enum",
        ValidationErrorKind::Required { .. } => "required",
        ValidationErrorKind::AdditionalProperties { .. } => "additional",
        ValidationErrorKind::AnyOf { .. } => "any-of",
        ValidationErrorKind::OneOfNotValid { .. } | ValidationErrorKind::OneOfMultipleValid { .. } => {
            "one-of"
        }
        ValidationErrorKind::UniqueItems { .. } => "unique-items",
        ValidationErrorKind::Minimum { .. } => "minimum",
        ValidationErrorKind::Maximum { .. } => "maximum",
        ValidationErrorKind::MinLength { .. } => "min-length",
        ValidationErrorKind::MinItems { .. } => "min-items",
        ValidationErrorKind::MinProperties { .. } => "min-properties",
        ValidationErrorKind::Pattern { .. } => "pattern",
        _ => "invalid",
    }
}

fn load_schema(name: &str, text: &str) -> Result<Value> {
    serde_json::from_str(text).map_err(|e| StatblockError::Parse {
        message: format!("bundled schema {} is not valid JSON", name),
        help: Some(e.to_string()),
    })
}

fn schema_error(name: &str, e: impl std::fmt::Display) -> StatblockError {
    StatblockError::Parse {
        message: format!("schema {} can't be compiled", name),
        help: Some(e.to_string()),
    }
}

fn parse_failure(format: &str, e: impl std::fmt::Display) -> ValidationResult {
    let mut result = ValidationResult::new();
    result.push(Diagnostic::error(
        "statblock::schema::parse",
        format!("{} Parse Error: {}", format, e),
    ));
    result
}

fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn validator() -> SchemaValidator {
        SchemaValidator::bundled().unwrap()
    }

    fn valid_statblock() -> Value {
        json!({
            "name": "Goblin Warrior",
            "level": 1,
            "roles": ["Horde", "Harrier"],
            "ancestry": ["Humanoid", "Goblin"],
            "ev": 3,
            "stamina": 15,
            "speed": "6 (climb)",
            "size": "1S",
            "stability": 0,
            "free_strike": 1,
            "might": -1,
            "agility": 2,
            "reason": 0,
            "intuition": 0,
            "presence": -1,
            "traits": [{ "name": "Crafty", "effect": "Sneaky." }],
            "abilities": [{
                "name": "Spear Charge",
                "type": "Action",
                "keywords": ["Melee"],
                "effects": [
                    { "roll": "2d10 + 2", "11 or lower": "3 damage", "17+": "7 damage" },
                    { "cost": "2 Malice", "effect": "Push 1." },
                    "The goblin shifts."
                ]
            }]
        })
    }

    fn paths(result: &ValidationResult) -> Vec<String> {
        result.errors().map(|d| d.path.clone()).collect()
    }

    fn codes(result: &ValidationResult) -> Vec<String> {
        result.errors().map(|d| d.code.clone()).collect()
    }

    #[test]
    fn test_bundled_schema_accepts_valid_document() {
        let result = validator().validate(&valid_statblock());
        assert!(result.is_ok(), "{:?}", result);
    }

    #[test]
    fn test_non_numeric_attribute_reports_path() {
        let mut doc = valid_statblock();
        doc["might"] = json!("strong");

        let result = validator().validate(&doc);
        assert!(!result.is_valid());
        assert_eq!(paths(&result), vec!["/might"]);
        assert_eq!(codes(&result), vec!["statblock::schema::type"]);
    }

    #[test]
    fn test_missing_required_at_root() {
        let mut doc = valid_statblock();
        doc.as_object_mut().unwrap().remove("stamina");

        let result = validator().validate(&doc);
        let d = result.errors().next().unwrap();
        assert_eq!(d.location(), "root");
        assert_eq!(d.code, "statblock::schema::required");
        assert!(d.message.contains("stamina"));
    }

    #[test]
    fn test_ability_type_checked_through_cross_document_ref() {
        let mut doc = valid_statblock();
        doc["abilities"][0]["type"] = json!("Reaction");

        let result = validator().validate(&doc);
        assert_eq!(paths(&result), vec!["/abilities/0/type"]);
        assert_eq!(codes(&result), vec!["statblock::schema::any-of"]);
    }

    #[test]
    fn test_enum_lists_allowed_values() {
        let validator = SchemaValidator::new(&json!({ "enum": ["Action", "Maneuver"] })).unwrap();
        let result = validator.validate(&json!("Reaction"));

        let d = result.errors().next().unwrap();
        assert_eq!(d.code, "statblock::schema::enum");
        assert_eq!(d.allowed, vec!["Action", "Maneuver"]);
    }

    #[test]
    fn test_villain_action_pattern() {
        let mut doc = valid_statblock();
        doc["abilities"][0]["type"] = json!("Villain Action 3");
        assert!(validator().validate(&doc).is_ok());
    }

    #[test]
    fn test_power_roll_needs_a_tier() {
        let mut doc = valid_statblock();
        doc["abilities"][0]["effects"][0] = json!({ "roll": "2d10 + 2" });

        let result = validator().validate(&doc);
        assert!(!result.is_valid());
        assert!(paths(&result).contains(&"/abilities/0/effects/0".to_string()));
    }

    #[test]
    fn test_additional_property() {
        let mut doc = valid_statblock();
        doc["hit_points"] = json!(12);

        let result = validator().validate(&doc);
        let d = result.errors().next().unwrap();
        assert_eq!(d.code, "statblock::schema::additional");
        assert_eq!(d.help.as_deref(), Some("unexpected: hit_points"));
    }

    #[test]
    fn test_trait_needs_exactly_one_body() {
        let mut doc = valid_statblock();
        doc["traits"][0]["effects"] = json!(["Also sneaky."]);

        let result = validator().validate(&doc);
        assert_eq!(paths(&result), vec!["/traits/0"]);
        assert_eq!(codes(&result), vec!["statblock::schema::one-of"]);
    }

    #[test]
    fn test_duplicate_immunities() {
        let mut doc = valid_statblock();
        doc["immunities"] = json!(["fire", "fire"]);

        let result = validator().validate(&doc);
        assert_eq!(paths(&result), vec!["/immunities"]);
        assert_eq!(codes(&result), vec!["statblock::schema::unique-items"]);
    }

    #[test]
    fn test_validate_json_parse_error() {
        let result = validator().validate_json("{ nope");
        assert_eq!(result.error_count(), 1);
        let d = result.errors().next().unwrap();
        assert!(d.message.starts_with("JSON Parse Error:"));
        assert_eq!(d.location(), "root");
    }

    #[test]
    fn test_validate_yaml() {
        let yaml = serde_yaml::to_string(&valid_statblock()).unwrap();
        assert!(validator().validate_yaml(&yaml).is_ok());
    }

    #[test]
    fn test_validate_statblock_model() {
        let statblock = Statblock::new("Wisp");
        assert!(validator().validate_statblock(&statblock).is_ok());
    }

    #[test]
    fn test_unresolvable_ref_fails_to_compile() {
        let root = json!({ "$ref": "https://statblock.dev/schemas/missing.json#/x" });
        assert!(SchemaValidator::new(&root).is_err());
    }
}
