//! statblock - Draw Steel statblock converter
//!
//! Reads creature statblocks pasted from rulebook text (or JSON/YAML) into a
//! typed document and writes them back out as JSON, YAML or Markdown.
//!
//! ```
//! use statblock::Converter;
//!
//! let converter = Converter::with_defaults().unwrap();
//! let text = "WOLF LEVEL 1 MINION HARRIER\nAnimal, Wolf EV 3\nStamina 5\n";
//! let json = converter.convert(text, "Statblock Text", "JSON").unwrap();
//! assert!(json.contains("\"name\": \"WOLF\""));
//! ```

pub mod cli;
pub mod config;
pub mod convert;
pub mod error;
pub mod format;
pub mod model;
pub mod output;
pub mod parser;
pub mod validation;

pub use config::Config;
pub use convert::{Conversion, Converter};
pub use error::{Result, StatblockError};
pub use format::{Format, FormatRegistry};
pub use model::{
    Ability, AbilityType, CostedEffect, Effect, Ev, NamedEffect, PowerRoll, Statblock, TierKey,
    Trait, TraitBody, TraitEffect,
};
pub use parser::{extract_statblocks, parse_all, parse_statblock};
pub use validation::{
    check_statblock, format_errors, Diagnostic, SchemaValidator, Severity, ValidationResult,
};
