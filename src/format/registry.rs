//! Format registry for format lookup by name.

use std::collections::HashMap;

use crate::error::{Result, StatblockError};
use crate::model::Statblock;
use crate::parser::parse_all;

use super::{AutoFormat, Format, JsonFormat, MarkdownFormat, TextFormat, YamlFormat};

/// Registry of statblock formats.
///
/// A registry is a plain value: build one with [`FormatRegistry::with_defaults`]
/// (or [`FormatRegistry::new`] and [`register`](Self::register) for a custom
/// set) and pass it to whoever converts.
///
/// # Examples
///
/// ```ignore
/// let registry = FormatRegistry::with_defaults();
/// let statblock = registry.parse(source, "Statblock Text")?;
/// let json = registry.serialize(&statblock, "JSON")?;
/// ```
pub struct FormatRegistry {
    formats: HashMap<String, Box<dyn Format>>,
}

impl FormatRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        FormatRegistry {
            formats: HashMap::new(),
        }
    }

    /// Register a format, replacing any format with the same name.
    pub fn register<F: Format + 'static>(&mut self, format: F) {
        self.formats
            .insert(format.name().to_string(), Box::new(format));
    }

    /// Get a format by name. Exact names win; otherwise the match is
    /// case-insensitive.
    pub fn get(&self, name: &str) -> Result<&dyn Format> {
        if let Some(format) = self.formats.get(name) {
            return Ok(format.as_ref());
        }
        self.formats
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, format)| format.as_ref())
            .ok_or_else(|| StatblockError::FormatNotFound {
                name: name.to_string(),
                help: Some(format!(
                    "available formats: {}",
                    self.list_formats().join(", ")
                )),
            })
    }

    pub fn has(&self, name: &str) -> bool {
        self.get(name).is_ok()
    }

    /// All format names, sorted.
    pub fn list_formats(&self) -> Vec<String> {
        let mut names: Vec<_> = self.formats.keys().cloned().collect();
        names.sort();
        names
    }

    /// Names of formats that can be read from.
    pub fn readers(&self) -> Vec<String> {
        self.names_where(|f| f.supports_parsing())
    }

    /// Names of formats that can be written to.
    pub fn writers(&self) -> Vec<String> {
        self.names_where(|f| f.supports_serialization())
    }

    fn names_where(&self, keep: impl Fn(&dyn Format) -> bool) -> Vec<String> {
        let mut names: Vec<_> = self
            .formats
            .iter()
            .filter_map(|(name, format)| keep(format.as_ref()).then(|| name.clone()))
            .collect();
        names.sort();
        names
    }

    /// Parse source text using the named format.
    pub fn parse(&self, source: &str, format: &str) -> Result<Statblock> {
        let fmt = self.get(format)?;
        if !fmt.supports_parsing() {
            return Err(StatblockError::Unsupported {
                format: fmt.name().to_string(),
                operation: "parsing",
            });
        }
        fmt.parse(source)
    }

    /// Serialize a statblock using the named format.
    pub fn serialize(&self, statblock: &Statblock, format: &str) -> Result<String> {
        let fmt = self.get(format)?;
        if !fmt.supports_serialization() {
            return Err(StatblockError::Unsupported {
                format: fmt.name().to_string(),
                operation: "serialization",
            });
        }
        fmt.serialize(statblock)
    }

    /// Parse every statblock in a text dump holding several creatures.
    pub fn extract(&self, source: &str) -> Vec<Statblock> {
        parse_all(source)
    }

    /// Create a registry with the built-in formats
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();

        registry.register(AutoFormat);
        registry.register(TextFormat);
        registry.register(JsonFormat);
        registry.register(YamlFormat);
        registry.register(MarkdownFormat);

        registry
    }
}

impl Default for FormatRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}
