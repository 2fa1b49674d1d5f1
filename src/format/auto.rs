use tracing::debug;

use crate::error::Result;
use crate::model::Statblock;
use crate::parser::parse_statblock;

use super::{Format, JsonFormat, YamlFormat};

/// Reader that picks JSON, YAML or statblock text by looking at the input.
#[derive(Debug, Default, Clone, Copy)]
pub struct AutoFormat;

impl AutoFormat {
    pub const NAME: &'static str = "Automagic";
}

/// Whether `text` has the outer shape of a JSON document.
pub fn looks_like_json(text: &str) -> bool {
    let trimmed = text.trim();
    (trimmed.starts_with('{') && trimmed.ends_with('}'))
        || (trimmed.starts_with('[') && trimmed.ends_with(']'))
}

impl Format for AutoFormat {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn description(&self) -> &str {
        "Detect JSON, YAML or statblock text"
    }

    fn supports_parsing(&self) -> bool {
        true
    }

    fn parse(&self, source: &str) -> Result<Statblock> {
        let trimmed = source.trim_start();
        if trimmed.starts_with('{') || trimmed.starts_with('[') {
            debug!("reading input as JSON");
            return JsonFormat.parse(source);
        }

        if let Some(statblock) = read_yaml(source) {
            debug!("reading input as YAML");
            return Ok(statblock);
        }

        debug!("reading input as statblock text");
        Ok(parse_statblock(source))
    }
}

/// Only a YAML mapping that carries a statblock name counts as YAML; plain
/// text is often valid YAML too (a bare scalar).
fn read_yaml(source: &str) -> Option<Statblock> {
    let value: serde_yaml::Value = serde_yaml::from_str(source).ok()?;
    let mapping = value.as_mapping()?;
    mapping.get("name")?;
    YamlFormat.parse(source).ok()
}
