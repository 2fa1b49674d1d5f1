use crate::error::Result;
use crate::model::Statblock;
use crate::parser::parse_statblock;

use super::Format;

/// Plain statblock text as copied from a rulebook page.
#[derive(Debug, Default, Clone, Copy)]
pub struct TextFormat;

impl TextFormat {
    pub const NAME: &'static str = "Statblock Text";
}

impl Format for TextFormat {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn description(&self) -> &str {
        "Draw Steel statblock text"
    }

    fn supports_parsing(&self) -> bool {
        true
    }

    /// Never fails; unreadable lines fall back to defaults.
    fn parse(&self, source: &str) -> Result<Statblock> {
        Ok(parse_statblock(source))
    }
}
