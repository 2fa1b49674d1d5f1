use crate::error::{Result, StatblockError};
use crate::model::Statblock;

use super::Format;

/// Pretty-printed JSON, keys in model declaration order.
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonFormat;

impl JsonFormat {
    pub const NAME: &'static str = "JSON";
}

impl Format for JsonFormat {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn description(&self) -> &str {
        "Structured statblock as JSON"
    }

    fn extension(&self) -> &str {
        "json"
    }

    fn supports_parsing(&self) -> bool {
        true
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn parse(&self, source: &str) -> Result<Statblock> {
        serde_json::from_str(source).map_err(|e| StatblockError::malformed(Self::NAME, e))
    }

    fn serialize(&self, statblock: &Statblock) -> Result<String> {
        serde_json::to_string_pretty(statblock).map_err(|e| StatblockError::Serialize {
            format: Self::NAME.to_string(),
            message: e.to_string(),
        })
    }
}
