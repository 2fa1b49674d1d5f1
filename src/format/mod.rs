//! Readers and writers for statblock documents.
//!
//! Every format implements [`Format`] and is looked up by name through a
//! [`FormatRegistry`]. A format may read (text into a [`Statblock`]), write
//! (a [`Statblock`] into text) or both:
//!
//! | Name             | Reads | Writes |
//! |------------------|-------|--------|
//! | `Automagic`      | yes   |        |
//! | `Statblock Text` | yes   |        |
//! | `JSON`           | yes   | yes    |
//! | `YAML`           | yes   | yes    |
//! | `Markdown`       |       | yes    |

mod auto;
mod json;
mod markdown;
mod registry;
mod text;
mod yaml;

pub use auto::{looks_like_json, AutoFormat};
pub use json::JsonFormat;
pub use markdown::MarkdownFormat;
pub use registry::FormatRegistry;
pub use text::TextFormat;
pub use yaml::YamlFormat;

use crate::error::{Result, StatblockError};
use crate::model::Statblock;

/// A named document format.
///
/// Formats override `parse` and/or `serialize` and report which of the two
/// they support. The defaults fail with [`StatblockError::Unsupported`].
pub trait Format: Send + Sync {
    /// Registry key, e.g. `"JSON"`.
    fn name(&self) -> &str;

    fn description(&self) -> &str {
        ""
    }

    /// File extension used when writing this format to disk.
    fn extension(&self) -> &str {
        "txt"
    }

    fn supports_parsing(&self) -> bool {
        false
    }

    fn supports_serialization(&self) -> bool {
        false
    }

    fn parse(&self, _source: &str) -> Result<Statblock> {
        Err(StatblockError::Unsupported {
            format: self.name().to_string(),
            operation: "parsing",
        })
    }

    fn serialize(&self, _statblock: &Statblock) -> Result<String> {
        Err(StatblockError::Unsupported {
            format: self.name().to_string(),
            operation: "serialization",
        })
    }
}
