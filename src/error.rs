//! Error types shared by the library and the CLI.

use miette::Diagnostic;
use thiserror::Error;

/// Main error type for statblock operations
#[derive(Error, Diagnostic, Debug)]
pub enum StatblockError {
    #[error("IO error: {0}")]
    #[diagnostic(code(statblock::io))]
    IoError(#[from] std::io::Error),

    #[error("IO error with {path}: {message}")]
    #[diagnostic(code(statblock::io))]
    Io {
        path: std::path::PathBuf,
        message: String,
    },

    #[error("No adapter found for format: {name}")]
    #[diagnostic(code(statblock::lookup))]
    FormatNotFound {
        name: String,
        #[help]
        help: Option<String>,
    },

    #[error("{message}")]
    #[diagnostic(code(statblock::malformed))]
    MalformedInput {
        format: String,
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Format '{format}' does not support {operation}")]
    #[diagnostic(code(statblock::unsupported))]
    Unsupported {
        format: String,
        operation: &'static str,
    },

    #[error("Could not write {format}: {message}")]
    #[diagnostic(code(statblock::serialize))]
    Serialize { format: String, message: String },

    #[error("Parse error: {message}")]
    #[diagnostic(code(statblock::parse))]
    Parse {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("{message}")]
    #[diagnostic(code(statblock::command))]
    Command {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Validation error: {message}")]
    #[diagnostic(code(statblock::validate))]
    Validation {
        message: String,
        #[help]
        help: Option<String>,
    },
}

impl StatblockError {
    /// Build a malformed-input error for a machine-readable format.
    pub fn malformed(format: &str, source: impl std::fmt::Display) -> Self {
        StatblockError::MalformedInput {
            format: format.to_string(),
            message: format!("Invalid {} input.", format),
            help: Some(source.to_string()),
        }
    }
}

pub type Result<T> = std::result::Result<T, StatblockError>;
