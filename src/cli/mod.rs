pub mod completions;
pub mod convert;
pub mod extract;
pub mod formats;
pub mod init;
pub mod validate;

use std::fs;
use std::path::Path;

use clap::{Parser, Subcommand};

use crate::error::{Result, StatblockError};

/// statblock - Draw Steel statblock converter
#[derive(Parser, Debug)]
#[command(name = "statblock")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Log parser decisions to stderr (same as RUST_LOG=debug)
    #[arg(long, short, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Convert statblocks between formats
    Convert(convert::ConvertArgs),

    /// Split a text file holding many statblocks into one file per creature
    Extract(extract::ExtractArgs),

    /// Check JSON or YAML statblocks against the schema
    Validate(validate::ValidateArgs),

    /// List available readers and writers
    Formats(formats::FormatsArgs),

    /// Initialize a project (generates statblock.yaml)
    Init(init::InitArgs),

    /// Generate shell completions
    Completions(completions::CompletionsArgs),
}

pub(crate) fn read_file(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| StatblockError::Io {
        path: path.to_path_buf(),
        message: format!("Failed to read file: {}", e),
    })
}

pub(crate) fn write_file(path: &Path, content: &str) -> Result<()> {
    let mut content = content.to_string();
    if !content.ends_with('\n') {
        content.push('\n');
    }
    fs::write(path, content).map_err(|e| StatblockError::Io {
        path: path.to_path_buf(),
        message: format!("Failed to write file: {}", e),
    })
}

pub(crate) fn ensure_dir(path: &Path) -> Result<()> {
    if path.exists() {
        return Ok(());
    }
    fs::create_dir_all(path).map_err(|e| StatblockError::Io {
        path: path.to_path_buf(),
        message: format!("Failed to create output directory: {}", e),
    })
}

/// File-name slug for a creature name: `Goblin Assassin` → `goblin-assassin`.
pub(crate) fn slug(name: &str) -> String {
    let words: Vec<String> = name
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(str::to_lowercase)
        .collect();
    if words.is_empty() {
        "statblock".to_string()
    } else {
        words.join("-")
    }
}
