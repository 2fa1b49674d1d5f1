//! Project configuration (statblock.yaml).
//!
//! Holds default source/target formats, the output directory and the file
//! extensions picked up when a directory is converted. Every field is
//! optional; CLI flags override whatever the file says.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use walkdir::WalkDir;

use crate::error::{Result, StatblockError};
use crate::format::AutoFormat;

/// Name of the configuration file looked up in the working directory.
pub const CONFIG_FILENAME: &str = "statblock.yaml";

/// Project configuration loaded from statblock.yaml.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Reader used for input files.
    pub source: String,

    /// Writers applied to every input.
    pub targets: Vec<String>,

    /// Output directory for converted files.
    pub output: PathBuf,

    /// Run the advisory schema check on converted output.
    pub validate: bool,

    /// Extensions picked up when an input is a directory.
    pub extensions: Vec<String>,
}

fn default_output() -> PathBuf {
    PathBuf::from("dist")
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source: AutoFormat::NAME.to_string(),
            targets: vec!["JSON".to_string()],
            output: default_output(),
            validate: true,
            extensions: ["txt", "json", "yaml", "yml"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

impl Config {
    /// Load configuration from a statblock.yaml file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| StatblockError::Io {
            path: path.to_path_buf(),
            message: format!("Failed to read config: {}", e),
        })?;

        Self::parse(&content)
    }

    /// Parse configuration from a YAML string.
    pub fn parse(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content).map_err(|e| StatblockError::Parse {
            message: format!("Invalid config: {}", e),
            help: Some(format!("Check {} syntax", CONFIG_FILENAME)),
        })
    }

    /// Load `statblock.yaml` from `dir` when present, defaults otherwise.
    pub fn discover(dir: &Path) -> Result<Self> {
        let path = dir.join(CONFIG_FILENAME);
        if path.is_file() {
            Self::load(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Serialize back to YAML, as written by `statblock init`.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).map_err(|e| StatblockError::Serialize {
            format: "YAML".to_string(),
            message: e.to_string(),
        })
    }

    /// Whether a file's extension is one this project converts.
    pub fn accepts(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| self.extensions.iter().any(|e| e.eq_ignore_ascii_case(ext)))
    }

    /// Expand input paths: files are kept as given, directories are walked
    /// for files with an accepted extension. The result is sorted.
    pub fn collect_inputs(&self, paths: &[PathBuf]) -> Result<Vec<PathBuf>> {
        let mut files = Vec::new();

        for path in paths {
            if path.is_file() {
                files.push(path.clone());
                continue;
            }
            if !path.exists() {
                return Err(StatblockError::Io {
                    path: path.clone(),
                    message: "No such file or directory".to_string(),
                });
            }

            let mut found: Vec<PathBuf> = WalkDir::new(path)
                .follow_links(true)
                .into_iter()
                .filter_map(|e| e.ok())
                .filter(|e| e.file_type().is_file())
                .map(|e| e.into_path())
                .filter(|p| self.accepts(p) && !is_config_file(p))
                .collect();
            found.sort();
            files.extend(found);
        }

        Ok(files)
    }
}

fn is_config_file(path: &Path) -> bool {
    path.file_name().and_then(|n| n.to_str()) == Some(CONFIG_FILENAME)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_parse_minimal_config() {
        let config = Config::parse("output: build").unwrap();

        assert_eq!(config.output, PathBuf::from("build"));
        assert_eq!(config.source, "Automagic");
        assert_eq!(config.targets, vec!["JSON"]);
        assert!(config.validate);
    }

    #[test]
    fn test_parse_full_config() {
        let yaml = r#"
source: Statblock Text
targets:
  - JSON
  - Markdown
output: out/creatures
validate: false
extensions: [txt]
"#;
        let config = Config::parse(yaml).unwrap();

        assert_eq!(config.source, "Statblock Text");
        assert_eq!(config.targets, vec!["JSON", "Markdown"]);
        assert_eq!(config.output, PathBuf::from("out/creatures"));
        assert!(!config.validate);
        assert_eq!(config.extensions, vec!["txt"]);
    }

    #[test]
    fn test_parse_empty_config() {
        assert_eq!(Config::parse("").unwrap(), Config::default());
    }

    #[test]
    fn test_parse_invalid_config() {
        let err = Config::parse("targets: {").unwrap_err();
        assert!(matches!(err, StatblockError::Parse { .. }));
    }

    #[test]
    fn test_yaml_round_trip() {
        let config = Config::default();
        let yaml = config.to_yaml().unwrap();
        assert_eq!(Config::parse(&yaml).unwrap(), config);
    }

    #[test]
    fn test_accepts() {
        let config = Config::default();
        assert!(config.accepts(Path::new("goblin.txt")));
        assert!(config.accepts(Path::new("goblin.YAML")));
        assert!(!config.accepts(Path::new("goblin.md")));
        assert!(!config.accepts(Path::new("README")));
    }

    #[test]
    fn test_discover_missing_file_uses_defaults() {
        let dir = tempdir().unwrap();
        assert_eq!(Config::discover(dir.path()).unwrap(), Config::default());
    }

    #[test]
    fn test_collect_inputs_walks_directories() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("monsters/goblins")).unwrap();
        fs::write(dir.path().join("monsters/wolf.txt"), "WOLF").unwrap();
        fs::write(dir.path().join("monsters/goblins/sniper.txt"), "GOBLIN").unwrap();
        fs::write(dir.path().join("monsters/notes.md"), "# notes").unwrap();
        fs::write(dir.path().join("monsters/statblock.yaml"), "output: x").unwrap();

        let config = Config::default();
        let files = config
            .collect_inputs(&[dir.path().join("monsters")])
            .unwrap();

        let names: Vec<String> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["sniper.txt", "wolf.txt"]);
    }

    #[test]
    fn test_collect_inputs_missing_path() {
        let dir = tempdir().unwrap();
        let result = Config::default().collect_inputs(&[dir.path().join("nope")]);
        assert!(result.is_err());
    }
}
