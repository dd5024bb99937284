use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Tool configuration loaded from docfix.yaml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DocfixConfig {
    /// Markdown content settings
    #[serde(default)]
    pub content: ContentConfig,

    /// Generator install settings
    #[serde(default)]
    pub generator: GeneratorConfig,
}

/// Where the markdown content lives and what to skip while scanning it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentConfig {
    /// Directory scanned for markdown files, relative to the config file
    /// (default: ".")
    #[serde(default = "default_root")]
    pub root: PathBuf,

    /// Directory names skipped during the scan
    #[serde(default = "default_exclude")]
    pub exclude: Vec<String>,
}

/// Where the generator's highlight.js module is installed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Explicit path to the installed highlight.js module; the usual
    /// install locations are probed when unset
    #[serde(default)]
    pub module_path: Option<PathBuf>,
}

fn default_root() -> PathBuf {
    PathBuf::from(".")
}

fn default_exclude() -> Vec<String> {
    vec!["_book".to_string(), "node_modules".to_string()]
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            root: default_root(),
            exclude: default_exclude(),
        }
    }
}

impl DocfixConfig {
    /// Load the tool config from a file path.
    /// Returns default config if the file doesn't exist.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;

        let config: DocfixConfig = serde_yaml::from_str(&content)
            .map_err(|e| ConfigError::Parse(path.to_path_buf(), e))?;

        Ok(config)
    }
}

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config {0}: {1}")]
    Io(PathBuf, std::io::Error),

    #[error("failed to parse config {0}: {1}")]
    Parse(PathBuf, serde_yaml::Error),
}
