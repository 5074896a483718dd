//! Parser configuration
//!
//! Loaded from YAML:
//!
//! ```yaml
//! # Keywords marking a step as a result node
//! result_keywords:
//!   - 扩张
//!   - 回升
//! # false replaces the built-in keywords instead of extending them
//! extend_defaults: true
//! ```

use crate::chain::{ChainParser, ResultKeywords};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur while loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParserConfig {
    #[serde(default)]
    pub result_keywords: Vec<String>,
    #[serde(default = "default_true")]
    pub extend_defaults: bool,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            result_keywords: Vec::new(),
            extend_defaults: true,
        }
    }
}

impl ParserConfig {
    pub fn from_yaml(yaml: &str) -> ConfigResult<Self> {
        // An empty document deserializes as null
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(yaml)?)
    }

    pub fn load(path: &Path) -> ConfigResult<Self> {
        let yaml = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_yaml(&yaml)?;
        tracing::debug!(
            path = %path.display(),
            keywords = config.result_keywords.len(),
            extend_defaults = config.extend_defaults,
            "loaded parser config"
        );
        Ok(config)
    }

    /// Default location: `<config_dir>/pathchain/config.yaml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("pathchain").join("config.yaml"))
    }

    /// Load from the default location, falling back to defaults if absent.
    pub fn discover() -> ConfigResult<Self> {
        match Self::default_path() {
            Some(path) if path.is_file() => Self::load(&path),
            _ => {
                tracing::debug!("no parser config found, using defaults");
                Ok(Self::default())
            }
        }
    }

    pub fn keywords(&self) -> ResultKeywords {
        if self.extend_defaults {
            ResultKeywords::default().with(self.result_keywords.iter().cloned())
        } else {
            if self.result_keywords.is_empty() {
                tracing::warn!("extend_defaults is false with no keywords; only last steps are results");
            }
            ResultKeywords::new(self.result_keywords.iter().cloned())
        }
    }

    pub fn build_parser(&self) -> ChainParser {
        ChainParser::new(self.keywords())
    }
}
