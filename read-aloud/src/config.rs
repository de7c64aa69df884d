//! read-aloud configuration management.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::text::DEFAULT_MAX_CHUNK;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadAloudConfig {
    /// Default voice. None means the engine default.
    #[serde(default)]
    pub voice: Option<String>,

    /// Speech engine (espeak, say). None means auto-detect.
    #[serde(default)]
    pub engine: Option<String>,

    /// Maximum chunk length in characters
    #[serde(default = "default_max_chunk")]
    pub max_chunk: usize,
}

fn default_max_chunk() -> usize {
    DEFAULT_MAX_CHUNK
}

impl Default for ReadAloudConfig {
    fn default() -> Self {
        Self {
            voice: None,
            engine: None,
            max_chunk: default_max_chunk(),
        }
    }
}

impl ReadAloudConfig {
    /// Get the config file path: ~/.config/read-aloud/config.toml
    pub fn config_path() -> Result<PathBuf> {
        let home = std::env::var("HOME").or_else(|_| std::env::var("USERPROFILE"))?;
        Ok(PathBuf::from(home)
            .join(".config")
            .join("read-aloud")
            .join("config.toml"))
    }

    /// Load config from file, returning defaults if the file doesn't exist
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;

        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path)?;
        let config: ReadAloudConfig = toml::from_str(&content)?;
        Ok(config)
    }

    /// Save config to file
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        fs::write(&path, content)?;
        Ok(())
    }
}
