use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::constants;
use crate::error::{Result, ScrapeError};

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    pub catalog: CatalogConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    pub base_url: String,
    pub fetch_limit: usize,
    pub timeout_seconds: u64,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub data_dir: String,
    pub meta_path: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            catalog: CatalogConfig::default(),
            output: OutputConfig::default(),
        }
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            base_url: constants::CATALOG_BASE_URL.to_string(),
            fetch_limit: constants::DEFAULT_FETCH_LIMIT,
            timeout_seconds: 30,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            data_dir: "data".to_string(),
            meta_path: "META.json".to_string(),
        }
    }
}

impl Config {
    /// Load `config.toml` from the working directory; every field is
    /// optional, and a missing file means all defaults.
    pub fn load_or_default() -> Result<Self> {
        let config_path = Path::new("config.toml");
        if !config_path.exists() {
            return Ok(Self::default());
        }
        let config_content = fs::read_to_string(config_path).map_err(|e| {
            ScrapeError::Config(format!(
                "Failed to read config file '{}': {}",
                config_path.display(),
                e
            ))
        })?;
        let config: Config = toml::from_str(&config_content)?;
        Ok(config)
    }
}
