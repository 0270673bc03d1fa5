//! Application configuration structures.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Listings API settings
    #[serde(default)]
    pub api: ApiConfig,

    /// Local store settings
    #[serde(default)]
    pub storage: StorageConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration or return default if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(&path).unwrap_or_else(|e| {
            log::warn!(
                "Config load failed from {:?}: {}. Using defaults.",
                path.as_ref(),
                e
            );
            Self::default()
        })
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if self.api.user_agent.trim().is_empty() {
            return Err(AppError::config("api.user_agent is empty"));
        }
        url::Url::parse(&self.api.endpoint)
            .map_err(|e| AppError::config(format!("api.endpoint is invalid: {e}")))?;
        if self.api.per_page == 0 {
            return Err(AppError::config("api.per_page must be > 0"));
        }
        if self.api.pages == 0 {
            return Err(AppError::config("api.pages must be > 0"));
        }
        if self.api.timeout_secs == Some(0) {
            return Err(AppError::config("api.timeout_secs must be > 0"));
        }
        if self.storage.file.trim().is_empty() {
            return Err(AppError::config("storage.file is empty"));
        }
        Ok(())
    }

    /// Resolve the store file against the data directory.
    pub fn storage_path(&self, data_dir: &Path) -> PathBuf {
        data_dir.join(&self.storage.file)
    }
}

/// Listings API request settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Listings endpoint
    #[serde(default = "defaults::endpoint")]
    pub endpoint: String,

    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Items requested per page
    #[serde(default = "defaults::per_page")]
    pub per_page: u32,

    /// Pages fetched when a search does not say otherwise
    #[serde(default = "defaults::pages")]
    pub pages: u32,

    /// Request timeout in seconds (client default when unset)
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            endpoint: defaults::endpoint(),
            user_agent: defaults::user_agent(),
            per_page: defaults::per_page(),
            pages: defaults::pages(),
            timeout_secs: None,
        }
    }
}

/// Flat-file store settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Store file name, relative to the data directory
    #[serde(default = "defaults::storage_file")]
    pub file: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            file: defaults::storage_file(),
        }
    }
}

mod defaults {
    pub fn endpoint() -> String {
        "https://api.hh.ru/vacancies".into()
    }
    pub fn user_agent() -> String {
        "HH-User-Agent".into()
    }
    pub fn per_page() -> u32 {
        100
    }
    pub fn pages() -> u32 {
        1
    }
    pub fn storage_file() -> String {
        "vacancies.json".into()
    }
}
