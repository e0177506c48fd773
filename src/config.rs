//! Configuration loading: a TOML file with environment overrides

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::ConfigError;

/// Environment variable pointing at an alternative config file
pub const CONFIG_PATH_ENV: &str = "TUBE_BROWSER_CONFIG";
/// Environment variable overriding the API key
pub const API_KEY_ENV: &str = "RAPIDAPI_KEY";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api: ApiConfig,
    pub player: PlayerConfig,
    pub log: LogConfig,
}

/// Where the video metadata comes from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base endpoint every request path is appended to
    pub base_url: String,
    /// Value of the `X-RapidAPI-Host` header
    pub host: String,
    /// Value of the `X-RapidAPI-Key` header
    pub api_key: String,
    /// Upper bound for a single request
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://youtube138.p.rapidapi.com".to_string(),
            host: "youtube138.p.rapidapi.com".to_string(),
            api_key: String::new(),
            timeout_secs: 30,
        }
    }
}

/// External program used to play a watch URL
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    pub command: String,
    /// Extra arguments placed before the URL
    pub args: Vec<String>,
    /// Start playback as soon as a video page opens
    pub autoplay: bool,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            command: "mpv".to_string(),
            args: Vec::new(),
            autoplay: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Filter used when `RUST_LOG` is unset
    pub filter: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filter: "tube_browser=info".to_string(),
        }
    }
}

impl Config {
    /// Load from the default location, falling back to defaults when no
    /// file exists, then apply environment overrides
    pub fn load() -> Result<Self, ConfigError> {
        let path = resolve_config_path()?;
        let config = if path.exists() {
            Self::load_from_path(&path)?
        } else {
            Self::default()
        };
        Ok(config.with_api_key_override(std::env::var(API_KEY_ENV).ok()))
    }

    /// Load configuration from a specific path
    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Replace the API key when an override is present and non-empty
    pub fn with_api_key_override(mut self, key: Option<String>) -> Self {
        if let Some(key) = key.filter(|k| !k.trim().is_empty()) {
            self.api.api_key = key;
        }
        self
    }
}

/// Resolve the configuration file path
pub fn resolve_config_path() -> Result<PathBuf, ConfigError> {
    if let Ok(path) = std::env::var(CONFIG_PATH_ENV) {
        return Ok(PathBuf::from(path));
    }

    let config_dir = dirs::config_dir().ok_or(ConfigError::MissingDirectory)?;
    Ok(config_dir.join("tube-browser").join("config.toml"))
}
