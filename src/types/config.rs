//! Configuration for Mnemo.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::MnemoResult;

/// Main configuration for Mnemo.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// General settings.
    #[serde(default)]
    pub general: GeneralConfig,

    /// Storage settings.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Remote model settings.
    #[serde(default)]
    pub model: ModelConfig,
}

/// General settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Log format (text, json).
    #[serde(default = "default_log_format")]
    pub log_format: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_format: default_log_format(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "text".to_string()
}

/// Persistent store settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// SQLite database path.
    #[serde(default = "default_db_path")]
    pub db_path: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            db_path: default_db_path(),
        }
    }
}

fn default_db_path() -> PathBuf {
    PathBuf::from("qa_database.db")
}

/// Settings for the remote completion model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Model repository id on the Hugging Face Hub.
    #[serde(default = "default_repo_id")]
    pub repo_id: String,

    /// API token. Anonymous access works but is heavily rate-limited.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_token: Option<String>,

    /// Inference API base URL override (self-hosted endpoints, tests).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,

    /// Sampling temperature.
    #[serde(default = "default_temperature")]
    pub temperature: f64,

    /// Maximum number of generated tokens.
    #[serde(default = "default_max_new_tokens")]
    pub max_new_tokens: u32,

    /// Request timeout (in seconds). Expiry surfaces as an upstream error.
    #[serde(default = "default_model_timeout")]
    pub timeout_secs: u64,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            repo_id: default_repo_id(),
            api_token: None,
            endpoint: None,
            temperature: default_temperature(),
            max_new_tokens: default_max_new_tokens(),
            timeout_secs: default_model_timeout(),
        }
    }
}

fn default_repo_id() -> String {
    "mistralai/Mistral-7B-Instruct-v0.3".to_string()
}

fn default_temperature() -> f64 {
    0.7
}

fn default_max_new_tokens() -> u32 {
    128
}

fn default_model_timeout() -> u64 {
    60
}

impl Config {
    /// Loads configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> MnemoResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Saves configuration to a TOML file.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> MnemoResult<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Creates default configuration.
    pub fn default_config() -> Self {
        Self {
            general: GeneralConfig::default(),
            storage: StorageConfig::default(),
            model: ModelConfig::default(),
        }
    }

    /// Tries to load configuration from current directory or uses default.
    pub fn load_or_default() -> Self {
        Self::load("mnemo.toml").unwrap_or_else(|_| Self::default_config())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::default_config()
    }
}
