//! Configuration loading and management.
//!
//! Configuration is loaded with the following precedence:
//! 1. Environment variables (`AGRIPLAY_*`)
//! 2. Config file (`~/.agriplay/config.toml`)
//! 3. Defaults

use crate::error::{Error, Result};
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::PathBuf;

/// Main configuration struct.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// Storage configuration.
    pub storage: StorageConfig,

    /// Chat session configuration.
    pub chat: ChatConfig,

    /// Crop-recommendation service configuration.
    pub ml_api: MlApiConfig,
}

/// Storage configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Path to the agriplay home directory.
    pub path: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: default_agriplay_home(),
        }
    }
}

/// Chat session configuration.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ChatConfig {
    /// Key the session list is stored under (`chat_history` in
    /// single-session installs).
    pub sessions_key: String,

    /// Title shown for a session whose first message is empty.
    pub untitled_title: String,

    /// Characters of the first message kept in the title.
    pub title_max_chars: usize,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            sessions_key: "chat_sessions".to_string(),
            untitled_title: "Percakapan Baru".to_string(),
            title_max_chars: 30,
        }
    }
}

/// Crop-recommendation service configuration.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct MlApiConfig {
    /// Base URL of the ML service, without trailing path.
    pub base_url: String,

    /// Client-side request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for MlApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8000".to_string(),
            timeout_secs: 5,
        }
    }
}

/// Get the default agriplay home directory.
fn default_agriplay_home() -> PathBuf {
    dirs::home_dir().map_or_else(|| PathBuf::from(".agriplay"), |h| h.join(".agriplay"))
}

/// Load configuration with precedence: env vars → file → defaults.
///
/// # Errors
///
/// Returns an error if the config file exists but cannot be parsed.
pub fn load_config() -> Result<Config> {
    let mut config = Config::default();

    let config_path = get_config_path();
    if config_path.exists() {
        let contents = fs::read_to_string(&config_path).map_err(Error::Storage)?;
        config = toml::from_str(&contents).map_err(|e| Error::Config(e.to_string()))?;
    }

    apply_env_overrides(&mut config);

    Ok(config)
}

/// Get the path to the config file.
fn get_config_path() -> PathBuf {
    if let Ok(path) = env::var("AGRIPLAY_CONFIG") {
        return PathBuf::from(path);
    }

    if let Ok(home) = env::var("AGRIPLAY_HOME") {
        return PathBuf::from(home).join("config.toml");
    }

    default_agriplay_home().join("config.toml")
}

/// Apply environment variable overrides to config.
fn apply_env_overrides(config: &mut Config) {
    if let Ok(path) = env::var("AGRIPLAY_STORAGE_PATH") {
        config.storage.path = PathBuf::from(path);
    } else if let Ok(home) = env::var("AGRIPLAY_HOME") {
        config.storage.path = PathBuf::from(home);
    }

    if let Ok(key) = env::var("AGRIPLAY_SESSIONS_KEY") {
        config.chat.sessions_key = key;
    }

    if let Ok(url) = env::var("AGRIPLAY_ML_API_URL") {
        config.ml_api.base_url = url;
    }

    if let Ok(val) = env::var("AGRIPLAY_ML_API_TIMEOUT") {
        if let Ok(secs) = val.parse() {
            config.ml_api.timeout_secs = secs;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = Config::default();
        assert_eq!(config.chat.sessions_key, "chat_sessions");
        assert_eq!(config.chat.untitled_title, "Percakapan Baru");
        assert_eq!(config.chat.title_max_chars, 30);
        assert_eq!(config.ml_api.timeout_secs, 5);
    }

    #[test]
    fn parse_config_toml() {
        let toml = r#"
            [storage]
            path = "/tmp/agriplay"

            [chat]
            sessions_key = "chat_history"
            untitled_title = "New chat"

            [ml_api]
            base_url = "http://10.0.2.2:8000"
            timeout_secs = 10
        "#;

        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.storage.path, PathBuf::from("/tmp/agriplay"));
        assert_eq!(config.chat.sessions_key, "chat_history");
        assert_eq!(config.chat.untitled_title, "New chat");
        assert_eq!(config.ml_api.base_url, "http://10.0.2.2:8000");
        assert_eq!(config.ml_api.timeout_secs, 10);
    }

    #[test]
    fn partial_config_uses_defaults() {
        let toml = r"
            [ml_api]
            timeout_secs = 2
        ";

        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.ml_api.timeout_secs, 2);
        assert_eq!(config.ml_api.base_url, "http://127.0.0.1:8000"); // Default
        assert_eq!(config.chat, ChatConfig::default());
    }
}
