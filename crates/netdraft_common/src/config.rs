//! Netdraft configuration.
//!
//! Configuration lives in a TOML file under the user config directory
//! (override with $NETDRAFT_CONFIG). A missing or unreadable file falls back
//! to defaults; $GEMINI_API_KEY always overrides the file's key.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use tracing::warn;

pub const CONFIG_ENV: &str = "NETDRAFT_CONFIG";
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NetdraftConfig {
    /// Address the daemon binds to
    pub listen_addr: String,
    pub gemini: GeminiSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeminiSettings {
    /// Upstream API key; unset means the chat proxy refuses requests
    pub api_key: Option<String>,
    pub model: String,
    pub endpoint: String,
    pub timeout_secs: u64,
}

impl Default for NetdraftConfig {
    fn default() -> Self {
        Self {
            listen_addr: "127.0.0.1:7870".to_string(),
            gemini: GeminiSettings::default(),
        }
    }
}

impl Default for GeminiSettings {
    fn default() -> Self {
        Self {
            api_key: None,
            model: "gemini-pro".to_string(),
            endpoint: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            timeout_secs: 60,
        }
    }
}

impl NetdraftConfig {
    /// Resolve the config file location
    pub fn config_path() -> PathBuf {
        if let Ok(path) = std::env::var(CONFIG_ENV) {
            return PathBuf::from(path);
        }
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("netdraft")
            .join("config.toml")
    }

    /// Load the configuration, falling back to defaults on any problem.
    pub fn load() -> Self {
        let path = Self::config_path();
        let mut config = match fs::read_to_string(&path) {
            Ok(raw) => match toml::from_str(&raw) {
                Ok(config) => config,
                Err(e) => {
                    warn!(path = %path.display(), "invalid config, using defaults: {e}");
                    Self::default()
                }
            },
            Err(_) => Self::default(),
        };
        if let Ok(key) = std::env::var(API_KEY_ENV) {
            if !key.is_empty() {
                config.gemini.api_key = Some(key);
            }
        }
        config
    }
}
