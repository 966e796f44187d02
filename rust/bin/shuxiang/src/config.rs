//! Client configuration.
//!
//! Reads/writes `~/.shuxiang/config.toml`.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use shuxiang_client::DEFAULT_BASE_URL;

/// Environment variable that overrides `api_url`.
pub const API_URL_ENV: &str = "SHUXIANG_API_URL";

/// Client configuration file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Backend base URL (e.g. "http://localhost:8080/api").
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub api_url: String,

    /// Where the client keeps its storage file (default: ~/.shuxiang).
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub data_dir: String,
}

impl ClientConfig {
    /// Default config file path: ~/.shuxiang/config.toml.
    pub fn default_path() -> PathBuf {
        dirs_path().join("config.toml")
    }

    /// Load config from disk, or return default if file doesn't exist.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let config: ClientConfig = toml::from_str(&content)?;
        Ok(config)
    }

    /// Save config to disk.
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Effective base URL: environment, then file, then the built-in default.
    pub fn api_url(&self) -> String {
        self.api_url_with(std::env::var(API_URL_ENV).ok())
    }

    fn api_url_with(&self, env: Option<String>) -> String {
        env.filter(|v| !v.trim().is_empty())
            .or_else(|| Some(self.api_url.clone()).filter(|v| !v.is_empty()))
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
    }

    pub fn data_dir(&self) -> PathBuf {
        if self.data_dir.is_empty() {
            dirs_path()
        } else {
            PathBuf::from(&self.data_dir)
        }
    }

    /// The durable client storage file.
    pub fn storage_path(&self) -> PathBuf {
        self.data_dir().join("client.redb")
    }
}

/// Return the Shuxiang config directory (~/.shuxiang).
fn dirs_path() -> PathBuf {
    let home = std::env::var("HOME")
        .or_else(|_| std::env::var("USERPROFILE"))
        .unwrap_or_else(|_| ".".to_string());
    PathBuf::from(home).join(".shuxiang")
}
