use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application configuration loaded from settings.toml
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub provider: ProviderConfig,
    #[serde(default)]
    pub storage: StorageConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_max_upload_bytes() -> usize {
    25 * 1024 * 1024
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// "openai" or "ollama"
    #[serde(default = "default_provider_kind")]
    pub kind: String,
    #[serde(default = "default_provider_url")]
    pub url: String,
    #[serde(default = "default_model")]
    pub model: String,
    /// Low temperature on purpose: filenames must be stable and parseable
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default)]
    pub api_key: Option<String>,
}

fn default_provider_kind() -> String {
    "openai".to_string()
}

fn default_provider_url() -> String {
    "https://api.openai.com".to_string()
}

fn default_model() -> String {
    "gpt-4".to_string()
}

fn default_temperature() -> f32 {
    0.3
}

fn default_timeout_secs() -> u64 {
    60
}

impl ProviderConfig {
    /// Get the provider API key from config or environment variable
    pub fn api_key(&self) -> Option<String> {
        self.api_key
            .clone()
            .or_else(|| std::env::var("OPENAI_API_KEY").ok())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_inbox_dir")]
    pub inbox_dir: String,
    #[serde(default = "default_organized_dir")]
    pub organized_dir: String,
    /// When false, a file already sitting at the destination fails the
    /// placement with `destination_exists` instead of being replaced
    #[serde(default)]
    pub overwrite: bool,
}

fn default_inbox_dir() -> String {
    "uploads".to_string()
}

fn default_organized_dir() -> String {
    "organized".to_string()
}

impl StorageConfig {
    pub fn inbox_dir(&self) -> PathBuf {
        PathBuf::from(shellexpand::tilde(&self.inbox_dir).into_owned())
    }

    pub fn organized_root(&self) -> PathBuf {
        PathBuf::from(shellexpand::tilde(&self.organized_dir).into_owned())
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Config = toml::from_str(&content).context("Failed to parse config file")?;

        Ok(config)
    }

    /// Load configuration from default locations or return defaults
    pub fn load() -> Result<Self> {
        let default_paths = [
            "config/settings.toml",
            "./settings.toml",
            "~/.config/docshelf/settings.toml",
        ];

        for path in &default_paths {
            let expanded = PathBuf::from(shellexpand::tilde(path).into_owned());
            if expanded.exists() {
                return Self::from_file(expanded);
            }
        }

        Ok(Self::default())
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            max_upload_bytes: default_max_upload_bytes(),
        }
    }
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            kind: default_provider_kind(),
            url: default_provider_url(),
            model: default_model(),
            temperature: default_temperature(),
            timeout_secs: default_timeout_secs(),
            api_key: None,
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            inbox_dir: default_inbox_dir(),
            organized_dir: default_organized_dir(),
            overwrite: false,
        }
    }
}
