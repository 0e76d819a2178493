//! # TuneGate Configuration Module
//!
//! This module provides configuration management for TuneGate, including:
//! - Loading configuration from a YAML file
//! - Falling back to an embedded default configuration
//! - Environment variable overrides for ports and provider credentials
//!
//! The configuration is built once at startup and injected into each
//! component; there is no global singleton. Components receive only the
//! sections they need.
//!
//! ## Usage
//!
//! ```no_run
//! use tgconfig::Config;
//!
//! let config = Config::load()?;
//! let port = config.server.http_port;
//! let key = config.providers.youtube.api_key.as_deref();
//! # Ok::<(), anyhow::Error>(())
//! ```

use anyhow::{Context, Result};
use serde::Deserialize;
use serde_yaml::Value;
use std::{env, fs, path::Path, time::Duration};
use tracing::info;

/// Embedded default configuration
const DEFAULT_CONFIG: &str = include_str!("tunegate.yaml");

/// Environment variable pointing at a user configuration file
const ENV_CONFIG_FILE: &str = "TUNEGATE_CONFIG";

/// Top-level TuneGate configuration
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub providers: ProvidersConfig,
    pub extractor: ExtractorConfig,
}

/// HTTP server settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub http_port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { http_port: 4000 }
    }
}

/// Third-party catalog provider settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ProvidersConfig {
    /// Timeout for every outbound catalog call, in seconds
    pub timeout_secs: u64,
    pub youtube: ProviderConfig,
    pub lastfm: ProviderConfig,
    pub radio_browser: ProviderConfig,
}

impl Default for ProvidersConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            youtube: ProviderConfig {
                base_url: "https://www.googleapis.com/youtube/v3".to_string(),
                api_key: None,
            },
            lastfm: ProviderConfig {
                base_url: "http://ws.audioscrobbler.com/2.0/".to_string(),
                api_key: None,
            },
            radio_browser: ProviderConfig {
                base_url: "https://de1.api.radio-browser.info".to_string(),
                api_key: None,
            },
        }
    }
}

/// One catalog provider: endpoint base plus optional credential
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct ProviderConfig {
    pub base_url: String,
    pub api_key: Option<String>,
}

/// External extraction tool settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ExtractorConfig {
    /// Tool name or absolute path (default: `yt-dlp`)
    pub tool: String,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            tool: "yt-dlp".to_string(),
        }
    }
}

impl Config {
    /// Load the configuration.
    ///
    /// Resolution order, later entries winning:
    /// 1. Embedded defaults (`tunegate.yaml`)
    /// 2. User file named by `TUNEGATE_CONFIG`, if set
    /// 3. Environment variables: `PORT`, `YOUTUBE_API_KEY`, `LASTFM_API_KEY`,
    ///    `TUNEGATE_YTDLP`
    pub fn load() -> Result<Self> {
        let mut config = match env::var(ENV_CONFIG_FILE) {
            Ok(path) => Self::load_file(&path)?,
            Err(_) => Self::parse_merged(None)?,
        };

        config.apply_env_overrides();
        Ok(config)
    }

    /// Load the configuration from an explicit file, then apply env overrides.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let mut config = Self::load_file(path.as_ref())?;
        config.apply_env_overrides();
        Ok(config)
    }

    fn load_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read configuration file {}", path.display()))?;
        let config = Self::parse_merged(Some(&content))
            .with_context(|| format!("Failed to parse configuration file {}", path.display()))?;
        info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Merge a user document over the embedded defaults and deserialize.
    ///
    /// Merging is recursive on mappings, so a file that sets only
    /// `providers.lastfm.api_key` keeps the default `base_url`.
    fn parse_merged(user: Option<&str>) -> Result<Self> {
        let base: Value = serde_yaml::from_str(DEFAULT_CONFIG)
            .context("Failed to parse embedded default configuration")?;

        let merged = match user {
            Some(content) => {
                let over: Value =
                    serde_yaml::from_str(content).context("Invalid YAML document")?;
                merge_values(base, over)
            }
            None => base,
        };

        serde_yaml::from_value(merged).context("Invalid configuration values")
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(port) = env::var("PORT") {
            if let Ok(port) = port.parse() {
                self.server.http_port = port;
            }
        }
        if let Ok(key) = env::var("YOUTUBE_API_KEY") {
            if !key.is_empty() {
                self.providers.youtube.api_key = Some(key);
            }
        }
        if let Ok(key) = env::var("LASTFM_API_KEY") {
            if !key.is_empty() {
                self.providers.lastfm.api_key = Some(key);
            }
        }
        if let Ok(tool) = env::var("TUNEGATE_YTDLP") {
            if !tool.is_empty() {
                self.extractor.tool = tool;
            }
        }
    }

    /// Provider call timeout as a `Duration`
    pub fn provider_timeout(&self) -> Duration {
        Duration::from_secs(self.providers.timeout_secs)
    }
}

/// Recursively merge `over` onto `base`; mappings merge key by key,
/// anything else is replaced by `over`.
fn merge_values(base: Value, over: Value) -> Value {
    match (base, over) {
        (Value::Mapping(mut base_map), Value::Mapping(over_map)) => {
            for (key, over_value) in over_map {
                let merged = match base_map.remove(&key) {
                    Some(base_value) => merge_values(base_value, over_value),
                    None => over_value,
                };
                base_map.insert(key, merged);
            }
            Value::Mapping(base_map)
        }
        (_, over) => over,
    }
}
