//! Nexus configuration: TOML file + `NEXUS__*` environment overrides.
//!
//! | Source | Example |
//! |--------|---------|
//! | `NEXUS_CONFIG` (path) | `config/nexus.toml` (default) |
//! | `NEXUS__PORT` | `8080` |
//! | `NEXUS__LLM__MODEL` | `gemini-2.5-flash` |
//! | `API_KEY` / `GEMINI_API_KEY` | credential, never stored in the file |

use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_CONFIG_PATH: &str = "config/nexus.toml";
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_API_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Environment variables checked for the LLM credential, in order.
pub const API_KEY_VARS: &[&str] = &["API_KEY", "GEMINI_API_KEY"];

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_api_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}

/// Settings for the hosted generation endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmSettings {
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    /// Request timeout. Unset means the transport default.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            model: default_model(),
            api_base_url: default_api_base_url(),
            timeout_secs: None,
        }
    }
}

/// Application configuration for the gateway server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NexusConfig {
    /// Shown in the page header and `/api/v1/view`.
    pub app_name: String,
    pub host: String,
    pub port: u16,
    #[serde(default)]
    pub llm: LlmSettings,
}

impl Default for NexusConfig {
    fn default() -> Self {
        Self {
            app_name: "CS Ops Nexus".to_string(),
            host: "127.0.0.1".to_string(),
            port: 8080,
            llm: LlmSettings::default(),
        }
    }
}

impl NexusConfig {
    /// Load config. Precedence: env `NEXUS__*` > file at `NEXUS_CONFIG` (or `config/nexus.toml`) > defaults.
    pub fn load() -> Result<Self, config::ConfigError> {
        let config_path =
            std::env::var("NEXUS_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        Self::load_from(Path::new(&config_path))
    }

    /// Load config from a specific file. A missing file is not an error.
    pub fn load_from(path: &Path) -> Result<Self, config::ConfigError> {
        let defaults = NexusConfig::default();
        let builder = config::Config::builder()
            .set_default("app_name", defaults.app_name)?
            .set_default("host", defaults.host)?
            .set_default("port", i64::from(defaults.port))?
            .set_default("llm.model", defaults.llm.model)?
            .set_default("llm.api_base_url", defaults.llm.api_base_url)?;

        let builder = if path.exists() {
            builder.add_source(config::File::from(path))
        } else {
            tracing::debug!("config file {} not found, using defaults", path.display());
            builder
        };

        builder
            .add_source(config::Environment::with_prefix("NEXUS").separator("__"))
            .build()?
            .try_deserialize()
    }

    /// `host:port` for the listener.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Reads the LLM credential from the process environment. Blank values count as absent.
pub fn api_key_from_env() -> Option<String> {
    API_KEY_VARS
        .iter()
        .filter_map(|name| std::env::var(name).ok())
        .map(|v| v.trim().to_string())
        .find(|v| !v.is_empty())
}
