//! Bootstrap configuration loading
//!
//! The TOML file only carries bootstrap concerns (port, logging, collaborator
//! endpoints). A missing or unreadable file is never fatal: the service logs
//! a warning and starts with compiled defaults.
//!
//! Per-setting priority:
//! 1. Command-line argument
//! 2. Environment variable
//! 3. TOML config file
//! 4. Compiled default

use crate::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Environment variable naming an explicit config file
pub const CONFIG_ENV_VAR: &str = "CAREER_CONFIG";

/// Default HTTP port for career-api
pub const DEFAULT_PORT: u16 = 5780;

/// Default remote inference timeout. Interactive path, keep it short.
pub const DEFAULT_REMOTE_TIMEOUT_MS: u64 = 3_000;

/// Default generative content timeout
pub const DEFAULT_CONTENT_TIMEOUT_MS: u64 = 8_000;

/// Default client-side rate limit for the generative service
pub const DEFAULT_CONTENT_RPS: u32 = 5;

/// Bootstrap configuration loaded from TOML
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct TomlConfig {
    /// HTTP server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Logging configuration (optional)
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Prediction tiers
    #[serde(default)]
    pub inference: InferenceSettings,

    /// Generative content collaborator
    #[serde(default)]
    pub content: ContentSettings,
}

impl Default for TomlConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            logging: LoggingConfig::default(),
            inference: InferenceSettings::default(),
            content: ContentSettings::default(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

/// Local and remote inference settings
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct InferenceSettings {
    /// Directory holding `model.json`, `scaler.json`, `label_encoder.json`
    #[serde(default)]
    pub model_dir: Option<PathBuf>,

    /// Remote prediction endpoint (full URL)
    #[serde(default)]
    pub remote_url: Option<String>,

    #[serde(default = "default_remote_timeout_ms")]
    pub remote_timeout_ms: u64,
}

impl Default for InferenceSettings {
    fn default() -> Self {
        Self {
            model_dir: None,
            remote_url: None,
            remote_timeout_ms: default_remote_timeout_ms(),
        }
    }
}

/// Generative content service settings
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ContentSettings {
    /// Base URL; topics are POSTed to `{base_url}/{topic}`
    #[serde(default)]
    pub base_url: Option<String>,

    /// Bearer token sent with every request
    #[serde(default)]
    pub api_key: Option<String>,

    #[serde(default = "default_content_timeout_ms")]
    pub timeout_ms: u64,

    #[serde(default = "default_content_rps")]
    pub requests_per_second: u32,
}

impl Default for ContentSettings {
    fn default() -> Self {
        Self {
            base_url: None,
            api_key: None,
            timeout_ms: default_content_timeout_ms(),
            requests_per_second: default_content_rps(),
        }
    }
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_remote_timeout_ms() -> u64 {
    DEFAULT_REMOTE_TIMEOUT_MS
}

fn default_content_timeout_ms() -> u64 {
    DEFAULT_CONTENT_TIMEOUT_MS
}

fn default_content_rps() -> u32 {
    DEFAULT_CONTENT_RPS
}

/// Platform config file location: `<config_dir>/career-rec/career-api.toml`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("career-rec").join("career-api.toml"))
}

/// Pick the config file: explicit path → `CAREER_CONFIG` → platform default
pub fn resolve_config_path(cli_arg: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = cli_arg {
        return Some(path.to_path_buf());
    }

    if let Some(path) = non_empty(std::env::var(CONFIG_ENV_VAR).ok()) {
        return Some(PathBuf::from(path));
    }

    default_config_path()
}

/// Parse a TOML config file, failing on any read or parse error
pub fn read_toml_config(path: &Path) -> Result<TomlConfig> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| Error::Config(format!("Read {} failed: {}", path.display(), e)))?;
    toml::from_str(&content)
        .map_err(|e| Error::Config(format!("Parse {} failed: {}", path.display(), e)))
}

/// Load the TOML config, degrading to defaults when it is missing or invalid
pub fn load_toml_config(path: Option<&Path>) -> TomlConfig {
    let Some(path) = path else {
        warn!("No config file location available, using compiled defaults");
        return TomlConfig::default();
    };

    if !path.exists() {
        warn!(path = %path.display(), "Config file not found, using compiled defaults");
        return TomlConfig::default();
    }

    match read_toml_config(path) {
        Ok(config) => {
            info!(path = %path.display(), "Loaded config file");
            config
        }
        Err(e) => {
            warn!(error = %e, "Config file unusable, using compiled defaults");
            TomlConfig::default()
        }
    }
}

/// Resolve one string setting: CLI → ENV → TOML. Blank values count as unset.
pub fn resolve_setting(
    name: &str,
    cli_value: Option<&str>,
    env_var: &str,
    toml_value: Option<&str>,
) -> Option<String> {
    if let Some(value) = non_empty(cli_value.map(str::to_string)) {
        debug!(setting = name, "Resolved from command line");
        return Some(value);
    }

    if let Some(value) = non_empty(std::env::var(env_var).ok()) {
        debug!(setting = name, env_var, "Resolved from environment");
        return Some(value);
    }

    if let Some(value) = non_empty(toml_value.map(str::to_string)) {
        debug!(setting = name, "Resolved from TOML config");
        return Some(value);
    }

    None
}

/// Treat empty and whitespace-only values as unset
pub fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_toml_uses_defaults() {
        let config: TomlConfig = toml::from_str("").unwrap();
        assert_eq!(config, TomlConfig::default());
        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.inference.remote_timeout_ms, DEFAULT_REMOTE_TIMEOUT_MS);
    }

    #[test]
    fn test_partial_sections_fill_defaults() {
        let config: TomlConfig = toml::from_str(
            r#"
            [content]
            base_url = "http://127.0.0.1:9000/content"
            "#,
        )
        .unwrap();

        assert_eq!(
            config.content.base_url.as_deref(),
            Some("http://127.0.0.1:9000/content")
        );
        assert_eq!(config.content.timeout_ms, DEFAULT_CONTENT_TIMEOUT_MS);
        assert_eq!(config.content.requests_per_second, DEFAULT_CONTENT_RPS);
    }

    #[test]
    fn test_non_empty() {
        assert_eq!(non_empty(Some("  ".to_string())), None);
        assert_eq!(non_empty(None), None);
        assert_eq!(non_empty(Some(" x ".to_string())), Some("x".to_string()));
    }
}
