//! Service configuration resolution
//!
//! Each setting resolves command line → environment → TOML → compiled
//! default. Blank values at any level count as unset.

use std::path::PathBuf;
use std::time::Duration;

use career_common::config::{
    resolve_setting, TomlConfig, DEFAULT_CONTENT_TIMEOUT_MS, DEFAULT_REMOTE_TIMEOUT_MS,
};
use tracing::info;

use crate::content::http_client::ContentConfig;
use crate::inference::InferenceConfig;

pub const MODEL_DIR_ENV: &str = "CAREER_MODEL_DIR";
pub const REMOTE_URL_ENV: &str = "CAREER_REMOTE_INFERENCE_URL";
pub const CONTENT_URL_ENV: &str = "CAREER_CONTENT_URL";
pub const CONTENT_KEY_ENV: &str = "CAREER_CONTENT_API_KEY";

/// Values supplied on the command line
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub port: Option<u16>,
    pub model_dir: Option<String>,
    pub remote_url: Option<String>,
    pub content_url: Option<String>,
    pub content_api_key: Option<String>,
}

/// Fully resolved settings for one service instance
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub port: u16,
    pub log_level: String,
    pub inference: InferenceConfig,
    pub content: ContentConfig,
}

impl ServiceConfig {
    pub fn resolve(cli: &CliOverrides, toml: &TomlConfig) -> Self {
        let model_dir = resolve_setting(
            "model_dir",
            cli.model_dir.as_deref(),
            MODEL_DIR_ENV,
            toml.inference
                .model_dir
                .as_ref()
                .and_then(|p| p.to_str()),
        )
        .map(PathBuf::from);

        let remote_url = resolve_setting(
            "remote_url",
            cli.remote_url.as_deref(),
            REMOTE_URL_ENV,
            toml.inference.remote_url.as_deref(),
        );

        let content_url = resolve_setting(
            "content_url",
            cli.content_url.as_deref(),
            CONTENT_URL_ENV,
            toml.content.base_url.as_deref(),
        );

        let content_api_key = resolve_setting(
            "content_api_key",
            cli.content_api_key.as_deref(),
            CONTENT_KEY_ENV,
            toml.content.api_key.as_deref(),
        );

        let config = Self {
            port: cli.port.unwrap_or(toml.port),
            log_level: toml.logging.level.clone(),
            inference: InferenceConfig {
                model_dir,
                remote_url,
                remote_timeout: millis_or(toml.inference.remote_timeout_ms, DEFAULT_REMOTE_TIMEOUT_MS),
            },
            content: ContentConfig {
                base_url: content_url,
                api_key: content_api_key,
                timeout: millis_or(toml.content.timeout_ms, DEFAULT_CONTENT_TIMEOUT_MS),
                requests_per_second: toml.content.requests_per_second,
            },
        };

        info!(
            port = config.port,
            model_dir = ?config.inference.model_dir,
            remote_configured = config.inference.remote_url.is_some(),
            content_configured = config.content.base_url.is_some(),
            "Configuration resolved"
        );
        config
    }
}

/// Zero timeouts would fail every call; treat them as unset
fn millis_or(value: u64, default: u64) -> Duration {
    Duration::from_millis(if value == 0 { default } else { value })
}
