//! Configuration loading from disk and environment.

use std::fs;
use std::path::Path;

use crate::config::schema::{AppConfig, LivePreviewConfig};
use crate::config::validation::{validate_config, ValidationError};

pub const ENV_API_KEY: &str = "CONTENTSTACK_API_KEY";
pub const ENV_DELIVERY_TOKEN: &str = "CONTENTSTACK_DELIVERY_TOKEN";
pub const ENV_ENVIRONMENT: &str = "CONTENTSTACK_ENVIRONMENT";
pub const ENV_HOST: &str = "CONTENTSTACK_HOST";
pub const ENV_MANAGEMENT_TOKEN: &str = "CONTENTSTACK_MANAGEMENT_TOKEN";
pub const ENV_PREVIEW_HOST: &str = "CONTENTSTACK_PREVIEW_HOST";
pub const ENV_APP_HOST: &str = "CONTENTSTACK_APP_HOST";

/// Error type for configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Validation(Vec<ValidationError>),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "IO error: {}", e),
            ConfigError::Parse(e) => write!(f, "Parse error: {}", e),
            ConfigError::Validation(errors) => {
                write!(f, "Validation failed: ")?;
                for (i, err) in errors.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", err)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Load configuration from an optional TOML file, apply environment
/// overrides, and validate.
pub fn load_config(path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let mut config = match path {
        Some(path) => parse_file(path)?,
        None => AppConfig::default(),
    };

    apply_env_overrides(&mut config, |key| std::env::var(key).ok());
    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

fn parse_file(path: &Path) -> Result<AppConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(ConfigError::Io)?;
    toml::from_str(&content).map_err(ConfigError::Parse)
}

/// Overlay `CONTENTSTACK_*` variables onto `config`.
///
/// Empty variables are ignored. A management token turns live preview on.
pub fn apply_env_overrides<F>(config: &mut AppConfig, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
    let cms = &mut config.cms;

    if let Some(v) = get(ENV_API_KEY) {
        cms.api_key = v;
    }
    if let Some(v) = get(ENV_DELIVERY_TOKEN) {
        cms.delivery_token = v;
    }
    if let Some(v) = get(ENV_ENVIRONMENT) {
        cms.environment = v;
    }
    if let Some(v) = get(ENV_HOST) {
        cms.base_url = host_to_base_url(&v);
    }

    if let Some(token) = get(ENV_MANAGEMENT_TOKEN) {
        let preview = cms.live_preview.get_or_insert_with(|| LivePreviewConfig {
            management_token: String::new(),
            preview_host: String::new(),
            app_host: String::new(),
        });
        preview.management_token = token;
    }
    if let Some(preview) = cms.live_preview.as_mut() {
        if let Some(v) = get(ENV_PREVIEW_HOST) {
            preview.preview_host = v;
        }
        if let Some(v) = get(ENV_APP_HOST) {
            preview.app_host = v;
        }
    }
}

/// Accept either a bare host (`eu-cdn.contentstack.com`) or a full URL.
pub fn host_to_base_url(host: &str) -> String {
    let host = host.trim();
    if host.starts_with("http://") || host.starts_with("https://") {
        host.to_string()
    } else {
        format!("https://{}", host)
    }
}
