//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the service.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct AppConfig {
    /// HTTP server settings.
    pub server: ServerConfig,

    /// Headless CMS connection settings.
    pub cms: CmsConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// HTTP server configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind address (e.g., "0.0.0.0:3000").
    pub bind_address: String,

    /// Total time allowed per inbound request, in seconds.
    pub request_timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:3000".to_string(),
            request_timeout_secs: 30,
        }
    }
}

/// Contentstack stack configuration.
#[derive(Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CmsConfig {
    /// Delivery API base URL (scheme and host, optional path prefix).
    pub base_url: String,

    /// Stack API key.
    pub api_key: String,

    /// Delivery token for the environment.
    pub delivery_token: String,

    /// Publishing environment name (e.g., "production").
    pub environment: String,

    /// Total time allowed per CMS request, in seconds.
    pub request_timeout_secs: u64,

    /// Connection establishment timeout, in seconds.
    pub connect_timeout_secs: u64,

    /// Live preview settings. Parsed and validated only.
    pub live_preview: Option<LivePreviewConfig>,
}

impl Default for CmsConfig {
    fn default() -> Self {
        Self {
            base_url: "https://cdn.contentstack.io".to_string(),
            api_key: String::new(),
            delivery_token: String::new(),
            environment: String::new(),
            request_timeout_secs: 10,
            connect_timeout_secs: 5,
            live_preview: None,
        }
    }
}

impl std::fmt::Debug for CmsConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CmsConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &redacted(&self.api_key))
            .field("delivery_token", &redacted(&self.delivery_token))
            .field("environment", &self.environment)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("connect_timeout_secs", &self.connect_timeout_secs)
            .field("live_preview", &self.live_preview)
            .finish()
    }
}

/// Live preview configuration, enabled by the presence of a management token.
#[derive(Clone, Deserialize, Serialize)]
pub struct LivePreviewConfig {
    /// Management token used by the preview service.
    pub management_token: String,

    /// Preview API host.
    #[serde(default)]
    pub preview_host: String,

    /// Host of the CMS app embedding the preview.
    #[serde(default)]
    pub app_host: String,
}

impl std::fmt::Debug for LivePreviewConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LivePreviewConfig")
            .field("management_token", &redacted(&self.management_token))
            .field("preview_host", &self.preview_host)
            .field("app_host", &self.app_host)
            .finish()
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error). `RUST_LOG` overrides.
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

fn redacted(secret: &str) -> &'static str {
    if secret.is_empty() {
        "<unset>"
    } else {
        "<redacted>"
    }
}
