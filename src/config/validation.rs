//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Require the credentials needed to construct the CMS client
//! - Validate value ranges (timeouts > 0, addresses parse)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: AppConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use thiserror::Error;
use url::Url;

use crate::config::schema::AppConfig;

/// A single semantic problem with the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{0} must not be empty")]
    Missing(&'static str),

    #[error("{field} must be greater than zero")]
    ZeroTimeout { field: &'static str },

    #[error("cms.base_url '{0}' is not an http(s) URL")]
    BaseUrl(String),

    #[error("{field} '{value}' is not a socket address")]
    Address { field: &'static str, value: String },
}

/// Validate a parsed configuration.
pub fn validate_config(config: &AppConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();
    let cms = &config.cms;

    for (field, value) in [
        ("cms.api_key", &cms.api_key),
        ("cms.delivery_token", &cms.delivery_token),
        ("cms.environment", &cms.environment),
    ] {
        if value.trim().is_empty() {
            errors.push(ValidationError::Missing(field));
        }
    }

    match Url::parse(&cms.base_url) {
        Ok(url) if matches!(url.scheme(), "http" | "https") && url.has_host() => {}
        _ => errors.push(ValidationError::BaseUrl(cms.base_url.clone())),
    }

    for (field, value) in [
        ("cms.request_timeout_secs", cms.request_timeout_secs),
        ("cms.connect_timeout_secs", cms.connect_timeout_secs),
        ("server.request_timeout_secs", config.server.request_timeout_secs),
    ] {
        if value == 0 {
            errors.push(ValidationError::ZeroTimeout { field });
        }
    }

    if let Some(preview) = &cms.live_preview {
        if preview.management_token.trim().is_empty() {
            errors.push(ValidationError::Missing("cms.live_preview.management_token"));
        }
    }

    check_address(&mut errors, "server.bind_address", &config.server.bind_address);
    if config.observability.metrics_enabled {
        check_address(
            &mut errors,
            "observability.metrics_address",
            &config.observability.metrics_address,
        );
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_address(errors: &mut Vec<ValidationError>, field: &'static str, value: &str) {
    if value.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::Address {
            field,
            value: value.to_string(),
        });
    }
}
