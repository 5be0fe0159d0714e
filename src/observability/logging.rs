//! Structured logging.
//!
//! # Design Decisions
//! - Uses tracing crate for structured logging
//! - `RUST_LOG` wins over the configured level
//! - Credentials are never passed as log fields
//! - Output goes to stderr so CLI stdout stays machine-readable

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Default filter when neither `RUST_LOG` nor a config level applies.
pub const DEFAULT_DIRECTIVE: &str = "route_resolver=info,tower_http=info";

/// Build the filter: `RUST_LOG` if set, else `level` for this crate.
pub fn env_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if level.trim().is_empty() {
            DEFAULT_DIRECTIVE.into()
        } else {
            format!("route_resolver={level},tower_http={level}").into()
        }
    })
}

/// Install the global subscriber. Later calls are no-ops.
pub fn init_logging(level: &str) {
    let _ = tracing_subscriber::registry()
        .with(env_filter(level))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_is_idempotent() {
        init_logging("debug");
        init_logging("info");
        tracing::info!("still logging");
    }
}
