//! Startup orchestration.
//!
//! # Responsibilities
//! - Initialize logging and metrics from validated configuration
//! - Construct the CMS client once and wrap it in the pipeline
//!
//! # Design Decisions
//! - Fail fast: a client that cannot be built is fatal
//! - The client handle is returned, never stored globally

use std::net::SocketAddr;
use std::sync::Arc;

use crate::cms::{CmsClient, CmsResult};
use crate::config::{AppConfig, CmsConfig};
use crate::observability::{logging, metrics};
use crate::pipeline::RoutePipeline;

/// Install logging and, when enabled, the metrics exporter.
pub fn init_observability(config: &AppConfig) {
    logging::init_logging(&config.observability.log_level);

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse::<SocketAddr>() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }
}

/// Build the delivery client and the pipeline that owns it.
pub fn build_pipeline(config: &CmsConfig) -> CmsResult<RoutePipeline> {
    let client = CmsClient::new(config)?;
    Ok(RoutePipeline::new(Arc::new(client)))
}
