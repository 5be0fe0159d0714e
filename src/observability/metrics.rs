//! Metrics collection and exposition.
//!
//! # Metrics
//! - `route_resolutions_total` (counter): resolutions by outcome
//! - `route_resolution_duration_seconds` (histogram): end-to-end latency
//! - `cms_requests_total` (counter): CMS calls by operation, status (0 = no response)
//! - `cms_request_duration_seconds` (histogram): CMS call latency by operation
//!
//! Recording is a no-op until a recorder is installed, so library users and
//! tests pay nothing.

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus recorder and its scrape listener.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

pub fn record_resolution(outcome: &'static str, started: Instant) {
    ::metrics::counter!("route_resolutions_total", "outcome" => outcome).increment(1);
    ::metrics::histogram!("route_resolution_duration_seconds", "outcome" => outcome)
        .record(started.elapsed().as_secs_f64());
}

pub fn record_cms_request(operation: &'static str, status: u16, started: Instant) {
    ::metrics::counter!(
        "cms_requests_total",
        "operation" => operation,
        "status" => status.to_string()
    )
    .increment(1);
    ::metrics::histogram!("cms_request_duration_seconds", "operation" => operation)
        .record(started.elapsed().as_secs_f64());
}
