//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! pipeline / cms client produce:
//!     → logging.rs (structured log events via tracing)
//!     → metrics.rs (counters, histograms)
//!
//! Consumers:
//!     → stderr (fmt layer; stdout stays free for CLI output)
//!     → Metrics endpoint (Prometheus scrape, optional)
//! ```

pub mod logging;
pub mod metrics;
