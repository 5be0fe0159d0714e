//! HTTP surface.
//!
//! # Data Flow
//! ```text
//! GET /{*path}
//!     → server.rs (request id, tracing, timeout layers)
//!     → RoutePipeline::resolve("/" + path)
//!     → template.rs (pick blog/page template from the hint)
//!     → 200 JSON page payload, or 404
//! ```

pub mod server;
pub mod template;

pub use server::{AppState, HttpServer, PageResponse};
pub use template::TemplateKind;
