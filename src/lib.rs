//! Path → CMS content resolution.
//!
//! Resolves request paths against a routing collection in a headless CMS,
//! fetches the entry a route points at, and hands back a uniform
//! [`ResolvedRoute`] for a renderer.

pub mod cms;
pub mod config;
pub mod content;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod pipeline;
pub mod routing;

pub use cms::{CmsClient, ContentStore, MemoryStore};
pub use config::AppConfig;
pub use content::ContentRecord;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use pipeline::{ResolvedRoute, RoutePipeline};
