//! Route resolution pipeline.
//!
//! # Data Flow
//! ```text
//! resolve(path)
//!     → RouteResolver (1-2 routing queries)
//!     → ContentFetcher (1 entry fetch)
//!     → ResolvedRoute { content, content_type_id, template }
//!
//! Any ResolveError → logged, recorded in metrics → None
//! ```
//!
//! # Design Decisions
//! - Callers only choose between rendering content and a not-found page,
//!   so every failure kind looks the same from outside
//! - No shared mutable state: concurrent resolutions are independent
//! - The template hint is passed through exactly as authored

use std::sync::Arc;
use std::time::Instant;

use serde::Serialize;

use crate::cms::ContentStore;
use crate::content::{ContentFetcher, ContentRecord};
use crate::observability::metrics;
use crate::routing::{ResolveResult, RouteResolver};

/// Content resolved for a request path, ready for a renderer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedRoute {
    pub content: ContentRecord,
    pub content_type_id: String,
    pub template: Option<String>,
}

/// Path → content pipeline over a shared content store.
#[derive(Debug, Clone)]
pub struct RoutePipeline {
    resolver: RouteResolver,
    fetcher: ContentFetcher,
}

impl RoutePipeline {
    pub fn new(store: Arc<dyn ContentStore>) -> Self {
        Self {
            resolver: RouteResolver::new(store.clone()),
            fetcher: ContentFetcher::new(store),
        }
    }

    /// Resolve a request path. `None` means "show the not-found page".
    pub async fn resolve(&self, path: &str) -> Option<ResolvedRoute> {
        let started = Instant::now();

        match self.try_resolve(path).await {
            Ok(route) => {
                tracing::debug!(
                    path = %path,
                    content_type_id = %route.content_type_id,
                    template = ?route.template,
                    "Route resolved"
                );
                metrics::record_resolution("found", started);
                Some(route)
            }
            Err(e) => {
                tracing::info!(path = %path, kind = e.kind(), error = %e, "Route not resolved");
                metrics::record_resolution(e.kind(), started);
                None
            }
        }
    }

    pub(crate) async fn try_resolve(&self, path: &str) -> ResolveResult<ResolvedRoute> {
        let record = self.resolver.resolve(path).await?;
        let content = self
            .fetcher
            .fetch(&record.content_type_id, &record.entry_id)
            .await?;

        Ok(ResolvedRoute {
            content,
            content_type_id: record.content_type_id,
            template: record.template,
        })
    }
}
