//! Entry retrieval and normalization.
//!
//! One fetch per call, no retries: a failed fetch is terminal for the request.

use std::sync::Arc;

use crate::cms::query::entry_request;
use crate::cms::{CmsError, ContentStore};
use crate::content::types::ContentRecord;
use crate::routing::types::{ResolveError, ResolveResult};

#[derive(Clone)]
pub struct ContentFetcher {
    store: Arc<dyn ContentStore>,
}

impl ContentFetcher {
    pub fn new(store: Arc<dyn ContentStore>) -> Self {
        Self { store }
    }

    /// Fetch `entry_id` from the `content_type_id` collection.
    ///
    /// Both identifiers are expected to be validated non-empty by the caller.
    pub async fn fetch(&self, content_type_id: &str, entry_id: &str) -> ResolveResult<ContentRecord> {
        let request = entry_request(content_type_id, entry_id);

        let raw = self
            .store
            .fetch_entry(&request)
            .await
            .map_err(|source| failed(content_type_id, entry_id, source))?;

        ContentRecord::from_entry(raw)
            .map_err(|e| failed(content_type_id, entry_id, CmsError::Malformed(e.to_string())))
    }
}

impl std::fmt::Debug for ContentFetcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContentFetcher").finish_non_exhaustive()
    }
}

fn failed(content_type_id: &str, entry_id: &str, source: CmsError) -> ResolveError {
    tracing::error!(
        content_type_id = %content_type_id,
        entry_id = %entry_id,
        error = %source,
        "Content fetch failed"
    );
    ResolveError::ContentFetchFailed {
        content_type_id: content_type_id.to_string(),
        entry_id: entry_id.to_string(),
        source,
    }
}
