//! Content store abstraction.

use async_trait::async_trait;
use serde_json::Value;

use crate::cms::query::{EntryQuery, EntryRequest};
use crate::cms::types::CmsResult;

/// Read access to a headless CMS.
///
/// Implemented by [`CmsClient`](crate::cms::CmsClient) for the delivery API
/// and by [`MemoryStore`](crate::cms::MemoryStore) for tests. Implementations
/// must be safe to share across concurrent resolutions.
#[async_trait]
pub trait ContentStore: Send + Sync + 'static {
    /// Run a filtered query. Entries come back in store order.
    async fn find_entries(&self, query: &EntryQuery) -> CmsResult<Vec<Value>>;

    /// Fetch one entry by identifier.
    async fn fetch_entry(&self, request: &EntryRequest) -> CmsResult<Value>;
}
