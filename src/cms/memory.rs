//! In-memory content store.
//!
//! Backs unit tests and local experiments. Entries are kept per content type
//! in insertion order, which stands in for the store's native result order.
//! Every call is recorded so callers can assert which lookups happened.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;

use crate::cms::query::{EntryQuery, EntryRequest};
use crate::cms::store::ContentStore;
use crate::cms::types::{CmsError, CmsResult};

/// A call observed by [`MemoryStore`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreCall {
    Find {
        content_type: String,
        field: String,
        value: String,
    },
    Fetch {
        content_type: String,
        uid: String,
    },
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    collections: HashMap<String, Vec<Value>>,
    /// Content types whose calls fail with a 503.
    unavailable: HashSet<String>,
    calls: Mutex<Vec<StoreCall>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an entry to `content_type`. Fetches match on the entry's `uid` field.
    pub fn with_entry(mut self, content_type: &str, entry: Value) -> Self {
        self.collections
            .entry(content_type.to_string())
            .or_default()
            .push(entry);
        self
    }

    /// Make every call against `content_type` fail.
    pub fn with_unavailable(mut self, content_type: &str) -> Self {
        self.unavailable.insert(content_type.to_string());
        self
    }

    /// Calls made so far, oldest first.
    pub fn calls(&self) -> Vec<StoreCall> {
        self.lock_calls().clone()
    }

    /// Number of fetch-by-identifier calls made so far.
    pub fn fetch_count(&self) -> usize {
        self.lock_calls()
            .iter()
            .filter(|c| matches!(c, StoreCall::Fetch { .. }))
            .count()
    }

    fn lock_calls(&self) -> std::sync::MutexGuard<'_, Vec<StoreCall>> {
        // A poisoned log is still a usable log.
        self.calls.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn check_available(&self, content_type: &str) -> CmsResult<()> {
        if self.unavailable.contains(content_type) {
            return Err(CmsError::Status {
                status: 503,
                message: format!("{} unavailable", content_type),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl ContentStore for MemoryStore {
    async fn find_entries(&self, query: &EntryQuery) -> CmsResult<Vec<Value>> {
        self.lock_calls().push(StoreCall::Find {
            content_type: query.content_type.clone(),
            field: query.filter.field.clone(),
            value: query.filter.equals.clone(),
        });
        self.check_available(&query.content_type)?;

        let entries = self
            .collections
            .get(&query.content_type)
            .map(|entries| {
                entries
                    .iter()
                    .filter(|e| {
                        e.get(&query.filter.field).and_then(Value::as_str)
                            == Some(query.filter.equals.as_str())
                    })
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();
        Ok(entries)
    }

    async fn fetch_entry(&self, request: &EntryRequest) -> CmsResult<Value> {
        self.lock_calls().push(StoreCall::Fetch {
            content_type: request.content_type.clone(),
            uid: request.entry_uid.clone(),
        });
        self.check_available(&request.content_type)?;

        self.collections
            .get(&request.content_type)
            .and_then(|entries| {
                entries
                    .iter()
                    .find(|e| e.get("uid").and_then(Value::as_str) == Some(request.entry_uid.as_str()))
            })
            .cloned()
            .ok_or_else(|| CmsError::NotFound {
                content_type: request.content_type.clone(),
                uid: request.entry_uid.clone(),
            })
    }
}
