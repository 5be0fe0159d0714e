//! Route lookup against the routing collection.
//!
//! # Responsibilities
//! - Query the routing store once per path candidate, in order
//! - Stop at the first candidate with any matching entry
//! - Validate the first entry of that result set
//!
//! # Design Decisions
//! - Ties between several entries for one path follow store order; no local sort
//! - A store failure on any query is terminal for the request
//! - Not-found and invalid are distinct here only so logs can tell them apart

use std::sync::Arc;

use crate::cms::query::where_equals;
use crate::cms::ContentStore;
use crate::routing::normalizer::candidate_paths;
use crate::routing::types::{
    InvalidRoute, ResolveError, ResolveResult, RoutingEntry, RoutingRecord,
};

/// Collection holding routing entries.
pub const ROUTING_CONTENT_TYPE: &str = "routing";

/// Field routing entries are matched on.
pub const URL_PATH_FIELD: &str = "url_path";

/// Maps request paths to validated routing records.
#[derive(Clone)]
pub struct RouteResolver {
    store: Arc<dyn ContentStore>,
}

impl RouteResolver {
    pub fn new(store: Arc<dyn ContentStore>) -> Self {
        Self { store }
    }

    /// Resolve `path` to a routing record.
    pub async fn resolve(&self, path: &str) -> ResolveResult<RoutingRecord> {
        let candidates = candidate_paths(path);

        for candidate in &candidates {
            let query = where_equals(ROUTING_CONTENT_TYPE, URL_PATH_FIELD, candidate);
            let entries = self
                .store
                .find_entries(&query)
                .await
                .map_err(ResolveError::Transport)?;

            let Some(first) = entries.into_iter().next() else {
                tracing::debug!(candidate = %candidate, "No routing entry for candidate");
                continue;
            };

            return self.validate(candidate, first);
        }

        let candidates = candidates.to_vec();
        tracing::warn!(candidates = ?candidates, "No routing entry found");
        Err(ResolveError::RouteNotFound { candidates })
    }

    fn validate(&self, candidate: &str, raw: serde_json::Value) -> ResolveResult<RoutingRecord> {
        let entry: RoutingEntry = match serde_json::from_value(raw) {
            Ok(entry) => entry,
            Err(e) => {
                return Err(self.invalid(candidate, None, InvalidRoute::Undecodable(e.to_string())))
            }
        };

        entry
            .clone()
            .into_record(candidate)
            .map_err(|reason| self.invalid(candidate, Some(&entry), reason))
    }

    fn invalid(
        &self,
        candidate: &str,
        entry: Option<&RoutingEntry>,
        reason: InvalidRoute,
    ) -> ResolveError {
        tracing::error!(
            path = %candidate,
            content_type = ?entry.and_then(|e| e.resolved_content_type()),
            entry_uid = ?entry.and_then(|e| e.entry_uid.as_deref()),
            entry_id = ?entry.and_then(|e| e.entry_id.as_deref()),
            reason = %reason,
            "Invalid routing entry"
        );
        ResolveError::RouteInvalid {
            path: candidate.to_string(),
            reason,
        }
    }
}

impl std::fmt::Debug for RouteResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RouteResolver").finish_non_exhaustive()
    }
}
