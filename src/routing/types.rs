//! Routing records and resolution errors.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::cms::CmsError;

/// A routing entry as stored in the CMS, before validation.
///
/// Authoring has not been consistent about field names, so both
/// `content_type_uid`/`content_type_id` and `entry_uid`/`entry_id` are
/// accepted. The `_uid` spelling wins when both are set.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RoutingEntry {
    #[serde(default)]
    pub url_path: Option<String>,
    #[serde(default)]
    pub content_type_uid: Option<String>,
    #[serde(default)]
    pub content_type_id: Option<String>,
    #[serde(default)]
    pub entry_uid: Option<String>,
    #[serde(default)]
    pub entry_id: Option<String>,
    #[serde(default)]
    pub template: Option<String>,
}

/// A validated path-to-content binding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoutingRecord {
    pub url_path: String,
    pub content_type_id: String,
    pub entry_id: String,
    pub template: Option<String>,
}

impl RoutingEntry {
    /// Content type, `content_type_uid` first, then `content_type_id`. Empty counts as missing.
    pub fn resolved_content_type(&self) -> Option<&str> {
        [self.content_type_uid.as_deref(), self.content_type_id.as_deref()]
            .into_iter()
            .flatten()
            .find(|ct| !ct.is_empty())
    }

    /// Entry identifier, `entry_uid` first, then `entry_id`. Empty counts as missing.
    pub fn resolved_entry_id(&self) -> Option<&str> {
        [self.entry_uid.as_deref(), self.entry_id.as_deref()]
            .into_iter()
            .flatten()
            .find(|id| !id.is_empty())
    }

    /// Validate into a usable record. Never yields a partial record.
    ///
    /// `matched_path` is the candidate the entry was found under; it fills in
    /// `url_path` when the entry omits it.
    pub fn into_record(self, matched_path: &str) -> Result<RoutingRecord, InvalidRoute> {
        let content_type_id = self
            .resolved_content_type()
            .ok_or(InvalidRoute::MissingContentType)?
            .to_string();
        let entry_id = self
            .resolved_entry_id()
            .ok_or(InvalidRoute::MissingEntryId)?
            .to_string();

        Ok(RoutingRecord {
            url_path: self
                .url_path
                .filter(|p| !p.is_empty())
                .unwrap_or_else(|| matched_path.to_string()),
            content_type_id,
            entry_id,
            template: self.template,
        })
    }
}

/// Why a routing entry was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidRoute {
    #[error("missing content_type_uid/content_type_id")]
    MissingContentType,

    #[error("missing entry_uid/entry_id")]
    MissingEntryId,

    #[error("entry is not a routing object: {0}")]
    Undecodable(String),
}

/// Errors that can occur while resolving a path.
///
/// Only used for diagnostics: every variant collapses to "not found" at the
/// pipeline boundary.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// No routing entry under any candidate representation.
    #[error("no routing entry for {}", candidates.join(" or "))]
    RouteNotFound { candidates: Vec<String> },

    /// A routing entry exists but is incomplete.
    #[error("invalid routing entry for {path}: {reason}")]
    RouteInvalid { path: String, reason: InvalidRoute },

    /// The routing entry pointed at an entry that could not be retrieved.
    #[error("failed to fetch {content_type_id}/{entry_id}: {source}")]
    ContentFetchFailed {
        content_type_id: String,
        entry_id: String,
        #[source]
        source: CmsError,
    },

    /// The routing store could not be queried.
    #[error("routing store unavailable: {0}")]
    Transport(#[source] CmsError),
}

impl ResolveError {
    /// Stable label for metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            ResolveError::RouteNotFound { .. } => "route_not_found",
            ResolveError::RouteInvalid { .. } => "route_invalid",
            ResolveError::ContentFetchFailed { .. } => "content_fetch_failed",
            ResolveError::Transport(_) => "transport",
        }
    }
}

/// Result type for resolution steps.
pub type ResolveResult<T> = Result<T, ResolveError>;
