//! CMS wire types and error definitions.

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

// Re-export CmsConfig from config module to avoid duplication
pub use crate::config::schema::CmsConfig;

/// Errors that can occur while talking to the content store.
#[derive(Debug, Error)]
pub enum CmsError {
    /// Connection or request failed below HTTP.
    #[error("transport error: {0}")]
    Transport(#[source] reqwest::Error),

    /// Request did not complete within the configured timeout.
    #[error("request timed out")]
    Timeout,

    /// Store answered with a non-success status.
    #[error("store returned status {status}: {message}")]
    Status { status: u16, message: String },

    /// Requested entry does not exist in the collection.
    #[error("entry {uid} not found in {content_type}")]
    NotFound { content_type: String, uid: String },

    /// Response body could not be decoded into the expected shape.
    #[error("malformed response: {0}")]
    Malformed(String),

    /// Request URL could not be built from the configured base URL.
    #[error("invalid request URL: {0}")]
    InvalidUrl(String),

    /// Client could not be constructed from configuration.
    #[error("client setup failed: {0}")]
    Client(String),
}

impl From<reqwest::Error> for CmsError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            CmsError::Timeout
        } else if e.is_decode() {
            CmsError::Malformed(e.to_string())
        } else {
            CmsError::Transport(e)
        }
    }
}

/// Result type for content store operations.
pub type CmsResult<T> = Result<T, CmsError>;

/// Body of a collection query response.
#[derive(Debug, Deserialize)]
pub struct EntriesResponse {
    #[serde(default)]
    pub entries: Vec<Value>,
}

/// Body of a single-entry response.
#[derive(Debug, Deserialize)]
pub struct EntryResponse {
    pub entry: Value,
}

/// Error body returned by the delivery API on failures.
#[derive(Debug, Default, Deserialize)]
pub struct ErrorResponse {
    #[serde(default)]
    pub error_message: Option<String>,
    #[serde(default)]
    pub error_code: Option<u32>,
}
