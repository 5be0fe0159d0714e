//! Contentstack delivery API client.
//!
//! # Responsibilities
//! - Hold the process-wide HTTP client and stack credentials
//! - Turn [`EntryQuery`]/[`EntryRequest`] values into delivery API calls
//! - Map transport, status and decode failures to [`CmsError`]
//!
//! Timeouts are enforced by the underlying reqwest client; a timed out call
//! surfaces as [`CmsError::Timeout`].

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::StatusCode;
use serde_json::Value;
use url::Url;

use crate::cms::query::{EntryQuery, EntryRequest};
use crate::cms::store::ContentStore;
use crate::cms::types::{
    CmsConfig, CmsError, CmsResult, EntriesResponse, EntryResponse, ErrorResponse,
};
use crate::observability::metrics;

/// Delivery API error code for an entry uid that does not exist (sent with 422).
const ENTRY_NOT_FOUND_CODE: u32 = 141;

/// Delivery API client. Cheap to clone; clones share one connection pool.
#[derive(Clone)]
pub struct CmsClient {
    http: reqwest::Client,
    base_url: Url,
    environment: String,
}

impl CmsClient {
    /// Build a client from validated configuration.
    pub fn new(config: &CmsConfig) -> CmsResult<Self> {
        let base_url: Url = config.base_url.parse().map_err(|e| {
            CmsError::InvalidUrl(format!("'{}': {}", config.base_url, e))
        })?;

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert("api_key", sensitive_header(&config.api_key, "api_key")?);
        headers.insert(
            "access_token",
            sensitive_header(&config.delivery_token, "delivery_token")?,
        );

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .build()
            .map_err(|e| CmsError::Client(e.to_string()))?;

        if config.live_preview.is_some() {
            tracing::info!("Live preview settings present; serving published content only");
        }

        tracing::info!(
            base_url = %base_url,
            environment = %config.environment,
            timeout_secs = config.request_timeout_secs,
            "CMS client initialized"
        );

        Ok(Self {
            http,
            base_url,
            environment: config.environment.clone(),
        })
    }

    /// Base URL requests are issued against.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    async fn send(&self, url: Url, operation: &'static str) -> CmsResult<reqwest::Response> {
        let started = Instant::now();
        let result = self.http.get(url).send().await;

        match &result {
            Ok(response) => {
                metrics::record_cms_request(operation, response.status().as_u16(), started)
            }
            Err(_) => metrics::record_cms_request(operation, 0, started),
        }

        Ok(result?)
    }
}

#[async_trait]
impl ContentStore for CmsClient {
    async fn find_entries(&self, query: &EntryQuery) -> CmsResult<Vec<Value>> {
        let url = query.to_url(&self.base_url, &self.environment)?;
        tracing::debug!(
            content_type = %query.content_type,
            field = %query.filter.field,
            value = %query.filter.equals,
            "Querying entries"
        );

        let response = self.send(url, "find_entries").await?;
        let status = response.status();
        if !status.is_success() {
            return Err(status_error(status, error_body(response).await));
        }

        let body: EntriesResponse = response.json().await?;
        Ok(body.entries)
    }

    async fn fetch_entry(&self, request: &EntryRequest) -> CmsResult<Value> {
        let url = request.to_url(&self.base_url, &self.environment)?;
        tracing::debug!(
            content_type = %request.content_type,
            entry_uid = %request.entry_uid,
            "Fetching entry"
        );

        let response = self.send(url, "fetch_entry").await?;
        let status = response.status();
        if status.is_success() {
            let body: EntryResponse = response.json().await?;
            return Ok(body.entry);
        }

        let body = error_body(response).await;
        if status == StatusCode::NOT_FOUND || body.error_code == Some(ENTRY_NOT_FOUND_CODE) {
            return Err(CmsError::NotFound {
                content_type: request.content_type.clone(),
                uid: request.entry_uid.clone(),
            });
        }
        Err(status_error(status, body))
    }
}

impl std::fmt::Debug for CmsClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CmsClient")
            .field("base_url", &self.base_url.as_str())
            .field("environment", &self.environment)
            .finish_non_exhaustive()
    }
}

fn sensitive_header(value: &str, name: &str) -> CmsResult<HeaderValue> {
    let mut header = HeaderValue::from_str(value.trim())
        .map_err(|_| CmsError::Client(format!("{} is not a valid header value", name)))?;
    header.set_sensitive(true);
    Ok(header)
}

async fn error_body(response: reqwest::Response) -> ErrorResponse {
    response.json().await.unwrap_or_default()
}

fn status_error(status: StatusCode, body: ErrorResponse) -> CmsError {
    let message = match (body.error_code, body.error_message) {
        (Some(code), Some(msg)) => format!("{} (code {})", msg, code),
        (None, Some(msg)) => msg,
        (Some(code), None) => format!("code {}", code),
        (None, None) => "no error details".to_string(),
    };
    CmsError::Status {
        status: status.as_u16(),
        message,
    }
}
