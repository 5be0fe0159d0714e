//! Plain request values for the content store.
//!
//! Requests are built by constructor functions and carried as data, so the
//! resolver never depends on how a particular client shapes its calls. The
//! HTTP client turns them into delivery API URLs.

use serde_json::{Map, Value};
use url::Url;

use crate::cms::types::{CmsError, CmsResult};

/// Equality filter on a single entry field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldFilter {
    pub field: String,
    pub equals: String,
}

impl FieldFilter {
    /// JSON form used by the `query` parameter, e.g. `{"url_path":"/about"}`.
    pub fn to_json(&self) -> String {
        let mut filter = Map::new();
        filter.insert(self.field.clone(), Value::String(self.equals.clone()));
        Value::Object(filter).to_string()
    }
}

/// Query against a content-type collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryQuery {
    pub content_type: String,
    pub filter: FieldFilter,
}

/// Fetch of a single entry by identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryRequest {
    pub content_type: String,
    pub entry_uid: String,
}

/// Build an equality query on `field` within `content_type`.
pub fn where_equals(content_type: &str, field: &str, value: &str) -> EntryQuery {
    EntryQuery {
        content_type: content_type.to_string(),
        filter: FieldFilter {
            field: field.to_string(),
            equals: value.to_string(),
        },
    }
}

/// Build a fetch-by-identifier request.
pub fn entry_request(content_type: &str, entry_uid: &str) -> EntryRequest {
    EntryRequest {
        content_type: content_type.to_string(),
        entry_uid: entry_uid.to_string(),
    }
}

impl EntryQuery {
    /// `{base}/v3/content_types/{ct}/entries?environment=..&query=..`
    pub fn to_url(&self, base: &Url, environment: &str) -> CmsResult<Url> {
        let mut url = collection_url(base, &self.content_type, None)?;
        url.query_pairs_mut()
            .append_pair("environment", environment)
            .append_pair("query", &self.filter.to_json());
        Ok(url)
    }
}

impl EntryRequest {
    /// `{base}/v3/content_types/{ct}/entries/{uid}?environment=..`
    pub fn to_url(&self, base: &Url, environment: &str) -> CmsResult<Url> {
        let mut url = collection_url(base, &self.content_type, Some(&self.entry_uid))?;
        url.query_pairs_mut().append_pair("environment", environment);
        Ok(url)
    }
}

fn collection_url(base: &Url, content_type: &str, entry_uid: Option<&str>) -> CmsResult<Url> {
    let mut url = base.clone();
    {
        let mut segments = url
            .path_segments_mut()
            .map_err(|_| CmsError::InvalidUrl(base.to_string()))?;
        segments
            .pop_if_empty()
            .extend(["v3", "content_types", content_type, "entries"]);
        if let Some(uid) = entry_uid {
            segments.push(uid);
        }
    }
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Url {
        Url::parse("https://cdn.contentstack.io").unwrap()
    }

    #[test]
    fn test_filter_json() {
        let query = where_equals("routing", "url_path", "/blog/ai");
        assert_eq!(query.filter.to_json(), r#"{"url_path":"/blog/ai"}"#);
    }

    #[test]
    fn test_query_url() {
        let url = where_equals("routing", "url_path", "/about")
            .to_url(&base(), "production")
            .unwrap();
        assert_eq!(url.path(), "/v3/content_types/routing/entries");

        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert_eq!(
            pairs,
            vec![
                ("environment".to_string(), "production".to_string()),
                ("query".to_string(), r#"{"url_path":"/about"}"#.to_string()),
            ]
        );
    }

    #[test]
    fn test_entry_url_escapes_segments() {
        let url = entry_request("blog", "a/b")
            .to_url(&base(), "production")
            .unwrap();
        assert_eq!(url.path(), "/v3/content_types/blog/entries/a%2Fb");
    }

    #[test]
    fn test_base_url_with_path_prefix() {
        let base = Url::parse("http://127.0.0.1:9000/cms/").unwrap();
        let url = entry_request("page", "e1").to_url(&base, "dev").unwrap();
        assert_eq!(url.path(), "/cms/v3/content_types/page/entries/e1");
    }
}
