//! Normalized content records.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Image reference attached to an entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageRef {
    /// Absent when the asset has no published URL; the image is then skipped.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Asset metadata (filename, content type, dimensions, ...).
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A fetched entry with its well-known fields lifted out.
///
/// Everything else the entry carries (author, publish date, excerpt,
/// categories, system fields) is kept verbatim in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContentRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// May hold markup meant for verbatim embedding.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<ImageRef>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ContentRecord {
    /// Normalize a raw entry. Fails only when the entry is not an object or a
    /// well-known field has the wrong type.
    pub fn from_entry(raw: Value) -> Result<Self, serde_json::Error> {
        if !raw.is_object() {
            return Err(serde::de::Error::custom(format!(
                "expected entry object, got {}",
                json_kind(&raw)
            )));
        }
        serde_json::from_value(raw)
    }

    /// Any field other than title/body/image.
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.extra.get(name)
    }

    pub fn image_url(&self) -> Option<&str> {
        self.image
            .as_ref()
            .and_then(|i| i.url.as_deref())
            .filter(|url| !url.is_empty())
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
