//! Response envelope handling.
//!
//! The backend wraps payloads as `{data: ...}` and may attach `_meta` or
//! `meta` describing which language it actually served.

use serde_json::Value;

use crate::locale::Locale;

/// Unwrapped response body.
#[derive(Debug, Clone, PartialEq)]
pub struct Envelope {
    pub data: Value,
    /// Language the backend served, when it says so.
    pub current_language: Option<Locale>,
}

impl Envelope {
    /// Split a raw body into payload and metadata. Bodies without a `data`
    /// member are treated as the payload itself.
    pub fn from_body(body: Value) -> Self {
        let current_language = ["_meta", "meta"]
            .iter()
            .filter_map(|k| body.get(*k))
            .find_map(|meta| meta.get("current_language").and_then(Value::as_str))
            .and_then(Locale::parse);

        let data = match body {
            Value::Object(mut map) if map.contains_key("data") => {
                map.remove("data").unwrap_or(Value::Null)
            }
            other => other,
        };

        Self {
            data,
            current_language,
        }
    }

    /// Payload as a list; a single object becomes a one-item list.
    pub fn into_items(self) -> Vec<Value> {
        match self.data {
            Value::Array(items) => items,
            Value::Null => Vec::new(),
            other => vec![other],
        }
    }
}
