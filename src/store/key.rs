//! Canonical cache keys.

use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

/// Resource name plus a sorted parameter map.
///
/// Parameters are held in a `BTreeMap`, so two keys built from the same
/// pairs in any order compare, hash and print identically.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CacheKey {
    resource: String,
    params: BTreeMap<String, String>,
}

impl CacheKey {
    pub fn new(resource: impl Into<String>) -> Self {
        Self {
            resource: resource.into(),
            params: BTreeMap::new(),
        }
    }

    pub fn with(mut self, name: &str, value: impl ToString) -> Self {
        self.params.insert(name.to_string(), value.to_string());
        self
    }

    pub fn with_opt<V: ToString>(self, name: &str, value: Option<V>) -> Self {
        match value {
            Some(v) => self.with(name, v),
            None => self,
        }
    }

    /// Build a key from any serializable parameter object. Top-level fields
    /// become parameters; `null` fields are dropped; nested values are
    /// written as JSON with object keys sorted.
    pub fn from_params<P: Serialize + ?Sized>(
        resource: impl Into<String>,
        params: &P,
    ) -> Result<Self, serde_json::Error> {
        let mut key = Self::new(resource);
        match serde_json::to_value(params)? {
            Value::Object(map) => {
                for (name, value) in map {
                    match value {
                        Value::Null => {}
                        Value::String(s) => {
                            key.params.insert(name, s);
                        }
                        other => {
                            key.params.insert(name, canonical_json(&other));
                        }
                    }
                }
            }
            Value::Null => {}
            other => {
                key.params.insert(String::new(), canonical_json(&other));
            }
        }
        Ok(key)
    }

    pub fn resource(&self) -> &str {
        &self.resource
    }

    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.resource)?;
        for (i, (name, value)) in self.params.iter().enumerate() {
            let sep = if i == 0 { '?' } else { '&' };
            write!(f, "{sep}{name}={value}")?;
        }
        Ok(())
    }
}

/// Serialize `value` with every object's keys in sorted order.
pub fn canonical_json(value: &Value) -> String {
    match value {
        Value::Object(map) => {
            let sorted: BTreeMap<&String, String> =
                map.iter().map(|(k, v)| (k, canonical_json(v))).collect();
            let body = sorted
                .iter()
                .map(|(k, v)| format!("{}:{}", Value::String((*k).clone()), v))
                .collect::<Vec<_>>()
                .join(",");
            format!("{{{body}}}")
        }
        Value::Array(items) => {
            let body = items.iter().map(canonical_json).collect::<Vec<_>>().join(",");
            format!("[{body}]")
        }
        other => other.to_string(),
    }
}
