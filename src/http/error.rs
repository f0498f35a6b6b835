//! Network error taxonomy.
//!
//! Every failure the HTTP client can produce is one `NetworkError`. The
//! type is `Clone` so a single failed request can be handed to every caller
//! waiting on the same in-flight key.

use serde_json::Value;
use std::collections::BTreeMap;
use thiserror::Error;

/// Message shown to end users for transient failures.
pub const GENERIC_LOAD_ERROR: &str = "Could not load content. Please try again later.";

/// Field name -> messages, as returned by a 422 response.
pub type FieldErrors = BTreeMap<String, Vec<String>>;

/// Coarse classification used by retry and presentation logic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Network failure, timeout or 5xx; retried.
    Transient,
    /// 422 with field-keyed messages; surfaced to forms.
    Validation,
    /// Any other permanent failure.
    Client,
}

/// Errors produced by [`HttpClient`](crate::http::HttpClient).
#[derive(Debug, Clone, Error)]
pub enum NetworkError {
    /// Connection failed before a response arrived.
    #[error("network failure: {0}")]
    Transport(String),

    /// Client-side deadline elapsed.
    #[error("request timed out after {0} ms")]
    Timeout(u64),

    /// Backend answered with a non-success status.
    #[error("HTTP {status}: {message}")]
    Status { status: u16, message: String },

    /// Backend rejected submitted data (HTTP 422).
    #[error("validation failed: {message}")]
    Validation { message: String, fields: FieldErrors },

    /// Response body was not the JSON we expected.
    #[error("invalid response: {0}")]
    Decode(String),

    /// Request could not be built (bad path, bad header).
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

impl NetworkError {
    /// HTTP status when the backend answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            NetworkError::Status { status, .. } => Some(*status),
            NetworkError::Validation { .. } => Some(422),
            _ => None,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            NetworkError::Transport(_) | NetworkError::Timeout(_) => ErrorKind::Transient,
            NetworkError::Status { status, .. } if *status >= 500 => ErrorKind::Transient,
            NetworkError::Validation { .. } => ErrorKind::Validation,
            _ => ErrorKind::Client,
        }
    }

    /// Whether another attempt could plausibly succeed.
    pub fn is_retriable(&self) -> bool {
        self.kind() == ErrorKind::Transient
    }

    /// Field errors of a validation failure, empty otherwise.
    pub fn field_errors(&self) -> Option<&FieldErrors> {
        match self {
            NetworkError::Validation { fields, .. } => Some(fields),
            _ => None,
        }
    }

    /// Text suitable for inline display next to the failed content.
    pub fn user_message(&self) -> String {
        match self {
            NetworkError::Validation { message, .. } => message.clone(),
            NetworkError::Status { message, .. } if self.kind() == ErrorKind::Client => {
                message.clone()
            }
            _ => GENERIC_LOAD_ERROR.to_string(),
        }
    }

    /// Build an error from a non-success response body.
    pub fn from_response(status: u16, body: &str) -> Self {
        let parsed: Option<Value> = serde_json::from_str(body).ok();
        let message = parsed
            .as_ref()
            .and_then(|v| {
                v.get("message")
                    .or_else(|| v.get("error"))
                    .and_then(Value::as_str)
            })
            .map(str::to_string)
            .unwrap_or_else(|| default_reason(status, body));

        if status == 422 {
            let fields = parsed
                .as_ref()
                .and_then(|v| v.get("errors"))
                .map(parse_field_errors)
                .unwrap_or_default();
            return NetworkError::Validation { message, fields };
        }

        NetworkError::Status { status, message }
    }
}

impl From<reqwest::Error> for NetworkError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            NetworkError::Decode(err.to_string())
        } else if err.is_builder() {
            NetworkError::InvalidRequest(err.to_string())
        } else {
            NetworkError::Transport(err.to_string())
        }
    }
}

fn default_reason(status: u16, body: &str) -> String {
    let body = body.trim();
    if body.is_empty() || body.len() > 200 {
        reqwest::StatusCode::from_u16(status)
            .ok()
            .and_then(|s| s.canonical_reason())
            .unwrap_or("Request failed")
            .to_string()
    } else {
        body.to_string()
    }
}

fn parse_field_errors(errors: &Value) -> FieldErrors {
    let Some(map) = errors.as_object() else {
        return FieldErrors::new();
    };
    map.iter()
        .map(|(field, messages)| {
            let messages = match messages {
                Value::String(s) => vec![s.clone()],
                Value::Array(items) => items
                    .iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect(),
                other => vec![other.to_string()],
            };
            (field.clone(), messages)
        })
        .collect()
}
