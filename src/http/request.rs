//! Outgoing request description.
//!
//! # Responsibilities
//! - Describe method, query, body, headers and per-request overrides
//! - Generate unique request ID (UUID v4) for log correlation
//!
//! # Design Decisions
//! - Query parameters keep caller order so URLs are predictable
//! - Timeout and retry overrides are optional; client config fills the gaps

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::Method;
use serde_json::Value;
use std::time::Duration;
use uuid::Uuid;

use crate::http::error::NetworkError;
use crate::scope::TenantId;

pub const TENANT_HEADER: &str = "X-Tenant-ID";
pub const REQUEST_ID_HEADER: &str = "X-Request-ID";

/// Options for a single logical request (all attempts share them).
#[derive(Debug, Clone)]
pub struct RequestOptions {
    pub method: Method,
    pub params: Vec<(String, String)>,
    pub data: Option<Value>,
    pub headers: HeaderMap,
    /// Overrides the configured tenant for the `X-Tenant-ID` header.
    pub tenant: Option<TenantId>,
    pub timeout: Option<Duration>,
    pub retries: Option<u32>,
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self {
            method: Method::GET,
            params: Vec::new(),
            data: None,
            headers: HeaderMap::new(),
            tenant: None,
            timeout: None,
            retries: None,
        }
    }
}

impl RequestOptions {
    pub fn get() -> Self {
        Self::default()
    }

    pub fn post(data: Value) -> Self {
        Self {
            method: Method::POST,
            data: Some(data),
            ..Self::default()
        }
    }

    pub fn param(mut self, key: &str, value: impl ToString) -> Self {
        self.params.push((key.to_string(), value.to_string()));
        self
    }

    /// Add the parameter only when a value is present.
    pub fn param_opt<V: ToString>(self, key: &str, value: Option<V>) -> Self {
        match value {
            Some(v) => self.param(key, v),
            None => self,
        }
    }

    pub fn header(mut self, name: &str, value: &str) -> Result<Self, NetworkError> {
        let name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|e| NetworkError::InvalidRequest(e.to_string()))?;
        let value =
            HeaderValue::from_str(value).map_err(|e| NetworkError::InvalidRequest(e.to_string()))?;
        self.headers.insert(name, value);
        Ok(self)
    }

    pub fn tenant(mut self, tenant: Option<TenantId>) -> Self {
        self.tenant = tenant;
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn retries(mut self, retries: u32) -> Self {
        self.retries = Some(retries);
        self
    }
}

/// Generate a fresh request ID.
pub fn new_request_id() -> String {
    Uuid::new_v4().to_string()
}
