//! HTTP client for the content backend.
//!
//! # Responsibilities
//! - Resolve request paths against the configured base URL
//! - Inject tenant identity and request ID headers
//! - Enforce per-request timeout, retry transient failures
//! - Turn non-success responses into classified `NetworkError`s

use reqwest::StatusCode;
use serde_json::Value;
use std::time::{Duration, Instant};
use url::Url;

use crate::config::RemoteConfig;
use crate::http::error::NetworkError;
use crate::http::request::{new_request_id, RequestOptions, REQUEST_ID_HEADER, TENANT_HEADER};
use crate::observability::metrics;
use crate::resilience::{with_timeout, RetryPolicy};
use crate::scope::TenantId;

/// JSON client wrapper with timeout, retry and tenant scoping.
#[derive(Clone)]
pub struct HttpClient {
    client: reqwest::Client,
    base_url: Url,
    tenant: Option<TenantId>,
    timeout: Duration,
    policy: RetryPolicy,
}

impl HttpClient {
    /// Create a client from resolved configuration.
    pub fn new(config: &RemoteConfig) -> Result<Self, NetworkError> {
        let base_url = Url::parse(&config.api_base_url).map_err(|e| {
            NetworkError::InvalidRequest(format!(
                "Invalid base URL '{}': {}",
                config.api_base_url, e
            ))
        })?;
        if base_url.cannot_be_a_base() {
            return Err(NetworkError::InvalidRequest(format!(
                "Base URL '{}' cannot carry a path",
                config.api_base_url
            )));
        }

        let client = reqwest::Client::builder()
            .user_agent(concat!("site-content/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            base_url,
            tenant: config.tenant_id.clone().map(TenantId::from),
            timeout: config.timeout(),
            policy: RetryPolicy::new(config.retries, config.retry_delay()),
        })
    }

    /// Tenant sent when a request does not name one.
    pub fn default_tenant(&self) -> Option<&TenantId> {
        self.tenant.as_ref()
    }

    /// Tenant a request will actually be made under.
    pub fn effective_tenant<'a>(&'a self, tenant: Option<&'a TenantId>) -> Option<&'a TenantId> {
        tenant.or(self.tenant.as_ref())
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        self.policy
    }

    /// Issue a request and return the parsed JSON body.
    ///
    /// Transient failures are retried up to `opts.retries` (or the
    /// configured count) with a fixed delay; everything else fails fast.
    pub async fn request(&self, path: &str, opts: RequestOptions) -> Result<Value, NetworkError> {
        let url = self.url_for(path)?;
        self.request_url(url, opts).await
    }

    /// Same as [`HttpClient::request`] for a URL built with [`HttpClient::endpoint`].
    pub async fn request_url(&self, url: Url, opts: RequestOptions) -> Result<Value, NetworkError> {
        let policy = RetryPolicy::new(opts.retries.unwrap_or(self.policy.retries), self.policy.delay);
        let timeout = opts.timeout.unwrap_or(self.timeout);

        let (url, opts) = (&url, &opts);
        policy
            .run(move |attempt| self.attempt(url, opts, timeout, attempt))
            .await
    }

    async fn attempt(
        &self,
        url: &Url,
        opts: &RequestOptions,
        timeout: Duration,
        attempt: u32,
    ) -> Result<Value, NetworkError> {
        let request_id = new_request_id();
        let mut builder = self
            .client
            .request(opts.method.clone(), url.clone())
            .headers(opts.headers.clone())
            .header(REQUEST_ID_HEADER, request_id.as_str());

        if let Some(tenant) = self.effective_tenant(opts.tenant.as_ref()) {
            builder = builder.header(TENANT_HEADER, tenant.as_str());
        }
        if !opts.params.is_empty() {
            builder = builder.query(&opts.params);
        }
        if let Some(data) = &opts.data {
            builder = builder.json(data);
        }

        tracing::debug!(
            request_id = %request_id,
            method = %opts.method,
            path = %url.path(),
            attempt,
            "Sending request"
        );

        let start_time = Instant::now();
        let outcome = with_timeout(timeout, async {
            let response = builder.send().await?;
            let status = response.status();
            let body = response.text().await?;
            Ok::<_, NetworkError>((status, body))
        })
        .await;

        let (status, body) = match outcome {
            Ok(parts) => parts,
            Err(err) => {
                tracing::warn!(request_id = %request_id, path = %url.path(), attempt, error = %err, "Request failed");
                metrics::record_request(opts.method.as_str(), None, start_time);
                return Err(err);
            }
        };

        metrics::record_request(opts.method.as_str(), Some(status.as_u16()), start_time);

        if !status.is_success() {
            let err = NetworkError::from_response(status.as_u16(), &body);
            tracing::warn!(
                request_id = %request_id,
                path = %url.path(),
                attempt,
                status = %status,
                "Backend returned error status"
            );
            return Err(err);
        }

        if status == StatusCode::NO_CONTENT || body.trim().is_empty() {
            return Ok(Value::Null);
        }

        serde_json::from_str(&body).map_err(|e| NetworkError::Decode(e.to_string()))
    }

    /// URL of `segments` below the base URL. Each segment is percent-encoded
    /// on its own, so ids and slugs may contain `/` or spaces.
    pub fn endpoint(&self, segments: &[&str]) -> Result<Url, NetworkError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| {
                NetworkError::InvalidRequest(format!("Base URL '{}' cannot carry a path", self.base_url))
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// URL of a fixed route such as `/v1/services`.
    pub fn url_for(&self, path: &str) -> Result<Url, NetworkError> {
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        self.endpoint(&segments)
    }
}

impl std::fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClient")
            .field("base_url", &self.base_url)
            .field("tenant", &self.tenant)
            .field("timeout", &self.timeout)
            .field("policy", &self.policy)
            .finish()
    }
}
