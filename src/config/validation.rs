//! Configuration validation.
//!
//! Returns every problem found, not just the first, so a broken
//! deployment can be fixed in one pass.

use thiserror::Error;
use url::Url;

use crate::config::schema::RemoteConfig;
use crate::locale::Locale;

/// Upper bound for the retry count; retries are meant to absorb blips, not outages.
pub const MAX_RETRIES: u32 = 5;

/// A single semantic configuration problem.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("api_base_url '{0}' is not a valid http(s) URL")]
    InvalidBaseUrl(String),

    #[error("timeout_ms must be greater than zero")]
    ZeroTimeout,

    #[error("retries must be at most 5, got {0}")]
    TooManyRetries(u32),

    #[error("per_page must be between 1 and 100, got {0}")]
    PerPageOutOfRange(u32),

    #[error("default_locale '{0}' is not a two-letter language code")]
    InvalidLocale(String),

    #[error("tenant_id must not be blank")]
    BlankTenant,
}

/// Check a resolved config. Pure function over the config value.
pub fn validate_config(config: &RemoteConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    match Url::parse(&config.api_base_url) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => {}
        _ => errors.push(ValidationError::InvalidBaseUrl(config.api_base_url.clone())),
    }

    if config.timeout_ms == 0 {
        errors.push(ValidationError::ZeroTimeout);
    }

    if config.retries > MAX_RETRIES {
        errors.push(ValidationError::TooManyRetries(config.retries));
    }

    if !(1..=100).contains(&config.per_page) {
        errors.push(ValidationError::PerPageOutOfRange(config.per_page));
    }

    if Locale::parse(&config.default_locale).is_none() {
        errors.push(ValidationError::InvalidLocale(config.default_locale.clone()));
    }

    if matches!(&config.tenant_id, Some(t) if t.trim().is_empty()) {
        errors.push(ValidationError::BlankTenant);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
