//! Tenant and locale scoping shared by every resource call.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::locale::Locale;

/// Multi-site identifier selecting which business's data is returned.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TenantId(String);

impl TenantId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for TenantId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for TenantId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl fmt::Display for TenantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Tenant + locale pair every resource request is made under.
///
/// A `None` tenant means "use the configured default".
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Scope {
    pub tenant: Option<TenantId>,
    pub locale: Locale,
}

impl Scope {
    pub fn new(tenant: Option<TenantId>, locale: Locale) -> Self {
        Self { tenant, locale }
    }

    /// Same tenant, different locale.
    pub fn with_locale(&self, locale: Locale) -> Self {
        Self {
            tenant: self.tenant.clone(),
            locale,
        }
    }
}
