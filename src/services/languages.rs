//! Tenant languages (`/global/settings/languages`).

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::http::NetworkError;
use crate::locale::Locale;
use crate::scope::Scope;
use crate::services::normalize::{normalize_items, pick_bool, pick_str};
use crate::services::ContentApi;
use crate::store::CacheKey;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Language {
    pub code: Locale,
    pub name: String,
    pub native_name: Option<String>,
    pub is_default: bool,
}

impl Language {
    pub fn from_value(item: &Value) -> Option<Self> {
        let code = pick_str(item, &["code", "locale", "iso_code", "lang"])
            .and_then(|raw| Locale::parse(&raw))?;
        Some(Self {
            name: pick_str(item, &["name", "title"]).unwrap_or_else(|| code.to_string()),
            native_name: pick_str(item, &["native_name", "nativeName", "native"]),
            is_default: pick_bool(item, &["is_default", "default", "isDefault"]).unwrap_or(false),
            code,
        })
    }
}

impl ContentApi {
    /// Languages enabled for the tenant: `GET /global/settings/languages?tenant`.
    pub async fn fetch_languages(&self, scope: &Scope) -> Result<Vec<Language>, NetworkError> {
        let opts = self
            .scoped_get(scope)
            .param_opt("tenant", self.tenant_for(scope));

        let envelope = self.get_envelope(&["global", "settings", "languages"], opts).await?;
        Ok(normalize_items(&envelope.into_items(), "languages", Language::from_value))
    }

    pub fn languages_key(&self, scope: &Scope) -> CacheKey {
        CacheKey::new("languages").with_opt("tenant", self.tenant_for(scope))
    }
}
