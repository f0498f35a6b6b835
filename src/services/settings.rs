//! Tenant settings (`/settings/{category}`).

use futures_util::future::try_join_all;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

use crate::http::NetworkError;
use crate::scope::Scope;
use crate::services::normalize::pick_str;
use crate::services::ContentApi;
use crate::store::CacheKey;

/// Categories loaded by `fetch_all_settings` when the caller names none.
pub const DEFAULT_SETTINGS_CATEGORIES: &[&str] = &["general", "contact", "social", "seo"];

/// Key/value settings of one category.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SettingsGroup {
    pub category: String,
    pub values: BTreeMap<String, Value>,
}

impl SettingsGroup {
    /// Accepts either an object or a list of `{key, value}` rows.
    pub fn from_value(category: &str, data: &Value) -> Self {
        let values = match data {
            Value::Object(map) => map.iter().map(|(k, v)| (k.clone(), v.clone())).collect(),
            Value::Array(rows) => rows
                .iter()
                .filter_map(|row| {
                    let key = pick_str(row, &["key", "name", "slug"])?;
                    Some((key, row.get("value").cloned().unwrap_or(Value::Null)))
                })
                .collect(),
            _ => BTreeMap::new(),
        };
        Self {
            category: category.to_string(),
            values,
        }
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.values.get(key).and_then(Value::as_str)
    }
}

/// Settings of several categories keyed by category name.
pub type AllSettings = BTreeMap<String, SettingsGroup>;

impl ContentApi {
    /// One category: `GET /settings/{category}?tenant&lang`.
    pub async fn fetch_settings(&self, scope: &Scope, category: &str) -> Result<SettingsGroup, NetworkError> {
        let opts = self
            .scoped_get(scope)
            .param_opt("tenant", self.tenant_for(scope))
            .param("lang", &scope.locale);

        let envelope = self.get_envelope(&["settings", category], opts).await?;
        Ok(SettingsGroup::from_value(category, &envelope.data))
    }

    /// Several categories fetched in parallel. Any failure fails the whole call.
    pub async fn fetch_all_settings(
        &self,
        scope: &Scope,
        categories: &[String],
    ) -> Result<AllSettings, NetworkError> {
        let groups = try_join_all(
            categories
                .iter()
                .map(|category| self.fetch_settings(scope, category)),
        )
        .await?;

        Ok(groups
            .into_iter()
            .map(|group| (group.category.clone(), group))
            .collect())
    }

    pub fn settings_key(&self, scope: &Scope, category: &str) -> CacheKey {
        CacheKey::new("settings")
            .with_opt("tenant", self.tenant_for(scope))
            .with("locale", &scope.locale)
            .with("category", category)
    }

    pub fn all_settings_key(&self, scope: &Scope, categories: &[String]) -> CacheKey {
        let mut sorted = categories.to_vec();
        sorted.sort();
        sorted.dedup();
        CacheKey::new("all_settings")
            .with_opt("tenant", self.tenant_for(scope))
            .with("locale", &scope.locale)
            .with("categories", sorted.join(","))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_object_settings() {
        let group = SettingsGroup::from_value("contact", &json!({"phone": "+49 30 123", "open": true}));
        assert_eq!(group.get_str("phone"), Some("+49 30 123"));
        assert_eq!(group.values["open"], json!(true));
    }

    #[test]
    fn test_row_settings() {
        let group = SettingsGroup::from_value(
            "general",
            &json!([{"key": "site_name", "value": "Sparkle"}, {"value": "orphan"}]),
        );
        assert_eq!(group.values.len(), 1);
        assert_eq!(group.get_str("site_name"), Some("Sparkle"));
    }
}
