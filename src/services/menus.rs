//! Navigation menus (`/v1/menus`).

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::http::NetworkError;
use crate::scope::Scope;
use crate::services::normalize::{normalize_items, pick_array, pick_id, pick_str};
use crate::services::ContentApi;
use crate::store::CacheKey;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuItem {
    pub id: Option<String>,
    pub label: String,
    pub url: String,
    pub target: Option<String>,
    pub children: Vec<MenuItem>,
}

impl MenuItem {
    pub fn from_value(item: &Value) -> Option<Self> {
        let label = pick_str(item, &["label", "title", "name", "translation.label"])?;
        let children = pick_array(item, &["children", "items", "submenu"])
            .map(|items| normalize_items(items, "menu_items", MenuItem::from_value))
            .unwrap_or_default();

        Some(Self {
            id: pick_id(item),
            label,
            url: pick_str(item, &["url", "link", "href", "path"]).unwrap_or_else(|| "#".to_string()),
            target: pick_str(item, &["target"]),
            children,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Menu {
    pub id: String,
    pub name: String,
    pub location: Option<String>,
    pub items: Vec<MenuItem>,
}

impl Menu {
    pub fn from_value(item: &Value) -> Option<Self> {
        let id = pick_id(item)?;
        let items = pick_array(item, &["items", "menu_items", "links"])
            .map(|items| normalize_items(items, "menu_items", MenuItem::from_value))
            .unwrap_or_default();

        Some(Self {
            name: pick_str(item, &["name", "title"]).unwrap_or_else(|| id.clone()),
            location: pick_str(item, &["location", "position", "slug"]),
            id,
            items,
        })
    }
}

impl ContentApi {
    /// Menus, optionally limited to one location: `GET /v1/menus?location&locale`.
    pub async fn fetch_menus(
        &self,
        scope: &Scope,
        location: Option<&str>,
    ) -> Result<Vec<Menu>, NetworkError> {
        let opts = self
            .scoped_get(scope)
            .param_opt("location", location)
            .param("locale", &scope.locale);

        let envelope = self.get_envelope(&["v1", "menus"], opts).await?;
        Ok(normalize_items(&envelope.into_items(), "menus", Menu::from_value))
    }

    pub fn menus_key(&self, scope: &Scope, location: Option<&str>) -> CacheKey {
        CacheKey::new("menus")
            .with_opt("tenant", self.tenant_for(scope))
            .with("locale", &scope.locale)
            .with_opt("location", location)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_nested_menu() {
        let menu = Menu::from_value(&json!({
            "id": 1,
            "name": "Main",
            "location": "header",
            "items": [
                {"id": 10, "title": "Services", "url": "/services", "children": [
                    {"label": "Office", "link": "/services/office", "target": "_self"}
                ]},
                {"url": "/no-label"}
            ]
        }))
        .unwrap();
        assert_eq!(menu.items.len(), 1);
        assert_eq!(menu.items[0].label, "Services");
        assert_eq!(menu.items[0].children[0].url, "/services/office");
        assert_eq!(menu.location.as_deref(), Some("header"));
    }

    #[test]
    fn test_item_without_url_gets_placeholder() {
        let item = MenuItem::from_value(&json!({"label": "Contact"})).unwrap();
        assert_eq!(item.url, "#");
        assert!(item.children.is_empty());
    }
}
