//! Hero sliders (`/v1/sliders`).

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::http::NetworkError;
use crate::scope::Scope;
use crate::services::normalize::{normalize_items, pick_i64, pick_id, pick_image, pick_str};
use crate::services::ContentApi;
use crate::store::CacheKey;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Slide {
    pub id: String,
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub image: Option<String>,
    pub cta_label: Option<String>,
    pub cta_url: Option<String>,
    pub order: i64,
}

impl Slide {
    pub fn from_value(item: &Value) -> Option<Self> {
        Some(Self {
            id: pick_id(item)?,
            title: pick_str(item, &["title", "heading", "translation.title"]),
            subtitle: pick_str(item, &["subtitle", "sub_title", "description", "translation.subtitle"]),
            image: pick_image(item).or_else(|| pick_str(item, &["background_image", "background"])),
            cta_label: pick_str(item, &["button_text", "cta_label", "cta.label", "button.label"]),
            cta_url: pick_str(item, &["button_url", "button_link", "cta_url", "cta.url", "button.url"]),
            order: pick_i64(item, &["order", "sort_order", "position"]).unwrap_or(0),
        })
    }
}

impl ContentApi {
    /// Slides in display order: `GET /v1/sliders?locale`.
    pub async fn fetch_sliders(&self, scope: &Scope) -> Result<Vec<Slide>, NetworkError> {
        let opts = self.scoped_get(scope).param("locale", &scope.locale);

        let envelope = self.get_envelope(&["v1", "sliders"], opts).await?;
        let mut slides = normalize_items(&envelope.into_items(), "sliders", Slide::from_value);
        slides.sort_by_key(|slide| slide.order);
        Ok(slides)
    }

    pub fn sliders_key(&self, scope: &Scope) -> CacheKey {
        CacheKey::new("sliders")
            .with_opt("tenant", self.tenant_for(scope))
            .with("locale", &scope.locale)
    }
}
