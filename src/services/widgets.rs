//! Site widgets (`/widgets/{kind}`).
//!
//! Widgets are translated content; the backend may serve a different
//! language than requested and says so in `_meta.current_language`.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

use crate::http::NetworkError;
use crate::locale::Locale;
use crate::scope::Scope;
use crate::services::normalize::{
    normalize_items, pick_array, pick_bool, pick_f64, pick_i64, pick_str,
};
use crate::services::ContentApi;
use crate::store::CacheKey;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WidgetKind {
    Whatsapp,
    Ratings,
    ServiceHighlights,
}

impl WidgetKind {
    pub fn path_segment(&self) -> &'static str {
        match self {
            WidgetKind::Whatsapp => "whatsapp",
            WidgetKind::Ratings => "ratings",
            WidgetKind::ServiceHighlights => "service-highlights",
        }
    }
}

impl fmt::Display for WidgetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path_segment())
    }
}

impl FromStr for WidgetKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "whatsapp" => Ok(WidgetKind::Whatsapp),
            "ratings" => Ok(WidgetKind::Ratings),
            "service-highlights" | "service_highlights" => Ok(WidgetKind::ServiceHighlights),
            other => Err(format!(
                "unknown widget '{other}' (expected whatsapp, ratings or service-highlights)"
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WhatsappWidget {
    pub enabled: bool,
    pub phone: Option<String>,
    pub message: Option<String>,
    pub position: Option<String>,
}

impl WhatsappWidget {
    pub fn from_value(data: &Value) -> Self {
        let phone = pick_str(data, &["phone", "phone_number", "number"]);
        Self {
            enabled: pick_bool(data, &["enabled", "is_active", "active"]).unwrap_or(phone.is_some()),
            message: pick_str(data, &["message", "default_message", "text"]),
            position: pick_str(data, &["position"]),
            phone,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    pub author: String,
    pub rating: Option<f64>,
    pub text: Option<String>,
}

impl Review {
    fn from_value(item: &Value) -> Option<Self> {
        Some(Self {
            author: pick_str(item, &["author", "author_name", "name"])?,
            rating: pick_f64(item, &["rating", "stars"]),
            text: pick_str(item, &["text", "comment", "content"]),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatingsWidget {
    pub average: Option<f64>,
    pub count: u64,
    pub source: Option<String>,
    pub reviews: Vec<Review>,
}

impl RatingsWidget {
    pub fn from_value(data: &Value) -> Self {
        let reviews = pick_array(data, &["reviews", "items"])
            .map(|items| normalize_items(items, "reviews", Review::from_value))
            .unwrap_or_default();
        Self {
            average: pick_f64(data, &["average", "average_rating", "rating"]),
            count: pick_i64(data, &["count", "total", "review_count", "reviews_count"])
                .map(|c| c.max(0) as u64)
                .unwrap_or(reviews.len() as u64),
            source: pick_str(data, &["source", "provider"]),
            reviews,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceHighlight {
    pub title: String,
    pub description: Option<String>,
    pub icon: Option<String>,
    pub link: Option<String>,
}

impl ServiceHighlight {
    fn from_value(item: &Value) -> Option<Self> {
        Some(Self {
            title: pick_str(item, &["title", "name", "translation.title"])?,
            description: pick_str(item, &["description", "text", "excerpt"]),
            icon: pick_str(item, &["icon", "icon_url"]),
            link: pick_str(item, &["link", "url"]),
        })
    }
}

/// Normalized widget payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "data", rename_all = "kebab-case")]
pub enum Widget {
    Whatsapp(WhatsappWidget),
    Ratings(RatingsWidget),
    ServiceHighlights(Vec<ServiceHighlight>),
}

impl Widget {
    pub fn from_value(kind: WidgetKind, data: &Value) -> Self {
        match kind {
            WidgetKind::Whatsapp => Widget::Whatsapp(WhatsappWidget::from_value(data)),
            WidgetKind::Ratings => Widget::Ratings(RatingsWidget::from_value(data)),
            WidgetKind::ServiceHighlights => {
                let items = match data {
                    Value::Array(items) => items.as_slice(),
                    other => pick_array(other, &["items", "highlights"])
                        .map(Vec::as_slice)
                        .unwrap_or_default(),
                };
                Widget::ServiceHighlights(normalize_items(items, "service_highlights", ServiceHighlight::from_value))
            }
        }
    }
}

/// Data together with the language it is actually written in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Localized<T> {
    pub locale: Locale,
    pub data: T,
}

impl ContentApi {
    /// `GET /widgets/{kind}?tenant&locale`. The returned locale is the one
    /// the backend reports serving, or the requested one if it is silent.
    pub async fn fetch_widget(&self, scope: &Scope, kind: WidgetKind) -> Result<Localized<Widget>, NetworkError> {
        let opts = self
            .scoped_get(scope)
            .param_opt("tenant", self.tenant_for(scope))
            .param("locale", &scope.locale);

        let envelope = self.get_envelope(&["widgets", kind.path_segment()], opts).await?;
        let locale = envelope
            .current_language
            .clone()
            .unwrap_or_else(|| scope.locale.clone());

        Ok(Localized {
            locale,
            data: Widget::from_value(kind, &envelope.data),
        })
    }

    pub fn widget_key(&self, scope: &Scope, kind: WidgetKind) -> CacheKey {
        CacheKey::new("widget")
            .with_opt("tenant", self.tenant_for(scope))
            .with("locale", &scope.locale)
            .with("kind", kind)
    }
}
