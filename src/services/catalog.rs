//! Service catalog (`/v1/services`).

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::http::NetworkError;
use crate::scope::Scope;
use crate::services::normalize::{
    normalize_items, pick_f64, pick_id, pick_image, pick_str,
};
use crate::services::ContentApi;
use crate::store::CacheKey;

/// Map position of a service location.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

/// A cleaning service offered by the tenant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Service {
    pub id: String,
    pub title: String,
    pub slug: String,
    pub excerpt: Option<String>,
    pub image: Option<String>,
    pub city: Option<String>,
    pub coordinates: Option<Coordinates>,
}

impl Service {
    /// Normalize a raw backend item. Items without an id are rejected.
    pub fn from_value(item: &Value) -> Option<Self> {
        let id = pick_id(item)?;
        let title = pick_str(item, &["title", "name", "translation.title"]).unwrap_or_default();
        let slug = pick_str(item, &["slug", "translation.slug"]).unwrap_or_else(|| id.clone());

        let lat = pick_f64(
            item,
            &["latitude", "lat", "location.lat", "location.latitude", "coordinates.lat"],
        );
        let lng = pick_f64(
            item,
            &[
                "longitude",
                "lng",
                "lon",
                "location.lng",
                "location.longitude",
                "coordinates.lng",
            ],
        );

        Some(Self {
            id,
            title,
            slug,
            excerpt: pick_str(
                item,
                &["excerpt", "short_description", "shortDescription", "summary", "translation.excerpt"],
            ),
            image: pick_image(item),
            city: pick_str(item, &["city", "city_name", "location.city", "address.city"]),
            coordinates: lat.zip(lng).map(|(lat, lng)| Coordinates { lat, lng }),
        })
    }
}

/// Filters for the service listing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ServiceQuery {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
    pub city: Option<String>,
    pub category: Option<String>,
}

impl ServiceQuery {
    pub fn per_page(per_page: u32) -> Self {
        Self {
            per_page: Some(per_page),
            ..Self::default()
        }
    }
}

impl ContentApi {
    /// List services: `GET /v1/services?page&per_page&city&category&locale`.
    pub async fn fetch_services(
        &self,
        scope: &Scope,
        query: &ServiceQuery,
    ) -> Result<Vec<Service>, NetworkError> {
        let opts = self
            .scoped_get(scope)
            .param_opt("page", query.page)
            .param("per_page", query.per_page.unwrap_or(self.per_page()))
            .param_opt("city", query.city.as_deref())
            .param_opt("category", query.category.as_deref())
            .param("locale", &scope.locale);

        let envelope = self.get_envelope(&["v1", "services"], opts).await?;
        Ok(normalize_items(&envelope.into_items(), "services", Service::from_value))
    }

    /// Single service by id or slug: `GET /v1/services/{id|slug}`.
    pub async fn fetch_service(&self, scope: &Scope, id_or_slug: &str) -> Result<Service, NetworkError> {
        let opts = self.scoped_get(scope).param("locale", &scope.locale);

        let envelope = self.get_envelope(&["v1", "services", id_or_slug], opts).await?;
        Service::from_value(&envelope.data)
            .ok_or_else(|| NetworkError::Decode(format!("service '{id_or_slug}' has no id")))
    }

    pub fn services_key(&self, scope: &Scope, query: &ServiceQuery) -> CacheKey {
        CacheKey::new("services")
            .with_opt("tenant", self.tenant_for(scope))
            .with("locale", &scope.locale)
            .with_opt("page", query.page)
            .with("per_page", query.per_page.unwrap_or(self.per_page()))
            .with_opt("city", query.city.as_deref())
            .with_opt("category", query.category.as_deref())
    }

    pub fn service_key(&self, scope: &Scope, id_or_slug: &str) -> CacheKey {
        CacheKey::new("service")
            .with_opt("tenant", self.tenant_for(scope))
            .with("locale", &scope.locale)
            .with("id", id_or_slug)
    }
}
