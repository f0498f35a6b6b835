//! Resource services.
//!
//! # Responsibilities
//! - Map each REST resource to a normalized shape
//! - Scope every request by tenant and locale
//! - Let failures propagate untouched to the caller
//!
//! # Data Flow
//! ```text
//! ContentApi::fetch_*(scope, filters)
//!     → HttpClient::request (timeout, retry, tenant header)
//!     → Envelope (unwrap {data}, read _meta.current_language)
//!     → normalize.rs helpers → normalized type
//! ```

pub mod catalog;
pub mod forms;
pub mod languages;
pub mod menus;
pub mod normalize;
pub mod settings;
pub mod sliders;
pub mod widgets;

pub use catalog::{Coordinates, Service, ServiceQuery};
pub use forms::{ContactForm, FormField, FormOption, SubmissionReceipt};
pub use languages::Language;
pub use menus::{Menu, MenuItem};
pub use settings::{AllSettings, SettingsGroup, DEFAULT_SETTINGS_CATEGORIES};
pub use sliders::Slide;
pub use widgets::{
    Localized, RatingsWidget, Review, ServiceHighlight, WhatsappWidget, Widget, WidgetKind,
};

use crate::config::RemoteConfig;
use crate::http::{Envelope, HttpClient, NetworkError, RequestOptions};
use crate::locale::Locale;
use crate::scope::{Scope, TenantId};

/// Typed access to the content backend.
#[derive(Debug, Clone)]
pub struct ContentApi {
    http: HttpClient,
    default_locale: Locale,
    per_page: u32,
}

impl ContentApi {
    pub fn new(http: HttpClient, config: &RemoteConfig) -> Self {
        Self {
            http,
            default_locale: Locale::parse(&config.default_locale).unwrap_or_default(),
            per_page: config.per_page,
        }
    }

    /// Build the HTTP client and API from one config.
    pub fn from_config(config: &RemoteConfig) -> Result<Self, NetworkError> {
        Ok(Self::new(HttpClient::new(config)?, config))
    }

    pub fn http(&self) -> &HttpClient {
        &self.http
    }

    pub fn default_locale(&self) -> &Locale {
        &self.default_locale
    }

    pub fn per_page(&self) -> u32 {
        self.per_page
    }

    /// Scope from loose caller input; unusable locales fall back to the default.
    pub fn scope(&self, tenant: Option<&str>, locale: Option<&str>) -> Scope {
        let locale = locale
            .map(|raw| Locale::parse_or(raw, &self.default_locale))
            .unwrap_or_else(|| self.default_locale.clone());
        Scope::new(tenant.map(TenantId::from), locale)
    }

    /// Tenant a scoped request is made under (request tenant or configured default).
    pub fn tenant_for<'a>(&'a self, scope: &'a Scope) -> Option<&'a TenantId> {
        self.http.effective_tenant(scope.tenant.as_ref())
    }

    /// Base options for a scoped GET.
    pub(crate) fn scoped_get(&self, scope: &Scope) -> RequestOptions {
        RequestOptions::get().tenant(scope.tenant.clone())
    }

    /// GET below the base URL; every segment is encoded separately.
    pub(crate) async fn get_envelope(
        &self,
        segments: &[&str],
        opts: RequestOptions,
    ) -> Result<Envelope, NetworkError> {
        let url = self.http.endpoint(segments)?;
        let body = self.http.request_url(url, opts).await?;
        Ok(Envelope::from_body(body))
    }
}
