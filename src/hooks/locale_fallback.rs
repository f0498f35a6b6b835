//! Locale fallback resolution.
//!
//! # State Transitions
//! ```text
//! Requested(r) → served none or r    → Settled(r)
//! Requested(r) → served s != r       → Redirected { requested: r, resolved: s }
//! Redirected   → any response        → Settled(resolved)
//! ```
//!
//! A redirect happens at most once, so a backend that keeps reporting a
//! different language cannot cause a fetch loop.

use std::future::Future;
use std::sync::Arc;

use crate::http::NetworkError;
use crate::locale::Locale;
use crate::services::Localized;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocaleResolution {
    Requested(Locale),
    Redirected { requested: Locale, resolved: Locale },
    Settled(Locale),
}

impl LocaleResolution {
    /// Advance after a response served in `served`.
    pub fn observe(self, served: &Locale) -> Self {
        match self {
            LocaleResolution::Requested(requested) if *served == requested => {
                LocaleResolution::Settled(requested)
            }
            LocaleResolution::Requested(requested) => LocaleResolution::Redirected {
                requested,
                resolved: served.clone(),
            },
            LocaleResolution::Redirected { requested, resolved } => {
                if *served != resolved {
                    tracing::warn!(
                        requested = %requested,
                        resolved = %resolved,
                        served = %served,
                        "Backend changed fallback language again; accepting response"
                    );
                }
                LocaleResolution::Settled(resolved)
            }
            settled @ LocaleResolution::Settled(_) => settled,
        }
    }

    /// Locale that still needs fetching, if any.
    pub fn pending_fetch(&self) -> Option<&Locale> {
        match self {
            LocaleResolution::Requested(locale) => Some(locale),
            LocaleResolution::Redirected { resolved, .. } => Some(resolved),
            LocaleResolution::Settled(_) => None,
        }
    }
}

/// Fetch under `requested`, following at most one language redirect.
pub async fn resolve_locale<T, F, Fut>(
    requested: Locale,
    mut fetch: F,
) -> Result<Arc<Localized<T>>, NetworkError>
where
    F: FnMut(Locale) -> Fut,
    Fut: Future<Output = Result<Arc<Localized<T>>, NetworkError>>,
{
    let mut resolution = LocaleResolution::Requested(requested.clone());
    let mut locale = requested;
    loop {
        let response = fetch(locale).await?;
        resolution = resolution.observe(&response.locale);
        match resolution.pending_fetch() {
            None => return Ok(response),
            Some(next) => {
                tracing::debug!(resolved = %next, "Re-fetching in fallback language");
                locale = next.clone();
            }
        }
    }
}
