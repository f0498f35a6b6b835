//! Resource hooks over a shared store.

use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::watch;

use crate::config::RemoteConfig;
use crate::hooks::locale_fallback::resolve_locale;
use crate::hooks::state::{HookHandle, ResourceState};
use crate::http::NetworkError;
use crate::scope::Scope;
use crate::services::{
    AllSettings, ContactForm, ContentApi, Language, Localized, Menu, Service, ServiceQuery,
    SettingsGroup, Slide, Widget, WidgetKind, DEFAULT_SETTINGS_CATEGORIES,
};
use crate::store::{CacheKey, ResourceStore};

/// Entry point for consumers: one per application instance.
///
/// Every `use_*` call must happen inside a Tokio runtime.
#[derive(Debug, Clone)]
pub struct DataHooks {
    api: Arc<ContentApi>,
    store: ResourceStore,
}

impl DataHooks {
    pub fn new(api: ContentApi, store: ResourceStore) -> Self {
        Self {
            api: Arc::new(api),
            store,
        }
    }

    /// API client and a fresh store built from one config.
    pub fn from_config(config: &RemoteConfig) -> Result<Self, NetworkError> {
        Ok(Self::new(ContentApi::from_config(config)?, ResourceStore::new()))
    }

    pub fn api(&self) -> &ContentApi {
        &self.api
    }

    pub fn store(&self) -> &ResourceStore {
        &self.store
    }

    /// Mount a hook for `key`. A cached value is returned synchronously
    /// with `loading = false`; otherwise `loader` runs through the store's
    /// de-duplicating fetch.
    pub fn mount<T, F, Fut>(&self, key: CacheKey, loader: F) -> HookHandle<T>
    where
        T: Send + Sync + 'static,
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = Result<T, NetworkError>> + Send + 'static,
    {
        if let Some(data) = self.store.get::<T>(&key) {
            return ready_handle(key, data);
        }

        let store = self.store.clone();
        let fetch_key = key.clone();
        spawn_hook(key, async move { store.fetch(fetch_key, loader).await })
    }

    pub fn use_services(&self, scope: &Scope, query: ServiceQuery) -> HookHandle<Vec<Service>> {
        let key = self.api.services_key(scope, &query);
        let (api, scope) = (self.api.clone(), scope.clone());
        self.mount(key, move || async move { api.fetch_services(&scope, &query).await })
    }

    pub fn use_service(&self, scope: &Scope, id_or_slug: &str) -> HookHandle<Service> {
        let key = self.api.service_key(scope, id_or_slug);
        let (api, scope, id) = (self.api.clone(), scope.clone(), id_or_slug.to_string());
        self.mount(key, move || async move { api.fetch_service(&scope, &id).await })
    }

    pub fn use_settings(&self, scope: &Scope, category: &str) -> HookHandle<SettingsGroup> {
        let key = self.api.settings_key(scope, category);
        let (api, scope, category) = (self.api.clone(), scope.clone(), category.to_string());
        self.mount(key, move || async move { api.fetch_settings(&scope, &category).await })
    }

    /// Several categories at once; an empty list means the default set.
    pub fn use_all_settings(&self, scope: &Scope, categories: &[String]) -> HookHandle<AllSettings> {
        let categories: Vec<String> = if categories.is_empty() {
            DEFAULT_SETTINGS_CATEGORIES.iter().map(|c| c.to_string()).collect()
        } else {
            categories.to_vec()
        };
        let key = self.api.all_settings_key(scope, &categories);
        let (api, scope) = (self.api.clone(), scope.clone());
        self.mount(key, move || async move { api.fetch_all_settings(&scope, &categories).await })
    }

    pub fn use_menus(&self, scope: &Scope, location: Option<&str>) -> HookHandle<Vec<Menu>> {
        let key = self.api.menus_key(scope, location);
        let (api, scope, location) = (self.api.clone(), scope.clone(), location.map(str::to_string));
        self.mount(key, move || async move { api.fetch_menus(&scope, location.as_deref()).await })
    }

    pub fn use_contact_forms(&self, scope: &Scope) -> HookHandle<Vec<ContactForm>> {
        let key = self.api.contact_forms_key(scope);
        let (api, scope) = (self.api.clone(), scope.clone());
        self.mount(key, move || async move { api.fetch_contact_forms(&scope).await })
    }

    pub fn use_languages(&self, scope: &Scope) -> HookHandle<Vec<Language>> {
        let key = self.api.languages_key(scope);
        let (api, scope) = (self.api.clone(), scope.clone());
        self.mount(key, move || async move { api.fetch_languages(&scope).await })
    }

    pub fn use_sliders(&self, scope: &Scope) -> HookHandle<Vec<Slide>> {
        let key = self.api.sliders_key(scope);
        let (api, scope) = (self.api.clone(), scope.clone());
        self.mount(key, move || async move { api.fetch_sliders(&scope).await })
    }

    /// Widget in the requested locale, following the backend's language
    /// fallback at most once. Each locale is cached under its own key.
    pub fn use_widget(&self, scope: &Scope, kind: WidgetKind) -> HookHandle<Localized<Widget>> {
        let key = self.api.widget_key(scope, kind);
        if let Some(data) = self.peek_widget(scope, kind) {
            return ready_handle(key, data);
        }

        let (api, store, scope) = (self.api.clone(), self.store.clone(), scope.clone());
        spawn_hook(key, async move {
            resolve_locale(scope.locale.clone(), |locale| {
                let scoped = scope.with_locale(locale);
                let key = api.widget_key(&scoped, kind);
                let (api, store) = (api.clone(), store.clone());
                async move {
                    store
                        .fetch(key, move || async move { api.fetch_widget(&scoped, kind).await })
                        .await
                }
            })
            .await
        })
    }

    fn peek_widget(&self, scope: &Scope, kind: WidgetKind) -> Option<Arc<Localized<Widget>>> {
        let first = self
            .store
            .get::<Localized<Widget>>(&self.api.widget_key(scope, kind))?;
        if first.locale == scope.locale {
            return Some(first);
        }
        let resolved = scope.with_locale(first.locale.clone());
        self.store.get(&self.api.widget_key(&resolved, kind))
    }
}

fn ready_handle<T>(key: CacheKey, data: Arc<T>) -> HookHandle<T> {
    tracing::debug!(key = %key, "Hook mounted from cache");
    let (_tx, rx) = watch::channel(ResourceState::ready(data));
    HookHandle::new(key, rx, Arc::new(AtomicBool::new(false)))
}

fn spawn_hook<T, Fut>(key: CacheKey, task: Fut) -> HookHandle<T>
where
    T: Send + Sync + 'static,
    Fut: Future<Output = Result<Arc<T>, NetworkError>> + Send + 'static,
{
    let (tx, rx) = watch::channel(ResourceState::loading());
    let disposed = Arc::new(AtomicBool::new(false));
    let guard = disposed.clone();
    let log_key = key.clone();

    tokio::spawn(async move {
        let result = task.await;
        if guard.load(Ordering::SeqCst) {
            tracing::debug!(key = %log_key, "Hook unmounted, discarding result");
            return;
        }
        let state = match result {
            Ok(data) => ResourceState::ready(data),
            Err(err) => {
                tracing::warn!(key = %log_key, error = %err, "Hook fetch failed");
                ResourceState::failed(err.user_message())
            }
        };
        let _ = tx.send(state);
    });

    HookHandle::new(key, rx, disposed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicU32;
    use std::time::Duration;

    fn hooks() -> DataHooks {
        DataHooks::from_config(&RemoteConfig::default()).unwrap()
    }

    #[tokio::test]
    async fn test_mount_from_cache_is_synchronous() {
        let hooks = hooks();
        let key = CacheKey::new("numbers");
        hooks.store().set(key.clone(), 3u32);

        let handle = hooks.mount(key, || async { Err::<u32, _>(NetworkError::Transport("unused".into())) });
        let state = handle.state();
        assert!(!state.loading);
        assert_eq!(state.data.as_deref(), Some(&3));
    }

    #[tokio::test]
    async fn test_concurrent_mounts_load_once() {
        let hooks = hooks();
        let calls = Arc::new(AtomicU32::new(0));

        let mut handles: Vec<HookHandle<u32>> = (0..5)
            .map(|_| {
                let calls = calls.clone();
                hooks.mount(CacheKey::new("numbers"), move || async move {
                    calls.fetch_add(1, Ordering::SeqCst);
                    tokio::time::sleep(Duration::from_millis(30)).await;
                    Ok(9u32)
                })
            })
            .collect();

        assert!(handles.iter().all(|h| h.state().loading));
        for handle in handles.iter_mut() {
            assert_eq!(handle.settled().await.data.as_deref(), Some(&9));
        }
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_error_becomes_message() {
        let hooks = hooks();
        let mut handle = hooks.mount(CacheKey::new("numbers"), || async {
            Err::<u32, _>(NetworkError::from_response(503, ""))
        });
        let state = handle.settled().await;
        assert!(state.data.is_none());
        assert_eq!(state.error.as_deref(), Some(crate::http::error::GENERIC_LOAD_ERROR));
    }

    #[tokio::test]
    async fn test_unmounted_hook_ignores_result_but_cache_fills() {
        let hooks = hooks();
        let handle = hooks.mount(CacheKey::new("numbers"), || async {
            tokio::time::sleep(Duration::from_millis(20)).await;
            Ok(1u32)
        });
        handle.unmount();
        tokio::time::sleep(Duration::from_millis(60)).await;

        assert!(handle.state().loading);
        assert_eq!(hooks.store().get::<u32>(&CacheKey::new("numbers")).as_deref(), Some(&1));
    }
}
