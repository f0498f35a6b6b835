//! Session cache with in-flight request de-duplication.

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use futures_util::future::{BoxFuture, FutureExt, Shared};
use std::any::Any;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::http::error::NetworkError;
use crate::observability::metrics;
use crate::store::key::CacheKey;

type CachedValue = Arc<dyn Any + Send + Sync>;
type PendingFetch = Shared<BoxFuture<'static, Result<CachedValue, NetworkError>>>;

const DEFAULT_STORE_NAME: &str = "default";

/// Per-application store of normalized resources.
///
/// Cloning is cheap and every clone shares the same maps.
#[derive(Clone, Default)]
pub struct ResourceStore {
    inner: Arc<StoreInner>,
}

struct StoreInner {
    name: String,
    cache: DashMap<CacheKey, CachedValue>,
    in_flight: DashMap<CacheKey, InFlight>,
    next_id: AtomicU64,
}

/// A registered request. `id` tells a settling request whether its
/// registration survived invalidation.
struct InFlight {
    id: u64,
    future: PendingFetch,
}

impl StoreInner {
    fn new(name: String) -> Self {
        Self {
            name,
            cache: DashMap::new(),
            in_flight: DashMap::new(),
            next_id: AtomicU64::new(0),
        }
    }

    fn record_size(&self) {
        metrics::record_cache_size(&self.name, self.cache.len());
    }
}

impl Default for StoreInner {
    fn default() -> Self {
        Self::new(DEFAULT_STORE_NAME.to_string())
    }
}

impl ResourceStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store whose metrics carry `name` as the `store` label.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            inner: Arc::new(StoreInner::new(name.into())),
        }
    }

    pub fn name(&self) -> &str {
        &self.inner.name
    }

    /// Cached value for `key`, if present and of type `T`.
    pub fn get<T: Send + Sync + 'static>(&self, key: &CacheKey) -> Option<Arc<T>> {
        let value = self.inner.cache.get(key)?.value().clone();
        value.downcast::<T>().ok()
    }

    /// Store `value` under `key`, replacing any previous entry.
    pub fn set<T: Send + Sync + 'static>(&self, key: CacheKey, value: T) -> Arc<T> {
        let value = Arc::new(value);
        self.inner.cache.insert(key, value.clone());
        self.inner.record_size();
        value
    }

    /// Drop one entry. Returns whether a cached value existed.
    ///
    /// A request for `key` still in flight is detached: its waiters get the
    /// result, but it is not written back, and the next fetch starts anew.
    pub fn invalidate(&self, key: &CacheKey) -> bool {
        self.inner.in_flight.remove(key);
        let removed = self.inner.cache.remove(key).is_some();
        self.inner.record_size();
        removed
    }

    /// Drop every entry of a resource. Returns how many cached values were
    /// removed. In-flight requests of the resource are detached as in
    /// [`ResourceStore::invalidate`].
    pub fn invalidate_resource(&self, resource: &str) -> usize {
        self.inner.in_flight.retain(|key, _| key.resource() != resource);
        let before = self.inner.cache.len();
        self.inner.cache.retain(|key, _| key.resource() != resource);
        let removed = before.saturating_sub(self.inner.cache.len());
        self.inner.record_size();
        removed
    }

    /// Drop everything, detaching in-flight requests.
    pub fn clear(&self) {
        self.inner.in_flight.clear();
        self.inner.cache.clear();
        self.inner.record_size();
    }

    pub fn len(&self) -> usize {
        self.inner.cache.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.cache.is_empty()
    }

    pub fn in_flight_len(&self) -> usize {
        self.inner.in_flight.len()
    }

    pub fn is_in_flight(&self, key: &CacheKey) -> bool {
        self.inner.in_flight.contains_key(key)
    }

    /// Return the cached value for `key`, or run `loader` once and share its
    /// result with every concurrent caller of the same key.
    ///
    /// `loader` is called without any store lock held, so it may use the
    /// store itself. If another caller registers the same key in the
    /// meantime, the future `loader` returned is dropped unpolled and the
    /// caller joins the registered request. Failures are handed to all
    /// waiters and are not cached.
    pub async fn fetch<T, F, Fut>(&self, key: CacheKey, loader: F) -> Result<Arc<T>, NetworkError>
    where
        T: Send + Sync + 'static,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, NetworkError>> + Send + 'static,
    {
        if let Some(hit) = self.get::<T>(&key) {
            tracing::debug!(key = %key, "Cache hit");
            metrics::record_cache_hit(key.resource());
            return Ok(hit);
        }

        let existing = self.inner.in_flight.get(&key).map(|entry| entry.future.clone());
        let pending = match existing {
            Some(future) => self.join(&key, future),
            None => {
                let request = loader();
                match self.inner.in_flight.entry(key.clone()) {
                    Entry::Occupied(entry) => self.join(&key, entry.get().future.clone()),
                    Entry::Vacant(entry) => {
                        // A request for this key may have settled since the first check.
                        if let Some(hit) = self.get::<T>(&key) {
                            metrics::record_cache_hit(key.resource());
                            return Ok(hit);
                        }

                        tracing::debug!(key = %key, "Cache miss, fetching");
                        metrics::record_cache_miss(key.resource());

                        let id = self.inner.next_id.fetch_add(1, Ordering::Relaxed);
                        let future = settle(Arc::clone(&self.inner), key.clone(), id, request);
                        entry.insert(InFlight {
                            id,
                            future: future.clone(),
                        });
                        future
                    }
                }
            }
        };

        let value = pending.await?;
        value.downcast::<T>().map_err(|_| {
            NetworkError::Decode(format!("cached value for {key} has an unexpected type"))
        })
    }

    fn join(&self, key: &CacheKey, future: PendingFetch) -> PendingFetch {
        tracing::debug!(key = %key, "Joining in-flight request");
        metrics::record_inflight_join(key.resource());
        future
    }
}

/// Shared future that runs `request` and, on success, caches the value while
/// its in-flight registration `id` is still current.
fn settle<T, Fut>(store: Arc<StoreInner>, key: CacheKey, id: u64, request: Fut) -> PendingFetch
where
    T: Send + Sync + 'static,
    Fut: Future<Output = Result<T, NetworkError>> + Send + 'static,
{
    async move {
        let result = request.await.map(|value| Arc::new(value) as CachedValue);

        // The cache is written before the registration is removed so that a
        // new caller always finds one of the two.
        let current = match store.in_flight.entry(key.clone()) {
            Entry::Occupied(entry) if entry.get().id == id => {
                if let Ok(value) = &result {
                    store.cache.insert(key.clone(), value.clone());
                }
                entry.remove();
                true
            }
            _ => false,
        };

        match &result {
            Ok(_) if current => store.record_size(),
            Ok(_) => tracing::debug!(key = %key, "Invalidated while in flight, result not cached"),
            Err(err) => tracing::warn!(key = %key, error = %err, "Fetch failed, not cached"),
        }
        result
    }
    .boxed()
    .shared()
}

impl std::fmt::Debug for ResourceStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResourceStore")
            .field("name", &self.inner.name)
            .field("cached", &self.inner.cache.len())
            .field("in_flight", &self.inner.in_flight.len())
            .finish()
    }
}
