//! Hook state and handle.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::watch;

use crate::store::CacheKey;

/// What a consumer renders: data, a loading flag, or an error message.
#[derive(Debug)]
pub struct ResourceState<T> {
    pub data: Option<Arc<T>>,
    pub loading: bool,
    pub error: Option<String>,
}

impl<T> ResourceState<T> {
    pub fn loading() -> Self {
        Self {
            data: None,
            loading: true,
            error: None,
        }
    }

    pub fn ready(data: Arc<T>) -> Self {
        Self {
            data: Some(data),
            loading: false,
            error: None,
        }
    }

    pub fn failed(error: String) -> Self {
        Self {
            data: None,
            loading: false,
            error: Some(error),
        }
    }
}

impl<T> Clone for ResourceState<T> {
    fn clone(&self) -> Self {
        Self {
            data: self.data.clone(),
            loading: self.loading,
            error: self.error.clone(),
        }
    }
}

/// A mounted hook. Dropping it unmounts.
pub struct HookHandle<T> {
    key: CacheKey,
    rx: watch::Receiver<ResourceState<T>>,
    disposed: Arc<AtomicBool>,
}

impl<T> HookHandle<T> {
    pub(crate) fn new(
        key: CacheKey,
        rx: watch::Receiver<ResourceState<T>>,
        disposed: Arc<AtomicBool>,
    ) -> Self {
        Self { key, rx, disposed }
    }

    pub fn key(&self) -> &CacheKey {
        &self.key
    }

    /// Current state snapshot.
    pub fn state(&self) -> ResourceState<T> {
        self.rx.borrow().clone()
    }

    /// Wait until the hook is no longer loading and return that state.
    /// If the publisher is gone first (an unmounted hook), the last state is returned.
    pub async fn settled(&mut self) -> ResourceState<T> {
        let settled = match self.rx.wait_for(|state| !state.loading).await {
            Ok(state) => Some(state.clone()),
            Err(_) => None,
        };
        settled.unwrap_or_else(|| self.rx.borrow().clone())
    }

    /// Stop accepting results. The underlying request keeps running and
    /// still fills the shared cache.
    pub fn unmount(&self) {
        self.disposed.store(true, Ordering::SeqCst);
    }

    pub fn is_mounted(&self) -> bool {
        !self.disposed.load(Ordering::SeqCst)
    }
}

impl<T> Drop for HookHandle<T> {
    fn drop(&mut self) {
        self.unmount();
    }
}

impl<T> std::fmt::Debug for HookHandle<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.rx.borrow();
        f.debug_struct("HookHandle")
            .field("key", &self.key.to_string())
            .field("loading", &state.loading)
            .field("has_data", &state.data.is_some())
            .field("error", &state.error)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_settled_waits_for_update() {
        let (tx, rx) = watch::channel(ResourceState::<u32>::loading());
        let mut handle = HookHandle::new(CacheKey::new("t"), rx, Arc::new(AtomicBool::new(false)));
        assert!(handle.state().loading);

        tokio::spawn(async move {
            tokio::time::sleep(std::time::Duration::from_millis(10)).await;
            let _ = tx.send(ResourceState::ready(Arc::new(5)));
        });

        let state = handle.settled().await;
        assert!(!state.loading);
        assert_eq!(state.data.as_deref(), Some(&5));
    }

    #[tokio::test]
    async fn test_settled_after_publisher_dropped() {
        let (tx, rx) = watch::channel(ResourceState::<u32>::loading());
        let mut handle = HookHandle::new(CacheKey::new("t"), rx, Arc::new(AtomicBool::new(false)));
        drop(tx);

        let state = handle.settled().await;
        assert!(state.loading);
        assert!(state.data.is_none());
    }

    #[tokio::test]
    async fn test_settled_on_ready_channel_without_publisher() {
        let (tx, rx) = watch::channel(ResourceState::ready(Arc::new(7u32)));
        drop(tx);
        let mut handle = HookHandle::new(CacheKey::new("t"), rx, Arc::new(AtomicBool::new(false)));

        assert_eq!(handle.settled().await.data.as_deref(), Some(&7));
    }

    #[test]
    fn test_unmount_flag() {
        let (_tx, rx) = watch::channel(ResourceState::<u32>::loading());
        let disposed = Arc::new(AtomicBool::new(false));
        let handle = HookHandle::new(CacheKey::new("t"), rx, disposed.clone());
        assert!(handle.is_mounted());
        drop(handle);
        assert!(disposed.load(Ordering::SeqCst));
    }
}
