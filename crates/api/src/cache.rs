//! Minimal cached read used by [`AuthSession`](crate::AuthSession).
//!
//! A [`Cached`] cell owns one fetcher and the last outcome of running it.
//! Reads are served from the cell once it has loaded; a failed fetch is
//! recorded next to the last good value instead of replacing it.
//! Concurrent fetches of the same cell are collapsed into one, and a fetch
//! that was already in flight when [`Cached::mutate`] ran never overwrites
//! the mutated value.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use futures::future::BoxFuture;
use tokio::sync::{Mutex, RwLock};

use portal_core::{ApiError, ApiResult};

type Fetcher<T> = Arc<dyn Fn() -> BoxFuture<'static, ApiResult<T>> + Send + Sync>;

/// Snapshot of a [`Cached`] cell.
#[derive(Debug, Clone, PartialEq)]
pub struct CacheState<T> {
    /// Last successfully fetched (or mutated) value.
    pub data: Option<T>,
    /// Error from the most recent fetch, cleared by the next success.
    pub error: Option<ApiError>,
    loaded: bool,
}

impl<T> CacheState<T> {
    fn empty() -> Self {
        Self {
            data: None,
            error: None,
            loaded: false,
        }
    }

    /// Whether at least one fetch or mutation has completed.
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }
}

pub struct Cached<T> {
    fetcher: Fetcher<T>,
    state: RwLock<CacheState<T>>,
    fetch_lock: Mutex<()>,
    /// Bumped by every mutation, under the `state` write lock.
    generation: AtomicU64,
}

impl<T: Clone + Send + Sync + 'static> Cached<T> {
    pub fn new<F>(fetcher: F) -> Self
    where
        F: Fn() -> BoxFuture<'static, ApiResult<T>> + Send + Sync + 'static,
    {
        Self {
            fetcher: Arc::new(fetcher),
            state: RwLock::new(CacheState::empty()),
            fetch_lock: Mutex::new(()),
            generation: AtomicU64::new(0),
        }
    }

    /// Cached state, fetching first if nothing has been loaded yet.
    pub async fn get(&self) -> CacheState<T> {
        {
            let state = self.state.read().await;
            if state.loaded {
                return state.clone();
            }
        }

        let _guard = self.fetch_lock.lock().await;
        // Another caller may have finished the fetch while we waited.
        if self.state.read().await.loaded {
            return self.state.read().await.clone();
        }
        self.fetch().await
    }

    /// Fetch again regardless of what is cached.
    pub async fn revalidate(&self) -> CacheState<T> {
        let _guard = self.fetch_lock.lock().await;
        self.fetch().await
    }

    /// Replace the cached value locally, then optionally refetch.
    pub async fn mutate(&self, value: Option<T>, revalidate: bool) -> CacheState<T> {
        {
            let mut state = self.state.write().await;
            self.generation.fetch_add(1, Ordering::SeqCst);
            state.data = value;
            state.error = None;
            state.loaded = true;
        }
        if revalidate {
            self.revalidate().await
        } else {
            self.state().await
        }
    }

    /// Current state without fetching.
    pub async fn state(&self) -> CacheState<T> {
        self.state.read().await.clone()
    }

    /// Caller must hold `fetch_lock`.
    async fn fetch(&self) -> CacheState<T> {
        let started = self.generation.load(Ordering::SeqCst);
        let outcome = (self.fetcher)().await;

        let mut state = self.state.write().await;
        if self.generation.load(Ordering::SeqCst) != started {
            tracing::debug!("Cached read superseded by a mutation");
            return state.clone();
        }
        match outcome {
            Ok(value) => {
                state.data = Some(value);
                state.error = None;
            }
            Err(e) => {
                tracing::debug!(error = %e, "Cached read failed");
                state.error = Some(e);
            }
        }
        state.loaded = true;
        state.clone()
    }
}

impl<T> fmt::Debug for Cached<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cached").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::AtomicUsize;

    use futures::FutureExt;
    use tokio::sync::Notify;

    use super::*;

    fn counting() -> (Arc<AtomicUsize>, Cached<usize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let cell = Cached::new(move || {
            let counter = counter.clone();
            async move { Ok(counter.fetch_add(1, Ordering::SeqCst) + 1) }.boxed()
        });
        (calls, cell)
    }

    #[tokio::test]
    async fn get_fetches_once() {
        let (calls, cell) = counting();

        assert_eq!(cell.get().await.data, Some(1));
        assert_eq!(cell.get().await.data, Some(1));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn concurrent_gets_share_one_fetch() {
        let (calls, cell) = counting();

        let (a, b) = tokio::join!(cell.get(), cell.get());
        assert_eq!(a.data, b.data);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn revalidate_always_fetches() {
        let (calls, cell) = counting();

        cell.get().await;
        assert_eq!(cell.revalidate().await.data, Some(2));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn mutate_without_revalidate_skips_fetch() {
        let (calls, cell) = counting();

        let state = cell.mutate(None, false).await;
        assert!(state.is_loaded());
        assert_eq!(state.data, None);
        assert_eq!(cell.get().await.data, None);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn in_flight_fetch_does_not_undo_a_mutation() {
        let started = Arc::new(Notify::new());
        let release = Arc::new(Notify::new());
        let cell = Arc::new(Cached::new({
            let started = started.clone();
            let release = release.clone();
            move || {
                let started = started.clone();
                let release = release.clone();
                async move {
                    started.notify_one();
                    release.notified().await;
                    Ok("alice".to_string())
                }
                .boxed()
            }
        }));

        let pending = tokio::spawn({
            let cell = cell.clone();
            async move { cell.revalidate().await }
        });
        started.notified().await;

        assert_eq!(cell.mutate(None, false).await.data, None);
        release.notify_one();

        assert_eq!(pending.await.unwrap().data, None);
        assert_eq!(cell.state().await.data, None);
    }

    #[tokio::test]
    async fn failure_keeps_last_good_value() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let cell = Cached::new(move || {
            let first = counter.fetch_add(1, Ordering::SeqCst) == 0;
            async move {
                if first {
                    Ok("alice".to_string())
                } else {
                    Err(ApiError::http(401, "Unauthorized"))
                }
            }
            .boxed()
        });

        cell.get().await;
        let state = cell.revalidate().await;
        assert_eq!(state.data.as_deref(), Some("alice"));
        assert_eq!(state.error, Some(ApiError::http(401, "Unauthorized")));
    }
}
