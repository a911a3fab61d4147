//! String-keyed in-memory cache with a fixed time-to-live.

use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;

/// Entries expire once `ttl` has elapsed since they were inserted. Beyond
/// that only the capacity bound evicts.
///
/// Every invalidation bumps a generation counter. A fetch that started
/// under an older generation hands its value to the caller but never
/// stores it.
#[derive(Clone)]
pub struct TtlCache<V> {
    inner: Cache<String, V>,
    ttl: Duration,
    generation: Arc<AtomicU64>,
}

/// Outcome of a fetch that must not be cached.
enum Unstored<V, E> {
    Failed(Arc<E>),
    Stale(V),
}

impl<V> TtlCache<V>
where
    V: Clone + Send + Sync + 'static,
{
    pub fn new(ttl: Duration, max_capacity: u64) -> Self {
        let inner = Cache::builder()
            .max_capacity(max_capacity)
            .time_to_live(ttl)
            .build();
        Self {
            inner,
            ttl,
            generation: Arc::new(AtomicU64::new(0)),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub async fn get(&self, key: &str) -> Option<V> {
        self.inner.get(key).await
    }

    pub async fn insert(&self, key: impl Into<String>, value: V) {
        self.inner.insert(key.into(), value).await;
    }

    /// Return the cached value, or run `fetch` and store its result.
    ///
    /// Concurrent misses on the same key share one fetch. Errors are
    /// returned to every waiting caller and never cached, so the next call
    /// retries.
    pub async fn get_or_try_insert_with<F, Fut, E>(&self, key: &str, fetch: F) -> Result<V, Arc<E>>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, E>>,
        E: Send + Sync + 'static,
    {
        let generation = self.generation.load(Ordering::Acquire);
        let result = self
            .inner
            .try_get_with_by_ref(key, async {
                tracing::trace!(key, "Cache miss");
                let value = fetch()
                    .await
                    .map_err(|e| Unstored::Failed(Arc::new(e)))?;
                if self.generation.load(Ordering::Acquire) != generation {
                    return Err(Unstored::Stale(value));
                }
                Ok(value)
            })
            .await;

        let value = match result {
            Ok(value) => value,
            Err(unstored) => {
                return match unstored.as_ref() {
                    Unstored::Stale(value) => {
                        tracing::debug!(key, "Cache invalidated during fetch, not storing");
                        Ok(value.clone())
                    }
                    Unstored::Failed(e) => Err(Arc::clone(e)),
                };
            }
        };

        // moka stores the value after the check above; an invalidation in
        // between must still win.
        if self.generation.load(Ordering::Acquire) != generation {
            self.inner.invalidate(key).await;
        }
        Ok(value)
    }

    pub async fn invalidate(&self, key: &str) {
        self.generation.fetch_add(1, Ordering::AcqRel);
        self.inner.invalidate(key).await;
    }

    pub fn invalidate_all(&self) {
        self.generation.fetch_add(1, Ordering::AcqRel);
        self.inner.invalidate_all();
    }

    /// Number of live entries, after flushing moka's pending maintenance.
    pub async fn entry_count(&self) -> u64 {
        self.inner.run_pending_tasks().await;
        self.inner.entry_count()
    }
}
