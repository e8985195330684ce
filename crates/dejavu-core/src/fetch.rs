use std::collections::HashMap;
use std::future::Future;
use std::hash::Hash;
use std::sync::{Arc, Mutex};

use tokio::sync::watch;

/// Lifecycle of one keyed fetch. `Pending` moves to exactly one of
/// `Ready`/`Failed`; a new key starts over at `Pending`.
#[derive(Debug)]
pub enum FetchState<T, E> {
    Pending,
    Ready(Arc<T>),
    Failed(Arc<E>),
}

// Manual impl: the variants hold Arcs, so no `T: Clone` bound is needed.
impl<T, E> Clone for FetchState<T, E> {
    fn clone(&self) -> Self {
        match self {
            FetchState::Pending => FetchState::Pending,
            FetchState::Ready(value) => FetchState::Ready(value.clone()),
            FetchState::Failed(cause) => FetchState::Failed(cause.clone()),
        }
    }
}

impl<T, E> FetchState<T, E> {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, FetchState::Pending)
    }
}

pub type FetchReceiver<T, E> = watch::Receiver<FetchState<T, E>>;

/// Async task registry keyed by request signature. The first caller for a
/// key spawns the fetch; every caller gets a watch receiver onto the shared
/// state, so identical in-flight or completed requests never issue a
/// duplicate round-trip. Successes are memoized for the process lifetime;
/// a failed entry is re-issued on the next request for that key, so a
/// user-initiated re-navigation retries while nothing retries automatically.
///
/// Dropping a receiver abandons that caller's interest; the task still runs
/// to completion and memoizes. A resolution only ever lands in its own
/// key's channel, so a stale arrival cannot overwrite a newer key's state.
pub struct FetchRegistry<K, T, E> {
    entries: Mutex<HashMap<K, FetchReceiver<T, E>>>,
}

impl<K, T, E> FetchRegistry<K, T, E>
where
    K: Eq + Hash,
    T: Send + Sync + 'static,
    E: Send + Sync + 'static,
{
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Subscribes to `key`, spawning `start`'s future if the key is new or
    /// previously failed. `start` is not called when the result is shared.
    pub fn fetch<F, Fut>(&self, key: K, start: F) -> FetchReceiver<T, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>> + Send + 'static,
    {
        let mut entries = self.entries.lock().unwrap();

        if let Some(rx) = entries.get(&key) {
            let reissue = matches!(&*rx.borrow(), FetchState::Failed(_));
            if !reissue {
                return rx.clone();
            }
            tracing::debug!("re-issuing a previously failed fetch");
        }

        let (tx, rx) = watch::channel(FetchState::Pending);
        entries.insert(key, rx.clone());

        let fut = start();
        tokio::spawn(async move {
            let state = match fut.await {
                Ok(value) => FetchState::Ready(Arc::new(value)),
                Err(cause) => FetchState::Failed(Arc::new(cause)),
            };
            // Fails only when the registry itself is gone.
            let _ = tx.send(state);
        });

        rx
    }

    /// Current state for `key` without issuing anything.
    pub fn peek(&self, key: &K) -> Option<FetchState<T, E>> {
        self.entries
            .lock()
            .unwrap()
            .get(key)
            .map(|rx| rx.borrow().clone())
    }
}

impl<K, T, E> Default for FetchRegistry<K, T, E>
where
    K: Eq + Hash,
    T: Send + Sync + 'static,
    E: Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

/// Waits until the subscribed fetch reaches a terminal state.
pub async fn resolved<T, E>(mut rx: FetchReceiver<T, E>) -> FetchState<T, E> {
    loop {
        let state = rx.borrow_and_update().clone();
        if state.is_terminal() {
            return state;
        }
        if rx.changed().await.is_err() {
            return rx.borrow().clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use super::*;

    fn ready_value<T: Clone, E>(state: &FetchState<T, E>) -> T {
        match state {
            FetchState::Ready(value) => (**value).clone(),
            _ => panic!("fetch did not succeed"),
        }
    }

    #[tokio::test]
    async fn identical_pending_keys_share_one_round_trip() {
        let registry = FetchRegistry::<String, Vec<u32>, String>::new();
        let calls = Arc::new(AtomicUsize::new(0));

        let counter = calls.clone();
        let first = registry.fetch("k".to_string(), move || async move {
            counter.fetch_add(1, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_millis(20)).await;
            Ok(vec![1])
        });

        let counter = calls.clone();
        let second = registry.fetch("k".to_string(), move || async move {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(vec![2])
        });

        let first = resolved(first).await;
        let second = resolved(second).await;

        assert_eq!(ready_value(&first), vec![1]);
        assert_eq!(ready_value(&second), vec![1]);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn success_is_served_from_cache() {
        let registry = FetchRegistry::<String, u32, String>::new();
        let calls = Arc::new(AtomicUsize::new(0));

        let counter = calls.clone();
        let rx = registry.fetch("k".to_string(), move || async move {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(7)
        });
        assert_eq!(ready_value(&resolved(rx).await), 7);

        let counter = calls.clone();
        let rx = registry.fetch("k".to_string(), move || async move {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(8)
        });
        assert_eq!(ready_value(&resolved(rx).await), 7);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn failure_is_reissued_on_next_request() {
        let registry = FetchRegistry::<String, u32, String>::new();
        let calls = Arc::new(AtomicUsize::new(0));

        let counter = calls.clone();
        let rx = registry.fetch("k".to_string(), move || async move {
            counter.fetch_add(1, Ordering::SeqCst);
            Err("boom".to_string())
        });
        assert!(matches!(resolved(rx).await, FetchState::Failed(_)));

        let counter = calls.clone();
        let rx = registry.fetch("k".to_string(), move || async move {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(9)
        });
        assert_eq!(ready_value(&resolved(rx).await), 9);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn keys_resolve_independently() {
        let registry = Arc::new(FetchRegistry::<String, u32, String>::new());

        let slow = registry.fetch("k1".to_string(), || async {
            tokio::time::sleep(Duration::from_millis(30)).await;
            Ok(1)
        });
        let fast = registry.fetch("k2".to_string(), || async { Ok(2) });

        assert_eq!(ready_value(&resolved(fast).await), 2);
        // k2 resolving first leaves k1 untouched, and vice versa.
        assert!(matches!(
            registry.peek(&"k1".to_string()),
            Some(FetchState::Pending)
        ));
        assert_eq!(ready_value(&resolved(slow).await), 1);
        assert_eq!(ready_value(&registry.peek(&"k2".to_string()).unwrap()), 2);
    }
}
