//! Counter storage with per-window expiry.

use std::future::Future;
use std::time::{Duration, Instant};

use moka::Expiry;
use moka::future::Cache as MokaCache;
use rust_decimal::Decimal;
use serde::Serialize;

use super::window::WindowKey;

/// Default number of counters kept in memory.
const DEFAULT_MAX_CAPACITY: u64 = 1024;

/// Value held for one window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct WindowCounter {
    /// Successful requests in the window.
    pub requests: u64,
    /// Accumulated estimated cost in the window.
    pub cost: Decimal,
}

/// Key-value storage for window counters.
///
/// `get` and `put` are independent operations; a read-modify-write through
/// this trait is not atomic.
pub trait CounterStore: Send + Sync {
    /// Current value, or `None` if the window has no entry (or it expired).
    fn get(&self, key: &WindowKey) -> impl Future<Output = Option<WindowCounter>> + Send;

    /// Store a value that expires after `ttl`.
    fn put(
        &self,
        key: WindowKey,
        counter: WindowCounter,
        ttl: Duration,
    ) -> impl Future<Output = ()> + Send;

    /// Drop the entry for a window.
    fn remove(&self, key: &WindowKey) -> impl Future<Output = ()> + Send;
}

#[derive(Debug, Clone)]
struct StoredCounter {
    counter: WindowCounter,
    ttl: Duration,
}

/// Expires each entry at the end of its own window.
struct WindowExpiry;

impl Expiry<WindowKey, StoredCounter> for WindowExpiry {
    fn expire_after_create(
        &self,
        _key: &WindowKey,
        value: &StoredCounter,
        _created_at: Instant,
    ) -> Option<Duration> {
        Some(value.ttl)
    }

    fn expire_after_update(
        &self,
        _key: &WindowKey,
        value: &StoredCounter,
        _updated_at: Instant,
        _duration_until_expiry: Option<Duration>,
    ) -> Option<Duration> {
        Some(value.ttl)
    }
}

/// In-process counter store backed by a moka cache.
#[derive(Debug, Clone)]
pub struct MokaCounterStore {
    counters: MokaCache<WindowKey, StoredCounter>,
}

impl MokaCounterStore {
    /// Create a store holding at most `max_capacity` counters.
    pub fn new(max_capacity: u64) -> Self {
        let counters = MokaCache::builder()
            .max_capacity(max_capacity)
            .expire_after(WindowExpiry)
            .build();

        Self { counters }
    }

    /// Number of live counters (for monitoring).
    pub fn entry_count(&self) -> u64 {
        self.counters.entry_count()
    }
}

impl Default for MokaCounterStore {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_CAPACITY)
    }
}

impl CounterStore for MokaCounterStore {
    async fn get(&self, key: &WindowKey) -> Option<WindowCounter> {
        self.counters.get(key).await.map(|stored| stored.counter)
    }

    async fn put(&self, key: WindowKey, counter: WindowCounter, ttl: Duration) {
        self.counters
            .insert(key, StoredCounter { counter, ttl })
            .await;
    }

    async fn remove(&self, key: &WindowKey) {
        self.counters.invalidate(key).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quota::Window;
    use chrono::{TimeZone, Utc};
    use rust_decimal_macros::dec;

    fn key(window: Window) -> WindowKey {
        let now = Utc.with_ymd_and_hms(2026, 10, 19, 12, 0, 0).unwrap();
        WindowKey::current("google_maps", window, now)
    }

    const HOUR: Duration = Duration::from_secs(3600);

    #[tokio::test]
    async fn missing_key_is_none() {
        let store = MokaCounterStore::default();
        assert_eq!(store.get(&key(Window::Daily)).await, None);
    }

    #[tokio::test]
    async fn put_then_get() {
        let store = MokaCounterStore::default();
        let counter = WindowCounter {
            requests: 3,
            cost: dec!(0.015),
        };
        store.put(key(Window::Daily), counter, HOUR).await;

        assert_eq!(store.get(&key(Window::Daily)).await, Some(counter));
        assert_eq!(store.get(&key(Window::Monthly)).await, None);
    }

    #[tokio::test]
    async fn put_overwrites() {
        let store = MokaCounterStore::default();
        let first = WindowCounter {
            requests: 1,
            cost: dec!(0.005),
        };
        let second = WindowCounter {
            requests: 2,
            cost: dec!(0.010),
        };
        store.put(key(Window::Daily), first, HOUR).await;
        store.put(key(Window::Daily), second, HOUR).await;

        assert_eq!(store.get(&key(Window::Daily)).await, Some(second));
    }

    #[tokio::test]
    async fn remove_clears_entry() {
        let store = MokaCounterStore::default();
        store
            .put(key(Window::Monthly), WindowCounter::default(), HOUR)
            .await;
        store.remove(&key(Window::Monthly)).await;

        assert_eq!(store.get(&key(Window::Monthly)).await, None);
    }

    #[tokio::test]
    async fn entries_expire_after_ttl() {
        let store = MokaCounterStore::default();
        store
            .put(
                key(Window::Daily),
                WindowCounter {
                    requests: 9,
                    cost: Decimal::ZERO,
                },
                Duration::from_millis(50),
            )
            .await;
        assert!(store.get(&key(Window::Daily)).await.is_some());

        tokio::time::sleep(Duration::from_millis(150)).await;
        assert_eq!(store.get(&key(Window::Daily)).await, None);
    }
}
