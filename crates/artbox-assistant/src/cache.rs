//! Time-bounded cache for the catalog snapshot.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::RwLock;

/// Default time-to-live for the catalog snapshot.
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(5 * 60);

/// Source of monotonic time.
pub trait Clock: Send + Sync {
    fn now(&self) -> Instant;
}

/// Wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Clock that only moves when told to.
#[derive(Debug)]
pub struct ManualClock {
    origin: Instant,
    offset_ms: AtomicU64,
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
            offset_ms: AtomicU64::new(0),
        }
    }

    /// Move time forward.
    pub fn advance(&self, by: Duration) {
        self.offset_ms
            .fetch_add(by.as_millis() as u64, Ordering::SeqCst);
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.origin + Duration::from_millis(self.offset_ms.load(Ordering::SeqCst))
    }
}

/// Holds one value, served while younger than the TTL.
///
/// A value stored at `t` is fresh while `now - t < ttl`.
pub struct TtlCache<T> {
    ttl: Duration,
    clock: Arc<dyn Clock>,
    entry: RwLock<Option<(Instant, T)>>,
}

impl<T: Clone> TtlCache<T> {
    /// Cache on the wall clock.
    pub fn new(ttl: Duration) -> Self {
        Self::with_clock(ttl, Arc::new(SystemClock))
    }

    /// Cache on an injected clock.
    pub fn with_clock(ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            ttl,
            clock,
            entry: RwLock::new(None),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// The cached value, if still fresh.
    pub async fn get(&self) -> Option<T> {
        let now = self.clock.now();
        let entry = self.entry.read().await;
        match entry.as_ref() {
            Some((stored_at, value)) if now.saturating_duration_since(*stored_at) < self.ttl => {
                Some(value.clone())
            }
            _ => None,
        }
    }

    /// Replace the cached value, stamped with the current time.
    pub async fn put(&self, value: T) {
        let now = self.clock.now();
        *self.entry.write().await = Some((now, value));
    }

    /// Drop the cached value.
    pub async fn invalidate(&self) {
        *self.entry.write().await = None;
    }
}

impl<T> fmt::Debug for TtlCache<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TtlCache").field("ttl", &self.ttl).finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cache(ttl_secs: u64) -> (TtlCache<u32>, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::new());
        let cache = TtlCache::with_clock(Duration::from_secs(ttl_secs), clock.clone());
        (cache, clock)
    }

    #[tokio::test]
    async fn test_empty_cache_misses() {
        let (cache, _) = cache(60);
        assert_eq!(cache.get().await, None);
    }

    #[tokio::test]
    async fn test_fresh_until_ttl_elapses() {
        let (cache, clock) = cache(60);
        cache.put(7).await;

        clock.advance(Duration::from_secs(59));
        assert_eq!(cache.get().await, Some(7));

        clock.advance(Duration::from_secs(1));
        assert_eq!(cache.get().await, None);
    }

    #[tokio::test]
    async fn test_put_restamps() {
        let (cache, clock) = cache(10);
        cache.put(1).await;
        clock.advance(Duration::from_secs(8));
        cache.put(2).await;
        clock.advance(Duration::from_secs(8));
        assert_eq!(cache.get().await, Some(2));
    }

    #[tokio::test]
    async fn test_invalidate() {
        let (cache, _) = cache(10);
        cache.put(1).await;
        cache.invalidate().await;
        assert_eq!(cache.get().await, None);
    }

    #[tokio::test]
    async fn test_zero_ttl_never_serves() {
        let (cache, _) = cache(0);
        cache.put(1).await;
        assert_eq!(cache.get().await, None);
    }
}
