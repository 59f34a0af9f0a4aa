// In-memory response cache with per-entry TTL and an LRU capacity bound
use crate::domain::traits::{Clock, SystemClock};
use lru::LruCache;
use std::num::NonZeroUsize;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::{Duration, Instant};
use tokio::task::JoinHandle;

pub const DEFAULT_TTL: Duration = Duration::from_secs(600);
pub const DEFAULT_CHECK_PERIOD: Duration = Duration::from_secs(120);
pub const DEFAULT_MAX_ENTRIES: usize = 10_000;

#[derive(Debug, Clone)]
struct CacheEntry {
    body: String,
    // None when the TTL reaches past what `Instant` can represent
    expires_at: Option<Instant>,
}

impl CacheEntry {
    fn is_expired(&self, now: Instant) -> bool {
        self.expires_at.is_some_and(|at| now >= at)
    }
}

/// Thread-safe response cache
///
/// Values are serialized JSON bodies. A hit hands back an owned copy of the
/// exact bytes that were stored, so repeated hits are byte-identical.
pub struct ResponseCache {
    entries: Mutex<LruCache<String, CacheEntry>>,
    default_ttl: Duration,
    clock: Arc<dyn Clock>,
}

impl ResponseCache {
    pub fn new(default_ttl: Duration, max_entries: usize) -> Self {
        Self::with_clock(default_ttl, max_entries, Arc::new(SystemClock))
    }

    pub fn with_clock(default_ttl: Duration, max_entries: usize, clock: Arc<dyn Clock>) -> Self {
        let capacity = NonZeroUsize::new(max_entries).unwrap_or(NonZeroUsize::MIN);
        Self {
            entries: Mutex::new(LruCache::new(capacity)),
            default_ttl,
            clock,
        }
    }

    // A poisoned lock only means another request panicked mid-operation; every
    // operation replaces whole entries, so the map itself is still consistent.
    fn lock(&self) -> MutexGuard<'_, LruCache<String, CacheEntry>> {
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn get(&self, key: &str) -> Option<String> {
        let now = self.clock.now();
        let mut entries = self.lock();
        let expired = match entries.get(key) {
            Some(entry) if !entry.is_expired(now) => return Some(entry.body.clone()),
            Some(_) => true,
            None => false,
        };
        if expired {
            entries.pop(key);
        }
        None
    }

    pub fn set(&self, key: impl Into<String>, body: impl Into<String>) {
        self.set_with_ttl(key, body, self.default_ttl);
    }

    pub fn set_with_ttl(&self, key: impl Into<String>, body: impl Into<String>, ttl: Duration) {
        let entry = CacheEntry {
            body: body.into(),
            expires_at: self.clock.now().checked_add(ttl),
        };
        self.lock().put(key.into(), entry);
    }

    /// Drop every expired entry, returning how many were removed
    pub fn purge_expired(&self) -> usize {
        let now = self.clock.now();
        let mut entries = self.lock();
        let expired: Vec<String> = entries
            .iter()
            .filter(|(_, entry)| entry.is_expired(now))
            .map(|(key, _)| key.clone())
            .collect();
        for key in &expired {
            entries.pop(key);
        }
        expired.len()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn capacity(&self) -> usize {
        self.lock().cap().get()
    }

    pub fn default_ttl(&self) -> Duration {
        self.default_ttl
    }
}

/// Spawn the background task that reclaims expired entries every `period`
pub fn spawn_sweeper(cache: Arc<ResponseCache>, period: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(period);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        // The first tick completes immediately
        ticker.tick().await;
        loop {
            ticker.tick().await;
            let removed = cache.purge_expired();
            if removed > 0 {
                tracing::debug!(removed, remaining = cache.len(), "cache sweep");
            }
        }
    })
}

/// Manually advanced clock for expiry tests
#[derive(Debug)]
pub struct ManualClock {
    base: Instant,
    offset: Mutex<Duration>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            base: Instant::now(),
            offset: Mutex::new(Duration::ZERO),
        }
    }

    pub fn advance(&self, by: Duration) {
        let mut offset = self
            .offset
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        *offset += by;
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        let offset = *self
            .offset
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        self.base + offset
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cache_with_clock(ttl_secs: u64, max_entries: usize) -> (ResponseCache, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::new());
        let cache = ResponseCache::with_clock(
            Duration::from_secs(ttl_secs),
            max_entries,
            clock.clone(),
        );
        (cache, clock)
    }

    #[test]
    fn test_get_returns_stored_body() {
        let (cache, _) = cache_with_clock(600, 10);
        cache.set("lookup:rust", r#"{"message":"hi"}"#);
        assert_eq!(cache.get("lookup:rust").as_deref(), Some(r#"{"message":"hi"}"#));
        assert_eq!(cache.get("lookup:go"), None);
    }

    #[test]
    fn test_entry_expires_after_ttl() {
        let (cache, clock) = cache_with_clock(600, 10);
        cache.set("k", "v");

        clock.advance(Duration::from_secs(599));
        assert_eq!(cache.get("k").as_deref(), Some("v"));

        clock.advance(Duration::from_secs(1));
        assert_eq!(cache.get("k"), None);
        // Expired reads also reclaim the slot
        assert!(cache.is_empty());
    }

    #[test]
    fn test_set_with_ttl_overrides_default() {
        let (cache, clock) = cache_with_clock(600, 10);
        cache.set_with_ttl("short", "v", Duration::from_secs(5));
        clock.advance(Duration::from_secs(6));
        assert_eq!(cache.get("short"), None);
    }

    #[test]
    fn test_restore_overwrites_and_resets_expiry() {
        let (cache, clock) = cache_with_clock(10, 10);
        cache.set("k", "old");
        clock.advance(Duration::from_secs(8));
        cache.set("k", "new");
        clock.advance(Duration::from_secs(8));
        assert_eq!(cache.get("k").as_deref(), Some("new"));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_purge_expired_only_removes_stale_entries() {
        let (cache, clock) = cache_with_clock(10, 10);
        cache.set("a", "1");
        cache.set("b", "2");
        clock.advance(Duration::from_secs(5));
        cache.set("c", "3");
        clock.advance(Duration::from_secs(6));

        assert_eq!(cache.purge_expired(), 2);
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get("c").as_deref(), Some("3"));
    }

    #[test]
    fn test_capacity_evicts_least_recently_used() {
        let (cache, _) = cache_with_clock(600, 2);
        cache.set("a", "1");
        cache.set("b", "2");
        // Touch "a" so "b" becomes the eviction candidate
        assert!(cache.get("a").is_some());
        cache.set("c", "3");

        assert_eq!(cache.len(), 2);
        assert!(cache.get("a").is_some());
        assert!(cache.get("b").is_none());
        assert!(cache.get("c").is_some());
    }

    #[test]
    fn test_zero_capacity_is_clamped() {
        let cache = ResponseCache::new(DEFAULT_TTL, 0);
        assert_eq!(cache.capacity(), 1);
        cache.set("k", "v");
        assert_eq!(cache.get("k").as_deref(), Some("v"));
    }

    #[test]
    fn test_huge_ttl_never_expires() {
        let (cache, clock) = cache_with_clock(u64::MAX, 10);
        cache.set("k", "v");
        clock.advance(Duration::from_secs(365 * 24 * 3600));
        assert_eq!(cache.get("k").as_deref(), Some("v"));
        assert_eq!(cache.purge_expired(), 0);
    }

    #[test]
    fn test_clear() {
        let (cache, _) = cache_with_clock(600, 10);
        cache.set("a", "1");
        cache.clear();
        assert!(cache.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_sweeper_reclaims_expired_entries() {
        let clock = Arc::new(ManualClock::new());
        let cache = Arc::new(ResponseCache::with_clock(
            Duration::from_secs(10),
            10,
            clock.clone(),
        ));
        cache.set("k", "v");
        clock.advance(Duration::from_secs(11));

        let handle = spawn_sweeper(cache.clone(), Duration::from_secs(120));
        tokio::time::sleep(Duration::from_secs(121)).await;
        tokio::task::yield_now().await;

        assert!(cache.is_empty());
        handle.abort();
    }
}
