use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use regex::Regex;
use tokio::time::Instant;

use crate::cache::models::{CacheEntry, CacheStats, deadline_after};
use crate::cache::sweeper::{Sweep, Sweeper};

/// Default lifetime of an entry stored without an explicit ttl.
pub const DEFAULT_TTL: Duration = Duration::from_secs(3600);

/// Marker that turns an invalidation argument into a glob pattern.
const WILDCARD: char = '*';

/// In-memory key/value cache with per-entry expiry.
///
/// Expired entries are dropped lazily when read and eagerly by a background
/// sweep started with [`TtlCache::start`]. Nothing is persisted, and separate
/// processes hold separate caches.
pub struct TtlCache<V> {
    store: Mutex<HashMap<String, CacheEntry<V>>>,
    default_ttl: Duration,
    sweeper: Sweeper,
}

impl<V> TtlCache<V>
where
    V: Clone + Send + Sync + 'static,
{
    /// Creates a cache without a background sweep.
    pub fn new(default_ttl: Duration) -> Self {
        Self {
            store: Mutex::new(HashMap::new()),
            default_ttl,
            sweeper: Sweeper::default(),
        }
    }

    /// Creates a cache and starts sweeping it every `cleanup_interval`.
    /// Must be called from within a tokio runtime.
    pub fn start(default_ttl: Duration, cleanup_interval: Duration) -> Arc<Self> {
        let cache = Arc::new(Self::new(default_ttl));
        cache.sweeper.start(&cache, cleanup_interval);
        cache
    }

    pub fn default_ttl(&self) -> Duration {
        self.default_ttl
    }

    pub fn get(&self, key: &str) -> Option<V> {
        let mut store = self.store.lock();
        let entry = store.get(key)?;

        if entry.is_expired(Instant::now()) {
            store.remove(key);
            return None;
        }

        Some(entry.value.clone())
    }

    /// Stores `value` under `key`, replacing any previous entry. `None` uses
    /// the cache's default ttl.
    pub fn set(&self, key: impl Into<String>, value: V, ttl: Option<Duration>) {
        let expires_at = deadline_after(Instant::now(), ttl.unwrap_or(self.default_ttl));
        self.store
            .lock()
            .insert(key.into(), CacheEntry { value, expires_at });
    }

    pub fn has(&self, key: &str) -> bool {
        let mut store = self.store.lock();
        let expired = match store.get(key) {
            Some(entry) => entry.is_expired(Instant::now()),
            None => return false,
        };

        if expired {
            store.remove(key);
        }
        !expired
    }

    pub fn delete(&self, key: &str) {
        self.store.lock().remove(key);
    }

    /// Removes `key`, or every key matching it when it contains `*`.
    ///
    /// In a pattern `*` matches any run of characters and everything else is
    /// literal; the pattern must cover the whole key. Returns the number of
    /// entries removed.
    pub fn invalidate(&self, key_or_pattern: &str) -> usize {
        if !key_or_pattern.contains(WILDCARD) {
            return usize::from(self.store.lock().remove(key_or_pattern).is_some());
        }

        let pattern = match glob_to_regex(key_or_pattern) {
            Ok(pattern) => pattern,
            Err(e) => {
                tracing::warn!("[Cache] Ignoring invalidation pattern {:?}: {}", key_or_pattern, e);
                return 0;
            }
        };

        let mut store = self.store.lock();
        let before = store.len();
        store.retain(|key, _| !pattern.is_match(key));
        let removed = before - store.len();

        tracing::debug!("[Cache] Invalidated {} entries matching {}", removed, key_or_pattern);
        removed
    }

    /// Empties the cache and returns how many entries were dropped.
    pub fn clear(&self) -> usize {
        let mut store = self.store.lock();
        let removed = store.len();
        store.clear();
        removed
    }

    pub fn stats(&self) -> CacheStats {
        let store = self.store.lock();
        CacheStats {
            size: store.len(),
            keys: store.keys().cloned().collect(),
        }
    }

    /// Returns the cached value for `key`, or runs `fetcher` and caches its
    /// result.
    ///
    /// A fetcher error is handed back untouched and nothing is stored. The
    /// store is not locked while the fetcher runs, so concurrent misses on the
    /// same key may each fetch; the last one to finish wins.
    pub async fn get_or_compute<F, Fut, E>(
        &self,
        key: &str,
        ttl: Option<Duration>,
        fetcher: F,
    ) -> Result<V, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, E>>,
    {
        if let Some(value) = self.get(key) {
            tracing::debug!("[Cache] HIT: {}", key);
            return Ok(value);
        }

        tracing::debug!("[Cache] MISS: {}", key);
        let value = fetcher().await?;
        self.set(key, value.clone(), ttl);

        Ok(value)
    }

    /// Stops the background sweep and empties the cache.
    pub fn destroy(&self) {
        self.sweeper.stop();
        self.store.lock().clear();
    }

    pub fn is_sweeping(&self) -> bool {
        self.sweeper.is_running()
    }
}

impl<V> Sweep for TtlCache<V>
where
    V: Clone + Send + Sync + 'static,
{
    const NAME: &'static str = "Cache";

    fn purge_expired(&self) -> usize {
        let now = Instant::now();
        let mut store = self.store.lock();
        let before = store.len();
        store.retain(|_, entry| !entry.is_expired(now));
        before - store.len()
    }
}

impl<V> Default for TtlCache<V>
where
    V: Clone + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new(DEFAULT_TTL)
    }
}

fn glob_to_regex(pattern: &str) -> Result<Regex, regex::Error> {
    let body = pattern
        .split(WILDCARD)
        .map(regex::escape)
        .collect::<Vec<_>>()
        .join(".*");
    Regex::new(&format!("(?s)^{}$", body))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn cache() -> TtlCache<Value> {
        TtlCache::default()
    }

    #[test]
    fn test_set_then_get() {
        let cache = cache();
        cache.set("services:list", json!(["roofing"]), Some(Duration::from_secs(60)));
        assert_eq!(cache.get("services:list"), Some(json!(["roofing"])));
        assert!(cache.has("services:list"));
    }

    #[test]
    fn test_miss_is_none() {
        let cache = cache();
        assert_eq!(cache.get("projects:list"), None);
        assert!(!cache.has("projects:list"));
    }

    #[test]
    fn test_set_overwrites() {
        let cache = cache();
        cache.set("settings:theme", json!("light"), None);
        cache.set("settings:theme", json!("dark"), None);
        assert_eq!(cache.get("settings:theme"), Some(json!("dark")));
        assert_eq!(cache.stats().size, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_entry_expires_after_ttl() {
        let cache = cache();
        cache.set("blog:article:nieuwbouw", json!({"title": "Nieuwbouw"}), Some(Duration::from_secs(30)));

        tokio::time::advance(Duration::from_secs(29)).await;
        assert!(cache.get("blog:article:nieuwbouw").is_some());

        tokio::time::advance(Duration::from_secs(1)).await;
        assert_eq!(cache.get("blog:article:nieuwbouw"), None);
        // lazily removed on read
        assert_eq!(cache.stats().size, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_default_ttl_applies() {
        let cache = cache();
        cache.set("projects:list", json!([]), None);

        tokio::time::advance(DEFAULT_TTL - Duration::from_secs(1)).await;
        assert!(cache.has("projects:list"));

        tokio::time::advance(Duration::from_secs(1)).await;
        assert!(!cache.has("projects:list"));
    }

    #[test]
    fn test_delete_is_noop_when_absent() {
        let cache = cache();
        cache.delete("services:detail:42");
        cache.set("services:detail:42", json!({"id": 42}), None);
        cache.delete("services:detail:42");
        assert_eq!(cache.get("services:detail:42"), None);
    }

    #[test]
    fn test_invalidate_pattern_removes_family() {
        let cache = cache();
        cache.set("blog:list:1:10", json!(1), None);
        cache.set("blog:category:x", json!(2), None);
        cache.set("services:list", json!(3), None);

        assert_eq!(cache.invalidate("blog:*"), 2);

        let mut keys = cache.stats().keys;
        keys.sort();
        assert_eq!(keys, vec!["services:list".to_string()]);
    }

    #[test]
    fn test_invalidate_pattern_is_anchored_and_literal() {
        let cache = cache();
        cache.set("oldblog:list", json!(1), None);
        cache.set("blog.list", json!(2), None);
        cache.set("blogXlist", json!(3), None);

        assert_eq!(cache.invalidate("blog:*"), 0);
        assert_eq!(cache.invalidate("blog.*"), 1);
        assert!(cache.has("blogXlist"));
        assert!(cache.has("oldblog:list"));
    }

    #[test]
    fn test_invalidate_inner_wildcard() {
        let cache = cache();
        cache.set("blog:list:1:10", json!(1), None);
        cache.set("blog:list:2:10", json!(2), None);
        cache.set("blog:list:2:20", json!(3), None);

        assert_eq!(cache.invalidate("blog:list:*:10"), 2);
        assert!(cache.has("blog:list:2:20"));
    }

    #[test]
    fn test_invalidate_exact_key() {
        let cache = cache();
        cache.set("blog:list:1:10", json!(1), None);
        cache.set("blog:list:1:100", json!(2), None);

        assert_eq!(cache.invalidate("blog:list:1:10"), 1);
        assert_eq!(cache.invalidate("blog:list:1:10"), 0);
        assert!(cache.has("blog:list:1:100"));
    }

    #[test]
    fn test_stats_and_clear() {
        let cache = cache();
        let services = json!(["funderingen", "renovatie", "dakwerken", "isolatie", "sloopwerk"]);
        cache.set("services:list", services, Some(Duration::from_secs(3600)));

        assert_eq!(
            cache.stats(),
            CacheStats {
                size: 1,
                keys: vec!["services:list".to_string()],
            }
        );

        cache.set("projects:list", json!([]), None);
        assert_eq!(cache.clear(), 2);
        assert_eq!(cache.stats().size, 0);
        assert!(cache.stats().keys.is_empty());
        assert_eq!(cache.clear(), 0);
    }

    #[test]
    fn test_huge_ttl_never_expires() {
        let cache = cache();
        cache.set("settings:theme", json!("dark"), Some(Duration::from_secs(u64::MAX)));
        assert_eq!(cache.get("settings:theme"), Some(json!("dark")));

        let forever: TtlCache<Value> = TtlCache::new(Duration::from_secs(u64::MAX));
        forever.set("settings:company", json!({}), None);
        assert!(forever.has("settings:company"));
        assert_eq!(forever.purge_expired(), 0);
    }

    #[tokio::test]
    async fn test_get_or_compute_memoizes() {
        let cache = cache();
        let counter = AtomicUsize::new(0);
        let calls = &counter;

        for _ in 0..3 {
            let value: Result<Value, ()> = cache
                .get_or_compute("services:list", Some(Duration::from_secs(60)), move || async move {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Ok(json!(["renovatie"]))
                })
                .await;
            assert_eq!(value, Ok(json!(["renovatie"])));
        }

        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_get_or_compute_refetches_after_expiry() {
        let cache = cache();
        let counter = AtomicUsize::new(0);
        let calls = &counter;
        let fetch = move || async move { Ok::<_, ()>(json!(calls.fetch_add(1, Ordering::SeqCst))) };

        assert_eq!(cache.get_or_compute("k", Some(Duration::from_secs(5)), fetch).await, Ok(json!(0)));
        tokio::time::advance(Duration::from_secs(5)).await;
        assert_eq!(cache.get_or_compute("k", Some(Duration::from_secs(5)), fetch).await, Ok(json!(1)));
    }

    #[tokio::test]
    async fn test_get_or_compute_does_not_cache_errors() {
        let cache = cache();

        let failed: Result<Value, String> = cache
            .get_or_compute("projects:list", None, || async { Err("database offline".to_string()) })
            .await;
        assert_eq!(failed, Err("database offline".to_string()));
        assert!(!cache.has("projects:list"));

        let recovered: Result<Value, String> = cache
            .get_or_compute("projects:list", None, || async { Ok(json!([])) })
            .await;
        assert_eq!(recovered, Ok(json!([])));
        assert!(cache.has("projects:list"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_purge_expired_keeps_live_entries() {
        let cache = cache();
        cache.set("short", json!(1), Some(Duration::from_secs(1)));
        cache.set("long", json!(2), Some(Duration::from_secs(600)));

        tokio::time::advance(Duration::from_secs(2)).await;
        assert_eq!(cache.purge_expired(), 1);
        assert_eq!(cache.stats().keys, vec!["long".to_string()]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_background_sweep_evicts_unread_entries() {
        let cache: Arc<TtlCache<Value>> = TtlCache::start(DEFAULT_TTL, Duration::from_secs(300));
        cache.set("blog:tag:duurzaam", json!([]), Some(Duration::from_secs(10)));

        tokio::time::sleep(Duration::from_secs(301)).await;
        assert_eq!(cache.stats().size, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_destroy_stops_sweep_and_clears() {
        let cache: Arc<TtlCache<Value>> = TtlCache::start(DEFAULT_TTL, Duration::from_secs(300));
        cache.set("settings:company", json!({"name": "Bouwbedrijf"}), None);
        assert!(cache.is_sweeping());

        cache.destroy();
        assert!(!cache.is_sweeping());
        assert_eq!(cache.stats().size, 0);
    }
}
