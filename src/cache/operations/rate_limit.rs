use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::time::Instant;

use crate::cache::models::{RateLimitDecision, RateLimitEntry, RateLimitStats, deadline_after};
use crate::cache::sweeper::{Sweep, Sweeper};
use crate::config::RateLimitProfile;

/// Fixed-window request counter keyed by caller identifier.
///
/// Each identifier gets `limit` requests per window, starting from its first
/// request. Bursts straddling a window boundary can reach twice the nominal
/// rate. Counters live in this process only.
#[derive(Default)]
pub struct RateLimiter {
    store: Mutex<HashMap<String, RateLimitEntry>>,
    sweeper: Sweeper,
}

impl RateLimiter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a limiter and starts dropping elapsed windows every
    /// `cleanup_interval`. Must be called from within a tokio runtime.
    pub fn start(cleanup_interval: Duration) -> Arc<Self> {
        let limiter = Arc::new(Self::new());
        limiter.sweeper.start(&limiter, cleanup_interval);
        limiter
    }

    /// Counts one request from `identifier` and reports whether it may proceed.
    pub fn check(&self, identifier: &str, limit: u32, window: Duration) -> RateLimitDecision {
        let now = Instant::now();
        let mut store = self.store.lock();

        if let Some(entry) = store.get_mut(identifier) {
            if !entry.is_expired(now) {
                if entry.count >= limit {
                    return RateLimitDecision {
                        allowed: false,
                        limit,
                        remaining: 0,
                        reset_at: entry.reset_at,
                    };
                }

                entry.count += 1;
                return RateLimitDecision {
                    allowed: true,
                    limit,
                    remaining: limit - entry.count,
                    reset_at: entry.reset_at,
                };
            }
        }

        let reset_at = deadline_after(now, window);
        store.insert(identifier.to_string(), RateLimitEntry { count: 1, reset_at });

        RateLimitDecision {
            allowed: true,
            limit,
            remaining: limit.saturating_sub(1),
            reset_at,
        }
    }

    pub fn check_profile(&self, identifier: &str, profile: RateLimitProfile) -> RateLimitDecision {
        self.check(identifier, profile.limit, profile.window())
    }

    /// Forgets `identifier`, restoring its full quota.
    pub fn reset(&self, identifier: &str) {
        self.store.lock().remove(identifier);
    }

    pub fn stats(&self) -> RateLimitStats {
        RateLimitStats {
            total_entries: self.store.lock().len(),
        }
    }

    /// Stops the background sweep and forgets every identifier.
    pub fn destroy(&self) {
        self.sweeper.stop();
        self.store.lock().clear();
    }

    pub fn is_sweeping(&self) -> bool {
        self.sweeper.is_running()
    }
}

impl Sweep for RateLimiter {
    const NAME: &'static str = "RateLimit";

    fn purge_expired(&self) -> usize {
        let now = Instant::now();
        let mut store = self.store.lock();
        let before = store.len();
        store.retain(|_, entry| !entry.is_expired(now));
        before - store.len()
    }
}
