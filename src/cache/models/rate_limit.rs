use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::time::Instant;

/// Request counter for one identifier within the current window.
#[derive(Debug, Clone)]
pub struct RateLimitEntry {
    pub count: u32,
    pub reset_at: Instant,
}

impl RateLimitEntry {
    pub fn is_expired(&self, now: Instant) -> bool {
        now >= self.reset_at
    }
}

/// Outcome of a single rate-limit check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitDecision {
    pub allowed: bool,
    pub limit: u32,
    pub remaining: u32,
    pub reset_at: Instant,
}

impl RateLimitDecision {
    /// Whole seconds until the window resets, rounded up.
    pub fn retry_after(&self) -> u64 {
        let wait = self.reset_at.saturating_duration_since(Instant::now());
        wait.as_secs() + u64::from(wait.subsec_nanos() > 0)
    }

    /// Wall-clock time of the reset, for response headers.
    pub fn reset_at_utc(&self) -> DateTime<Utc> {
        let wait = self.reset_at.saturating_duration_since(Instant::now());
        let now = Utc::now();
        chrono::Duration::from_std(wait)
            .ok()
            .and_then(|wait| now.checked_add_signed(wait))
            .unwrap_or(DateTime::<Utc>::MAX_UTC)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RateLimitStats {
    pub total_entries: usize,
}
