// In-memory entry types and the snapshots the stores hand out

pub mod entry;
pub mod rate_limit;

pub use entry::{CacheEntry, CacheStats, deadline_after};
pub use rate_limit::{RateLimitDecision, RateLimitEntry, RateLimitStats};
