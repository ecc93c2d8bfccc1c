// Cache module
// In-process TTL cache and rate-limit counters, each swept in the background

pub mod keys;
pub mod models;
pub mod operations;
pub mod sweeper;

pub use models::{CacheStats, RateLimitDecision, RateLimitStats};
pub use operations::{DEFAULT_TTL, RateLimiter, TtlCache};
pub use sweeper::{Sweep, Sweeper};
