/// Cache operations
/// The two in-process stores and everything they can do

pub mod rate_limit;
pub mod ttl_cache;

pub use rate_limit::RateLimiter;
pub use ttl_cache::{DEFAULT_TTL, TtlCache};
