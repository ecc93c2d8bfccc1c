use std::sync::Arc;

use cache::{RateLimiter, TtlCache};
use config::Config;

pub mod cache;
pub mod config;
pub mod error;
pub mod middleware;
pub mod result;
pub mod router;
pub mod routes;
pub mod utils;

pub use router::create_router;

/// Cache holding rendered read results as JSON
pub type ContentCache = TtlCache<serde_json::Value>;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub cache: Arc<ContentCache>,
    pub limiter: Arc<RateLimiter>,
}

impl AppState {
    /// Builds the shared stores and starts their background sweeps.
    /// Must be called from within a tokio runtime.
    pub fn new(config: Config) -> Self {
        let cache = TtlCache::start(config.cache_default_ttl(), config.cache_cleanup_interval());
        let limiter = RateLimiter::start(config.rate_limit_cleanup_interval());

        Self {
            config,
            cache,
            limiter,
        }
    }

    /// Stops both sweeps and drops every cached entry and counter.
    pub fn shutdown(&self) {
        self.cache.destroy();
        self.limiter.destroy();
    }
}
