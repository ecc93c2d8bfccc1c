use serde::{Deserialize, Serialize};

use crate::cache::CacheStats;

#[derive(Debug, Deserialize)]
pub struct InvalidateQuery {
    /// Exact key, or a pattern when it contains `*`
    pub key: Option<String>,
    /// Content family (`blog`, `services`, `projects`, `settings`)
    pub family: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CacheStatsResponse {
    pub total_entries: usize,
    pub keys: Vec<String>,
}

impl From<CacheStats> for CacheStatsResponse {
    fn from(stats: CacheStats) -> Self {
        Self {
            total_entries: stats.size,
            keys: stats.keys,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct InvalidateResponse {
    pub message: String,
    pub removed: usize,
}
