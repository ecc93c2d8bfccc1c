use serde::{Deserialize, Serialize};

use crate::config::RateLimitProfile;

#[derive(Debug, Deserialize)]
pub struct ResetQuery {
    pub client: Option<String>,
    /// Profile name; every profile when absent
    pub profile: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct RateLimitOverview {
    pub total_entries: usize,
    pub profiles: Vec<RateLimitProfile>,
}

#[derive(Debug, Serialize)]
pub struct ResetResponse {
    pub client: String,
    pub profiles: Vec<&'static str>,
}
