mod handler;
mod model;

pub use handler::{get_stats, invalidate};
pub use model::{CacheStatsResponse, InvalidateResponse};
