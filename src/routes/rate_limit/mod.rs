mod handler;
mod model;

pub use handler::{get_overview, reset_client};
pub use model::{RateLimitOverview, ResetResponse};
