use axum::{
    Router,
    middleware::{from_fn, from_fn_with_state},
    routing::{delete, get},
};
use tower_http::trace::TraceLayer;

use crate::{
    AppState,
    config::RateLimitProfile,
    middleware::{Throttle, log_errors, rate_limit},
    routes,
};

// Admin cache and rate-limit management; reads and writes are throttled separately
fn admin_routes(state: &AppState) -> Router<AppState> {
    let read = Throttle::new(state.limiter.clone(), RateLimitProfile::API_READ);
    let write = Throttle::new(state.limiter.clone(), RateLimitProfile::API_WRITE);

    Router::new()
        .route(
            "/admin/cache",
            get(routes::cache::get_stats)
                .layer(from_fn_with_state(read.clone(), rate_limit))
                .merge(
                    delete(routes::cache::invalidate)
                        .layer(from_fn_with_state(write.clone(), rate_limit)),
                ),
        )
        .route(
            "/admin/rate-limits",
            get(routes::rate_limit::get_overview)
                .layer(from_fn_with_state(read, rate_limit))
                .merge(
                    delete(routes::rate_limit::reset_client)
                        .layer(from_fn_with_state(write, rate_limit)),
                ),
        )
}

/// Builds the full application: API routes under the configured base path,
/// the default rate limit on every request, and error logging.
pub fn create_router(state: AppState) -> Router {
    let default_throttle = Throttle::new(state.limiter.clone(), state.config.default_rate_limit());

    let api = admin_routes(&state);
    let base = format!("/{}", state.config.api_base_uri.trim_matches('/'));
    let router = Router::new().route("/health", get(routes::health));
    // axum refuses to nest at the root
    let router = if base == "/" {
        router.merge(api)
    } else {
        router.nest(&base, api)
    };

    router
        .fallback(routes::not_found)
        .layer(from_fn(log_errors))
        .layer(from_fn_with_state(default_throttle, rate_limit))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
