use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    body::Body,
    extract::{ConnectInfo, State},
    http::{HeaderValue, Request},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::{cache::RateLimiter, config::RateLimitProfile, error::AppError, utils::client_identifier};

/// Applies one rate-limit profile to the routes it wraps.
///
/// Counters are keyed by profile name and client, so a caller's quota for
/// one class of endpoint is not spent by requests to another.
#[derive(Clone)]
pub struct Throttle {
    limiter: Arc<RateLimiter>,
    profile: RateLimitProfile,
}

impl Throttle {
    pub fn new(limiter: Arc<RateLimiter>, profile: RateLimitProfile) -> Self {
        Self { limiter, profile }
    }

    pub async fn check_rate_limit(&self, req: Request<Body>, next: Next) -> Response {
        let peer = req
            .extensions()
            .get::<ConnectInfo<SocketAddr>>()
            .map(|ci| ci.0);
        let client = client_identifier(req.headers(), peer);
        let key = self.profile.counter_key(&client);

        let decision = self.limiter.check_profile(&key, self.profile);
        if !decision.allowed {
            let retry_after = decision.retry_after();
            tracing::warn!(
                "Rate limit exceeded for {} on {} {} ({}), retry in {}s",
                client,
                req.method(),
                req.uri().path(),
                self.profile.name,
                retry_after
            );
            return AppError::RateLimited {
                retry_after,
                reset_at: decision.reset_at_utc(),
            }
            .into_response();
        }

        let mut response = next.run(req).await;
        let headers = response.headers_mut();
        headers
            .entry("x-ratelimit-limit")
            .or_insert(HeaderValue::from(decision.limit));
        headers
            .entry("x-ratelimit-remaining")
            .or_insert(HeaderValue::from(decision.remaining));
        response
    }
}

pub async fn rate_limit(
    State(throttle): State<Throttle>,
    req: Request<Body>,
    next: Next,
) -> Response {
    throttle.check_rate_limit(req, next).await
}
