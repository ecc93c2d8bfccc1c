use axum::{
    extract::{Query, State},
    response::IntoResponse,
};

use crate::AppState;
use crate::error::AppError;
use crate::utils::success_to_api_response;

use super::model::{RateLimitOverview, ResetQuery, ResetResponse};

#[axum::debug_handler]
pub async fn get_overview(State(state): State<AppState>) -> impl IntoResponse {
    success_to_api_response(RateLimitOverview {
        total_entries: state.limiter.stats().total_entries,
        profiles: state.config.rate_limit_profiles(),
    })
}

/// Restores a client's quota under `?profile=`, or under every profile.
#[axum::debug_handler]
pub async fn reset_client(
    State(state): State<AppState>,
    Query(query): Query<ResetQuery>,
) -> Result<impl IntoResponse, AppError> {
    let client = query
        .client
        .filter(|client| !client.is_empty())
        .ok_or_else(|| AppError::InvalidParams("client is required".to_string()))?;

    let profiles = match query.profile.filter(|name| !name.is_empty()) {
        Some(name) => vec![state.config.rate_limit_profile(&name).ok_or_else(|| {
            AppError::InvalidParams(format!("unknown rate limit profile {:?}", name))
        })?],
        None => state.config.rate_limit_profiles(),
    };

    for profile in &profiles {
        state.limiter.reset(&profile.counter_key(&client));
    }
    tracing::info!("Rate limit reset for {} ({} profiles)", client, profiles.len());

    Ok(success_to_api_response(ResetResponse {
        client,
        profiles: profiles.iter().map(|profile| profile.name).collect(),
    }))
}
