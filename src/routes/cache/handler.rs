use axum::{
    extract::{Query, State},
    response::IntoResponse,
};

use crate::AppState;
use crate::cache::keys::family_pattern;
use crate::error::AppError;
use crate::utils::success_to_api_response;

use super::model::{CacheStatsResponse, InvalidateQuery, InvalidateResponse};

#[axum::debug_handler]
pub async fn get_stats(State(state): State<AppState>) -> impl IntoResponse {
    success_to_api_response(CacheStatsResponse::from(state.cache.stats()))
}

/// Drops the entries named by `?key=` (a key or a `*` pattern) or by
/// `?family=`, or the whole cache when neither is given.
#[axum::debug_handler]
pub async fn invalidate(
    State(state): State<AppState>,
    Query(query): Query<InvalidateQuery>,
) -> Result<impl IntoResponse, AppError> {
    let key = query.key.filter(|key| !key.is_empty());
    let family = query.family.filter(|family| !family.is_empty());

    let target = match (key, family) {
        (Some(key), _) => Some(key),
        (None, Some(family)) => match family_pattern(&family) {
            Some(pattern) => Some(pattern.to_string()),
            None => {
                return Err(AppError::InvalidParams(format!(
                    "unknown cache family {:?}",
                    family
                )));
            }
        },
        (None, None) => None,
    };

    let response = match target {
        Some(key) => {
            let removed = state.cache.invalidate(&key);
            tracing::info!("Cache invalidated for {} ({} entries)", key, removed);
            InvalidateResponse {
                message: format!("Cache invalidated for: {}", key),
                removed,
            }
        }
        None => {
            let removed = state.cache.clear();
            tracing::info!("All cache cleared ({} entries)", removed);
            InvalidateResponse {
                message: "All cache cleared".to_string(),
                removed,
            }
        }
    };

    Ok(success_to_api_response(response))
}
