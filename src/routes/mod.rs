use axum::{Json, response::IntoResponse};
use serde_json::json;

use crate::error::AppError;

pub mod cache;
pub mod rate_limit;

pub async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

pub async fn not_found() -> AppError {
    AppError::NotFound
}
