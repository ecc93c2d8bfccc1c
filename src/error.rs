use axum::{
    Json,
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;

use crate::result::ApiResponse;
use crate::utils::error_codes;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Rate limit exceeded. Try again in {retry_after} seconds.")]
    RateLimited {
        retry_after: u64,
        reset_at: DateTime<Utc>,
    },
    #[error("Resource not found")]
    NotFound,
    #[error("Invalid parameter: {0}")]
    InvalidParams(String),
}

#[derive(Debug, Serialize)]
struct RetryInfo {
    retry_after: u64,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let message = self.to_string();

        match self {
            AppError::RateLimited {
                retry_after,
                reset_at,
            } => {
                let body = ApiResponse {
                    code: error_codes::RATE_LIMIT,
                    msg: message,
                    resp_data: Some(RetryInfo { retry_after }),
                };
                let mut response = (StatusCode::TOO_MANY_REQUESTS, Json(body)).into_response();

                let headers = response.headers_mut();
                headers.insert(header::RETRY_AFTER, HeaderValue::from(retry_after));
                if let Ok(value) =
                    HeaderValue::from_str(&reset_at.to_rfc3339_opts(SecondsFormat::Secs, true))
                {
                    headers.insert("x-ratelimit-reset", value);
                }
                response
            }
            AppError::NotFound => (
                StatusCode::NOT_FOUND,
                Json(ApiResponse::<()>::error(error_codes::NOT_FOUND, message)),
            )
                .into_response(),
            AppError::InvalidParams(_) => (
                StatusCode::BAD_REQUEST,
                Json(ApiResponse::<()>::error(error_codes::INVALID_PARAMS, message)),
            )
                .into_response(),
        }
    }
}
