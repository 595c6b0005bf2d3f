//! API error types and HTTP response conversions.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use lessonbase_core::search::SearchError;
use serde::Serialize;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Search(#[from] SearchError),
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            ApiError::Search(SearchError::Timeout { .. }) => {
                (StatusCode::GATEWAY_TIMEOUT, "timeout")
            }
            ApiError::Search(SearchError::Config(_)) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "config_error")
            }
            ApiError::Search(_) => (StatusCode::INTERNAL_SERVER_ERROR, "store_error"),
        };
        log::error!("[Server] Request failed: {}", self);

        let body = ErrorResponse {
            error: code.to_string(),
            message: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}
