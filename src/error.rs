use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use crate::services::providers::GatewayError;

/// Closed set of request-path failures.
///
/// Every kind maps to a fixed status and a fixed client-facing detail
/// message; the internal detail carried on the variant is logged server-side
/// and never returned to the caller.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The model API credential was absent at startup.
    #[error("model API credential missing")]
    Configuration,

    /// The upload did not satisfy the declared-media-type contract.
    #[error("invalid upload: {0}")]
    Validation(String),

    /// The model gateway call failed, whatever the upstream cause.
    #[error("model gateway failure: {0}")]
    Engine(#[from] GatewayError),

    /// A storage read or write failed.
    #[error("storage failure: {0}")]
    Storage(#[from] sqlx::Error),
}

impl ApiError {
    /// Stable label used in logs and metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            ApiError::Configuration => "configuration",
            ApiError::Validation(_) => "validation",
            ApiError::Engine(_) => "engine",
            ApiError::Storage(_) => "storage",
        }
    }

    fn status_detail(&self) -> (StatusCode, &'static str) {
        match self {
            ApiError::Configuration => (StatusCode::INTERNAL_SERVER_ERROR, "API Key missing"),
            ApiError::Validation(_) => (StatusCode::BAD_REQUEST, "PDF files only"),
            ApiError::Engine(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Engine Error"),
            ApiError::Storage(_) => (StatusCode::INTERNAL_SERVER_ERROR, "DB Error"),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, detail) = self.status_detail();

        if status.is_server_error() {
            tracing::error!(kind = self.kind(), error = %self, "Request failed");
        } else {
            tracing::warn!(kind = self.kind(), error = %self, "Request rejected");
        }

        (status, Json(json!({ "detail": detail }))).into_response()
    }
}
