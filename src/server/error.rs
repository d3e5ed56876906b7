use super::types::ErrorResponse;
use axum::{
    extract::multipart::MultipartError,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use thiserror::Error;
use tracing::warn;

/// Rejections of a training upload. Rendered as
/// `{"status": "error", "message": ...}`.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Missing required files: {}", .0.join(", "))]
    MissingParts(Vec<&'static str>),

    #[error("Failed to parse config file: {0}")]
    MalformedConfig(String),

    #[error("Failed to parse anomaly results: {0}")]
    MalformedAnomalyResults(String),

    #[error("Failed to read multipart upload: {0}")]
    Upload(#[from] MultipartError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Upload(e) => e.status(),
            _ => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = self.to_string();
        warn!("Rejecting training request: {}", message);

        let body = Json(ErrorResponse {
            status: "error",
            message,
        });
        (status, body).into_response()
    }
}
