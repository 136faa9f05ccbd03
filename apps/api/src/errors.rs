use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

pub const MISSING_INPUT_MESSAGE: &str = "Please upload both CV and JD files.";
pub const EXTRACTION_FAILED_MESSAGE: &str = "Could not extract text from one or both files.";
pub const PROCESSING_ERROR_MESSAGE: &str = "Error processing the files.";

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Missing CV or JD upload")]
    MissingInput,

    #[error("Text extraction failed for one or both files")]
    ExtractionFailed,

    /// Anything else that goes wrong while matching. The detail is logged, never returned.
    #[error("Processing error: {0}")]
    Processing(#[from] anyhow::Error),

    #[error("Bot error: {0}")]
    Bot(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::MissingInput => (StatusCode::BAD_REQUEST, MISSING_INPUT_MESSAGE.to_string()),
            AppError::ExtractionFailed => (
                StatusCode::BAD_REQUEST,
                EXTRACTION_FAILED_MESSAGE.to_string(),
            ),
            AppError::Processing(e) => {
                tracing::error!("Error processing files: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    PROCESSING_ERROR_MESSAGE.to_string(),
                )
            }
            AppError::Bot(msg) => {
                tracing::error!("Error processing activity: {msg}");
                (StatusCode::INTERNAL_SERVER_ERROR, msg.clone())
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}
