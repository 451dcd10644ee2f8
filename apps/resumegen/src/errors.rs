use axum::{
    extract::{rejection::JsonRejection, FromRequest},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::editors::EditorError;
use crate::export::ExportError;
use crate::feedback::FeedbackError;
use crate::store::snapshot::ImportError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid file format")]
    Import(#[from] ImportError),

    #[error("Another {0} is already in progress")]
    Busy(&'static str),

    #[error("Preview is not mounted: {0}")]
    PreviewNotMounted(String),

    #[error("Export failed: {0}")]
    Export(String),

    #[error("Feedback failed: {0}")]
    Feedback(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<EditorError> for AppError {
    fn from(err: EditorError) -> Self {
        match err {
            EditorError::UnknownItem { .. } => AppError::NotFound(err.to_string()),
            EditorError::MissingField { .. }
            | EditorError::NoSuchBullet { .. }
            | EditorError::NoBullets { .. } => AppError::Validation(err.to_string()),
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}

/// JSON body extractor whose rejections use the `AppError` response body.
#[derive(FromRequest)]
#[from_request(via(Json), rejection(AppError))]
pub struct AppJson<T>(pub T);

impl From<ExportError> for AppError {
    fn from(err: ExportError) -> Self {
        match err {
            ExportError::PreviewNotMounted(handle) => AppError::PreviewNotMounted(handle),
            other => AppError::Export(other.to_string()),
        }
    }
}

impl From<FeedbackError> for AppError {
    fn from(err: FeedbackError) -> Self {
        if err.is_validation() {
            AppError::Validation(err.to_string())
        } else {
            AppError::Feedback(err.to_string())
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::Import(e) => {
                tracing::warn!("Import rejected: {e}");
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    "IMPORT_ERROR",
                    "Invalid file format".to_string(),
                )
            }
            AppError::Busy(_) => (StatusCode::CONFLICT, "BUSY", self.to_string()),
            AppError::PreviewNotMounted(handle) => (
                StatusCode::CONFLICT,
                "PREVIEW_NOT_MOUNTED",
                format!("Open the builder so preview '{handle}' is on screen, then retry"),
            ),
            AppError::Export(msg) => {
                tracing::error!("Export error: {msg}");
                (
                    StatusCode::BAD_GATEWAY,
                    "EXPORT_ERROR",
                    "The export could not be produced".to_string(),
                )
            }
            AppError::Feedback(msg) => {
                tracing::error!("Feedback error: {msg}");
                (
                    StatusCode::BAD_GATEWAY,
                    "FEEDBACK_ERROR",
                    crate::feedback::FAILURE_MESSAGE.to_string(),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
