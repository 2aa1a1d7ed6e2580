use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use mde_core::error::CoreError;
use mde_pipeline::ExportError;
use serde_json::json;

/// Message sent in place of details that must not leak to clients.
const SANITIZED_MESSAGE: &str = "An internal error occurred";

/// Application-level error type for HTTP handlers.
///
/// Wraps [`ExportError`] for pipeline failures and adds HTTP-specific
/// variants. Implements [`IntoResponse`] to produce `{"error": "..."}`
/// bodies.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A failure raised by the export pipeline.
    #[error(transparent)]
    Export(#[from] ExportError),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

impl From<CoreError> for AppError {
    fn from(err: CoreError) -> Self {
        Self::Export(err.into())
    }
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::Export(err) => classify_export_error(err),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    SANITIZED_MESSAGE.to_string(),
                )
            }
        };

        (status, axum::Json(json!({ "error": message }))).into_response()
    }
}

/// Classify a pipeline error into an HTTP status and client message.
///
/// - `NotFound` maps to 404, invalid schemes to 400.
/// - Missing files, XSLT, I/O and XML failures map to 500 and keep their
///   message, including file paths.
/// - Database errors map to 500 with a sanitized message.
fn classify_export_error(err: &ExportError) -> (StatusCode, String) {
    match err {
        ExportError::Core(core) => match core {
            CoreError::NotFound { .. } => (StatusCode::NOT_FOUND, core.to_string()),
            CoreError::InvalidFormat(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
        },
        ExportError::MissingArtifact { .. }
        | ExportError::TransformFailure { .. }
        | ExportError::Io { .. }
        | ExportError::Xml(_) => {
            tracing::error!(error = %err, "Export failed");
            (StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
        }
        ExportError::Database(db_err) => {
            tracing::error!(error = %db_err, "Database error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                SANITIZED_MESSAGE.to_string(),
            )
        }
    }
}
