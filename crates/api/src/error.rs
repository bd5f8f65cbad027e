use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use parish_core::error::StoreError;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`StoreError`] for content store errors and adds HTTP-specific
/// variants. Implements [`IntoResponse`] to produce consistent JSON error
/// responses carrying a short machine code and a human message.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain error from the content store.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// The requested page or section slug is not registered.
    #[error("Not found: {0}")]
    NotFound(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Store(store) => match store {
                StoreError::NotFound { page } => (
                    StatusCode::NOT_FOUND,
                    "NOT_FOUND",
                    format!("No content found for page '{page}'"),
                ),
                StoreError::Validation(msg) => {
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
                }
                StoreError::Persistence { .. } => {
                    tracing::error!(error = %store, "Content store persistence error");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "PERSISTENCE_ERROR",
                        "A persistence error occurred".to_string(),
                    )
                }
            },

            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}
