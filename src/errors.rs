//! Application error types and their HTTP mapping.
//!
//! Lookups that merely find nothing (unknown category, unknown slug) are not
//! errors; the repository returns empty results or `None` for those. Errors
//! here are the conditions that must fail a request, rendered uniformly as
//! `{"success": false, "error": "..."}`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    /// Malformed client input (missing category, unknown upsert target).
    #[error("{0}")]
    Validation(String),

    /// Server-side misconfiguration, detected before any network call.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// A single model attempt failed (transport error, non-2xx response, or
    /// missing candidate text). Triggers fallback to the next model.
    #[error("model unavailable: {0}")]
    ModelUnavailable(String),

    /// Every model in the preference list failed; carries the last error.
    #[error("generation failed: {0}")]
    GenerationFailed(String),

    /// A model call succeeded but its output was malformed or incomplete.
    /// Terminal for the request; does not trigger fallback.
    #[error("failed to parse generated content: {0}")]
    Parse(String),

    /// Category document missing or corrupt.
    #[error("store read error: {0}")]
    StoreRead(String),

    /// Category document could not be persisted. Writes are whole-document
    /// replaces, so a failed write never leaves a partial document behind.
    #[error("store write error: {0}")]
    StoreWrite(String),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Configuration(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::ModelUnavailable(_) => StatusCode::BAD_GATEWAY,
            Self::GenerationFailed(_) => StatusCode::BAD_GATEWAY,
            Self::Parse(_) => StatusCode::BAD_GATEWAY,
            Self::StoreRead(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::StoreWrite(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = self.to_string();

        // Client errors are expected traffic; server errors are not.
        match &self {
            AppError::Validation(_) => {
                tracing::debug!(%message, "client error");
            }
            _ => {
                tracing::error!(%message, error = ?self, "request failed");
            }
        }

        let body = Json(json!({
            "success": false,
            "error": message,
        }));

        (status, body).into_response()
    }
}
