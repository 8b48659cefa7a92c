use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

use crate::services::AppState;

pub async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// Readiness probes the store by listing categories; a missing or malformed
/// data directory makes the service not ready.
pub async fn readiness_check(State(state): State<AppState>) -> impl IntoResponse {
    match state.repository.categories().await {
        Ok(categories) => (
            StatusCode::OK,
            Json(json!({
                "status": "ready",
                "categories": categories.len(),
            })),
        ),
        Err(error) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({
                "status": "not ready",
                "error": error.to_string(),
            })),
        ),
    }
}
