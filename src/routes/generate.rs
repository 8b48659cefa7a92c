//! Administrative endpoint: generate a new article and append it to its
//! category document.

use axum::{extract::State, response::IntoResponse, Json};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::errors::AppError;
use crate::models::{Article, GenerationRequest};
use crate::services::AppState;

#[derive(Debug, Deserialize)]
pub struct GenerateBody {
    category: Option<String>,
    description: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct GenerateResponse {
    pub success: bool,
    pub article: Article,
    pub saved: bool,
}

#[instrument(skip(state, body))]
pub async fn generate_article(
    State(state): State<AppState>,
    Json(body): Json<GenerateBody>,
) -> Result<impl IntoResponse, AppError> {
    let category = body.category.unwrap_or_default();
    if category.trim().is_empty() {
        return Err(AppError::Validation("Category is required".to_string()));
    }

    let (article, saved) = state
        .generate
        .generate_and_save(GenerationRequest {
            category,
            description: body.description,
        })
        .await?;

    Ok(Json(GenerateResponse {
        success: true,
        article,
        saved,
    }))
}
