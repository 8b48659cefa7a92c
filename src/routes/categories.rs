//! Read-only category listing endpoint, safe for public caching.

use axum::{
    extract::{Query, State},
    http::header,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use serde_json::json;
use tracing::instrument;

use crate::errors::AppError;
use crate::services::AppState;

#[derive(Debug, Deserialize)]
pub struct CategoryParams {
    category: Option<String>,
}

#[instrument(skip(state))]
pub async fn category_articles(
    State(state): State<AppState>,
    Query(params): Query<CategoryParams>,
) -> Result<impl IntoResponse, AppError> {
    let category = params.category.unwrap_or_else(|| "all".to_string());
    let articles = state.repository.articles_by_category(&category).await?;
    let total = articles.len();

    Ok((
        [(header::CACHE_CONTROL, "public, max-age=60")],
        Json(json!({
            "articles": articles,
            "category": category,
            "total": total,
        })),
    ))
}
