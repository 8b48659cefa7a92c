//! Paginated article listing: JSON envelope for API consumers, article-card
//! HTML fragments for htmx-driven infinite scroll.

use axum::{
    extract::{Query, State},
    http::{header, HeaderMap},
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use serde_json::json;
use tracing::instrument;

use crate::errors::AppError;
use crate::models::Article;
use crate::services::AppState;
use crate::store::repository::DEFAULT_PAGE_LIMIT;
use crate::xml::escape_text;

/// Visible marker returned when a requested page is past the end.
const NO_MORE_ARTICLES_HTML: &str =
    r#"<div data-end-of-articles class="no-more-articles">No more articles to load.</div>"#;

/// Hidden marker appended to the final page so the client stops fetching.
const END_OF_ARTICLES_MARKER: &str = r#"<div data-end-of-articles style="display:none;"></div>"#;

#[derive(Debug, Deserialize)]
pub struct ListParams {
    page: Option<usize>,
    category: Option<String>,
    limit: Option<usize>,
}

#[instrument(skip(state, headers))]
pub async fn list_articles(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(params): Query<ListParams>,
) -> Result<Response, AppError> {
    let page = params.page.unwrap_or(1).max(1);
    let limit = params.limit.unwrap_or(DEFAULT_PAGE_LIMIT).max(1);
    let category = params.category.as_deref().unwrap_or("all");

    let result = state.repository.paginated(page, limit, category).await?;

    let wants_fragment = headers
        .get("HX-Request")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.eq_ignore_ascii_case("true"));

    if wants_fragment {
        return Ok(fragment_response(&result.articles, result.has_more, page));
    }

    Ok(Json(json!({
        "articles": result.articles,
        "page": page,
        "hasMore": result.has_more,
        "category": category,
    }))
    .into_response())
}

fn fragment_response(articles: &[Article], has_more: bool, page: usize) -> Response {
    let html = if articles.is_empty() {
        NO_MORE_ARTICLES_HTML.to_string()
    } else {
        let mut html = String::new();
        for (index, article) in articles.iter().enumerate() {
            html.push_str(&render_article_card(article, page == 1 && index == 0));
        }
        if !has_more {
            html.push_str(END_OF_ARTICLES_MARKER);
        }
        html
    };

    ([(header::CONTENT_TYPE, "text/html; charset=utf-8")], html).into_response()
}

fn category_color(category: &str) -> &'static str {
    match category.to_ascii_lowercase().as_str() {
        "technology" => "category-tech",
        "science" => "category-science",
        "business" => "category-business",
        "culture" => "category-culture",
        _ => "category-default",
    }
}

fn render_article_card(article: &Article, featured: bool) -> String {
    let featured_class = if featured { " article-card-featured" } else { "" };
    let title = escape_text(&article.title);
    let excerpt = escape_text(&article.excerpt);
    let date = article.published_at.format("%b %-d, %Y");

    format!(
        r#"<article class="article-card{featured_class}">
  <a href="/news/{slug}" class="card-link" aria-label="Read article: {title}">
    <div class="card-image-wrapper">
      <img src="{image_url}" alt="" class="card-image" loading="lazy" decoding="async" />
      <div class="card-image-overlay" aria-hidden="true"></div>
    </div>
    <div class="card-content">
      <div class="card-meta">
        <span class="card-category {color}">{category}</span>
        <div class="card-meta-right">
          <span class="card-date">{date}</span>
          <span class="card-reading-time">{reading_time} min</span>
        </div>
      </div>
      <h3 class="card-title">{title}</h3>
      <p class="card-excerpt">{excerpt}</p>
      <div class="card-action"><span class="action-text">Read Article</span></div>
    </div>
  </a>
</article>
"#,
        slug = article.slug,
        image_url = escape_text(&article.image_url),
        color = category_color(&article.category),
        category = escape_text(&article.category),
        reading_time = article.reading_time,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn article() -> Article {
        Article {
            slug: "markets-rally".to_string(),
            title: "Markets <Rally> & Rebound".to_string(),
            excerpt: "Stocks up.".to_string(),
            content: "Body.".to_string(),
            category: "business".to_string(),
            published_at: Utc.with_ymd_and_hms(2025, 3, 7, 9, 0, 0).unwrap(),
            reading_time: 4,
            image_url: "https://images.unsplash.com/photo-z".to_string(),
            author: "Fixture".to_string(),
            tags: vec![],
        }
    }

    #[test]
    fn card_escapes_title_and_links_to_slug() {
        let html = render_article_card(&article(), false);
        assert!(html.contains("Markets &lt;Rally&gt; &amp; Rebound"));
        assert!(!html.contains("<Rally>"));
        assert!(html.contains(r#"href="/news/markets-rally""#));
        assert!(html.contains("category-business"));
        assert!(html.contains("Mar 7, 2025"));
        assert!(html.contains("4 min"));
        assert!(!html.contains("article-card-featured"));
    }

    #[test]
    fn first_card_of_first_page_is_featured() {
        let html = render_article_card(&article(), true);
        assert!(html.contains("article-card-featured"));
    }

    #[test]
    fn unknown_category_uses_default_color() {
        let mut a = article();
        a.category = "misc".to_string();
        assert!(render_article_card(&a, false).contains("category-default"));
    }
}
