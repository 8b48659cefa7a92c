//! Article generation: the [`Generator`] seam plus the Gemini-backed and
//! mock implementations. The mock is selected in `main` when the configured
//! API key is the literal `mock`, so the full request path can run without
//! network access.

pub mod client;
pub mod prompt;

use async_trait::async_trait;
use chrono::Utc;

use crate::errors::AppError;
use crate::models::{reading_time_for, Article, GenerationRequest};

pub use client::{GeminiGenerator, GEMINI_MODELS, GENERATED_AUTHOR};

#[async_trait]
pub trait Generator: Send + Sync {
    /// Produce a validated article ready for persistence, or fail.
    async fn generate(&self, request: &GenerationRequest) -> Result<Article, AppError>;
}

/// Deterministic generator for tests and keyless local runs.
#[derive(Debug, Default)]
pub struct MockGenerator;

#[async_trait]
impl Generator for MockGenerator {
    async fn generate(&self, request: &GenerationRequest) -> Result<Article, AppError> {
        let topic = request
            .description
            .clone()
            .unwrap_or_else(|| format!("a notable development in {}", request.category));
        let content = format!(
            "This is a generated placeholder article about {topic}.\n\n\
             ## Background\n\nIt exists so the generation path can be exercised \
             end to end without calling an external model.\n\n\
             ## Outlook\n\nReplace the mock API key with a real credential to \
             produce real articles."
        );

        Ok(Article {
            slug: format!("{}-generated-sample", request.category.to_lowercase()),
            title: format!("Generated sample for {}", request.category),
            excerpt: format!("A placeholder article about {topic}."),
            reading_time: reading_time_for(&content),
            content,
            category: request.category.clone(),
            published_at: Utc::now(),
            image_url: prompt::category_image_url(&request.category),
            author: GENERATED_AUTHOR.to_string(),
            tags: vec!["generated".to_string(), "sample".to_string()],
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn mock_generator_produces_a_persistable_article() {
        let request = GenerationRequest {
            category: "technology".to_string(),
            description: None,
        };

        let article = MockGenerator.generate(&request).await.unwrap();
        assert_eq!(article.slug, "technology-generated-sample");
        assert_eq!(article.category, "technology");
        assert_eq!(article.author, GENERATED_AUTHOR);
        assert!(article.reading_time >= 1);
        assert!(article.image_url.starts_with("https://"));
    }

    #[tokio::test]
    async fn mock_generator_threads_the_topic_hint_through() {
        let request = GenerationRequest {
            category: "science".to_string(),
            description: Some("tidal energy".to_string()),
        };

        let article = MockGenerator.generate(&request).await.unwrap();
        assert!(article.content.contains("tidal energy"));
        assert!(article.excerpt.contains("tidal energy"));
    }
}
