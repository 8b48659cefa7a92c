//! End-to-end generation workflow behind the `/api/generate` endpoint:
//! generate, fix up the image URL, persist, report.

use std::sync::Arc;
use std::time::Instant;

use tracing::{info, warn};

use crate::errors::AppError;
use crate::generation::{prompt, Generator};
use crate::models::{Article, GenerationRequest};
use crate::store::writer::ArticleWriter;

pub struct GenerateService {
    writer: ArticleWriter,
    /// `None` when no credential is configured; the endpoint then fails with
    /// a configuration error before any network call.
    generator: Option<Arc<dyn Generator>>,
}

impl GenerateService {
    pub fn new(writer: ArticleWriter, generator: Option<Arc<dyn Generator>>) -> Self {
        Self { writer, generator }
    }

    /// Generate an article for the request and upsert it into its category
    /// document. Returns the article plus whether the save succeeded; a save
    /// failure is reported, not escalated, so the caller still receives the
    /// generated content.
    pub async fn generate_and_save(
        &self,
        request: GenerationRequest,
    ) -> Result<(Article, bool), AppError> {
        let Some(generator) = self.generator.clone() else {
            return Err(AppError::Configuration(
                "GEMINI_API_KEY not configured".to_string(),
            ));
        };

        let start = Instant::now();
        let writer = self.writer.clone();

        // Spawned so the generate-and-persist cycle runs to completion even
        // when the client disconnects mid-request.
        let task = tokio::spawn(async move {
            let mut article = generator.generate(&request).await?;

            // The client already backfills, but never persist a non-absolute
            // image URL.
            if !article.image_url.starts_with("http") {
                article.image_url = prompt::category_image_url(&request.category);
            }

            let saved = match writer.upsert(&article).await {
                Ok(()) => true,
                Err(error) => {
                    warn!(slug = %article.slug, category = %article.category, %error,
                        "generated article could not be saved");
                    false
                }
            };
            Ok::<_, AppError>((article, saved))
        });

        let (article, saved) = task
            .await
            .map_err(|e| AppError::GenerationFailed(format!("generation task failed: {e}")))??;

        metrics::counter!("newshub_articles_generated_total").increment(1);
        metrics::histogram!("newshub_generation_duration_seconds")
            .record(start.elapsed().as_secs_f64());

        info!(
            slug = %article.slug,
            category = %article.category,
            saved,
            total_ms = start.elapsed().as_millis(),
            "article generated"
        );

        Ok((article, saved))
    }
}
