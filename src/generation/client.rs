//! Gemini-backed article generation with sequential model fallback.
//!
//! The preference list is tried strictly in order, one network call at a
//! time. A failed call (transport error, non-2xx status, missing candidate
//! text, timeout) moves on to the next model; a successful call whose output
//! cannot be parsed into an article is terminal for the request.

use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use regex_lite::Regex;
use serde::Deserialize;
use serde_json::json;
use tracing::{info, instrument, warn};

use crate::config::GenerationConfig;
use crate::errors::AppError;
use crate::generation::{prompt, Generator};
use crate::models::{reading_time_for, Article, GenerationRequest};

/// Fixed byline stamped onto every generated article.
pub const GENERATED_AUTHOR: &str = "News Hub AI";

/// Model identifiers in order of preference.
pub const GEMINI_MODELS: [&str; 4] = [
    "gemini-2.0-flash",
    "gemini-1.5-flash-latest",
    "gemini-1.5-pro-latest",
    "gemini-pro",
];

/// One attempt against one model. Implementations must return
/// [`AppError::ModelUnavailable`] for anything that should trigger fallback.
#[async_trait]
pub trait ModelApi: Send + Sync {
    async fn call(&self, model: &str, prompt: &str) -> Result<String, AppError>;
}

/// Drive the fallback loop over `models`, then parse and finalize the first
/// successful reply.
pub async fn generate_with<A: ModelApi + ?Sized>(
    api: &A,
    models: &[&str],
    request: &GenerationRequest,
) -> Result<Article, AppError> {
    let prompt = prompt::build_prompt(&request.category, request.description.as_deref());

    let mut last_error: Option<AppError> = None;
    for model in models {
        match api.call(model, &prompt).await {
            Ok(text) => {
                info!(model, "model call succeeded");
                return finalize_article(&text, &request.category);
            }
            Err(error) => {
                warn!(model, %error, "model failed, trying next");
                last_error = Some(error);
            }
        }
    }

    let detail = last_error
        .map(|e| e.to_string())
        .unwrap_or_else(|| "all models failed".to_string());
    Err(AppError::GenerationFailed(detail))
}

/// Raw payload shape the prompt asks the model to emit. Everything beyond
/// slug/title/content is optional and backfilled.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawGeneratedArticle {
    #[serde(default)]
    slug: String,
    #[serde(default)]
    title: String,
    #[serde(default)]
    excerpt: String,
    #[serde(default)]
    content: String,
    #[serde(default)]
    category: String,
    #[serde(default)]
    image_url: String,
    #[serde(default)]
    tags: Vec<String>,
}

/// Pull the JSON payload out of a model reply: a fenced ```json block when
/// present, otherwise the raw text.
fn extract_json(text: &str) -> &str {
    let fenced = Regex::new(r"(?s)```(?:json)?\s*(.*?)\s*```")
        .ok()
        .and_then(|re| {
            re.captures(text)
                .and_then(|caps| caps.get(1))
                .map(|m| m.as_str())
        });
    fenced.unwrap_or(text).trim()
}

/// Parse, validate, and backfill a model reply into a persistable article.
/// Any failure here is a terminal [`AppError::Parse`] — no model fallback.
fn finalize_article(text: &str, requested_category: &str) -> Result<Article, AppError> {
    let payload = extract_json(text);
    let raw: RawGeneratedArticle = serde_json::from_str(payload)
        .map_err(|e| AppError::Parse(e.to_string()))?;

    if raw.slug.is_empty() || raw.title.is_empty() || raw.content.is_empty() {
        return Err(AppError::Parse(
            "missing required fields in generated article".to_string(),
        ));
    }

    let category = if raw.category.is_empty() {
        requested_category.to_string()
    } else {
        raw.category
    };
    let image_url = if raw.image_url.starts_with("http://") || raw.image_url.starts_with("https://")
    {
        raw.image_url
    } else {
        prompt::category_image_url(&category)
    };
    let excerpt = if raw.excerpt.is_empty() {
        raw.title.clone()
    } else {
        raw.excerpt
    };

    Ok(Article {
        slug: raw.slug,
        title: raw.title,
        excerpt,
        reading_time: reading_time_for(&raw.content),
        content: raw.content,
        category,
        published_at: Utc::now(),
        image_url,
        author: GENERATED_AUTHOR.to_string(),
        tags: raw.tags,
    })
}

/// `ModelApi` over the Gemini `generateContent` REST endpoint.
pub struct GeminiApi {
    client: reqwest::Client,
    config: GenerationConfig,
}

impl GeminiApi {
    pub fn new(config: GenerationConfig) -> Result<Self, AppError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AppError::Configuration(format!("http client: {e}")))?;
        Ok(Self { client, config })
    }
}

#[async_trait]
impl ModelApi for GeminiApi {
    #[instrument(skip(self, prompt))]
    async fn call(&self, model: &str, prompt: &str) -> Result<String, AppError> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent?key={}",
            self.config.api_base_url.trim_end_matches('/'),
            model,
            self.config.api_key,
        );
        let payload = json!({
            "contents": [{ "parts": [{ "text": prompt }] }],
            "generationConfig": {
                "temperature": 0.8,
                "topK": 40,
                "topP": 0.95,
                "maxOutputTokens": 4096,
            },
        });

        let response = self
            .client
            .post(&url)
            .json(&payload)
            .send()
            .await
            .map_err(|e| AppError::ModelUnavailable(format!("{model}: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ModelUnavailable(format!(
                "{model}: HTTP {status}: {}",
                truncate(&body, 300)
            )));
        }

        let body: serde_json::Value = response
            .json()
            .await
            .map_err(|e| AppError::ModelUnavailable(format!("{model}: {e}")))?;

        body["candidates"][0]["content"]["parts"][0]["text"]
            .as_str()
            .map(str::to_owned)
            .ok_or_else(|| AppError::ModelUnavailable(format!("{model}: no content generated")))
    }
}

/// Generator over the real Gemini API with the fixed preference list.
pub struct GeminiGenerator {
    api: GeminiApi,
}

impl GeminiGenerator {
    pub fn new(config: GenerationConfig) -> Result<Self, AppError> {
        Ok(Self {
            api: GeminiApi::new(config)?,
        })
    }
}

#[async_trait]
impl Generator for GeminiGenerator {
    async fn generate(&self, request: &GenerationRequest) -> Result<Article, AppError> {
        generate_with(&self.api, &GEMINI_MODELS, request).await
    }
}

fn truncate(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Scripted `ModelApi`: pops one canned outcome per call and records the
    /// models attempted.
    struct ScriptedApi {
        script: Mutex<Vec<Result<String, AppError>>>,
        calls: Mutex<Vec<String>>,
    }

    impl ScriptedApi {
        fn new(script: Vec<Result<String, AppError>>) -> Self {
            Self {
                script: Mutex::new(script),
                calls: Mutex::new(Vec::new()),
            }
        }

        fn attempted_models(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ModelApi for ScriptedApi {
        async fn call(&self, model: &str, _prompt: &str) -> Result<String, AppError> {
            self.calls.lock().unwrap().push(model.to_string());
            self.script.lock().unwrap().remove(0)
        }
    }

    fn request() -> GenerationRequest {
        GenerationRequest {
            category: "science".to_string(),
            description: Some("deep sea exploration".to_string()),
        }
    }

    fn good_reply() -> String {
        r#"Here you go!
```json
{
  "slug": "abyssal-robots",
  "title": "Robots of the Abyss",
  "excerpt": "Autonomous submersibles map the deep.",
  "content": "Scientists deployed new submersibles.\n\n## The Descent\n\nThe robots dove for twelve hours.",
  "category": "science",
  "imageUrl": "https://images.unsplash.com/photo-1507413245164-6160d8298b31?w=800&h=450&fit=crop",
  "tags": ["ocean", "robotics"]
}
```"#
            .to_string()
    }

    #[tokio::test]
    async fn fallback_stops_at_first_success() {
        let api = ScriptedApi::new(vec![
            Err(AppError::ModelUnavailable("m1: HTTP 503".into())),
            Err(AppError::ModelUnavailable("m2: HTTP 429".into())),
            Ok(good_reply()),
        ]);

        let article = generate_with(&api, &["m1", "m2", "m3", "m4"], &request())
            .await
            .unwrap();

        assert_eq!(article.slug, "abyssal-robots");
        assert_eq!(api.attempted_models(), vec!["m1", "m2", "m3"]);
    }

    #[tokio::test]
    async fn exhaustion_carries_last_error_detail() {
        let api = ScriptedApi::new(vec![
            Err(AppError::ModelUnavailable("m1: HTTP 500".into())),
            Err(AppError::ModelUnavailable("m2: connection refused".into())),
        ]);

        let err = generate_with(&api, &["m1", "m2"], &request()).await.unwrap_err();
        match err {
            AppError::GenerationFailed(detail) => {
                assert!(detail.contains("m2: connection refused"));
            }
            other => panic!("expected GenerationFailed, got {other:?}"),
        }
        assert_eq!(api.attempted_models(), vec!["m1", "m2"]);
    }

    #[tokio::test]
    async fn parse_failure_is_terminal_with_no_fallback() {
        let api = ScriptedApi::new(vec![
            Ok("the model rambled instead of emitting JSON".to_string()),
            Ok(good_reply()),
        ]);

        let err = generate_with(&api, &["m1", "m2"], &request()).await.unwrap_err();
        assert!(matches!(err, AppError::Parse(_)));
        // m2 must not have been attempted.
        assert_eq!(api.attempted_models(), vec!["m1"]);
    }

    #[tokio::test]
    async fn missing_required_fields_is_a_parse_error() {
        let api = ScriptedApi::new(vec![Ok(
            r#"```json
{ "title": "No slug or content here" }
```"#
                .to_string(),
        )]);

        let err = generate_with(&api, &["m1"], &request()).await.unwrap_err();
        match err {
            AppError::Parse(detail) => assert!(detail.contains("missing required fields")),
            other => panic!("expected Parse, got {other:?}"),
        }
    }

    #[test]
    fn extract_json_prefers_fenced_block() {
        let text = "preamble\n```json\n{\"a\": 1}\n```\ntrailing";
        assert_eq!(extract_json(text), "{\"a\": 1}");
    }

    #[test]
    fn extract_json_accepts_unlabeled_fence() {
        let text = "```\n{\"a\": 1}\n```";
        assert_eq!(extract_json(text), "{\"a\": 1}");
    }

    #[test]
    fn extract_json_falls_back_to_raw_text() {
        assert_eq!(extract_json("  {\"a\": 1}  "), "{\"a\": 1}");
    }

    #[test]
    fn finalize_backfills_derived_fields() {
        let content_words = vec!["word"; 450].join(" ");
        let reply = format!(
            r#"{{"slug": "filled-in", "title": "Filled In", "content": "{content_words}"}}"#
        );

        let article = finalize_article(&reply, "business").unwrap();
        assert_eq!(article.author, GENERATED_AUTHOR);
        assert_eq!(article.category, "business");
        assert_eq!(article.excerpt, "Filled In"); // defaults to title
        assert_eq!(article.reading_time, 3); // ceil(450 / 200)
        assert!(article.image_url.starts_with("https://images.unsplash.com/"));
        assert!(article.tags.is_empty());
    }

    #[test]
    fn finalize_keeps_absolute_image_url_and_replaces_relative() {
        let absolute = r#"{"slug": "s", "title": "T", "content": "c",
            "imageUrl": "https://cdn.example.com/pic.jpg"}"#;
        let article = finalize_article(absolute, "science").unwrap();
        assert_eq!(article.image_url, "https://cdn.example.com/pic.jpg");

        let relative = r#"{"slug": "s", "title": "T", "content": "c",
            "imageUrl": "/images/pic.jpg"}"#;
        let article = finalize_article(relative, "science").unwrap();
        assert!(article.image_url.starts_with("https://images.unsplash.com/"));
    }

    #[test]
    fn finalize_keeps_model_category_when_present() {
        let reply = r#"{"slug": "s", "title": "T", "content": "c", "category": "culture"}"#;
        let article = finalize_article(reply, "science").unwrap();
        assert_eq!(article.category, "culture");
    }

    #[test]
    fn truncate_respects_char_boundaries() {
        assert_eq!(truncate("hello", 10), "hello");
        assert_eq!(truncate("hello", 3), "hel");
        assert_eq!(truncate("héllo", 2), "hé");
    }
}
