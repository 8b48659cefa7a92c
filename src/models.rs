//! Core data model: articles, category documents, and generation requests.
//!
//! Field names use camelCase on the wire and on disk to match the JSON
//! documents under `data/` and the payload shape the generation prompt asks
//! the model to emit.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Words-per-minute divisor used to derive `readingTime` from content.
pub const WORDS_PER_MINUTE: usize = 200;

/// A single published article.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    /// Unique, URL-safe identifier (lowercase, hyphen-separated). Unique
    /// across the entire corpus, not just within a category.
    pub slug: String,
    pub title: String,
    #[serde(default)]
    pub excerpt: String,
    /// Rich text. May embed `\n\n` paragraph breaks and `##` subheadings.
    pub content: String,
    /// Machine key of the owning category.
    pub category: String,
    pub published_at: DateTime<Utc>,
    /// Estimated read time in minutes, always >= 1.
    pub reading_time: u32,
    pub image_url: String,
    pub author: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// One durable category document: metadata plus the ordered article list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryData {
    /// Machine key, lowercase.
    pub category: String,
    /// Display name.
    pub label: String,
    pub description: String,
    pub articles: Vec<Article>,
}

/// Category metadata without articles, as returned by the repository.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorySummary {
    pub slug: String,
    pub label: String,
    pub description: String,
}

/// Input to the generation client.
#[derive(Debug, Clone, Deserialize)]
pub struct GenerationRequest {
    /// Known category key, or an opaque topic string for unknown keys.
    pub category: String,
    /// Optional free-text topic hint.
    pub description: Option<String>,
}

/// Derive reading time in minutes from article content: word count / 200,
/// rounded up, minimum 1.
pub fn reading_time_for(content: &str) -> u32 {
    content.split_whitespace().count().div_ceil(WORDS_PER_MINUTE).max(1) as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample_article() -> Article {
        Article {
            slug: "quantum-leap".to_string(),
            title: "A Quantum Leap".to_string(),
            excerpt: "Qubits, briefly.".to_string(),
            content: "Qubits are strange.\n\n## Why\n\nBecause superposition.".to_string(),
            category: "science".to_string(),
            published_at: Utc.with_ymd_and_hms(2025, 7, 14, 9, 30, 0).unwrap(),
            reading_time: 1,
            image_url: "https://images.unsplash.com/photo-1".to_string(),
            author: "News Hub AI".to_string(),
            tags: vec!["quantum".to_string(), "physics".to_string()],
        }
    }

    #[test]
    fn article_serializes_with_camel_case_keys() {
        let json = serde_json::to_string(&sample_article()).unwrap();
        assert!(json.contains("\"publishedAt\""));
        assert!(json.contains("\"readingTime\""));
        assert!(json.contains("\"imageUrl\""));
        assert!(!json.contains("published_at"));
    }

    #[test]
    fn article_deserializes_from_store_document() {
        let json = r#"{
            "slug": "rust-in-space",
            "title": "Rust in Space",
            "excerpt": "Memory safety in orbit.",
            "content": "Satellites now run Rust firmware.",
            "category": "technology",
            "publishedAt": "2025-06-01T12:00:00Z",
            "readingTime": 3,
            "imageUrl": "https://images.unsplash.com/photo-2",
            "author": "Jordan Vega",
            "tags": ["rust", "aerospace"]
        }"#;

        let article: Article = serde_json::from_str(json).unwrap();
        assert_eq!(article.slug, "rust-in-space");
        assert_eq!(article.published_at.to_rfc3339(), "2025-06-01T12:00:00+00:00");
        assert_eq!(article.reading_time, 3);
        assert_eq!(article.tags.len(), 2);
    }

    #[test]
    fn article_tolerates_missing_optional_fields() {
        // excerpt and tags default when absent
        let json = r#"{
            "slug": "s",
            "title": "t",
            "content": "c",
            "category": "topics",
            "publishedAt": "2025-06-01T12:00:00Z",
            "readingTime": 1,
            "imageUrl": "https://example.com/i.jpg",
            "author": "a"
        }"#;

        let article: Article = serde_json::from_str(json).unwrap();
        assert!(article.excerpt.is_empty());
        assert!(article.tags.is_empty());
    }

    #[test]
    fn reading_time_rounds_up_with_minimum_one() {
        assert_eq!(reading_time_for(""), 1);
        assert_eq!(reading_time_for("one two three"), 1);

        let two_hundred = vec!["word"; 200].join(" ");
        assert_eq!(reading_time_for(&two_hundred), 1);

        let two_hundred_one = vec!["word"; 201].join(" ");
        assert_eq!(reading_time_for(&two_hundred_one), 2);

        let five_hundred = vec!["word"; 500].join(" ");
        assert_eq!(reading_time_for(&five_hundred), 3);
    }
}
