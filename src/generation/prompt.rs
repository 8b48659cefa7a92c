//! Prompt construction for article generation, plus the static per-category
//! stock image pools used when the model does not return a usable image URL.

use rand::seq::SliceRandom;

/// Topic context per known category key. Unknown keys pass through verbatim
/// so the model still gets a usable subject.
const CATEGORY_CONTEXTS: [(&str, &str); 5] = [
    ("technology", "technology, software, AI, gadgets, digital innovation"),
    ("topics", "trending topics, current affairs, lifestyle, work trends"),
    ("science", "scientific discoveries, research, space, nature, environment"),
    ("business", "business news, markets, economy, entrepreneurship, finance"),
    ("culture", "arts, entertainment, music, movies, cultural trends"),
];

/// Unsplash photo identifiers per category. The `topics` pool doubles as the
/// fallback for unrecognized categories.
const IMAGE_POOLS: [(&str, [&str; 5]); 5] = [
    (
        "technology",
        [
            "photo-1518770660439-4636190af475",
            "photo-1461749280684-dccba630e2f6",
            "photo-1488590528505-98d2b5aba04b",
            "photo-1550751827-4bd374c3f58b",
            "photo-1526374965328-7f61d4dc18c5",
        ],
    ),
    (
        "topics",
        [
            "photo-1522071820081-009f0129c71c",
            "photo-1497032628192-86f99bcd76bc",
            "photo-1552664730-d307ca884978",
            "photo-1517245386807-bb43f82c33c4",
            "photo-1542744173-8e7e53415bb0",
        ],
    ),
    (
        "science",
        [
            "photo-1507413245164-6160d8298b31",
            "photo-1532094349884-543bc11b234d",
            "photo-1451187580459-43490279c0fa",
            "photo-1628595351029-c2bf17511435",
            "photo-1507003211169-0a1dd7228f2d",
        ],
    ),
    (
        "business",
        [
            "photo-1460925895917-afdab827c52f",
            "photo-1611974789855-9c2a0a7236a3",
            "photo-1507679799987-c73779587ccf",
            "photo-1454165804606-c3d57bc86b40",
            "photo-1486406146926-c627a92ad1ab",
        ],
    ),
    (
        "culture",
        [
            "photo-1514320291840-2e0a9bf2a9ae",
            "photo-1493225457124-a3eb161ffa5f",
            "photo-1459749411175-04bf5292ceea",
            "photo-1499364615650-ec38552f4f34",
            "photo-1478147427282-58a87a120781",
        ],
    ),
];

pub fn category_context(category: &str) -> &str {
    CATEGORY_CONTEXTS
        .iter()
        .find(|(key, _)| *key == category)
        .map(|(_, context)| *context)
        .unwrap_or(category)
}

/// Random stock image URL for a category, drawn from its static pool.
pub fn category_image_url(category: &str) -> String {
    let pool = IMAGE_POOLS
        .iter()
        .find(|(key, _)| *key == category)
        .map(|(_, pool)| pool)
        .unwrap_or(&IMAGE_POOLS[1].1);
    let id = pool.choose(&mut rand::thread_rng()).unwrap_or(&pool[0]);
    format!("https://images.unsplash.com/{id}?w=800&h=450&fit=crop")
}

/// Build the full instruction prompt: topic context, optional user hint,
/// formatting rules, and a strict emit-only-the-JSON instruction.
pub fn build_prompt(category: &str, description: Option<&str>) -> String {
    let context = category_context(category);
    let image_url = category_image_url(category);
    let topic_line = match description {
        Some(hint) if !hint.trim().is_empty() => format!("Specific topic: {hint}"),
        _ => "Choose an interesting and timely topic.".to_string(),
    };

    format!(
        r#"You are a professional news article writer. Generate a high-quality, engaging news article about {context}.

{topic_line}

Requirements:
1. The article should be informative, well-researched, and engaging
2. Use a professional journalistic tone
3. Include relevant facts and insights
4. The content should be 400-600 words
5. Create an appropriate title and excerpt

Return ONLY the JSON below, no other text:
```json
{{
  "slug": "url-friendly-slug-here",
  "title": "Compelling Article Title",
  "excerpt": "A brief 1-2 sentence summary of the article",
  "content": "The full article content with multiple paragraphs. Use \n\n to separate paragraphs. Include subheadings marked with ## for better readability.",
  "category": "{category}",
  "imageUrl": "{image_url}",
  "tags": ["tag1", "tag2", "tag3"]
}}
```

Rules:
- slug: lowercase with hyphens only, no special characters
- content: include ## subheadings for sections, separate paragraphs with \n\n
- tags: 3-5 relevant keywords"#
    )
}
