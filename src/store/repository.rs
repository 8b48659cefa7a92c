//! Read-side aggregation over the category store.
//!
//! Every query loads the documents fresh and recomputes the merged, sorted
//! view. The corpus is small; a stable, fully-ordered feed matters more than
//! recompute cost.

use std::collections::HashMap;

use crate::errors::AppError;
use crate::models::{Article, CategorySummary};
use crate::store::CategoryStore;

pub const DEFAULT_PAGE_LIMIT: usize = 6;

/// One page of the filtered, sorted article set.
#[derive(Debug, Clone)]
pub struct PaginatedArticles {
    pub articles: Vec<Article>,
    pub has_more: bool,
}

#[derive(Debug, Clone)]
pub struct ArticleRepository {
    store: CategoryStore,
}

impl ArticleRepository {
    pub fn new(store: CategoryStore) -> Self {
        Self { store }
    }

    /// Every article across all categories, stamped with its owning category
    /// key and sorted by `publishedAt` descending. The sort is stable, so
    /// articles with equal timestamps keep their store order.
    pub async fn all_articles(&self) -> Result<Vec<Article>, AppError> {
        let mut articles = Vec::new();
        for category in self.store.load_all().await? {
            for mut article in category.articles {
                article.category = category.category.clone();
                articles.push(article);
            }
        }
        articles.sort_by(|a, b| b.published_at.cmp(&a.published_at));
        Ok(articles)
    }

    /// Articles for one category, newest first. `"all"` is the merged view;
    /// an unknown key yields an empty list, never an error.
    pub async fn articles_by_category(&self, key: &str) -> Result<Vec<Article>, AppError> {
        if key.eq_ignore_ascii_case("all") {
            return self.all_articles().await;
        }
        let Some(canonical) = CategoryStore::canonical_key(key) else {
            return Ok(Vec::new());
        };

        let category = self.store.load(canonical).await?;
        let mut articles = category.articles;
        for article in &mut articles {
            article.category = category.category.clone();
        }
        articles.sort_by(|a, b| b.published_at.cmp(&a.published_at));
        Ok(articles)
    }

    /// Exact slug lookup over the globally sorted corpus. Absence is `None`,
    /// not an error.
    pub async fn article_by_slug(&self, slug: &str) -> Result<Option<Article>, AppError> {
        let articles = self.all_articles().await?;
        Ok(articles.into_iter().find(|a| a.slug == slug))
    }

    /// 1-indexed page over the filtered, sorted set. An out-of-range page is
    /// an empty slice with `has_more = false`, not an error.
    pub async fn paginated(
        &self,
        page: usize,
        limit: usize,
        category: &str,
    ) -> Result<PaginatedArticles, AppError> {
        let filtered = self.articles_by_category(category).await?;
        let page = page.max(1);
        let limit = limit.max(1);

        let start = (page - 1).saturating_mul(limit);
        let end = start.saturating_add(limit);
        let articles = if start >= filtered.len() {
            Vec::new()
        } else {
            filtered[start..end.min(filtered.len())].to_vec()
        };
        let has_more = end < filtered.len();

        Ok(PaginatedArticles { articles, has_more })
    }

    /// Category metadata with the synthetic `all` pseudo-category prepended.
    pub async fn categories(&self) -> Result<Vec<CategorySummary>, AppError> {
        let mut out = vec![CategorySummary {
            slug: "all".to_string(),
            label: "All".to_string(),
            description: "All news and articles".to_string(),
        }];
        for category in self.store.load_all().await? {
            out.push(CategorySummary {
                slug: category.category,
                label: category.label,
                description: category.description,
            });
        }
        Ok(out)
    }

    /// Slugs appearing more than once anywhere in the corpus. Duplicates are
    /// a data-integrity violation to flag, not to resolve silently.
    pub async fn duplicate_slugs(&self) -> Result<Vec<String>, AppError> {
        let mut counts: HashMap<String, usize> = HashMap::new();
        for category in self.store.load_all().await? {
            for article in &category.articles {
                *counts.entry(article.slug.clone()).or_default() += 1;
            }
        }
        let mut dups: Vec<String> = counts
            .into_iter()
            .filter(|(_, n)| *n > 1)
            .map(|(slug, _)| slug)
            .collect();
        dups.sort();
        Ok(dups)
    }
}
