//! Write side of the category store: upsert-by-slug into one category
//! document.

use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{info, instrument};

use crate::errors::AppError;
use crate::models::Article;
use crate::store::CategoryStore;

#[derive(Debug, Clone)]
pub struct ArticleWriter {
    store: CategoryStore,
    // Serializes read-modify-write cycles within this process. Reads stay
    // lock-free; document-level atomicity comes from the store's
    // tmp-file-plus-rename write.
    write_lock: Arc<Mutex<()>>,
}

impl ArticleWriter {
    pub fn new(store: CategoryStore) -> Self {
        Self {
            store,
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    /// Upsert an article into its category document, keyed by exact slug.
    ///
    /// An existing entry is replaced in place, preserving its position; a new
    /// slug is inserted at the head of the list. An unknown category key is
    /// rejected rather than written to a non-existent document, and the
    /// stored article always carries the canonical key.
    #[instrument(skip(self, article), fields(slug = %article.slug, category = %article.category))]
    pub async fn upsert(&self, article: &Article) -> Result<(), AppError> {
        let Some(key) = CategoryStore::canonical_key(&article.category) else {
            return Err(AppError::Validation(format!(
                "unknown category '{}'",
                article.category
            )));
        };
        let mut article = article.clone();
        article.category = key.to_string();

        let _guard = self.write_lock.lock().await;
        let mut data = self.store.load(key).await?;

        match data.articles.iter().position(|a| a.slug == article.slug) {
            Some(index) => {
                data.articles[index] = article;
                info!(index, "replaced existing article");
            }
            None => {
                data.articles.insert(0, article);
                info!(total = data.articles.len(), "inserted new article at head");
            }
        }

        self.store.save(&data).await
    }
}
