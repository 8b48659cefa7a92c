//! Durable article storage: one JSON document per category under the data
//! directory. The documents are the ground truth; every read loads them
//! fresh, and writes replace a whole document atomically.

pub mod repository;
pub mod writer;

use std::path::PathBuf;

use tokio::fs;
use tracing::debug;

use crate::errors::AppError;
use crate::models::CategoryData;

/// The fixed set of category keys, in display order. Categories are static
/// configuration; there is no runtime registration.
pub const CATEGORY_KEYS: [&str; 5] = ["technology", "topics", "science", "business", "culture"];

#[derive(Debug, Clone)]
pub struct CategoryStore {
    data_dir: PathBuf,
}

impl CategoryStore {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Resolve a category key case-insensitively to its canonical form.
    /// Returns `None` for unknown keys.
    pub fn canonical_key(key: &str) -> Option<&'static str> {
        CATEGORY_KEYS
            .iter()
            .find(|k| k.eq_ignore_ascii_case(key))
            .copied()
    }

    pub fn is_known(key: &str) -> bool {
        Self::canonical_key(key).is_some()
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.data_dir.join(format!("{key}.json"))
    }

    /// Load one category document. A missing or malformed file is a
    /// [`AppError::StoreRead`]; this is fatal for the request, not retried.
    pub async fn load(&self, key: &str) -> Result<CategoryData, AppError> {
        let path = self.path_for(key);
        let raw = fs::read_to_string(&path)
            .await
            .map_err(|e| AppError::StoreRead(format!("{}: {e}", path.display())))?;
        serde_json::from_str(&raw)
            .map_err(|e| AppError::StoreRead(format!("{}: {e}", path.display())))
    }

    /// Load every known category document in declaration order.
    pub async fn load_all(&self) -> Result<Vec<CategoryData>, AppError> {
        let mut out = Vec::with_capacity(CATEGORY_KEYS.len());
        for key in CATEGORY_KEYS {
            out.push(self.load(key).await?);
        }
        Ok(out)
    }

    /// Persist one category document as a whole-document replace. The
    /// serialized JSON is written to a temporary sibling and renamed into
    /// place, so concurrent readers never observe a torn document.
    pub async fn save(&self, data: &CategoryData) -> Result<(), AppError> {
        let path = self.path_for(&data.category);
        let json = serde_json::to_string_pretty(data)
            .map_err(|e| AppError::StoreWrite(format!("{}: {e}", path.display())))?;

        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, &json)
            .await
            .map_err(|e| AppError::StoreWrite(format!("{}: {e}", tmp.display())))?;
        fs::rename(&tmp, &path)
            .await
            .map_err(|e| AppError::StoreWrite(format!("{}: {e}", path.display())))?;

        debug!(path = %path.display(), bytes = json.len(), "category document written");
        Ok(())
    }
}
