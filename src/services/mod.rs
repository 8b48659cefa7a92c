use std::sync::Arc;

use crate::config::SiteConfig;
use crate::generation::Generator;
use crate::services::generate::GenerateService;
use crate::store::repository::ArticleRepository;
use crate::store::writer::ArticleWriter;

pub mod generate;

// A container for everything the routes need, injected via axum state.
#[derive(Clone)]
pub struct AppState {
    pub repository: ArticleRepository,
    pub generate: Arc<GenerateService>,
    pub site: SiteConfig,
}

impl AppState {
    pub fn new(
        repository: ArticleRepository,
        writer: ArticleWriter,
        generator: Option<Arc<dyn Generator>>,
        site: SiteConfig,
    ) -> Self {
        Self {
            repository,
            generate: Arc::new(GenerateService::new(writer, generator)),
            site,
        }
    }
}
