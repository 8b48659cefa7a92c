mod config;
mod errors;
mod generation;
mod models;
mod routes;
mod services;
mod store;
mod xml;

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Load configuration
    dotenvy::dotenv().ok();
    let config = config::AppConfig::build()?;

    // 2. Setup logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.server.rust_log))
        .init();

    tracing::info!("Starting News Hub...");

    // 3. Initialize the category store
    let category_store = store::CategoryStore::new(&config.store.data_dir);
    let repository = store::repository::ArticleRepository::new(category_store.clone());
    let writer = store::writer::ArticleWriter::new(category_store);

    // Duplicate slugs break per-slug upsert and permalinks; surface them at
    // startup rather than on first write.
    match repository.duplicate_slugs().await {
        Ok(duplicates) if !duplicates.is_empty() => {
            tracing::warn!(?duplicates, "duplicate article slugs in the data directory");
        }
        Ok(_) => {}
        Err(error) => tracing::warn!(%error, "could not scan the data directory for duplicates"),
    }

    // 4. Select the generator: no key disables generation, the literal key
    // "mock" runs fully offline, anything else talks to Gemini.
    let generator: Option<Arc<dyn generation::Generator>> = if config.generation.api_key.is_empty()
    {
        tracing::warn!("GEMINI_API_KEY not set; POST /api/generate will be rejected");
        None
    } else if config.generation.api_key == "mock" {
        tracing::info!("using the mock generator");
        Some(Arc::new(generation::MockGenerator))
    } else {
        Some(Arc::new(generation::GeminiGenerator::new(
            config.generation.clone(),
        )?))
    };

    // 5. Initialize App State (Services)
    let state = services::AppState::new(repository, writer, generator, config.site.clone());

    // 6. Setup Router
    let app = routes::create_router(state);

    // 7. Start Server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
