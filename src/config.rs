use config::{Config, ConfigError, Environment};
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub store: StoreConfig,
    pub generation: GenerationConfig,
    pub site: SiteConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub rust_log: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StoreConfig {
    /// Directory holding one `<category>.json` document per category.
    pub data_dir: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct GenerationConfig {
    /// Gemini API credential. Empty disables the generation endpoint;
    /// the literal value `mock` selects the in-process mock generator.
    pub api_key: String,
    pub api_base_url: String,
    /// Per-model-call timeout. Expiry counts as a model failure and routes
    /// into the fallback path.
    pub timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SiteConfig {
    pub base_url: String,
    pub title: String,
    pub description: String,
}

impl AppConfig {
    pub fn build() -> Result<Self, ConfigError> {
        // GEMINI_API_KEY and SITE_URL are honored directly for parity with
        // the usual deployment environment; APP__-prefixed variables override
        // everything.
        let gemini_api_key = std::env::var("GEMINI_API_KEY").unwrap_or_default();
        let site_url =
            std::env::var("SITE_URL").unwrap_or_else(|_| "https://news-hub.example.com".into());

        let builder = Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 3000)?
            .set_default("server.rust_log", "info,newshub=debug")?
            .set_default("store.data_dir", "data")?
            .set_default("generation.api_key", gemini_api_key)?
            .set_default(
                "generation.api_base_url",
                "https://generativelanguage.googleapis.com",
            )?
            .set_default("generation.timeout_secs", 30)?
            .set_default("site.base_url", site_url)?
            .set_default("site.title", "News Hub")?
            .set_default(
                "site.description",
                "Your source for the latest news, technology updates, and diverse topics powered by AI.",
            )?
            // The prefix joins with the separator, so `APP__SERVER__PORT=8080`
            // sets `server.port`
            .add_source(Environment::default().separator("__").prefix("APP"));

        builder.build()?.try_deserialize()
    }
}
