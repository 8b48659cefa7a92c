pub mod articles;
pub mod categories;
pub mod generate;
pub mod health;
pub mod rss;

use std::sync::OnceLock;
use std::time::Duration;

use axum::routing::{get, post};
use axum::Router;
use axum_prometheus::metrics_exporter_prometheus::PrometheusHandle;
use axum_prometheus::PrometheusMetricLayer;
use tower::limit::ConcurrencyLimitLayer;
use tower::ServiceBuilder;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::services::AppState;

/// Maximum concurrent requests (backpressure control)
const MAX_CONCURRENT_REQUESTS: usize = 100;

/// Request timeout in seconds
const REQUEST_TIMEOUT_SECS: u64 = 30;

// `PrometheusMetricLayer::pair` installs a process-global metrics recorder,
// so the pair is created once and cloned for every router built after it.
fn metrics_pair() -> (PrometheusMetricLayer<'static>, PrometheusHandle) {
    static PAIR: OnceLock<(PrometheusMetricLayer<'static>, PrometheusHandle)> = OnceLock::new();
    PAIR.get_or_init(PrometheusMetricLayer::pair).clone()
}

pub fn create_router(state: AppState) -> Router {
    let (prometheus_layer, metric_handle) = metrics_pair();

    let api_routes = Router::new()
        .route("/api/articles", get(articles::list_articles))
        .route("/api/category-articles", get(categories::category_articles))
        .route("/api/generate", post(generate::generate_article))
        .route("/rss.xml", get(rss::rss_feed))
        .route("/health", get(health::health_check))
        .route("/readiness", get(health::readiness_check))
        .with_state(state);

    let metrics_router =
        Router::new().route("/metrics", get(|| async move { metric_handle.render() }));

    Router::new()
        .merge(api_routes)
        .merge(metrics_router)
        .layer(
            ServiceBuilder::new()
                // Prometheus metrics (outermost, captures all requests)
                .layer(prometheus_layer)
                .layer(TraceLayer::new_for_http())
                // Request timeout
                .layer(TimeoutLayer::new(Duration::from_secs(REQUEST_TIMEOUT_SECS)))
                // Concurrency limit for backpressure
                .layer(ConcurrencyLimitLayer::new(MAX_CONCURRENT_REQUESTS)),
        )
}
