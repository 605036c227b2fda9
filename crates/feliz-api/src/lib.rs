//! Feliz API /v1: REST endpoints over the quotation engine
pub mod config;
pub mod error;
pub mod handlers;
pub mod metrics;
pub mod middleware;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use feliz_core::{PricingRules, QuotationEngine};
use feliz_out::QuoteRenderer;
use tower_http::trace::TraceLayer;

pub use config::ApiConfig;
pub use error::ApiError;
pub use metrics::QuoteMetrics;

/// Shared, read-only state of the server
pub struct AppState {
    pub engine: QuotationEngine,
    pub renderer: QuoteRenderer,
    pub metrics: QuoteMetrics,
    pub currency: String,
}

impl AppState {
    pub fn new(
        rules: PricingRules,
        renderer: QuoteRenderer,
        currency: impl Into<String>,
    ) -> Result<Self, ApiError> {
        Ok(Self {
            engine: QuotationEngine::new(rules),
            renderer,
            metrics: QuoteMetrics::new()?,
            currency: currency.into(),
        })
    }

    /// Load rules and templates named by the configuration
    pub fn from_config(config: &ApiConfig) -> Result<Self, ApiError> {
        let rules = match &config.rules_path {
            Some(path) => PricingRules::load(path)?,
            None => PricingRules::default(),
        };
        let renderer = match &config.templates_path {
            Some(path) => QuoteRenderer::load(path)?,
            None => QuoteRenderer::builtin()?,
        };
        Self::new(rules, renderer, config.currency.clone())
    }
}

pub fn create_app(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/v1/quote", post(handlers::quote))
        .route("/v1/quote/render", post(handlers::render))
        .route("/v1/rules", get(handlers::rules))
        .route("/v1/health", get(handlers::health))
        .route("/metrics", get(handlers::metrics))
        .layer(axum::middleware::from_fn(middleware::log_requests))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::cors())
        .with_state(state)
}

pub async fn run(config: ApiConfig) -> anyhow::Result<()> {
    let state = Arc::new(AppState::from_config(&config)?);
    let app = create_app(state);

    let listener = tokio::net::TcpListener::bind(&config.addr).await?;
    tracing::info!("Feliz API listening on {}", config.addr);
    axum::serve(listener, app).await?;
    Ok(())
}
