//! # Server Setup
//!
//! Router construction, shared state wiring, CORS, tracing, and HTTP server
//! startup. All endpoints are JSON and open to any origin.

use crate::cache::ResponseCache;
use crate::config::Config;
use crate::handlers;
use crate::upstream::UpstreamClient;
use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

pub const SERVICE_NAME: &str = "indodax-proxy";

/// Application state shared across all routes.
///
/// The cache is an explicitly constructed instance injected here rather than a
/// process-wide singleton, so tests can build isolated states.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub cache: ResponseCache,
    pub upstream: Arc<UpstreamClient>,
}

impl AppState {
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let upstream = Arc::new(UpstreamClient::new(&config)?);
        Ok(Self {
            config,
            cache: ResponseCache::new(),
            upstream,
        })
    }
}

/// Initialize tracing and serve the proxy until the process exits.
pub async fn start_server(config: Config) -> anyhow::Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();

    info!("INDODAX PROXY STARTING");
    info!("Upstream: {}", config.upstream_base_url);

    let bind_address = config.bind_address.clone();
    let state = AppState::new(config)?;
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(&bind_address).await?;
    info!("SERVER READY: http://{}", bind_address);
    log_routes();

    axum::serve(listener, app).await?;
    Ok(())
}

/// Create the application router with all routes and middleware.
pub fn create_router(state: AppState) -> Router {
    // Cross-origin requests are permitted from any origin (spec'd surface is
    // a public read-only API).
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/ticker_all", get(handlers::market::ticker_all))
        .route("/api/ticker/:pair", get(handlers::market::ticker))
        .route("/api/summaries", get(handlers::market::summaries))
        .route("/api/tradingview/history", get(handlers::history::history))
        .route("/api/depth/:pair", get(handlers::depth::depth))
        .route("/proxy", get(handlers::proxy::proxy))
        .route("/health", get(handlers::admin::health))
        .route("/clear-cache", get(handlers::admin::clear_cache))
        .fallback(|| async {
            (axum::http::StatusCode::NOT_FOUND, "Route not found")
        })
        .with_state(state)
        .layer(
            tower_http::trace::TraceLayer::new_for_http().make_span_with(
                |request: &axum::http::Request<_>| {
                    tracing::info_span!(
                        "http_request",
                        request_id = %uuid::Uuid::new_v4(),
                        method = %request.method(),
                        uri = %request.uri(),
                    )
                },
            ),
        )
        .layer(cors)
}

fn log_routes() {
    info!("MARKET DATA:");
    info!("   - GET /api/ticker_all");
    info!("   - GET /api/ticker/:pair");
    info!("   - GET /api/summaries");
    info!("   - GET /api/tradingview/history?symbol=BTCIDR&resolution=15&from=..&to=..");
    info!("   - GET /api/depth/:pair");
    info!("PROXY:");
    info!("   - GET /proxy?url={{url-encoded upstream url}}");
    info!("ADMIN:");
    info!("   - GET /health");
    info!("   - GET /clear-cache");
}
