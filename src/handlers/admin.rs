//! # Administrative Handlers
//!
//! - `GET /health` - process status, cache introspection, and a live probe of
//!   upstream connectivity. Always answers 200; upstream trouble only degrades
//!   the `indodaxStatus` field.
//! - `GET /clear-cache` - empties the response cache and reports sizes.

use crate::server::{AppState, SERVICE_NAME};
use axum::{extract::State, http::StatusCode, Json};
use serde_json::{json, Value};
use tracing::{info, warn};

const ENDPOINTS: &[&str] = &[
    "/api/ticker_all",
    "/api/ticker/:pair",
    "/api/summaries",
    "/api/tradingview/history",
    "/api/depth/:pair",
    "/proxy",
    "/health",
    "/clear-cache",
];

pub async fn health(State(state): State<AppState>) -> (StatusCode, Json<Value>) {
    let keys = state.cache.keys().await;

    let mut body = json!({
        "status": "ok",
        "service": SERVICE_NAME,
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "cacheSize": keys.len(),
        "cacheEntries": keys,
        "endpoints": ENDPOINTS,
    });

    match state.upstream.probe().await {
        Ok(elapsed_ms) => {
            body["indodaxStatus"] = json!("connected");
            body["indodaxResponseTime"] = json!(format!("{}ms", elapsed_ms));
        }
        Err(e) => {
            warn!("[HEALTH] upstream probe failed: {}", e);
            body["indodaxStatus"] = json!("disconnected");
            body["indodaxError"] = json!(e.to_string());
        }
    }

    (StatusCode::OK, Json(body))
}

pub async fn clear_cache(State(state): State<AppState>) -> (StatusCode, Json<Value>) {
    let previous = state.cache.clear().await;
    info!("[ADMIN] cache cleared ({} entries dropped)", previous);

    (
        StatusCode::OK,
        Json(json!({
            "message": "cache cleared",
            "previousSize": previous,
            "currentSize": 0,
        })),
    )
}
