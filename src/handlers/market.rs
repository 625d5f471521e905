//! # Market Handlers
//!
//! Ticker and summary endpoints.
//!
//! - `GET /api/ticker_all` - aggregate ticker for all pairs (cached)
//! - `GET /api/ticker/:pair` - single-pair ticker (uncached passthrough)
//! - `GET /api/summaries` - market summaries (cached)
//!
//! The cached endpoints follow the read-through shape: consult the cache,
//! fetch on miss, validate that the upstream payload is a JSON object, store,
//! return. Upstream failures propagate as structured error bodies.

use crate::cache::TtlClass;
use crate::error::AppError;
use crate::server::AppState;
use crate::symbol;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde_json::Value;
use tracing::{error, info};

/// Get the aggregate ticker for all trading pairs.
///
/// **Route**: `GET /api/ticker_all`
///
/// Served from cache when fresh (ticker TTL class); otherwise fetched from the
/// upstream `/api/ticker_all` and stored.
pub async fn ticker_all(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    if let Some(payload) = state
        .cache
        .get("ticker_all", TtlClass::Ticker.duration())
        .await
    {
        return Ok((StatusCode::OK, Json(payload)));
    }

    info!("[TICKER] fetching ticker_all from upstream");
    let payload = state.upstream.fetch("/api/ticker_all", &[]).await.map_err(|e| {
        error!("[TICKER] ticker_all fetch failed: {}", e);
        AppError::from(e)
    })?;

    if !payload.is_object() {
        return Err(AppError::InvalidShape(
            "ticker_all payload is not an object".to_string(),
        ));
    }

    state.cache.put("ticker_all", payload.clone()).await;
    Ok((StatusCode::OK, Json(payload)))
}

/// Get the ticker for a single pair.
///
/// **Route**: `GET /api/ticker/:pair`
///
/// Uncached passthrough: the pair is normalized and the upstream is called on
/// every request.
pub async fn ticker(
    State(state): State<AppState>,
    Path(pair): Path<String>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let pair = symbol::normalize(&pair);
    info!("[TICKER] single ticker for {}", pair);

    let payload = state
        .upstream
        .fetch(&format!("/api/ticker/{}", pair), &[])
        .await
        .map_err(|e| {
            error!("[TICKER] ticker {} fetch failed: {}", pair, e);
            AppError::from(e)
        })?;

    Ok((StatusCode::OK, Json(payload)))
}

/// Get market summaries for all pairs.
///
/// **Route**: `GET /api/summaries`
pub async fn summaries(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    if let Some(payload) = state
        .cache
        .get("summaries", TtlClass::Ticker.duration())
        .await
    {
        return Ok((StatusCode::OK, Json(payload)));
    }

    info!("[SUMMARIES] fetching summaries from upstream");
    let payload = state.upstream.fetch("/api/summaries", &[]).await.map_err(|e| {
        error!("[SUMMARIES] fetch failed: {}", e);
        AppError::from(e)
    })?;

    if !payload.is_object() {
        return Err(AppError::InvalidShape(
            "summaries payload is not an object".to_string(),
        ));
    }

    state.cache.put("summaries", payload.clone()).await;
    Ok((StatusCode::OK, Json(payload)))
}
