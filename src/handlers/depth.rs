//! # Order-Book Depth Handler
//!
//! `GET /api/depth/:pair`
//!
//! Cached read-through over the upstream `/api/depth/{pair}` endpoint. Any
//! failure (transport, retry exhaustion, malformed payload) degrades to an
//! empty two-sided book rather than an error response.

use crate::cache::TtlClass;
use crate::server::AppState;
use crate::symbol;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};
use tracing::{info, warn};

fn empty_book() -> Value {
    json!({ "buy": [], "sell": [] })
}

pub async fn depth(
    State(state): State<AppState>,
    Path(raw_pair): Path<String>,
) -> (StatusCode, Json<Value>) {
    let pair = symbol::normalize(&raw_pair);
    let key = format!("depth:{}", pair);

    if let Some(payload) = state.cache.get(&key, TtlClass::Depth.duration()).await {
        return (StatusCode::OK, Json(payload));
    }

    info!("[DEPTH] fetching depth for {} from upstream", pair);
    match state
        .upstream
        .fetch(&format!("/api/depth/{}", pair), &[])
        .await
    {
        Ok(payload) if payload.is_object() => {
            state.cache.put(&key, payload.clone()).await;
            (StatusCode::OK, Json(payload))
        }
        Ok(_) => {
            warn!("[DEPTH] malformed depth payload for {}", pair);
            (StatusCode::OK, Json(empty_book()))
        }
        Err(e) => {
            warn!("[DEPTH] fetch failed for {}: {}", pair, e);
            (StatusCode::OK, Json(empty_book()))
        }
    }
}
