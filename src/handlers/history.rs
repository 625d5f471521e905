//! # TradingView History Handler
//!
//! `GET /api/tradingview/history?symbol=..&resolution=..&from=..&to=..`
//!
//! Cached read-through over the upstream `/tradingview/history_v2` endpoint.
//! The upstream payload carries a TradingView status field `s`; only `"ok"`
//! payloads are cached and returned as-is. A non-ok status yields the empty
//! OHLCV fallback (`s: "no_data"`) instead of an error; only transport-level
//! failures surface as an error body.

use crate::cache::TtlClass;
use crate::server::AppState;
use crate::symbol;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{error, info, warn};

#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    pub symbol: Option<String>,
    pub resolution: Option<String>,
    pub from: Option<String>,
    pub to: Option<String>,
}

/// Empty OHLCV payload used when the upstream reports no data.
fn empty_ohlcv() -> Value {
    json!({
        "s": "no_data",
        "t": [],
        "o": [],
        "h": [],
        "l": [],
        "c": [],
        "v": [],
    })
}

pub async fn history(
    State(state): State<AppState>,
    Query(params): Query<HistoryQuery>,
) -> (StatusCode, Json<Value>) {
    let (raw_symbol, resolution) = match (params.symbol, params.resolution) {
        (Some(s), Some(r)) => (s, r),
        _ => {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({
                    "error": "bad_request",
                    "message": "symbol and resolution are required",
                })),
            );
        }
    };

    let pair = symbol::normalize(&raw_symbol);
    let from = params.from.unwrap_or_default();
    let to = params.to.unwrap_or_default();
    let key = format!("history:{}:{}:{}:{}", pair, resolution, from, to);

    if let Some(payload) = state.cache.get(&key, TtlClass::History.duration()).await {
        return (StatusCode::OK, Json(payload));
    }

    info!("[HISTORY] fetching {} ({}) from upstream", pair, resolution);
    let query = [
        ("symbol", pair.clone()),
        ("tf", resolution.clone()),
        ("from", from),
        ("to", to),
    ];

    match state.upstream.fetch("/tradingview/history_v2", &query).await {
        Ok(payload) => {
            if payload.get("s").and_then(Value::as_str) == Some("ok") {
                state.cache.put(&key, payload.clone()).await;
                (StatusCode::OK, Json(payload))
            } else {
                warn!("[HISTORY] upstream reported non-ok status for {}", pair);
                (StatusCode::OK, Json(empty_ohlcv()))
            }
        }
        Err(e) => {
            error!("[HISTORY] fetch failed for {}: {}", pair, e);
            let status = if e.is_timeout() {
                StatusCode::GATEWAY_TIMEOUT
            } else {
                StatusCode::BAD_GATEWAY
            };
            (
                status,
                Json(json!({
                    "error": "upstream_error",
                    "message": e.to_string(),
                    "symbol": pair,
                })),
            )
        }
    }
}
