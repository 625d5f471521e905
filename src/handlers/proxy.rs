//! # Generic Proxy Handler
//!
//! `GET /proxy?url=<url-encoded upstream URL>`
//!
//! Uncached passthrough to an arbitrary upstream URL. The decoded target must
//! contain the configured upstream host; anything else is rejected with 403
//! before any network call is made. This is the only access-control check in
//! the service.

use crate::error::AppError;
use crate::server::AppState;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use serde_json::Value;
use tracing::{error, info};

#[derive(Debug, Deserialize)]
pub struct ProxyQuery {
    /// Target URL; arrives URL-encoded and is decoded by the query extractor.
    pub url: Option<String>,
}

pub async fn proxy(
    State(state): State<AppState>,
    Query(params): Query<ProxyQuery>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let url = params
        .url
        .ok_or_else(|| AppError::BadRequest("url parameter is required".to_string()))?;

    if !url.contains(&state.config.upstream_host) {
        return Err(AppError::Forbidden(format!(
            "target must be a {} URL",
            state.config.upstream_host
        )));
    }

    info!("[PROXY] forwarding to {}", url);
    let payload = state.upstream.fetch_url(&url, &[]).await.map_err(|e| {
        error!("[PROXY] fetch failed for {}: {}", url, e);
        AppError::from(e)
    })?;

    Ok((StatusCode::OK, Json(payload)))
}
