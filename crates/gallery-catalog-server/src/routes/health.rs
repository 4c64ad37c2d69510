//! Health check with cache statistics

use axum::extract::State;
use axum::Json;
use chrono::Utc;
use image_catalog::CatalogStats;
use serde::Serialize;

use crate::state::AppState;

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub backend: String,
    pub uptime_secs: u64,
    pub cache_ttl_secs: u64,
    pub cache: CatalogStats,
}

/// GET /health
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let uptime_secs = (Utc::now() - state.started_at).num_seconds().max(0) as u64;

    Json(HealthResponse {
        status: "ok".to_string(),
        backend: state.catalog.backend().to_string(),
        uptime_secs,
        cache_ttl_secs: state.catalog.ttl().as_secs(),
        cache: state.catalog.stats().await,
    })
}
