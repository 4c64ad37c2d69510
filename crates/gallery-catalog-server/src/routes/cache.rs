//! Cache invalidation endpoint

use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::error::AppError;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct CacheParams {
    folder: Option<String>,
}

/// DELETE /cache?folder=
///
/// Without `folder` every cached listing is dropped, the folder list included.
pub async fn clear(
    State(state): State<AppState>,
    query: Result<Query<CacheParams>, QueryRejection>,
) -> Result<Json<Value>, AppError> {
    let Query(params) = query?;

    let message = match params.folder.filter(|f| !f.is_empty()) {
        Some(folder) => {
            state.catalog.invalidate_folder(&folder).await;
            format!("Cache cleared for folder: {}", folder)
        }
        None => {
            state.catalog.invalidate_all().await;
            "All cache cleared".to_string()
        }
    };

    Ok(Json(json!({ "message": message })))
}
