//! Folder listing endpoint

use axum::extract::State;
use axum::Json;
use serde_json::{json, Value};
use tracing::error;

use crate::error::AppError;
use crate::state::AppState;

/// GET /folders
pub async fn list(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    let folders = state.catalog.get_folders().await.map_err(|e| {
        error!(error = %e, "Failed to read folders");
        AppError::Internal("Failed to read folders".into())
    })?;

    Ok(Json(json!({ "folders": folders })))
}
