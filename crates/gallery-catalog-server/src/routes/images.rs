//! Paginated image listing endpoint

use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::Json;
use image_catalog::ImagePage;
use serde::Deserialize;
use tracing::error;

use crate::error::AppError;
use crate::state::AppState;

/// Raw query; numbers stay strings so a malformed value falls back to its default
#[derive(Deserialize)]
pub struct ImagesParams {
    folder: Option<String>,
    page: Option<String>,
    limit: Option<String>,
    all: Option<String>,
}

fn parse_number(value: Option<&str>) -> Option<i64> {
    value.and_then(|v| v.trim().parse().ok())
}

/// GET /images?folder=&page=&limit=
///
/// `all=true` returns the whole folder as one page.
pub async fn list(
    State(state): State<AppState>,
    query: Result<Query<ImagesParams>, QueryRejection>,
) -> Result<Json<ImagePage>, AppError> {
    let Query(params) = query?;
    let folder = params
        .folder
        .filter(|f| !f.is_empty())
        .ok_or_else(|| AppError::BadRequest("Folder parameter is required".into()))?;

    let result = if params.all.as_deref() == Some("true") {
        state.catalog.get_all_images(&folder).await
    } else {
        let page = parse_number(params.page.as_deref()).unwrap_or(1);
        let limit = parse_number(params.limit.as_deref()).unwrap_or(state.default_page_size);
        state.catalog.get_images(&folder, page, limit).await
    };

    let page = result.map_err(|e| {
        error!(folder = %folder, error = %e, "Failed to read images");
        AppError::Internal("Failed to read images".into())
    })?;

    Ok(Json(page))
}
