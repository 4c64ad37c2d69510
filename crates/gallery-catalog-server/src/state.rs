//! Shared handler state

use chrono::{DateTime, Utc};
use image_catalog::CatalogService;
use std::sync::Arc;

/// Shared application state passed to all route handlers
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<CatalogService>,
    /// Page size used when a request gives no usable `limit`
    pub default_page_size: i64,
    pub started_at: DateTime<Utc>,
}

impl AppState {
    pub fn new(catalog: Arc<CatalogService>, default_page_size: i64) -> Self {
        Self {
            catalog,
            default_page_size,
            started_at: Utc::now(),
        }
    }
}
