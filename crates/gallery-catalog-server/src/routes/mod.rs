//! HTTP routes
//!
//! `/folders`, `/images`, `/cache` and `/health`, plus the local image root
//! mounted as static files when the local backend is active.

pub mod cache;
pub mod folders;
pub mod health;
pub mod images;

use std::path::PathBuf;

use axum::http::{header, HeaderValue, Method};
use axum::routing::{delete, get};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::set_header::SetResponseHeaderLayer;

use crate::state::AppState;

/// Local image root served at `/{alias}`
pub struct StaticImages {
    pub alias: String,
    pub root: PathBuf,
}

/// CORS policy from configured origins; `*` allows any origin
pub fn cors_layer(origins: &[String]) -> CorsLayer {
    if origins.iter().any(|o| o == "*") {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods([Method::GET, Method::DELETE])
            .allow_headers(Any)
    } else {
        let origins: Vec<HeaderValue> = origins.iter().filter_map(|o| o.parse().ok()).collect();
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([Method::GET, Method::DELETE])
            .allow_headers([header::CONTENT_TYPE])
    }
}

/// Create the HTTP router
pub fn create_router(state: AppState, static_images: Option<StaticImages>) -> Router {
    let mut router = Router::new()
        .route("/health", get(health::health))
        .route("/folders", get(folders::list))
        .route("/images", get(images::list))
        .route("/cache", delete(cache::clear))
        .with_state(state);

    if let Some(StaticImages { alias, root }) = static_images {
        if !alias.is_empty() {
            let files: Router = Router::new()
                .fallback_service(ServeDir::new(root))
                .layer(SetResponseHeaderLayer::if_not_present(
                    header::CACHE_CONTROL,
                    HeaderValue::from_static("public, max-age=31536000, immutable"),
                ));
            router = router.nest_service(&format!("/{}", alias), files);
        }
    }

    router
}
