//! Gallery catalog server
//!
//! Serves folder and paginated image listings from a local directory tree or
//! a hosted repository, cached with a time-to-live.

mod config;
mod error;
mod routes;
mod state;

use std::sync::Arc;

use github_contents::{ContentsClient, ContentsConfig};
use image_catalog::{CacheStore, CatalogService, LocalProvider, RemoteProvider, SourceProvider};
use tracing::info;
use tracing_subscriber::{prelude::*, EnvFilter};

use crate::config::{Backend, Config};
use crate::error::Result;
use crate::routes::StaticImages;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    let env_filter = EnvFilter::from_default_env()
        .add_directive("gallery_catalog_server=info".parse()?)
        .add_directive("image_catalog=info".parse()?);

    // Use JSON format for GCP Cloud Logging when LOG_FORMAT=json
    if std::env::var("LOG_FORMAT")
        .map(|v| v == "json")
        .unwrap_or(false)
    {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_stackdriver::layer())
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(env_filter).init();
    };

    let config = Config::from_env()?;
    info!(port = config.port, backend = %config.backend, "Starting gallery catalog server");
    info!("Cache TTL: {} seconds", config.cache_ttl.as_secs());

    let (provider, static_images) = build_provider(&config)?;

    let store = Arc::new(CacheStore::new());
    let catalog = CatalogService::new(provider, store, config.cache_ttl);
    let state = AppState::new(Arc::new(catalog), config.default_page_size);

    let app = routes::create_router(state, static_images).layer(routes::cors_layer(&config.cors_origins));

    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Choose the backend once; the local one also gets its root served as static files
fn build_provider(config: &Config) -> Result<(Arc<dyn SourceProvider>, Option<StaticImages>)> {
    match config.backend {
        Backend::Local => {
            info!(root = ?config.image_root, alias = %config.image_root_alias, "Using local image backend");
            let provider: Arc<dyn SourceProvider> = Arc::new(LocalProvider::new(
                config.image_root.clone(),
                &config.image_root_alias,
            ));
            let static_images = StaticImages {
                alias: config.image_root_alias.clone(),
                root: config.image_root.clone(),
            };
            Ok((provider, Some(static_images)))
        }
        Backend::Remote => {
            let remote = &config.remote;
            info!(
                repo = %format!("{}/{}", remote.owner, remote.repo),
                branch = %remote.branch,
                path = %remote.content_path,
                timeout_secs = remote.timeout.as_secs(),
                "Using remote image backend"
            );

            let mut contents = ContentsConfig::new(&remote.owner, &remote.repo);
            contents.api_base = remote.api_base.clone();
            contents.branch = remote.branch.clone();
            contents.token = remote.token.clone();
            contents.timeout = remote.timeout;

            let client = ContentsClient::new(contents)?;
            let provider: Arc<dyn SourceProvider> = Arc::new(RemoteProvider::new(
                client,
                &remote.content_path,
                &remote.raw_content_base,
            ));
            Ok((provider, None))
        }
    }
}
