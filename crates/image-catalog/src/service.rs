//! Catalog orchestration: cached listings and pagination

use crate::cache::CacheStore;
use crate::error::{CatalogError, Result};
use crate::provider::{SourceListing, SourceProvider};
use crate::types::{CatalogStats, FolderName, ImageDescriptor, ImagePage};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

/// Default time-to-live for folder and image listings
pub const DEFAULT_TTL: Duration = Duration::from_secs(5 * 60);

const FOLDERS_KEY: &str = "folders";

fn images_key(folder: &str) -> String {
    format!("images:{}", folder)
}

/// Values held in the catalog's cache store
#[derive(Debug, Clone)]
pub enum CatalogValue {
    Folders(Arc<Vec<FolderName>>),
    Images(Arc<Vec<ImageDescriptor>>),
}

/// Cached, paginated view over one [`SourceProvider`]
///
/// Pages are cut from whatever snapshot is cached when the call runs. Within
/// one cache generation consecutive pages partition the folder exactly; a
/// refresh between two calls may change `total` and shift page boundaries.
pub struct CatalogService {
    provider: Arc<dyn SourceProvider>,
    store: Arc<CacheStore<CatalogValue>>,
    ttl: Duration,
    degraded_fetches: AtomicU64,
}

impl CatalogService {
    pub fn new(
        provider: Arc<dyn SourceProvider>,
        store: Arc<CacheStore<CatalogValue>>,
        ttl: Duration,
    ) -> Self {
        Self {
            provider,
            store,
            ttl,
            degraded_fetches: AtomicU64::new(0),
        }
    }

    pub fn backend(&self) -> &'static str {
        self.provider.backend()
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// All folder names in ascending order
    pub async fn get_folders(&self) -> Result<Vec<FolderName>> {
        let value = self
            .store
            .get_or_populate(FOLDERS_KEY, self.ttl, async {
                let listing = self.provider.list_folders().await;
                if let SourceListing::Degraded { reason } = &listing {
                    self.degraded_fetches.fetch_add(1, Ordering::Relaxed);
                    warn!(reason = %reason, "Folder listing degraded, serving empty");
                }
                CatalogValue::Folders(Arc::new(listing.into_items()))
            })
            .await;

        match value {
            CatalogValue::Folders(folders) => Ok(folders.to_vec()),
            CatalogValue::Images(_) => Err(CatalogError::CorruptEntry {
                key: FOLDERS_KEY.to_string(),
                expected: "folders",
            }),
        }
    }

    /// The full cached-or-fetched image snapshot for `folder`
    async fn snapshot(&self, folder: &str) -> Result<Arc<Vec<ImageDescriptor>>> {
        let key = images_key(folder);
        let value = self
            .store
            .get_or_populate(&key, self.ttl, async {
                let listing = self.provider.list_images(folder).await;
                if let SourceListing::Degraded { reason } = &listing {
                    self.degraded_fetches.fetch_add(1, Ordering::Relaxed);
                    warn!(folder = %folder, reason = %reason, "Image listing degraded, serving empty");
                }
                CatalogValue::Images(Arc::new(listing.into_items()))
            })
            .await;

        match value {
            CatalogValue::Images(images) => Ok(images),
            CatalogValue::Folders(_) => Err(CatalogError::CorruptEntry {
                key,
                expected: "images",
            }),
        }
    }

    /// Page `page` (1-based) of `folder`, `limit` images per page
    ///
    /// `page < 1` reads as 1 and `limit < 1` as 1. A page past the end is
    /// empty, with `total` still reported.
    pub async fn get_images(&self, folder: &str, page: i64, limit: i64) -> Result<ImagePage> {
        let snapshot = self.snapshot(folder).await?;
        let total = snapshot.len();

        let page = page.max(1);
        let limit = limit.max(1);
        let offset = usize::try_from((page - 1).saturating_mul(limit)).unwrap_or(usize::MAX);
        let limit = usize::try_from(limit).unwrap_or(usize::MAX);

        let images = snapshot.iter().skip(offset).take(limit).cloned().collect();
        Ok(ImagePage { images, total })
    }

    /// Every image of `folder`, as one page
    pub async fn get_all_images(&self, folder: &str) -> Result<ImagePage> {
        let snapshot = self.snapshot(folder).await?;
        Ok(ImagePage {
            images: snapshot.to_vec(),
            total: snapshot.len(),
        })
    }

    /// Force the next listing of `folder` to hit the backend
    pub async fn invalidate_folder(&self, folder: &str) {
        self.store.invalidate(Some(images_key(folder).as_str())).await;
        info!(folder = %folder, "Cache cleared for folder");
    }

    /// Drop every cached folder listing and the folder list
    pub async fn invalidate_all(&self) {
        self.store.invalidate(None).await;
        info!("All cache cleared");
    }

    pub async fn stats(&self) -> CatalogStats {
        let cache = self.store.stats().await;
        CatalogStats {
            entries: cache.entries,
            hits: cache.hits,
            misses: cache.misses,
            degraded_fetches: self.degraded_fetches.load(Ordering::Relaxed),
        }
    }
}
