//! Core types for the image catalog

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Folder key; compared exactly and case-sensitively
pub type FolderName = String;

/// File extensions accepted as images, compared case-insensitively
pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "webp", "bmp"];

/// Whether a bare filename carries one of [`IMAGE_EXTENSIONS`]
pub fn is_image_filename(filename: &str) -> bool {
    Path::new(filename)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| IMAGE_EXTENSIONS.iter().any(|allowed| ext.eq_ignore_ascii_case(allowed)))
        .unwrap_or(false)
}

/// One image as listed by a backend
///
/// `url` is ready for a browser: a root-relative static path for the local
/// backend, a raw-content URL with encoded segments for the remote one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageDescriptor {
    filename: String,
    url: String,
    folder: FolderName,
}

impl ImageDescriptor {
    pub fn new(filename: impl Into<String>, url: impl Into<String>, folder: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            url: url.into(),
            folder: folder.into(),
        }
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn folder(&self) -> &str {
        &self.folder
    }
}

/// One page of a folder's images plus the folder's size in the snapshot it was cut from
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImagePage {
    pub images: Vec<ImageDescriptor>,
    pub total: usize,
}

/// Counters reported by the catalog
#[derive(Debug, Clone, Default, Serialize)]
pub struct CatalogStats {
    pub entries: u64,
    pub hits: u64,
    pub misses: u64,
    pub degraded_fetches: u64,
}
