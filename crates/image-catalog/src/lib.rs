//! Image catalog
//!
//! Answers "which folders exist" and "which images are in folder X" from one
//! of two interchangeable backends (a local directory tree or a hosted
//! repository), caches each answer with a time-to-live and serves stable
//! pages of it.
//!
//! Backend failures never escape a [`SourceProvider`]: they come back as
//! [`SourceListing::Degraded`] and the catalog shows the folder as empty.

mod cache;
mod error;
pub mod provider;
mod service;
mod types;

pub use cache::{CacheEntry, CacheStats, CacheStore};
pub use error::{CatalogError, Result};
pub use provider::{LocalProvider, RemoteProvider, SourceListing, SourceProvider};
pub use service::{CatalogService, CatalogValue, DEFAULT_TTL};
pub use types::{is_image_filename, CatalogStats, FolderName, ImageDescriptor, ImagePage, IMAGE_EXTENSIONS};
