//! Error types for the image catalog

use std::fmt;

/// Internal catalog failures
///
/// Backend unavailability is not an error here; see `SourceListing::Degraded`.
#[derive(Debug)]
pub enum CatalogError {
    /// A cache key held a value of the wrong kind
    CorruptEntry { key: String, expected: &'static str },
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CorruptEntry { key, expected } => {
                write!(f, "Corrupt cache entry {}: expected {}", key, expected)
            }
        }
    }
}

impl std::error::Error for CatalogError {}

pub type Result<T> = std::result::Result<T, CatalogError>;
