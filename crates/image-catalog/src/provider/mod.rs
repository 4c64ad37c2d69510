//! Image backends
//!
//! A [`SourceProvider`] enumerates folders and the images inside one folder.
//! It does no caching, and it never fails: an unreachable or broken backend
//! yields [`SourceListing::Degraded`].

mod local;
mod remote;

pub use local::LocalProvider;
pub use remote::RemoteProvider;

use crate::types::{FolderName, ImageDescriptor};
use async_trait::async_trait;
use std::path::{Component, Path};

/// Outcome of one backend query
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceListing<T> {
    /// The backend answered; items are in ascending name order
    Listed(Vec<T>),
    /// The backend could not be read; callers treat this as empty
    Degraded { reason: String },
}

impl<T> SourceListing<T> {
    pub fn is_degraded(&self) -> bool {
        matches!(self, Self::Degraded { .. })
    }

    /// Items of the listing, empty when degraded
    pub fn into_items(self) -> Vec<T> {
        match self {
            Self::Listed(items) => items,
            Self::Degraded { .. } => Vec::new(),
        }
    }
}

/// Read-only view of one physical image backend
#[async_trait]
pub trait SourceProvider: Send + Sync {
    /// Short backend name for logs and health output
    fn backend(&self) -> &'static str;

    /// Folder names in ascending order
    async fn list_folders(&self) -> SourceListing<FolderName>;

    /// Images of `folder` in ascending filename order
    async fn list_images(&self, folder: &str) -> SourceListing<ImageDescriptor>;
}

/// A folder must name exactly one directory level below the image root
pub(crate) fn is_single_component(folder: &str) -> bool {
    let mut components = Path::new(folder).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    ) && !folder.contains(|c| c == '/' || c == '\\')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_degraded_listing_is_empty() {
        let listing: SourceListing<String> = SourceListing::Degraded {
            reason: "status 500".to_string(),
        };
        assert!(listing.is_degraded());
        assert!(listing.into_items().is_empty());
    }

    #[test]
    fn test_listed_items() {
        let listing = SourceListing::Listed(vec!["a".to_string(), "b".to_string()]);
        assert!(!listing.is_degraded());
        assert_eq!(listing.into_items(), vec!["a", "b"]);
    }

    #[test]
    fn test_is_single_component() {
        assert!(is_single_component("art"));
        assert!(is_single_component("t-恤--收集"));
        assert!(is_single_component("my art"));
        assert!(!is_single_component("a/b"));
        assert!(!is_single_component(".."));
        assert!(!is_single_component("."));
        assert!(!is_single_component(""));
    }
}
