//! Local directory backend

use super::{is_single_component, SourceListing, SourceProvider};
use crate::types::{is_image_filename, FolderName, ImageDescriptor};
use async_trait::async_trait;
use std::io;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, warn};

/// Serves folders that are immediate subdirectories of `root`
///
/// Descriptor URLs are `/{alias}/{folder}/{filename}`, unencoded, for a static
/// file server mounted at `/{alias}`.
pub struct LocalProvider {
    root: PathBuf,
    alias: String,
}

impl LocalProvider {
    pub fn new(root: impl Into<PathBuf>, alias: &str) -> Self {
        Self {
            root: root.into(),
            alias: alias.trim_matches('/').to_string(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn image_url(&self, folder: &str, filename: &str) -> String {
        format!("/{}/{}/{}", self.alias, folder, filename)
    }

    /// Names of entries under `dir` whose target satisfies `keep`, sorted
    ///
    /// A missing directory reads as empty.
    async fn read_names<F>(dir: &Path, keep: F) -> io::Result<Vec<String>>
    where
        F: Fn(&std::fs::Metadata, &str) -> bool,
    {
        let mut read_dir = match fs::read_dir(dir).await {
            Ok(read_dir) => read_dir,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e),
        };

        let mut names = Vec::new();
        while let Some(entry) = read_dir.next_entry().await? {
            let Ok(name) = entry.file_name().into_string() else {
                debug!(path = ?entry.path(), "Skipping non UTF-8 entry name");
                continue;
            };
            // Follows symlinks; a dangling link is skipped
            let Ok(metadata) = fs::metadata(entry.path()).await else {
                continue;
            };
            if keep(&metadata, &name) {
                names.push(name);
            }
        }

        names.sort();
        Ok(names)
    }
}

#[async_trait]
impl SourceProvider for LocalProvider {
    fn backend(&self) -> &'static str {
        "local"
    }

    async fn list_folders(&self) -> SourceListing<FolderName> {
        match Self::read_names(&self.root, |metadata, _| metadata.is_dir()).await {
            Ok(folders) => {
                debug!(root = ?self.root, count = folders.len(), "Listed local folders");
                SourceListing::Listed(folders)
            }
            Err(e) => {
                warn!(root = ?self.root, error = %e, "Failed to read local image root");
                SourceListing::Degraded {
                    reason: e.to_string(),
                }
            }
        }
    }

    async fn list_images(&self, folder: &str) -> SourceListing<ImageDescriptor> {
        if !is_single_component(folder) {
            warn!(folder = %folder, "Rejected folder name outside the image root");
            return SourceListing::Listed(Vec::new());
        }

        let dir = self.root.join(folder);
        let keep = |metadata: &std::fs::Metadata, name: &str| {
            metadata.is_file() && is_image_filename(name)
        };

        match Self::read_names(&dir, keep).await {
            Ok(filenames) => {
                debug!(folder = %folder, count = filenames.len(), "Listed local images");
                let images = filenames
                    .into_iter()
                    .map(|filename| {
                        let url = self.image_url(folder, &filename);
                        ImageDescriptor::new(filename, url, folder)
                    })
                    .collect();
                SourceListing::Listed(images)
            }
            Err(e) => {
                warn!(folder = %folder, error = %e, "Failed to read local image folder");
                SourceListing::Degraded {
                    reason: e.to_string(),
                }
            }
        }
    }
}
