//! Hosted repository backend

use super::{is_single_component, SourceListing, SourceProvider};
use crate::types::{is_image_filename, FolderName, ImageDescriptor};
use async_trait::async_trait;
use github_contents::ContentsClient;
use tracing::{debug, warn};

/// Serves folders that are directories under `root` in a hosted repository
///
/// Image URLs point at the raw-content host:
/// `{raw_base}/{encoded folder}/{encoded filename}`.
pub struct RemoteProvider {
    client: ContentsClient,
    root: Vec<String>,
    raw_base: String,
}

impl RemoteProvider {
    /// `root` is the slash-separated path of the image root inside the repository
    pub fn new(client: ContentsClient, root: &str, raw_base: &str) -> Self {
        Self {
            client,
            root: root
                .split('/')
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect(),
            raw_base: raw_base.trim_end_matches('/').to_string(),
        }
    }

    /// Raw-content base for a repository: `https://raw.githubusercontent.com/{owner}/{repo}/{branch}/{root}`
    pub fn default_raw_base(owner: &str, repo: &str, branch: &str, root: &str) -> String {
        format!(
            "https://raw.githubusercontent.com/{}/{}/{}/{}",
            owner,
            repo,
            branch,
            root.trim_matches('/')
        )
    }

    fn image_url(&self, folder: &str, filename: &str) -> String {
        format!(
            "{}/{}/{}",
            self.raw_base,
            urlencoding::encode(folder),
            urlencoding::encode(filename)
        )
    }
}

#[async_trait]
impl SourceProvider for RemoteProvider {
    fn backend(&self) -> &'static str {
        "remote"
    }

    async fn list_folders(&self) -> SourceListing<FolderName> {
        match self.client.list_directory(self.root.as_slice()).await {
            Ok(entries) => {
                let mut folders: Vec<FolderName> = entries
                    .into_iter()
                    .filter(|e| e.is_dir())
                    .map(|e| e.name)
                    .collect();
                folders.sort();
                debug!(count = folders.len(), "Listed remote folders");
                SourceListing::Listed(folders)
            }
            Err(e) => {
                warn!(error = %e, timeout = e.is_timeout(), "Failed to list remote folders");
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

        let mut segments = self.root.clone();
        segments.push(folder.to_string());

        match self.client.list_directory(segments.as_slice()).await {
            Ok(entries) => {
                let mut filenames: Vec<String> = entries
                    .into_iter()
                    .filter(|e| e.is_file() && is_image_filename(&e.name))
                    .map(|e| e.name)
                    .collect();
                filenames.sort();
                debug!(folder = %folder, count = filenames.len(), "Listed remote images");

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
                warn!(
                    folder = %folder,
                    error = %e,
                    timeout = e.is_timeout(),
                    "Failed to list remote images"
                );
                SourceListing::Degraded {
                    reason: e.to_string(),
                }
            }
        }
    }
}
