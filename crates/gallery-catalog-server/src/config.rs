//! Server configuration from environment variables

use std::env;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::error::ServerError;

/// Which image backend serves the catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    Local,
    Remote,
}

impl FromStr for Backend {
    type Err = ServerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "local" => Ok(Self::Local),
            "remote" => Ok(Self::Remote),
            other => Err(ServerError::Config(format!(
                "Unknown CATALOG_BACKEND {:?}, expected \"local\" or \"remote\"",
                other
            ))),
        }
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Local => write!(f, "local"),
            Self::Remote => write!(f, "remote"),
        }
    }
}

/// Hosted repository settings for the remote backend
#[derive(Debug, Clone)]
pub struct RemoteConfig {
    pub api_base: String,
    pub owner: String,
    pub repo: String,
    pub branch: String,
    pub content_path: String,
    pub token: Option<String>,
    pub raw_content_base: String,
    pub timeout: Duration,
}

/// Application configuration parsed from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub backend: Backend,
    pub image_root: PathBuf,
    pub image_root_alias: String,
    pub remote: RemoteConfig,
    pub cache_ttl: Duration,
    pub default_page_size: i64,
    pub cors_origins: Vec<String>,
}

impl Config {
    /// Parse configuration from environment variables
    pub fn from_env() -> Result<Self, ServerError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Parse configuration from any key lookup; unset and empty values take defaults
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ServerError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let port = var("PORT").and_then(|p| p.parse().ok()).unwrap_or(3000);

        let backend = match var("CATALOG_BACKEND") {
            Some(value) => value.parse()?,
            None => Backend::Local,
        };

        let image_root = var("IMAGE_ROOT")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("public/imgs"));

        let image_root_alias = var("IMAGE_ROOT_ALIAS")
            .map(|a| a.trim_matches('/').to_string())
            .unwrap_or_else(|| "imgs".to_string());

        let owner = var("GITHUB_OWNER").unwrap_or_else(|| "buxuele".to_string());
        let repo = var("GITHUB_REPO").unwrap_or_else(|| "next-js-ideas-app".to_string());
        let branch = var("GITHUB_BRANCH").unwrap_or_else(|| "main".to_string());
        let content_path = var("GITHUB_CONTENT_PATH").unwrap_or_else(|| "public/imgs".to_string());
        let raw_content_base = var("RAW_CONTENT_BASE").unwrap_or_else(|| {
            image_catalog::RemoteProvider::default_raw_base(&owner, &repo, &branch, &content_path)
        });

        let remote = RemoteConfig {
            api_base: var("GITHUB_API_BASE").unwrap_or_else(|| "https://api.github.com".to_string()),
            owner,
            repo,
            branch,
            content_path,
            token: var("GITHUB_TOKEN"),
            raw_content_base,
            timeout: Duration::from_secs(
                var("REMOTE_TIMEOUT_SECS")
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(10),
            ),
        };

        let cache_ttl = Duration::from_secs(
            var("CACHE_TTL_SECS")
                .and_then(|s| s.parse().ok())
                .unwrap_or(5 * 60),
        );

        let default_page_size = var("DEFAULT_PAGE_SIZE")
            .and_then(|s| s.parse::<i64>().ok())
            .filter(|n| *n > 0)
            .unwrap_or(30);

        let cors_origins = var("CORS_ORIGINS")
            .map(|s| s.split(',').map(|o| o.trim().to_string()).collect())
            .unwrap_or_else(|| vec!["*".to_string()]);

        Ok(Self {
            port,
            backend,
            image_root,
            image_root_alias,
            remote,
            cache_ttl,
            default_page_size,
            cors_origins,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<Config, ServerError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.port, 3000);
        assert_eq!(config.backend, Backend::Local);
        assert_eq!(config.image_root, PathBuf::from("public/imgs"));
        assert_eq!(config.image_root_alias, "imgs");
        assert_eq!(config.cache_ttl, Duration::from_secs(300));
        assert_eq!(config.default_page_size, 30);
        assert_eq!(config.cors_origins, vec!["*"]);
        assert_eq!(config.remote.timeout, Duration::from_secs(10));
        assert!(config.remote.token.is_none());
        assert_eq!(
            config.remote.raw_content_base,
            "https://raw.githubusercontent.com/buxuele/next-js-ideas-app/main/public/imgs"
        );
    }

    #[test]
    fn test_remote_overrides() {
        let config = config_from(&[
            ("CATALOG_BACKEND", "Remote"),
            ("GITHUB_OWNER", "someone"),
            ("GITHUB_REPO", "gallery"),
            ("GITHUB_BRANCH", "prod"),
            ("GITHUB_CONTENT_PATH", "images"),
            ("GITHUB_TOKEN", "t0ken"),
            ("REMOTE_TIMEOUT_SECS", "3"),
            ("CACHE_TTL_SECS", "60"),
        ])
        .unwrap();

        assert_eq!(config.backend, Backend::Remote);
        assert_eq!(config.remote.token.as_deref(), Some("t0ken"));
        assert_eq!(config.remote.timeout, Duration::from_secs(3));
        assert_eq!(config.cache_ttl, Duration::from_secs(60));
        assert_eq!(
            config.remote.raw_content_base,
            "https://raw.githubusercontent.com/someone/gallery/prod/images"
        );
    }

    #[test]
    fn test_unknown_backend_is_error() {
        let err = config_from(&[("CATALOG_BACKEND", "s3")]).unwrap_err();
        assert!(err.to_string().contains("CATALOG_BACKEND"));
    }

    #[test]
    fn test_invalid_numbers_fall_back() {
        let config = config_from(&[
            ("PORT", "http"),
            ("DEFAULT_PAGE_SIZE", "-4"),
            ("CACHE_TTL_SECS", "soon"),
        ])
        .unwrap();
        assert_eq!(config.port, 3000);
        assert_eq!(config.default_page_size, 30);
        assert_eq!(config.cache_ttl, Duration::from_secs(300));
    }
}
