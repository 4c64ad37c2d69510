//! Contents API HTTP client

use crate::error::{ContentsError, Result};
use crate::types::ContentEntry;
use reqwest::header;
use std::time::Duration;
use tracing::debug;

/// Percent-encode each path segment independently and join them with `/`
///
/// A `/` inside a segment is encoded, so it never introduces an extra level.
pub fn encode_segments<S: AsRef<str>>(segments: &[S]) -> String {
    segments
        .iter()
        .map(|s| urlencoding::encode(s.as_ref()).into_owned())
        .collect::<Vec<_>>()
        .join("/")
}

/// Settings for a [`ContentsClient`]
#[derive(Debug, Clone)]
pub struct ContentsConfig {
    pub api_base: String,
    pub owner: String,
    pub repo: String,
    pub branch: String,
    /// Sent as a bearer token when present
    pub token: Option<String>,
    pub timeout: Duration,
    pub user_agent: String,
}

impl ContentsConfig {
    pub const DEFAULT_API_BASE: &'static str = "https://api.github.com";
    pub const DEFAULT_BRANCH: &'static str = "main";
    pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

    /// Settings for `owner/repo` on the public API with default branch and timeout
    pub fn new(owner: &str, repo: &str) -> Self {
        Self {
            api_base: Self::DEFAULT_API_BASE.to_string(),
            owner: owner.to_string(),
            repo: repo.to_string(),
            branch: Self::DEFAULT_BRANCH.to_string(),
            token: None,
            timeout: Duration::from_secs(Self::DEFAULT_TIMEOUT_SECS),
            user_agent: format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION")),
        }
    }
}

/// Client for the repository contents listing endpoint
pub struct ContentsClient {
    http: reqwest::Client,
    config: ContentsConfig,
}

impl ContentsClient {
    /// Create a client; every request is bounded by `config.timeout`
    pub fn new(config: ContentsConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.clone())
            .build()?;

        Ok(Self { http, config })
    }

    pub fn config(&self) -> &ContentsConfig {
        &self.config
    }

    /// Build the listing URL for a directory given as unencoded path segments
    pub fn listing_url<S: AsRef<str>>(&self, segments: &[S]) -> String {
        format!(
            "{}/repos/{}/{}/contents/{}?ref={}",
            self.config.api_base.trim_end_matches('/'),
            urlencoding::encode(&self.config.owner),
            urlencoding::encode(&self.config.repo),
            encode_segments(segments),
            urlencoding::encode(&self.config.branch)
        )
    }

    /// List the entries of a directory
    ///
    /// A path that names a file (the API answers with a single object) is
    /// reported as [`ContentsError::Json`].
    pub async fn list_directory<S: AsRef<str>>(&self, segments: &[S]) -> Result<Vec<ContentEntry>> {
        let url = self.listing_url(segments);
        debug!(url = %url, "Listing repository contents");

        let mut request = self
            .http
            .get(&url)
            .header(header::ACCEPT, "application/vnd.github.v3+json");
        if let Some(token) = &self.config.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;

        if !response.status().is_success() {
            return Err(ContentsError::Status(response.status().as_u16()));
        }

        let body = response.bytes().await?;
        let entries: Vec<ContentEntry> = serde_json::from_slice(&body)?;

        debug!(url = %url, count = entries.len(), "Listed repository contents");
        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::extract::Path;
    use axum::http::{HeaderMap, StatusCode};
    use axum::response::{IntoResponse, Response};
    use axum::routing::get;
    use axum::Router;

    async fn listing(
        Path((_owner, _repo, path)): Path<(String, String, String)>,
        headers: HeaderMap,
    ) -> Response {
        match path.as_str() {
            "public/imgs" => (
                [("content-type", "application/json")],
                r#"[{"name":"art","type":"dir"},{"name":"a.png","type":"file","size":3}]"#,
            )
                .into_response(),
            "public/imgs/t-恤 收集" => (
                [("content-type", "application/json")],
                r#"[{"name":"teeth_卡通.jpg","type":"file"}]"#,
            )
                .into_response(),
            "single" => r#"{"name":"single","type":"file"}"#.into_response(),
            "private" => {
                let authorized = headers
                    .get("authorization")
                    .and_then(|v| v.to_str().ok())
                    .map(|v| v == "Bearer secret")
                    .unwrap_or(false);
                if authorized {
                    "[]".into_response()
                } else {
                    StatusCode::UNAUTHORIZED.into_response()
                }
            }
            "slow" => {
                tokio::time::sleep(Duration::from_secs(2)).await;
                "[]".into_response()
            }
            _ => StatusCode::NOT_FOUND.into_response(),
        }
    }

    async fn spawn_api() -> String {
        let router = Router::new().route("/repos/{owner}/{repo}/contents/{*path}", get(listing));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}", addr)
    }

    fn client_for(api_base: &str) -> ContentsClient {
        let mut config = ContentsConfig::new("owner", "repo");
        config.api_base = api_base.to_string();
        config.timeout = Duration::from_millis(300);
        ContentsClient::new(config).unwrap()
    }

    #[test]
    fn test_encode_segments() {
        assert_eq!(encode_segments(&["public", "imgs"]), "public/imgs");
        assert_eq!(encode_segments(&["a b", "c/d"]), "a%20b/c%2Fd");
        assert_eq!(encode_segments(&["t-恤"]), "t-%E6%81%A4");
    }

    #[test]
    fn test_listing_url() {
        let client = client_for("https://api.example.com/");
        assert_eq!(
            client.listing_url(&["public", "imgs", "my art"]),
            "https://api.example.com/repos/owner/repo/contents/public/imgs/my%20art?ref=main"
        );
    }

    #[tokio::test]
    async fn test_list_directory() {
        let base = spawn_api().await;
        let client = client_for(&base);

        let entries = client.list_directory(&["public", "imgs"]).await.unwrap();
        assert_eq!(entries.len(), 2);
        assert!(entries[0].is_dir());
        assert_eq!(entries[1].name, "a.png");
    }

    #[tokio::test]
    async fn test_list_directory_non_ascii_segment() {
        let base = spawn_api().await;
        let client = client_for(&base);

        let entries = client
            .list_directory(&["public", "imgs", "t-恤 收集"])
            .await
            .unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].name, "teeth_卡通.jpg");
    }

    #[tokio::test]
    async fn test_non_success_status() {
        let base = spawn_api().await;
        let client = client_for(&base);

        let err = client.list_directory(&["missing"]).await.unwrap_err();
        assert!(matches!(err, ContentsError::Status(404)));
    }

    #[tokio::test]
    async fn test_file_path_is_malformed_listing() {
        let base = spawn_api().await;
        let client = client_for(&base);

        let err = client.list_directory(&["single"]).await.unwrap_err();
        assert!(matches!(err, ContentsError::Json(_)));
    }

    #[tokio::test]
    async fn test_bearer_token_is_sent() {
        let base = spawn_api().await;

        let err = client_for(&base)
            .list_directory(&["private"])
            .await
            .unwrap_err();
        assert!(matches!(err, ContentsError::Status(401)));

        let mut config = ContentsConfig::new("owner", "repo");
        config.api_base = base;
        config.token = Some("secret".to_string());
        let client = ContentsClient::new(config).unwrap();
        assert!(client.list_directory(&["private"]).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_timeout() {
        let base = spawn_api().await;
        let client = client_for(&base);

        let err = client.list_directory(&["slow"]).await.unwrap_err();
        assert!(err.is_timeout());
    }
}
