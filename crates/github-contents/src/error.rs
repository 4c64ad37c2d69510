//! Error types for the contents client

use std::fmt;

/// Errors that can occur when listing repository contents
#[derive(Debug)]
pub enum ContentsError {
    /// Transport failure, including request timeouts
    Http(reqwest::Error),
    /// The API answered with a non-success status
    Status(u16),
    /// The payload was not a directory listing
    Json(serde_json::Error),
}

impl ContentsError {
    /// Whether the request was abandoned because it exceeded the client timeout
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Http(e) if e.is_timeout())
    }
}

impl fmt::Display for ContentsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Http(e) => write!(f, "Contents HTTP error: {}", e),
            Self::Status(code) => write!(f, "Contents API returned status {}", code),
            Self::Json(e) => write!(f, "Contents JSON parse error: {}", e),
        }
    }
}

impl std::error::Error for ContentsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Http(e) => Some(e),
            Self::Json(e) => Some(e),
            Self::Status(_) => None,
        }
    }
}

impl From<reqwest::Error> for ContentsError {
    fn from(e: reqwest::Error) -> Self {
        Self::Http(e)
    }
}

impl From<serde_json::Error> for ContentsError {
    fn from(e: serde_json::Error) -> Self {
        Self::Json(e)
    }
}

/// Result type for contents API operations
pub type Result<T> = std::result::Result<T, ContentsError>;
