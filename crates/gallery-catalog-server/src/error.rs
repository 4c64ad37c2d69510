//! Error types for the gallery catalog server

use axum::extract::rejection::QueryRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use std::fmt;

/// Startup failures
#[derive(Debug)]
pub enum ServerError {
    Config(String),
    Contents(github_contents::ContentsError),
    Io(Box<std::io::Error>),
}

impl fmt::Display for ServerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServerError::Config(msg) => write!(f, "Configuration error: {}", msg),
            ServerError::Contents(err) => write!(f, "Remote backend error: {}", err),
            ServerError::Io(err) => write!(f, "IO error: {}", err),
        }
    }
}

impl std::error::Error for ServerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ServerError::Contents(err) => Some(err),
            ServerError::Io(err) => Some(err.as_ref()),
            ServerError::Config(_) => None,
        }
    }
}

impl From<github_contents::ContentsError> for ServerError {
    fn from(err: github_contents::ContentsError) -> Self {
        ServerError::Contents(err)
    }
}

impl From<std::io::Error> for ServerError {
    fn from(err: std::io::Error) -> Self {
        ServerError::Io(Box::new(err))
    }
}

impl From<tracing_subscriber::filter::ParseError> for ServerError {
    fn from(err: tracing_subscriber::filter::ParseError) -> Self {
        ServerError::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ServerError>;

/// Request failures, rendered as `{ "error": message }`
#[derive(Debug)]
pub enum AppError {
    BadRequest(String),
    /// The message is returned to the caller; log details before constructing it
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        (status, axum::Json(json!({ "error": message }))).into_response()
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display() {
        let err = ServerError::Config("missing IMAGE_ROOT".to_string());
        assert_eq!(err.to_string(), "Configuration error: missing IMAGE_ROOT");
    }

    #[test]
    fn test_io_error_has_source() {
        let err = ServerError::from(std::io::Error::new(
            std::io::ErrorKind::AddrInUse,
            "port taken",
        ));
        assert!(err.to_string().contains("port taken"));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_app_error_status() {
        let response = AppError::BadRequest("Folder parameter is required".into()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = AppError::Internal("Failed to read images".into()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
