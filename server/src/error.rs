//! エラー型定義
//!
//! サーバー層の統一エラー型（thiserror使用）

use axum::http::StatusCode;
use mockingjay_common::error::CommonError;
use thiserror::Error;

/// Server error type
#[derive(Debug, Error)]
pub enum MockError {
    /// Common layer error (configuration, parsing, validation)
    #[error(transparent)]
    Common(#[from] CommonError),

    /// No registered endpoint matches a request
    #[error("{0}")]
    NotFound(String),

    /// HTTP client error
    #[error("HTTP client error: {0}")]
    Http(reqwest::Error),

    /// Outbound request exceeded its timeout
    #[error("Request timed out: {0}")]
    Timeout(reqwest::Error),

    /// Listener / socket error
    #[error("Internal error: {0}")]
    Internal(#[from] std::io::Error),
}

impl From<reqwest::Error> for MockError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            Self::Timeout(error)
        } else {
            Self::Http(error)
        }
    }
}

impl MockError {
    /// Returns a short message safe to send to clients.
    ///
    /// The `Display` implementation keeps the full details for logs.
    pub fn external_message(&self) -> &'static str {
        match self {
            Self::Common(CommonError::Validation(_)) => "Invalid endpoint definition",
            Self::Common(CommonError::Serialization(_)) => "Malformed JSON",
            Self::Common(_) => "Request error",
            Self::NotFound(_) => "Not found",
            Self::Http(_) => "Backend service unavailable",
            Self::Timeout(_) => "Backend request timed out",
            Self::Internal(_) => "Internal server error",
        }
    }

    /// Returns the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Common(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Http(_) => StatusCode::BAD_GATEWAY,
            Self::Timeout(_) => StatusCode::GATEWAY_TIMEOUT,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Result type alias (Server)
pub type MockResult<T> = Result<T, MockError>;
