//! APIエラーレスポンス型
//!
//! axum用の共通エラーハンドリング

use crate::error::MockError;
use axum::{response::IntoResponse, Json};
use mockingjay_common::error::CommonError;
use serde_json::json;

/// Axum用のエラーレスポンス型
#[derive(Debug)]
pub struct AppError(pub MockError);

impl<E> From<E> for AppError
where
    E: Into<MockError>,
{
    fn from(err: E) -> Self {
        AppError(err.into())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        tracing::warn!(error = %self.0, "Request failed");

        // Validation and JSON errors carry the offending detail
        let message = match &self.0 {
            MockError::Common(CommonError::Validation(detail)) => detail.clone(),
            MockError::Common(CommonError::Serialization(detail)) => detail.to_string(),
            other => other.external_message().to_string(),
        };

        let payload = json!({
            "error": message
        });

        (self.0.status_code(), Json(payload)).into_response()
    }
}
