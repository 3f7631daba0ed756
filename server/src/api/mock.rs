//! モックレスポンスハンドラー
//!
//! 予約ルート以外の全リクエストを記録し、登録済みエンドポイントと照合する。

use crate::error::MockError;
use crate::monkey::CannedResponse;
use crate::AppState;
use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, Method, Uri},
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;
use mockingjay_common::types::{Headers, ReceivedRequest};
use serde_json::json;
use tracing::{debug, info};

fn received_request(
    method: &Method,
    uri: &Uri,
    headers: &HeaderMap,
    body: &Bytes,
) -> ReceivedRequest {
    let uri = uri
        .path_and_query()
        .map(|path_and_query| path_and_query.as_str().to_string())
        .unwrap_or_else(|| uri.path().to_string());

    let headers: Headers = headers
        .iter()
        .filter_map(|(name, value)| {
            value
                .to_str()
                .ok()
                .map(|value| (name.as_str().to_string(), value.to_string()))
        })
        .collect();

    ReceivedRequest {
        uri,
        method: method.as_str().to_string(),
        headers,
        body: String::from_utf8_lossy(body).into_owned(),
        received_at: Utc::now(),
    }
}

/// Fallback handler: answers with the first matching endpoint's response,
/// perturbed by the monkey, or 404 when nothing matches.
pub async fn serve_mock(
    State(state): State<AppState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let received = received_request(&method, &uri, &headers, &body);
    state.requests.record(received.clone()).await;

    match state.registry.find_match(&received).await {
        Some(endpoint) => {
            debug!(endpoint = %endpoint, "Serving mock response");
            state
                .monkey
                .apply(CannedResponse::from(&endpoint))
                .await
                .into_response()
        }
        None => {
            info!(
                method = %received.method,
                uri = %received.uri,
                "No endpoint matched request"
            );
            let error = MockError::NotFound(format!(
                "No endpoint matches {} {}",
                received.method, received.uri
            ));
            let payload = json!({
                "error": error.to_string(),
                "request": received,
            });
            (error.status_code(), Json(payload)).into_response()
        }
    }
}
