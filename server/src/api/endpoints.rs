//! 管理APIハンドラー
//!
//! - `GET /requests`: 受信リクエスト一覧
//! - `GET /mj-endpoints`: 登録済みエンドポイント一覧
//! - `POST /mj-new-endpoint`: エンドポイントの追加

use crate::api::error::AppError;
use crate::AppState;
use axum::{body::Bytes, extract::State, http::StatusCode, Json};
use mockingjay_common::error::CommonError;
use mockingjay_common::types::{FakeEndpoint, ReceivedRequest};
use tracing::info;

/// GET /requests - 受信リクエスト一覧（到着順）
pub async fn list_requests(State(state): State<AppState>) -> Json<Vec<ReceivedRequest>> {
    Json(state.requests.list().await)
}

/// GET /mj-endpoints - 登録済みエンドポイント一覧
pub async fn list_endpoints(State(state): State<AppState>) -> Json<Vec<FakeEndpoint>> {
    Json(state.registry.list().await)
}

/// POST /mj-new-endpoint - エンドポイント追加
///
/// The body is parsed here rather than through the `Json` extractor so that
/// malformed input is a 400 regardless of the request's content-type.
pub async fn add_endpoint(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<(StatusCode, Json<FakeEndpoint>), AppError> {
    let endpoint: FakeEndpoint = serde_json::from_slice(&body).map_err(CommonError::from)?;
    state.registry.add(endpoint.clone()).await?;

    info!(endpoint = %endpoint, "Endpoint added");
    Ok((StatusCode::CREATED, Json(endpoint)))
}
