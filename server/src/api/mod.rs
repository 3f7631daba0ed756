//! REST APIハンドラー
//!
//! 予約済みの管理ルートと、それ以外の全リクエストを処理するモックハンドラー

pub mod endpoints;
pub mod error;
pub mod mock;

use crate::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

/// APIルーターを作成
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/requests", get(endpoints::list_requests))
        .route("/mj-endpoints", get(endpoints::list_endpoints))
        .route("/mj-new-endpoint", post(endpoints::add_endpoint))
        .fallback(mock::serve_mock)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
