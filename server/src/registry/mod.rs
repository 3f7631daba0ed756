//! エンドポイント登録管理
//!
//! モックするエンドポイントと受信リクエストをメモリ内で管理

use crate::error::MockResult;
use mockingjay_common::types::{FakeEndpoint, ReceivedRequest};
use std::sync::Arc;
use tokio::sync::RwLock;

/// エンドポイントレジストリ
///
/// Endpoints keep their declaration order; the first match wins.
#[derive(Clone, Default)]
pub struct EndpointRegistry {
    endpoints: Arc<RwLock<Vec<FakeEndpoint>>>,
}

impl EndpointRegistry {
    /// 新しいレジストリを作成
    pub fn new(endpoints: Vec<FakeEndpoint>) -> Self {
        Self {
            endpoints: Arc::new(RwLock::new(endpoints)),
        }
    }

    /// Validates and appends an endpoint
    pub async fn add(&self, endpoint: FakeEndpoint) -> MockResult<()> {
        endpoint.validate()?;
        let mut endpoints = self.endpoints.write().await;
        endpoints.push(endpoint);
        Ok(())
    }

    /// 全エンドポイントを取得
    pub async fn list(&self) -> Vec<FakeEndpoint> {
        self.endpoints.read().await.clone()
    }

    /// First endpoint whose request descriptor matches `received`
    pub async fn find_match(&self, received: &ReceivedRequest) -> Option<FakeEndpoint> {
        let endpoints = self.endpoints.read().await;
        endpoints
            .iter()
            .find(|endpoint| endpoint.request.matches(received))
            .cloned()
    }
}

/// 受信リクエストの記録
#[derive(Clone, Default)]
pub struct RequestLog {
    requests: Arc<RwLock<Vec<ReceivedRequest>>>,
}

impl RequestLog {
    /// 空の記録を作成
    pub fn new() -> Self {
        Self::default()
    }

    /// リクエストを記録
    pub async fn record(&self, request: ReceivedRequest) {
        self.requests.write().await.push(request);
    }

    /// 到着順の全リクエスト
    pub async fn list(&self) -> Vec<ReceivedRequest> {
        self.requests.read().await.clone()
    }
}
