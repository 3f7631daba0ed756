//! Mockingjay Server
//!
//! 設定されたエンドポイントを返すモックHTTPサーバーと、
//! 実サーバーとの互換性チェッカー

#![warn(missing_docs)]

/// REST APIハンドラー
pub mod api;

/// CLIインターフェース
pub mod cli;

/// 実サーバーとの互換性チェック
pub mod compatibility;

/// 設定管理（環境変数ヘルパー）
pub mod config;

/// エラー型
pub mod error;

/// ロギング初期化ユーティリティ
pub mod logging;

/// 障害注入（chaos monkey）
pub mod monkey;

/// エンドポイント登録と受信リクエストの記録
pub mod registry;

/// axumサーバー起動・シャットダウン
pub mod server;

/// アプリケーション状態
#[derive(Clone)]
pub struct AppState {
    /// エンドポイントレジストリ
    pub registry: registry::EndpointRegistry,
    /// 受信リクエストの記録
    pub requests: registry::RequestLog,
    /// レスポンスに障害を注入するモンキー
    pub monkey: monkey::Monkey,
}

impl AppState {
    /// Builds state serving `endpoints`, perturbed by `monkey`.
    pub fn new(
        endpoints: Vec<mockingjay_common::types::FakeEndpoint>,
        monkey: monkey::Monkey,
    ) -> Self {
        Self {
            registry: registry::EndpointRegistry::new(endpoints),
            requests: registry::RequestLog::new(),
            monkey,
        }
    }
}
