//! 設定管理
//!
//! ServerConfig, CheckerConfig等の設定構造体と、YAML設定ファイルの読み込み

use crate::behaviour::BehaviourProfile;
use crate::error::{CommonError, CommonResult};
use crate::types::FakeEndpoint;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Mock server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// ホストアドレス (デフォルト: "0.0.0.0")
    #[serde(default = "default_host")]
    pub host: String,

    /// ポート番号 (デフォルト: 9090)
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    9090
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl ServerConfig {
    /// `host:port` for binding
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Compatibility checker settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckerConfig {
    /// 同時実行数 (デフォルト: 4)
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,

    /// リクエストタイムアウト（秒）(デフォルト: 5)
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Compare declared response headers as well (デフォルト: false)
    #[serde(default)]
    pub check_headers: bool,
}

fn default_concurrency() -> usize {
    4
}

fn default_timeout_secs() -> u64 {
    5
}

impl Default for CheckerConfig {
    fn default() -> Self {
        Self {
            concurrency: default_concurrency(),
            timeout_secs: default_timeout_secs(),
            check_headers: false,
        }
    }
}

/// Parses and validates a YAML list of endpoints.
pub fn parse_endpoints(data: &str) -> CommonResult<Vec<FakeEndpoint>> {
    let endpoints: Vec<FakeEndpoint> = serde_yaml::from_str(data)?;
    for endpoint in &endpoints {
        endpoint.validate()?;
    }
    Ok(endpoints)
}

/// Reads an endpoints file.
pub fn load_endpoints(path: impl AsRef<Path>) -> CommonResult<Vec<FakeEndpoint>> {
    let path = path.as_ref();
    let data = std::fs::read_to_string(path).map_err(|e| {
        CommonError::Config(format!(
            "failed to read endpoints file {}: {}",
            path.display(),
            e
        ))
    })?;
    parse_endpoints(&data)
}

/// Parses a YAML list of behaviour profiles.
///
/// An empty document yields no profiles.
pub fn parse_monkey_config(data: &str) -> CommonResult<Vec<BehaviourProfile>> {
    if data.trim().is_empty() {
        return Ok(Vec::new());
    }
    Ok(serde_yaml::from_str(data)?)
}

/// Reads a monkey config file; `None` means no profiles.
pub fn load_monkey_config(path: Option<&Path>) -> CommonResult<Vec<BehaviourProfile>> {
    let Some(path) = path else {
        return Ok(Vec::new());
    };
    let data = std::fs::read_to_string(path).map_err(|e| {
        CommonError::Config(format!(
            "failed to read monkey config {}: {}",
            path.display(),
            e
        ))
    })?;
    parse_monkey_config(&data)
}
