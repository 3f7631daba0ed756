//! check サブコマンド
//!
//! エンドポイント定義を実サーバーに対して検証します。

use crate::compatibility::CompatibilityChecker;
use anyhow::Context;
use clap::Args;
use mockingjay_common::config::{load_endpoints, CheckerConfig};
use std::path::PathBuf;

/// check サブコマンドの引数
#[derive(Args, Debug, Clone)]
pub struct CheckArgs {
    /// Endpoints YAML file
    #[arg(short, long, env = "MOCKINGJAY_CONFIG")]
    pub config: PathBuf,

    /// Base URL of the real server, e.g. http://localhost:8080
    #[arg(short, long, env = "MOCKINGJAY_REAL_URL")]
    pub real_url: String,

    /// Maximum number of requests in flight
    #[arg(long, default_value = "4", env = "MOCKINGJAY_CHECK_CONCURRENCY")]
    pub concurrency: usize,

    /// Per-request timeout in seconds
    #[arg(long, default_value = "5", env = "MOCKINGJAY_CHECK_TIMEOUT_SECS")]
    pub timeout_secs: u64,

    /// Also compare declared response headers
    #[arg(long, default_value_t = false)]
    pub check_headers: bool,
}

impl CheckArgs {
    fn checker_config(&self) -> CheckerConfig {
        CheckerConfig {
            concurrency: self.concurrency,
            timeout_secs: self.timeout_secs,
            check_headers: self.check_headers,
        }
    }
}

/// Execute the check command
///
/// Returns whether every endpoint was compatible. Configuration errors are
/// returned before any request is sent.
pub async fn execute(args: &CheckArgs) -> Result<bool, anyhow::Error> {
    let endpoints = load_endpoints(&args.config)
        .with_context(|| format!("loading endpoints from {}", args.config.display()))?;

    let checker = CompatibilityChecker::from_config(endpoints, &args.checker_config())?;
    let report = checker.check(&args.real_url).await;

    println!("{}", report);
    Ok(report.is_compatible())
}
