//! serve サブコマンド
//!
//! 設定ファイルのエンドポイントをモックサーバーとして起動します。

use crate::compatibility::CompatibilityChecker;
use crate::monkey::Monkey;
use crate::{server, AppState};
use anyhow::Context;
use clap::Args;
use mockingjay_common::config::{load_endpoints, load_monkey_config, ServerConfig};
use std::path::PathBuf;
use tracing::{info, warn};

/// serve サブコマンドの引数
#[derive(Args, Debug, Clone)]
pub struct ServeArgs {
    /// Endpoints YAML file
    #[arg(short, long, env = "MOCKINGJAY_CONFIG")]
    pub config: PathBuf,

    /// Behaviour profiles YAML file (chaos monkey)
    #[arg(short, long, env = "MOCKINGJAY_MONKEY_CONFIG")]
    pub monkey_config: Option<PathBuf>,

    /// Listen port
    #[arg(short, long, default_value = "9090", env = "MOCKINGJAY_PORT")]
    pub port: u16,

    /// Bind address
    #[arg(short = 'H', long, default_value = "0.0.0.0", env = "MOCKINGJAY_HOST")]
    pub host: String,

    /// Check the endpoints against this real server once at startup
    #[arg(long, env = "MOCKINGJAY_REAL_URL")]
    pub real_url: Option<String>,
}

/// Execute the serve command
pub async fn execute(args: &ServeArgs) -> Result<(), anyhow::Error> {
    let endpoints = load_endpoints(&args.config)
        .with_context(|| format!("loading endpoints from {}", args.config.display()))?;
    info!(count = endpoints.len(), "Endpoints loaded");

    let profiles = load_monkey_config(args.monkey_config.as_deref())
        .context("loading monkey config")?;
    let monkey = Monkey::new(profiles);
    monkey.log_profiles();

    if let Some(real_url) = &args.real_url {
        let checker = CompatibilityChecker::new(endpoints.clone())?;
        let report = checker.check(real_url).await;
        if report.is_compatible() {
            info!(real_url = %real_url, "Endpoints are compatible with the real server");
        } else {
            warn!(
                real_url = %real_url,
                failures = report.failures().count(),
                "Endpoints are NOT compatible with the real server"
            );
        }
    }

    let config = ServerConfig {
        host: args.host.clone(),
        port: args.port,
    };
    let state = AppState::new(endpoints, monkey);
    server::run(state, &config.bind_addr()).await?;
    Ok(())
}
