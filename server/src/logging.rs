//! ロギング初期化
//!
//! `MOCKINGJAY_LOG_LEVEL`（未設定時は `RUST_LOG`）からフィルタを構築する。

use crate::config::get_env_with_fallback_or;
use tracing_subscriber::EnvFilter;

/// Default filter directive
const DEFAULT_LOG_LEVEL: &str = "info";

/// Builds the filter from the environment, falling back to `info` when the
/// configured directive does not parse.
pub fn env_filter() -> EnvFilter {
    let level = get_env_with_fallback_or("MOCKINGJAY_LOG_LEVEL", "RUST_LOG", DEFAULT_LOG_LEVEL);
    EnvFilter::try_new(&level).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_LEVEL))
}

/// Installs the global tracing subscriber.
pub fn init() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(std::io::stderr)
        .try_init()
}
