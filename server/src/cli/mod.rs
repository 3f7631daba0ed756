//! CLI module for mockingjay
//!
//! Provides the command-line interface for serving mocks and checking them
//! against a real server.

pub mod check;
pub mod serve;

use clap::{Parser, Subcommand};

/// Mockingjay - fake HTTP server with consumer-driven compatibility checks
#[derive(Parser, Debug)]
#[command(name = "mockingjay")]
#[command(version, about, long_about = None)]
#[command(after_help = r#"ENVIRONMENT VARIABLES:
    MOCKINGJAY_HOST                Bind address (default: 0.0.0.0)
    MOCKINGJAY_PORT                Listen port (default: 9090)
    MOCKINGJAY_CONFIG              Endpoints YAML file
    MOCKINGJAY_MONKEY_CONFIG       Behaviour profiles YAML file
    MOCKINGJAY_REAL_URL            Base URL of the real server
    MOCKINGJAY_CHECK_CONCURRENCY   Concurrent compatibility requests (default: 4)
    MOCKINGJAY_CHECK_TIMEOUT_SECS  Per-request timeout in seconds (default: 5)
    MOCKINGJAY_LOG_LEVEL           Log level (default: info, falls back to RUST_LOG)
"#)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Serve the configured endpoints
    Serve(serve::ServeArgs),
    /// Check the configured endpoints against a real server
    Check(check::CheckArgs),
}
