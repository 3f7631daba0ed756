//! Mockingjay Server Entry Point

use clap::Parser;
use mockingjay_server::cli::{check, serve, Cli, Commands};
use mockingjay_server::logging;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = logging::init() {
        eprintln!("Failed to initialize logging: {}", e);
    }

    match cli.command {
        Commands::Serve(args) => {
            if let Err(e) = serve::execute(&args).await {
                eprintln!("Error: {:#}", e);
                std::process::exit(1);
            }
        }
        Commands::Check(args) => match check::execute(&args).await {
            Ok(true) => {}
            Ok(false) => std::process::exit(1),
            Err(e) => {
                eprintln!("Error: {:#}", e);
                std::process::exit(2);
            }
        },
    }
}
