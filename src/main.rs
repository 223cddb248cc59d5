//! release-gateway - rate-limited update distribution front end

#![allow(missing_docs)]

use clap::Parser;
use release_ratelimit::server;
use release_ratelimit::utils::logging::{LogFormat, init_logging};
use std::path::PathBuf;
use std::process::ExitCode;

/// Command line arguments
#[derive(Debug, Parser)]
#[command(name = "release-gateway", version, about)]
struct Args {
    /// Path to the YAML configuration file
    #[arg(short, long, env = "GATEWAY_CONFIG")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    if let Err(e) = init_logging(LogFormat::from_env()) {
        eprintln!("Error: {}", e);
        return ExitCode::FAILURE;
    }

    match server::builder::run_server(args.config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            // Display keeps multi-line config errors readable
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
