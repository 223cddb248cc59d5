//! Server builder and run_server function
//!
//! This module provides the ServerBuilder for programmatic setup and the
//! run_server function used by the binary.

use crate::config::Config;
use crate::server::server::HttpServer;
use crate::utils::error::{GatewayError, Result};
use std::path::PathBuf;
use tracing::info;

/// Server builder for easier configuration
#[derive(Debug, Default)]
pub struct ServerBuilder {
    config: Option<Config>,
}

impl ServerBuilder {
    /// Create a new server builder
    pub fn new() -> Self {
        Self { config: None }
    }

    /// Set configuration
    pub fn with_config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Build the HTTP server
    pub fn build(self) -> Result<HttpServer> {
        let config = self
            .config
            .ok_or_else(|| GatewayError::Config("Configuration is required".to_string()))?;

        HttpServer::new(&config)
    }
}

/// Load configuration from a file when given, environment otherwise
pub async fn load_config(config_path: Option<PathBuf>) -> Result<Config> {
    match config_path {
        Some(path) => {
            info!("Loading configuration file: {}", path.display());
            Config::from_file(&path).await?.with_env_overrides()
        }
        None => {
            info!("No configuration file given, using defaults and environment");
            Config::from_env()
        }
    }
}

/// Run the server until it is stopped
pub async fn run_server(config_path: Option<PathBuf>) -> Result<()> {
    info!("Starting release gateway v{}", crate::VERSION);

    let config = load_config(config_path).await?;
    let rate_limit = config.rate_limit();
    info!(
        enabled = rate_limit.enabled,
        requests_per_minute = rate_limit.requests_per_minute,
        burst = rate_limit.burst,
        "Rate limiting configured"
    );

    let server = ServerBuilder::new().with_config(config).build()?;
    info!("Server starting at: http://{}", server.config().address());
    info!("   GET  /health       - Health check (not rate limited)");
    info!("   GET  /api/v1/ping  - Rate-limited probe");

    server.start().await
}
