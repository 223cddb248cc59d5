//! Application state shared across HTTP handlers

use crate::config::Config;
use crate::core::rate_limiter::TieredRateLimiter;
use crate::utils::error::Result;
use std::sync::Arc;

/// HTTP server state shared across handlers
///
/// The limiters are shared by every worker so that a caller's quota is
/// global to the process, not per worker thread.
#[derive(Clone, Debug)]
pub struct AppState {
    /// Gateway configuration (shared read-only)
    pub config: Arc<Config>,
    /// Per-tier admission control
    pub limiters: TieredRateLimiter,
}

impl AppState {
    /// Build state from configuration; needs a running Tokio runtime
    pub fn new(config: Config) -> Result<Self> {
        let limiters = TieredRateLimiter::from_config(config.rate_limit())?;
        Ok(Self {
            config: Arc::new(config),
            limiters,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn rate_limiting_enabled(&self) -> bool {
        self.config.rate_limit().enabled
    }
}
