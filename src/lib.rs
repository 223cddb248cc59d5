//! # release-ratelimit
//!
//! Per-identity token-bucket admission control for the release distribution
//! gateway.
//!
//! Every caller is resolved to a key (its verified principal, or its client
//! address when anonymous) and charged one token per request against a
//! bucket owned by that key. Buckets refill continuously, idle ones are
//! evicted in the background, and the HTTP middleware reports the quota on
//! every response.
//!
//! ## Using the limiter directly
//!
//! ```rust,no_run
//! use release_ratelimit::{RateLimiter, TierLimits};
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let limiter = RateLimiter::new(TierLimits::new(60, 10, Duration::from_secs(60)))?;
//!
//!     let info = limiter.allow("203.0.113.9");
//!     if !info.allowed {
//!         println!("retry in {:?}s", info.retry_after_secs());
//!     }
//!
//!     limiter.close();
//!     Ok(())
//! }
//! ```
//!
//! ## Gateway Mode
//!
//! ```rust,no_run
//! use release_ratelimit::{Config, Gateway};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::from_file("config/gateway.yaml").await?;
//!     let gateway = Gateway::new(config)?;
//!     gateway.run().await?;
//!     Ok(())
//! }
//! ```

#![allow(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_inception)]

pub mod config;
pub mod core;
pub mod server;
pub mod utils;

// Re-export main types
pub use config::{Config, RateLimitConfig, TierLimits};
pub use core::rate_limiter::{RateLimitInfo, RateLimiter, Tier, TieredRateLimiter};
pub use server::middleware::{Principal, RateLimitMiddleware};
pub use utils::error::{GatewayError, Result};

use tracing::info;

/// The gateway: configuration plus the HTTP server it drives
pub struct Gateway {
    config: Config,
    server: server::HttpServer,
}

impl Gateway {
    /// Create a new gateway instance
    pub fn new(config: Config) -> Result<Self> {
        info!("Creating new gateway instance");

        let server = server::HttpServer::new(&config)?;

        Ok(Self { config, server })
    }

    /// Run the gateway server
    pub async fn run(self) -> Result<()> {
        info!("Starting release gateway");
        info!("Configuration: {:#?}", self.config);

        self.server.start().await
    }
}

// Version information
/// Current version of the crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
/// Name of the crate
pub const NAME: &str = env!("CARGO_PKG_NAME");
/// Description of the crate
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");

/// Gateway build information
#[derive(Debug, Clone)]
pub struct BuildInfo {
    /// Version number
    pub version: &'static str,
    /// Build time, seconds since the epoch
    pub build_time: &'static str,
    /// Git commit hash
    pub git_hash: &'static str,
}

impl Default for BuildInfo {
    fn default() -> Self {
        Self {
            version: VERSION,
            build_time: env!("RELEASE_GATEWAY_BUILD_TIME"),
            git_hash: env!("RELEASE_GATEWAY_GIT_HASH"),
        }
    }
}

/// Build
pub fn build_info() -> BuildInfo {
    BuildInfo::default()
}
