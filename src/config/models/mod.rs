//! Configuration data models
//!
//! This module defines the configuration structures of the gateway.

pub mod gateway;
pub mod rate_limit;
pub mod server;

pub use gateway::*;
pub use rate_limit::*;
pub use server::*;

/// Default values for configuration
pub fn default_host() -> String {
    "0.0.0.0".to_string()
}

/// Default server port
pub fn default_port() -> u16 {
    8000
}

/// Default anonymous requests per minute
pub fn default_rpm() -> u32 {
    60
}

/// Default anonymous burst capacity
pub fn default_burst() -> u32 {
    10
}

/// Default idle-bucket cleanup interval in seconds
pub fn default_cleanup_interval_secs() -> u64 {
    60
}

pub fn default_rate_limit_enabled() -> bool {
    true
}
