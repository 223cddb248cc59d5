//! Error types for the gateway

use thiserror::Error;

/// Result type alias for the gateway
pub type Result<T> = std::result::Result<T, GatewayError>;

/// Main error type for the gateway
#[derive(Error, Debug)]
pub enum GatewayError {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Request denied by admission control
    #[error("Rate limit exceeded")]
    RateLimit {
        /// Whole seconds until a token is available, at least one
        retry_after_secs: u64,
        /// Caller-supplied `x-request-id`, echoed in the error body
        request_id: Option<String>,
    },

    /// Internal server errors
    #[error("Internal server error: {0}")]
    Internal(String),
}
