//! Helper functions for creating specific error types

use super::types::GatewayError;

impl GatewayError {
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config(message.into())
    }

    pub fn rate_limit(retry_after_secs: u64, request_id: Option<String>) -> Self {
        Self::RateLimit {
            retry_after_secs: retry_after_secs.max(1),
            request_id,
        }
    }

    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal(message.into())
    }

    /// Server errors are reported as internal errors
    pub fn server<S: Into<String>>(message: S) -> Self {
        Self::Internal(message.into())
    }

    /// Machine-readable code used in the JSON error envelope
    pub fn code(&self) -> &'static str {
        match self {
            GatewayError::Config(_) => "CONFIG_ERROR",
            GatewayError::Yaml(_) => "SERIALIZATION_ERROR",
            GatewayError::Io(_) => "IO_ERROR",
            GatewayError::RateLimit { .. } => "RATE_LIMIT_EXCEEDED",
            GatewayError::Internal(_) => "INTERNAL_ERROR",
        }
    }
}
