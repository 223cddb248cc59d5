//! Utility modules for the gateway
//!
//! - **error**: error types and the JSON error envelope
//! - **logging**: `tracing` subscriber setup

pub mod error;
pub mod logging;

pub use error::{ErrorResponse, GatewayError, Result};
