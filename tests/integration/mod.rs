//! Integration tests for release-ratelimit
//!
//! These tests exercise the crate through its public API only.

pub mod config_tests;
pub mod gateway_tests;
pub mod rate_limiter_tests;
