//! Core admission-control engine

pub mod rate_limiter;
