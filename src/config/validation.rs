//! Configuration validation
//!
//! This module provides validation logic for the configuration structures.
//! Validators return a plain message; `Config::validate` wraps it into a
//! `GatewayError::Config` with the failing section.

use super::models::*;
use std::time::{Duration, Instant};

/// Trait for validating configuration sections
pub trait Validate {
    fn validate(&self) -> Result<(), String>;
}

impl Validate for GatewayConfig {
    fn validate(&self) -> Result<(), String> {
        self.server.validate()?;
        self.rate_limit.validate()?;
        Ok(())
    }
}

impl Validate for ServerConfig {
    fn validate(&self) -> Result<(), String> {
        if self.host.trim().is_empty() {
            return Err("Server host cannot be empty".to_string());
        }

        if self.port == 0 {
            return Err("Server port cannot be 0".to_string());
        }

        if self.workers == Some(0) {
            return Err("Worker count must be greater than 0".to_string());
        }

        Ok(())
    }
}

impl Validate for TierLimits {
    fn validate(&self) -> Result<(), String> {
        if self.requests_per_minute == 0 {
            return Err("Requests per minute must be greater than 0".to_string());
        }

        if self.burst == 0 {
            return Err("Burst must be greater than 0".to_string());
        }

        if self.cleanup_interval == Duration::ZERO {
            return Err("Cleanup interval must be greater than 0".to_string());
        }

        // Eviction deadlines are computed as now + 2 x interval
        let max_idle = self.cleanup_interval.saturating_mul(2);
        if Instant::now().checked_add(max_idle).is_none() {
            return Err(format!(
                "Cleanup interval of {}s is too large",
                self.cleanup_interval.as_secs()
            ));
        }

        Ok(())
    }
}

impl Validate for RateLimitConfig {
    fn validate(&self) -> Result<(), String> {
        self.anonymous_tier()
            .validate()
            .map_err(|e| format!("anonymous tier: {}", e))?;

        self.authenticated_tier()
            .validate()
            .map_err(|e| format!("authenticated tier: {}", e))?;

        Ok(())
    }
}
