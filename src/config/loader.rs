//! Environment overrides
//!
//! Values read from the environment take precedence over the configuration
//! file. Unparsable values are configuration errors rather than being ignored.

use super::models::GatewayConfig;
use crate::utils::error::{GatewayError, Result};
use std::str::FromStr;
use tracing::debug;

impl GatewayConfig {
    /// Apply overrides from the process environment
    pub fn apply_env_overrides(&mut self) -> Result<()> {
        self.apply_overrides(|name| std::env::var(name).ok())
    }

    /// Apply overrides using `lookup` to resolve variable names
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup("GATEWAY_HOST") {
            self.server.host = host;
        }
        if let Some(port) = parse_var(&lookup, "GATEWAY_PORT")? {
            self.server.port = port;
        }
        if let Some(workers) = parse_var(&lookup, "GATEWAY_WORKERS")? {
            self.server.workers = Some(workers);
        }

        let rate_limit = &mut self.rate_limit;
        if let Some(enabled) = parse_var(&lookup, "RATE_LIMIT_ENABLED")? {
            rate_limit.enabled = enabled;
        }
        if let Some(rpm) = parse_var(&lookup, "RATE_LIMIT_RPM")? {
            rate_limit.requests_per_minute = rpm;
        }
        if let Some(burst) = parse_var(&lookup, "RATE_LIMIT_BURST")? {
            rate_limit.burst = burst;
        }
        if let Some(rpm) = parse_var(&lookup, "RATE_LIMIT_AUTH_RPM")? {
            rate_limit.authenticated_requests_per_minute = Some(rpm);
        }
        if let Some(burst) = parse_var(&lookup, "RATE_LIMIT_AUTH_BURST")? {
            rate_limit.authenticated_burst = Some(burst);
        }
        if let Some(secs) = parse_var(&lookup, "RATE_LIMIT_CLEANUP_INTERVAL_SECS")? {
            rate_limit.cleanup_interval_secs = secs;
        }

        debug!("Environment overrides applied");
        Ok(())
    }
}

fn parse_var<F, T>(lookup: &F, name: &str) -> Result<Option<T>>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(name) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|e| GatewayError::Config(format!("Invalid {}: {}", name, e))),
    }
}
