//! Rate limiting configuration

use super::*;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Rate limiting configuration for both caller tiers
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RateLimitConfig {
    /// Enable rate limiting
    #[serde(default = "default_rate_limit_enabled")]
    pub enabled: bool,
    /// Anonymous requests per minute
    #[serde(default = "default_rpm")]
    pub requests_per_minute: u32,
    /// Anonymous burst capacity
    #[serde(default = "default_burst")]
    pub burst: u32,
    /// Authenticated requests per minute, twice the anonymous rate when unset
    #[serde(default)]
    pub authenticated_requests_per_minute: Option<u32>,
    /// Authenticated burst capacity, twice the anonymous burst when unset
    #[serde(default)]
    pub authenticated_burst: Option<u32>,
    /// How often idle buckets are swept, in seconds
    #[serde(default = "default_cleanup_interval_secs")]
    pub cleanup_interval_secs: u64,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            enabled: default_rate_limit_enabled(),
            requests_per_minute: default_rpm(),
            burst: default_burst(),
            authenticated_requests_per_minute: None,
            authenticated_burst: None,
            cleanup_interval_secs: default_cleanup_interval_secs(),
        }
    }
}

impl RateLimitConfig {
    /// Limits applied to callers without a verified identity
    pub fn anonymous_tier(&self) -> TierLimits {
        TierLimits {
            requests_per_minute: self.requests_per_minute,
            burst: self.burst,
            cleanup_interval: self.cleanup_interval(),
        }
    }

    /// Limits applied to authenticated callers
    pub fn authenticated_tier(&self) -> TierLimits {
        TierLimits {
            requests_per_minute: self
                .authenticated_requests_per_minute
                .unwrap_or_else(|| self.requests_per_minute.saturating_mul(2)),
            burst: self
                .authenticated_burst
                .unwrap_or_else(|| self.burst.saturating_mul(2)),
            cleanup_interval: self.cleanup_interval(),
        }
    }

    /// Interval between idle bucket sweeps
    pub fn cleanup_interval(&self) -> Duration {
        Duration::from_secs(self.cleanup_interval_secs)
    }

    /// Merge rate limit configurations
    pub fn merge(mut self, other: Self) -> Self {
        if !other.enabled {
            self.enabled = other.enabled;
        }
        if other.requests_per_minute != default_rpm() {
            self.requests_per_minute = other.requests_per_minute;
        }
        if other.burst != default_burst() {
            self.burst = other.burst;
        }
        if other.authenticated_requests_per_minute.is_some() {
            self.authenticated_requests_per_minute = other.authenticated_requests_per_minute;
        }
        if other.authenticated_burst.is_some() {
            self.authenticated_burst = other.authenticated_burst;
        }
        if other.cleanup_interval_secs != default_cleanup_interval_secs() {
            self.cleanup_interval_secs = other.cleanup_interval_secs;
        }
        self
    }
}

/// Construction parameters of a single limiter instance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TierLimits {
    /// Sustained refill rate
    pub requests_per_minute: u32,
    /// Bucket capacity
    pub burst: u32,
    /// Eviction tick; idle buckets live for twice this long
    pub cleanup_interval: Duration,
}

impl TierLimits {
    pub fn new(requests_per_minute: u32, burst: u32, cleanup_interval: Duration) -> Self {
        Self {
            requests_per_minute,
            burst,
            cleanup_interval,
        }
    }

    /// Refill rate in tokens per second
    pub fn tokens_per_second(&self) -> f64 {
        f64::from(self.requests_per_minute) / 60.0
    }
}
