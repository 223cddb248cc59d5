//! The pair of limiters a deployment runs, one per caller tier

use super::limiter::RateLimiter;
use super::types::{RateLimitInfo, Tier};
use crate::config::models::rate_limit::RateLimitConfig;
use crate::utils::error::Result;
use std::sync::Arc;

/// Independent anonymous and authenticated limiters
///
/// Quota never crosses tiers: an anonymous flood from one address cannot
/// drain an authenticated principal calling from the same address.
#[derive(Debug, Clone)]
pub struct TieredRateLimiter {
    anonymous: Arc<RateLimiter>,
    authenticated: Arc<RateLimiter>,
}

impl TieredRateLimiter {
    pub fn new(anonymous: Arc<RateLimiter>, authenticated: Arc<RateLimiter>) -> Self {
        Self {
            anonymous,
            authenticated,
        }
    }

    /// Build both limiters from configuration, failing on invalid limits
    pub fn from_config(config: &RateLimitConfig) -> Result<Self> {
        let anonymous = RateLimiter::new(config.anonymous_tier())?;
        let authenticated = RateLimiter::new(config.authenticated_tier())?;
        Ok(Self::new(Arc::new(anonymous), Arc::new(authenticated)))
    }

    pub fn for_tier(&self, tier: Tier) -> &Arc<RateLimiter> {
        match tier {
            Tier::Anonymous => &self.anonymous,
            Tier::Authenticated => &self.authenticated,
        }
    }

    /// Admission check against the tier's own limiter
    pub fn allow(&self, tier: Tier, key: &str) -> RateLimitInfo {
        self.for_tier(tier).allow(key)
    }

    /// Stop both evictors
    pub fn close(&self) {
        self.anonymous.close();
        self.authenticated.close();
    }
}
