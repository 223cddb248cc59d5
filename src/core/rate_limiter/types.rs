//! Rate limiter types and data structures

use super::bucket::TokenBucket;
use chrono::{DateTime, Utc};
use std::fmt;
use std::time::Duration;
use tokio::time::Instant;

/// Caller class; each tier owns an independent limiter and key space
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tier {
    /// Identified by network address
    Anonymous,
    /// Identified by a verified principal
    Authenticated,
}

impl Tier {
    pub fn as_str(&self) -> &'static str {
        match self {
            Tier::Anonymous => "anonymous",
            Tier::Authenticated => "authenticated",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of a single admission check
#[derive(Debug, Clone, PartialEq)]
pub struct RateLimitInfo {
    /// Whether the request is allowed
    pub allowed: bool,
    /// Configured requests per minute of the tier
    pub limit: u32,
    /// Whole tokens left after this call
    pub remaining: u32,
    /// When the bucket will be full again
    pub reset_at: DateTime<Utc>,
    /// Wait before a token is available; only set when not allowed
    pub retry_after: Option<Duration>,
}

impl RateLimitInfo {
    /// Reset time as unix seconds, rounded up
    pub fn reset_epoch_secs(&self) -> i64 {
        let secs = self.reset_at.timestamp();
        if self.reset_at.timestamp_subsec_nanos() > 0 {
            secs + 1
        } else {
            secs
        }
    }

    /// Retry hint in whole seconds, rounded up and never below one
    pub fn retry_after_secs(&self) -> Option<u64> {
        self.retry_after.map(|wait| {
            let secs = wait.as_secs() + u64::from(wait.subsec_nanos() > 0);
            secs.max(1)
        })
    }
}

/// Registry slot for a single key
#[derive(Debug)]
pub(super) struct BucketEntry {
    pub(super) bucket: TokenBucket,
    /// Last `allow` for this key; drives eviction
    pub(super) last_access: Instant,
}

impl BucketEntry {
    pub(super) fn new(bucket: TokenBucket, now: Instant) -> Self {
        Self {
            bucket,
            last_access: now,
        }
    }

    pub(super) fn touch(&mut self, now: Instant) {
        if now > self.last_access {
            self.last_access = now;
        }
    }
}
