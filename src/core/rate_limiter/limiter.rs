//! Core rate limiter implementation

use super::bucket::TokenBucket;
use super::eviction;
use super::types::{BucketEntry, RateLimitInfo};
use crate::config::Validate;
use crate::config::models::rate_limit::TierLimits;
use crate::utils::error::{GatewayError, Result};
use chrono::Utc;
use dashmap::DashMap;
use parking_lot::Mutex;
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::{debug, info};

/// Per-key token bucket registry for one tier
///
/// Buckets are created lazily at full capacity and swept by a background
/// evictor once idle for twice the cleanup interval. The map is sharded, so
/// callers on different keys rarely contend and never wait on I/O.
pub struct RateLimiter {
    limits: TierLimits,
    /// Tokens per second
    refill_rate: f64,
    pub(super) buckets: Arc<DashMap<String, BucketEntry>>,
    shutdown: watch::Sender<bool>,
    evictor: Mutex<Option<JoinHandle<()>>>,
}

impl RateLimiter {
    /// Create a limiter and start its evictor
    ///
    /// Must be called from within a Tokio runtime.
    pub fn new(limits: TierLimits) -> Result<Self> {
        limits
            .validate()
            .map_err(|e| GatewayError::Config(format!("Invalid rate limit: {}", e)))?;

        let runtime = tokio::runtime::Handle::try_current().map_err(|_| {
            GatewayError::Config("Rate limiter must be created inside a Tokio runtime".to_string())
        })?;

        let buckets = Arc::new(DashMap::new());
        let (shutdown, shutdown_rx) = watch::channel(false);
        let evictor = eviction::spawn_evictor(
            &runtime,
            buckets.clone(),
            limits.cleanup_interval,
            shutdown_rx,
        );

        info!(
            requests_per_minute = limits.requests_per_minute,
            burst = limits.burst,
            cleanup_interval_secs = limits.cleanup_interval.as_secs_f64(),
            "Rate limiter started"
        );

        Ok(Self {
            limits,
            refill_rate: limits.tokens_per_second(),
            buckets,
            shutdown,
            evictor: Mutex::new(Some(evictor)),
        })
    }

    /// Consume one token for `key` if available
    pub fn allow(&self, key: &str) -> RateLimitInfo {
        let now = Instant::now();
        let wall_now = Utc::now();

        let admission = {
            // Avoid String allocation if key already exists
            let mut entry = match self.buckets.get_mut(key) {
                Some(entry) => entry,
                None => self.buckets.entry(key.to_owned()).or_insert_with(|| {
                    debug!(key, "Creating rate limit bucket");
                    BucketEntry::new(
                        TokenBucket::full(self.limits.burst, self.refill_rate, now),
                        now,
                    )
                }),
            };
            entry.touch(now);
            entry.bucket.try_acquire(now)
        };

        let reset_at = chrono::Duration::from_std(admission.reset_after)
            .ok()
            .and_then(|wait| wall_now.checked_add_signed(wait))
            .unwrap_or(wall_now);

        RateLimitInfo {
            allowed: admission.allowed,
            limit: self.limits.requests_per_minute,
            remaining: admission.remaining,
            reset_at,
            retry_after: admission.retry_after,
        }
    }

    /// Stop the evictor
    ///
    /// Idempotent and safe to call concurrently. `allow` keeps working after
    /// close; idle buckets are simply no longer swept.
    pub fn close(&self) {
        let already_closed = self.shutdown.send_replace(true);
        if let Some(handle) = self.evictor.lock().take() {
            handle.abort();
        }
        if !already_closed {
            info!(tracked_keys = self.buckets.len(), "Rate limiter closed");
        }
    }

    /// Stop the evictor and wait for it to exit
    pub async fn shutdown(&self) {
        self.shutdown.send_replace(true);
        let handle = self.evictor.lock().take();
        if let Some(handle) = handle {
            let _ = handle.await;
        }
    }

    /// Whether `close` or `shutdown` has been called
    pub fn is_closed(&self) -> bool {
        *self.shutdown.borrow()
    }

    /// Remove buckets idle for longer than twice the cleanup interval
    ///
    /// The evictor calls this on every tick; returns the number removed.
    pub fn evict_idle(&self) -> usize {
        eviction::evict_idle(&self.buckets, self.max_idle(), Instant::now())
    }

    /// Number of keys currently tracked
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Configured requests per minute
    pub fn limit(&self) -> u32 {
        self.limits.requests_per_minute
    }

    pub fn limits(&self) -> &TierLimits {
        &self.limits
    }

    fn max_idle(&self) -> std::time::Duration {
        eviction::max_idle(self.limits.cleanup_interval)
    }
}

impl Drop for RateLimiter {
    fn drop(&mut self) {
        self.close();
    }
}

impl std::fmt::Debug for RateLimiter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RateLimiter")
            .field("limits", &self.limits)
            .field("tracked_keys", &self.buckets.len())
            .field("closed", &self.is_closed())
            .finish()
    }
}
