//! Continuous-refill token bucket
//!
//! Tokens accrue at `refill_rate` per second up to `capacity`. The bucket has
//! no synchronisation of its own; the registry holds the shard lock while it
//! runs.

use std::time::Duration;
use tokio::time::Instant;

#[derive(Debug, Clone)]
pub(crate) struct TokenBucket {
    capacity: f64,
    /// Tokens per second
    refill_rate: f64,
    /// Always within `0..=capacity`
    tokens: f64,
    last_refill: Instant,
}

/// Result of one consume attempt
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Admission {
    pub(crate) allowed: bool,
    pub(crate) remaining: u32,
    /// Time until the bucket is full again
    pub(crate) reset_after: Duration,
    /// Time until one token is available, only on denial
    pub(crate) retry_after: Option<Duration>,
}

impl TokenBucket {
    /// A bucket at full capacity
    pub(crate) fn full(capacity: u32, refill_rate: f64, now: Instant) -> Self {
        let capacity = f64::from(capacity);
        Self {
            capacity,
            refill_rate,
            tokens: capacity,
            last_refill: now,
        }
    }

    #[cfg(test)]
    pub(crate) fn tokens(&self) -> f64 {
        self.tokens
    }

    fn refill(&mut self, now: Instant) {
        // Callers sample `now` before taking the lock, so it can trail last_refill
        let elapsed = now.saturating_duration_since(self.last_refill);
        self.tokens = (self.tokens + elapsed.as_secs_f64() * self.refill_rate).min(self.capacity);
        if now > self.last_refill {
            self.last_refill = now;
        }
    }

    /// Refill, then take one token if available
    pub(crate) fn try_acquire(&mut self, now: Instant) -> Admission {
        self.refill(now);

        let allowed = self.tokens >= 1.0;
        if allowed {
            self.tokens -= 1.0;
        }

        let reset_after = if self.tokens >= self.capacity {
            Duration::ZERO
        } else {
            self.wait_for(self.capacity - self.tokens)
        };

        Admission {
            allowed,
            remaining: self.tokens.floor() as u32,
            reset_after,
            retry_after: (!allowed).then(|| self.time_until_available()),
        }
    }

    /// Wait until one whole token exists, computed without touching state
    pub(crate) fn time_until_available(&self) -> Duration {
        if self.tokens >= 1.0 {
            return Duration::ZERO;
        }
        self.wait_for(1.0 - self.tokens).max(Duration::from_nanos(1))
    }

    /// Time to accrue `deficit` tokens, rounded up to the next nanosecond
    fn wait_for(&self, deficit: f64) -> Duration {
        let nanos = (deficit / self.refill_rate * 1e9).ceil();
        Duration::from_nanos(nanos as u64)
    }
}
