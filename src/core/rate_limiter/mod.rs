//! Rate Limiting Implementation
//!
//! Continuous-refill token buckets keyed by caller, one registry per tier,
//! with a background task that drops idle buckets.

mod bucket;
mod eviction;
mod limiter;
mod tiers;
mod types;


pub use limiter::RateLimiter;
pub use tiers::TieredRateLimiter;
pub use types::{RateLimitInfo, Tier};
