//! Limiter behavior through the public API
//!
//! Time is paused so refill and eviction are deterministic.

#[cfg(test)]
mod tests {
    use release_ratelimit::{RateLimitConfig, RateLimiter, Tier, TierLimits, TieredRateLimiter};
    use std::time::Duration;

    fn limiter(rpm: u32, burst: u32, cleanup_secs: u64) -> RateLimiter {
        RateLimiter::new(TierLimits::new(rpm, burst, Duration::from_secs(cleanup_secs))).unwrap()
    }

    /// Burst is spent, then the caller is told how long to wait
    #[tokio::test(start_paused = true)]
    async fn test_burst_then_wait_then_admit() {
        let limiter = limiter(60, 3, 60);

        for expected in [2, 1, 0] {
            let info = limiter.allow("192.168.1.1");
            assert!(info.allowed);
            assert_eq!(info.remaining, expected);
            assert!(info.retry_after.is_none());
        }

        let denied = limiter.allow("192.168.1.1");
        assert!(!denied.allowed);
        assert_eq!(denied.remaining, 0);
        let wait = denied.retry_after.unwrap();
        assert!(wait > Duration::ZERO && wait <= Duration::from_secs(1));

        tokio::time::advance(wait).await;
        let info = limiter.allow("192.168.1.1");
        assert!(info.allowed);
        assert_eq!(info.remaining, 0);

        assert!(limiter.allow("192.168.1.2").allowed);
    }

    /// A bucket never holds more than its burst, however long it idles
    #[tokio::test(start_paused = true)]
    async fn test_refill_caps_at_burst() {
        let limiter = limiter(600, 5, 3600);

        for _ in 0..5 {
            assert!(limiter.allow("client").allowed);
        }
        tokio::time::advance(Duration::from_secs(600)).await;

        let info = limiter.allow("client");
        assert!(info.allowed);
        assert_eq!(info.remaining, 4);
    }

    /// Idle buckets disappear and come back full
    #[tokio::test(start_paused = true)]
    async fn test_idle_bucket_evicted() {
        let limiter = limiter(60, 2, 10);

        assert!(limiter.allow("10.0.0.7").allowed);
        assert!(limiter.allow("10.0.0.7").allowed);
        assert!(!limiter.allow("10.0.0.7").allowed);
        assert_eq!(limiter.len(), 1);

        // Survives the tick at exactly twice the interval
        tokio::time::sleep(Duration::from_secs(21)).await;
        assert_eq!(limiter.len(), 1);

        tokio::time::sleep(Duration::from_secs(10)).await;
        assert!(limiter.is_empty());

        let info = limiter.allow("10.0.0.7");
        assert!(info.allowed);
        assert_eq!(info.remaining, 1);
    }

    /// Closing stops eviction but not admission
    #[tokio::test(start_paused = true)]
    async fn test_close_keeps_admission_working() {
        let limiter = limiter(60, 2, 1);
        assert!(limiter.allow("a").allowed);

        limiter.close();
        limiter.close();
        assert!(limiter.is_closed());

        tokio::time::sleep(Duration::from_secs(10)).await;
        assert_eq!(limiter.len(), 1);
        assert!(limiter.allow("a").allowed);
        assert!(!limiter.allow("a").allowed);
    }

    /// Authenticated principals draw from their own, larger quota
    #[tokio::test(start_paused = true)]
    async fn test_tiers_do_not_share_quota() {
        let config = RateLimitConfig {
            requests_per_minute: 60,
            burst: 3,
            authenticated_requests_per_minute: Some(120),
            authenticated_burst: Some(20),
            ..Default::default()
        };
        let limiters = TieredRateLimiter::from_config(&config).unwrap();

        for _ in 0..3 {
            assert!(limiters.allow(Tier::Anonymous, "192.168.1.1").allowed);
        }
        assert!(!limiters.allow(Tier::Anonymous, "192.168.1.1").allowed);

        let info = limiters.allow(Tier::Authenticated, "auth:release-bot");
        assert!(info.allowed);
        assert_eq!(info.limit, 120);
        assert_eq!(info.remaining, 19);

        limiters.close();
    }

    #[test]
    fn test_zero_limits_rejected() {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        let _guard = runtime.enter();

        assert!(RateLimiter::new(TierLimits::new(0, 5, Duration::from_secs(1))).is_err());
        assert!(RateLimiter::new(TierLimits::new(5, 0, Duration::from_secs(1))).is_err());
        assert!(RateLimiter::new(TierLimits::new(5, 5, Duration::ZERO)).is_err());
    }
}
