//! Background eviction of idle buckets

use super::types::BucketEntry;
use dashmap::DashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::debug;

/// Idle time after which a bucket is dropped
///
/// Twice the interval, so a key always survives at least one full interval of
/// inactivity regardless of tick jitter.
pub(super) fn max_idle(cleanup_interval: Duration) -> Duration {
    cleanup_interval.saturating_mul(2)
}

/// Drop every entry whose last access is older than `max_idle`
pub(super) fn evict_idle(
    buckets: &DashMap<String, BucketEntry>,
    max_idle: Duration,
    now: Instant,
) -> usize {
    let mut evicted = 0;
    buckets.retain(|_, entry| {
        let keep = now.saturating_duration_since(entry.last_access) <= max_idle;
        if !keep {
            evicted += 1;
        }
        keep
    });

    if evicted > 0 {
        debug!(evicted, remaining = buckets.len(), "Evicted idle rate limit buckets");
    }
    evicted
}

/// Start the periodic sweep; exits once `shutdown` flips to true or its
/// sender is dropped
pub(super) fn spawn_evictor(
    runtime: &tokio::runtime::Handle,
    buckets: Arc<DashMap<String, BucketEntry>>,
    cleanup_interval: Duration,
    mut shutdown: watch::Receiver<bool>,
) -> JoinHandle<()> {
    let max_idle = max_idle(cleanup_interval);

    runtime.spawn(async move {
        let mut ticker = tokio::time::interval_at(Instant::now() + cleanup_interval, cleanup_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    evict_idle(&buckets, max_idle, Instant::now());
                }
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        break;
                    }
                }
            }
        }

        debug!("Rate limit evictor stopped");
    })
}
