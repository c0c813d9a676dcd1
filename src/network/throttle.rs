// * Per-host pacing. A failover chain often lists the same host twice and a
// * batch run hits several lotteries hosted on one aggregator, so requests
// * are spaced per host rather than per URL.

use governor::{Quota, RateLimiter as GovernorLimiter};
use nonzero_ext::nonzero;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::debug;
use url::Url;

use crate::config::constants::HOST_GAP_MS;

type DirectLimiter = GovernorLimiter<
    governor::state::NotKeyed,
    governor::state::InMemoryState,
    governor::clock::DefaultClock,
>;

// * HostThrottle hands out one permit per host per configured gap. Clones
// * share the same buckets.
#[derive(Clone)]
pub struct HostThrottle {
    quota: Quota,
    limiters: Arc<RwLock<HashMap<String, Arc<DirectLimiter>>>>,
}

impl HostThrottle {
    pub fn new() -> Self {
        Self::with_gap(Duration::from_millis(HOST_GAP_MS))
    }

    pub fn with_gap(gap: Duration) -> Self {
        let quota = Quota::with_period(gap).unwrap_or_else(|| Quota::per_second(nonzero!(1u32)));
        Self {
            quota,
            limiters: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    // * Waits until the host behind `url` may be contacted again.
    pub async fn acquire(&self, url: &str) {
        let host = host_of(url);
        let limiter = self.get_limiter(&host).await;
        limiter.until_ready().await;
        debug!(host = %host, "throttle permit granted");
    }

    async fn get_limiter(&self, host: &str) -> Arc<DirectLimiter> {
        {
            let limiters = self.limiters.read().await;
            if let Some(limiter) = limiters.get(host) {
                return Arc::clone(limiter);
            }
        }

        let mut limiters = self.limiters.write().await;
        // * Re-check: another task may have created it between lock drops
        Arc::clone(
            limiters
                .entry(host.to_string())
                .or_insert_with(|| Arc::new(GovernorLimiter::direct(self.quota))),
        )
    }
}

impl Default for HostThrottle {
    fn default() -> Self {
        Self::new()
    }
}

// * Unparseable URLs share one bucket instead of bypassing pacing.
fn host_of(url: &str) -> String {
    Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(String::from))
        .unwrap_or_else(|| "unknown-host".to_string())
}
