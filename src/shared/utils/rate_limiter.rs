use governor::{
    clock::DefaultClock,
    state::{direct::NotKeyed, InMemoryState},
    Quota, RateLimiter as GovernorRateLimiter,
};
use std::num::NonZeroU32;
use std::time::Duration;

/// Request pacing for external APIs.
///
/// Wraps a direct governor limiter with a fixed average rate and a small
/// burst allowance.
pub struct RateLimiter {
    limiter: GovernorRateLimiter<NotKeyed, InMemoryState, DefaultClock>,
}

impl RateLimiter {
    pub fn new(requests_per_second: f64, burst_size: u32) -> Self {
        let period = if requests_per_second > 0.0 {
            Duration::from_secs_f64(1.0 / requests_per_second)
        } else {
            Duration::MAX
        };
        let burst = NonZeroU32::new(burst_size.max(1)).unwrap();
        let quota = Quota::with_period(period).unwrap().allow_burst(burst);

        Self {
            limiter: GovernorRateLimiter::direct(quota),
        }
    }

    /// Wait until the next request is allowed to go out.
    pub async fn wait(&self) {
        self.limiter.until_ready().await;
    }
}
