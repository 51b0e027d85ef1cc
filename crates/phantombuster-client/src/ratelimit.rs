//! Outbound rate limiting using governor.
//!
//! One limiter is owned by the gateway and shared by every request, across all
//! resource clients and concurrent callers. Callers wait for a slot rather
//! than failing.

use std::num::NonZeroU32;
use std::time::Duration;

use governor::{
    clock::DefaultClock,
    state::{InMemoryState, NotKeyed},
    Quota, RateLimiter,
};

use crate::error::{Error, Result};

/// Default number of requests allowed per window.
pub const DEFAULT_MAX_REQUESTS: u32 = 10;

/// Default rate limit window.
pub const DEFAULT_WINDOW: Duration = Duration::from_secs(1);

/// Rate limit configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitConfig {
    /// Requests allowed per window (also the burst size).
    pub max_requests: u32,
    /// Length of the window.
    pub window: Duration,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max_requests: DEFAULT_MAX_REQUESTS,
            window: DEFAULT_WINDOW,
        }
    }
}

impl RateLimitConfig {
    /// Create a config allowing `max_requests` per `window`.
    pub fn new(max_requests: u32, window: Duration) -> Self {
        Self {
            max_requests,
            window,
        }
    }

    /// Build the governor quota: a bucket of `max_requests` tokens, one token
    /// replenished every `window / max_requests`.
    fn quota(&self) -> Result<Quota> {
        let burst = NonZeroU32::new(self.max_requests)
            .ok_or_else(|| Error::Config("rate limit max_requests must be > 0".to_string()))?;
        let period = self.window / self.max_requests;
        let quota = Quota::with_period(period)
            .ok_or_else(|| Error::Config("rate limit window must be > 0".to_string()))?;
        Ok(quota.allow_burst(burst))
    }
}

/// Shared token bucket gating every dispatch attempt.
///
/// This bounds the sustained rate, not the count inside any fixed window. A
/// full bucket lets `max_requests` through at once and refills one slot every
/// `window / max_requests`, so with the defaults up to 19 requests can start
/// within one second of an idle period.
pub(crate) struct RequestLimiter {
    limiter: RateLimiter<NotKeyed, InMemoryState, DefaultClock>,
    config: RateLimitConfig,
}

impl RequestLimiter {
    /// Create a limiter from the config.
    pub(crate) fn new(config: RateLimitConfig) -> Result<Self> {
        Ok(Self {
            limiter: RateLimiter::direct(config.quota()?),
            config,
        })
    }

    /// Wait until a slot is available and take it.
    pub(crate) async fn acquire(&self) {
        if self.limiter.check().is_ok() {
            return;
        }

        tracing::debug!(
            max_requests = self.config.max_requests,
            window_ms = self.config.window.as_millis() as u64,
            "Rate limit reached, waiting for a slot"
        );
        self.limiter.until_ready().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    #[test]
    fn test_rate_limit_config_default() {
        let config = RateLimitConfig::default();
        assert_eq!(config.max_requests, 10);
        assert_eq!(config.window, Duration::from_secs(1));
    }

    #[tokio::test]
    async fn test_refill_is_gradual_not_per_window() {
        let limiter = RequestLimiter::new(RateLimitConfig::default()).unwrap();
        let started = Instant::now();
        for _ in 0..15 {
            limiter.acquire().await;
        }
        let elapsed = started.elapsed();

        // Ten from the bucket, then five refills at 100ms each.
        assert!(elapsed >= Duration::from_millis(400), "{:?}", elapsed);
        assert!(elapsed < Duration::from_millis(900), "{:?}", elapsed);
    }

    #[test]
    fn test_zero_requests_rejected() {
        let result = RequestLimiter::new(RateLimitConfig::new(0, Duration::from_secs(1)));
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_zero_window_rejected() {
        let result = RequestLimiter::new(RateLimitConfig::new(10, Duration::ZERO));
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[tokio::test]
    async fn test_burst_is_immediate() {
        let limiter = RequestLimiter::new(RateLimitConfig::default()).unwrap();
        let start = Instant::now();
        for _ in 0..10 {
            limiter.acquire().await;
        }
        assert!(start.elapsed() < Duration::from_millis(50));
    }

    #[tokio::test]
    async fn test_eleventh_request_waits_for_a_slot() {
        let limiter = RequestLimiter::new(RateLimitConfig::default()).unwrap();
        let start = Instant::now();
        for _ in 0..11 {
            limiter.acquire().await;
        }
        // One token is replenished every 100ms.
        assert!(start.elapsed() >= Duration::from_millis(80));
    }
}
