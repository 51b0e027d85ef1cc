//! Retry policy applied around every dispatch.

use std::future::Future;
use std::time::Duration;

use crate::error::{Error, Result};

/// Default total number of attempts (initial try + retries).
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

/// Default wait before the first retry.
pub const DEFAULT_MIN_BACKOFF: Duration = Duration::from_secs(4);

/// Default ceiling for any single wait.
pub const DEFAULT_MAX_BACKOFF: Duration = Duration::from_secs(10);

/// Exponential backoff retry policy.
///
/// The wait before retry `n` (1-based) is `min_backoff * 2^(n-1)`, capped at
/// `max_backoff`. Failures rejected by the predicate are returned on first
/// occurrence; exhausting the attempts returns the last failure.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    max_attempts: u32,
    min_backoff: Duration,
    max_backoff: Duration,
    retryable: fn(&Error) -> bool,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            min_backoff: DEFAULT_MIN_BACKOFF,
            max_backoff: DEFAULT_MAX_BACKOFF,
            retryable: Error::is_retryable,
        }
    }
}

impl RetryPolicy {
    /// Create a policy with the given attempt ceiling and default backoff.
    pub fn new(max_attempts: u32) -> Self {
        Self {
            max_attempts,
            ..Self::default()
        }
    }

    /// A policy that never retries.
    pub fn none() -> Self {
        Self::new(1)
    }

    /// Set the backoff floor and ceiling.
    pub fn with_backoff(mut self, min: Duration, max: Duration) -> Self {
        self.min_backoff = min;
        self.max_backoff = max.max(min);
        self
    }

    /// Replace the predicate deciding which failures are retried.
    pub fn with_predicate(mut self, retryable: fn(&Error) -> bool) -> Self {
        self.retryable = retryable;
        self
    }

    /// Total attempts, including the first.
    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Wait before the first retry.
    pub fn min_backoff(&self) -> Duration {
        self.min_backoff
    }

    /// Ceiling for any single wait.
    pub fn max_backoff(&self) -> Duration {
        self.max_backoff
    }

    /// Whether `error` should trigger another attempt.
    pub fn should_retry(&self, error: &Error) -> bool {
        (self.retryable)(error)
    }

    /// Wait before retry number `retry` (1-based).
    pub fn backoff(&self, retry: u32) -> Duration {
        let shift = retry.saturating_sub(1).min(16);
        self.min_backoff
            .saturating_mul(1u32 << shift)
            .min(self.max_backoff)
    }

    /// Run `op` until it succeeds, fails permanently, or attempts run out.
    ///
    /// `op` receives the 1-based attempt number.
    pub async fn run<F, Fut, T>(&self, mut op: F) -> Result<T>
    where
        F: FnMut(u32) -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let attempts = self.max_attempts.max(1);
        let mut attempt = 1;

        loop {
            match op(attempt).await {
                Ok(value) => return Ok(value),
                Err(e) => {
                    if attempt >= attempts || !self.should_retry(&e) {
                        return Err(e);
                    }

                    let backoff = self.backoff(attempt);
                    tracing::warn!(
                        attempt,
                        max_attempts = attempts,
                        backoff_ms = backoff.as_millis() as u64,
                        error = %e,
                        "Request failed, retrying"
                    );
                    tokio::time::sleep(backoff).await;
                    attempt += 1;
                }
            }
        }
    }
}
