//! Gateway configuration.
//!
//! A [`Config`] is consumed once, when the gateway is constructed. After that
//! the gateway keeps its own copy and later configurations are ignored.

use std::fmt;
use std::time::Duration;

use url::Url;

use crate::error::{Error, Result};
use crate::ratelimit::RateLimitConfig;
use crate::retry::RetryPolicy;

/// Default base URL for API version 1.
pub const DEFAULT_BASE_URL_V1: &str = "https://api.phantombuster.com/api/v1";

/// Default base URL for API version 2.
pub const DEFAULT_BASE_URL_V2: &str = "https://api.phantombuster.com/api/v2";

/// Default timeout for a single request attempt.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Environment variable holding the API key.
pub const API_KEY_ENV: &str = "PHANTOMBUSTER_API_KEY";

/// Environment variable overriding the v1 base URL.
pub const BASE_URL_V1_ENV: &str = "PHANTOMBUSTER_BASE_URL_V1";

/// Environment variable overriding the v2 base URL.
pub const BASE_URL_V2_ENV: &str = "PHANTOMBUSTER_BASE_URL_V2";

/// Configuration for the gateway.
#[derive(Clone)]
pub struct Config {
    /// API key sent on every request.
    pub api_key: String,
    /// Base URL for v1 endpoints.
    pub base_url_v1: String,
    /// Base URL for v2 endpoints.
    pub base_url_v2: String,
    /// Timeout for a single request attempt.
    pub timeout: Duration,
    /// Shared outbound rate limit.
    pub rate_limit: RateLimitConfig,
    /// Retry policy wrapped around each dispatch.
    pub retry: RetryPolicy,
}

impl Config {
    /// Create a config with the given API key and default settings.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url_v1: DEFAULT_BASE_URL_V1.to_string(),
            base_url_v2: DEFAULT_BASE_URL_V2.to_string(),
            timeout: DEFAULT_TIMEOUT,
            rate_limit: RateLimitConfig::default(),
            retry: RetryPolicy::default(),
        }
    }

    /// Load the config from `PHANTOMBUSTER_*` environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load the config using `lookup` to resolve variable names.
    ///
    /// Empty values are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let api_key = get(API_KEY_ENV)
            .ok_or_else(|| Error::Config(format!("{} is not set", API_KEY_ENV)))?;

        let mut config = Self::new(api_key);
        if let Some(url) = get(BASE_URL_V1_ENV) {
            config.base_url_v1 = url;
        }
        if let Some(url) = get(BASE_URL_V2_ENV) {
            config.base_url_v2 = url;
        }
        Ok(config)
    }

    /// Set the v1 base URL.
    pub fn with_base_url_v1(mut self, url: impl Into<String>) -> Self {
        self.base_url_v1 = url.into();
        self
    }

    /// Set the v2 base URL.
    pub fn with_base_url_v2(mut self, url: impl Into<String>) -> Self {
        self.base_url_v2 = url.into();
        self
    }

    /// Set the per-attempt timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the outbound rate limit.
    pub fn with_rate_limit(mut self, rate_limit: RateLimitConfig) -> Self {
        self.rate_limit = rate_limit;
        self
    }

    /// Set the retry policy.
    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Check the config for values the gateway cannot work with.
    pub fn validate(&self) -> Result<()> {
        if self.api_key.trim().is_empty() {
            return Err(Error::Config("api_key is required".to_string()));
        }
        Url::parse(&self.base_url_v1)?;
        Url::parse(&self.base_url_v2)?;
        if self.timeout.is_zero() {
            return Err(Error::Config("timeout must be > 0".to_string()));
        }
        if self.rate_limit.max_requests == 0 || self.rate_limit.window.is_zero() {
            return Err(Error::Config(
                "rate limit must allow at least one request per window".to_string(),
            ));
        }
        if self.retry.max_attempts() == 0 {
            return Err(Error::Config("retry max_attempts must be > 0".to_string()));
        }
        Ok(())
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("api_key", &"<redacted>")
            .field("base_url_v1", &self.base_url_v1)
            .field("base_url_v2", &self.base_url_v2)
            .field("timeout", &self.timeout)
            .field("rate_limit", &self.rate_limit)
            .field("retry", &self.retry)
            .finish()
    }
}
