//! Shared request dispatch.
//!
//! The [`Gateway`] owns the HTTP connection pool, credentials, both versioned
//! base URLs, the outbound rate limiter and the retry policy. Every resource
//! client sends its requests through [`Gateway::dispatch`].
//!
//! A process normally holds exactly one gateway. [`GatewayRegistry`] provides
//! the init-once lifecycle: the first access must supply a [`Config`], later
//! accesses return the same instance and ignore any new config.

use std::fmt;
use std::sync::{Arc, OnceLock};
use std::time::Duration;

use parking_lot::{Mutex, RwLock};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use url::Url;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::ratelimit::RequestLimiter;
use crate::retry::RetryPolicy;

/// Header carrying the API key.
pub const API_KEY_HEADER: &str = "X-Phantombuster-Key-1";

// ─────────────────────────────────────────────────────────────────────────────
// Requests
// ─────────────────────────────────────────────────────────────────────────────

/// API version selecting the base URL.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ApiVersion {
    /// Legacy v1 API.
    V1,
    /// Current v2 API.
    #[default]
    V2,
}

impl fmt::Display for ApiVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiVersion::V1 => write!(f, "v1"),
            ApiVersion::V2 => write!(f, "v2"),
        }
    }
}

/// One logical request to send through the gateway.
///
/// Body and query are serialized up front so every retry attempt sends the
/// same payload.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    method: Method,
    path: String,
    version: ApiVersion,
    body: Option<serde_json::Value>,
    query: Option<serde_json::Value>,
}

impl ApiRequest {
    /// Create a v2 request.
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            version: ApiVersion::default(),
            body: None,
            query: None,
        }
    }

    /// Create a GET request.
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    /// Create a POST request.
    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    /// Select the API version.
    pub fn version(mut self, version: ApiVersion) -> Self {
        self.version = version;
        self
    }

    /// Attach a JSON body.
    pub fn json<B: Serialize + ?Sized>(mut self, body: &B) -> Result<Self> {
        self.body = Some(serde_json::to_value(body)?);
        Ok(self)
    }

    /// Attach query parameters.
    pub fn query<Q: Serialize + ?Sized>(mut self, query: &Q) -> Result<Self> {
        self.query = Some(serde_json::to_value(query)?);
        Ok(self)
    }

    /// HTTP method.
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Path relative to the versioned base URL.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Selected API version.
    pub fn api_version(&self) -> ApiVersion {
        self.version
    }
}

/// Join raw path segments into a path, percent-encoding each segment.
///
/// `/`, `?`, `#` and other reserved characters inside a segment stay part of
/// that segment instead of changing the target URL.
pub fn path_from_segments(segments: &[&str]) -> Result<String> {
    let mut url = Url::parse("http://localhost/")?;
    {
        let mut path = url
            .path_segments_mut()
            .map_err(|_| Error::InvalidRequest("cannot build request path".to_string()))?;
        path.clear().extend(segments);
    }
    Ok(url.path().to_string())
}

/// A successful response, read in full within the attempt that received it.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    status: StatusCode,
    headers: HeaderMap,
    body: Vec<u8>,
}

impl ApiResponse {
    /// HTTP status.
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Response headers.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Raw body.
    pub fn bytes(&self) -> &[u8] {
        &self.body
    }

    /// Body as text, replacing invalid UTF-8.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Decode the body as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        Ok(serde_json::from_slice(&self.body)?)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Gateway
// ─────────────────────────────────────────────────────────────────────────────

/// Shared HTTP gateway.
///
/// Cheap to clone; clones share the connection pool, rate limiter and
/// shutdown state.
#[derive(Clone)]
pub struct Gateway {
    inner: Arc<GatewayInner>,
}

struct GatewayInner {
    /// `None` once the gateway has been shut down.
    http: RwLock<Option<reqwest::Client>>,
    config: Config,
    base_url_v1: String,
    base_url_v2: String,
    limiter: RequestLimiter,
}

impl Gateway {
    /// Build a gateway from the config.
    ///
    /// Prefer [`GatewayRegistry::get_instance`] to share one gateway across a
    /// process; this constructor creates an independent instance.
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        let mut key = HeaderValue::from_str(&config.api_key)
            .map_err(|_| Error::Config("Invalid API key".to_string()))?;
        key.set_sensitive(true);
        headers.insert(HeaderName::from_static("x-phantombuster-key-1"), key);

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .user_agent(format!(
                "phantombuster-client/{}",
                env!("CARGO_PKG_VERSION")
            ))
            .build()?;

        let limiter = RequestLimiter::new(config.rate_limit)?;

        tracing::info!(
            base_url_v1 = %config.base_url_v1,
            base_url_v2 = %config.base_url_v2,
            timeout_ms = config.timeout.as_millis() as u64,
            "Gateway initialized"
        );

        Ok(Self {
            inner: Arc::new(GatewayInner {
                http: RwLock::new(Some(http)),
                base_url_v1: config.base_url_v1.trim_end_matches('/').to_string(),
                base_url_v2: config.base_url_v2.trim_end_matches('/').to_string(),
                limiter,
                config,
            }),
        })
    }

    /// Whether two handles refer to the same gateway.
    pub fn ptr_eq(a: &Gateway, b: &Gateway) -> bool {
        Arc::ptr_eq(&a.inner, &b.inner)
    }

    /// The config the gateway was built from.
    pub fn config(&self) -> &Config {
        &self.inner.config
    }

    /// Base URL for an API version.
    pub fn base_url(&self, version: ApiVersion) -> &str {
        match version {
            ApiVersion::V1 => &self.inner.base_url_v1,
            ApiVersion::V2 => &self.inner.base_url_v2,
        }
    }

    /// Per-attempt timeout.
    pub fn timeout(&self) -> Duration {
        self.inner.config.timeout
    }

    /// Retry policy applied to each dispatch.
    pub fn retry_policy(&self) -> &RetryPolicy {
        &self.inner.config.retry
    }

    /// Full URL for a path: the versioned base URL followed by `path`.
    pub fn url(&self, version: ApiVersion, path: &str) -> Result<Url> {
        Ok(Url::parse(&format!("{}{}", self.base_url(version), path))?)
    }

    /// Whether [`shutdown`](Self::shutdown) has been called.
    pub fn is_shut_down(&self) -> bool {
        self.inner.http.read().is_none()
    }

    /// Release the connection pool.
    ///
    /// Every later dispatch on this gateway, through any clone, fails with
    /// [`Error::Shutdown`]. Requests already in flight complete normally.
    pub fn shutdown(&self) {
        if self.inner.http.write().take().is_some() {
            tracing::info!("Gateway shut down");
        }
    }

    /// Send one logical request.
    ///
    /// Each attempt waits for a rate limit slot, sends the request with the
    /// per-attempt timeout, reads the whole body and maps non-2xx statuses to
    /// taxonomy errors. Transport failures, including a body download that
    /// times out or is cut off, and 5xx responses are retried per the retry
    /// policy.
    pub async fn dispatch(&self, request: ApiRequest) -> Result<ApiResponse> {
        let url = self.url(request.version, &request.path)?;
        let url = &url;
        let request = &request;

        self.inner
            .config
            .retry
            .run(|attempt| self.attempt(request, url, attempt))
            .await
    }

    async fn attempt(
        &self,
        request: &ApiRequest,
        url: &Url,
        attempt: u32,
    ) -> Result<ApiResponse> {
        let http = self.inner.http.read().clone().ok_or(Error::Shutdown)?;

        self.inner.limiter.acquire().await;

        tracing::debug!(
            method = %request.method,
            url = %url,
            attempt,
            "Sending request"
        );

        let mut builder = http
            .request(request.method.clone(), url.clone())
            .timeout(self.inner.config.timeout);
        if let Some(query) = &request.query {
            builder = builder.query(query);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(|e| {
            tracing::debug!(
                method = %request.method,
                url = %url,
                attempt,
                error = %e,
                "Request failed"
            );
            Error::from(e)
        })?;

        let status = response.status();
        tracing::debug!(
            method = %request.method,
            url = %url,
            attempt,
            status = status.as_u16(),
            "Received response"
        );

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::from_status(status.as_u16(), &body));
        }

        let headers = response.headers().clone();
        let body = response.bytes().await.map_err(|e| {
            tracing::debug!(
                url = %url,
                attempt,
                error = %e,
                "Reading response body failed"
            );
            Error::from(e)
        })?;

        Ok(ApiResponse {
            status,
            headers,
            body: body.to_vec(),
        })
    }
}

impl fmt::Debug for Gateway {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Gateway")
            .field("base_url_v1", &self.inner.base_url_v1)
            .field("base_url_v2", &self.inner.base_url_v2)
            .field("shut_down", &self.is_shut_down())
            .finish()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Registry
// ─────────────────────────────────────────────────────────────────────────────

/// Init-once holder for a shared [`Gateway`].
///
/// Construction happens under a lock, so concurrent first accesses build a
/// single instance.
#[derive(Default)]
pub struct GatewayRegistry {
    slot: Mutex<Option<Gateway>>,
}

impl GatewayRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide registry.
    pub fn global() -> &'static GatewayRegistry {
        static GLOBAL: OnceLock<GatewayRegistry> = OnceLock::new();
        GLOBAL.get_or_init(GatewayRegistry::new)
    }

    /// Return the registered gateway, building it from `config` on first use.
    ///
    /// Once a live gateway exists `config` is ignored. Without one, `config`
    /// is required. A registered gateway that was shut down through any of
    /// its handles counts as absent and is replaced.
    pub fn get_instance(&self, config: Option<Config>) -> Result<Gateway> {
        let mut slot = self.slot.lock();

        match slot.as_ref() {
            Some(gateway) if !gateway.is_shut_down() => {
                if config.is_some() {
                    tracing::debug!("Gateway already initialized, ignoring new config");
                }
                return Ok(gateway.clone());
            }
            Some(_) => {
                tracing::debug!("Registered gateway was shut down, unregistering");
                *slot = None;
            }
            None => {}
        }

        let config = config.ok_or_else(|| {
            Error::Config(
                "configuration must be provided for the first gateway initialization".to_string(),
            )
        })?;
        let gateway = Gateway::new(config)?;
        *slot = Some(gateway.clone());
        Ok(gateway)
    }

    /// Return the registered gateway without supplying a config.
    pub fn get(&self) -> Result<Gateway> {
        self.get_instance(None)
    }

    /// Whether a live gateway is registered.
    pub fn is_initialized(&self) -> bool {
        self.slot
            .lock()
            .as_ref()
            .is_some_and(|gateway| !gateway.is_shut_down())
    }

    /// Shut down and unregister the gateway.
    ///
    /// Outstanding handles fail with [`Error::Shutdown`]; the next
    /// [`get_instance`](Self::get_instance) needs a fresh config. Returns
    /// `false` if nothing was registered.
    pub fn shutdown(&self) -> bool {
        match self.slot.lock().take() {
            Some(gateway) => {
                gateway.shutdown();
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> Config {
        Config::new("test-key")
    }

    #[test]
    fn test_url_building() {
        let gateway = Gateway::new(config()).unwrap();

        let url = gateway.url(ApiVersion::V2, "/agents/fetch-all").unwrap();
        assert_eq!(
            url.as_str(),
            "https://api.phantombuster.com/api/v2/agents/fetch-all"
        );

        let url = gateway.url(ApiVersion::V1, "/user").unwrap();
        assert_eq!(url.as_str(), "https://api.phantombuster.com/api/v1/user");
    }

    #[test]
    fn test_url_trims_trailing_slash_on_base() {
        let gateway = Gateway::new(config().with_base_url_v2("http://localhost:8080/api/v2/"))
            .unwrap();
        let url = gateway.url(ApiVersion::V2, "/scripts/save").unwrap();
        assert_eq!(url.as_str(), "http://localhost:8080/api/v2/scripts/save");
    }

    #[test]
    fn test_path_segments_are_percent_encoded() {
        let path =
            path_from_segments(&["script", "by-name", "public", "team/scraper #2?"]).unwrap();
        assert_eq!(path, "/script/by-name/public/team%2Fscraper%20%232%3F");

        let gateway = Gateway::new(config()).unwrap();
        let url = gateway.url(ApiVersion::V1, &path).unwrap();
        assert_eq!(url.path(), "/api/v1/script/by-name/public/team%2Fscraper%20%232%3F");
        assert!(url.query().is_none());
        assert!(url.fragment().is_none());

        assert_eq!(path_from_segments(&["user"]).unwrap(), "/user");
    }

    #[test]
    fn test_request_defaults_to_v2() {
        let request = ApiRequest::get("/agents/fetch-all");
        assert_eq!(request.api_version(), ApiVersion::V2);
        assert_eq!(request.method(), &Method::GET);

        let request = ApiRequest::get("/user").version(ApiVersion::V1);
        assert_eq!(request.api_version(), ApiVersion::V1);
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        assert!(matches!(Gateway::new(Config::new("")), Err(Error::Config(_))));
        assert!(matches!(
            Gateway::new(Config::new("bad\nkey")),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn test_registry_requires_config_on_first_access() {
        let registry = GatewayRegistry::new();
        assert!(matches!(registry.get(), Err(Error::Config(_))));
        assert!(!registry.is_initialized());
    }

    #[test]
    fn test_registry_returns_same_instance_and_keeps_first_config() {
        let registry = GatewayRegistry::new();
        let first = registry.get_instance(Some(Config::new("first"))).unwrap();
        let second = registry
            .get_instance(Some(
                Config::new("second").with_base_url_v2("http://other.example/api/v2"),
            ))
            .unwrap();
        let third = registry.get().unwrap();

        assert!(Gateway::ptr_eq(&first, &second));
        assert!(Gateway::ptr_eq(&first, &third));
        assert_eq!(second.config().api_key, "first");
        assert_eq!(
            second.base_url(ApiVersion::V2),
            "https://api.phantombuster.com/api/v2"
        );
    }

    #[test]
    fn test_registry_concurrent_first_access_builds_one_instance() {
        let registry = Arc::new(GatewayRegistry::new());
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let registry = Arc::clone(&registry);
                std::thread::spawn(move || {
                    registry
                        .get_instance(Some(Config::new(format!("key-{}", i))))
                        .unwrap()
                })
            })
            .collect();

        let gateways: Vec<Gateway> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        for gateway in &gateways[1..] {
            assert!(Gateway::ptr_eq(&gateways[0], gateway));
        }
    }

    #[test]
    fn test_registry_shutdown_resets() {
        let registry = GatewayRegistry::new();
        let gateway = registry.get_instance(Some(config())).unwrap();

        assert!(registry.shutdown());
        assert!(gateway.is_shut_down());
        assert!(!registry.is_initialized());
        assert!(!registry.shutdown());

        let fresh = registry.get_instance(Some(config())).unwrap();
        assert!(!Gateway::ptr_eq(&gateway, &fresh));
        assert!(!fresh.is_shut_down());
    }

    #[test]
    fn test_registry_replaces_gateway_shut_down_through_handle() {
        let registry = GatewayRegistry::new();
        let gateway = registry.get_instance(Some(config())).unwrap();
        gateway.shutdown();

        assert!(!registry.is_initialized());
        assert!(matches!(registry.get(), Err(Error::Config(_))));

        let fresh = registry
            .get_instance(Some(Config::new("second")))
            .unwrap();
        assert!(!fresh.is_shut_down());
        assert!(!Gateway::ptr_eq(&gateway, &fresh));
        assert_eq!(fresh.config().api_key, "second");
        assert!(registry.is_initialized());
    }

    #[tokio::test]
    async fn test_dispatch_after_shutdown_fails() {
        let gateway = Gateway::new(config()).unwrap();
        let clone = gateway.clone();
        gateway.shutdown();

        let result = clone.dispatch(ApiRequest::get("/agents/fetch-all")).await;
        assert!(matches!(result, Err(Error::Shutdown)));
    }
}
