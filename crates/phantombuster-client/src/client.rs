//! Main client implementation.

use std::time::Duration;

use crate::api::{
    AgentsApi, AiApi, BranchesApi, BrightDataApi, CaptchaApi, ContainersApi, IdentitiesApi,
    LocationApi, OrgStorageApi, OrgsApi, ScriptsApi, V1Api,
};
use crate::config::Config;
use crate::error::Result;
use crate::gateway::{ApiRequest, ApiVersion, Gateway, GatewayRegistry};
use crate::ratelimit::RateLimitConfig;
use crate::retry::RetryPolicy;

/// PhantomBuster API client.
///
/// Provides typed access to all PhantomBuster endpoints. Every sub-client
/// shares the same [`Gateway`], and with it the connection pool, rate limiter
/// and retry policy.
///
/// # Example
///
/// ```no_run
/// use phantombuster_client::{Config, PhantombusterClient};
///
/// # async fn example() -> phantombuster_client::Result<()> {
/// let client = PhantombusterClient::get_instance(Some(Config::new("api-key")))?;
///
/// let agents = client.agents().fetch_all().await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct PhantombusterClient {
    gateway: Gateway,
}

impl PhantombusterClient {
    /// Create a client over an existing gateway.
    pub fn new(gateway: Gateway) -> Self {
        Self { gateway }
    }

    /// Create a client builder for a standalone gateway.
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// Client over the process-wide gateway.
    ///
    /// The first call must supply a config; later calls return a client over
    /// the same gateway and ignore `config`.
    pub fn get_instance(config: Option<Config>) -> Result<Self> {
        Self::from_registry(GatewayRegistry::global(), config)
    }

    /// Client over the gateway held by `registry`.
    pub fn from_registry(registry: &GatewayRegistry, config: Option<Config>) -> Result<Self> {
        registry.get_instance(config).map(Self::new)
    }

    /// The underlying gateway.
    pub fn gateway(&self) -> &Gateway {
        &self.gateway
    }

    /// Shut down the underlying gateway.
    ///
    /// Every client sharing the gateway fails with
    /// [`Error::Shutdown`](crate::Error::Shutdown) from then on. If the gateway
    /// came from a registry, the next [`get_instance`](Self::get_instance)
    /// there needs a config and builds a new gateway.
    pub fn shutdown(&self) {
        self.gateway.shutdown();
    }

    // ─────────────────────────────────────────────────────────────────────────
    // API accessors
    // ─────────────────────────────────────────────────────────────────────────

    /// Access the agents API.
    pub fn agents(&self) -> AgentsApi {
        AgentsApi::new(self.clone())
    }

    /// Access the scripts API.
    pub fn scripts(&self) -> ScriptsApi {
        ScriptsApi::new(self.clone())
    }

    /// Access the containers API.
    pub fn containers(&self) -> ContainersApi {
        ContainersApi::new(self.clone())
    }

    /// Access the organizations API.
    pub fn orgs(&self) -> OrgsApi {
        OrgsApi::new(self.clone())
    }

    /// Access the branches API.
    pub fn branches(&self) -> BranchesApi {
        BranchesApi::new(self.clone())
    }

    /// Access the organization storage (leads) API.
    pub fn org_storage(&self) -> OrgStorageApi {
        OrgStorageApi::new(self.clone())
    }

    /// Access the identities API.
    pub fn identities(&self) -> IdentitiesApi {
        IdentitiesApi::new(self.clone())
    }

    /// Access the AI completions API.
    pub fn ai(&self) -> AiApi {
        AiApi::new(self.clone())
    }

    /// Access the captcha solving API.
    pub fn captcha(&self) -> CaptchaApi {
        CaptchaApi::new(self.clone())
    }

    /// Access the IP location API.
    pub fn location(&self) -> LocationApi {
        LocationApi::new(self.clone())
    }

    /// Access the Bright Data search API.
    pub fn brightdata(&self) -> BrightDataApi {
        BrightDataApi::new(self.clone())
    }

    /// Access the legacy v1 API.
    pub fn v1(&self) -> V1Api {
        V1Api::new(self.clone())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Internal HTTP methods
    // ─────────────────────────────────────────────────────────────────────────

    /// Dispatch a request and decode the JSON response body.
    pub(crate) async fn send_json<T: serde::de::DeserializeOwned>(
        &self,
        request: ApiRequest,
    ) -> Result<T> {
        self.gateway.dispatch(request).await?.json()
    }

    /// Dispatch a request and return the response body as text.
    pub(crate) async fn send_text(&self, request: ApiRequest) -> Result<String> {
        Ok(self.gateway.dispatch(request).await?.text())
    }

    /// Make a v2 GET request.
    pub(crate) async fn get<T: serde::de::DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.send_json(ApiRequest::get(path)).await
    }

    /// Make a v2 GET request with query parameters.
    pub(crate) async fn get_with_query<T, Q>(&self, path: &str, query: &Q) -> Result<T>
    where
        T: serde::de::DeserializeOwned,
        Q: serde::Serialize + ?Sized,
    {
        self.send_json(ApiRequest::get(path).query(query)?).await
    }

    /// Make a v2 GET request returning plain text.
    pub(crate) async fn get_text<Q>(&self, path: &str, query: Option<&Q>) -> Result<String>
    where
        Q: serde::Serialize + ?Sized,
    {
        let mut request = ApiRequest::get(path);
        if let Some(query) = query {
            request = request.query(query)?;
        }
        self.send_text(request).await
    }

    /// Make a v1 GET request.
    pub(crate) async fn get_v1<T: serde::de::DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.send_json(ApiRequest::get(path).version(ApiVersion::V1))
            .await
    }

    /// Make a v2 POST request with a JSON body.
    pub(crate) async fn post<T, B>(&self, path: &str, body: &B) -> Result<T>
    where
        T: serde::de::DeserializeOwned,
        B: serde::Serialize + ?Sized,
    {
        self.send_json(ApiRequest::post(path).json(body)?).await
    }

    /// Make a v2 POST request without a body.
    pub(crate) async fn post_empty<T: serde::de::DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.send_json(ApiRequest::post(path)).await
    }
}

/// Builder for a client with its own, non-shared gateway.
#[derive(Debug)]
pub struct ClientBuilder {
    api_key: Option<String>,
    base_url_v1: Option<String>,
    base_url_v2: Option<String>,
    timeout: Option<Duration>,
    rate_limit: Option<RateLimitConfig>,
    retry: Option<RetryPolicy>,
}

impl ClientBuilder {
    /// Create a new builder with defaults.
    pub fn new() -> Self {
        Self {
            api_key: None,
            base_url_v1: None,
            base_url_v2: None,
            timeout: None,
            rate_limit: None,
            retry: None,
        }
    }

    /// Set the API key.
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Set the v1 base URL.
    pub fn base_url_v1(mut self, url: impl Into<String>) -> Self {
        self.base_url_v1 = Some(url.into());
        self
    }

    /// Set the v2 base URL.
    pub fn base_url_v2(mut self, url: impl Into<String>) -> Self {
        self.base_url_v2 = Some(url.into());
        self
    }

    /// Set the per-attempt request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the outbound rate limit.
    pub fn rate_limit(mut self, rate_limit: RateLimitConfig) -> Self {
        self.rate_limit = Some(rate_limit);
        self
    }

    /// Set the retry policy.
    pub fn retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = Some(retry);
        self
    }

    /// Assemble the config without building a gateway.
    pub fn build_config(self) -> Result<Config> {
        let api_key = self
            .api_key
            .ok_or_else(|| crate::error::Error::Config("api_key is required".to_string()))?;

        let mut config = Config::new(api_key);
        if let Some(url) = self.base_url_v1 {
            config.base_url_v1 = url;
        }
        if let Some(url) = self.base_url_v2 {
            config.base_url_v2 = url;
        }
        if let Some(timeout) = self.timeout {
            config.timeout = timeout;
        }
        if let Some(rate_limit) = self.rate_limit {
            config.rate_limit = rate_limit;
        }
        if let Some(retry) = self.retry {
            config.retry = retry;
        }
        config.validate()?;
        Ok(config)
    }

    /// Build the client.
    pub fn build(self) -> Result<PhantombusterClient> {
        let config = self.build_config()?;
        Ok(PhantombusterClient::new(Gateway::new(config)?))
    }
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_builder_requires_api_key() {
        let result = ClientBuilder::new().build();
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_builder_with_defaults() {
        let client = ClientBuilder::new().api_key("secret").build().unwrap();

        assert_eq!(
            client.gateway().base_url(ApiVersion::V1),
            "https://api.phantombuster.com/api/v1"
        );
        assert_eq!(
            client.gateway().base_url(ApiVersion::V2),
            "https://api.phantombuster.com/api/v2"
        );
        assert_eq!(client.gateway().timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_builder_overrides() {
        let config = ClientBuilder::new()
            .api_key("secret")
            .base_url_v1("http://localhost:8080/v1")
            .base_url_v2("http://localhost:8080/v2")
            .timeout(Duration::from_secs(5))
            .retry_policy(RetryPolicy::none())
            .build_config()
            .unwrap();

        assert_eq!(config.base_url_v1, "http://localhost:8080/v1");
        assert_eq!(config.base_url_v2, "http://localhost:8080/v2");
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(config.retry.max_attempts(), 1);
    }

    #[test]
    fn test_builder_rejects_invalid_url() {
        let result = ClientBuilder::new()
            .api_key("secret")
            .base_url_v2("::not a url::")
            .build();
        assert!(matches!(result, Err(Error::InvalidUrl(_))));
    }

    #[test]
    fn test_clients_from_registry_share_gateway() {
        let registry = GatewayRegistry::new();
        let a = PhantombusterClient::from_registry(&registry, Some(Config::new("k"))).unwrap();
        let b = PhantombusterClient::from_registry(&registry, None).unwrap();
        assert!(Gateway::ptr_eq(a.gateway(), b.gateway()));
    }

    #[tokio::test]
    async fn test_client_shutdown_lets_registry_rebuild() {
        let registry = GatewayRegistry::new();
        let client = PhantombusterClient::from_registry(&registry, Some(Config::new("k"))).unwrap();
        client.shutdown();

        let result = PhantombusterClient::from_registry(&registry, None);
        assert!(matches!(result, Err(Error::Config(_))));

        let fresh =
            PhantombusterClient::from_registry(&registry, Some(Config::new("k2"))).unwrap();
        assert!(!fresh.gateway().is_shut_down());
        assert_eq!(fresh.gateway().config().api_key, "k2");
        assert!(!Gateway::ptr_eq(client.gateway(), fresh.gateway()));

        let result = client.agents().fetch_all().await;
        assert!(matches!(result, Err(Error::Shutdown)));
    }
}
