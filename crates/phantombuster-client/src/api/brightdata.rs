//! Bright Data API.

use crate::client::PhantombusterClient;
use crate::error::Result;
use crate::types::SerpQuery;

/// Bright Data API client.
pub struct BrightDataApi {
    client: PhantombusterClient,
}

impl BrightDataApi {
    pub(crate) fn new(client: PhantombusterClient) -> Self {
        Self { client }
    }

    /// Run a search engine results page query.
    ///
    /// The result shape depends on the search type, so it is returned as raw JSON.
    pub async fn serp(&self, query: &SerpQuery) -> Result<serde_json::Value> {
        self.client.get_with_query("/brightdata/serp", query).await
    }
}
