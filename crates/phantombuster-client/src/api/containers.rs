//! Containers API.

use crate::client::PhantombusterClient;
use crate::error::Result;
use crate::types::{AgentIdQuery, Container, ContainerListResponse, IdParam};

/// Containers API client.
pub struct ContainersApi {
    client: PhantombusterClient,
}

impl ContainersApi {
    pub(crate) fn new(client: PhantombusterClient) -> Self {
        Self { client }
    }

    /// Get a container by ID.
    pub async fn fetch(&self, id: &str) -> Result<Container> {
        self.client
            .get_with_query("/containers/fetch", &IdParam { id })
            .await
    }

    /// List the containers of an agent.
    pub async fn fetch_all(&self, agent_id: &str) -> Result<Vec<Container>> {
        let response: ContainerListResponse = self
            .client
            .get_with_query("/containers/fetch-all", &AgentIdQuery { agent_id })
            .await?;
        Ok(response.containers)
    }

    /// Get the result object of a container.
    pub async fn fetch_result_object(&self, id: &str) -> Result<serde_json::Value> {
        self.client
            .get_with_query("/containers/fetch-result-object", &IdParam { id })
            .await
    }
}
