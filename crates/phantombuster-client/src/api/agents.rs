//! Agents API.

use crate::client::PhantombusterClient;
use crate::error::Result;
use crate::types::{
    Agent, AgentListResponse, Container, IdParam, SaveAgentRequest, SuccessResponse,
};

/// Agents API client.
pub struct AgentsApi {
    client: PhantombusterClient,
}

impl AgentsApi {
    pub(crate) fn new(client: PhantombusterClient) -> Self {
        Self { client }
    }

    /// List all agents of the current organization.
    pub async fn fetch_all(&self) -> Result<Vec<Agent>> {
        let response: AgentListResponse = self.client.get("/agents/fetch-all").await?;
        Ok(response.agents)
    }

    /// Get an agent by ID.
    pub async fn fetch(&self, id: i64) -> Result<Agent> {
        self.client
            .get_with_query("/agents/fetch", &IdParam { id })
            .await
    }

    /// Launch an agent, returning the container of the new run.
    pub async fn launch(&self, id: i64) -> Result<Container> {
        self.client.post("/agents/launch", &IdParam { id }).await
    }

    /// Save (create or update) an agent.
    pub async fn save(&self, request: SaveAgentRequest) -> Result<Agent> {
        self.client.post("/agents/save", &request).await
    }

    /// Delete an agent.
    pub async fn delete(&self, id: i64) -> Result<SuccessResponse> {
        self.client.post("/agents/delete", &IdParam { id }).await
    }
}
