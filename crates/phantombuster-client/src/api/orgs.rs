//! Organizations API.

use crate::client::PhantombusterClient;
use crate::error::Result;
use crate::types::{
    AgentGroup, AgentGroupListResponse, Container, ContainerListResponse, OrgResources,
};

/// Organizations API client.
pub struct OrgsApi {
    client: PhantombusterClient,
}

impl OrgsApi {
    pub(crate) fn new(client: PhantombusterClient) -> Self {
        Self { client }
    }

    /// Resources and usage of the current organization.
    pub async fn fetch_resources(&self) -> Result<OrgResources> {
        self.client.get("/orgs/fetch-resources").await
    }

    /// Export agent usage as CSV.
    pub async fn export_agent_usage(&self) -> Result<String> {
        self.client
            .get_text::<()>("/orgs/export-agent-usage", None)
            .await
    }

    /// Export container usage as CSV.
    pub async fn export_container_usage(&self) -> Result<String> {
        self.client
            .get_text::<()>("/orgs/export-container-usage", None)
            .await
    }

    /// List the organization's running containers.
    pub async fn fetch_running_containers(&self) -> Result<Vec<Container>> {
        let response: ContainerListResponse =
            self.client.get("/orgs/fetch-running-containers").await?;
        Ok(response.containers)
    }

    /// List the organization's agent groups.
    pub async fn fetch_agent_groups(&self) -> Result<Vec<AgentGroup>> {
        let response: AgentGroupListResponse =
            self.client.get("/orgs/fetch-agent-groups").await?;
        Ok(response.agent_groups)
    }
}
