//! Legacy v1 API.

use crate::client::PhantombusterClient;
use crate::error::Result;
use crate::gateway::path_from_segments;
use crate::types::{Agent, Script, User};

/// v1 API client.
///
/// Requests go to the v1 base URL.
pub struct V1Api {
    client: PhantombusterClient,
}

impl V1Api {
    pub(crate) fn new(client: PhantombusterClient) -> Self {
        Self { client }
    }

    /// Get an agent record.
    pub async fn agent_record(&self, agent_id: i64) -> Result<Agent> {
        self.client.get_v1(&format!("/agent/{}", agent_id)).await
    }

    /// Get a script by name. `mode` is `public` or `private`.
    ///
    /// Both values are percent-encoded as single path segments.
    pub async fn script_by_name(&self, mode: &str, name: &str) -> Result<Script> {
        let path = path_from_segments(&["script", "by-name", mode, name])?;
        self.client.get_v1(&path).await
    }

    /// Get the account the API key belongs to.
    pub async fn user(&self) -> Result<User> {
        self.client.get_v1("/user").await
    }
}
