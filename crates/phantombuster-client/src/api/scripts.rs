//! Scripts API.

use crate::client::PhantombusterClient;
use crate::error::{Error, Result};
use crate::types::{
    IdParam, SaveScriptRequest, Script, ScriptListResponse, ScriptVisibility, SuccessResponse,
    UpdateScriptAccessListRequest, UpdateScriptVisibilityRequest,
};

/// Scripts API client.
pub struct ScriptsApi {
    client: PhantombusterClient,
}

impl ScriptsApi {
    pub(crate) fn new(client: PhantombusterClient) -> Self {
        Self { client }
    }

    /// Get a script by ID.
    pub async fn fetch(&self, id: &str) -> Result<Script> {
        self.client
            .get_with_query("/scripts/fetch", &IdParam { id })
            .await
    }

    /// List all scripts of the current user.
    pub async fn fetch_all(&self) -> Result<Vec<Script>> {
        let response: ScriptListResponse = self.client.get("/scripts/fetch-all").await?;
        Ok(response.scripts)
    }

    /// Get the source code of a script.
    pub async fn code(&self, id: &str) -> Result<String> {
        self.client
            .get_text("/scripts/code", Some(&IdParam { id }))
            .await
    }

    /// Change the visibility of a script.
    pub async fn set_visibility(
        &self,
        id: &str,
        visibility: ScriptVisibility,
    ) -> Result<SuccessResponse> {
        self.client
            .post(
                "/scripts/visibility",
                &UpdateScriptVisibilityRequest { id, visibility },
            )
            .await
    }

    /// Replace the access list of a script.
    pub async fn set_access_list(
        &self,
        id: &str,
        access_list: &[String],
    ) -> Result<SuccessResponse> {
        self.client
            .post(
                "/scripts/access-list",
                &UpdateScriptAccessListRequest { id, access_list },
            )
            .await
    }

    /// Save (create or update) a script.
    ///
    /// Fails with [`Error::InvalidRequest`] without sending anything if the
    /// request has neither an ID nor a name.
    pub async fn save(&self, request: SaveScriptRequest) -> Result<SuccessResponse> {
        if request.id.is_none() && request.name.is_none() {
            return Err(Error::InvalidRequest(
                "either a script id or a name must be provided".to_string(),
            ));
        }
        self.client.post("/scripts/save", &request).await
    }

    /// Delete a script.
    pub async fn delete(&self, id: &str) -> Result<SuccessResponse> {
        self.client.post("/scripts/delete", &IdParam { id }).await
    }
}
