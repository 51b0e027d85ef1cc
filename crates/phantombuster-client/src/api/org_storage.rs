//! Organization storage API (leads and lead lists).

use std::collections::HashMap;

use crate::client::PhantombusterClient;
use crate::error::Result;
use crate::types::{
    DeleteLeadsRequest, DeleteListRequest, Lead, LeadListResponse, SaveLeadRequest,
    SuccessResponse,
};

/// Organization storage API client.
pub struct OrgStorageApi {
    client: PhantombusterClient,
}

impl OrgStorageApi {
    pub(crate) fn new(client: PhantombusterClient) -> Self {
        Self { client }
    }

    /// List the leads of a list.
    pub async fn fetch_leads_by_list(&self, list_id: i64) -> Result<Vec<Lead>> {
        let response: LeadListResponse = self
            .client
            .post_empty(&format!("/org-storage/leads/by-list/{}", list_id))
            .await?;
        Ok(response.leads)
    }

    /// Save (create or update) a lead.
    pub async fn save_lead(&self, request: SaveLeadRequest) -> Result<Lead> {
        self.client.post("/org-storage/leads/save", &request).await
    }

    /// Create a lead in a list.
    pub async fn create_lead(
        &self,
        list_id: i64,
        data: HashMap<String, serde_json::Value>,
    ) -> Result<Lead> {
        self.save_lead(SaveLeadRequest {
            list_id,
            data,
            id: None,
        })
        .await
    }

    /// Delete several leads.
    pub async fn delete_many_leads(&self, lead_ids: &[i64]) -> Result<SuccessResponse> {
        self.client
            .post(
                "/org-storage/leads/delete-many",
                &DeleteLeadsRequest { lead_ids },
            )
            .await
    }

    /// Delete a lead list.
    pub async fn delete_list(&self, list_id: i64) -> Result<SuccessResponse> {
        self.client
            .post("/org-storage/lists/delete", &DeleteListRequest { list_id })
            .await
    }
}
