//! Branches API.

use crate::client::PhantombusterClient;
use crate::error::Result;
use crate::types::{
    Branch, BranchDiff, BranchDiffResponse, BranchIdBody, BranchListResponse,
    CreateBranchRequest, SuccessResponse,
};

/// Branches API client.
pub struct BranchesApi {
    client: PhantombusterClient,
}

impl BranchesApi {
    pub(crate) fn new(client: PhantombusterClient) -> Self {
        Self { client }
    }

    /// List the branches of the current organization.
    pub async fn fetch_all(&self) -> Result<Vec<Branch>> {
        let response: BranchListResponse = self.client.get("/branches/fetch-all").await?;
        Ok(response.branches)
    }

    /// Length difference between the staging and release branches of all scripts.
    pub async fn diff(&self) -> Result<Vec<BranchDiff>> {
        let response: BranchDiffResponse = self.client.get("/branches/diff").await?;
        Ok(response.diffs)
    }

    /// Create a branch.
    pub async fn create(&self, request: CreateBranchRequest) -> Result<Branch> {
        self.client.post("/branches/create", &request).await
    }

    /// Delete a branch.
    pub async fn delete(&self, branch_id: i64) -> Result<SuccessResponse> {
        self.client
            .post("/branches/delete", &BranchIdBody { branch_id })
            .await
    }

    /// Release a branch.
    pub async fn release(&self, branch_id: i64) -> Result<SuccessResponse> {
        self.client
            .post("/branches/release", &BranchIdBody { branch_id })
            .await
    }
}
