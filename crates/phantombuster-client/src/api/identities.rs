//! Identities API.

use crate::client::PhantombusterClient;
use crate::error::Result;
use crate::types::{Identity, SaveIdentityRequest};

/// Identities API client.
pub struct IdentitiesApi {
    client: PhantombusterClient,
}

impl IdentitiesApi {
    pub(crate) fn new(client: PhantombusterClient) -> Self {
        Self { client }
    }

    /// Save an identity from a session token.
    pub async fn save_with_token(&self, name: &str, token: &str) -> Result<Identity> {
        self.client
            .post(
                "/identities/save-with-token",
                &SaveIdentityRequest { name, token },
            )
            .await
    }
}
