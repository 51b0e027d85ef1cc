//! Location API.

use crate::client::PhantombusterClient;
use crate::error::Result;
use crate::types::LocationInfo;

/// Location API client.
pub struct LocationApi {
    client: PhantombusterClient,
}

impl LocationApi {
    pub(crate) fn new(client: PhantombusterClient) -> Self {
        Self { client }
    }

    /// Location of the IP address requests are sent from.
    pub async fn ip(&self) -> Result<LocationInfo> {
        self.client.get("/location/ip").await
    }
}
