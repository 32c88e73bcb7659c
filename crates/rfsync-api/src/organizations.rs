// Organization-scoped endpoints.

use tracing::debug;

use crate::client::DashboardClient;
use crate::error::Error;
use crate::models::{Network, Organization};

impl DashboardClient {
    /// List every organization the API key can see.
    ///
    /// `GET /organizations`
    pub async fn list_organizations(&self) -> Result<Vec<Organization>, Error> {
        debug!("listing organizations");
        self.get_all("organizations").await
    }

    /// List every network in an organization, across all pages.
    ///
    /// `GET /organizations/{organizationId}/networks`
    pub async fn list_networks(&self, org_id: &str) -> Result<Vec<Network>, Error> {
        debug!(org_id, "listing networks");
        self.get_all(&format!("organizations/{org_id}/networks"))
            .await
    }
}
