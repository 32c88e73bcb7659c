// Network device inventory.

use tracing::debug;

use crate::client::DashboardClient;
use crate::error::Error;
use crate::models::Device;

impl DashboardClient {
    /// List every device claimed into a network.
    ///
    /// `GET /networks/{networkId}/devices`
    pub async fn list_network_devices(&self, network_id: &str) -> Result<Vec<Device>, Error> {
        debug!(network_id, "listing network devices");
        self.get(&format!("networks/{network_id}/devices")).await
    }
}
