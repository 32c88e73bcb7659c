// ── Dashboard seam ──
//
// The engine talks to the remote system of record only through this trait,
// so snapshot and apply logic can run against an in-memory fake in tests.

use std::future::Future;

use serde_json::{Map, Value};

use rfsync_api::{DashboardClient, Device, Error, Network, Organization, RfProfile};

/// The dashboard operations the reconciler consumes.
///
/// Calls are issued strictly one at a time; implementations need no
/// internal synchronization beyond what `Sync` already requires.
pub trait Dashboard: Sync {
    fn list_organizations(&self) -> impl Future<Output = Result<Vec<Organization>, Error>> + Send;

    fn list_networks(
        &self,
        org_id: &str,
    ) -> impl Future<Output = Result<Vec<Network>, Error>> + Send;

    fn list_rf_profiles(
        &self,
        network_id: &str,
    ) -> impl Future<Output = Result<Vec<RfProfile>, Error>> + Send;

    fn create_rf_profile(
        &self,
        network_id: &str,
        profile: &Map<String, Value>,
    ) -> impl Future<Output = Result<RfProfile, Error>> + Send;

    fn update_rf_profile(
        &self,
        network_id: &str,
        rf_profile_id: &str,
        profile: &Map<String, Value>,
    ) -> impl Future<Output = Result<RfProfile, Error>> + Send;

    fn list_network_devices(
        &self,
        network_id: &str,
    ) -> impl Future<Output = Result<Vec<Device>, Error>> + Send;

    fn assign_rf_profile(
        &self,
        serial: &str,
        rf_profile_id: &str,
    ) -> impl Future<Output = Result<(), Error>> + Send;
}

impl Dashboard for DashboardClient {
    async fn list_organizations(&self) -> Result<Vec<Organization>, Error> {
        DashboardClient::list_organizations(self).await
    }

    async fn list_networks(&self, org_id: &str) -> Result<Vec<Network>, Error> {
        DashboardClient::list_networks(self, org_id).await
    }

    async fn list_rf_profiles(&self, network_id: &str) -> Result<Vec<RfProfile>, Error> {
        DashboardClient::list_rf_profiles(self, network_id).await
    }

    async fn create_rf_profile(
        &self,
        network_id: &str,
        profile: &Map<String, Value>,
    ) -> Result<RfProfile, Error> {
        DashboardClient::create_rf_profile(self, network_id, profile).await
    }

    async fn update_rf_profile(
        &self,
        network_id: &str,
        rf_profile_id: &str,
        profile: &Map<String, Value>,
    ) -> Result<RfProfile, Error> {
        DashboardClient::update_rf_profile(self, network_id, rf_profile_id, profile).await
    }

    async fn list_network_devices(&self, network_id: &str) -> Result<Vec<Device>, Error> {
        DashboardClient::list_network_devices(self, network_id).await
    }

    async fn assign_rf_profile(&self, serial: &str, rf_profile_id: &str) -> Result<(), Error> {
        self.update_device_radio_settings(serial, rf_profile_id)
            .await
            .map(|_| ())
    }
}
