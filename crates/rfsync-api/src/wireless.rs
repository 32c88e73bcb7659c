// Wireless endpoints: RF profiles and per-device radio settings.

use serde::Serialize;
use serde_json::{Map, Value};
use tracing::debug;

use crate::client::DashboardClient;
use crate::error::Error;
use crate::models::{RadioSettings, RfProfile};

impl DashboardClient {
    /// `GET /networks/{networkId}/wireless/rfProfiles`
    pub async fn list_rf_profiles(&self, network_id: &str) -> Result<Vec<RfProfile>, Error> {
        debug!(network_id, "listing RF profiles");
        self.get(&format!("networks/{network_id}/wireless/rfProfiles"))
            .await
    }

    /// Create an RF profile from an opaque settings document.
    ///
    /// `POST /networks/{networkId}/wireless/rfProfiles`
    pub async fn create_rf_profile(
        &self,
        network_id: &str,
        profile: &Map<String, Value>,
    ) -> Result<RfProfile, Error> {
        debug!(network_id, name = ?profile.get("name"), "creating RF profile");
        self.post(
            &format!("networks/{network_id}/wireless/rfProfiles"),
            profile,
        )
        .await
    }

    /// Overwrite an existing RF profile with an opaque settings document.
    ///
    /// `PUT /networks/{networkId}/wireless/rfProfiles/{rfProfileId}`
    pub async fn update_rf_profile(
        &self,
        network_id: &str,
        rf_profile_id: &str,
        profile: &Map<String, Value>,
    ) -> Result<RfProfile, Error> {
        debug!(network_id, rf_profile_id, "updating RF profile");
        self.put(
            &format!("networks/{network_id}/wireless/rfProfiles/{rf_profile_id}"),
            profile,
        )
        .await
    }

    /// Bind an RF profile to a single access point.
    ///
    /// `PUT /devices/{serial}/wireless/radio/settings` with `{"rfProfileId": "..."}`
    pub async fn update_device_radio_settings(
        &self,
        serial: &str,
        rf_profile_id: &str,
    ) -> Result<RadioSettings, Error> {
        #[derive(Serialize)]
        #[serde(rename_all = "camelCase")]
        struct Body<'a> {
            rf_profile_id: &'a str,
        }

        debug!(serial, rf_profile_id, "assigning RF profile to device");
        self.put(
            &format!("devices/{serial}/wireless/radio/settings"),
            &Body { rf_profile_id },
        )
        .await
    }
}
