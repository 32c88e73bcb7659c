// Dashboard API response types.
//
// Only the fields the reconciler reads are typed; everything else is
// tolerated and ignored. RF profiles stay an opaque ordered JSON object
// because their settings are passed through verbatim.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Product type marker for wireless-capable networks.
pub const WIRELESS_PRODUCT: &str = "wireless";

/// Model prefixes identifying wireless access points.
pub const ACCESS_POINT_MODEL_PREFIXES: &[&str] = &["MR", "CW"];

/// `GET /organizations` item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Organization {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// `GET /organizations/{id}/networks` item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Network {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organization_id: Option<String>,
    #[serde(default)]
    pub product_types: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Network {
    /// Whether the network carries wireless gear (and so RF profiles).
    pub fn is_wireless(&self) -> bool {
        self.product_types.iter().any(|p| p == WIRELESS_PRODUCT)
    }
}

/// `GET /networks/{id}/devices` item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Device {
    pub serial: String,
    #[serde(default)]
    pub model: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub network_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mac: Option<String>,
}

impl Device {
    pub fn is_access_point(&self) -> bool {
        let model = self.model.to_ascii_uppercase();
        ACCESS_POINT_MODEL_PREFIXES
            .iter()
            .any(|prefix| model.starts_with(prefix))
    }
}

/// A wireless RF profile as the dashboard returns it.
///
/// Kept as the raw ordered object: `id`, `name` and `networkId` are read
/// through accessors, every other field is opaque band/power/channel
/// configuration.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RfProfile(Map<String, Value>);

impl RfProfile {
    pub fn id(&self) -> Option<&str> {
        self.0.get("id").and_then(Value::as_str)
    }

    pub fn name(&self) -> Option<&str> {
        self.0.get("name").and_then(Value::as_str)
    }

    pub fn network_id(&self) -> Option<&str> {
        self.0.get("networkId").and_then(Value::as_str)
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_fields(self) -> Map<String, Value> {
        self.0
    }
}

impl From<Map<String, Value>> for RfProfile {
    fn from(fields: Map<String, Value>) -> Self {
        Self(fields)
    }
}

/// `PUT /devices/{serial}/wireless/radio/settings` response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RadioSettings {
    pub serial: String,
    #[serde(default)]
    pub rf_profile_id: Option<String>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn device(model: &str) -> Device {
        Device {
            serial: "Q2XX-0000-0001".into(),
            model: model.into(),
            name: None,
            network_id: None,
            mac: None,
        }
    }

    #[test]
    fn access_points_are_recognised_by_model_prefix() {
        assert!(device("MR46").is_access_point());
        assert!(device("mr36h").is_access_point());
        assert!(device("CW9166I").is_access_point());
        assert!(!device("MS225-48LP").is_access_point());
        assert!(!device("MX68").is_access_point());
        assert!(!device("").is_access_point());
    }

    #[test]
    fn network_wireless_flag_follows_product_types() {
        let net: Network = serde_json::from_str(
            r#"{"id":"N_1","name":"Branch","productTypes":["appliance","wireless"]}"#,
        )
        .unwrap();
        assert!(net.is_wireless());

        let net: Network =
            serde_json::from_str(r#"{"id":"N_2","name":"Core","productTypes":["switch"]}"#)
                .unwrap();
        assert!(!net.is_wireless());
    }

    #[test]
    fn rf_profile_keeps_field_order() {
        let profile: RfProfile = serde_json::from_str(
            r#"{"id":"R1","networkId":"N1","name":"legacy","bandSelectionType":"ap","minBitrateType":"band"}"#,
        )
        .unwrap();
        assert_eq!(profile.id(), Some("R1"));
        assert_eq!(profile.name(), Some("legacy"));
        let keys: Vec<&str> = profile.fields().keys().map(String::as_str).collect();
        assert_eq!(
            keys,
            ["id", "networkId", "name", "bandSelectionType", "minBitrateType"]
        );
    }
}
