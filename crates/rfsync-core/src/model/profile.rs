// ── RF profile documents ──

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use rfsync_api::RfProfile;

/// Key holding the profile name; the identity of a staged profile.
pub const NAME_KEY: &str = "name";
/// Remote identifier, assigned by the dashboard on creation.
pub const ID_KEY: &str = "id";
/// Remote network linkage, assigned by the dashboard.
pub const NETWORK_ID_KEY: &str = "networkId";

/// An RF profile as an ordered bag of fields.
///
/// Band, power and channel settings are opaque and passed through to the
/// dashboard untouched. Only `name` and the remote-assigned `id` /
/// `networkId` keys are ever inspected.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProfileDocument(IndexMap<String, Value>);

impl ProfileDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(&self) -> Option<&str> {
        self.0.get(NAME_KEY).and_then(Value::as_str)
    }

    pub fn id(&self) -> Option<&str> {
        self.0.get(ID_KEY).and_then(Value::as_str)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Set a field, keeping its position if it already exists.
    pub fn insert(&mut self, key: impl Into<String>, value: Value) -> Option<Value> {
        self.0.insert(key.into(), value)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Strip remote-assigned fields so the document can seed a creation
    /// in any network. Field order of the remainder is preserved.
    pub fn into_template(mut self) -> Self {
        self.0.shift_remove(ID_KEY);
        self.0.shift_remove(NETWORK_ID_KEY);
        self
    }

    /// The request body for create/update calls.
    pub fn to_request_body(&self) -> Map<String, Value> {
        self.0
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }
}

impl From<RfProfile> for ProfileDocument {
    fn from(profile: RfProfile) -> Self {
        profile.into_fields().into_iter().collect()
    }
}

impl FromIterator<(String, Value)> for ProfileDocument {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
