// In-memory `Dashboard` for engine tests.
//
// Holds a tiny model of the remote state, records every call in order and
// fails on demand for chosen (network, profile) pairs or serials.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use serde_json::{Map, Value, json};

use rfsync_api::{Device, Error, Network, Organization, RfProfile};

use crate::dashboard::Dashboard;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Call {
    ListRfProfiles(String),
    Create { network: String, name: String },
    Update { network: String, id: String },
    ListDevices(String),
    Assign { serial: String, rf_profile_id: String },
}

#[derive(Default)]
struct State {
    organizations: Vec<Organization>,
    networks: Vec<Network>,
    rf_profiles: HashMap<String, Vec<RfProfile>>,
    devices: HashMap<String, Vec<Device>>,
    fail_rf_list: HashSet<String>,
    fail_write: HashSet<(String, String)>,
    fail_devices: HashSet<String>,
    fail_assign: HashSet<String>,
    calls: Vec<Call>,
    next_id: u32,
}

#[derive(Default)]
pub(crate) struct FakeDashboard {
    state: Mutex<State>,
}

fn api_error(message: &str) -> Error {
    Error::Api {
        status: 400,
        message: message.to_owned(),
        errors: vec![message.to_owned()],
    }
}

fn profile(id: &str, network_id: &str, name: &str) -> RfProfile {
    match json!({ "id": id, "networkId": network_id, "name": name }) {
        Value::Object(map) => RfProfile::from(map),
        _ => RfProfile::default(),
    }
}

impl FakeDashboard {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    fn with_state(self, f: impl FnOnce(&mut State)) -> Self {
        if let Ok(mut state) = self.state.lock() {
            f(&mut state);
        }
        self
    }

    pub(crate) fn with_organization(self, id: &str, name: &str) -> Self {
        self.with_state(|s| {
            s.organizations.push(Organization {
                id: id.into(),
                name: name.into(),
                url: None,
            });
        })
    }

    pub(crate) fn with_network(self, id: &str, name: &str, product_types: &[&str]) -> Self {
        self.with_state(|s| {
            s.networks.push(Network {
                id: id.into(),
                name: name.into(),
                organization_id: None,
                product_types: product_types.iter().map(|p| (*p).to_string()).collect(),
                tags: Vec::new(),
            });
        })
    }

    pub(crate) fn with_rf_profile(self, network_id: &str, id: &str, name: &str) -> Self {
        self.with_state(|s| {
            s.rf_profiles
                .entry(network_id.into())
                .or_default()
                .push(profile(id, network_id, name));
        })
    }

    pub(crate) fn with_raw_rf_profile(self, network_id: &str, fields: Value) -> Self {
        self.with_state(|s| {
            if let Value::Object(map) = fields {
                s.rf_profiles
                    .entry(network_id.into())
                    .or_default()
                    .push(RfProfile::from(map));
            }
        })
    }

    pub(crate) fn with_device(self, network_id: &str, serial: &str, model: &str) -> Self {
        self.with_state(|s| {
            s.devices.entry(network_id.into()).or_default().push(Device {
                serial: serial.into(),
                model: model.into(),
                name: None,
                network_id: Some(network_id.into()),
                mac: None,
            });
        })
    }

    pub(crate) fn failing_rf_list(self, network_id: &str) -> Self {
        self.with_state(|s| {
            s.fail_rf_list.insert(network_id.into());
        })
    }

    /// Fail create/update of `profile` in `network_id`.
    pub(crate) fn failing_write(self, network_id: &str, profile: &str) -> Self {
        self.with_state(|s| {
            s.fail_write.insert((network_id.into(), profile.into()));
        })
    }

    pub(crate) fn failing_devices(self, network_id: &str) -> Self {
        self.with_state(|s| {
            s.fail_devices.insert(network_id.into());
        })
    }

    pub(crate) fn failing_assign(self, serial: &str) -> Self {
        self.with_state(|s| {
            s.fail_assign.insert(serial.into());
        })
    }

    pub(crate) fn networks(&self) -> Vec<Network> {
        self.state
            .lock()
            .map(|s| s.networks.clone())
            .unwrap_or_default()
    }

    pub(crate) fn calls(&self) -> Vec<Call> {
        self.state
            .lock()
            .map(|s| s.calls.clone())
            .unwrap_or_default()
    }

    pub(crate) fn assign_calls(&self) -> Vec<(String, String)> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::Assign {
                    serial,
                    rf_profile_id,
                } => Some((serial, rf_profile_id)),
                _ => None,
            })
            .collect()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, State>, Error> {
        self.state.lock().map_err(|_| api_error("fake state poisoned"))
    }
}

fn name_of(profile: &Map<String, Value>) -> String {
    profile
        .get("name")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_owned()
}

impl Dashboard for FakeDashboard {
    async fn list_organizations(&self) -> Result<Vec<Organization>, Error> {
        Ok(self.lock()?.organizations.clone())
    }

    async fn list_networks(&self, _org_id: &str) -> Result<Vec<Network>, Error> {
        Ok(self.lock()?.networks.clone())
    }

    async fn list_rf_profiles(&self, network_id: &str) -> Result<Vec<RfProfile>, Error> {
        let mut s = self.lock()?;
        s.calls.push(Call::ListRfProfiles(network_id.into()));
        if s.fail_rf_list.contains(network_id) {
            return Err(api_error("Network not accessible"));
        }
        Ok(s.rf_profiles.get(network_id).cloned().unwrap_or_default())
    }

    async fn create_rf_profile(
        &self,
        network_id: &str,
        profile_body: &Map<String, Value>,
    ) -> Result<RfProfile, Error> {
        let mut s = self.lock()?;
        let name = name_of(profile_body);
        s.calls.push(Call::Create {
            network: network_id.into(),
            name: name.clone(),
        });
        if s.fail_write.contains(&(network_id.to_owned(), name.clone())) {
            return Err(api_error("Invalid band settings"));
        }
        s.next_id += 1;
        let created = profile(&format!("NEW{}", s.next_id), network_id, &name);
        s.rf_profiles
            .entry(network_id.into())
            .or_default()
            .push(created.clone());
        Ok(created)
    }

    async fn update_rf_profile(
        &self,
        network_id: &str,
        rf_profile_id: &str,
        profile_body: &Map<String, Value>,
    ) -> Result<RfProfile, Error> {
        let mut s = self.lock()?;
        let name = name_of(profile_body);
        s.calls.push(Call::Update {
            network: network_id.into(),
            id: rf_profile_id.into(),
        });
        if s.fail_write.contains(&(network_id.to_owned(), name.clone())) {
            return Err(api_error("Invalid band settings"));
        }
        Ok(profile(rf_profile_id, network_id, &name))
    }

    async fn list_network_devices(&self, network_id: &str) -> Result<Vec<Device>, Error> {
        let mut s = self.lock()?;
        s.calls.push(Call::ListDevices(network_id.into()));
        if s.fail_devices.contains(network_id) {
            return Err(api_error("Device listing unavailable"));
        }
        Ok(s.devices.get(network_id).cloned().unwrap_or_default())
    }

    async fn assign_rf_profile(&self, serial: &str, rf_profile_id: &str) -> Result<(), Error> {
        let mut s = self.lock()?;
        s.calls.push(Call::Assign {
            serial: serial.into(),
            rf_profile_id: rf_profile_id.into(),
        });
        if s.fail_assign.contains(serial) {
            return Err(api_error(&format!("Device {serial} not found")));
        }
        Ok(())
    }
}
