// ── Change-set ──
//
// The validated, minimal set of remote mutations for one run. Built by the
// validator, mutated by the applier only to record freshly created ids.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use super::assignment::ApTargets;

/// The remote mutation a staged profile needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Operation {
    /// Profile is new to the network: create it.
    Add,
    /// Profile already exists in the network: overwrite it by id.
    Update,
}

/// One profile staged against one network.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileChange {
    /// AP targets from the sheet, trimmed, sentinels kept verbatim.
    pub aps: Vec<String>,
    pub oper: Operation,
    /// Remote id: the baseline id for `update`, filled in after a
    /// successful create for `add`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

impl ProfileChange {
    pub fn add(aps: Vec<String>) -> Self {
        Self {
            aps,
            oper: Operation::Add,
            id: None,
        }
    }

    pub fn update(id: impl Into<String>, aps: Vec<String>) -> Self {
        Self {
            aps,
            oper: Operation::Update,
            id: Some(id.into()),
        }
    }

    pub fn targets(&self) -> ApTargets {
        ApTargets::classify(&self.aps)
    }
}

/// All staged profiles for one network.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkChange {
    /// Remote network identifier.
    pub id: String,
    /// Profile name -> staged change, in first-seen order.
    pub rf: IndexMap<String, ProfileChange>,
}

/// Network key -> staged network changes, in first-seen order.
///
/// Only networks and profiles that need a remote mutation ever appear.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChangeSet {
    networks: IndexMap<String, NetworkChange>,
}

impl ChangeSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stage a profile, creating the network entry on first use.
    ///
    /// A profile staged twice keeps its original position; the later
    /// change replaces the earlier one.
    pub fn stage(
        &mut self,
        network_key: &str,
        network_id: &str,
        profile: impl Into<String>,
        change: ProfileChange,
    ) -> Option<ProfileChange> {
        self.networks
            .entry(network_key.to_owned())
            .or_insert_with(|| NetworkChange {
                id: network_id.to_owned(),
                rf: IndexMap::new(),
            })
            .rf
            .insert(profile.into(), change)
    }

    pub fn get(&self, network_key: &str) -> Option<&NetworkChange> {
        self.networks.get(network_key)
    }

    pub fn len(&self) -> usize {
        self.networks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.networks.is_empty()
    }

    /// Total staged profiles across every network.
    pub fn profile_count(&self) -> usize {
        self.networks.values().map(|n| n.rf.len()).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &NetworkChange)> {
        self.networks.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&str, &mut NetworkChange)> {
        self.networks.iter_mut().map(|(k, v)| (k.as_str(), v))
    }

    /// Flatten into one row per staged profile, for display.
    pub fn plan_rows(&self) -> Vec<PlanRow> {
        self.iter()
            .flat_map(|(network, change)| {
                change.rf.iter().map(move |(profile, pc)| PlanRow {
                    network: network.to_owned(),
                    network_id: change.id.clone(),
                    profile: profile.clone(),
                    oper: pc.oper,
                    profile_id: pc.id.clone(),
                    aps: pc.aps.clone(),
                })
            })
            .collect()
    }
}

/// A flattened change-set entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlanRow {
    pub network: String,
    pub network_id: String,
    pub profile: String,
    pub oper: Operation,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_id: Option<String>,
    pub aps: Vec<String>,
}
