// ── Network baseline ──
//
// The current per-network RF profile inventory, captured once per run.
// Keys are normalized network names so every lookup is case-insensitive.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Normalize a network name for keying: trimmed and lower-cased.
pub fn network_key(name: &str) -> String {
    name.trim().to_lowercase()
}

/// One wireless network and the RF profiles it already holds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkBaseline {
    /// Remote network identifier.
    pub id: String,
    /// Network name as the dashboard spells it.
    pub name: String,
    /// Existing profile name -> remote profile id.
    pub rf: IndexMap<String, String>,
}

impl NetworkBaseline {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            rf: IndexMap::new(),
        }
    }

    pub fn with_profile(mut self, name: impl Into<String>, id: impl Into<String>) -> Self {
        self.rf.insert(name.into(), id.into());
        self
    }

    /// Remote id of an existing profile, matched by exact name.
    pub fn profile_id(&self, profile: &str) -> Option<&str> {
        self.rf.get(profile).map(String::as_str)
    }
}

/// All wireless networks of an organization, keyed by [`network_key`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Baseline {
    networks: IndexMap<String, NetworkBaseline>,
}

impl Baseline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a network under its normalized name. A later network whose
    /// name differs only in case replaces the earlier one.
    pub fn insert(&mut self, network: NetworkBaseline) -> Option<NetworkBaseline> {
        self.networks.insert(network_key(&network.name), network)
    }

    pub fn with_network(mut self, network: NetworkBaseline) -> Self {
        self.insert(network);
        self
    }

    /// Case-insensitive lookup by network name.
    pub fn get(&self, name: &str) -> Option<&NetworkBaseline> {
        self.networks.get(&network_key(name))
    }

    pub fn len(&self) -> usize {
        self.networks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.networks.is_empty()
    }

    /// Total existing profiles across every network.
    pub fn profile_count(&self) -> usize {
        self.networks.values().map(|n| n.rf.len()).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &NetworkBaseline)> {
        self.networks.iter().map(|(k, v)| (k.as_str(), v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookups_ignore_case_and_padding() {
        let baseline = Baseline::new()
            .with_network(NetworkBaseline::new("N1", "Branch-A").with_profile("legacy", "R1"));

        assert_eq!(baseline.get("branch-a").map(|n| n.id.as_str()), Some("N1"));
        assert_eq!(baseline.get("  BRANCH-A ").map(|n| n.id.as_str()), Some("N1"));
        assert!(baseline.get("branch-b").is_none());
        assert_eq!(baseline.iter().next().map(|(k, _)| k), Some("branch-a"));
    }

    #[test]
    fn profile_names_stay_case_sensitive() {
        let net = NetworkBaseline::new("N1", "Branch-A").with_profile("Legacy", "R1");
        assert_eq!(net.profile_id("Legacy"), Some("R1"));
        assert_eq!(net.profile_id("legacy"), None);
    }

    #[test]
    fn profile_count_sums_networks() {
        let baseline = Baseline::new()
            .with_network(
                NetworkBaseline::new("N1", "a")
                    .with_profile("p1", "R1")
                    .with_profile("p2", "R2"),
            )
            .with_network(NetworkBaseline::new("N2", "b").with_profile("p1", "R3"));
        assert_eq!(baseline.len(), 2);
        assert_eq!(baseline.profile_count(), 3);
    }
}
