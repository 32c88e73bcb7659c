// ── State snapshot ──
//
// Read-only inventory of what the dashboard holds right now: the
// organization to work in, its networks, and every wireless network's
// RF profiles. Any failure here is fatal to the run.

use tracing::{debug, info, warn};

use rfsync_api::{Network, Organization};

use crate::dashboard::Dashboard;
use crate::error::CoreError;
use crate::model::{Baseline, NetworkBaseline, network_key};

/// Pick the organization to work in.
///
/// A single visible organization is chosen without asking. Otherwise
/// `wanted` must match an organization id exactly or a name
/// case-insensitively.
pub fn select_organization<'a>(
    orgs: &'a [Organization],
    wanted: Option<&str>,
) -> Result<&'a Organization, CoreError> {
    match (orgs, wanted) {
        ([], _) => Err(CoreError::NoOrganizations),
        ([only], None) => Ok(only),
        (_, Some(wanted)) => {
            let wanted = wanted.trim();
            orgs.iter()
                .find(|o| o.id == wanted || o.name.eq_ignore_ascii_case(wanted))
                .ok_or_else(|| CoreError::OrganizationNotFound {
                    identifier: wanted.to_owned(),
                })
        }
        (_, None) => Err(CoreError::OrganizationNotFound {
            identifier: format!("(one of {} organizations must be chosen)", orgs.len()),
        }),
    }
}

/// Find a network by name, case-insensitively.
pub fn find_network<'a>(networks: &'a [Network], name: &str) -> Result<&'a Network, CoreError> {
    let key = network_key(name);
    networks
        .iter()
        .find(|n| network_key(&n.name) == key)
        .ok_or_else(|| CoreError::NetworkNotFound {
            identifier: name.to_owned(),
        })
}

/// Fetch every network of an organization.
pub async fn fetch_networks<D: Dashboard>(
    dashboard: &D,
    org_id: &str,
) -> Result<Vec<Network>, CoreError> {
    let networks = dashboard.list_networks(org_id).await?;
    info!(org_id, count = networks.len(), "collected networks");
    Ok(networks)
}

/// Build the baseline: for every wireless network, its existing RF
/// profiles by name. Non-wireless networks are skipped.
///
/// `on_network` is called once per network inspected, wireless or not.
pub async fn build_baseline<D: Dashboard>(
    dashboard: &D,
    networks: &[Network],
    mut on_network: impl FnMut(&Network),
) -> Result<Baseline, CoreError> {
    let mut baseline = Baseline::new();

    for network in networks {
        on_network(network);
        if !network.is_wireless() {
            debug!(network = %network.name, "skipping non-wireless network");
            continue;
        }

        let profiles = dashboard.list_rf_profiles(&network.id).await.map_err(|e| {
            warn!(network = %network.name, error = %e, "failed to collect RF profiles");
            CoreError::from(e)
        })?;

        let mut entry = NetworkBaseline::new(&network.id, &network.name);
        for profile in &profiles {
            match (profile.name(), profile.id()) {
                (Some(name), Some(id)) => {
                    entry.rf.insert(name.to_owned(), id.to_owned());
                }
                _ => warn!(network = %network.name, "ignoring RF profile without name or id"),
            }
        }
        debug!(network = %network.name, profiles = entry.rf.len(), "captured baseline");

        if let Some(previous) = baseline.insert(entry) {
            warn!(
                network = %network.name,
                replaced = %previous.id,
                "two networks share a name (case-insensitive); keeping the later one"
            );
        }
    }

    info!(
        networks = baseline.len(),
        profiles = baseline.profile_count(),
        "baseline captured"
    );
    Ok(baseline)
}
