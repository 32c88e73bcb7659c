// ── Change applier ──
//
// Walks the change-set in order and converges the dashboard onto it:
// create or update each profile, then bind it to its access points.
// Failures are isolated per (network, profile); the run itself never
// aborts on one. Nothing is rolled back.

use serde::Serialize;
use strum::Display;
use tracing::{debug, info, warn};

use crate::dashboard::Dashboard;
use crate::model::{ApTargets, ChangeSet, Operation, ProfileChange, ProfileDocument};
use crate::templates::TemplateSet;

/// The step of a profile's application that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "title_case")]
pub enum ApplyStage {
    CreateProfile,
    UpdateProfile,
    ResolveAccessPoints,
    AssignAccessPoint,
}

/// One recorded failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApplyFailure {
    /// Network name key.
    pub network: String,
    pub profile: String,
    pub stage: ApplyStage,
    /// AP serial, for assignment failures.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub serial: Option<String>,
    /// Human-readable message from the dashboard.
    pub error: String,
}

/// Totals for one apply run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ApplyReport {
    pub networks: usize,
    pub profiles_written: usize,
    pub aps_assigned: usize,
    pub failures: Vec<ApplyFailure>,
}

impl ApplyReport {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Progress notifications, in the order work happens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyEvent<'a> {
    NetworkStarted {
        network: &'a str,
        profiles: usize,
    },
    ProfileWritten {
        network: &'a str,
        profile: &'a str,
        oper: Operation,
        id: &'a str,
    },
    AccessPointsResolved {
        network: &'a str,
        profile: &'a str,
        count: usize,
    },
    AccessPointAssigned {
        network: &'a str,
        serial: &'a str,
    },
    Failed {
        network: &'a str,
        profile: &'a str,
        stage: ApplyStage,
    },
    NetworkFinished {
        network: &'a str,
    },
}

struct Run<'r, D, F> {
    dashboard: &'r D,
    on_event: F,
    report: ApplyReport,
}

impl<D, F> Run<'_, D, F>
where
    D: Dashboard,
    F: FnMut(ApplyEvent<'_>),
{
    fn fail(
        &mut self,
        network: &str,
        profile: &str,
        stage: ApplyStage,
        serial: Option<&str>,
        error: String,
    ) {
        warn!(network, profile, %stage, ?serial, %error, "apply step failed");
        (self.on_event)(ApplyEvent::Failed {
            network,
            profile,
            stage,
        });
        self.report.failures.push(ApplyFailure {
            network: network.to_owned(),
            profile: profile.to_owned(),
            stage,
            serial: serial.map(str::to_owned),
            error,
        });
    }

    /// Create or update the profile, recording a fresh id into `change`.
    async fn write_profile(
        &mut self,
        network: &str,
        network_id: &str,
        profile: &str,
        template: &ProfileDocument,
        change: &mut ProfileChange,
    ) -> Option<String> {
        let body = template.to_request_body();
        let (stage, result) = match (change.oper, change.id.as_deref()) {
            (Operation::Update, Some(id)) => (
                ApplyStage::UpdateProfile,
                self.dashboard.update_rf_profile(network_id, id, &body).await,
            ),
            _ => (
                ApplyStage::CreateProfile,
                self.dashboard.create_rf_profile(network_id, &body).await,
            ),
        };

        let written = match result {
            Ok(written) => written,
            Err(e) => {
                self.fail(network, profile, stage, None, e.api_message());
                return None;
            }
        };

        let id = match (change.oper, written.id()) {
            (Operation::Add, Some(id)) => {
                change.id = Some(id.to_owned());
                id.to_owned()
            }
            (Operation::Update, _) => change.id.clone().unwrap_or_default(),
            (Operation::Add, None) => {
                let error = "created profile carries no id".to_owned();
                self.fail(network, profile, stage, None, error);
                return None;
            }
        };

        debug!(network, profile, oper = %change.oper, id, "profile written");
        self.report.profiles_written += 1;
        (self.on_event)(ApplyEvent::ProfileWritten {
            network,
            profile,
            oper: change.oper,
            id: &id,
        });
        Some(id)
    }

    async fn resolve_targets(
        &mut self,
        network: &str,
        network_id: &str,
        profile: &str,
        targets: ApTargets,
    ) -> Option<Vec<String>> {
        let serials = match targets {
            ApTargets::Nothing => Vec::new(),
            ApTargets::Serials(serials) => serials,
            ApTargets::AllAccessPoints => {
                match self.dashboard.list_network_devices(network_id).await {
                    Ok(devices) => devices
                        .into_iter()
                        .filter(rfsync_api::Device::is_access_point)
                        .map(|d| d.serial)
                        .collect(),
                    Err(e) => {
                        let error = e.api_message();
                        self.fail(network, profile, ApplyStage::ResolveAccessPoints, None, error);
                        return None;
                    }
                }
            }
        };
        (self.on_event)(ApplyEvent::AccessPointsResolved {
            network,
            profile,
            count: serials.len(),
        });
        Some(serials)
    }

    async fn assign(&mut self, network: &str, profile: &str, profile_id: &str, serials: &[String]) {
        for serial in serials {
            if let Err(e) = self.dashboard.assign_rf_profile(serial, profile_id).await {
                self.fail(
                    network,
                    profile,
                    ApplyStage::AssignAccessPoint,
                    Some(serial),
                    e.api_message(),
                );
                return;
            }
            debug!(network, profile, serial = %serial, "access point assigned");
            self.report.aps_assigned += 1;
            (self.on_event)(ApplyEvent::AccessPointAssigned { network, serial });
        }
    }
}

/// Apply `change_set` against the dashboard.
///
/// Networks, profiles and serials are processed strictly in change-set
/// order, one call at a time. Newly created profile ids are written back
/// into `change_set` before any AP is bound to them.
pub async fn apply<D: Dashboard>(
    change_set: &mut ChangeSet,
    templates: &TemplateSet,
    dashboard: &D,
    on_event: impl FnMut(ApplyEvent<'_>),
) -> ApplyReport {
    let mut run = Run {
        dashboard,
        on_event,
        report: ApplyReport::default(),
    };

    for (network, entry) in change_set.iter_mut() {
        run.report.networks += 1;
        (run.on_event)(ApplyEvent::NetworkStarted {
            network,
            profiles: entry.rf.len(),
        });

        for (profile, change) in &mut entry.rf {
            let Some(template) = templates.get(profile) else {
                let error = format!("no template named {profile}");
                let stage = match change.oper {
                    Operation::Add => ApplyStage::CreateProfile,
                    Operation::Update => ApplyStage::UpdateProfile,
                };
                run.fail(network, profile, stage, None, error);
                continue;
            };

            let Some(profile_id) = run
                .write_profile(network, &entry.id, profile, template, change)
                .await
            else {
                continue;
            };

            let targets = change.targets();
            if targets.is_nothing() {
                continue;
            }
            let Some(serials) = run
                .resolve_targets(network, &entry.id, profile, targets)
                .await
            else {
                continue;
            };
            run.assign(network, profile, &profile_id, &serials).await;
        }

        (run.on_event)(ApplyEvent::NetworkFinished { network });
    }

    let report = run.report;
    info!(
        networks = report.networks,
        profiles = report.profiles_written,
        aps = report.aps_assigned,
        failures = report.failures.len(),
        "apply finished"
    );
    report
}
