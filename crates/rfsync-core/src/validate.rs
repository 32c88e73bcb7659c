// ── Reconciliation validator ──
//
// Cross-checks raw assignment rows against the baseline and the template
// set. Each row is either accepted in full and merged into the change-set,
// or rejected in full under exactly one category. Rejections never abort
// validation; only an empty result does, and only once the caller asks.

use serde::Serialize;
use strum::{Display, EnumIter};
use tracing::{debug, info, warn};

use crate::error::CoreError;
use crate::model::{ApTargets, AssignmentRow, Baseline, ChangeSet, ProfileChange, network_key};
use crate::templates::TemplateSet;

/// Why an assignment row was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display, EnumIter)]
pub enum RejectionKind {
    /// The network is not a wireless network of the organization.
    #[strum(serialize = "Network Name Mismatch")]
    NetworkNameMismatch,
    /// At least one named profile has no template.
    #[strum(serialize = "RF Profile Name Mismatch")]
    ProfileNameMismatch,
    /// Several profiles were named together with explicit AP targets.
    #[strum(serialize = "Cannot assign multiple profiles to APs")]
    MultiProfileApConflict,
}

/// A rejected row, kept verbatim for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Rejection {
    pub kind: RejectionKind,
    pub row: AssignmentRow,
    /// What exactly failed to match, when there is more to say.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

/// Outcome of validating one assignment sheet.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    pub change_set: ChangeSet,
    pub accepted: usize,
    pub total: usize,
    /// Rejected rows in sheet order.
    pub rejections: Vec<Rejection>,
}

impl ValidationReport {
    pub fn is_clean(&self) -> bool {
        self.rejections.is_empty()
    }

    pub fn rejected(&self) -> usize {
        self.rejections.len()
    }

    pub fn rejections_of(&self, kind: RejectionKind) -> impl Iterator<Item = &Rejection> {
        self.rejections.iter().filter(move |r| r.kind == kind)
    }

    /// Fail when no row survived; nothing could be changed.
    pub fn ensure_accepted(&self) -> Result<(), CoreError> {
        if self.accepted == 0 {
            return Err(CoreError::NoAcceptedRows { total: self.total });
        }
        Ok(())
    }
}

/// Validate `rows` and build the change-set of accepted rows.
pub fn validate(
    baseline: &Baseline,
    templates: &TemplateSet,
    rows: &[AssignmentRow],
) -> ValidationReport {
    let mut report = ValidationReport {
        total: rows.len(),
        ..ValidationReport::default()
    };

    for row in rows {
        match check_row(baseline, templates, row) {
            Ok(()) => {
                stage_row(&mut report.change_set, baseline, row);
                report.accepted += 1;
            }
            Err(rejection) => {
                warn!(
                    line = ?row.line,
                    network = %row.network_name,
                    reason = %rejection.kind,
                    "assignment row rejected"
                );
                report.rejections.push(rejection);
            }
        }
    }

    info!(
        accepted = report.accepted,
        total = report.total,
        networks = report.change_set.len(),
        profiles = report.change_set.profile_count(),
        "assignments validated"
    );
    report
}

fn check_row(
    baseline: &Baseline,
    templates: &TemplateSet,
    row: &AssignmentRow,
) -> Result<(), Rejection> {
    let reject = |kind, detail: Option<String>| Rejection {
        kind,
        row: row.clone(),
        detail,
    };

    if baseline.get(&row.network_name).is_none() {
        return Err(reject(RejectionKind::NetworkNameMismatch, None));
    }

    let profiles = row.profile_names();
    if profiles.is_empty() {
        return Err(reject(
            RejectionKind::ProfileNameMismatch,
            Some("no profile named".into()),
        ));
    }
    let missing: Vec<&str> = profiles
        .iter()
        .map(String::as_str)
        .filter(|p| !templates.contains(p))
        .collect();
    if !missing.is_empty() {
        return Err(reject(
            RejectionKind::ProfileNameMismatch,
            Some(format!("no template for {}", missing.join(", "))),
        ));
    }

    if profiles.len() > 1 && !ApTargets::classify(&row.ap_list()).is_nothing() {
        return Err(reject(RejectionKind::MultiProfileApConflict, None));
    }

    Ok(())
}

fn stage_row(change_set: &mut ChangeSet, baseline: &Baseline, row: &AssignmentRow) {
    let Some(network) = baseline.get(&row.network_name) else {
        return;
    };
    let key = network_key(&row.network_name);
    let aps = row.ap_list();
    let ignored = ApTargets::ignored(&aps);
    if !ignored.is_empty() {
        warn!(
            line = ?row.line,
            network = %key,
            ignored = %ignored.join(", "),
            "AP entries after a leading all/none are ignored"
        );
    }

    for profile in row.profile_names() {
        let change = match network.profile_id(&profile) {
            Some(id) => ProfileChange::update(id, aps.clone()),
            None => ProfileChange::add(aps.clone()),
        };
        debug!(network = %key, profile = %profile, oper = %change.oper, "staged profile");
        if change_set.stage(&key, &network.id, profile, change).is_some() {
            debug!(network = %key, "profile staged by an earlier row; later row wins");
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::model::{NetworkBaseline, Operation, ProfileDocument};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn templates(names: &[&str]) -> TemplateSet {
        TemplateSet::from_documents(names.iter().map(|n| {
            let mut doc = ProfileDocument::new();
            doc.insert("name", json!(n));
            doc.insert("bandSelectionType", json!("ap"));
            doc
        }))
    }

    fn baseline() -> Baseline {
        Baseline::new()
            .with_network(NetworkBaseline::new("N1", "Branch-A").with_profile("legacy", "R1"))
            .with_network(NetworkBaseline::new("N2", "Branch-B"))
    }

    fn row(net: &str, profiles: &str, aps: &str) -> AssignmentRow {
        AssignmentRow::new(net, profiles, aps)
    }

    #[test]
    fn end_to_end_change_set() {
        let rows = [
            row("Branch-A", "legacy", "none"),
            row("Branch-A", "5ghz-boost", "AP100, AP101"),
        ];

        let report = validate(&baseline(), &templates(&["legacy", "5ghz-boost"]), &rows);

        assert_eq!(report.accepted, 2);
        assert!(report.is_clean());
        assert_eq!(
            serde_json::to_value(&report.change_set).unwrap(),
            json!({
                "branch-a": {
                    "id": "N1",
                    "rf": {
                        "legacy": { "aps": ["none"], "oper": "update", "id": "R1" },
                        "5ghz-boost": { "aps": ["AP100", "AP101"], "oper": "add" }
                    }
                }
            })
        );
    }

    #[test]
    fn leading_none_lets_several_profiles_share_a_row() {
        let rows = [row("Branch-B", "legacy, 5ghz-boost", "none, AP100")];
        let report = validate(&baseline(), &templates(&["legacy", "5ghz-boost"]), &rows);

        assert!(report.is_clean());
        let staged = &report.change_set.get("branch-b").unwrap().rf;
        assert_eq!(staged.len(), 2);
        assert!(staged.values().all(|c| c.targets().is_nothing()));
    }

    #[test]
    fn existing_profiles_are_always_updates() {
        let rows = [row("branch-a", "legacy", "")];
        for _ in 0..2 {
            let report = validate(&baseline(), &templates(&["legacy"]), &rows);
            let change = &report.change_set.get("branch-a").unwrap().rf["legacy"];
            assert_eq!(change.oper, Operation::Update);
            assert_eq!(change.id.as_deref(), Some("R1"));
        }
    }

    #[test]
    fn unknown_network_is_rejected_once() {
        let rows = [
            row("Branch-Z", "legacy", "none"),
            row("Branch-A", "legacy", "none"),
        ];
        let report = validate(&baseline(), &templates(&["legacy"]), &rows);

        let mismatches: Vec<_> = report
            .rejections_of(RejectionKind::NetworkNameMismatch)
            .collect();
        assert_eq!(mismatches.len(), 1);
        assert_eq!(mismatches[0].row, rows[0]);
        assert!(report.change_set.get("branch-z").is_none());
        assert_eq!(report.accepted, 1);
        assert_eq!(report.total, 2);
    }

    #[test]
    fn one_unknown_profile_rejects_the_whole_row() {
        let rows = [row("Branch-A", "legacy, ghost", "none")];
        let report = validate(&baseline(), &templates(&["legacy"]), &rows);

        assert!(report.change_set.is_empty());
        assert_eq!(report.rejections.len(), 1);
        let rejection = &report.rejections[0];
        assert_eq!(rejection.kind, RejectionKind::ProfileNameMismatch);
        assert_eq!(rejection.detail.as_deref(), Some("no template for ghost"));
    }

    #[test]
    fn profile_names_are_case_sensitive() {
        let rows = [row("Branch-A", "Legacy", "none")];
        let report = validate(&baseline(), &templates(&["legacy"]), &rows);
        assert_eq!(report.rejections[0].kind, RejectionKind::ProfileNameMismatch);
    }

    #[test]
    fn multi_profile_row_with_aps_is_rejected_not_split() {
        let rows = [row("Branch-A", "legacy,5ghz-boost", "AP001")];
        let report = validate(&baseline(), &templates(&["legacy", "5ghz-boost"]), &rows);

        assert!(report.change_set.is_empty());
        assert_eq!(report.rejections[0].kind, RejectionKind::MultiProfileApConflict);
    }

    #[test]
    fn multi_profile_row_without_aps_is_accepted() {
        let rows = [
            row("Branch-B", "legacy,5ghz-boost", ""),
            row("Branch-A", "legacy,5ghz-boost", " NONE "),
        ];
        let report = validate(&baseline(), &templates(&["legacy", "5ghz-boost"]), &rows);

        assert_eq!(report.accepted, 2);
        assert_eq!(report.change_set.profile_count(), 4);
    }

    #[test]
    fn rows_for_one_network_merge_into_one_entry() {
        let rows = [
            row("Branch-B", "legacy", "AP1"),
            row("BRANCH-B", "5ghz-boost", "AP2"),
        ];
        let report = validate(&baseline(), &templates(&["legacy", "5ghz-boost"]), &rows);

        assert_eq!(report.change_set.len(), 1);
        let entry = report.change_set.get("branch-b").unwrap();
        assert_eq!(entry.id, "N2");
        assert_eq!(
            entry.rf.keys().map(String::as_str).collect::<Vec<_>>(),
            ["legacy", "5ghz-boost"]
        );
        assert!(entry.rf.values().all(|c| c.oper == Operation::Add));
    }

    #[test]
    fn no_accepted_rows_is_fatal_only_on_request() {
        let rows = [row("Branch-Z", "legacy", "")];
        let report = validate(&baseline(), &templates(&["legacy"]), &rows);
        assert!(matches!(
            report.ensure_accepted(),
            Err(CoreError::NoAcceptedRows { total: 1 })
        ));

        let empty = validate(&baseline(), &templates(&["legacy"]), &[]);
        assert!(empty.ensure_accepted().is_err());
    }

    #[test]
    fn rejection_labels() {
        assert_eq!(
            RejectionKind::MultiProfileApConflict.to_string(),
            "Cannot assign multiple profiles to APs"
        );
        assert_eq!(
            RejectionKind::NetworkNameMismatch.to_string(),
            "Network Name Mismatch"
        );
    }
}
