//! Validate templates and assignments against the live dashboard, and show
//! the resulting change-set without touching anything.

use tabled::Tabled;

use rfsync_core::{
    PlanRow, Rejection, TemplateSet, ValidationReport, load_assignments, load_templates, validate,
};

use crate::cli::{GlobalOpts, SyncArgs};
use crate::error::CliError;
use crate::output::{self, Status};

use super::util::{self, Session};

// ── Table rows ──────────────────────────────────────────────────────

#[derive(Tabled)]
struct PlanTableRow {
    #[tabled(rename = "Network")]
    network: String,
    #[tabled(rename = "RF Profile")]
    profile: String,
    #[tabled(rename = "Operation")]
    oper: String,
    #[tabled(rename = "Profile ID")]
    profile_id: String,
    #[tabled(rename = "APs")]
    aps: String,
}

impl From<&PlanRow> for PlanTableRow {
    fn from(r: &PlanRow) -> Self {
        Self {
            network: r.network.clone(),
            profile: r.profile.clone(),
            oper: r.oper.to_string(),
            profile_id: r.profile_id.clone().unwrap_or_else(|| "-".into()),
            aps: if r.aps.is_empty() {
                "-".into()
            } else {
                r.aps.join(", ")
            },
        }
    }
}

#[derive(Tabled)]
struct RejectionRow {
    #[tabled(rename = "Error")]
    kind: String,
    #[tabled(rename = "Line")]
    line: String,
    #[tabled(rename = "Network Name")]
    network: String,
    #[tabled(rename = "RF Profiles")]
    profiles: String,
    #[tabled(rename = "APs")]
    aps: String,
    #[tabled(rename = "Detail")]
    detail: String,
}

impl From<&Rejection> for RejectionRow {
    fn from(r: &Rejection) -> Self {
        Self {
            kind: r.kind.to_string(),
            line: r.row.line.map(|l| l.to_string()).unwrap_or_default(),
            network: r.row.network_name.clone(),
            profiles: r.row.rf_profiles.clone(),
            aps: r.row.aps.clone(),
            detail: r.detail.clone().unwrap_or_default(),
        }
    }
}

// ── Shared pipeline ─────────────────────────────────────────────────

/// Steps 1-3 of a sync: connect, snapshot, load inputs, validate.
///
/// Returns the templates with a report holding at least one accepted row.
pub async fn prepare(
    session: &Session,
    args: &SyncArgs,
    status: Status,
) -> Result<(TemplateSet, ValidationReport), CliError> {
    status.step(1, "Connect to Meraki");
    let org = session.organization(status).await?;

    status.step(2, "Collect current RF profiles");
    let (_, baseline) = util::collect_baseline(&session.client, &org, status).await?;

    status.step(3, "Validate new profiles and assignments");
    let (templates, dir) = util::load_with_prompt(
        args.templates.clone(),
        "Enter directory containing new RF profiles",
        status,
        load_templates,
    )?;
    status.info(format!(
        "Loaded {} RF profile template(s) from {}",
        templates.len(),
        dir.display()
    ));
    for name in templates.duplicates() {
        status.warn(format!("Template '{name}' is defined more than once; the last file wins."));
    }

    let (rows, sheet) = util::load_with_prompt(
        args.assignments.clone(),
        "Enter name of CSV containing profile assignments",
        status,
        load_assignments,
    )?;
    status.info(format!("Read {} assignment row(s) from {}", rows.len(), sheet.display()));

    let report = validate(&baseline, &templates, &rows);
    summarize_validation(&report, args.show_errors, status)?;
    report.ensure_accepted()?;
    Ok((templates, report))
}

fn summarize_validation(
    report: &ValidationReport,
    show_errors: bool,
    status: Status,
) -> Result<(), CliError> {
    if report.is_clean() {
        status.success("Profile assignments processed. No issues found!");
        return Ok(());
    }

    status.warn(format!(
        "Issues were found. Only {} of {} assignment rows passed.",
        report.accepted, report.total
    ));
    if util::want_errors(show_errors)? {
        let rows: Vec<RejectionRow> = report.rejections.iter().map(RejectionRow::from).collect();
        eprintln!("{}", output::render_table(&rows));
    }
    Ok(())
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    session: &Session,
    args: SyncArgs,
    global: &GlobalOpts,
    status: Status,
) -> Result<(), CliError> {
    let (_, report) = prepare(session, &args, status).await?;

    let rows = report.change_set.plan_rows();
    let out = output::render_list(
        &global.output,
        &rows,
        |r| PlanTableRow::from(r),
        |r| format!("{}\t{}\t{}", r.network, r.profile, r.oper),
    );
    output::print_output(&out, global.quiet);
    Ok(())
}
