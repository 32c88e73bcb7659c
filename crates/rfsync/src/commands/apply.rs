//! Validate, confirm, then push the change-set to the dashboard.

use tabled::Tabled;

use rfsync_core::{ApplyEvent, ApplyFailure, ApplyReport, Operation};

use crate::cli::{ApplyArgs, GlobalOpts};
use crate::error::CliError;
use crate::output::{self, Status};

use super::plan;
use super::util::{self, Session};

#[derive(Tabled)]
struct FailureRow {
    #[tabled(rename = "Network")]
    network: String,
    #[tabled(rename = "RF Profile")]
    profile: String,
    #[tabled(rename = "Stage")]
    stage: String,
    #[tabled(rename = "AP")]
    serial: String,
    #[tabled(rename = "Error")]
    error: String,
}

impl From<&ApplyFailure> for FailureRow {
    fn from(f: &ApplyFailure) -> Self {
        Self {
            network: f.network.clone(),
            profile: f.profile.clone(),
            stage: f.stage.to_string(),
            serial: f.serial.clone().unwrap_or_else(|| "-".into()),
            error: f.error.clone(),
        }
    }
}

fn detail(r: &ApplyReport) -> String {
    [
        format!("Networks:         {}", r.networks),
        format!("Profiles written: {}", r.profiles_written),
        format!("APs assigned:     {}", r.aps_assigned),
        format!("Failures:         {}", r.failures.len()),
    ]
    .join("\n")
}

pub async fn handle(
    session: &Session,
    args: ApplyArgs,
    global: &GlobalOpts,
    status: Status,
) -> Result<(), CliError> {
    let (templates, report) = plan::prepare(session, &args.sync, status).await?;
    let mut change_set = report.change_set;

    status.info(format!(
        "{} RF profile(s) staged across {} network(s).",
        change_set.profile_count(),
        change_set.len()
    ));
    if !util::confirm("Ready to deploy changes. Continue?", global.yes)? {
        return Err(CliError::Aborted);
    }

    status.step(4, "Upload RF profiles & assign to APs");
    let pb = util::progress_bar(change_set.len(), status);
    let result = rfsync_core::apply(&mut change_set, &templates, &session.client, |event| {
        match event {
            ApplyEvent::NetworkStarted { network, profiles } => {
                pb.set_message(network.to_owned());
                pb.println(format!("Working on network: {network} ({profiles} profile(s))"));
            }
            ApplyEvent::ProfileWritten {
                profile, oper, id, ..
            } => {
                let verb = match oper {
                    Operation::Add => "Created",
                    Operation::Update => "Updated",
                };
                pb.println(format!("  {verb} profile {profile} ({id})"));
            }
            ApplyEvent::AccessPointsResolved { profile, count, .. } => {
                if count == 0 {
                    pb.println(format!("  No APs to assign for {profile}"));
                } else {
                    pb.println(format!("  Assigning {profile} to {count} AP(s)"));
                }
            }
            ApplyEvent::AccessPointAssigned { .. } => {}
            ApplyEvent::Failed { profile, stage, .. } => {
                pb.println(format!("  Failed: {stage} for {profile}"));
            }
            ApplyEvent::NetworkFinished { network } => {
                pb.println(format!("Network {network} completed!"));
                pb.inc(1);
            }
        }
    })
    .await;
    pb.finish_and_clear();

    if result.is_success() {
        status.success("Completed updates!");
    } else {
        status.warn(format!(
            "Encountered {} error(s) during updates.",
            result.failures.len()
        ));
        if util::want_errors(args.sync.show_errors)? {
            let rows: Vec<FailureRow> = result.failures.iter().map(FailureRow::from).collect();
            eprintln!("{}", output::render_table(&rows));
        }
    }

    let out = output::render_single(&global.output, &result, detail, |r| {
        r.failures.len().to_string()
    });
    output::print_output(&out, global.quiet);

    if result.is_success() {
        Ok(())
    } else {
        Err(CliError::ApplyFailed {
            failed: result.failures.len(),
        })
    }
}
