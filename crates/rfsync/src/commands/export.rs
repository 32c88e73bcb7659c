//! Export a network's RF profiles as template files.

use dialoguer::Input;

use rfsync_core::{Network, export_profiles, fetch_networks, find_network};

use crate::cli::{ExportArgs, GlobalOpts};
use crate::error::CliError;
use crate::output::{self, Status};

use super::util::{self, Session};

pub async fn handle(
    session: &Session,
    args: ExportArgs,
    global: &GlobalOpts,
    status: Status,
) -> Result<(), CliError> {
    status.step(1, "Connect to Meraki");
    let org = session.organization(status).await?;

    status.step(2, "Select network");
    status.info("Collecting networks...");
    let networks = fetch_networks(&session.client, &org.id).await?;
    status.info(format!("Found {} networks.", networks.len()));
    let network = pick_network(&networks, args.network.as_deref(), status)?;

    status.step(3, "Export RF profiles");
    let spinner = util::spinner("Collecting RF profiles...", status);
    let written = export_profiles(&session.client, &network.id, &args.dir).await;
    spinner.finish_and_clear();
    let written = written?;

    status.success(format!(
        "Exported {} RF profile(s) from {} to {}",
        written.len(),
        network.name,
        args.dir.display()
    ));
    let paths: Vec<String> = written.iter().map(|p| p.display().to_string()).collect();
    output::print_output(&paths.join("\n"), global.quiet);
    Ok(())
}

/// The named network, or ask until a name matches.
fn pick_network<'a>(
    networks: &'a [Network],
    wanted: Option<&str>,
    status: Status,
) -> Result<&'a Network, CliError> {
    if let Some(name) = wanted {
        return Ok(find_network(networks, name)?);
    }
    if !util::is_interactive() {
        return Err(CliError::NonInteractive {
            action: "network selection (use --network)".into(),
        });
    }
    loop {
        let name: String = Input::new()
            .with_prompt("Enter name of network to export settings from")
            .interact_text()?;
        match find_network(networks, &name) {
            Ok(network) => return Ok(network),
            Err(_) => status.warn("Can't find a matching network name. Please try again."),
        }
    }
}
