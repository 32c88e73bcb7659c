//! Organization and network listings.

use tabled::Tabled;

use rfsync_core::{CoreError, Network, Organization, fetch_networks};

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output::{self, Status};

use super::util::{self, Session};

// ── Table rows ──────────────────────────────────────────────────────

#[derive(Tabled)]
struct OrgRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
}

impl From<&Organization> for OrgRow {
    fn from(o: &Organization) -> Self {
        Self {
            id: o.id.clone(),
            name: o.name.clone(),
        }
    }
}

#[derive(Tabled)]
struct NetworkRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Products")]
    products: String,
    #[tabled(rename = "Tags")]
    tags: String,
}

impl From<&Network> for NetworkRow {
    fn from(n: &Network) -> Self {
        Self {
            id: n.id.clone(),
            name: n.name.clone(),
            products: n.product_types.join(", "),
            tags: n.tags.join(", "),
        }
    }
}

// ── Handlers ────────────────────────────────────────────────────────

pub async fn list_orgs(session: &Session, global: &GlobalOpts) -> Result<(), CliError> {
    let orgs = session
        .client
        .list_organizations()
        .await
        .map_err(CoreError::from)?;
    let out = output::render_list(
        &global.output,
        &orgs,
        |o| OrgRow::from(o),
        |o| o.id.clone(),
    );
    output::print_output(&out, global.quiet);
    Ok(())
}

/// Wireless networks only; the rest carry no RF profiles.
pub async fn list_networks(
    session: &Session,
    global: &GlobalOpts,
    status: Status,
) -> Result<(), CliError> {
    let org = session.organization(status).await?;

    let spinner = util::spinner("Collecting networks...", status);
    let networks = fetch_networks(&session.client, &org.id).await;
    spinner.finish_and_clear();

    let wireless: Vec<Network> = networks?.into_iter().filter(Network::is_wireless).collect();
    let out = output::render_list(
        &global.output,
        &wireless,
        |n| NetworkRow::from(n),
        |n| n.name.clone(),
    );
    output::print_output(&out, global.quiet);
    Ok(())
}
