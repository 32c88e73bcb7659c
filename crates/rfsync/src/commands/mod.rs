//! Command dispatch: bridges CLI args -> reconciliation engine -> output.

pub mod apply;
pub mod config_cmd;
pub mod export;
pub mod orgs;
pub mod plan;
pub mod util;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;
use crate::output::Status;

use util::Session;

/// Dispatch a dashboard-bound command to the appropriate handler.
pub async fn dispatch(cmd: Command, session: &Session, global: &GlobalOpts) -> Result<(), CliError> {
    let status = Status::new(global);
    match cmd {
        Command::Orgs => orgs::list_orgs(session, global).await,
        Command::Networks => orgs::list_networks(session, global, status).await,
        Command::Export(args) => export::handle(session, args, global, status).await,
        Command::Plan(args) => plan::handle(session, args, global, status).await,
        Command::Apply(args) => apply::handle(session, args, global, status).await,
        // Config and Completions are handled before dispatch
        Command::Config(_) | Command::Completions(_) => unreachable!(),
    }
}
