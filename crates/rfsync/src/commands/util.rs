//! Shared helpers for command handlers: the dashboard session and the
//! interactive prompts.

use std::io::IsTerminal;
use std::path::{Path, PathBuf};

use dialoguer::{Confirm, Input, Select};
use indicatif::{ProgressBar, ProgressStyle};

use rfsync_core::{
    Baseline, CoreError, Dashboard, DashboardClient, DashboardConfig, Network, Organization,
    build_baseline, fetch_networks, select_organization,
};

use crate::cli::GlobalOpts;
use crate::config;
use crate::error::CliError;
use crate::output::Status;

pub fn is_interactive() -> bool {
    std::io::stdin().is_terminal() && std::io::stderr().is_terminal()
}

/// An authenticated dashboard client and the organization the run asked for.
pub struct Session {
    pub client: DashboardClient,
    wanted_org: Option<String>,
}

impl Session {
    /// Build the client from config, profile, and CLI overrides. No request
    /// is made until the first call.
    pub fn open(global: &GlobalOpts) -> Result<Self, CliError> {
        let cfg = config::load_config_or_default();
        let profile_name = config::active_profile_name(global, &cfg);

        if global.profile.is_some() && !cfg.profiles.contains_key(&profile_name) {
            return Err(CliError::ProfileNotFound {
                name: profile_name,
                available: available_profiles(&cfg),
            });
        }

        let profile = cfg.profile_or_default(&profile_name);
        let dashboard: DashboardConfig =
            config::resolve_profile(&profile, &profile_name, &cfg.defaults, global)?;
        tracing::debug!(
            profile = %profile_name,
            base_url = %dashboard.base_url,
            "opening dashboard session"
        );

        Ok(Self {
            client: dashboard.connect()?,
            wanted_org: config::wanted_organization(global, &profile),
        })
    }

    /// Pick the organization: flag or profile, the only one visible, or an
    /// interactive choice.
    pub async fn organization(&self, status: Status) -> Result<Organization, CliError> {
        let spinner = spinner("Connecting to Meraki...", status);
        let orgs = self.client.list_organizations().await;
        spinner.finish_and_clear();
        let orgs = orgs.map_err(CoreError::from)?;

        status.success("Connected to Meraki dashboard!");
        status.info(format!("Found {} organization(s).", orgs.len()));

        let wanted = self.wanted_org.as_deref();
        if orgs.len() > 1 && wanted.is_none() {
            if !is_interactive() {
                return Err(CliError::NonInteractive {
                    action: "organization selection (use --org)".into(),
                });
            }
            let names: Vec<&str> = orgs.iter().map(|o| o.name.as_str()).collect();
            let choice = Select::new()
                .with_prompt("Which organization should we use?")
                .items(&names)
                .default(0)
                .interact()?;
            let org = orgs.get(choice).cloned().ok_or(CliError::NoOrganizations)?;
            status.info(format!("Working with org: {}", org.name));
            return Ok(org);
        }

        let org = select_organization(&orgs, wanted)?.clone();
        status.info(format!("Working with org: {}", org.name));
        Ok(org)
    }
}

fn available_profiles(cfg: &config::Config) -> String {
    if cfg.profiles.is_empty() {
        "(none)".into()
    } else {
        cfg.profiles.keys().cloned().collect::<Vec<_>>().join(", ")
    }
}

/// A spinner on stderr, hidden in quiet mode.
pub fn spinner(message: &str, status: Status) -> ProgressBar {
    if status.is_quiet() {
        return ProgressBar::hidden();
    }
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
        pb.set_style(style);
    }
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    pb.set_message(message.to_owned());
    pb
}

/// A bar counting `len` units, hidden in quiet mode.
pub fn progress_bar(len: usize, status: Status) -> ProgressBar {
    if status.is_quiet() {
        return ProgressBar::hidden();
    }
    let pb = ProgressBar::new(u64::try_from(len).unwrap_or(u64::MAX));
    if let Ok(style) =
        ProgressStyle::default_bar().template("{msg:24} [{bar:40.cyan/blue}] {pos}/{len}")
    {
        pb.set_style(style.progress_chars("=> "));
    }
    pb
}

/// Fetch the organization's networks and capture the baseline.
pub async fn collect_baseline<D: Dashboard>(
    dashboard: &D,
    org: &Organization,
    status: Status,
) -> Result<(Vec<Network>, Baseline), CliError> {
    status.info("Collecting networks...");
    let networks = fetch_networks(dashboard, &org.id).await?;
    status.info(format!("Found {} networks.", networks.len()));

    status.info("Collecting existing RF profiles...");
    let pb = progress_bar(networks.len(), status);
    pb.set_message("Collecting");
    let baseline = build_baseline(dashboard, &networks, |n| {
        pb.set_message(n.name.clone());
        pb.inc(1);
    })
    .await;
    pb.finish_and_clear();
    let baseline = baseline?;

    status.info(format!(
        "Saved information about {} RF profiles.",
        baseline.profile_count()
    ));
    Ok((networks, baseline))
}

/// Load an input with `load`, starting from `initial` or a prompt.
///
/// Retryable failures (missing directory or file) re-prompt on a
/// terminal; elsewhere they surface as errors. Other failures abort.
pub fn load_with_prompt<T>(
    initial: Option<PathBuf>,
    prompt: &str,
    status: Status,
    load: impl Fn(&Path) -> Result<T, CoreError>,
) -> Result<(T, PathBuf), CliError> {
    let mut next = initial;
    loop {
        let path = match next.take() {
            Some(path) => path,
            None => {
                if !is_interactive() {
                    return Err(CliError::NonInteractive {
                        action: prompt.to_owned(),
                    });
                }
                let raw: String = Input::new().with_prompt(prompt).interact_text()?;
                PathBuf::from(raw.trim())
            }
        };

        match load(&path) {
            Ok(value) => return Ok((value, path)),
            Err(e) if e.is_retryable() && is_interactive() => {
                status.warn(e.to_string());
            }
            Err(e) => return Err(e.into()),
        }
    }
}

/// Prompt for confirmation, auto-approving if `--yes` was passed.
///
/// Without a terminal there is nobody to ask, so `--yes` is required.
pub fn confirm(message: &str, yes_flag: bool) -> Result<bool, CliError> {
    if yes_flag {
        return Ok(true);
    }
    if !is_interactive() {
        return Err(CliError::NonInteractive {
            action: message.to_owned(),
        });
    }
    Ok(Confirm::new()
        .with_prompt(message)
        .default(false)
        .interact()?)
}

/// Ask whether to show an error breakdown, unless the flag already said so.
pub fn want_errors(show_errors: bool) -> Result<bool, CliError> {
    if show_errors {
        return Ok(true);
    }
    if !is_interactive() {
        return Ok(false);
    }
    Ok(Confirm::new()
        .with_prompt("Show errors?")
        .default(false)
        .interact()?)
}
