//! CLI configuration -- thin wrapper around `rfsync_config` shared types.
//!
//! Re-exports the shared types and adds CLI-specific resolution that
//! respects `GlobalOpts` flag overrides (--api-key, --base-url, etc.) and
//! falls back to a hidden prompt for the API key.

use std::io::IsTerminal;
use std::time::Duration;

use secrecy::SecretString;

use rfsync_config::Defaults;
use rfsync_core::DashboardConfig;

use crate::cli::GlobalOpts;
use crate::error::CliError;

// ── Re-exports from shared crate ────────────────────────────────────

pub use rfsync_config::{
    Config, Profile, config_path, load_config_or_default, save_config, store_api_key,
};

// ── CLI-specific helpers ────────────────────────────────────────────

/// Resolve the active profile name from CLI flags and config.
pub fn active_profile_name(global: &GlobalOpts, config: &Config) -> String {
    global
        .profile
        .clone()
        .or_else(|| config.default_profile.clone())
        .unwrap_or_else(|| "default".into())
}

/// Organization to work in: flag, then profile.
pub fn wanted_organization(global: &GlobalOpts, profile: &Profile) -> Option<String> {
    global.org.clone().or_else(|| profile.organization.clone())
}

/// Translate a `Profile` + global flags into a `DashboardConfig`.
///
/// CLI flag overrides take priority over profile values.
pub fn resolve_profile(
    profile: &Profile,
    profile_name: &str,
    defaults: &Defaults,
    global: &GlobalOpts,
) -> Result<DashboardConfig, CliError> {
    let api_key = resolve_api_key_with_flag(profile, profile_name, global)?;
    let mut cfg = rfsync_config::dashboard_config(profile, defaults, api_key)?;

    if let Some(ref raw) = global.base_url {
        cfg.base_url = raw.parse().map_err(|_| CliError::Validation {
            field: "base-url".into(),
            reason: format!("invalid URL: {raw}"),
        })?;
    }
    if let Some(secs) = global.timeout {
        cfg.timeout = Duration::from_secs(secs);
    }
    Ok(cfg)
}

/// Resolve the API key: CLI flag / `MERAKI_DASHBOARD_API_KEY`, then the
/// shared credential chain, then a hidden prompt on a terminal.
fn resolve_api_key_with_flag(
    profile: &Profile,
    profile_name: &str,
    global: &GlobalOpts,
) -> Result<SecretString, CliError> {
    if let Some(ref key) = global.api_key {
        tracing::debug!("using API key from flag or environment");
        return Ok(SecretString::from(key.clone()));
    }

    match rfsync_config::resolve_api_key(profile, profile_name) {
        Ok(secret) => Ok(secret),
        Err(rfsync_config::ConfigError::NoCredentials { profile }) => {
            if !std::io::stdin().is_terminal() {
                return Err(CliError::NoCredentials { profile });
            }
            let key = rpassword::prompt_password("Meraki Dashboard API key: ")?;
            if key.trim().is_empty() {
                return Err(CliError::NoCredentials { profile });
            }
            Ok(SecretString::from(key.trim().to_owned()))
        }
        Err(other) => Err(other.into()),
    }
}
