//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` variants into user-facing errors with
//! actionable help text and a stable exit code.

use miette::Diagnostic;
use thiserror::Error;

use rfsync_config::ConfigError;
use rfsync_core::CoreError;

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
    pub const ABORTED: i32 = 10;
    pub const INTERRUPTED: i32 = 130;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────
    #[error("Could not connect to the Meraki dashboard at {url}")]
    #[diagnostic(
        code(rfsync::connection_failed),
        help(
            "Check network access to the dashboard API.\n\
             Behind a TLS-inspecting proxy? Set ca_cert on your profile.\n\
             Reason: {reason}"
        )
    )]
    ConnectionFailed { url: String, reason: String },

    #[error("Request timed out")]
    #[diagnostic(
        code(rfsync::timeout),
        help("Increase the timeout with --timeout or `rfsync config set timeout <secs>`.")
    )]
    Timeout,

    #[error("Rate limited by the dashboard (retry after {retry_after_secs}s)")]
    #[diagnostic(
        code(rfsync::rate_limited),
        help("Raise max_retries on your profile, or wait and re-run.")
    )]
    RateLimited { retry_after_secs: u64 },

    // ── Authentication ───────────────────────────────────────────────
    #[error("Authentication failed: {message}")]
    #[diagnostic(
        code(rfsync::auth_failed),
        help(
            "Verify the API key has access to the organization.\n\
             Store a new one with: rfsync config set-key"
        )
    )]
    AuthFailed { message: String },

    #[error("No API key available for profile '{profile}'")]
    #[diagnostic(
        code(rfsync::no_credentials),
        help(
            "Configure one with: rfsync config init\n\
             Or set the MERAKI_DASHBOARD_API_KEY environment variable."
        )
    )]
    NoCredentials { profile: String },

    // ── Resources ────────────────────────────────────────────────────
    #[error("{resource_type} '{identifier}' not found")]
    #[diagnostic(
        code(rfsync::not_found),
        help("Run: rfsync {list_command} to see available {resource_type}s")
    )]
    NotFound {
        resource_type: String,
        identifier: String,
        list_command: String,
    },

    #[error("No organizations are visible to this API key")]
    #[diagnostic(
        code(rfsync::no_organizations),
        help("Enable API access for the organization in Dashboard > Organization > Settings.")
    )]
    NoOrganizations,

    #[error("{what} not found: {path}")]
    #[diagnostic(code(rfsync::missing_input))]
    MissingInput { what: String, path: String },

    // ── Input ────────────────────────────────────────────────────────
    #[error("Invalid {what} {path}")]
    #[diagnostic(code(rfsync::invalid_input), help("{reason}"))]
    InvalidInput {
        what: String,
        path: String,
        reason: String,
    },

    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(rfsync::validation))]
    Validation { field: String, reason: String },

    // ── Reconciliation ───────────────────────────────────────────────
    #[error("None of the {total} assignment rows passed validation")]
    #[diagnostic(
        code(rfsync::nothing_to_apply),
        help("Re-run with --show-errors to see why each row was rejected.")
    )]
    NoAcceptedRows { total: usize },

    #[error("{failed} change(s) failed to apply")]
    #[diagnostic(
        code(rfsync::apply_failed),
        help("Successful changes were kept. Fix the failures and re-run; existing profiles are updated in place.")
    )]
    ApplyFailed { failed: usize },

    // ── API ──────────────────────────────────────────────────────────
    #[error("Dashboard API error: {message}")]
    #[diagnostic(code(rfsync::api_error))]
    ApiError {
        message: String,
        status: Option<u16>,
    },

    // ── Configuration ────────────────────────────────────────────────
    #[error("Profile '{name}' not found in configuration")]
    #[diagnostic(
        code(rfsync::profile_not_found),
        help(
            "Available profiles: {available}\n\
             Create one with: rfsync config init"
        )
    )]
    ProfileNotFound { name: String, available: String },

    #[error("Configuration error: {message}")]
    #[diagnostic(code(rfsync::config))]
    Config { message: String },

    // ── Interactive ──────────────────────────────────────────────────
    #[error("Aborted: no changes were made")]
    #[diagnostic(code(rfsync::aborted))]
    Aborted,

    #[error("Quitting...")]
    #[diagnostic(code(rfsync::interrupted))]
    Interrupted,

    #[error("'{action}' needs an answer but stdin is not a terminal")]
    #[diagnostic(
        code(rfsync::non_interactive),
        help("Pass the value as a flag, or use --yes (-y) to skip confirmation.")
    )]
    NonInteractive { action: String },

    // ── IO / Serialization ───────────────────────────────────────────
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::Timeout => exit_code::TIMEOUT,
            Self::AuthFailed { .. } | Self::NoCredentials { .. } => exit_code::AUTH,
            Self::NotFound { .. } | Self::NoOrganizations | Self::MissingInput { .. } => {
                exit_code::NOT_FOUND
            }
            Self::Validation { .. } | Self::InvalidInput { .. } | Self::NonInteractive { .. } => {
                exit_code::USAGE
            }
            Self::Aborted => exit_code::ABORTED,
            Self::Interrupted => exit_code::INTERRUPTED,
            _ => exit_code::GENERAL,
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ConnectionFailed { url, reason } => CliError::ConnectionFailed { url, reason },

            CoreError::AuthenticationFailed { message } => CliError::AuthFailed { message },

            CoreError::Timeout => CliError::Timeout,

            CoreError::RateLimited { retry_after_secs } => {
                CliError::RateLimited { retry_after_secs }
            }

            CoreError::NoOrganizations => CliError::NoOrganizations,

            CoreError::OrganizationNotFound { identifier } => CliError::NotFound {
                resource_type: "organization".into(),
                identifier,
                list_command: "orgs".into(),
            },

            CoreError::NetworkNotFound { identifier } => CliError::NotFound {
                resource_type: "network".into(),
                identifier,
                list_command: "networks".into(),
            },

            CoreError::NoTemplates { path } => CliError::MissingInput {
                what: "Profile templates".into(),
                path,
            },

            CoreError::AssignmentsNotFound { path } => CliError::MissingInput {
                what: "Assignment file".into(),
                path,
            },

            CoreError::InvalidTemplate { path, reason } => CliError::InvalidInput {
                what: "profile template".into(),
                path,
                reason,
            },

            CoreError::InvalidAssignments { path, reason } => CliError::InvalidInput {
                what: "assignment file".into(),
                path,
                reason,
            },

            CoreError::Io { path, message } => {
                CliError::Io(std::io::Error::other(format!("{path}: {message}")))
            }

            CoreError::NoAcceptedRows { total } => CliError::NoAcceptedRows { total },

            CoreError::Api { message, status } => CliError::ApiError { message, status },

            CoreError::Config { message } => CliError::Config { message },

            CoreError::Internal(message) => CliError::ApiError {
                message,
                status: None,
            },
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Validation { field, reason } => CliError::Validation { field, reason },
            ConfigError::NoCredentials { profile } => CliError::NoCredentials { profile },
            ConfigError::Io(e) => CliError::Io(e),
            other => CliError::Config {
                message: other.to_string(),
            },
        }
    }
}

impl From<dialoguer::Error> for CliError {
    fn from(err: dialoguer::Error) -> Self {
        match err {
            dialoguer::Error::IO(e) if e.kind() == std::io::ErrorKind::Interrupted => {
                CliError::Interrupted
            }
            dialoguer::Error::IO(e) => CliError::Io(e),
        }
    }
}
