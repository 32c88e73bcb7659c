// ── Core error types ──
//
// User-facing errors from rfsync-core. Consumers never see HTTP status
// codes or JSON parse failures directly; the `From<rfsync_api::Error>`
// impl translates transport-layer errors into domain variants.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Connection errors ────────────────────────────────────────────
    #[error("Cannot connect to the dashboard at {url}: {reason}")]
    ConnectionFailed { url: String, reason: String },

    #[error("Authentication failed: {message}")]
    AuthenticationFailed { message: String },

    #[error("Dashboard request timed out")]
    Timeout,

    #[error("Rate limited by the dashboard -- retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u64 },

    // ── Inventory errors ─────────────────────────────────────────────
    #[error("No organizations are visible to this API key")]
    NoOrganizations,

    #[error("Organization not found: {identifier}")]
    OrganizationNotFound { identifier: String },

    #[error("Network not found: {identifier}")]
    NetworkNotFound { identifier: String },

    // ── Input errors (retryable preconditions) ───────────────────────
    #[error("No profile templates found in {path}")]
    NoTemplates { path: String },

    #[error("Assignment file not found: {path}")]
    AssignmentsNotFound { path: String },

    // ── Input errors (malformed) ─────────────────────────────────────
    #[error("Invalid profile template {path}: {reason}")]
    InvalidTemplate { path: String, reason: String },

    #[error("Invalid assignment file {path}: {reason}")]
    InvalidAssignments { path: String, reason: String },

    #[error("{path}: {message}")]
    Io { path: String, message: String },

    // ── Reconciliation errors ────────────────────────────────────────
    #[error("None of the {total} assignment rows passed validation")]
    NoAcceptedRows { total: usize },

    // ── API errors (wrapped, not exposed raw) ────────────────────────
    #[error("Dashboard API error: {message}")]
    Api {
        message: String,
        /// HTTP status code (if applicable).
        status: Option<u16>,
    },

    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },

    // ── Internal errors ──────────────────────────────────────────────
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// Conditions an interactive caller should answer by asking for a
    /// different path rather than aborting the run.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::NoTemplates { .. } | Self::AssignmentsNotFound { .. }
        )
    }

    pub(crate) fn io(path: &std::path::Path, err: &std::io::Error) -> Self {
        Self::Io {
            path: path.display().to_string(),
            message: err.to_string(),
        }
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<rfsync_api::Error> for CoreError {
    fn from(err: rfsync_api::Error) -> Self {
        match err {
            rfsync_api::Error::InvalidApiKey => CoreError::AuthenticationFailed {
                message: "Invalid API key".into(),
            },
            rfsync_api::Error::Authentication { message } => {
                CoreError::AuthenticationFailed { message }
            }
            rfsync_api::Error::Transport(ref e) => {
                if e.is_timeout() {
                    CoreError::Timeout
                } else if e.is_connect() {
                    CoreError::ConnectionFailed {
                        url: e
                            .url()
                            .map_or_else(|| "<unknown>".into(), ToString::to_string),
                        reason: e.to_string(),
                    }
                } else {
                    CoreError::Api {
                        message: e.to_string(),
                        status: e.status().map(|s| s.as_u16()),
                    }
                }
            }
            rfsync_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid URL: {e}"),
            },
            rfsync_api::Error::Tls(msg) => CoreError::ConnectionFailed {
                url: String::new(),
                reason: format!("TLS error: {msg}"),
            },
            rfsync_api::Error::RateLimited { retry_after_secs } => {
                CoreError::RateLimited { retry_after_secs }
            }
            rfsync_api::Error::Api {
                status, message, ..
            } => CoreError::Api {
                message,
                status: Some(status),
            },
            rfsync_api::Error::Deserialization { message, body: _ } => {
                CoreError::Internal(format!("Deserialization error: {message}"))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_errors_keep_status_and_first_message() {
        let err = CoreError::from(rfsync_api::Error::Api {
            status: 404,
            message: "Network not found".into(),
            errors: vec!["Network not found".into()],
        });
        assert!(matches!(
            err,
            CoreError::Api { ref message, status: Some(404) } if message == "Network not found"
        ));
    }

    #[test]
    fn only_input_preconditions_are_retryable() {
        assert!(CoreError::NoTemplates { path: "t".into() }.is_retryable());
        assert!(CoreError::AssignmentsNotFound { path: "a.csv".into() }.is_retryable());
        assert!(!CoreError::NoAcceptedRows { total: 3 }.is_retryable());
        assert!(!CoreError::from(rfsync_api::Error::InvalidApiKey).is_retryable());
    }
}
