use thiserror::Error;

/// Top-level error type for the `rfsync-api` crate.
///
/// Covers every failure mode of the Dashboard API surface: authentication,
/// transport, rate limiting, structured API errors and decoding.
/// `rfsync-core` maps these into domain errors.
#[derive(Debug, Error)]
pub enum Error {
    // ── Authentication ──────────────────────────────────────────────
    /// The API key was rejected (HTTP 401).
    #[error("Invalid API key")]
    InvalidApiKey,

    /// The API key header could not be built (non-ASCII key, etc.)
    #[error("Authentication failed: {message}")]
    Authentication { message: String },

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// TLS or client-builder error.
    #[error("TLS error: {0}")]
    Tls(String),

    /// Still rate limited after exhausting the retry budget.
    #[error("Rate limited -- retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u64 },

    // ── Dashboard API ───────────────────────────────────────────────
    /// Structured error from the Dashboard API (`{"errors": [...]}`).
    ///
    /// `message` is the first entry of `errors`, or the HTTP status text
    /// when the body carried none.
    #[error("Dashboard API error (HTTP {status}): {message}")]
    Api {
        status: u16,
        message: String,
        errors: Vec<String>,
    },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },
}

impl Error {
    /// Returns `true` if this is a transient error worth retrying.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Transport(e) => e.is_timeout() || e.is_connect(),
            Self::RateLimited { .. } => true,
            Self::Api { status, .. } => *status >= 500,
            _ => false,
        }
    }

    /// Returns `true` if this is a "not found" error.
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::Transport(e) => e.status() == Some(reqwest::StatusCode::NOT_FOUND),
            Self::Api { status: 404, .. } => true,
            _ => false,
        }
    }

    /// Returns `true` if the credentials were rejected.
    pub fn is_auth(&self) -> bool {
        matches!(self, Self::InvalidApiKey | Self::Authentication { .. })
    }

    /// The human-readable message an operator should see for this error.
    ///
    /// For Dashboard API errors this is the first `errors` entry rather
    /// than the full `Display` string with the status prefix.
    pub fn api_message(&self) -> String {
        match self {
            Self::Api { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }
}
