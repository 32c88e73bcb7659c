// ── Runtime connection configuration ──
//
// Describes *how* to reach the Dashboard API. Carries credential data and
// transport tuning but never touches disk; the CLI builds one and hands it in.

use std::path::PathBuf;
use std::time::Duration;

use secrecy::SecretString;
use url::Url;

use rfsync_api::{DashboardClient, TlsMode, TransportConfig};

use crate::error::CoreError;

/// Configuration for talking to the Dashboard API.
#[derive(Debug, Clone)]
pub struct DashboardConfig {
    /// API root (e.g. `https://api.meraki.com/api/v1/`).
    pub base_url: Url,
    /// Dashboard API key.
    pub api_key: SecretString,
    /// Request timeout.
    pub timeout: Duration,
    /// 429 retries before a call is reported as failed.
    pub max_retries: u32,
    /// Extra CA certificate for TLS-inspecting proxies.
    pub ca_cert: Option<PathBuf>,
}

impl DashboardConfig {
    pub fn new(api_key: SecretString) -> Result<Self, CoreError> {
        let base_url = Url::parse(DashboardClient::DEFAULT_BASE_URL).map_err(|e| {
            CoreError::Config {
                message: format!("invalid default base URL: {e}"),
            }
        })?;
        Ok(Self {
            base_url,
            api_key,
            timeout: Duration::from_secs(30),
            max_retries: 3,
            ca_cert: None,
        })
    }

    pub fn transport(&self) -> TransportConfig {
        let tls = self
            .ca_cert
            .clone()
            .map_or(TlsMode::System, TlsMode::CustomCa);
        TransportConfig {
            tls,
            ..TransportConfig::default()
        }
        .with_timeout(self.timeout)
        .with_max_retries(self.max_retries)
    }

    /// Build the dashboard client. No request is made until first use.
    pub fn connect(&self) -> Result<DashboardClient, CoreError> {
        let client =
            DashboardClient::from_api_key(self.base_url.as_str(), &self.api_key, &self.transport())?;
        Ok(client)
    }
}
