// Async HTTP client for the Meraki Dashboard API (v1).
//
// Base path: https://api.meraki.com/api/v1/
// Auth: `Authorization: Bearer <key>` header
//
// Endpoint groups (organizations, wireless, devices) are implemented as
// inherent methods in sibling modules; this file owns transport mechanics:
// URL construction, 429 back-off, Link-header pagination, error decoding.

use std::time::Duration;

use reqwest::StatusCode;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue, LINK, RETRY_AFTER};
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, trace, warn};
use url::Url;

use crate::error::Error;
use crate::transport::TransportConfig;

/// Default back-off when a 429 response carries no `Retry-After`.
const DEFAULT_RETRY_AFTER_SECS: u64 = 1;

// ── Error response shape from the Dashboard API ──────────────────────

#[derive(serde::Deserialize)]
struct ErrorResponse {
    #[serde(default)]
    errors: Vec<String>,
}

// ── Client ───────────────────────────────────────────────────────────

/// Async client for the Meraki Dashboard API.
///
/// Every request is sequential: the client holds no background tasks and
/// is cheap to share by reference across an entire run.
pub struct DashboardClient {
    http: reqwest::Client,
    base_url: Url,
    max_retries: u32,
}

impl DashboardClient {
    /// Public Dashboard API root.
    pub const DEFAULT_BASE_URL: &'static str = "https://api.meraki.com/api/v1/";

    // ── Constructors ─────────────────────────────────────────────────

    /// Build from an API key and transport config.
    ///
    /// Injects `Authorization: Bearer <key>` as a sensitive default header.
    pub fn from_api_key(
        base_url: &str,
        api_key: &SecretString,
        transport: &TransportConfig,
    ) -> Result<Self, Error> {
        let mut headers = HeaderMap::new();
        let mut auth = HeaderValue::from_str(&format!("Bearer {}", api_key.expose_secret()))
            .map_err(|e| Error::Authentication {
                message: format!("invalid API key header value: {e}"),
            })?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);

        let http = transport.build_client_with_headers(headers)?;
        let base_url = Self::normalize_base_url(base_url)?;

        Ok(Self {
            http,
            base_url,
            max_retries: transport.max_retries,
        })
    }

    /// Wrap an existing `reqwest::Client` (caller manages auth headers).
    pub fn from_reqwest(base_url: &str, http: reqwest::Client) -> Result<Self, Error> {
        let base_url = Self::normalize_base_url(base_url)?;
        Ok(Self {
            http,
            base_url,
            max_retries: TransportConfig::default().max_retries,
        })
    }

    /// Override the 429 retry budget.
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// The API root every relative path is joined onto.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Ensure the base URL ends with `/` so relative joins keep `/api/v1`.
    fn normalize_base_url(raw: &str) -> Result<Url, Error> {
        let mut url = Url::parse(raw)?;
        let path = url.path().trim_end_matches('/').to_owned();
        url.set_path(&format!("{path}/"));
        Ok(url)
    }

    // ── URL builder ──────────────────────────────────────────────────

    /// Join a relative path (e.g. `"organizations"`) onto the base URL.
    pub(crate) fn url(&self, path: &str) -> Result<Url, Error> {
        Ok(self.base_url.join(path)?)
    }

    // ── HTTP verbs ───────────────────────────────────────────────────

    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, Error> {
        let url = self.url(path)?;
        debug!("GET {url}");

        let resp = self.execute(|| self.http.get(url.clone())).await?;
        handle_response(resp).await
    }

    /// GET every page of a collection, following `Link: <…>; rel=next`.
    pub(crate) async fn get_all<T: DeserializeOwned>(&self, path: &str) -> Result<Vec<T>, Error> {
        let mut all = Vec::new();
        let mut next = Some(self.url(path)?);

        while let Some(url) = next.take() {
            debug!("GET {url}");
            let resp = self.execute(|| self.http.get(url.clone())).await?;
            next = next_page(resp.headers());
            let page: Vec<T> = handle_response(resp).await?;
            trace!(received = page.len(), has_next = next.is_some(), "page fetched");
            all.extend(page);
        }

        Ok(all)
    }

    pub(crate) async fn post<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, Error> {
        let url = self.url(path)?;
        debug!("POST {url}");

        let resp = self
            .execute(|| self.http.post(url.clone()).json(body))
            .await?;
        handle_response(resp).await
    }

    pub(crate) async fn put<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, Error> {
        let url = self.url(path)?;
        debug!("PUT {url}");

        let resp = self
            .execute(|| self.http.put(url.clone()).json(body))
            .await?;
        handle_response(resp).await
    }

    // ── Rate limiting ────────────────────────────────────────────────

    /// Send a request, backing off and resending while the dashboard
    /// answers 429. The builder closure is invoked once per attempt.
    async fn execute(
        &self,
        request: impl Fn() -> reqwest::RequestBuilder,
    ) -> Result<reqwest::Response, Error> {
        let mut attempt: u32 = 0;
        loop {
            let resp = request().send().await?;
            if resp.status() != StatusCode::TOO_MANY_REQUESTS {
                return Ok(resp);
            }

            let retry_after_secs = retry_after(resp.headers());
            if attempt >= self.max_retries {
                return Err(Error::RateLimited { retry_after_secs });
            }
            attempt += 1;
            warn!(attempt, retry_after_secs, "rate limited by dashboard, backing off");
            tokio::time::sleep(Duration::from_secs(retry_after_secs)).await;
        }
    }
}

// ── Response handling ────────────────────────────────────────────────

async fn handle_response<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, Error> {
    let status = resp.status();
    if !status.is_success() {
        return Err(parse_error(status, resp).await);
    }

    let body = resp.text().await?;
    serde_json::from_str(&body).map_err(|e| {
        let preview: String = body.chars().take(200).collect();
        Error::Deserialization {
            message: format!("{e} (body preview: {preview:?})"),
            body: body.clone(),
        }
    })
}

async fn parse_error(status: StatusCode, resp: reqwest::Response) -> Error {
    if status == StatusCode::UNAUTHORIZED {
        return Error::InvalidApiKey;
    }

    let raw = resp.text().await.unwrap_or_default();
    let errors = serde_json::from_str::<ErrorResponse>(&raw)
        .map(|e| e.errors)
        .unwrap_or_default();

    let message = match errors.first() {
        Some(first) => first.clone(),
        None if raw.trim().is_empty() => status.to_string(),
        None => raw.chars().take(200).collect(),
    };

    Error::Api {
        status: status.as_u16(),
        message,
        errors,
    }
}

/// Seconds to wait from a `Retry-After` header (integer form only).
fn retry_after(headers: &HeaderMap) -> u64 {
    headers
        .get(RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(DEFAULT_RETRY_AFTER_SECS)
}

/// Extract the `rel=next` target from an RFC 5988 `Link` header.
fn next_page(headers: &HeaderMap) -> Option<Url> {
    let link = headers.get(LINK)?.to_str().ok()?;
    link.split(',').find_map(|entry| {
        let mut parts = entry.split(';');
        let target = parts.next()?.trim();
        let is_next = parts.any(|p| {
            let p = p.trim();
            p == "rel=next" || p == "rel=\"next\""
        });
        if !is_next {
            return None;
        }
        let target = target.strip_prefix('<')?.strip_suffix('>')?;
        Url::parse(target).ok()
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn headers_with(name: reqwest::header::HeaderName, value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(name, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn next_page_picks_rel_next_among_several_links() {
        let headers = headers_with(
            LINK,
            "<https://api.meraki.com/api/v1/organizations/1/networks?startingAfter=a>; rel=first, \
             <https://api.meraki.com/api/v1/organizations/1/networks?startingAfter=N_9>; rel=next",
        );
        let next = next_page(&headers).unwrap();
        assert_eq!(next.query(), Some("startingAfter=N_9"));
    }

    #[test]
    fn next_page_absent_on_last_page() {
        let headers = headers_with(
            LINK,
            "<https://api.meraki.com/api/v1/organizations/1/networks?startingAfter=a>; rel=first",
        );
        assert!(next_page(&headers).is_none());
        assert!(next_page(&HeaderMap::new()).is_none());
    }

    #[test]
    fn retry_after_defaults_when_missing_or_garbled() {
        assert_eq!(retry_after(&HeaderMap::new()), DEFAULT_RETRY_AFTER_SECS);
        assert_eq!(retry_after(&headers_with(RETRY_AFTER, "soon")), 1);
        assert_eq!(retry_after(&headers_with(RETRY_AFTER, "7")), 7);
    }

    #[test]
    fn base_url_gains_trailing_slash() {
        let client =
            DashboardClient::from_reqwest("https://example.test/api/v1", reqwest::Client::new())
                .unwrap();
        assert_eq!(
            client.url("organizations").unwrap().as_str(),
            "https://example.test/api/v1/organizations"
        );
    }
}
