//! Shared authenticated client for the tropeiro ERP backend
//!
//! [`ErpClient`] is the single place where base-URL resolution, bearer
//! injection, status-to-error mapping and file downloads happen. The per-area
//! adapters compose over it and only deal with paths and payload shapes.
//!
//! Non-success answers are mapped onto [`ErpError`] by status class, and when
//! the backend body carries a `mensagem`, `message` or `erro` field that text
//! survives verbatim into the error. Operators read backend messages exactly
//! as the backend wrote them.

use std::sync::{Arc, OnceLock};
use std::time::Duration;

use regex::Regex;
use reqwest::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};
use tropeiro_domain::constants::{
    DEFAULT_BASE_URL, DEFAULT_REQUEST_ATTEMPTS, DEFAULT_REQUEST_TIMEOUT_SECS, ENV_BASE_URL,
    PROBE_TIMEOUT_SECS,
};
use tropeiro_domain::{ApiConfig, ErpError, Result};
use url::Url;
use uuid::Uuid;

use crate::api::auth::TokenProvider;
use crate::errors::InfraError;
use crate::http::HttpClient;

/// Configuration for [`ErpClient`].
#[derive(Debug, Clone)]
pub struct ErpClientConfig {
    /// Backend base URL, without a trailing slash.
    pub base_url: String,
    /// Per-request timeout.
    pub timeout: Duration,
    /// Attempt budget for retried requests; 1 disables retry.
    pub max_attempts: usize,
}

impl Default for ErpClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            max_attempts: DEFAULT_REQUEST_ATTEMPTS as usize,
        }
    }
}

impl ErpClientConfig {
    /// Derive a client configuration from the loaded application config.
    #[must_use]
    pub fn from_api_config(api: &ApiConfig) -> Self {
        Self {
            base_url: api.base_url.clone(),
            timeout: Duration::from_secs(api.timeout_secs),
            max_attempts: api.request_attempts.max(1) as usize,
        }
    }

    /// Single-attempt variant for adapters that must never replay a request.
    #[must_use]
    pub fn no_retry(mut self) -> Self {
        self.max_attempts = 1;
        self
    }
}

/// Resolve the base URL from the environment, falling back to the default.
fn default_base_url() -> String {
    std::env::var(ENV_BASE_URL)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
}

/// Raw file answer from a report endpoint.
#[derive(Debug, Clone)]
pub struct ReportDownload {
    /// File name parsed from `Content-Disposition`, when the header has one.
    pub filename: Option<String>,
    /// MIME type reported by the backend.
    pub content_type: Option<String>,
    /// Payload bytes, handed to the caller untouched.
    pub bytes: Vec<u8>,
}

/// Authenticated HTTP client for the ERP backend.
#[derive(Clone)]
pub struct ErpClient {
    http: HttpClient,
    base_url: String,
    tokens: Arc<dyn TokenProvider>,
}

impl std::fmt::Debug for ErpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ErpClient").field("base_url", &self.base_url).finish_non_exhaustive()
    }
}

impl ErpClient {
    /// Build a client from configuration and a token source.
    ///
    /// The base URL is validated up front so a malformed value fails here,
    /// not on the first request.
    pub fn new(config: ErpClientConfig, tokens: Arc<dyn TokenProvider>) -> Result<Self> {
        let base_url = config.base_url.trim_end_matches('/').to_string();
        let parsed = Url::parse(&base_url).map_err(|err| {
            let infra: InfraError = err.into();
            ErpError::from(infra)
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ErpError::Config(format!(
                "Base URL must use http or https, got '{}'",
                parsed.scheme()
            )));
        }

        let http = HttpClient::builder()
            .timeout(config.timeout)
            .max_attempts(config.max_attempts)
            .build()?;

        Ok(Self { http, base_url, tokens })
    }

    /// GET a JSON payload.
    pub async fn get<T>(&self, path: &str) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let url = self.endpoint(path);
        debug!(%url, "GET request");
        let request = self.authed_request(Method::GET, &url).await?;
        let response = self.http.send(request).await?;
        Self::decode(response, &url).await
    }

    /// GET a JSON payload with query parameters.
    pub async fn get_with_query<T>(&self, path: &str, query: &[(&str, String)]) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let url = self.endpoint(path);
        debug!(%url, params = query.len(), "GET request with query");
        let request = self.authed_request(Method::GET, &url).await?.query(query);
        let response = self.http.send(request).await?;
        Self::decode(response, &url).await
    }

    /// GET where the backend signals absence instead of erroring.
    ///
    /// A 404 answer, or a success without a body (204/205), yields `None`.
    /// Every other non-success status still maps to an error.
    pub async fn get_optional<T>(&self, path: &str) -> Result<Option<T>>
    where
        T: DeserializeOwned,
    {
        let url = self.endpoint(path);
        debug!(%url, "GET request (optional)");
        let request = self.authed_request(Method::GET, &url).await?;
        let response = self.http.send(request).await?;
        let status = response.status();

        if matches!(
            status,
            StatusCode::NOT_FOUND | StatusCode::NO_CONTENT | StatusCode::RESET_CONTENT
        ) {
            return Ok(None);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(map_status_error(status, &url, &body));
        }

        let value = response.json::<T>().await.map_err(|err| {
            ErpError::Internal(format!("failed to decode response from {url}: {err}"))
        })?;
        Ok(Some(value))
    }

    /// POST a JSON body and decode the JSON answer.
    pub async fn post<B, R>(&self, path: &str, body: &B) -> Result<R>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let url = self.endpoint(path);
        debug!(%url, "POST request");
        let request = self.authed_request(Method::POST, &url).await?.json(body);
        let response = self.http.send(request).await?;
        Self::decode(response, &url).await
    }

    /// POST carrying an idempotency correlation header.
    ///
    /// The backend deduplicates replays of the same `X-Correlacao` value, so
    /// a submission that died mid-flight can be reissued without settling the
    /// title twice.
    pub async fn post_idempotent<B, R>(&self, path: &str, body: &B, correlacao: Uuid) -> Result<R>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let url = self.endpoint(path);
        debug!(%url, %correlacao, "POST request with correlation");
        let request = self
            .authed_request(Method::POST, &url)
            .await?
            .header("X-Correlacao", correlacao.to_string())
            .json(body);
        let response = self.http.send(request).await?;
        Self::decode(response, &url).await
    }

    /// PUT a JSON body and decode the JSON answer.
    pub async fn put<B, R>(&self, path: &str, body: &B) -> Result<R>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let url = self.endpoint(path);
        debug!(%url, "PUT request");
        let request = self.authed_request(Method::PUT, &url).await?.json(body);
        let response = self.http.send(request).await?;
        Self::decode(response, &url).await
    }

    /// GET a binary payload, keeping the download metadata headers.
    pub async fn fetch_bytes(&self, path: &str, query: &[(&str, String)]) -> Result<ReportDownload> {
        let url = self.endpoint(path);
        debug!(%url, "GET request (bytes)");
        let mut request = self.authed_request(Method::GET, &url).await?;
        if !query.is_empty() {
            request = request.query(query);
        }
        let response = self.http.send(request).await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(map_status_error(status, &url, &body));
        }

        let filename = response
            .headers()
            .get(CONTENT_DISPOSITION)
            .and_then(|value| value.to_str().ok())
            .and_then(content_disposition_filename);
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);
        let bytes = response.bytes().await.map_err(|err| {
            ErpError::Internal(format!("failed to read response body from {url}: {err}"))
        })?;

        Ok(ReportDownload { filename, content_type, bytes: bytes.to_vec() })
    }

    /// Cheap connectivity probe against `GET /ping`.
    ///
    /// Single attempt, short timeout, no auth header. Transport failures
    /// answer `Ok(false)` instead of an error; the caller only wants to know
    /// whether the backend is reachable right now.
    pub async fn probe(&self) -> Result<bool> {
        let url = self.endpoint("/ping");
        let request = self
            .http
            .request(Method::GET, &url)
            .timeout(Duration::from_secs(PROBE_TIMEOUT_SECS));

        match self.http.send_once(request).await {
            Ok(response) if response.status().is_success() => Ok(true),
            Ok(response) => {
                warn!(%url, status = %response.status(), "connectivity probe answered non-success");
                Ok(false)
            }
            Err(err) => {
                warn!(%url, error = %err, "connectivity probe failed");
                Ok(false)
            }
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn authed_request(&self, method: Method, url: &str) -> Result<RequestBuilder> {
        let mut request = self.http.request(method, url);
        if let Some(token) = self.tokens.bearer_token().await? {
            request = request.bearer_auth(token);
        }
        Ok(request)
    }

    async fn decode<T>(response: Response, url: &str) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(map_status_error(status, url, &body));
        }
        if matches!(status, StatusCode::NO_CONTENT | StatusCode::RESET_CONTENT) {
            // Callers expecting () land here; anything else is a contract break.
            return serde_json::from_value(serde_json::Value::Null).map_err(|_| {
                ErpError::Internal(format!(
                    "{url} answered HTTP {} without the expected payload",
                    status.as_u16()
                ))
            });
        }

        response.json::<T>().await.map_err(|err| {
            ErpError::Internal(format!("failed to decode response from {url}: {err}"))
        })
    }
}

/// Translate a non-success backend answer into a domain error.
fn map_status_error(status: StatusCode, url: &str, body: &str) -> ErpError {
    let message = match extract_backend_message(body) {
        Some(text) => text,
        None if body.trim().is_empty() => format!("{url} answered HTTP {}", status.as_u16()),
        None => format!("{url} answered HTTP {}: {body}", status.as_u16()),
    };

    match status {
        StatusCode::UNAUTHORIZED => ErpError::Auth(message),
        StatusCode::FORBIDDEN => ErpError::Forbidden(message),
        StatusCode::NOT_FOUND => ErpError::NotFound(message),
        status if status.is_server_error() => ErpError::Network(message),
        status if status.is_client_error() => ErpError::Business(message),
        _ => ErpError::Network(message),
    }
}

/// Pull a human-readable message out of a JSON error body.
///
/// Both backend generations use one of `mensagem`, `message` or `erro` for
/// their error text. The text is returned verbatim.
fn extract_backend_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    for key in ["mensagem", "message", "erro"] {
        if let Some(text) = value.get(key).and_then(serde_json::Value::as_str) {
            if !text.trim().is_empty() {
                return Some(text.to_string());
            }
        }
    }
    None
}

/// Extract the file name from a `Content-Disposition` header value.
///
/// Handles both the quoted (`filename="x.pdf"`) and bare (`filename=x.pdf`)
/// forms emitted by different backend generations.
fn content_disposition_filename(value: &str) -> Option<String> {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    let pattern = PATTERN
        .get_or_init(|| {
            Regex::new(r#"(?i)filename="(?P<quoted>[^"]+)"|filename=(?P<bare>[^;\s]+)"#).ok()
        })
        .as_ref()?;

    let captures = pattern.captures(value)?;
    captures
        .name("quoted")
        .or_else(|| captures.name("bare"))
        .map(|found| found.as_str().trim().to_string())
}
