//! HTTP-backed configuration store

use std::time::Duration;

use async_trait::async_trait;
use chatlab_model::WidgetConfig;
use reqwest::{Method, StatusCode};
use serde::Serialize;
use uuid::Uuid;

use crate::store::{ConfigStore, DomainsUpdate, StoreError, StoredWidget};

/// Per-request timeout
pub const DEFAULT_TIMEOUT_MS: u64 = 5_000;
/// Attempts per call, including the first
pub const DEFAULT_REQUEST_ATTEMPTS: usize = 2;

/// Connection settings for [`HttpConfigStore`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpStoreConfig {
    /// Widget API root, e.g. `https://api.example.com`
    pub base_url: String,
    /// Per-request timeout in milliseconds
    pub timeout_ms: u64,
    /// Attempts per call; transient failures are retried
    pub request_attempts: usize,
    /// Bearer token sent with every request
    pub auth_token: Option<String>,
}

impl HttpStoreConfig {
    /// Create settings with default timeout and attempts
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
            request_attempts: DEFAULT_REQUEST_ATTEMPTS,
            auth_token: None,
        }
    }

    /// With request timeout
    #[inline]
    #[must_use]
    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    /// With attempts per request
    #[inline]
    #[must_use]
    pub fn with_request_attempts(mut self, attempts: usize) -> Self {
        self.request_attempts = attempts;
        self
    }

    /// With bearer token from the session provider
    #[inline]
    #[must_use]
    pub fn with_auth_token(mut self, token: impl Into<String>) -> Self {
        self.auth_token = Some(token.into());
        self
    }
}

/// Store client speaking the widget API
///
/// | Operation         | Request                              |
/// |-------------------|--------------------------------------|
/// | `fetch`           | `GET /api/widget/config/{id}`        |
/// | `update_style`    | `PATCH /api/widget/{id}/config`      |
/// | `replace_domains` | `PUT /api/widget/{id}/domains`       |
#[derive(Debug, Clone)]
pub struct HttpConfigStore {
    base_url: String,
    timeout: Duration,
    request_attempts: usize,
    auth_token: Option<String>,
    http: reqwest::Client,
}

impl HttpConfigStore {
    /// Create client
    ///
    /// # Errors
    /// Returns `BaseUrlMissing` if the base url is blank.
    pub fn new(config: HttpStoreConfig) -> Result<Self, StoreError> {
        let base_url = normalize_base_url(&config.base_url)?;
        Ok(Self {
            base_url,
            timeout: Duration::from_millis(config.timeout_ms.max(250)),
            request_attempts: config.request_attempts.max(1),
            auth_token: config
                .auth_token
                .map(|t| t.trim().trim_matches(|c| c == '"' || c == '\'').to_string())
                .filter(|t| !t.is_empty()),
            http: reqwest::Client::new(),
        })
    }

    /// Normalized base url
    #[inline]
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Path of the full widget document
    #[must_use]
    pub fn config_path(widget_id: &str) -> String {
        format!("/api/widget/config/{}", widget_id.trim())
    }

    /// Path for style updates
    #[must_use]
    pub fn style_path(widget_id: &str) -> String {
        format!("/api/widget/{}/config", widget_id.trim())
    }

    /// Path for domain list replacement
    #[must_use]
    pub fn domains_path(widget_id: &str) -> String {
        format!("/api/widget/{}/domains", widget_id.trim())
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn send<B>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<reqwest::Response, StoreError>
    where
        B: Serialize + ?Sized,
    {
        let url = self.endpoint(path);
        let payload = body
            .map(serde_json::to_vec)
            .transpose()
            .map_err(|error| StoreError::Encode {
                message: error.to_string(),
            })?;
        let mut last_error: Option<String> = None;

        for attempt in 0..self.request_attempts {
            let mut request = self
                .http
                .request(method.clone(), url.as_str())
                .header("x-request-id", format!("req_{}", Uuid::new_v4().simple()))
                .timeout(self.timeout);
            if let Some(token) = &self.auth_token {
                request = request.bearer_auth(token);
            }
            if let Some(bytes) = &payload {
                request = request
                    .header(reqwest::header::CONTENT_TYPE, "application/json")
                    .body(bytes.clone());
            }

            match request.send().await {
                Ok(response) => return Ok(response),
                Err(error) => {
                    tracing::warn!(%method, %url, attempt, "store request failed: {}", error);
                    last_error = Some(error.to_string());
                }
            }
        }

        Err(StoreError::Request {
            message: last_error.unwrap_or_else(|| "unknown".to_string()),
        })
    }
}

#[async_trait]
impl ConfigStore for HttpConfigStore {
    async fn fetch(&self, widget_id: &str) -> Result<Option<StoredWidget>, StoreError> {
        let response = self
            .send::<()>(Method::GET, &Self::config_path(widget_id), None)
            .await?;
        if response.status() == StatusCode::NOT_FOUND {
            tracing::debug!(widget_id, "no stored config");
            return Ok(None);
        }
        let bytes = read_success(response).await?;
        serde_json::from_slice(&bytes)
            .map(Some)
            .map_err(|error| StoreError::Decode {
                message: error.to_string(),
            })
    }

    async fn update_style(&self, widget_id: &str, config: &WidgetConfig) -> Result<(), StoreError> {
        let response = self
            .send(Method::PATCH, &Self::style_path(widget_id), Some(config))
            .await?;
        read_success(response).await.map(drop)
    }

    async fn replace_domains(&self, widget_id: &str, domains: &[String]) -> Result<(), StoreError> {
        let body = DomainsUpdate {
            domains: domains.to_vec(),
        };
        let response = self
            .send(Method::PUT, &Self::domains_path(widget_id), Some(&body))
            .await?;
        read_success(response).await.map(drop)
    }
}

/// Map an HTTP status and body into a store error
#[must_use]
pub fn format_http_error(status: StatusCode, body: &[u8]) -> StoreError {
    let body = String::from_utf8_lossy(body).trim().to_string();
    StoreError::Http {
        status: status.as_u16(),
        body: if body.is_empty() {
            "<empty>".to_string()
        } else {
            body
        },
    }
}

fn normalize_base_url(base_url: &str) -> Result<String, StoreError> {
    let trimmed = base_url.trim();
    if trimmed.is_empty() {
        return Err(StoreError::BaseUrlMissing);
    }
    Ok(trimmed.trim_end_matches('/').to_string())
}

async fn read_success(response: reqwest::Response) -> Result<Vec<u8>, StoreError> {
    let status = response.status();
    let bytes = response.bytes().await.map_err(|error| StoreError::Read {
        message: error.to_string(),
    })?;
    if !status.is_success() {
        return Err(format_http_error(status, &bytes));
    }
    Ok(bytes.to_vec())
}
