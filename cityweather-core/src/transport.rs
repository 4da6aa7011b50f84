//! Minimal GET-only HTTP transport.

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::{fmt::Debug, time::Duration};

use crate::error::TransportError;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone, Default)]
pub struct TransportConfig {
    /// Prefix for relative URLs. Without it every call needs an absolute URL.
    pub base_url: Option<String>,
    /// Falls back to [`DEFAULT_TIMEOUT`].
    pub timeout: Option<Duration>,
}

impl TransportConfig {
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self { base_url: Some(base_url.into()), timeout: None }
    }
}

#[async_trait]
pub trait Transport: Send + Sync + Debug {
    /// GET `url` and return the body of a 2xx response.
    async fn get(&self, url: &str) -> Result<String, TransportError>;
}

/// GET `url` through `transport` and decode the JSON body.
pub async fn get_json<T: DeserializeOwned>(
    transport: &dyn Transport,
    url: &str,
) -> Result<T, TransportError> {
    let body = transport.get(url).await?;

    serde_json::from_str(&body)
        .map_err(|source| TransportError::Decode { url: redact(url), source })
}

#[derive(Debug, Clone)]
pub struct HttpTransport {
    base_url: Option<String>,
    http: Client,
}

impl HttpTransport {
    pub fn new(config: TransportConfig) -> Result<Self, TransportError> {
        let http = Client::builder()
            .timeout(config.timeout.unwrap_or(DEFAULT_TIMEOUT))
            .build()?;

        Ok(Self { base_url: config.base_url, http })
    }

    /// Absolute URLs pass through; relative ones are appended to the base URL.
    pub fn resolve(&self, url: &str) -> Result<String, TransportError> {
        if is_absolute(url) {
            return Ok(url.to_string());
        }

        let base = self
            .base_url
            .as_deref()
            .ok_or_else(|| TransportError::RelativeUrl(url.to_string()))?;

        let base = base.trim_end_matches('/');
        if url.starts_with('/') {
            Ok(format!("{base}{url}"))
        } else {
            Ok(format!("{base}/{url}"))
        }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, url: &str) -> Result<String, TransportError> {
        let url = self.resolve(url)?;
        let logged = redact(&url);

        tracing::debug!(url = %logged, "GET");

        let res = self.http.get(&url).send().await.map_err(|e| {
            tracing::debug!(url = %logged, error = %e, "request failed");
            TransportError::Request(e.without_url())
        })?;

        let status = res.status();
        let body = res.text().await.map_err(|e| TransportError::Request(e.without_url()))?;

        tracing::debug!(url = %logged, status = status.as_u16(), bytes = body.len(), "response");

        if !status.is_success() {
            return Err(TransportError::Status {
                status: status.as_u16(),
                url: logged,
                body: truncate_body(&body),
            });
        }

        Ok(body)
    }
}

/// `http` and `https` URLs, with the scheme compared case-insensitively.
fn is_absolute(url: &str) -> bool {
    url.split_once("://").is_some_and(|(scheme, _)| {
        scheme.eq_ignore_ascii_case("http") || scheme.eq_ignore_ascii_case("https")
    })
}

/// Mask the `appid` query value so API keys never reach logs or error messages.
pub(crate) fn redact(url: &str) -> String {
    let Some((head, query)) = url.split_once('?') else {
        return url.to_string();
    };

    let query = query
        .split('&')
        .map(|pair| match pair.split_once('=') {
            Some(("appid", _)) => "appid=***".to_string(),
            _ => pair.to_string(),
        })
        .collect::<Vec<_>>()
        .join("&");

    format!("{head}?{query}")
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() <= MAX {
        return body.to_string();
    }

    let mut end = MAX;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &body[..end])
}
