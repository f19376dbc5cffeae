use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::{fmt::Debug, time::Duration};
use tracing::debug;

use crate::error::TransportError;

/// Fetches a URL and returns its body parsed as JSON.
#[async_trait]
pub trait JsonTransport: Send + Sync + Debug {
    async fn fetch_json(&self, url: &str) -> Result<Value, TransportError>;
}

/// [`JsonTransport`] over HTTP GET.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    http: Client,
}

impl HttpTransport {
    pub fn new() -> Self {
        Self { http: Client::new() }
    }

    /// Client with a per-request timeout.
    pub fn with_timeout(timeout: Duration) -> Result<Self, TransportError> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self { http })
    }
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl JsonTransport for HttpTransport {
    async fn fetch_json(&self, url: &str) -> Result<Value, TransportError> {
        debug!(%url, "GET");

        let res = self.http.get(url).send().await?;

        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            return Err(TransportError::Status { status, body: truncate_body(&body) });
        }

        Ok(serde_json::from_str(&body)?)
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((cut, _)) => format!("{}...", &body[..cut]),
        None => body.to_string(),
    }
}
