// src/transport.rs

// outbound HTTP: the request/response types and the transport seam

// dependencies
use crate::errors::{ConfigError, TransportError};
use async_trait::async_trait;
use reqwest::header::HeaderMap;
use std::time::Duration;
use url::Url;

/// Fully formed POST request, ready to be put on the wire.
#[derive(Debug, Clone)]
pub struct OutboundRequest {
    pub url: Url,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

/// What the remote end answered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: u16,
    pub body: Option<String>,
}

impl TransportResponse {
    pub fn new(status: u16) -> Self {
        Self { status, body: None }
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }
}

/// Performs the network call for the gateway.
/// Implementors must be thread-safe; the gateway shares one instance across callers.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: OutboundRequest) -> Result<TransportResponse, TransportError>;
}

/// Transport backed by a pooled `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new(timeout: Duration) -> Result<Self, ConfigError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(ConfigError::HttpClient)?;
        Ok(Self { client })
    }

    /// Wrap an already configured client.
    pub fn from_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: OutboundRequest) -> Result<TransportResponse, TransportError> {
        let response = self
            .client
            .post(request.url)
            .headers(request.headers)
            .body(request.body)
            .send()
            .await?;

        // the status is authoritative once received; a broken body does not undo it
        let status = response.status().as_u16();
        let body = match response.text().await {
            Ok(body) => Some(body).filter(|body| !body.is_empty()),
            Err(err) => {
                tracing::debug!(status, error = %err, "failed to read response body");
                None
            }
        };

        Ok(TransportResponse { status, body })
    }
}
