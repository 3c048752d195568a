// src/gateway.rs

// the rate-limited submission front door

// dependencies
use crate::clock::{Clock, SystemClock};
use crate::config::{DispatchMode, GatewayConfig, TimeUnit};
use crate::errors::{ConfigError, SubmitError};
use crate::rate_limiter::RateLimiter;
use crate::transport::{OutboundRequest, ReqwestTransport, Transport, TransportResponse};
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use serde::Serialize;
use std::fmt;
use std::sync::Arc;
use tokio::sync::Mutex;
use url::Url;

/// Successful submission: the registry answered 200.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Receipt {
    pub status: u16,
    pub body: Option<String>,
}

/// Submits documents to the registry, never faster than the configured rate.
///
/// The gateway owns its rate limiter and shares the transport with whoever
/// supplied it. With [`DispatchMode::Serialized`] (the default) a whole
/// submission, network call included, runs under one lock; with
/// [`DispatchMode::Overlapped`] only the wait for a permit is exclusive.
pub struct Gateway<C = SystemClock>
where
    C: Clock,
{
    limiter: RateLimiter<C>,
    transport: Arc<dyn Transport>,
    endpoint: Url,
    dispatch: DispatchMode,
    in_flight: Mutex<()>,
}

// the transport is an opaque trait object
impl<C> fmt::Debug for Gateway<C>
where
    C: Clock + fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Gateway")
            .field("limiter", &self.limiter)
            .field("endpoint", &self.endpoint.as_str())
            .field("dispatch", &self.dispatch)
            .finish_non_exhaustive()
    }
}

impl Gateway<SystemClock> {
    /// Gateway allowing `permits` submissions per one `unit`, sending to the
    /// default registry endpoint over reqwest.
    pub fn new(permits: i64, unit: TimeUnit) -> Result<Self, ConfigError> {
        let config = GatewayConfig::per(permits, unit);
        config.validate()?;
        let transport = ReqwestTransport::new(config.timeout)?;
        Self::with_config(config, Arc::new(transport))
    }

    pub fn with_config(
        config: GatewayConfig,
        transport: Arc<dyn Transport>,
    ) -> Result<Self, ConfigError> {
        Self::with_clock(config, transport, SystemClock::new())
    }
}

impl<C> Gateway<C>
where
    C: Clock,
{
    pub fn with_clock(
        config: GatewayConfig,
        transport: Arc<dyn Transport>,
        clock: C,
    ) -> Result<Self, ConfigError> {
        let endpoint = config.validate()?;
        let limiter = RateLimiter::with_config(config.limiter, clock)?;

        tracing::debug!(
            endpoint = %endpoint,
            permits = limiter.permits(),
            window_ms = limiter.window().as_millis() as u64,
            dispatch = ?config.dispatch,
            "document gateway configured"
        );

        Ok(Self {
            limiter,
            transport,
            endpoint,
            dispatch: config.dispatch,
            in_flight: Mutex::new(()),
        })
    }

    pub fn limiter(&self) -> &RateLimiter<C> {
        &self.limiter
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    pub fn dispatch_mode(&self) -> DispatchMode {
        self.dispatch
    }

    /// Submit one document, authenticated with `credential` as a bearer token.
    ///
    /// Waits for a rate limit permit first. Every outcome, including transport
    /// failures, comes back as a value and is logged exactly once.
    pub async fn submit<D>(&self, document: &D, credential: &str) -> Result<Receipt, SubmitError>
    where
        D: Serialize + ?Sized,
    {
        let _exclusive = match self.dispatch {
            DispatchMode::Serialized => Some(self.in_flight.lock().await),
            DispatchMode::Overlapped => None,
        };

        self.limiter.acquire().await;

        let result = self.send(document, credential).await;
        record(&result);
        result
    }

    async fn send<D>(&self, document: &D, credential: &str) -> Result<Receipt, SubmitError>
    where
        D: Serialize + ?Sized,
    {
        let request = self.build_request(document, credential)?;
        let TransportResponse { status, body } = self.transport.send(request).await?;

        if status == 200 {
            Ok(Receipt { status, body })
        } else {
            Err(SubmitError::NonSuccessStatus { status, body })
        }
    }

    fn build_request<D>(
        &self,
        document: &D,
        credential: &str,
    ) -> Result<OutboundRequest, SubmitError>
    where
        D: Serialize + ?Sized,
    {
        let body = serde_json::to_vec(document)?;

        let mut authorization = HeaderValue::from_str(&format!("Bearer {credential}"))
            .map_err(|_| SubmitError::InvalidCredential)?;
        authorization.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(AUTHORIZATION, authorization);

        Ok(OutboundRequest {
            url: self.endpoint.clone(),
            headers,
            body,
        })
    }
}

// one terminal event per submission
fn record(result: &Result<Receipt, SubmitError>) {
    match result {
        Ok(receipt) => {
            tracing::info!(
                event = "document_created",
                status = receipt.status,
                "document created successfully"
            );
        }
        Err(SubmitError::NonSuccessStatus { status, .. }) => {
            tracing::error!(
                event = "document_rejected",
                status = *status,
                "failed to create document"
            );
        }
        Err(SubmitError::Transport(err)) => {
            tracing::error!(
                event = "transport_failed",
                error = %err,
                "error while creating document"
            );
        }
        Err(err) => {
            tracing::error!(
                event = "document_not_sent",
                error = %err,
                "document could not be prepared for sending"
            );
        }
    }
}
