// src/errors.rs

// error handling for the gateway and its rate limiter

// dependencies
use std::time::Duration;

/// Error type for gateway and rate limiter configuration issues.
/// Raised only at construction time.
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Permit count was zero or negative.
    #[error("Permits must be positive, got {permits}")]
    InvalidPermits { permits: i64 },

    /// Window was zero.
    #[error("Window must be a positive duration")]
    InvalidWindow,

    /// Window does not fit the limiter's nanosecond clock.
    #[error("Window of {window:?} exceeds the supported range")]
    WindowTooLarge { window: Duration },

    #[error("Invalid endpoint url `{endpoint}`: {source}")]
    InvalidEndpoint {
        endpoint: String,
        #[source]
        source: url::ParseError,
    },

    #[error("Failed to build http client: {0}")]
    HttpClient(#[source] reqwest::Error),
}

/// Boxed underlying cause of a transport failure.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Transport-level failure: the request never produced an HTTP status.
/// Every variant keeps the underlying cause as its `source()`.
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("Connection failed: {0}")]
    Connection(#[source] BoxError),

    #[error("Request timed out: {0}")]
    Timeout(#[source] BoxError),

    #[error("Transport error: {0}")]
    Other(#[source] BoxError),
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            TransportError::Timeout(Box::new(err))
        } else if err.is_connect() {
            TransportError::Connection(Box::new(err))
        } else {
            TransportError::Other(Box::new(err))
        }
    }
}

/// Failure of a single `submit` call.
/// None of these are retried; the permit for the call is already spent.
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    /// The registry answered with something other than 200.
    #[error("Registry responded with status {status}")]
    NonSuccessStatus { status: u16, body: Option<String> },

    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error("Failed to serialize document: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The credential contains bytes that are not allowed in a header value.
    #[error("Credential is not a valid header value")]
    InvalidCredential,
}

impl SubmitError {
    /// HTTP status carried by the failure, if the registry answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            SubmitError::NonSuccessStatus { status, .. } => Some(*status),
            _ => None,
        }
    }
}
