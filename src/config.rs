// src/config.rs

//! Configuration types for the rate limiter and the gateway

// dependencies
use crate::errors::ConfigError;
use std::time::Duration;
use url::Url;

/// Create-document endpoint of the product registry.
pub const DEFAULT_ENDPOINT: &str = "https://ismp.crpt.ru/api/v3/lk/documents/create";

/// Default per-request timeout applied by the reqwest transport.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Unit in which a rate window is expressed, e.g. "10 requests per minute".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeUnit {
    Nanoseconds,
    Microseconds,
    Milliseconds,
    Seconds,
    Minutes,
    Hours,
    Days,
}

impl TimeUnit {
    /// Length of one unit.
    pub fn duration(self) -> Duration {
        match self {
            TimeUnit::Nanoseconds => Duration::from_nanos(1),
            TimeUnit::Microseconds => Duration::from_micros(1),
            TimeUnit::Milliseconds => Duration::from_millis(1),
            TimeUnit::Seconds => Duration::from_secs(1),
            TimeUnit::Minutes => Duration::from_secs(60),
            TimeUnit::Hours => Duration::from_secs(60 * 60),
            TimeUnit::Days => Duration::from_secs(24 * 60 * 60),
        }
    }
}

/// How much of a submission runs under the gateway's exclusive section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DispatchMode {
    /// Permit acquisition and the network call both run under one lock,
    /// so only one submission is in flight at a time.
    #[default]
    Serialized,
    /// Only permit acquisition is exclusive; network calls may overlap.
    Overlapped,
}

/// Configuration for rate limiter behavior
#[derive(Debug, Clone)]
pub struct LimiterConfig {
    pub(crate) permits: i64,
    pub(crate) window: Duration,
}

impl LimiterConfig {
    /// Create a new configuration allowing `permits` acquisitions per `window`
    pub fn new(permits: i64, window: Duration) -> Self {
        Self { permits, window }
    }

    /// Create a configuration allowing `permits` acquisitions per one `unit`
    pub fn per(permits: i64, unit: TimeUnit) -> Self {
        Self::new(permits, unit.duration())
    }

    /// Builder-style: set the permit count
    pub fn permits(mut self, permits: i64) -> Self {
        self.permits = permits;
        self
    }

    /// Builder-style: set the window
    pub fn window(mut self, window: Duration) -> Self {
        self.window = window;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.permits <= 0 {
            return Err(ConfigError::InvalidPermits {
                permits: self.permits,
            });
        }
        if self.window.is_zero() {
            return Err(ConfigError::InvalidWindow);
        }
        if u64::try_from(self.window.as_nanos()).is_err() {
            return Err(ConfigError::WindowTooLarge {
                window: self.window,
            });
        }
        Ok(())
    }
}

/// Configuration for the gateway: its limiter plus where and how to send.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    pub(crate) limiter: LimiterConfig,
    pub(crate) endpoint: String,
    pub(crate) timeout: Duration,
    pub(crate) dispatch: DispatchMode,
}

impl GatewayConfig {
    pub fn new(permits: i64, window: Duration) -> Self {
        Self {
            limiter: LimiterConfig::new(permits, window),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout: DEFAULT_TIMEOUT,
            dispatch: DispatchMode::default(),
        }
    }

    pub fn per(permits: i64, unit: TimeUnit) -> Self {
        Self::new(permits, unit.duration())
    }

    pub fn permits(mut self, permits: i64) -> Self {
        self.limiter = self.limiter.permits(permits);
        self
    }

    pub fn window(mut self, window: Duration) -> Self {
        self.limiter = self.limiter.window(window);
        self
    }

    /// Builder-style: override the registry endpoint
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Builder-style: request timeout for the default transport
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn dispatch(mut self, dispatch: DispatchMode) -> Self {
        self.dispatch = dispatch;
        self
    }

    pub fn limiter_config(&self) -> &LimiterConfig {
        &self.limiter
    }

    /// Validate the configuration and return the parsed endpoint
    pub fn validate(&self) -> Result<Url, ConfigError> {
        self.limiter.validate()?;
        Url::parse(&self.endpoint).map_err(|source| ConfigError::InvalidEndpoint {
            endpoint: self.endpoint.clone(),
            source,
        })
    }
}
