// src/rate_limiter.rs

// docgate: a minimum inter-arrival gate (token bucket of capacity one).

// dependencies
use crate::clock::{Clock, SystemClock};
use crate::config::LimiterConfig;
use crate::errors::ConfigError;
use std::time::Duration;
use tokio::sync::Mutex;

/// Gate that issues at most `permits` permits per `window`.
///
/// Successive grants are spaced by the inter-arrival interval `window / permits`.
/// The interval is kept as an exact rational: a whole-nanosecond part plus a
/// carried remainder, so each step is either `interval_nanos` or one nanosecond
/// more, and any `permits` consecutive steps add up to exactly `window`.
///
/// C is the clock type, defaulting to SystemClock.
#[derive(Debug)]
pub struct RateLimiter<C = SystemClock>
where
    C: Clock,
{
    permits: u64,
    window_nanos: u64,
    interval_nanos: u64,
    remainder_nanos: u64,
    state: Mutex<GateState>,
    clock: C,
}

// Guarded by the limiter's mutex; tokio's mutex queues waiters in FIFO order.
#[derive(Debug, Default)]
struct GateState {
    last_issued: Option<u64>,
    carry: u64,
}

/// Result of a non-blocking permit request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decision {
    /// Whether a permit was granted
    pub allowed: bool,
    /// Time until the next permit frees up (when denied).
    /// `None` when another caller currently holds the gate.
    pub retry_after: Option<Duration>,
}

impl<C> RateLimiter<C>
where
    C: Clock,
{
    // method to create a new rate limiter from a config object
    pub fn with_config(config: LimiterConfig, clock: C) -> Result<Self, ConfigError> {
        config.validate()?;

        // validate() guarantees both conversions succeed
        let permits = u64::try_from(config.permits)
            .map_err(|_| ConfigError::InvalidPermits { permits: config.permits })?;
        let window_nanos = u64::try_from(config.window.as_nanos())
            .map_err(|_| ConfigError::WindowTooLarge { window: config.window })?;

        Ok(Self {
            permits,
            window_nanos,
            interval_nanos: window_nanos / permits,
            remainder_nanos: window_nanos % permits,
            state: Mutex::new(GateState::default()),
            clock,
        })
    }

    pub fn permits(&self) -> u64 {
        self.permits
    }

    pub fn window(&self) -> Duration {
        Duration::from_nanos(self.window_nanos)
    }

    /// Whole-nanosecond part of the inter-arrival interval.
    pub fn interval(&self) -> Duration {
        Duration::from_nanos(self.interval_nanos)
    }

    pub fn rate_per_second(&self) -> f64 {
        self.permits as f64 / self.window().as_secs_f64()
    }

    /// Wait until a permit is available, then take it.
    ///
    /// Callers are served one at a time in the order they reach the gate. The
    /// gate stays held while the caller sleeps, so no other grant can slip in
    /// between. Dropping the future before it completes does not consume a permit.
    pub async fn acquire(&self) {
        let mut state = self.state.lock().await;
        let now = self.clock.now();
        let (grant_at, carry) = self.schedule(&state, now);

        if grant_at > now {
            let wait = Duration::from_nanos(grant_at - now);
            tracing::debug!(wait_ms = wait.as_millis() as u64, "waiting for rate limit permit");
            self.clock.sleep_until(grant_at).await;
        }

        state.last_issued = Some(grant_at);
        state.carry = carry;
        tracing::trace!(granted_at = grant_at, "rate limit permit granted");
    }

    /// Take a permit only if one is available right now.
    pub fn try_acquire(&self) -> Decision {
        let Ok(mut state) = self.state.try_lock() else {
            return Decision {
                allowed: false,
                retry_after: None,
            };
        };

        let now = self.clock.now();
        let (grant_at, carry) = self.schedule(&state, now);

        if grant_at > now {
            return Decision {
                allowed: false,
                retry_after: Some(Duration::from_nanos(grant_at - now)),
            };
        }

        state.last_issued = Some(grant_at);
        state.carry = carry;
        Decision {
            allowed: true,
            retry_after: None,
        }
    }

    // Earliest grant time for a request arriving at `now`, and the carry after it.
    // The carry advances even when the gate has been idle, so the pattern of
    // short and long steps never restarts and any `permits` consecutive gaps
    // still cover at least a full window.
    fn schedule(&self, state: &GateState, now: u64) -> (u64, u64) {
        let Some(last) = state.last_issued else {
            return (now, 0);
        };

        let carried = state.carry + self.remainder_nanos;
        let step = self.interval_nanos + carried / self.permits;
        let scheduled = last.saturating_add(step);

        (scheduled.max(now), carried % self.permits)
    }
}

impl RateLimiter<SystemClock> {
    pub fn new(config: LimiterConfig) -> Result<Self, ConfigError> {
        Self::with_config(config, SystemClock::new())
    }
}
