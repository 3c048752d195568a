// src/clock.rs

// clock module definition and implementations

// dependencies
use async_trait::async_trait;
use std::time::Duration;
use tokio::time::Instant;

/// Clock trait to abstract time retrieval and suspension.
/// Implementors must be thread-safe (Send + Sync).
/// The `now` method returns nanoseconds elapsed since the clock's origin.
/// `sleep_until` suspends the calling task until `now()` reaches the deadline.
/// This lets the rate limiter run against a manual clock in tests.
#[async_trait]
pub trait Clock: Send + Sync {
    fn now(&self) -> u64;

    async fn sleep_until(&self, deadline_nanos: u64);
}

/// Monotonic clock backed by `tokio::time`.
/// The origin is captured at construction. Because it reads `tokio::time::Instant`,
/// it follows the runtime's paused time in tests.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Clock for SystemClock {
    fn now(&self) -> u64 {
        // saturates after ~584 years of uptime
        u64::try_from(self.origin.elapsed().as_nanos()).unwrap_or(u64::MAX)
    }

    async fn sleep_until(&self, deadline_nanos: u64) {
        let deadline = self.origin + Duration::from_nanos(deadline_nanos);
        tokio::time::sleep_until(deadline).await;
    }
}
