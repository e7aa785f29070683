//! Bounded retry with exponential backoff.

use std::time::Duration;

/// How many times a failed call is retried and how long to wait in between.
///
/// Retry `n` (1-based) waits `base_delay * 2^(n-1)`; the product saturates
/// instead of overflowing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    max_retries: u32,
    base_delay: Duration,
}

impl RetryPolicy {
    pub fn new(max_retries: u32, base_delay: Duration) -> Self {
        Self {
            max_retries,
            base_delay,
        }
    }

    pub fn none() -> Self {
        Self::new(0, Duration::ZERO)
    }

    pub fn max_retries(&self) -> u32 {
        self.max_retries
    }

    pub fn base_delay(&self) -> Duration {
        self.base_delay
    }

    /// Initial attempt plus every retry.
    pub fn max_attempts(&self) -> u32 {
        self.max_retries.saturating_add(1)
    }

    pub fn delay_for(&self, retry: u32) -> Duration {
        let exponent = retry.saturating_sub(1);
        self.base_delay.saturating_mul(2u32.saturating_pow(exponent))
    }

    /// Delays between consecutive attempts, one per retry.
    pub fn schedule(&self) -> impl Iterator<Item = Duration> {
        let policy = *self;
        (1..=policy.max_retries).map(move |retry| policy.delay_for(retry))
    }
}
