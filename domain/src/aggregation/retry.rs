//! Bounded retry with exponential backoff.
//!
//! Disabled by default: one attempt per provider per run.

use super::value_objects::ErrorDetail;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Extra attempts after the first one
    pub max_retries: u32,
    /// Delay before the first retry; doubled for each further retry
    pub initial_backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 0,
            initial_backoff: Duration::from_millis(250),
        }
    }
}

impl RetryPolicy {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn new(max_retries: u32, initial_backoff: Duration) -> Self {
        Self {
            max_retries,
            initial_backoff,
        }
    }

    /// Backoff before retry number `retry` (0-based).
    pub fn backoff(&self, retry: u32) -> Duration {
        self.initial_backoff
            .saturating_mul(2u32.saturating_pow(retry.min(16)))
    }

    /// Whether attempt number `attempt` (0-based) that failed with `error`
    /// should be followed by another one.
    pub fn should_retry(&self, attempt: u32, error: &ErrorDetail) -> bool {
        attempt < self.max_retries && error.kind.is_retryable()
    }
}
