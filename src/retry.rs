//! Exponential backoff for transient API failures.
//!
//! Errors are sorted into three classes: permanent ones fail at once,
//! retryable ones are retried after `2^attempt * base_delay`, and anything
//! unclassified is returned as-is.

use crate::error::PodgenError;
use std::fmt::Display;
use std::future::Future;
use std::time::Duration;
use tracing::{debug, warn};

/// How an error should be treated by [`retry_with_backoff`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// Auth, malformed request, not found. Never retried.
    Permanent,
    /// Connection resets, timeouts, DNS failures, rate limits, 5xx.
    Retryable,
    /// Anything else. Returned without retrying.
    Unknown,
}

/// Classification hook for error types passed through the retry wrapper.
pub trait Classify {
    fn classify(&self) -> ErrorClass;
}

/// Classify an HTTP status code independently of any client.
pub fn classify_status(status: u16) -> ErrorClass {
    match status {
        400 | 401 | 403 | 404 => ErrorClass::Permanent,
        408 | 429 => ErrorClass::Retryable,
        500..=599 => ErrorClass::Retryable,
        _ => ErrorClass::Unknown,
    }
}

impl Classify for PodgenError {
    fn classify(&self) -> ErrorClass {
        match self {
            PodgenError::Api { status, .. } => classify_status(*status),
            PodgenError::Network(_) | PodgenError::Timeout(_) => ErrorClass::Retryable,
            PodgenError::Http(e) => {
                if let Some(status) = e.status() {
                    classify_status(status.as_u16())
                } else if e.is_timeout() || e.is_connect() || e.is_request() {
                    ErrorClass::Retryable
                } else {
                    ErrorClass::Unknown
                }
            }
            _ => ErrorClass::Unknown,
        }
    }
}

/// Attempt limit and base delay.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Total attempts including the first one.
    pub max_attempts: u32,
    /// Delay before the first retry.
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 4,
            base_delay: Duration::from_millis(1000),
        }
    }
}

impl RetryPolicy {
    /// Delay after the zero-based `attempt` failed.
    pub fn backoff_delay(&self, attempt: u32) -> Duration {
        let factor = 1u32.checked_shl(attempt).unwrap_or(u32::MAX);
        self.base_delay.saturating_mul(factor)
    }
}

/// A successful result and the number of invocations it took.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attempted<T> {
    pub value: T,
    pub attempts: u32,
}

/// Run `op` until it succeeds, fails permanently, or runs out of attempts.
///
/// The error returned is always the one produced by the last invocation.
pub async fn retry_with_backoff<T, E, F, Fut>(
    policy: &RetryPolicy,
    mut op: F,
) -> std::result::Result<Attempted<T>, E>
where
    E: Classify + Display,
    F: FnMut() -> Fut,
    Fut: Future<Output = std::result::Result<T, E>>,
{
    let max_attempts = policy.max_attempts.max(1);
    let mut attempt = 0u32;

    loop {
        let err = match op().await {
            Ok(value) => {
                return Ok(Attempted {
                    value,
                    attempts: attempt + 1,
                })
            }
            Err(e) => e,
        };

        match err.classify() {
            ErrorClass::Permanent => {
                debug!("Permanent error on attempt {}: {}", attempt + 1, err);
                return Err(err);
            }
            ErrorClass::Unknown => {
                debug!("Unclassified error on attempt {}: {}", attempt + 1, err);
                return Err(err);
            }
            ErrorClass::Retryable if attempt + 1 >= max_attempts => {
                warn!("Giving up after {} attempts: {}", max_attempts, err);
                return Err(err);
            }
            ErrorClass::Retryable => {
                let delay = policy.backoff_delay(attempt);
                warn!(
                    "Retry {}/{} after {}ms ({})",
                    attempt + 1,
                    max_attempts,
                    delay.as_millis(),
                    err
                );
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
        }
    }
}
