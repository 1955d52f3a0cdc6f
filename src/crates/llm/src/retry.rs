//! The retry/backoff wrapper shared by both completion backends.
//!
//! One combinator, parameterized by the backend call: attempt, and on any
//! failure sleep the current delay, double it, and try again until the
//! attempt budget is spent. The doubling is unconditional (no jitter, no
//! cap), so the sleeps between attempts are exactly `d, 2d, 4d, ...`.

use std::future::Future;
use std::time::Duration;

use tracing::{debug, warn};

use crate::error::LlmError;

/// Bounded exponential backoff: at most `max_retries` attempts, starting
/// from `initial_delay` between the first and second.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Maximum number of attempts (including the first).
    pub max_retries: u32,

    /// Delay before the first retry.
    pub initial_delay: Duration,
}

impl RetryPolicy {
    /// Create a policy.
    pub fn new(max_retries: u32, initial_delay: Duration) -> Self {
        Self {
            max_retries,
            initial_delay,
        }
    }

    /// Delay slept after the `failures`-th consecutive failure (1-indexed).
    pub fn delay_after(&self, failures: u32) -> Duration {
        self.initial_delay * 2u32.pow(failures.saturating_sub(1))
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(3, Duration::from_secs(2))
    }
}

/// Run `call` under the policy, returning the first success or
/// [`LlmError::ExhaustedRetries`] once the budget is spent.
///
/// Per-attempt progress is logged (attempt number, outcome) but is purely
/// observational; callers see only the final result.
pub async fn with_retry<F, Fut, T>(
    policy: &RetryPolicy,
    label: &str,
    mut call: F,
) -> Result<T, LlmError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, LlmError>>,
{
    let mut delay = policy.initial_delay;
    let mut last_error: Option<LlmError> = None;

    for attempt in 1..=policy.max_retries {
        debug!(%label, attempt, max = policy.max_retries, "attempting call");
        match call().await {
            Ok(value) => {
                debug!(%label, attempt, "call succeeded");
                return Ok(value);
            }
            Err(error) => {
                warn!(%label, attempt, %error, "call failed");
                last_error = Some(error);
                if attempt < policy.max_retries {
                    debug!(%label, delay_secs = delay.as_secs_f64(), "backing off");
                    tokio::time::sleep(delay).await;
                    delay *= 2;
                }
            }
        }
    }

    warn!(%label, attempts = policy.max_retries, "retries exhausted");
    Err(LlmError::ExhaustedRetries {
        attempts: policy.max_retries,
        last_error: last_error
            .map(|e| e.to_string())
            .unwrap_or_else(|| "no attempts were made".to_string()),
    })
}
