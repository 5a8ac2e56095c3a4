//! Retry with exponential backoff.
//!
//! [`invoke_with_retry`] runs an async operation up to `max_retries` times.
//! Only errors that report themselves as transient are retried; the delay
//! before attempt `k + 1` is `base_delay * 2^(k - 1)`.

use crate::ports::llm_gateway::GatewayError;
use crate::ports::progress::ProgressNotifier;
use std::future::Future;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

/// Errors that know whether retrying them can help.
pub trait TransientError: std::error::Error + Send + Sync + 'static {
    fn is_transient(&self) -> bool;
}

impl TransientError for GatewayError {
    fn is_transient(&self) -> bool {
        GatewayError::is_transient(self)
    }
}

/// A retry policy that cannot be run.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvalidRetryPolicy {
    #[error("max_retries must be >= 1 (got {0})")]
    ZeroAttempts(u32),

    #[error("base_delay must be > 0")]
    ZeroDelay,
}

#[derive(Error, Debug)]
pub enum RetryError<E: std::error::Error + 'static> {
    #[error("Invalid retry configuration: {0}")]
    InvalidConfig(#[from] InvalidRetryPolicy),

    #[error(transparent)]
    Fatal(E),

    #[error("Failed after {attempts} attempts")]
    Exhausted {
        attempts: u32,
        #[source]
        source: E,
    },
}

impl<E: std::error::Error + 'static> RetryError<E> {
    /// The last underlying error, if any attempt was made.
    pub fn last_error(&self) -> Option<&E> {
        match self {
            RetryError::InvalidConfig(_) => None,
            RetryError::Fatal(e) | RetryError::Exhausted { source: e, .. } => Some(e),
        }
    }
}

/// Attempt budget and backoff base.
///
/// Fields are public so a policy can come straight from configuration;
/// [`invoke_with_retry`] validates it again before the first attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total number of attempts (not additional retries)
    pub max_retries: u32,
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            base_delay: Duration::from_secs(10),
        }
    }
}

impl RetryPolicy {
    pub fn new(max_retries: u32, base_delay: Duration) -> Result<Self, InvalidRetryPolicy> {
        let policy = Self {
            max_retries,
            base_delay,
        };
        policy.validate()?;
        Ok(policy)
    }

    pub fn validate(&self) -> Result<(), InvalidRetryPolicy> {
        if self.max_retries < 1 {
            return Err(InvalidRetryPolicy::ZeroAttempts(self.max_retries));
        }
        if self.base_delay.is_zero() {
            return Err(InvalidRetryPolicy::ZeroDelay);
        }
        Ok(())
    }

    /// Delay slept after the failed attempt `attempt` (1-based).
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        let factor = 2u32.saturating_pow(attempt.saturating_sub(1));
        self.base_delay.saturating_mul(factor)
    }
}

/// Run `operation` until it succeeds, fails fatally, or the attempt budget
/// is spent.
///
/// `operation` receives the 1-based attempt number. `observer` is told about
/// each scheduled retry before the backoff sleep. The sleep suspends only
/// the calling task.
pub async fn invoke_with_retry<T, E, F, Fut>(
    policy: &RetryPolicy,
    mut operation: F,
    observer: &dyn ProgressNotifier,
) -> Result<T, RetryError<E>>
where
    E: TransientError,
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    policy.validate()?;

    let mut attempt = 1;
    loop {
        debug!(attempt, max_retries = policy.max_retries, "Invoking operation");

        let error = match operation(attempt).await {
            Ok(value) => return Ok(value),
            Err(e) => e,
        };

        if !error.is_transient() {
            warn!(attempt, "Non-retryable failure: {}", error);
            return Err(RetryError::Fatal(error));
        }

        if attempt >= policy.max_retries {
            warn!(attempts = attempt, "Giving up: {}", error);
            return Err(RetryError::Exhausted {
                attempts: attempt,
                source: error,
            });
        }

        let delay = policy.delay_for_attempt(attempt);
        warn!(
            attempt,
            max_retries = policy.max_retries,
            delay_ms = delay.as_millis() as u64,
            "Attempt failed, retrying: {}",
            error
        );
        observer.on_retry(attempt, policy.max_retries, delay, &error.to_string());

        tokio::time::sleep(delay).await;
        attempt += 1;
    }
}
