//! Bounded retry for transient transport failures.

use crate::errors::{ExportError, ExportResult, NetworkError};
use std::future::Future;
use std::time::Duration;
use tracing::{debug, warn};

/// Configuration for retry behavior
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Maximum number of retries after the first attempt
    pub max_retries: u32,
    /// Delay before the first retry
    pub initial_delay: Duration,
    /// Maximum delay between retries
    pub max_delay: Duration,
    /// Multiplier applied to the delay after each retry
    pub multiplier: f64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self::transport()
    }
}

impl RetryConfig {
    /// Create a new retry configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Three attempts total, half a second apart
    pub fn transport() -> Self {
        Self {
            max_retries: 2,
            initial_delay: Duration::from_millis(500),
            max_delay: Duration::from_secs(30),
            multiplier: 1.0,
        }
    }

    /// Set maximum retries
    pub fn max_retries(mut self, n: u32) -> Self {
        self.max_retries = n;
        self
    }

    /// Set initial delay
    pub fn initial_delay(mut self, delay: Duration) -> Self {
        self.initial_delay = delay;
        self
    }

    /// Set maximum delay
    pub fn max_delay(mut self, delay: Duration) -> Self {
        self.max_delay = delay;
        self
    }

    /// Set backoff multiplier
    pub fn multiplier(mut self, m: f64) -> Self {
        self.multiplier = m;
        self
    }

    /// Total attempts including the first
    pub fn max_attempts(&self) -> u32 {
        self.max_retries.saturating_add(1)
    }

    /// Calculate delay for a given attempt number
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        let base_delay = self.initial_delay.as_millis() as f64
            * self.multiplier.powi(attempt.saturating_sub(1) as i32);
        let capped_delay = base_delay.min(self.max_delay.as_millis() as f64);

        Duration::from_millis(capped_delay as u64)
    }
}

/// Retry policy for determining if an error should be retried
pub trait RetryPolicy: Send + Sync {
    /// Check if an error is retryable
    fn is_retryable(&self, error: &ExportError) -> bool;
}

/// Retries connection-level failures only
#[derive(Debug, Clone, Default)]
pub struct DefaultRetryPolicy;

impl RetryPolicy for DefaultRetryPolicy {
    fn is_retryable(&self, error: &ExportError) -> bool {
        error.is_retryable()
    }
}

/// Execute an operation with retry logic
///
/// Non-retryable errors are returned as-is. When every attempt fails with a
/// retryable network error the last one is wrapped in
/// [`NetworkError::Exhausted`].
pub async fn with_retry<F, Fut, T>(
    config: &RetryConfig,
    policy: &dyn RetryPolicy,
    target: &str,
    operation: F,
) -> ExportResult<T>
where
    F: Fn() -> Fut,
    Fut: Future<Output = ExportResult<T>>,
{
    let mut attempt = 0;

    loop {
        attempt += 1;

        match operation().await {
            Ok(result) => {
                if attempt > 1 {
                    debug!(attempt, "Operation succeeded after retry");
                }
                return Ok(result);
            }
            Err(error) => {
                if !policy.is_retryable(&error) {
                    return Err(error);
                }

                if attempt >= config.max_attempts() {
                    warn!(
                        attempt,
                        url = target,
                        error = %error,
                        "Failed to retrieve, giving up"
                    );
                    return Err(exhausted(target, attempt, error));
                }

                let delay = config.delay_for_attempt(attempt);

                debug!(
                    attempt,
                    delay_ms = delay.as_millis() as u64,
                    error = %error,
                    "Retrying after transient error"
                );

                tokio::time::sleep(delay).await;
            }
        }
    }
}

fn exhausted(target: &str, attempts: u32, error: ExportError) -> ExportError {
    match error {
        ExportError::Network(source) => ExportError::Network(NetworkError::Exhausted {
            url: target.to_string(),
            attempts,
            source: Box::new(source),
        }),
        other => other,
    }
}
