//! Rate-limit governor.
//!
//! Wraps the transport: waits out HTTP 429 responses for the server-mandated
//! `Retry-After` interval and re-issues the identical request, with no upper
//! bound on attempts. Any other non-200 status, or a body carrying
//! `"ok": false`, is fatal.

use super::retry::{with_retry, DefaultRetryPolicy, RetryConfig};
use crate::errors::{ExportError, ExportResult, RateLimitError};
use crate::observability::ExportMetrics;
use crate::transport::{GetRequest, HttpTransport, RawResponse};
use http::StatusCode;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tracing::{instrument, warn};

/// Wait used when a 429 arrives without a usable `Retry-After` header
pub const DEFAULT_RETRY_AFTER: Duration = Duration::from_secs(60);

/// Issues GET requests, honoring rate limits and surfacing API failures
#[derive(Clone)]
pub struct RateLimitGovernor {
    transport: Arc<dyn HttpTransport>,
    retry: RetryConfig,
    metrics: Arc<ExportMetrics>,
    fallback_retry_after: Duration,
}

impl RateLimitGovernor {
    /// Create a new governor
    pub fn new(
        transport: Arc<dyn HttpTransport>,
        retry: RetryConfig,
        metrics: Arc<ExportMetrics>,
    ) -> Self {
        Self {
            transport,
            retry,
            metrics,
            fallback_retry_after: DEFAULT_RETRY_AFTER,
        }
    }

    /// Override the wait used when `Retry-After` is missing
    pub fn with_fallback_retry_after(mut self, wait: Duration) -> Self {
        self.fallback_retry_after = wait;
        self
    }

    /// Shared metrics
    pub fn metrics(&self) -> &Arc<ExportMetrics> {
        &self.metrics
    }

    /// Perform a GET until it succeeds or fails for a reason other than rate limiting
    ///
    /// Returns the parsed JSON body of the successful response.
    #[instrument(skip(self, request), fields(url = %request.url))]
    pub async fn get_json(&self, endpoint: &str, request: GetRequest) -> ExportResult<Value> {
        loop {
            let response = with_retry(&self.retry, &DefaultRetryPolicy, &request.url, || {
                let transport = self.transport.clone();
                let request = request.clone();
                async move { transport.get(request).await }
            })
            .await?;

            self.metrics.record_request(endpoint);

            match self.check_status(&response) {
                Ok(()) => return self.parse_body(&response),
                Err(error) => match error.retry_after() {
                    Some(wait) => {
                        self.metrics.record_rate_limit(wait);
                        warn!(
                            endpoint,
                            retry_after_secs = wait.as_secs(),
                            "Rate limited, waiting before retrying"
                        );
                        tokio::time::sleep(wait).await;
                    }
                    None => return Err(error),
                },
            }
        }
    }

    fn check_status(&self, response: &RawResponse) -> ExportResult<()> {
        if response.status == StatusCode::TOO_MANY_REQUESTS {
            let retry_after = match response.retry_after_secs() {
                Some(secs) => Duration::from_secs(secs),
                None => {
                    warn!(
                        fallback_secs = self.fallback_retry_after.as_secs(),
                        "Rate limited without a usable Retry-After header"
                    );
                    self.fallback_retry_after
                }
            };
            return Err(RateLimitError::RateLimited { retry_after }.into());
        }

        if response.status != StatusCode::OK {
            return Err(ExportError::ApiHttp {
                status: response.status.as_u16(),
                reason: response.reason().to_string(),
            });
        }

        Ok(())
    }

    fn parse_body(&self, response: &RawResponse) -> ExportResult<Value> {
        let body = response.json()?;

        if body.get("ok").and_then(Value::as_bool) == Some(false) {
            return Err(ExportError::from_slack_error(body));
        }

        Ok(body)
    }
}

impl std::fmt::Debug for RateLimitGovernor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RateLimitGovernor")
            .field("retry", &self.retry)
            .field("fallback_retry_after", &self.fallback_retry_after)
            .finish()
    }
}
