//! Resilience patterns for the exporter.
//!
//! Provides bounded retry for transport failures and the unbounded
//! rate-limit governor.

pub mod governor;
pub mod retry;

pub use governor::{RateLimitGovernor, DEFAULT_RETRY_AFTER};
pub use retry::{with_retry, DefaultRetryPolicy, RetryConfig, RetryPolicy};
