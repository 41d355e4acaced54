//! Slack workspace exporter
//!
//! Exports private channels, their message history with thread replies, and
//! the workspace member list from the Slack Web API into JSON files:
//! - Cursor pagination over every list endpoint
//! - Rate-limit backoff honoring `Retry-After`
//! - Bounded retry of transient connection failures
//! - One artifact per channel and UTC day, optionally zipped
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use slack_export::export::{ExportOptions, Exporter, RunContext};
//! use slack_export::output::DirectorySink;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = slack_export::create_client_from_env()?;
//!     let ctx = RunContext::new();
//!     let mut sink = DirectorySink::new("exports", &ctx);
//!
//!     let summary = Exporter::from_client(&client, ExportOptions::default())
//!         .run(&ctx, &mut sink)
//!         .await?;
//!
//!     println!("Wrote {} windows", summary.windows_written);
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

// Core modules
pub mod auth;
pub mod client;
pub mod config;
pub mod errors;
pub mod transport;
pub mod types;

// Retrieval engine
pub mod pagination;
pub mod resilience;
pub mod services;

// Export workflow
pub mod export;
pub mod notify;
pub mod output;

// Command line
pub mod cli;

// Observability
pub mod observability;

// Testing utilities
pub mod fixtures;
pub mod mocks;

// Tests
#[cfg(test)]
mod tests;

// Re-exports for convenience
pub use client::{create_client_from_env, ExportClient};
pub use config::{ExportConfig, ExportConfigBuilder};
pub use errors::{ExportError, ExportResult};

/// Default base URL for Slack API
pub const DEFAULT_BASE_URL: &str = "https://slack.com/api";

/// Default timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default number of records requested per page
pub const DEFAULT_PAGE_SIZE: u32 = 200;
