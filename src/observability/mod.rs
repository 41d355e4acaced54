//! Observability infrastructure for the exporter.
//!
//! Provides logging setup, redaction helpers and run metrics.

pub mod logging;
pub mod metrics;

pub use logging::*;
pub use metrics::*;
