//! Error types for the exporter.
//!
//! Maps transport, rate-limit, API and output failures to semantic error
//! types. Every variant except [`RateLimitError`] is fatal to an export run.

use std::time::Duration;
use thiserror::Error;

/// Result type for export operations
pub type ExportResult<T> = Result<T, ExportError>;

/// Root error type for the exporter
#[derive(Error, Debug)]
pub enum ExportError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigurationError),

    /// Network error
    #[error("Network error: {0}")]
    Network(#[from] NetworkError),

    /// Rate limit signal
    #[error("Rate limit error: {0}")]
    RateLimit(#[from] RateLimitError),

    /// Non-200, non-429 HTTP status
    #[error("ERROR: {status} {reason}")]
    ApiHttp {
        /// HTTP status code
        status: u16,
        /// Canonical reason phrase
        reason: String,
    },

    /// Well-formed body carrying `"ok": false`
    #[error("I encountered an error: {payload}")]
    ApiLogical {
        /// Slack error code
        error: String,
        /// The full response body
        payload: serde_json::Value,
    },

    /// Page body did not contain the expected record list
    #[error("Something went wrong: missing '{key}' in {endpoint} response")]
    MalformedPage {
        /// Endpoint that produced the page
        endpoint: String,
        /// Expected nested key
        key: String,
    },

    /// Record is missing a field the exporter needs
    #[error("Record is missing required field '{field}'")]
    MalformedRecord {
        /// Missing field name
        field: String,
    },

    /// Response parsing error
    #[error("Response error: {0}")]
    Response(#[from] ResponseError),

    /// Output sink error
    #[error("Output error: {0}")]
    Output(#[from] OutputError),
}

impl ExportError {
    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Configuration(_) => "EXPORT_CONFIG",
            Self::Network(_) => "EXPORT_NETWORK",
            Self::RateLimit(_) => "EXPORT_RATE_LIMIT",
            Self::ApiHttp { .. } => "EXPORT_API_HTTP",
            Self::ApiLogical { .. } => "EXPORT_API",
            Self::MalformedPage { .. } => "EXPORT_MALFORMED_PAGE",
            Self::MalformedRecord { .. } => "EXPORT_MALFORMED_RECORD",
            Self::Response(_) => "EXPORT_RESPONSE",
            Self::Output(_) => "EXPORT_OUTPUT",
        }
    }

    /// Check if this error is a transient transport failure
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::Network(NetworkError::Timeout)
                | Self::Network(NetworkError::ConnectionFailed { .. })
                | Self::Network(NetworkError::Body { .. })
        )
    }

    /// Get retry-after duration if applicable
    pub fn retry_after(&self) -> Option<Duration> {
        match self {
            Self::RateLimit(RateLimitError::RateLimited { retry_after }) => Some(*retry_after),
            _ => None,
        }
    }

    /// Get HTTP status code if applicable
    pub fn http_status(&self) -> Option<u16> {
        match self {
            Self::RateLimit(_) => Some(429),
            Self::ApiHttp { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Create a logical API error from an `ok: false` body
    pub fn from_slack_error(payload: serde_json::Value) -> Self {
        let error = payload
            .get("error")
            .and_then(|v| v.as_str())
            .unwrap_or("unknown_error")
            .to_string();
        Self::ApiLogical { error, payload }
    }
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigurationError {
    /// Missing token
    #[error("Missing SLACK_USER_TOKEN in environment variables")]
    MissingToken,

    /// Invalid token format
    #[error("Invalid token format: {0}")]
    InvalidToken(String),

    /// Invalid configuration
    #[error("Invalid configuration: {message}")]
    InvalidConfiguration {
        /// Error message
        message: String,
    },
}

/// Rate limit errors
#[derive(Error, Debug)]
pub enum RateLimitError {
    /// Rate limited with the server-mandated wait
    #[error("Rate limited, retry after {retry_after:?}")]
    RateLimited {
        /// Duration to wait before retrying
        retry_after: Duration,
    },
}

/// Network errors
#[derive(Error, Debug)]
pub enum NetworkError {
    /// Connection failed
    #[error("Connection failed: {message}")]
    ConnectionFailed {
        /// Error message
        message: String,
    },

    /// Request timeout
    #[error("Request timed out")]
    Timeout,

    /// Response body was truncated or interrupted
    #[error("Failed to read response body: {message}")]
    Body {
        /// Error message
        message: String,
    },

    /// HTTP error
    #[error("HTTP error: {0}")]
    Http(String),

    /// Retries exhausted on a transient failure
    #[error("Failed to retrieve {url} after {attempts} attempts: {source}")]
    Exhausted {
        /// Target URL
        url: String,
        /// Attempts made
        attempts: u32,
        /// Last failure
        #[source]
        source: Box<NetworkError>,
    },
}

impl From<reqwest::Error> for NetworkError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            NetworkError::Timeout
        } else if err.is_connect() {
            NetworkError::ConnectionFailed {
                message: err.to_string(),
            }
        } else if err.is_body() || err.is_decode() {
            NetworkError::Body {
                message: err.to_string(),
            }
        } else {
            NetworkError::Http(err.to_string())
        }
    }
}

/// Response parsing errors
#[derive(Error, Debug)]
pub enum ResponseError {
    /// JSON deserialization error
    #[error("Deserialization error: {message}")]
    DeserializationError {
        /// Error message
        message: String,
    },
}

impl From<serde_json::Error> for ResponseError {
    fn from(err: serde_json::Error) -> Self {
        ResponseError::DeserializationError {
            message: err.to_string(),
        }
    }
}

/// Output sink errors
#[derive(Error, Debug)]
pub enum OutputError {
    /// Filesystem error
    #[error("I/O error at {path}: {source}")]
    Io {
        /// Path being written
        path: String,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// JSON encoding error
    #[error("Failed to encode JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Zip archive error
    #[error("Failed to build archive: {0}")]
    Archive(#[from] zip::result::ZipError),
}

impl OutputError {
    /// Wrap an IO error with the path it happened on
    pub fn io(path: impl AsRef<std::path::Path>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.as_ref().display().to_string(),
            source,
        }
    }
}
