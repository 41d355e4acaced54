//! Configuration management for the exporter.
//!
//! Supports configuration via:
//! - Explicit values
//! - Environment variables (optionally seeded from a `.env` file)
//! - Builder pattern

use crate::errors::{ConfigurationError, ExportError, ExportResult};
use crate::observability::redact_token;
use crate::resilience::RetryConfig;
use secrecy::{ExposeSecret, SecretString};
use std::time::Duration;
use url::Url;

/// Environment variable holding the bearer token
pub const TOKEN_ENV_VAR: &str = "SLACK_USER_TOKEN";

/// Token type enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenType {
    /// Bot token (xoxb-*)
    Bot,
    /// User token (xoxp-*)
    User,
}

impl TokenType {
    /// Detect token type from prefix
    pub fn from_token(token: &str) -> Result<Self, ConfigurationError> {
        if token.starts_with("xoxb-") {
            Ok(TokenType::Bot)
        } else if token.starts_with("xoxp-") {
            Ok(TokenType::User)
        } else {
            Err(ConfigurationError::InvalidToken(
                "Token must start with xoxp- or xoxb-".to_string(),
            ))
        }
    }
}

/// Secure wrapper for the bearer token
#[derive(Clone)]
pub struct SlackToken {
    token: SecretString,
    token_type: TokenType,
}

impl SlackToken {
    /// Create a new token
    pub fn new(token: impl Into<String>) -> Result<Self, ConfigurationError> {
        let token_str = token.into().trim().to_string();
        if token_str.is_empty() {
            return Err(ConfigurationError::MissingToken);
        }
        let token_type = TokenType::from_token(&token_str)?;
        Ok(Self {
            token: SecretString::new(token_str),
            token_type,
        })
    }

    /// Get the token type
    pub fn token_type(&self) -> TokenType {
        self.token_type
    }

    /// Expose the token for use in requests
    pub(crate) fn expose(&self) -> &str {
        self.token.expose_secret()
    }
}

impl std::fmt::Debug for SlackToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "SlackToken({:?}, {})",
            self.token_type,
            redact_token(self.expose())
        )
    }
}

/// Configuration for the exporter
#[derive(Clone)]
pub struct ExportConfig {
    /// Bearer token
    pub(crate) token: Option<SlackToken>,
    /// Base URL for API requests
    pub base_url: Url,
    /// Request timeout
    pub timeout: Duration,
    /// Retry policy for transient transport failures
    pub retry: RetryConfig,
    /// Records requested per page
    pub page_size: u32,
    /// Team ID for Enterprise Grid workspaces
    pub team_id: Option<String>,
}

impl std::fmt::Debug for ExportConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExportConfig")
            .field("token", &self.token.as_ref().map(|t| t.token_type))
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .field("retry", &self.retry)
            .field("page_size", &self.page_size)
            .field("team_id", &self.team_id)
            .finish()
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            token: None,
            base_url: Url::parse(crate::DEFAULT_BASE_URL).expect("default base URL is valid"),
            timeout: Duration::from_secs(crate::DEFAULT_TIMEOUT_SECS),
            retry: RetryConfig::transport(),
            page_size: crate::DEFAULT_PAGE_SIZE,
            team_id: None,
        }
    }
}

impl ExportConfig {
    /// Create a new configuration builder
    pub fn builder() -> ExportConfigBuilder {
        ExportConfigBuilder::new()
    }

    /// Create configuration from environment variables
    ///
    /// Reads:
    /// - `SLACK_USER_TOKEN` - bearer token (required)
    /// - `SLACK_BASE_URL` - API base URL
    /// - `SLACK_TIMEOUT` - request timeout in seconds
    pub fn from_env() -> ExportResult<Self> {
        let mut builder = ExportConfigBuilder::new();

        match std::env::var(TOKEN_ENV_VAR) {
            Ok(token) => builder = builder.token(&token)?,
            Err(_) => return Err(ConfigurationError::MissingToken.into()),
        }

        if let Ok(url) = std::env::var("SLACK_BASE_URL") {
            builder = builder.base_url(&url)?;
        }

        if let Ok(timeout) = std::env::var("SLACK_TIMEOUT") {
            if let Ok(secs) = timeout.parse::<u64>() {
                builder = builder.timeout(Duration::from_secs(secs));
            }
        }

        builder.build()
    }

    /// Get the token if available
    pub fn token(&self) -> Option<&SlackToken> {
        self.token.as_ref()
    }

    /// Build the full URL for an endpoint
    pub fn build_url(&self, endpoint: &str) -> String {
        let base = self.base_url.as_str().trim_end_matches('/');
        let path = endpoint.trim_start_matches('/');
        format!("{}/{}", base, path)
    }

    /// Validate the configuration
    pub fn validate(&self) -> ExportResult<()> {
        if self.token.is_none() {
            return Err(ExportError::Configuration(ConfigurationError::MissingToken));
        }

        if self.page_size == 0 {
            return Err(ExportError::Configuration(
                ConfigurationError::InvalidConfiguration {
                    message: "page size must be at least 1".to_string(),
                },
            ));
        }

        Ok(())
    }
}

/// Builder for ExportConfig
#[derive(Default)]
pub struct ExportConfigBuilder {
    config: ExportConfig,
}

impl ExportConfigBuilder {
    /// Create a new builder
    pub fn new() -> Self {
        Self {
            config: ExportConfig::default(),
        }
    }

    /// Set the bearer token
    pub fn token(mut self, token: &str) -> Result<Self, ConfigurationError> {
        self.config.token = Some(SlackToken::new(token)?);
        Ok(self)
    }

    /// Set the base URL
    pub fn base_url(mut self, url: &str) -> Result<Self, ConfigurationError> {
        self.config.base_url =
            Url::parse(url).map_err(|e| ConfigurationError::InvalidConfiguration {
                message: format!("Invalid URL: {}", e),
            })?;
        Ok(self)
    }

    /// Set the timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Set the transport retry policy
    pub fn retry(mut self, retry: RetryConfig) -> Self {
        self.config.retry = retry;
        self
    }

    /// Set the page size
    pub fn page_size(mut self, size: u32) -> Self {
        self.config.page_size = size;
        self
    }

    /// Restrict queries to a team
    pub fn team_id(mut self, team_id: Option<String>) -> Self {
        self.config.team_id = team_id;
        self
    }

    /// Build the configuration
    pub fn build(self) -> ExportResult<ExportConfig> {
        self.config.validate()?;
        Ok(self.config)
    }

    /// Build the configuration without validation (for testing)
    pub fn build_unchecked(self) -> ExportConfig {
        self.config
    }
}
