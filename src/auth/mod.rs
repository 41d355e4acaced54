//! Authentication management for the exporter.
//!
//! Presents the configured token as a bearer `Authorization` header. The token
//! is never sent as a query parameter.

use crate::config::{ExportConfig, SlackToken, TokenType};
use crate::errors::{ConfigurationError, ExportError, ExportResult};
use http::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use std::sync::Arc;

/// Authentication manager for API requests
#[derive(Clone)]
pub struct AuthManager {
    config: Arc<ExportConfig>,
}

impl AuthManager {
    /// Create a new authentication manager
    pub fn new(config: Arc<ExportConfig>) -> Self {
        Self { config }
    }

    /// Get headers carrying the bearer token
    pub fn get_headers(&self) -> ExportResult<HeaderMap> {
        let token = self
            .config
            .token()
            .ok_or(ExportError::Configuration(ConfigurationError::MissingToken))?;
        self.build_headers(token)
    }

    fn build_headers(&self, token: &SlackToken) -> ExportResult<HeaderMap> {
        let mut headers = HeaderMap::new();

        let auth_value = format!("Bearer {}", token.expose());
        let mut value = HeaderValue::from_str(&auth_value).map_err(|_| {
            ExportError::Configuration(ConfigurationError::InvalidToken(
                "Token contains characters not allowed in a header".to_string(),
            ))
        })?;
        value.set_sensitive(true);
        headers.insert(AUTHORIZATION, value);

        Ok(headers)
    }

    /// Get the configured token type
    pub fn token_type(&self) -> Option<TokenType> {
        self.config.token().map(|t| t.token_type())
    }
}

impl std::fmt::Debug for AuthManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthManager")
            .field("token_type", &self.token_type())
            .finish()
    }
}
