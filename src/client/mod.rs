//! Export client implementation.
//!
//! Wires the transport, rate-limit governor, paginator and services together
//! from one configuration.

use crate::auth::AuthManager;
use crate::config::ExportConfig;
use crate::errors::ExportResult;
use crate::observability::ExportMetrics;
use crate::pagination::Paginator;
use crate::resilience::RateLimitGovernor;
use crate::services::{
    ConversationsService, ConversationsServiceTrait, UsersService, UsersServiceTrait,
};
use crate::transport::{HttpTransport, ReqwestTransport};
use std::sync::Arc;

/// Client for the read-only endpoints the exporter uses
pub struct ExportClient {
    config: Arc<ExportConfig>,
    transport: Arc<dyn HttpTransport>,
    metrics: Arc<ExportMetrics>,
    conversations_service: ConversationsService,
    users_service: UsersService,
}

impl ExportClient {
    /// Create a new client with the given configuration
    pub fn new(config: ExportConfig) -> ExportResult<Self> {
        let transport = Arc::new(ReqwestTransport::new(config.timeout)?);
        Self::with_transport(config, transport)
    }

    /// Create a new client with a custom transport
    pub fn with_transport(
        config: ExportConfig,
        transport: Arc<dyn HttpTransport>,
    ) -> ExportResult<Self> {
        config.validate()?;

        let config = Arc::new(config);
        let auth = AuthManager::new(config.clone());
        let metrics = Arc::new(ExportMetrics::new());

        let governor =
            RateLimitGovernor::new(transport.clone(), config.retry.clone(), metrics.clone());
        let paginator = Arc::new(Paginator::new(governor, auth, config.build_url("")));

        Ok(Self {
            conversations_service: ConversationsService::new(paginator.clone()),
            users_service: UsersService::new(paginator),
            config,
            transport,
            metrics,
        })
    }

    /// Get the configuration
    pub fn config(&self) -> &ExportConfig {
        &self.config
    }

    /// Get a reference to the HTTP transport
    pub fn transport(&self) -> &Arc<dyn HttpTransport> {
        &self.transport
    }

    /// Request and rate-limit counters for this client
    pub fn metrics(&self) -> &Arc<ExportMetrics> {
        &self.metrics
    }

    /// Get the conversations service
    pub fn conversations(&self) -> &dyn ConversationsServiceTrait {
        &self.conversations_service
    }

    /// Get the users service
    pub fn users(&self) -> &dyn UsersServiceTrait {
        &self.users_service
    }
}

impl std::fmt::Debug for ExportClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExportClient")
            .field("config", &self.config)
            .finish()
    }
}

/// Create a client from environment variables
pub fn create_client_from_env() -> ExportResult<ExportClient> {
    ExportClient::new(ExportConfig::from_env()?)
}
