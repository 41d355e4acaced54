//! Conversations service implementation.

use super::*;
use crate::errors::ExportResult;
use crate::pagination::Paginator;
use crate::types::Record;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::instrument;

/// Trait for conversations service operations
#[async_trait]
pub trait ConversationsServiceTrait: Send + Sync {
    /// List conversations, every page
    async fn list(&self, request: ListConversationsRequest) -> ExportResult<Vec<Record>>;

    /// Get conversation history within a time range, every page
    async fn history(&self, request: ConversationHistoryRequest) -> ExportResult<Vec<Record>>;

    /// Get thread replies, every page
    async fn replies(&self, request: ConversationRepliesRequest) -> ExportResult<Vec<Record>>;
}

/// Conversations service implementation
#[derive(Clone, Debug)]
pub struct ConversationsService {
    paginator: Arc<Paginator>,
}

impl ConversationsService {
    /// Create a new conversations service
    pub fn new(paginator: Arc<Paginator>) -> Self {
        Self { paginator }
    }
}

#[async_trait]
impl ConversationsServiceTrait for ConversationsService {
    #[instrument(skip(self), fields(team_id = ?request.team_id))]
    async fn list(&self, request: ListConversationsRequest) -> ExportResult<Vec<Record>> {
        self.paginator.collect(&request).await
    }

    #[instrument(skip(self), fields(channel = %request.channel))]
    async fn history(&self, request: ConversationHistoryRequest) -> ExportResult<Vec<Record>> {
        self.paginator.collect(&request).await
    }

    #[instrument(skip(self), fields(channel = %request.channel, ts = %request.ts))]
    async fn replies(&self, request: ConversationRepliesRequest) -> ExportResult<Vec<Record>> {
        self.paginator.collect(&request).await
    }
}
