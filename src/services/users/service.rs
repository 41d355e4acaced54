//! Users service implementation.

use super::*;
use crate::errors::ExportResult;
use crate::pagination::Paginator;
use crate::types::Record;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::instrument;

/// Trait for users service operations
#[async_trait]
pub trait UsersServiceTrait: Send + Sync {
    /// List users, every page
    async fn list(&self, request: ListUsersRequest) -> ExportResult<Vec<Record>>;
}

/// Users service implementation
#[derive(Clone, Debug)]
pub struct UsersService {
    paginator: Arc<Paginator>,
}

impl UsersService {
    /// Create a new users service
    pub fn new(paginator: Arc<Paginator>) -> Self {
        Self { paginator }
    }
}

#[async_trait]
impl UsersServiceTrait for UsersService {
    #[instrument(skip(self), fields(team_id = ?request.team_id))]
    async fn list(&self, request: ListUsersRequest) -> ExportResult<Vec<Record>> {
        self.paginator.collect(&request).await
    }
}
