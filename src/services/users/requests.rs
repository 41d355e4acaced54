//! Request types for users service.

use crate::pagination::PagedRequest;
use crate::DEFAULT_PAGE_SIZE;
use serde::Serialize;

/// Request to list workspace members
#[derive(Debug, Clone, Serialize)]
pub struct ListUsersRequest {
    /// Number of results per page
    pub limit: u32,
    /// Team ID for Enterprise Grid
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team_id: Option<String>,
}

impl Default for ListUsersRequest {
    fn default() -> Self {
        Self::new()
    }
}

impl ListUsersRequest {
    /// Create a new request
    pub fn new() -> Self {
        Self {
            limit: DEFAULT_PAGE_SIZE,
            team_id: None,
        }
    }

    /// Set result limit
    pub fn limit(mut self, n: u32) -> Self {
        self.limit = n;
        self
    }

    /// Set team ID
    pub fn team_id(mut self, id: Option<String>) -> Self {
        self.team_id = id;
        self
    }
}

impl PagedRequest for ListUsersRequest {
    const ENDPOINT: &'static str = "users.list";
    const RESULT_KEY: Option<&'static str> = Some("members");
}
