//! Request types for conversations service.

use crate::pagination::PagedRequest;
use crate::types::{ChannelId, Timestamp};
use crate::DEFAULT_PAGE_SIZE;
use serde::Serialize;

/// Conversation type exported by the tool
pub const PRIVATE_CHANNEL: &str = "private_channel";

/// Request to list conversations visible to the token
#[derive(Debug, Clone, Serialize)]
pub struct ListConversationsRequest {
    /// Types of conversations to include
    pub types: String,
    /// Number of results per page
    pub limit: u32,
    /// Team ID for Enterprise Grid
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team_id: Option<String>,
}

impl Default for ListConversationsRequest {
    fn default() -> Self {
        Self::new()
    }
}

impl ListConversationsRequest {
    /// Create a request for private channels
    pub fn new() -> Self {
        Self {
            types: PRIVATE_CHANNEL.to_string(),
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

impl PagedRequest for ListConversationsRequest {
    const ENDPOINT: &'static str = "conversations.list";
    const RESULT_KEY: Option<&'static str> = Some("channels");
}

/// Request for the messages of a channel within a time range
#[derive(Debug, Clone, Serialize)]
pub struct ConversationHistoryRequest {
    /// Channel ID
    pub channel: ChannelId,
    /// Only messages after this timestamp
    #[serde(skip_serializing_if = "Option::is_none")]
    pub oldest: Option<Timestamp>,
    /// Only messages before this timestamp
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latest: Option<Timestamp>,
    /// Number of messages per page
    pub limit: u32,
}

impl ConversationHistoryRequest {
    /// Create a new request
    pub fn new(channel: impl Into<ChannelId>) -> Self {
        Self {
            channel: channel.into(),
            oldest: None,
            latest: None,
            limit: DEFAULT_PAGE_SIZE,
        }
    }

    /// Set oldest timestamp
    pub fn oldest(mut self, ts: impl Into<Timestamp>) -> Self {
        self.oldest = Some(ts.into());
        self
    }

    /// Set latest timestamp
    pub fn latest(mut self, ts: impl Into<Timestamp>) -> Self {
        self.latest = Some(ts.into());
        self
    }

    /// Set result limit
    pub fn limit(mut self, n: u32) -> Self {
        self.limit = n;
        self
    }
}

impl PagedRequest for ConversationHistoryRequest {
    const ENDPOINT: &'static str = "conversations.history";
    const RESULT_KEY: Option<&'static str> = Some("messages");
}

/// Request for the replies of a thread
#[derive(Debug, Clone, Serialize)]
pub struct ConversationRepliesRequest {
    /// Channel ID
    pub channel: ChannelId,
    /// Thread parent timestamp
    pub ts: Timestamp,
    /// Number of results per page
    pub limit: u32,
}

impl ConversationRepliesRequest {
    /// Create a new request
    pub fn new(channel: impl Into<ChannelId>, ts: impl Into<Timestamp>) -> Self {
        Self {
            channel: channel.into(),
            ts: ts.into(),
            limit: DEFAULT_PAGE_SIZE,
        }
    }

    /// Set result limit
    pub fn limit(mut self, n: u32) -> Self {
        self.limit = n;
        self
    }
}

impl PagedRequest for ConversationRepliesRequest {
    const ENDPOINT: &'static str = "conversations.replies";
    const RESULT_KEY: Option<&'static str> = Some("messages");
}
