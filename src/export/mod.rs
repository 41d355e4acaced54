//! Export orchestration.
//!
//! Enumerates channels and users, then walks each channel's history one UTC
//! day at a time from its creation until the run's "now". Every thread root
//! found in a window has its replies fetched and appended to that window's
//! batch, and each non-empty batch is handed to the sink as one artifact.

pub mod context;
pub mod redact;
pub mod window;

pub use context::RunContext;
pub use redact::{redact_all, redact_files, Redaction};
pub use window::{DayWindows, TimeWindow, DAY_SECS};

use crate::client::ExportClient;
use crate::errors::{ExportError, ExportResult};
use crate::output::ExportSink;
use crate::services::conversations::{
    ConversationHistoryRequest, ConversationRepliesRequest, ConversationsServiceTrait,
    ListConversationsRequest,
};
use crate::services::users::{ListUsersRequest, UsersServiceTrait};
use crate::types::{ChannelRef, Record};
use crate::DEFAULT_PAGE_SIZE;
use std::collections::HashSet;
use tracing::{debug, info, instrument};

/// How thread roots that reappear among their own replies are handled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThreadPolicy {
    /// Keep every reply record, so a root appears in history and again in its
    /// thread. Matches exports produced by earlier versions of the tool.
    #[default]
    Preserve,
    /// Drop reply records whose `ts` is already in the window's batch
    Deduplicate,
}

/// Options for an export run
#[derive(Debug, Clone)]
pub struct ExportOptions {
    /// Replace file attachments with inline notes
    pub skip_files: bool,
    /// Thread root handling
    pub thread_policy: ThreadPolicy,
    /// Team ID for Enterprise Grid
    pub team_id: Option<String>,
    /// Records requested per page
    pub page_size: u32,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            skip_files: false,
            thread_policy: ThreadPolicy::default(),
            team_id: None,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl ExportOptions {
    /// Enable attachment redaction
    pub fn skip_files(mut self, skip: bool) -> Self {
        self.skip_files = skip;
        self
    }

    /// Set the thread policy
    pub fn thread_policy(mut self, policy: ThreadPolicy) -> Self {
        self.thread_policy = policy;
        self
    }

    /// Restrict queries to a team
    pub fn team_id(mut self, team_id: Option<String>) -> Self {
        self.team_id = team_id;
        self
    }

    /// Set the page size
    pub fn page_size(mut self, size: u32) -> Self {
        self.page_size = size;
        self
    }
}

/// Totals for a finished run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExportSummary {
    /// Channels walked
    pub channels: usize,
    /// Non-empty windows handed to the sink
    pub windows_written: usize,
    /// History messages written
    pub messages: usize,
    /// Thread replies written
    pub replies: usize,
}

/// One window's batch before it is written
#[derive(Debug, Clone, Default)]
pub struct WindowBatch {
    /// History messages followed by spliced replies
    pub records: Vec<Record>,
    /// Number of history messages at the front of `records`
    pub messages: usize,
    /// Number of replies appended after the history messages
    pub replies: usize,
}

/// Drives a full export against the conversations and users services
pub struct Exporter<'a> {
    conversations: &'a dyn ConversationsServiceTrait,
    users: &'a dyn UsersServiceTrait,
    options: ExportOptions,
}

impl<'a> Exporter<'a> {
    /// Create an exporter over the given services
    pub fn new(
        conversations: &'a dyn ConversationsServiceTrait,
        users: &'a dyn UsersServiceTrait,
        options: ExportOptions,
    ) -> Self {
        Self {
            conversations,
            users,
            options,
        }
    }

    /// Create an exporter over a client's services
    pub fn from_client(client: &'a ExportClient, options: ExportOptions) -> Self {
        Self::new(client.conversations(), client.users(), options)
    }

    /// Options in effect
    pub fn options(&self) -> &ExportOptions {
        &self.options
    }

    /// Every private channel visible to the token
    pub async fn list_channels(&self) -> ExportResult<Vec<Record>> {
        let request = ListConversationsRequest::new()
            .limit(self.options.page_size)
            .team_id(self.options.team_id.clone());
        self.conversations.list(request).await
    }

    /// Every workspace member
    pub async fn list_users(&self) -> ExportResult<Vec<Record>> {
        let request = ListUsersRequest::new()
            .limit(self.options.page_size)
            .team_id(self.options.team_id.clone());
        self.users.list(request).await
    }

    /// Run a full export into `sink`
    ///
    /// Any failure aborts the run. Artifacts already handed to the sink stay
    /// where they are, and `finish` is not called.
    #[instrument(skip(self, ctx, sink), fields(now = ctx.now()))]
    pub async fn run(
        &self,
        ctx: &RunContext,
        sink: &mut dyn ExportSink,
    ) -> ExportResult<ExportSummary> {
        let channels = self.list_channels().await?;
        let users = self.list_users().await?;
        info!(
            channels = channels.len(),
            users = users.len(),
            "Fetched channel and user lists"
        );

        sink.write_channels(&channels)?;
        sink.write_users(&users)?;

        let mut summary = ExportSummary::default();
        for record in &channels {
            let channel = ChannelRef::from_record(record)?;
            self.export_channel(ctx, &channel, sink, &mut summary).await?;
            summary.channels += 1;
        }

        sink.finish()?;

        info!(
            channels = summary.channels,
            windows = summary.windows_written,
            messages = summary.messages,
            replies = summary.replies,
            "Export complete"
        );
        Ok(summary)
    }

    #[instrument(
        skip(self, ctx, sink, summary),
        fields(channel = %channel.id, name = %channel.name)
    )]
    async fn export_channel(
        &self,
        ctx: &RunContext,
        channel: &ChannelRef,
        sink: &mut dyn ExportSink,
        summary: &mut ExportSummary,
    ) -> ExportResult<()> {
        info!("Exporting channel");

        for window in DayWindows::new(channel.created, ctx.now()) {
            let batch = self.collect_window(channel, &window).await?;
            if batch.records.is_empty() {
                continue;
            }

            let day = window.day_label();
            debug!(day = %day, records = batch.records.len(), "Writing window");
            sink.write_window(&channel.name, &day, &batch.records)?;

            summary.windows_written += 1;
            summary.messages += batch.messages;
            summary.replies += batch.replies;
        }

        Ok(())
    }

    /// Fetch one window's history and splice in its threads' replies
    ///
    /// Replies are fetched in the order their roots appear in history. Only
    /// history messages are redacted.
    pub async fn collect_window(
        &self,
        channel: &ChannelRef,
        window: &TimeWindow,
    ) -> ExportResult<WindowBatch> {
        let request = ConversationHistoryRequest::new(channel.id.clone())
            .oldest(window.oldest())
            .latest(window.latest())
            .limit(self.options.page_size);
        let mut records = self.conversations.history(request).await?;

        if self.options.skip_files {
            redact_all(&mut records);
        }

        let roots = records
            .iter()
            .filter(|m| m.is_thread_root())
            .map(|m| {
                m.thread_ts()
                    .map(str::to_string)
                    .ok_or_else(|| ExportError::MalformedRecord {
                        field: "thread_ts".to_string(),
                    })
            })
            .collect::<ExportResult<Vec<String>>>()?;

        let messages = records.len();
        let mut seen: HashSet<String> = match self.options.thread_policy {
            ThreadPolicy::Deduplicate => records
                .iter()
                .filter_map(|m| m.ts().map(str::to_string))
                .collect(),
            ThreadPolicy::Preserve => HashSet::new(),
        };

        for thread_ts in roots {
            let request = ConversationRepliesRequest::new(channel.id.clone(), thread_ts)
                .limit(self.options.page_size);
            let replies = self.conversations.replies(request).await?;

            match self.options.thread_policy {
                ThreadPolicy::Preserve => records.extend(replies),
                ThreadPolicy::Deduplicate => {
                    records.extend(replies.into_iter().filter(|reply| match reply.ts() {
                        Some(ts) => seen.insert(ts.to_string()),
                        None => true,
                    }));
                }
            }
        }

        let replies = records.len() - messages;
        Ok(WindowBatch {
            records,
            messages,
            replies,
        })
    }
}

impl std::fmt::Debug for Exporter<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Exporter")
            .field("options", &self.options)
            .finish()
    }
}
