//! Command-line interface.

use crate::client::ExportClient;
use crate::config::ExportConfig;
use crate::errors::ExportResult;
use crate::export::{ExportOptions, Exporter, RunContext, ThreadPolicy};
use crate::notify::Notifier;
use crate::output::{ConsoleSink, DirectorySink, ExportSink};
use crate::transport::HttpTransport;
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// Export private channels and users from a Slack workspace
#[derive(Debug, Clone, Parser)]
#[command(name = "slack-export", version, about)]
pub struct Cli {
    /// Directory in which to save output files (if left blank, prints to stdout)
    #[arg(short = 'o', value_name = "DIR")]
    pub output: Option<PathBuf>,

    /// List all conversations in your workspace
    #[arg(long = "lc")]
    pub list_channels: bool,

    /// List all users in your workspace
    #[arg(long = "lu")]
    pub list_users: bool,

    /// Get all messages and threads for all accessible private conversations
    #[arg(long)]
    pub all: bool,

    /// Skip importing files (workaround for "Just import their messages" import mode)
    #[arg(long)]
    pub skipfiles: bool,

    /// Team ID for Enterprise Grid workspaces
    #[arg(long, value_name = "ID")]
    pub team_id: Option<String>,

    /// Post status and errors to this Slack response URL instead of stdout
    #[arg(long, value_name = "URL")]
    pub response_url: Option<String>,

    /// Drop thread roots repeated among their own replies
    #[arg(long)]
    pub dedupe_threads: bool,

    /// Leave the run directory unzipped
    #[arg(long)]
    pub no_zip: bool,
}

impl Cli {
    /// Apply command-line overrides to the configuration
    pub fn apply(&self, config: &mut ExportConfig) {
        if self.team_id.is_some() {
            config.team_id = self.team_id.clone();
        }
    }

    /// Export options implied by the flags
    pub fn export_options(&self, config: &ExportConfig) -> ExportOptions {
        let policy = if self.dedupe_threads {
            ThreadPolicy::Deduplicate
        } else {
            ThreadPolicy::Preserve
        };

        ExportOptions::default()
            .skip_files(self.skipfiles)
            .thread_policy(policy)
            .team_id(config.team_id.clone())
            .page_size(config.page_size)
    }

    /// Sink chosen by `-o`
    pub fn sink(&self, ctx: &RunContext) -> Box<dyn ExportSink> {
        match &self.output {
            Some(dir) => Box::new(DirectorySink::new(dir, ctx).with_zip(!self.no_zip)),
            None => Box::new(ConsoleSink::stdout()),
        }
    }

    /// Whether any action flag was given
    pub fn has_action(&self) -> bool {
        self.list_channels || self.list_users || self.all
    }

    /// Run the requested actions
    ///
    /// `--lc` runs first; then `--lu`, or `--all` when `--lu` is absent.
    pub async fn execute(
        &self,
        client: &ExportClient,
        ctx: &RunContext,
        sink: &mut dyn ExportSink,
    ) -> ExportResult<()> {
        if !self.has_action() {
            warn!("Nothing to do: pass --lc, --lu or --all");
            return Ok(());
        }

        let exporter = Exporter::from_client(client, self.export_options(client.config()));

        if self.list_channels {
            let channels = exporter.list_channels().await?;
            sink.write_channel_list(&channels)?;
        }

        if self.list_users {
            let users = exporter.list_users().await?;
            sink.write_user_list(&users)?;
        } else if self.all {
            let summary = exporter.run(ctx, sink).await?;
            info!(
                channels = summary.channels,
                windows = summary.windows_written,
                metrics = ?client.metrics().snapshot(),
                "Run finished"
            );
        }

        Ok(())
    }

    /// Run the command line end to end
    ///
    /// `transport` carries both the API calls and any `--response-url`
    /// notification. A fatal error is delivered once through the notifier
    /// and then returned.
    pub async fn run(
        &self,
        ctx: &RunContext,
        config: ExportResult<ExportConfig>,
        transport: Arc<dyn HttpTransport>,
        sink: &mut dyn ExportSink,
    ) -> ExportResult<()> {
        let notifier = Notifier::from_response_url(self.response_url.clone(), transport.clone());

        let result: ExportResult<()> = async move {
            let mut config = config?;
            self.apply(&mut config);

            let client = ExportClient::with_transport(config, transport)?;
            self.execute(&client, ctx, sink).await
        }
        .await;

        if let Err(e) = &result {
            debug!(
                code = e.error_code(),
                status = ?e.http_status(),
                "Run aborted"
            );
            if let Err(notify_err) = notifier.say(&e.to_string()).await {
                error!(error = %notify_err, "Failed to deliver failure notification");
            }
        }

        result
    }
}

/// Process exit status for a finished run
pub fn exit_code(result: &ExportResult<()>) -> ExitCode {
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(_) => ExitCode::FAILURE,
    }
}
