//! Status and failure notification.
//!
//! Messages go to standard output, or are posted to a Slack `response_url`
//! when the export was triggered from a slash command.

use crate::errors::ExportResult;
use crate::observability::Redacted;
use crate::transport::{HttpTransport, PostRequest};
use serde_json::json;
use std::sync::Arc;
use tracing::{instrument, warn};

/// Where notifications are delivered
#[derive(Clone)]
pub enum Notifier {
    /// Print to standard output
    Console,
    /// POST `{"text": ...}` to a response URL
    ResponseUrl {
        /// Target URL; treated as a credential
        url: Redacted<String>,
        /// Transport used for the POST
        transport: Arc<dyn HttpTransport>,
    },
}

impl Notifier {
    /// Console notifier
    pub fn console() -> Self {
        Self::Console
    }

    /// Notifier posting to `url`
    pub fn response_url(url: impl Into<String>, transport: Arc<dyn HttpTransport>) -> Self {
        Self::ResponseUrl {
            url: Redacted::new(url.into()),
            transport,
        }
    }

    /// Pick a notifier from an optional response URL
    pub fn from_response_url(url: Option<String>, transport: Arc<dyn HttpTransport>) -> Self {
        match url {
            Some(url) => Self::response_url(url, transport),
            None => Self::Console,
        }
    }

    /// Deliver a message
    ///
    /// A response URL that answers with a non-success status is logged, not
    /// treated as an error.
    #[instrument(skip(self, text))]
    pub async fn say(&self, text: &str) -> ExportResult<()> {
        match self {
            Self::Console => {
                println!("{}", text);
                Ok(())
            }
            Self::ResponseUrl { url, transport } => {
                let request = PostRequest::new(url.expose().clone(), json!({ "text": text }));
                let response = transport.post_json(request).await?;
                if !response.status.is_success() {
                    warn!(
                        status = response.status.as_u16(),
                        "Response URL rejected notification"
                    );
                }
                Ok(())
            }
        }
    }
}

impl std::fmt::Debug for Notifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Console => write!(f, "Notifier::Console"),
            Self::ResponseUrl { url, .. } => f
                .debug_struct("Notifier::ResponseUrl")
                .field("url", url)
                .finish(),
        }
    }
}
