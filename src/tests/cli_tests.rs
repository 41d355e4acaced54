//! End-to-end command-line runs against the mock transport.

use super::{MemorySink, TEST_TOKEN};
use crate::cli::{exit_code, Cli};
use crate::config::ExportConfig;
use crate::errors::{ConfigurationError, ExportError, ExportResult};
use crate::export::RunContext;
use crate::fixtures::{channel_fixtures, page_fixtures};
use crate::mocks::{MockHttpTransport, MockResponse};
use clap::Parser;
use serde_json::json;
use std::process::ExitCode;
use std::sync::Arc;

const RESPONSE_URL: &str = "https://hooks.slack.com/commands/T1/abc";

fn config() -> ExportResult<ExportConfig> {
    ExportConfig::builder().token(TEST_TOKEN)?.build()
}

fn posts(transport: &MockHttpTransport) -> Vec<serde_json::Value> {
    transport
        .requests()
        .into_iter()
        .filter(|r| r.method == "POST")
        .filter_map(|r| r.body)
        .collect()
}

#[tokio::test]
async fn test_http_failure_is_posted_once_and_fails_the_run() {
    let transport = Arc::new(MockHttpTransport::new());
    transport.enqueue_for("conversations.list", MockResponse::status(403, "denied"));
    transport.enqueue(MockResponse::status(200, "ok"));

    let cli = Cli::parse_from(["slack-export", "--all", "--response-url", RESPONSE_URL]);
    let mut sink = MemorySink::default();
    let result = cli
        .run(&RunContext::new(), config(), transport.clone(), &mut sink)
        .await;

    assert!(matches!(result, Err(ExportError::ApiHttp { status: 403, .. })));
    assert_eq!(exit_code(&result), ExitCode::FAILURE);

    assert_eq!(posts(&transport), vec![json!({"text": "ERROR: 403 Forbidden"})]);
    let post = transport
        .requests()
        .into_iter()
        .find(|r| r.method == "POST")
        .unwrap();
    assert_eq!(post.url, RESPONSE_URL);
    assert!(sink.channels.is_none());
    assert!(!sink.finished);
}

#[tokio::test]
async fn test_missing_token_is_posted_without_api_calls() {
    let transport = Arc::new(MockHttpTransport::new());
    transport.enqueue(MockResponse::status(200, "ok"));

    let cli = Cli::parse_from(["slack-export", "--lc", "--response-url", RESPONSE_URL]);
    let mut sink = MemorySink::default();
    let result = cli
        .run(
            &RunContext::new(),
            Err(ConfigurationError::MissingToken.into()),
            transport.clone(),
            &mut sink,
        )
        .await;

    assert!(result.is_err());
    assert_eq!(exit_code(&result), ExitCode::FAILURE);
    assert_eq!(transport.request_count(), 1);
    assert_eq!(
        posts(&transport),
        vec![json!({
            "text": "Configuration error: Missing SLACK_USER_TOKEN in environment variables"
        })]
    );
}

#[tokio::test]
async fn test_successful_listing_posts_nothing() {
    let transport = Arc::new(MockHttpTransport::new());
    transport.enqueue_for(
        "conversations.list",
        MockResponse::json(&page_fixtures::page(
            "channels",
            &[channel_fixtures::private_channel("G1", "ops", 1_600_000_000)],
            None,
        )),
    );

    let cli = Cli::parse_from(["slack-export", "--lc", "--response-url", RESPONSE_URL]);
    let mut sink = MemorySink::default();
    let result = cli
        .run(&RunContext::new(), config(), transport.clone(), &mut sink)
        .await;

    assert!(result.is_ok());
    assert_eq!(exit_code(&result), ExitCode::SUCCESS);
    assert!(posts(&transport).is_empty());
    assert_eq!(sink.channel_list.as_ref().map(Vec::len), Some(1));
}

#[tokio::test]
async fn test_failed_notification_still_returns_the_run_error() {
    let transport = Arc::new(MockHttpTransport::new());
    transport.enqueue_for("conversations.list", MockResponse::status(500, "boom"));

    let cli = Cli::parse_from(["slack-export", "--lc", "--response-url", RESPONSE_URL]);
    let mut sink = MemorySink::default();
    let result = cli
        .run(&RunContext::new(), config(), transport.clone(), &mut sink)
        .await;

    assert!(matches!(result, Err(ExportError::ApiHttp { status: 500, .. })));
    assert_eq!(posts(&transport).len(), 1);
}
