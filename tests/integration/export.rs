//! Full export over HTTP into a temporary directory

use super::*;
use pretty_assertions::assert_eq;
use slack_export::export::{ExportOptions, Exporter, RunContext};
use slack_export::output::DirectorySink;
use std::fs;
use wiremock::matchers::query_param;

const CREATED: i64 = 1_600_000_000;

async fn mount_workspace(server: &MockServer) {
    api_get("conversations.list")
        .respond_with(page(
            "channels",
            json!([{"id": "G1", "name": "ops", "created": CREATED, "is_private": true}]),
            "",
        ))
        .mount(server)
        .await;
    api_get("users.list")
        .respond_with(page("members", json!([{"id": "U1", "name": "ann"}]), ""))
        .mount(server)
        .await;

    api_get("conversations.history")
        .and(query_param("oldest", "1600000000.000000"))
        .respond_with(page(
            "messages",
            json!([
                {"type": "message", "ts": "1600000300.000100", "text": "plain", "user": "U1"},
                {"type": "message", "ts": "1600000100.000100", "thread_ts": "1600000100.000100", "text": "root", "user": "U1"},
                {"type": "message", "subtype": "channel_join", "ts": "1600000050.000100", "thread_ts": "1600000100.000100", "text": "joined"}
            ]),
            "",
        ))
        .mount(server)
        .await;
    api_get("conversations.history")
        .respond_with(page("messages", json!([]), ""))
        .mount(server)
        .await;

    api_get("conversations.replies")
        .and(query_param("ts", "1600000100.000100"))
        .respond_with(page(
            "messages",
            json!([
                {"type": "message", "ts": "1600000100.000100", "thread_ts": "1600000100.000100", "text": "root"},
                {"type": "message", "ts": "1600000150.000100", "thread_ts": "1600000100.000100", "text": "reply"}
            ]),
            "",
        ))
        .expect(1)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_export_writes_reloadable_day_files() {
    let server = setup_mock_server().await;
    mount_workspace(&server).await;

    let out = tempfile::tempdir().unwrap();
    let ctx = RunContext::new().with_now(CREATED as f64 + 200_000.0);
    let mut sink = DirectorySink::new(out.path(), &ctx);

    let client = client_for(&server);
    let summary = Exporter::from_client(&client, ExportOptions::default())
        .run(&ctx, &mut sink)
        .await
        .unwrap();

    assert_eq!(summary.channels, 1);
    assert_eq!(summary.windows_written, 1);

    let run_dir = out.path().join(ctx.run_dir_name());
    let day: Vec<Value> =
        serde_json::from_str(&fs::read_to_string(run_dir.join("ops/2020-09-13.json")).unwrap())
            .unwrap();

    let texts: Vec<&str> = day.iter().filter_map(|m| m["text"].as_str()).collect();
    assert_eq!(texts, vec!["plain", "root", "joined", "root", "reply"]);

    // key order survives the write and reload
    let first_keys: Vec<&String> = day[0].as_object().unwrap().keys().collect();
    assert_eq!(first_keys, vec!["type", "ts", "text", "user"]);

    assert!(run_dir.join("channels.json").is_file());
    assert!(run_dir.join("users.json").is_file());
    assert!(!run_dir.join("ops/2020-09-14.json").exists());
    assert!(out
        .path()
        .join(format!("{}.zip", ctx.run_dir_name()))
        .is_file());
}

#[tokio::test]
async fn test_window_count_follows_channel_age() {
    let server = setup_mock_server().await;
    mount_workspace(&server).await;

    let out = tempfile::tempdir().unwrap();
    let ctx = RunContext::new().with_now(CREATED as f64 + 200_000.0);
    let mut sink = DirectorySink::new(out.path(), &ctx).with_zip(false);

    let client = client_for(&server);
    Exporter::from_client(&client, ExportOptions::default())
        .run(&ctx, &mut sink)
        .await
        .unwrap();

    assert_eq!(client.metrics().requests_for("conversations.history"), 3);
    assert_eq!(client.metrics().requests_for("conversations.replies"), 1);
}
