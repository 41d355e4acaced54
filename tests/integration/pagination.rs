//! Pagination and rate limiting over HTTP

use super::*;
use pretty_assertions::assert_eq;
use slack_export::services::conversations::ListConversationsRequest;
use slack_export::services::users::ListUsersRequest;
use slack_export::ExportError;
use std::time::Instant;
use wiremock::matchers::{query_param, query_param_is_missing};

fn members(ids: &[&str]) -> Value {
    Value::Array(
        ids.iter()
            .map(|id| json!({"id": id, "name": format!("user-{}", id)}))
            .collect(),
    )
}

#[tokio::test]
async fn test_result_is_sum_of_pages() {
    let server = setup_mock_server().await;

    api_get("users.list")
        .and(query_param_is_missing("cursor"))
        .respond_with(page("members", members(&["U1", "U2"]), "p2"))
        .expect(1)
        .mount(&server)
        .await;
    api_get("users.list")
        .and(query_param("cursor", "p2"))
        .respond_with(page("members", members(&["U3", "U4", "U5"]), "p3"))
        .expect(1)
        .mount(&server)
        .await;
    api_get("users.list")
        .and(query_param("cursor", "p3"))
        .respond_with(page("members", members(&["U6"]), ""))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let users = client.users().list(ListUsersRequest::new()).await.unwrap();

    let ids: Vec<&str> = users.iter().filter_map(|u| u.id()).collect();
    assert_eq!(ids, vec!["U1", "U2", "U3", "U4", "U5", "U6"]);
}

#[tokio::test]
async fn test_rate_limit_waits_retry_after() {
    let server = setup_mock_server().await;

    api_get("conversations.list")
        .respond_with(
            ResponseTemplate::new(429)
                .insert_header("Retry-After", "1")
                .set_body_json(json!({"ok": false, "error": "ratelimited"})),
        )
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;
    api_get("conversations.list")
        .and(query_param("types", "private_channel"))
        .respond_with(page(
            "channels",
            json!([{"id": "G1", "name": "ops", "created": 1600000000}]),
            "",
        ))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let started = Instant::now();
    let channels = client
        .conversations()
        .list(ListConversationsRequest::new())
        .await
        .unwrap();

    assert!(started.elapsed() >= Duration::from_secs(1));
    assert_eq!(channels.len(), 1);
    assert_eq!(client.metrics().rate_limit_hits(), 1);
}

#[tokio::test]
async fn test_non_200_is_fatal() {
    let server = setup_mock_server().await;

    api_get("users.list")
        .respond_with(ResponseTemplate::new(403))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client
        .users()
        .list(ListUsersRequest::new())
        .await
        .unwrap_err();

    assert!(matches!(err, ExportError::ApiHttp { status: 403, .. }));
    assert_eq!(err.to_string(), "ERROR: 403 Forbidden");
}

#[tokio::test]
async fn test_logical_failure_is_fatal() {
    let server = setup_mock_server().await;

    api_get("users.list")
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"ok": false, "error": "not_authed"})),
        )
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client
        .users()
        .list(ListUsersRequest::new())
        .await
        .unwrap_err();

    assert!(matches!(err, ExportError::ApiLogical { ref error, .. } if error == "not_authed"));
    assert!(err.to_string().starts_with("I encountered an error: "));
}

#[tokio::test]
async fn test_missing_combine_key_is_fatal() {
    let server = setup_mock_server().await;

    api_get("users.list")
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"ok": true, "response_metadata": {"next_cursor": ""}})),
        )
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client
        .users()
        .list(ListUsersRequest::new())
        .await
        .unwrap_err();

    assert!(matches!(err, ExportError::MalformedPage { ref key, .. } if key == "members"));
}
