//! Domain query tests.

use super::mock_client;
use crate::fixtures::{message_fixtures, page_fixtures, user_fixtures};
use crate::mocks::MockResponse;
use crate::services::conversations::{ConversationHistoryRequest, ConversationRepliesRequest};
use crate::services::users::ListUsersRequest;
use crate::types::Timestamp;

#[tokio::test]
async fn test_users_list() {
    let (transport, client) = mock_client();
    transport.enqueue(MockResponse::json(&page_fixtures::page(
        "members",
        &[
            user_fixtures::regular("U1", "ann"),
            user_fixtures::regular("U2", "bob"),
        ],
        None,
    )));

    let users = client
        .users()
        .list(ListUsersRequest::new().team_id(Some("T1".to_string())))
        .await
        .unwrap();

    assert_eq!(users.len(), 2);
    assert_eq!(users[1].name(), Some("bob"));

    let request = &transport.requests()[0];
    assert_eq!(request.endpoint(), "users.list");
    assert_eq!(request.query_value("team_id"), Some("T1"));
    assert_eq!(request.query_value("limit"), Some("200"));
}

#[tokio::test]
async fn test_history_sends_window_bounds() {
    let (transport, client) = mock_client();
    transport.enqueue(MockResponse::json(&page_fixtures::page(
        "messages",
        &[message_fixtures::simple("1600000001.000100", "hello")],
        None,
    )));

    let messages = client
        .conversations()
        .history(
            ConversationHistoryRequest::new("G1")
                .oldest(Timestamp::from_epoch(1_600_000_000.0))
                .latest(Timestamp::from_epoch(1_600_086_400.0)),
        )
        .await
        .unwrap();

    assert_eq!(messages.len(), 1);

    let request = &transport.requests()[0];
    assert_eq!(request.endpoint(), "conversations.history");
    assert_eq!(request.query_value("channel"), Some("G1"));
    assert_eq!(request.query_value("oldest"), Some("1600000000.000000"));
    assert_eq!(request.query_value("latest"), Some("1600086400.000000"));
}

#[tokio::test]
async fn test_replies_request() {
    let (transport, client) = mock_client();
    transport.enqueue(MockResponse::json(&page_fixtures::page(
        "messages",
        &[
            message_fixtures::thread_root("1.1", "root", 1),
            message_fixtures::thread_reply("1.2", "1.1", "reply"),
        ],
        None,
    )));

    let replies = client
        .conversations()
        .replies(ConversationRepliesRequest::new("G1", "1.1"))
        .await
        .unwrap();

    assert_eq!(replies.len(), 2);
    let request = &transport.requests()[0];
    assert_eq!(request.endpoint(), "conversations.replies");
    assert_eq!(request.query_value("ts"), Some("1.1"));
}
