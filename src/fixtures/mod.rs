//! Test fixtures for Slack API responses.
//!
//! Provides realistic records and page bodies for unit and integration tests.

use crate::types::Record;
use serde_json::{json, Value};

fn record(value: Value) -> Record {
    match Record::from_value(value) {
        Some(record) => record,
        None => Record::default(),
    }
}

/// Channel record fixtures
pub mod channel_fixtures {
    use super::*;

    /// A private channel created at `created`
    pub fn private_channel(id: &str, name: &str, created: i64) -> Record {
        record(json!({
            "id": id,
            "name": name,
            "is_channel": false,
            "is_group": true,
            "is_private": true,
            "is_archived": false,
            "created": created,
            "creator": "U0000000001",
            "topic": {"value": "", "creator": "", "last_set": 0},
            "purpose": {
                "value": format!("Private channel {}", name),
                "creator": "U0000000001",
                "last_set": created
            },
            "num_members": 3
        }))
    }
}

/// User record fixtures
pub mod user_fixtures {
    use super::*;

    /// A regular workspace member
    pub fn regular(id: &str, name: &str) -> Record {
        record(json!({
            "id": id,
            "team_id": "T0000000001",
            "name": name,
            "deleted": false,
            "real_name": name,
            "tz": "Europe/Berlin",
            "is_admin": false,
            "is_bot": false,
            "profile": {"display_name": name, "real_name": name}
        }))
    }
}

/// Message record fixtures
pub mod message_fixtures {
    use super::*;

    /// A plain message
    pub fn simple(ts: &str, text: &str) -> Record {
        record(json!({
            "type": "message",
            "user": "U0000000001",
            "text": text,
            "ts": ts
        }))
    }

    /// A message that starts a thread
    pub fn thread_root(ts: &str, text: &str, reply_count: u32) -> Record {
        record(json!({
            "type": "message",
            "user": "U0000000001",
            "text": text,
            "ts": ts,
            "thread_ts": ts,
            "reply_count": reply_count
        }))
    }

    /// A reply inside the thread rooted at `thread_ts`
    pub fn thread_reply(ts: &str, thread_ts: &str, text: &str) -> Record {
        record(json!({
            "type": "message",
            "user": "U0000000002",
            "text": text,
            "ts": ts,
            "thread_ts": thread_ts,
            "parent_user_id": "U0000000001"
        }))
    }

    /// A join notice that carries a thread marker but must not be expanded
    pub fn join_notice(ts: &str, thread_ts: &str) -> Record {
        record(json!({
            "type": "message",
            "subtype": "channel_join",
            "user": "U0000000003",
            "text": "<@U0000000003> has joined the channel",
            "ts": ts,
            "thread_ts": thread_ts
        }))
    }

    /// A message with one attached file
    pub fn with_file(ts: &str, text: &str, url_private: Option<&str>) -> Record {
        let mut file = json!({"id": "F0000000001", "name": "report.pdf", "mode": "hosted"});
        if let Some(url) = url_private {
            file["url_private"] = json!(url);
        } else {
            file["mode"] = json!("tombstone");
        }

        record(json!({
            "type": "message",
            "user": "U0000000001",
            "text": text,
            "ts": ts,
            "files": [file],
            "upload": true
        }))
    }
}

/// Page body fixtures
pub mod page_fixtures {
    use super::*;

    /// A successful page with `records` under `key`
    pub fn page(key: &str, records: &[Record], next_cursor: Option<&str>) -> Value {
        let mut body = json!({
            "ok": true,
            "response_metadata": {"next_cursor": next_cursor.unwrap_or("")}
        });
        body[key] = json!(records);
        body
    }

    /// A logical failure body
    pub fn error(code: &str) -> Value {
        json!({"ok": false, "error": code})
    }
}
