//! Common types for the exporter.
//!
//! Records are kept opaque: the API owns their schema, and the exporter only
//! reads the handful of fields it needs through typed accessors.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub mod channel;
pub mod message;

pub use channel::*;

/// An opaque API object (channel, user or message) with insertion-ordered keys
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record(Map<String, Value>);

impl Record {
    /// Create a record from a JSON map
    pub fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    /// Convert a JSON value into a record, if it is an object
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(fields) => Some(Self(fields)),
            _ => None,
        }
    }

    /// Get a raw field
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Get a string field
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }

    /// Check whether a field is present, whatever its value
    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Set a field
    pub fn insert(&mut self, key: impl Into<String>, value: Value) -> Option<Value> {
        self.0.insert(key.into(), value)
    }

    /// Remove a field, keeping the order of the remaining ones
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.0.shift_remove(key)
    }

    /// Object identifier
    pub fn id(&self) -> Option<&str> {
        self.get_str("id")
    }

    /// Display name
    pub fn name(&self) -> Option<&str> {
        self.get_str("name")
    }

    /// Creation time in epoch seconds
    ///
    /// Accepts both numeric and string encodings.
    pub fn created(&self) -> Option<f64> {
        match self.get("created")? {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// Message timestamp
    pub fn ts(&self) -> Option<&str> {
        self.get_str("ts")
    }

    /// Thread marker: timestamp of the thread root
    pub fn thread_ts(&self) -> Option<&str> {
        self.get_str("thread_ts")
    }

    /// Message subtype
    pub fn subtype(&self) -> Option<&str> {
        self.get_str("subtype")
    }

    /// Message text
    pub fn text(&self) -> Option<&str> {
        self.get_str("text")
    }

    /// Attached file metadata
    pub fn files(&self) -> Option<&Vec<Value>> {
        self.get("files").and_then(Value::as_array)
    }

    /// Borrow the underlying map
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    /// Consume into a JSON value
    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }
}

impl From<Map<String, Value>> for Record {
    fn from(fields: Map<String, Value>) -> Self {
        Self(fields)
    }
}

/// Slack timestamp (ts) - unique identifier for messages
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(pub String);

impl Timestamp {
    /// Create a new timestamp
    pub fn new(ts: impl Into<String>) -> Self {
        Self(ts.into())
    }

    /// Format epoch seconds the way the API expects them
    pub fn from_epoch(secs: f64) -> Self {
        Self(format!("{:.6}", secs))
    }

    /// Get the timestamp as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

}

impl From<String> for Timestamp {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for Timestamp {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Slack channel ID
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChannelId(pub String);

impl ChannelId {
    /// Create a new channel ID
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the ID as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for ChannelId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for ChannelId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl std::fmt::Display for ChannelId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Cursor for pagination
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cursor(pub String);

impl Cursor {
    /// Create a cursor from a raw server value
    ///
    /// Returns `None` for blank values: a blank cursor means no more pages.
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(raw.to_string()))
        }
    }

    /// Get the cursor as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Response metadata for pagination
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResponseMetadata {
    /// Next cursor for pagination
    #[serde(default)]
    pub next_cursor: Option<String>,
}

impl ResponseMetadata {
    /// The continuation cursor, if any
    pub fn cursor(&self) -> Option<Cursor> {
        self.next_cursor.as_deref().and_then(Cursor::parse)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: Value) -> Record {
        Record::from_value(value).unwrap()
    }

    #[test]
    fn test_timestamp_parsing() {
        let ts = Timestamp::new("1234567890.123456");
        assert_eq!(ts.as_str(), "1234567890.123456");
        assert_eq!(ts.to_string(), "1234567890.123456");
    }

    #[test]
    fn test_timestamp_from_epoch() {
        assert_eq!(Timestamp::from_epoch(1600000000.0).as_str(), "1600000000.000000");
        assert_eq!(Timestamp::from_epoch(1600086400.5).as_str(), "1600086400.500000");
    }

    #[test]
    fn test_cursor_parse() {
        assert_eq!(Cursor::parse("dXNlcjpVMDYx").unwrap().as_str(), "dXNlcjpVMDYx");
        assert!(Cursor::parse("").is_none());
        assert!(Cursor::parse("   ").is_none());
    }

    #[test]
    fn test_response_metadata_cursor() {
        let meta = ResponseMetadata {
            next_cursor: Some("dGVhbTpDMDYxRkE1UEI=".to_string()),
        };
        assert_eq!(
            meta.cursor().map(|c| c.as_str().to_string()),
            Some("dGVhbTpDMDYxRkE1UEI=".to_string())
        );

        let empty_meta = ResponseMetadata {
            next_cursor: Some(" ".to_string()),
        };
        assert!(empty_meta.cursor().is_none());

        let none_meta = ResponseMetadata { next_cursor: None };
        assert!(none_meta.cursor().is_none());
    }

    #[test]
    fn test_record_accessors() {
        let rec = record(json!({
            "id": "G123",
            "name": "secret-plans",
            "created": 1600000000,
            "ts": "1600000001.000100",
            "thread_ts": "1600000001.000100",
            "text": "hi",
            "files": [{"id": "F1"}]
        }));

        assert_eq!(rec.id(), Some("G123"));
        assert_eq!(rec.name(), Some("secret-plans"));
        assert_eq!(rec.created(), Some(1600000000.0));
        assert_eq!(rec.ts(), Some("1600000001.000100"));
        assert_eq!(rec.thread_ts(), Some("1600000001.000100"));
        assert_eq!(rec.subtype(), None);
        assert_eq!(rec.text(), Some("hi"));
        assert_eq!(rec.files().map(Vec::len), Some(1));
    }

    #[test]
    fn test_record_created_as_string() {
        let rec = record(json!({"created": "1600000000"}));
        assert_eq!(rec.created(), Some(1600000000.0));
    }

    #[test]
    fn test_record_preserves_key_order() {
        let mut rec = record(json!({"z": 1, "a": 2, "m": 3}));
        rec.remove("a");
        rec.insert("b", json!(4));
        let keys: Vec<&String> = rec.as_map().keys().collect();
        assert_eq!(keys, vec!["z", "m", "b"]);
    }

    #[test]
    fn test_record_from_non_object() {
        assert!(Record::from_value(json!([1, 2])).is_none());
        assert!(Record::from_value(json!("text")).is_none());
    }
}
