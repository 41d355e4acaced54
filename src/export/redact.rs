//! Attachment redaction for file-skip exports.
//!
//! Replaces attached-file metadata with an inline note in the message text so
//! an import can proceed without the files themselves.

use crate::types::Record;
use serde_json::Value;
use tracing::warn;

/// Note appended when the first attachment still exposes a private URL
pub const FILE_WAS_HERE: &str = " _This file was here:_ ";

/// Note appended when the attachment is gone
pub const FILE_WAS_DELETED: &str = " _File was deleted:_ ";

/// Outcome of redacting one message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Redaction {
    /// Message had no attachment field
    Untouched,
    /// Attachment replaced by a note
    Redacted,
    /// Attachment field was empty or not a list; message left as is
    Skipped,
}

/// Redact the attachments of one message in place
pub fn redact_files(message: &mut Record) -> Redaction {
    if !message.contains("files") {
        return Redaction::Untouched;
    }

    let has_attachment = message.files().map_or(false, |files| !files.is_empty());
    if !has_attachment {
        warn!(
            ts = message.ts().unwrap_or_default(),
            "Message has an empty attachment list, leaving it unredacted"
        );
        return Redaction::Skipped;
    }

    let text = message.text().unwrap_or_default();
    let text = match message.first_file_private_url() {
        Some(url) => format!("{}{}{}", text, FILE_WAS_HERE, url),
        None => format!("{}{}", text, FILE_WAS_DELETED),
    };

    message.insert("text", Value::String(text));
    message.remove("files");
    message.remove("upload");

    Redaction::Redacted
}

/// Redact every message of a batch, returning how many were changed
pub fn redact_all(messages: &mut [Record]) -> usize {
    messages
        .iter_mut()
        .map(redact_files)
        .filter(|r| *r == Redaction::Redacted)
        .count()
}
