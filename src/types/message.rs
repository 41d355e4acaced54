//! Message helpers over opaque records.

use super::Record;

impl Record {
    /// Whether this message starts a thread whose replies must be fetched
    ///
    /// Both checks are on key presence. Messages with any subtype (joins, bot
    /// posts, broadcasts) are skipped even when they carry a thread marker.
    pub fn is_thread_root(&self) -> bool {
        self.contains("thread_ts") && !self.contains("subtype")
    }

    /// Private URL of the first attached file, if exposed
    pub fn first_file_private_url(&self) -> Option<&str> {
        self.files()?
            .first()?
            .get("url_private")
            .and_then(|v| v.as_str())
    }
}
