//! Export artifact sinks.
//!
//! The orchestrator hands every artifact to an [`ExportSink`]. Two sinks are
//! provided: [`DirectorySink`] writes a timestamped directory tree of JSON
//! files and optionally zips it, [`ConsoleSink`] prints to standard output.

mod archive;
mod console;
mod directory;

pub use archive::zip_dir;
pub use console::ConsoleSink;
pub use directory::{expand_path, DirectorySink};

use crate::errors::ExportResult;
use crate::types::Record;

/// File name of the full channel dump
pub const CHANNELS_FILE: &str = "channels";
/// File name of the full user dump
pub const USERS_FILE: &str = "users";
/// File name of the channel listing
pub const CHANNEL_LIST_FILE: &str = "channel_list";
/// File name of the user listing
pub const USER_LIST_FILE: &str = "user_list";

/// Destination for export artifacts
pub trait ExportSink: Send {
    /// Channel listing (`--lc`)
    fn write_channel_list(&mut self, channels: &[Record]) -> ExportResult<()>;

    /// User listing (`--lu`)
    fn write_user_list(&mut self, users: &[Record]) -> ExportResult<()>;

    /// Full channel dump of an export run
    fn write_channels(&mut self, channels: &[Record]) -> ExportResult<()>;

    /// Full user dump of an export run
    fn write_users(&mut self, users: &[Record]) -> ExportResult<()>;

    /// One channel's messages for one UTC day
    fn write_window(
        &mut self,
        channel_name: &str,
        day: &str,
        messages: &[Record],
    ) -> ExportResult<()>;

    /// Called once after the last window of a successful export
    fn finish(&mut self) -> ExportResult<()>;
}
