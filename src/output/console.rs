//! Standard-output sink.

use super::ExportSink;
use crate::errors::{ExportResult, OutputError};
use crate::types::Record;
use std::io::Write;

/// Prints artifacts instead of writing files
///
/// Listings print one `<id> <name>` line per record; everything else prints
/// as one line of compact JSON.
#[derive(Debug)]
pub struct ConsoleSink<W: Write + Send = std::io::Stdout> {
    out: W,
}

impl ConsoleSink {
    /// Sink writing to standard output
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write + Send> ConsoleSink<W> {
    /// Sink writing to `out`
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Recover the underlying writer
    pub fn into_inner(self) -> W {
        self.out
    }

    fn print_listing(&mut self, records: &[Record]) -> ExportResult<()> {
        for record in records {
            writeln!(
                self.out,
                "{} {}",
                record.id().unwrap_or_default(),
                record.name().unwrap_or_default()
            )
            .map_err(|e| OutputError::io("<stdout>", e))?;
        }
        Ok(())
    }

    fn print_json(&mut self, records: &[Record]) -> ExportResult<()> {
        serde_json::to_writer(&mut self.out, records).map_err(OutputError::Json)?;
        writeln!(self.out).map_err(|e| OutputError::io("<stdout>", e))?;
        Ok(())
    }
}

impl<W: Write + Send> ExportSink for ConsoleSink<W> {
    fn write_channel_list(&mut self, channels: &[Record]) -> ExportResult<()> {
        self.print_listing(channels)
    }

    fn write_user_list(&mut self, users: &[Record]) -> ExportResult<()> {
        self.print_listing(users)
    }

    fn write_channels(&mut self, channels: &[Record]) -> ExportResult<()> {
        self.print_json(channels)
    }

    fn write_users(&mut self, users: &[Record]) -> ExportResult<()> {
        self.print_json(users)
    }

    fn write_window(
        &mut self,
        _channel_name: &str,
        _day: &str,
        messages: &[Record],
    ) -> ExportResult<()> {
        self.print_json(messages)
    }

    fn finish(&mut self) -> ExportResult<()> {
        self.out
            .flush()
            .map_err(|e| OutputError::io("<stdout>", e).into())
    }
}
