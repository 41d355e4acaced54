//! Channel view over an opaque record.

use super::{ChannelId, Record};
use crate::errors::{ExportError, ExportResult};

/// The fields of a channel record the exporter depends on
#[derive(Debug, Clone, PartialEq)]
pub struct ChannelRef {
    /// Channel ID
    pub id: ChannelId,
    /// Channel name (without #)
    pub name: String,
    /// Creation time in epoch seconds
    pub created: f64,
}

impl ChannelRef {
    /// Extract the channel fields from a record
    pub fn from_record(record: &Record) -> ExportResult<Self> {
        let id = record.id().ok_or_else(|| missing("id"))?;
        let name = record.name().ok_or_else(|| missing("name"))?;
        let created = record.created().ok_or_else(|| missing("created"))?;

        Ok(Self {
            id: ChannelId::new(id),
            name: name.to_string(),
            created,
        })
    }
}

impl TryFrom<&Record> for ChannelRef {
    type Error = ExportError;

    fn try_from(record: &Record) -> Result<Self, Self::Error> {
        Self::from_record(record)
    }
}

fn missing(field: &str) -> ExportError {
    ExportError::MalformedRecord {
        field: field.to_string(),
    }
}
