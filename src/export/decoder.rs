use super::proto::{TemporaryExposureKey, TemporaryExposureKeyExport};
use crate::error::DecodeError;
use chrono::{DateTime, Utc};
use prost::Message;

/// Magic prefix of every binary key export
pub const EXPORT_HEADER: &[u8; 16] = b"EK Export v1    ";

/// A decoded export with the fields aggregation depends on made mandatory
#[derive(Debug, Clone, PartialEq)]
pub struct ExportRecord {
    /// Start of the export window
    pub start: DateTime<Utc>,
    /// End of the export window
    pub end: DateTime<Utc>,
    /// Region the keys were collected in
    pub region: Option<String>,
    /// Position of this file within its batch
    pub batch_num: Option<i32>,
    /// Number of files in the batch
    pub batch_size: Option<i32>,
    /// Number of signatures declared for the export
    pub signature_count: usize,
    /// Keys in wire order
    pub keys: Vec<TemporaryExposureKey>,
    /// Revised keys in wire order (not part of the key count)
    pub revised_keys: Vec<TemporaryExposureKey>,
}

impl TryFrom<TemporaryExposureKeyExport> for ExportRecord {
    type Error = DecodeError;

    fn try_from(export: TemporaryExposureKeyExport) -> Result<Self, Self::Error> {
        let start = required_instant("start_timestamp", export.start_timestamp)?;
        let end = required_instant("end_timestamp", export.end_timestamp)?;
        Ok(Self {
            start,
            end,
            region: export.region,
            batch_num: export.batch_num,
            batch_size: export.batch_size,
            signature_count: export.signature_infos.len(),
            keys: export.keys,
            revised_keys: export.revised_keys,
        })
    }
}

fn required_instant(field: &'static str, value: Option<u64>) -> Result<DateTime<Utc>, DecodeError> {
    let value = value.ok_or(DecodeError::MissingField(field))?;
    i64::try_from(value)
        .ok()
        .and_then(|secs| DateTime::from_timestamp(secs, 0))
        .ok_or(DecodeError::TimestampOutOfRange { field, value })
}

/// Decode a binary key export
///
/// The header is checked before any protobuf decoding is attempted. Input
/// shorter than the header is a header mismatch.
pub fn decode_export(payload: &[u8]) -> Result<ExportRecord, DecodeError> {
    let Some((header, body)) = payload.split_first_chunk::<16>() else {
        return Err(DecodeError::HeaderMismatch {
            found: payload.to_vec(),
        });
    };
    if header != EXPORT_HEADER {
        return Err(DecodeError::HeaderMismatch {
            found: header.to_vec(),
        });
    }

    let export = TemporaryExposureKeyExport::decode(body)?;
    ExportRecord::try_from(export)
}
